//! REGIMM encoding group (major opcode 0x01).
//!
//! Dispatch is on the rt field (bits 20:16): branches on sign, their
//! branch-likely and and-link variants, and the immediate trap family.
//! Branch-likely forms date from MIPS II and were removed by Release 6.

use crate::isa::caps::isa;
use crate::isa::operation::{Format, OpKind, TrapCond};
use crate::isa::table::{Node, OpcodeTable, Spec};

/// Branch on less than zero.
pub const BLTZ: u32 = 0x00;
/// Branch on greater than or equal to zero.
pub const BGEZ: u32 = 0x01;
/// Branch on less than zero likely.
pub const BLTZL: u32 = 0x02;
/// Branch on greater than or equal to zero likely.
pub const BGEZL: u32 = 0x03;
/// Trap if greater or equal immediate, signed.
pub const TGEI: u32 = 0x08;
/// Trap if greater or equal immediate, unsigned.
pub const TGEIU: u32 = 0x09;
/// Trap if less than immediate, signed.
pub const TLTI: u32 = 0x0A;
/// Trap if less than immediate, unsigned.
pub const TLTIU: u32 = 0x0B;
/// Trap if equal immediate.
pub const TEQI: u32 = 0x0C;
/// Trap if not equal immediate.
pub const TNEI: u32 = 0x0E;
/// Branch on less than zero and link.
pub const BLTZAL: u32 = 0x10;
/// Branch on greater than or equal to zero and link.
pub const BGEZAL: u32 = 0x11;
/// Branch on less than zero and link likely.
pub const BLTZALL: u32 = 0x12;
/// Branch on greater than or equal to zero and link likely.
pub const BGEZALL: u32 = 0x13;

/// A branch entry legal from MIPS I.
const fn branch(kind: OpKind) -> Node {
    Node::Op(Spec::new(kind, Format::Branch))
}

/// A branch-likely entry: MIPS II, gone in Release 6.
const fn likely(kind: OpKind) -> Node {
    Node::Op(Spec::new(kind, Format::Branch).isa(isa::MIPS2).removed(isa::ANY_R6))
}

/// An immediate trap entry: MIPS II, gone in Release 6.
const fn trap(cond: TrapCond) -> Node {
    Node::Op(
        Spec::new(OpKind::TrapImm(cond), Format::TrapImm)
            .isa(isa::MIPS2)
            .removed(isa::ANY_R6),
    )
}

/// The REGIMM dispatch table, keyed on the rt field.
pub static TABLE: OpcodeTable = OpcodeTable {
    mask: 0x1F << 16,
    entries: &[
        (BLTZ << 16, branch(OpKind::Bltz)),
        (BGEZ << 16, branch(OpKind::Bgez)),
        (BLTZL << 16, likely(OpKind::Bltzl)),
        (BGEZL << 16, likely(OpKind::Bgezl)),
        (TGEI << 16, trap(TrapCond::Ge)),
        (TGEIU << 16, trap(TrapCond::Geu)),
        (TLTI << 16, trap(TrapCond::Lt)),
        (TLTIU << 16, trap(TrapCond::Ltu)),
        (TEQI << 16, trap(TrapCond::Eq)),
        (TNEI << 16, trap(TrapCond::Ne)),
        (BLTZAL << 16, branch(OpKind::Bltzal)),
        (BGEZAL << 16, branch(OpKind::Bgezal)),
        (BLTZALL << 16, likely(OpKind::Bltzall)),
        (BGEZALL << 16, likely(OpKind::Bgezall)),
    ],
};
