//! Major opcode constants (bits 31:26) and the top-level dispatch table.
//!
//! Group opcodes (SPECIAL, SPECIAL2, SPECIAL3, REGIMM, COP1) re-dispatch
//! into their own tables; everything else terminates here. COP1 sits behind
//! a capability-gated alias arm so that a disabled FPU yields the
//! coprocessor-unusable fault class for the entire group.

use crate::isa::caps::{ase, isa};
use crate::isa::operation::{Format, OpKind};
use crate::isa::table::{Node, OpcodeTable, Spec};
use crate::isa::{cop1, regimm, special, special2, special3};

/// SPECIAL group (function-field dispatch).
pub const SPECIAL: u32 = 0x00;
/// REGIMM group (rt-field dispatch).
pub const REGIMM: u32 = 0x01;
/// Jump.
pub const J: u32 = 0x02;
/// Jump and link.
pub const JAL: u32 = 0x03;
/// Branch on equal.
pub const BEQ: u32 = 0x04;
/// Branch on not equal.
pub const BNE: u32 = 0x05;
/// Branch on less than or equal to zero.
pub const BLEZ: u32 = 0x06;
/// Branch on greater than zero.
pub const BGTZ: u32 = 0x07;
/// Add immediate with overflow trap.
pub const ADDI: u32 = 0x08;
/// Add immediate unsigned (no trap).
pub const ADDIU: u32 = 0x09;
/// Set on less than immediate, signed.
pub const SLTI: u32 = 0x0A;
/// Set on less than immediate, unsigned.
pub const SLTIU: u32 = 0x0B;
/// AND immediate.
pub const ANDI: u32 = 0x0C;
/// OR immediate.
pub const ORI: u32 = 0x0D;
/// XOR immediate.
pub const XORI: u32 = 0x0E;
/// Load upper immediate.
pub const LUI: u32 = 0x0F;
/// Coprocessor 1 group (fmt-field dispatch).
pub const COP1: u32 = 0x11;
/// Branch on equal likely.
pub const BEQL: u32 = 0x14;
/// Branch on not equal likely.
pub const BNEL: u32 = 0x15;
/// Branch on less than or equal to zero likely.
pub const BLEZL: u32 = 0x16;
/// Branch on greater than zero likely.
pub const BGTZL: u32 = 0x17;
/// Doubleword add immediate with overflow trap.
pub const DADDI: u32 = 0x18;
/// Doubleword add immediate unsigned.
pub const DADDIU: u32 = 0x19;
/// Load doubleword left.
pub const LDL: u32 = 0x1A;
/// Load doubleword right.
pub const LDR: u32 = 0x1B;
/// SPECIAL2 group.
pub const SPECIAL2: u32 = 0x1C;
/// SPECIAL3 group.
pub const SPECIAL3: u32 = 0x1F;
/// Load byte.
pub const LB: u32 = 0x20;
/// Load halfword.
pub const LH: u32 = 0x21;
/// Load word left.
pub const LWL: u32 = 0x22;
/// Load word.
pub const LW: u32 = 0x23;
/// Load byte unsigned.
pub const LBU: u32 = 0x24;
/// Load halfword unsigned.
pub const LHU: u32 = 0x25;
/// Load word right.
pub const LWR: u32 = 0x26;
/// Load word unsigned.
pub const LWU: u32 = 0x27;
/// Store byte.
pub const SB: u32 = 0x28;
/// Store halfword.
pub const SH: u32 = 0x29;
/// Store word left.
pub const SWL: u32 = 0x2A;
/// Store word.
pub const SW: u32 = 0x2B;
/// Store doubleword left.
pub const SDL: u32 = 0x2C;
/// Store doubleword right.
pub const SDR: u32 = 0x2D;
/// Store word right.
pub const SWR: u32 = 0x2E;
/// Load linked word.
pub const LL: u32 = 0x30;
/// Load doubleword.
pub const LD: u32 = 0x37;
/// Store conditional word.
pub const SC: u32 = 0x38;
/// Store doubleword.
pub const SD: u32 = 0x3F;

/// Shift applied to major opcode values in the instruction word.
pub const SHIFT: u32 = 26;

/// COP1 alias arm: the group only means anything with CP1 enabled.
static COP1_GATE: [(u32, Node); 1] = [(ase::CP1, Node::Table(&cop1::TABLE))];

/// A memory entry with no gating.
const fn mem(kind: OpKind) -> Node {
    Node::Op(Spec::new(kind, Format::Mem))
}

/// A doubleword memory entry (MIPS III, 64-bit mode).
const fn mem64(kind: OpKind) -> Node {
    Node::Op(Spec::new(kind, Format::Mem).isa(isa::MIPS3).wide())
}

/// An unaligned doubleword memory entry, gone in Release 6.
const fn mem64_unaligned(kind: OpKind) -> Node {
    Node::Op(
        Spec::new(kind, Format::Mem)
            .isa(isa::MIPS3)
            .removed(isa::ANY_R6)
            .wide(),
    )
}

/// The top-level dispatch table, keyed on the major opcode.
pub static TABLE: OpcodeTable = OpcodeTable {
    mask: 0x3F << SHIFT,
    entries: &[
        (SPECIAL << SHIFT, Node::Table(&special::TABLE)),
        (REGIMM << SHIFT, Node::Table(&regimm::TABLE)),
        (J << SHIFT, Node::Op(Spec::new(OpKind::J, Format::Jump))),
        (JAL << SHIFT, Node::Op(Spec::new(OpKind::Jal, Format::Jump))),
        (BEQ << SHIFT, Node::Op(Spec::new(OpKind::Beq, Format::Branch))),
        (BNE << SHIFT, Node::Op(Spec::new(OpKind::Bne, Format::Branch))),
        (BLEZ << SHIFT, Node::Op(Spec::new(OpKind::Blez, Format::Branch))),
        (BGTZ << SHIFT, Node::Op(Spec::new(OpKind::Bgtz, Format::Branch))),
        (
            ADDI << SHIFT,
            Node::Op(Spec::new(OpKind::Addi, Format::ImmSigned).removed(isa::ANY_R6)),
        ),
        (ADDIU << SHIFT, Node::Op(Spec::new(OpKind::Addiu, Format::ImmSigned))),
        (SLTI << SHIFT, Node::Op(Spec::new(OpKind::Slti, Format::ImmSigned))),
        (SLTIU << SHIFT, Node::Op(Spec::new(OpKind::Sltiu, Format::ImmSigned))),
        (ANDI << SHIFT, Node::Op(Spec::new(OpKind::Andi, Format::ImmUnsigned))),
        (ORI << SHIFT, Node::Op(Spec::new(OpKind::Ori, Format::ImmUnsigned))),
        (XORI << SHIFT, Node::Op(Spec::new(OpKind::Xori, Format::ImmUnsigned))),
        (LUI << SHIFT, Node::Op(Spec::new(OpKind::Lui, Format::ImmUnsigned))),
        (COP1 << SHIFT, Node::Alias(&COP1_GATE)),
        (
            BEQL << SHIFT,
            Node::Op(Spec::new(OpKind::Beql, Format::Branch).isa(isa::MIPS2).removed(isa::ANY_R6)),
        ),
        (
            BNEL << SHIFT,
            Node::Op(Spec::new(OpKind::Bnel, Format::Branch).isa(isa::MIPS2).removed(isa::ANY_R6)),
        ),
        (
            BLEZL << SHIFT,
            Node::Op(Spec::new(OpKind::Blezl, Format::Branch).isa(isa::MIPS2).removed(isa::ANY_R6)),
        ),
        (
            BGTZL << SHIFT,
            Node::Op(Spec::new(OpKind::Bgtzl, Format::Branch).isa(isa::MIPS2).removed(isa::ANY_R6)),
        ),
        (
            DADDI << SHIFT,
            Node::Op(
                Spec::new(OpKind::Daddi, Format::ImmSigned)
                    .isa(isa::MIPS3)
                    .removed(isa::ANY_R6)
                    .wide(),
            ),
        ),
        (
            DADDIU << SHIFT,
            Node::Op(Spec::new(OpKind::Daddiu, Format::ImmSigned).isa(isa::MIPS3).wide()),
        ),
        (LDL << SHIFT, mem64_unaligned(OpKind::Ldl)),
        (LDR << SHIFT, mem64_unaligned(OpKind::Ldr)),
        (SPECIAL2 << SHIFT, Node::Table(&special2::TABLE)),
        (SPECIAL3 << SHIFT, Node::Table(&special3::TABLE)),
        (LB << SHIFT, mem(OpKind::Lb)),
        (LH << SHIFT, mem(OpKind::Lh)),
        (
            LWL << SHIFT,
            Node::Op(Spec::new(OpKind::Lwl, Format::Mem).removed(isa::ANY_R6)),
        ),
        (LW << SHIFT, mem(OpKind::Lw)),
        (LBU << SHIFT, mem(OpKind::Lbu)),
        (LHU << SHIFT, mem(OpKind::Lhu)),
        (
            LWR << SHIFT,
            Node::Op(Spec::new(OpKind::Lwr, Format::Mem).removed(isa::ANY_R6)),
        ),
        (LWU << SHIFT, mem64(OpKind::Lwu)),
        (SB << SHIFT, mem(OpKind::Sb)),
        (SH << SHIFT, mem(OpKind::Sh)),
        (
            SWL << SHIFT,
            Node::Op(Spec::new(OpKind::Swl, Format::Mem).removed(isa::ANY_R6)),
        ),
        (SW << SHIFT, mem(OpKind::Sw)),
        (SDL << SHIFT, mem64_unaligned(OpKind::Sdl)),
        (SDR << SHIFT, mem64_unaligned(OpKind::Sdr)),
        (
            SWR << SHIFT,
            Node::Op(Spec::new(OpKind::Swr, Format::Mem).removed(isa::ANY_R6)),
        ),
        (
            LL << SHIFT,
            Node::Op(Spec::new(OpKind::Ll, Format::Mem).isa(isa::MIPS2).removed(isa::ANY_R6)),
        ),
        (LD << SHIFT, mem64(OpKind::Ld)),
        (
            SC << SHIFT,
            Node::Op(Spec::new(OpKind::Sc, Format::Mem).isa(isa::MIPS2).removed(isa::ANY_R6)),
        ),
        (SD << SHIFT, mem64(OpKind::Sd)),
    ],
};
