//! SPECIAL2 encoding group (major opcode 0x1C).
//!
//! Multiply-accumulate and count-leading operations introduced by MIPS32.
//! Release 6 reclaimed the whole group for other encodings, so every entry
//! here carries the removed-in-R6 predicate.

use crate::isa::caps::isa;
use crate::isa::operation::{Format, OpKind};
use crate::isa::table::{Node, OpcodeTable, Spec};

/// Multiply-add into HI/LO, signed.
pub const MADD: u32 = 0x00;
/// Multiply-add unsigned.
pub const MADDU: u32 = 0x01;
/// Multiply to GPR (HI/LO unpredictable).
pub const MUL: u32 = 0x02;
/// Multiply-subtract from HI/LO, signed.
pub const MSUB: u32 = 0x04;
/// Multiply-subtract unsigned.
pub const MSUBU: u32 = 0x05;
/// Count leading zeros, word.
pub const CLZ: u32 = 0x20;
/// Count leading ones, word.
pub const CLO: u32 = 0x21;
/// Count leading zeros, doubleword.
pub const DCLZ: u32 = 0x24;
/// Count leading ones, doubleword.
pub const DCLO: u32 = 0x25;

/// An entry legal from MIPS32, gone in Release 6.
const fn m32(kind: OpKind) -> Node {
    Node::Op(Spec::new(kind, Format::Reg).isa(isa::MIPS32).removed(isa::ANY_R6))
}

/// A doubleword entry legal from MIPS64, gone in Release 6.
const fn m64(kind: OpKind) -> Node {
    Node::Op(
        Spec::new(kind, Format::Reg)
            .isa(isa::MIPS64)
            .removed(isa::ANY_R6)
            .wide(),
    )
}

/// The SPECIAL2 dispatch table, keyed on the function field.
pub static TABLE: OpcodeTable = OpcodeTable {
    mask: 0x3F,
    entries: &[
        (MADD, m32(OpKind::Madd)),
        (MADDU, m32(OpKind::Maddu)),
        (MUL, m32(OpKind::Mul)),
        (MSUB, m32(OpKind::Msub)),
        (MSUBU, m32(OpKind::Msubu)),
        (CLZ, m32(OpKind::Clz)),
        (CLO, m32(OpKind::Clo)),
        (DCLZ, m64(OpKind::Dclz)),
        (DCLO, m64(OpKind::Dclo)),
    ],
};
