//! SPECIAL encoding group (major opcode 0x00).
//!
//! Dispatch is on the function field (bits 5:0). Two function codes nest a
//! third level: SRL/ROTR share 0x02 and are disambiguated by bit 21, and
//! SRLV/ROTRV share 0x06 and are disambiguated by bit 6. The rotate forms
//! were introduced by Release 2 and are Reserved before it.

use crate::isa::caps::isa;
use crate::isa::operation::{Format, OpKind, TrapCond};
use crate::isa::table::{Node, OpcodeTable, Spec};

/// Shift left logical.
pub const SLL: u32 = 0x00;
/// Shift right logical (also ROTR when bit 21 is set).
pub const SRL: u32 = 0x02;
/// Shift right arithmetic.
pub const SRA: u32 = 0x03;
/// Shift left logical variable.
pub const SLLV: u32 = 0x04;
/// Shift right logical variable (also ROTRV when bit 6 is set).
pub const SRLV: u32 = 0x06;
/// Shift right arithmetic variable.
pub const SRAV: u32 = 0x07;
/// Jump register.
pub const JR: u32 = 0x08;
/// Jump and link register.
pub const JALR: u32 = 0x09;
/// Move conditional on zero.
pub const MOVZ: u32 = 0x0A;
/// Move conditional on not zero.
pub const MOVN: u32 = 0x0B;
/// Move from HI.
pub const MFHI: u32 = 0x10;
/// Move to HI.
pub const MTHI: u32 = 0x11;
/// Move from LO.
pub const MFLO: u32 = 0x12;
/// Move to LO.
pub const MTLO: u32 = 0x13;
/// Doubleword shift left logical variable.
pub const DSLLV: u32 = 0x14;
/// Doubleword shift right logical variable.
pub const DSRLV: u32 = 0x16;
/// Doubleword shift right arithmetic variable.
pub const DSRAV: u32 = 0x17;
/// Multiply (signed, into HI/LO).
pub const MULT: u32 = 0x18;
/// Multiply unsigned.
pub const MULTU: u32 = 0x19;
/// Divide (signed, into HI/LO).
pub const DIV: u32 = 0x1A;
/// Divide unsigned.
pub const DIVU: u32 = 0x1B;
/// Add with overflow trap.
pub const ADD: u32 = 0x20;
/// Add unsigned (no trap).
pub const ADDU: u32 = 0x21;
/// Subtract with overflow trap.
pub const SUB: u32 = 0x22;
/// Subtract unsigned (no trap).
pub const SUBU: u32 = 0x23;
/// Bitwise AND.
pub const AND: u32 = 0x24;
/// Bitwise OR.
pub const OR: u32 = 0x25;
/// Bitwise XOR.
pub const XOR: u32 = 0x26;
/// Bitwise NOR.
pub const NOR: u32 = 0x27;
/// Set on less than, signed.
pub const SLT: u32 = 0x2A;
/// Set on less than, unsigned.
pub const SLTU: u32 = 0x2B;
/// Doubleword add with overflow trap.
pub const DADD: u32 = 0x2C;
/// Doubleword add unsigned.
pub const DADDU: u32 = 0x2D;
/// Doubleword subtract with overflow trap.
pub const DSUB: u32 = 0x2E;
/// Doubleword subtract unsigned.
pub const DSUBU: u32 = 0x2F;
/// Trap if greater or equal, signed.
pub const TGE: u32 = 0x30;
/// Trap if greater or equal, unsigned.
pub const TGEU: u32 = 0x31;
/// Trap if less than, signed.
pub const TLT: u32 = 0x32;
/// Trap if less than, unsigned.
pub const TLTU: u32 = 0x33;
/// Trap if equal.
pub const TEQ: u32 = 0x34;
/// Trap if not equal.
pub const TNE: u32 = 0x36;
/// Doubleword shift left logical.
pub const DSLL: u32 = 0x38;
/// Doubleword shift right logical.
pub const DSRL: u32 = 0x3A;
/// Doubleword shift right arithmetic.
pub const DSRA: u32 = 0x3B;
/// Doubleword shift left logical plus 32.
pub const DSLL32: u32 = 0x3C;
/// Doubleword shift right logical plus 32.
pub const DSRL32: u32 = 0x3E;
/// Doubleword shift right arithmetic plus 32.
pub const DSRA32: u32 = 0x3F;

/// SRL/ROTR third level: bit 21 selects the rotate form.
static SRL_ROTR: OpcodeTable = OpcodeTable {
    mask: 1 << 21,
    entries: &[
        (0, Node::Op(Spec::new(OpKind::Srl, Format::ShiftImm))),
        (
            1 << 21,
            Node::Op(Spec::new(OpKind::Rotr, Format::ShiftImm).isa(isa::MIPS32R2)),
        ),
    ],
};

/// SRLV/ROTRV third level: bit 6 selects the rotate form.
static SRLV_ROTRV: OpcodeTable = OpcodeTable {
    mask: 1 << 6,
    entries: &[
        (0, Node::Op(Spec::new(OpKind::Srlv, Format::Reg))),
        (
            1 << 6,
            Node::Op(Spec::new(OpKind::Rotrv, Format::Reg).isa(isa::MIPS32R2)),
        ),
    ],
};

/// The SPECIAL dispatch table, keyed on the function field.
pub static TABLE: OpcodeTable = OpcodeTable {
    mask: 0x3F,
    entries: &[
        (SLL, Node::Op(Spec::new(OpKind::Sll, Format::ShiftImm))),
        (SRL, Node::Table(&SRL_ROTR)),
        (SRA, Node::Op(Spec::new(OpKind::Sra, Format::ShiftImm))),
        (SLLV, Node::Op(Spec::new(OpKind::Sllv, Format::Reg))),
        (SRLV, Node::Table(&SRLV_ROTRV)),
        (SRAV, Node::Op(Spec::new(OpKind::Srav, Format::Reg))),
        (JR, Node::Op(Spec::new(OpKind::Jr, Format::Reg))),
        (JALR, Node::Op(Spec::new(OpKind::Jalr, Format::Reg))),
        (
            MOVZ,
            Node::Op(Spec::new(OpKind::Movz, Format::Reg).isa(isa::MIPS4 | isa::MIPS32)),
        ),
        (
            MOVN,
            Node::Op(Spec::new(OpKind::Movn, Format::Reg).isa(isa::MIPS4 | isa::MIPS32)),
        ),
        (MFHI, Node::Op(Spec::new(OpKind::Mfhi, Format::Reg))),
        (MTHI, Node::Op(Spec::new(OpKind::Mthi, Format::Reg))),
        (MFLO, Node::Op(Spec::new(OpKind::Mflo, Format::Reg))),
        (MTLO, Node::Op(Spec::new(OpKind::Mtlo, Format::Reg))),
        (
            DSLLV,
            Node::Op(Spec::new(OpKind::Dsllv, Format::Reg).isa(isa::MIPS3).wide()),
        ),
        (
            DSRLV,
            Node::Op(Spec::new(OpKind::Dsrlv, Format::Reg).isa(isa::MIPS3).wide()),
        ),
        (
            DSRAV,
            Node::Op(Spec::new(OpKind::Dsrav, Format::Reg).isa(isa::MIPS3).wide()),
        ),
        (MULT, Node::Op(Spec::new(OpKind::Mult, Format::Reg))),
        (MULTU, Node::Op(Spec::new(OpKind::Multu, Format::Reg))),
        (DIV, Node::Op(Spec::new(OpKind::Div, Format::Reg))),
        (DIVU, Node::Op(Spec::new(OpKind::Divu, Format::Reg))),
        (ADD, Node::Op(Spec::new(OpKind::Add, Format::Reg))),
        (ADDU, Node::Op(Spec::new(OpKind::Addu, Format::Reg))),
        (SUB, Node::Op(Spec::new(OpKind::Sub, Format::Reg))),
        (SUBU, Node::Op(Spec::new(OpKind::Subu, Format::Reg))),
        (AND, Node::Op(Spec::new(OpKind::And, Format::Reg))),
        (OR, Node::Op(Spec::new(OpKind::Or, Format::Reg))),
        (XOR, Node::Op(Spec::new(OpKind::Xor, Format::Reg))),
        (NOR, Node::Op(Spec::new(OpKind::Nor, Format::Reg))),
        (SLT, Node::Op(Spec::new(OpKind::Slt, Format::Reg))),
        (SLTU, Node::Op(Spec::new(OpKind::Sltu, Format::Reg))),
        (
            DADD,
            Node::Op(Spec::new(OpKind::Dadd, Format::Reg).isa(isa::MIPS3).wide()),
        ),
        (
            DADDU,
            Node::Op(Spec::new(OpKind::Daddu, Format::Reg).isa(isa::MIPS3).wide()),
        ),
        (
            DSUB,
            Node::Op(Spec::new(OpKind::Dsub, Format::Reg).isa(isa::MIPS3).wide()),
        ),
        (
            DSUBU,
            Node::Op(Spec::new(OpKind::Dsubu, Format::Reg).isa(isa::MIPS3).wide()),
        ),
        (
            TGE,
            Node::Op(Spec::new(OpKind::Trap(TrapCond::Ge), Format::TrapReg).isa(isa::MIPS2)),
        ),
        (
            TGEU,
            Node::Op(Spec::new(OpKind::Trap(TrapCond::Geu), Format::TrapReg).isa(isa::MIPS2)),
        ),
        (
            TLT,
            Node::Op(Spec::new(OpKind::Trap(TrapCond::Lt), Format::TrapReg).isa(isa::MIPS2)),
        ),
        (
            TLTU,
            Node::Op(Spec::new(OpKind::Trap(TrapCond::Ltu), Format::TrapReg).isa(isa::MIPS2)),
        ),
        (
            TEQ,
            Node::Op(Spec::new(OpKind::Trap(TrapCond::Eq), Format::TrapReg).isa(isa::MIPS2)),
        ),
        (
            TNE,
            Node::Op(Spec::new(OpKind::Trap(TrapCond::Ne), Format::TrapReg).isa(isa::MIPS2)),
        ),
        (
            DSLL,
            Node::Op(Spec::new(OpKind::Dsll, Format::ShiftImm).isa(isa::MIPS3).wide()),
        ),
        (
            DSRL,
            Node::Op(Spec::new(OpKind::Dsrl, Format::ShiftImm).isa(isa::MIPS3).wide()),
        ),
        (
            DSRA,
            Node::Op(Spec::new(OpKind::Dsra, Format::ShiftImm).isa(isa::MIPS3).wide()),
        ),
        (
            DSLL32,
            Node::Op(Spec::new(OpKind::Dsll32, Format::ShiftImm).isa(isa::MIPS3).wide()),
        ),
        (
            DSRL32,
            Node::Op(Spec::new(OpKind::Dsrl32, Format::ShiftImm).isa(isa::MIPS3).wide()),
        ),
        (
            DSRA32,
            Node::Op(Spec::new(OpKind::Dsra32, Format::ShiftImm).isa(isa::MIPS3).wide()),
        ),
    ],
};
