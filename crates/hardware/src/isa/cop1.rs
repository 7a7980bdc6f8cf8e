//! Coprocessor 1 (FPU) encoding group (major opcode 0x11).
//!
//! The fmt field (bits 25:21) selects the operand format, then the function
//! field selects the arithmetic operation. One data table per format drives
//! a single format-parameterized operation kind instead of hand-duplicated
//! per-format code. Paired-single needs MIPS V, has no divide, and was
//! removed by Release 6. The whole group sits behind an alias arm gated on
//! the CP1 capability, so a core without an enabled FPU reports every COP1
//! pattern as Unavailable (coprocessor unusable), not Reserved.

use crate::isa::caps::isa;
use crate::isa::operation::{Format, FpArith, FpFmt, OpKind};
use crate::isa::table::{Node, OpcodeTable, Spec};

/// fmt value for single precision.
pub const FMT_S: u32 = 0x10;
/// fmt value for double precision.
pub const FMT_D: u32 = 0x11;
/// fmt value for paired single.
pub const FMT_PS: u32 = 0x16;

/// Function code for ADD.fmt.
pub const ADD: u32 = 0x00;
/// Function code for SUB.fmt.
pub const SUB: u32 = 0x01;
/// Function code for MUL.fmt.
pub const MUL: u32 = 0x02;
/// Function code for DIV.fmt.
pub const DIV: u32 = 0x03;
/// Function code for ABS.fmt.
pub const ABS: u32 = 0x05;
/// Function code for MOV.fmt.
pub const MOV: u32 = 0x06;
/// Function code for NEG.fmt.
pub const NEG: u32 = 0x07;

/// A single/double arithmetic entry.
const fn fp(op: FpArith, fmt: FpFmt) -> (u32, Node) {
    let funct = match op {
        FpArith::Add => ADD,
        FpArith::Sub => SUB,
        FpArith::Mul => MUL,
        FpArith::Div => DIV,
        FpArith::Abs => ABS,
        FpArith::Mov => MOV,
        FpArith::Neg => NEG,
    };
    (funct, Node::Op(Spec::new(OpKind::Fp(op, fmt), Format::Fpu)))
}

/// A paired-single arithmetic entry (MIPS V, gone in Release 6).
const fn ps(op: FpArith) -> (u32, Node) {
    let (funct, _) = fp(op, FpFmt::PairedSingle);
    (
        funct,
        Node::Op(
            Spec::new(OpKind::Fp(op, FpFmt::PairedSingle), Format::Fpu)
                .isa(isa::MIPS5)
                .removed(isa::ANY_R6),
        ),
    )
}

/// Single-precision function table.
static FMT_S_TABLE: OpcodeTable = OpcodeTable {
    mask: 0x3F,
    entries: &[
        fp(FpArith::Add, FpFmt::Single),
        fp(FpArith::Sub, FpFmt::Single),
        fp(FpArith::Mul, FpFmt::Single),
        fp(FpArith::Div, FpFmt::Single),
        fp(FpArith::Abs, FpFmt::Single),
        fp(FpArith::Mov, FpFmt::Single),
        fp(FpArith::Neg, FpFmt::Single),
    ],
};

/// Double-precision function table.
static FMT_D_TABLE: OpcodeTable = OpcodeTable {
    mask: 0x3F,
    entries: &[
        fp(FpArith::Add, FpFmt::Double),
        fp(FpArith::Sub, FpFmt::Double),
        fp(FpArith::Mul, FpFmt::Double),
        fp(FpArith::Div, FpFmt::Double),
        fp(FpArith::Abs, FpFmt::Double),
        fp(FpArith::Mov, FpFmt::Double),
        fp(FpArith::Neg, FpFmt::Double),
    ],
};

/// Paired-single function table (no divide in this format).
static FMT_PS_TABLE: OpcodeTable = OpcodeTable {
    mask: 0x3F,
    entries: &[
        ps(FpArith::Add),
        ps(FpArith::Sub),
        ps(FpArith::Mul),
        ps(FpArith::Abs),
        ps(FpArith::Mov),
        ps(FpArith::Neg),
    ],
};

/// The COP1 dispatch table, keyed on the fmt field.
pub static TABLE: OpcodeTable = OpcodeTable {
    mask: 0x1F << 21,
    entries: &[
        (FMT_S << 21, Node::Table(&FMT_S_TABLE)),
        (FMT_D << 21, Node::Table(&FMT_D_TABLE)),
        (FMT_PS << 21, Node::Table(&FMT_PS_TABLE)),
    ],
};
