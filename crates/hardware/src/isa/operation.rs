//! Operation kinds and the decoded-operation descriptor.
//!
//! [`OpKind`] is the closed set of operations the dispatcher understands,
//! one variant per mnemonic family. [`Decoded`] is produced fresh per
//! instruction by the decoder, consumed immediately by the dispatcher, and
//! never retained across instructions.

/// Floating-point operand format, selected by the COP1 fmt field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FpFmt {
    /// Single precision (fmt 0x10).
    Single,
    /// Double precision (fmt 0x11).
    Double,
    /// Paired single (fmt 0x16), MIPS64R2.
    PairedSingle,
}

/// Comparison selector for the trap families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapCond {
    /// Trap if equal.
    Eq,
    /// Trap if greater or equal, signed.
    Ge,
    /// Trap if greater or equal, unsigned.
    Geu,
    /// Trap if less than, signed.
    Lt,
    /// Trap if less than, unsigned.
    Ltu,
    /// Trap if not equal.
    Ne,
}

/// COP1 arithmetic selector, shared across formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FpArith {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Absolute value.
    Abs,
    /// Negation.
    Neg,
    /// Register move.
    Mov,
}

/// The closed set of decoded operation kinds.
///
/// Doubleword (`D`-prefixed) kinds only decode on 64-bit-capable cores in
/// 64-bit mode; the dispatcher re-checks the mode before applying them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)] // Mnemonic variants; the ISA manual names them.
pub enum OpKind {
    // Shifts (SPECIAL).
    Sll,
    Srl,
    Rotr,
    Sra,
    Sllv,
    Srlv,
    Rotrv,
    Srav,
    Dsllv,
    Dsrlv,
    Dsrav,
    Dsll,
    Dsrl,
    Dsra,
    Dsll32,
    Dsrl32,
    Dsra32,

    // Jumps through registers, conditional moves, HI/LO moves (SPECIAL).
    Jr,
    Jalr,
    Movz,
    Movn,
    Mfhi,
    Mthi,
    Mflo,
    Mtlo,

    // Multiply/divide (SPECIAL).
    Mult,
    Multu,
    Div,
    Divu,

    // Three-register arithmetic and logic (SPECIAL).
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,
    Dadd,
    Daddu,
    Dsub,
    Dsubu,

    // Register-form traps (SPECIAL) and immediate-form traps (REGIMM).
    Trap(TrapCond),
    TrapImm(TrapCond),
    /// Trap whose condition folded to true at decode time.
    TrapAlways,
    /// Trap whose condition folded to false at decode time; a no-op.
    TrapNever,

    // REGIMM branches.
    Bltz,
    Bgez,
    Bltzl,
    Bgezl,
    Bltzal,
    Bgezal,
    Bltzall,
    Bgezall,

    // Immediate arithmetic and logic.
    Addi,
    Addiu,
    Slti,
    Sltiu,
    Andi,
    Ori,
    Xori,
    Lui,
    Daddi,
    Daddiu,

    // Jumps and branches.
    J,
    Jal,
    Beq,
    Bne,
    Blez,
    Bgtz,
    Beql,
    Bnel,
    Blezl,
    Bgtzl,

    // Loads and stores.
    Lb,
    Lh,
    Lwl,
    Lw,
    Lbu,
    Lhu,
    Lwr,
    Lwu,
    Sb,
    Sh,
    Swl,
    Sw,
    Swr,
    Ll,
    Sc,
    Ld,
    Sd,
    Ldl,
    Ldr,
    Sdl,
    Sdr,

    // SPECIAL2 (removed in Release 6).
    Madd,
    Maddu,
    Mul,
    Msub,
    Msubu,
    Clz,
    Clo,
    Dclz,
    Dclo,

    // SPECIAL3.
    Ext,
    Ins,
    Seb,
    Seh,
    Wsbh,
    /// DSP-R2 quad-byte halving add (aliases `MultG` at the same encoding).
    AdduhQb,
    /// Loongson-2E multiply-to-GPR (aliases `AdduhQb` at the same encoding).
    MultG,

    /// COP1 arithmetic, format-parameterized.
    Fp(FpArith, FpFmt),
}

/// Operand field layout of a table entry.
///
/// Register fields sit at fixed offsets in every format, so extraction
/// always captures rs/rt/rd/sa; the format selects how the low half of the
/// word is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register operands only; no immediate.
    Reg,
    /// Shift-by-immediate; the sa field is the shift amount.
    ShiftImm,
    /// 16-bit immediate, sign-extended.
    ImmSigned,
    /// 16-bit immediate, zero-extended (logical ops, LUI).
    ImmUnsigned,
    /// PC-relative branch; 16-bit signed displacement, scaled by 4 at
    /// execute time.
    Branch,
    /// Absolute-within-segment jump; 26-bit index.
    Jump,
    /// Base+displacement memory access; 16-bit signed displacement.
    Mem,
    /// Register-form trap; 10-bit code field at bits 15:6.
    TrapReg,
    /// Immediate-form trap; 16-bit signed comparand.
    TrapImm,
    /// COP1 register operands (ft=rt, fs=rd, fd=sa field positions).
    Fpu,
}

/// A decoded operation descriptor.
///
/// Field meanings follow the encoding: for COP1 arithmetic `rt`/`rd`/`sa`
/// hold ft/fs/fd; for EXT/INS `rd` holds the msb/size operand and `sa` the
/// lsb position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Raw instruction word, kept for diagnostics.
    pub raw: u32,
    /// Operation kind.
    pub kind: OpKind,
    /// rs field (bits 25:21).
    pub rs: usize,
    /// rt field (bits 20:16).
    pub rt: usize,
    /// rd field (bits 15:11).
    pub rd: usize,
    /// sa field (bits 10:6).
    pub sa: u32,
    /// Immediate operand, sign- or zero-extended per the entry's format.
    pub imm: i64,
    /// Trap code field (register-form traps only, else 0).
    pub code: u16,
}
