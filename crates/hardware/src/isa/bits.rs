//! Instruction word field extraction.
//!
//! All MIPS instruction formats share fixed field positions: rs/rt/rd are
//! 5-bit register indices, sa is the 5-bit shift amount, the function code
//! occupies the low 6 bits, and immediate forms carry a 16-bit field in the
//! low half of the word. The trait below extracts each field from a raw
//! `u32`; interpretation (sign extension, scaling) is the decoder's job.

/// Bit mask for 5-bit register index fields.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the 6-bit function field (bits 5:0).
pub const FUNCT_MASK: u32 = 0x3F;
/// Bit mask for the 16-bit immediate field.
pub const IMM16_MASK: u32 = 0xFFFF;
/// Bit mask for the 26-bit jump index field.
pub const INDEX26_MASK: u32 = 0x03FF_FFFF;
/// Bit mask for the 10-bit trap code field (bits 15:6).
pub const TRAP_CODE_MASK: u32 = 0x3FF;

/// Trait for extracting instruction fields from a 32-bit encoding.
pub trait InstructionBits {
    /// Extracts the rs field (bits 25:21), the first source register.
    fn rs(&self) -> usize;
    /// Extracts the rt field (bits 20:16), the second source or the target
    /// register for immediate forms.
    fn rt(&self) -> usize;
    /// Extracts the rd field (bits 15:11), the destination register.
    ///
    /// For EXT/INS this field is a bit-position operand, not a register.
    fn rd(&self) -> usize;
    /// Extracts the sa field (bits 10:6), the shift amount.
    ///
    /// For COP1 arithmetic this field is the fd register index; for BSHFL
    /// it is a sub-opcode.
    fn sa(&self) -> u32;
    /// Extracts the function field (bits 5:0).
    fn funct(&self) -> u32;
    /// Extracts the 16-bit immediate field (bits 15:0), unextended.
    fn imm16(&self) -> u32;
    /// Extracts the 16-bit immediate field, sign-extended to 64 bits.
    fn simm16(&self) -> i64;
    /// Extracts the 26-bit jump index field (bits 25:0).
    fn index26(&self) -> u32;
    /// Extracts the 10-bit trap code field (bits 15:6) of register-form
    /// trap instructions.
    fn trap_code(&self) -> u16;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> 21) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> 16) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 11) & REG_MASK) as usize
    }

    #[inline(always)]
    fn sa(&self) -> u32 {
        (self >> 6) & REG_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        self & IMM16_MASK
    }

    #[inline(always)]
    fn simm16(&self) -> i64 {
        i64::from(*self as u16 as i16)
    }

    #[inline(always)]
    fn index26(&self) -> u32 {
        self & INDEX26_MASK
    }

    #[inline(always)]
    fn trap_code(&self) -> u16 {
        ((self >> 6) & TRAP_CODE_MASK) as u16
    }
}
