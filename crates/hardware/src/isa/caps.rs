//! Capability set.
//!
//! Legality of an encoding depends on which ISA revisions and application-
//! specific extensions (ASEs) the emulated core implements. Revisions are
//! cumulative bit sets: a MIPS64R2 core carries every bit from MIPS I up
//! through MIPS64R2, so a table entry requiring "any of MIPS32" matches on
//! every core from MIPS32 onward. Release 6 removals are expressed on the
//! table side (an entry can be *removed* when an R6 bit is present).

use serde::Deserialize;

/// ISA revision level bits. Cumulative: later profiles include earlier bits.
pub mod isa {
    /// MIPS I.
    pub const MIPS1: u32 = 1 << 0;
    /// MIPS II (LL/SC, branch-likely).
    pub const MIPS2: u32 = 1 << 1;
    /// MIPS III (first 64-bit revision).
    pub const MIPS3: u32 = 1 << 2;
    /// MIPS IV.
    pub const MIPS4: u32 = 1 << 3;
    /// MIPS V (paired-single floating point).
    pub const MIPS5: u32 = 1 << 4;
    /// MIPS32 Release 1 (CLZ/CLO, MADD family, MOVZ/MOVN).
    pub const MIPS32: u32 = 1 << 5;
    /// MIPS32 Release 2 (ROTR, EXT/INS, SEB/SEH/WSBH).
    pub const MIPS32R2: u32 = 1 << 6;
    /// MIPS32 Release 6 (removes SPECIAL2 and branch-likely encodings).
    pub const MIPS32R6: u32 = 1 << 7;
    /// MIPS64 Release 1.
    pub const MIPS64: u32 = 1 << 8;
    /// MIPS64 Release 2.
    pub const MIPS64R2: u32 = 1 << 9;
    /// MIPS64 Release 6.
    pub const MIPS64R6: u32 = 1 << 10;

    /// Any Release 6 revision; used for removed-in-R6 table entries.
    pub const ANY_R6: u32 = MIPS32R6 | MIPS64R6;
}

/// Application-specific extension and coprocessor bits.
pub mod ase {
    /// Coprocessor 1 (floating-point unit) present and enabled.
    pub const CP1: u32 = 1 << 0;
    /// DSP ASE revision 1.
    pub const DSP: u32 = 1 << 1;
    /// DSP ASE revision 2 (ADDUH.QB family).
    pub const DSP_R2: u32 = 1 << 2;
    /// Loongson-2E multimedia/integer extensions (MULT.G family).
    pub const LOONGSON_2E: u32 = 1 << 3;
}

/// The queryable feature-flag bag consulted during decode.
///
/// Read-only from the decoder's perspective; owned by the execution driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CapabilitySet {
    /// Cumulative ISA revision bits (see [`isa`]).
    pub isa: u32,
    /// Extension/coprocessor bits (see [`ase`]).
    pub ase: u32,
    /// Whether 64-bit operations are executable in the current mode.
    pub mode64: bool,
}

impl CapabilitySet {
    /// A MIPS32 Release 1 core.
    pub const fn mips32() -> Self {
        Self {
            isa: isa::MIPS1 | isa::MIPS2 | isa::MIPS32,
            ase: 0,
            mode64: false,
        }
    }

    /// A MIPS32 Release 2 core.
    pub const fn mips32r2() -> Self {
        let base = Self::mips32();
        Self {
            isa: base.isa | isa::MIPS32R2,
            ..base
        }
    }

    /// A MIPS32 Release 6 core.
    pub const fn mips32r6() -> Self {
        let base = Self::mips32r2();
        Self {
            isa: base.isa | isa::MIPS32R6,
            ..base
        }
    }

    /// A MIPS64 Release 1 core running in 64-bit mode.
    pub const fn mips64() -> Self {
        let base = Self::mips32();
        Self {
            isa: base.isa | isa::MIPS3 | isa::MIPS4 | isa::MIPS5 | isa::MIPS64,
            ase: 0,
            mode64: true,
        }
    }

    /// A MIPS64 Release 2 core running in 64-bit mode.
    pub const fn mips64r2() -> Self {
        let base = Self::mips64();
        Self {
            isa: base.isa | isa::MIPS32R2 | isa::MIPS64R2,
            ..base
        }
    }

    /// Adds extension/coprocessor bits.
    pub const fn with_ase(self, bits: u32) -> Self {
        Self {
            ase: self.ase | bits,
            ..self
        }
    }

    /// Returns to 32-bit mode (e.g. a 64-bit core with user-mode 64-bit
    /// addressing disabled).
    pub const fn in_32bit_mode(self) -> Self {
        Self {
            mode64: false,
            ..self
        }
    }

    /// True when any of the given ISA revision bits is active.
    #[inline]
    pub const fn has_isa(&self, any_of: u32) -> bool {
        self.isa & any_of != 0
    }

    /// True when any of the given extension bits is active.
    #[inline]
    pub const fn has_ase(&self, any_of: u32) -> bool {
        self.ase & any_of != 0
    }
}
