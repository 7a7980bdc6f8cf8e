//! Fault taxonomy.
//!
//! Three distinct error families cross this crate's boundaries:
//! 1. **Decode faults** — the architecturally correct outcome of decoding an
//!    illegal or unavailable encoding. Guest-visible, never fatal to the host.
//! 2. **Runtime faults** — guest-visible conditions raised during execution
//!    (overflow, trap instructions). Mapped by the external exception-delivery
//!    layer onto guest trap vectors.
//! 3. **Construction errors** — host-visible configuration mistakes caught at
//!    device-attach time (unsupported flash geometry).
//!
//! Flash protocol violations are deliberately absent: real NOR hardware
//! silently ignores malformed command sequences, so the controller resets to
//! idle without surfacing anything.

use thiserror::Error;

/// Faults produced by [`crate::isa::decode::decode`].
///
/// Both variants are expected outcomes, not host errors: a guest executing a
/// bad encoding receives the corresponding reserved-instruction or
/// coprocessor-unusable exception.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeFault {
    /// The bit pattern has no defined meaning under the active capability
    /// set, or was architecturally removed in the active ISA revision.
    #[error("reserved instruction {word:#010x}")]
    Reserved {
        /// The offending instruction word.
        word: u32,
    },

    /// The pattern is architecturally defined but gated by a disabled
    /// capability (coprocessor or ASE not enabled). Kept distinct from
    /// [`DecodeFault::Reserved`] so guest kernels can emulate in software.
    #[error("unavailable instruction {word:#010x} (coprocessor/ASE disabled)")]
    Unavailable {
        /// The offending instruction word.
        word: u32,
    },
}

/// Faults produced by [`crate::core::execute::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RuntimeFault {
    /// Signed add/sub overflowed. The destination register is left
    /// unmodified; no partial write is observable on this path.
    #[error("integer overflow")]
    ArithmeticOverflow,

    /// A trap instruction's condition held. Carries the 10-bit code field
    /// from the encoding (always 0 for the immediate trap forms, which have
    /// no code field).
    #[error("trap (code {0})")]
    Trap(u16),

    /// An operation legal at decode time is not executable in the current
    /// context (e.g. a doubleword op after the context left 64-bit mode).
    #[error("reserved instruction at execute time")]
    ReservedAtExecute,
}

/// Errors from flash device construction.
///
/// Geometry limits mirror the emulated parts: the supported chips exist only
/// in a small set of total sizes, and the sector grid must tile the array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// Total length is not one of the supported power-of-two chip sizes.
    #[error("unsupported flash size {0:#x}")]
    UnsupportedSize(u32),

    /// Device width must be 1, 2, or 4 bytes.
    #[error("unsupported flash width {0}")]
    UnsupportedWidth(u32),

    /// Sector length does not evenly divide the total length.
    #[error("sector length {sector_len:#x} does not tile chip of {total_len:#x}")]
    BadSectorGeometry {
        /// Configured sector length in bytes.
        sector_len: u32,
        /// Configured total chip length in bytes.
        total_len: u32,
    },
}
