//! Device implementations.

/// AMD/Fujitsu command-set NOR flash.
pub mod flash;

pub use flash::FlashChip;
