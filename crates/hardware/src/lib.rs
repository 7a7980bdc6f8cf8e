//! MIPS32/64 emulation front end.
//!
//! This crate implements the instruction-side core of a MIPS system emulator:
//! 1. **ISA:** Masked opcode tables, capability gating, and decoding of 32-bit
//!    instruction words into structured operation descriptors.
//! 2. **Core:** The semantics dispatcher that applies a decoded operation to an
//!    execution context (registers, PC, HI/LO) and reports branches, memory
//!    accesses, and guest-visible faults to the surrounding driver.
//! 3. **SoC:** A CFI/JEDEC NOR-flash controller modeling the AMD/Fujitsu
//!    command set (unlock sequences, program, erase, autoselect, query).
//!
//! Instruction fetch, memory routing, exception delivery, and timers are
//! external collaborators reached through the narrow traits in [`soc::traits`]
//! and the types in [`core::context`].

/// Common types: the fault taxonomy shared by decode and execute.
pub mod common;
/// Emulator configuration (endianness, flash geometry and layout).
pub mod config;
/// CPU core (execution context and semantics dispatch).
pub mod core;
/// Instruction set (bit extraction, capability set, opcode tables, decode).
pub mod isa;
/// System-on-chip devices and collaborator seams.
pub mod soc;

pub use crate::common::error::{ConstructError, DecodeFault, RuntimeFault};
pub use crate::core::context::ExecutionContext;
pub use crate::core::execute::{execute, Outcome};
pub use crate::isa::caps::CapabilitySet;
pub use crate::isa::decode::decode;
pub use crate::soc::devices::FlashChip;
