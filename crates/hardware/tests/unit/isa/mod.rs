//! # ISA Unit Tests
//!
//! Unit tests for the opcode tables and the decoder.

/// Capability, revision, and mode gating.
///
/// Verifies Release 6 removals, 64-bit mode gating, the coprocessor gate
/// on the COP1 group, and resolution order of the DSP/Loongson encoding
/// collision.
pub mod capability_gating;
