//! CPU core: the execution context and the semantics dispatcher.

/// Execution context: register file, PC, HI/LO, and mode bits.
pub mod context;
/// Semantics dispatch for decoded operations.
pub mod execute;
