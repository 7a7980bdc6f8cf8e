//! Common types shared across the decode, execute, and device layers.

/// Fault taxonomy: decode faults, runtime faults, and construction errors.
pub mod error;
