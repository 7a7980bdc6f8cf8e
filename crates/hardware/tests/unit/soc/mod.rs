//! # SoC Unit Tests
//!
//! Unit tests for the flash device.
