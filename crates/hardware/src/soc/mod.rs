//! System-on-chip devices and the seams to external collaborators.

/// Memory-mapped devices.
pub mod devices;
/// Collaborator traits: mapping control, timer service, backing store.
pub mod traits;
