//! Collaborator traits for bus-attached devices.
//!
//! The flash controller never touches the memory router, the event loop, or
//! the disk directly; it reaches each through one of the narrow traits here.
//! Implementations live in the embedding system (bus, scheduler, block
//! layer) and are handed in at device construction as boxed objects.

use std::time::Duration;

/// How a flash chip's address range should be routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingMode {
    /// Direct-mapped read path: the router may serve reads straight from
    /// the array without trapping into the device.
    Rom,
    /// Fully-trapped path: every access must reach the device's read/write
    /// entry points so the command state machine sees it.
    Io,
}

/// Receiver for mapping-mode changes.
///
/// Invoked by the flash controller whenever its command state requires the
/// router to reinstall a different access handler for its range.
pub trait MappingListener: Send {
    /// Switches the device's address range to the given routing mode.
    fn on_mode_change(&mut self, mode: MappingMode);
}

/// External one-shot timer service.
///
/// The controller arms at most one completion timer at a time; the service
/// calls back into the device (through whatever handle the embedding system
/// keeps) after the duration elapses. Exclusive access during the callback
/// is the service's responsibility, matching the `&mut self` entry points on
/// the device.
pub trait TimerService: Send {
    /// Arms the completion timer. A second call before expiry re-arms it.
    fn schedule(&mut self, after: Duration);
}

/// Best-effort persistent mirror of the flash array.
///
/// Mutations are pushed here fire-and-forget; the in-memory array stays the
/// source of truth and mirror failures never affect chip state, so the
/// method has no error path.
pub trait BackingStore: Send {
    /// Writes `bytes` at the given byte offset within the array image.
    fn block_write(&mut self, offset: u64, bytes: &[u8]);
}
