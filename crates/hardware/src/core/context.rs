//! Execution context.
//!
//! Owned register state threaded explicitly through every dispatch call —
//! no process-wide register arrays. The dispatcher borrows the context
//! mutably for the duration of one `execute` call and never retains it,
//! so multiple independent cores are just multiple contexts.

/// Number of general-purpose registers.
pub const GPR_COUNT: usize = 32;

/// Register index of the return-address register written by link
/// operations.
pub const RA: usize = 31;

/// One core's architectural state, as seen by the dispatcher.
///
/// Register 0 is hardwired: reads return zero and writes are discarded.
/// That discipline lives here, not in the dispatcher, so no semantic
/// routine can get it wrong.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    gpr: [u64; GPR_COUNT],
    /// Program counter of the instruction currently executing.
    pub pc: u64,
    /// Multiply/divide HI result register.
    pub hi: u64,
    /// Multiply/divide LO result register.
    pub lo: u64,
    /// Whether 64-bit operations are currently executable. Can be cleared
    /// between decode and execute (e.g. by a mode switch), which is why
    /// the dispatcher re-checks it for doubleword operations.
    pub mode64: bool,
}

impl ExecutionContext {
    /// Creates a context with all registers zeroed.
    pub const fn new(mode64: bool) -> Self {
        Self {
            gpr: [0; GPR_COUNT],
            pc: 0,
            hi: 0,
            lo: 0,
            mode64,
        }
    }

    /// Reads a general-purpose register; index 0 reads as constant zero.
    #[inline]
    pub const fn read_gpr(&self, index: usize) -> u64 {
        self.gpr[index]
    }

    /// Writes a general-purpose register; writes to index 0 are discarded.
    #[inline]
    pub const fn write_gpr(&mut self, index: usize, value: u64) {
        if index != 0 {
            self.gpr[index] = value;
        }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(false)
    }
}
