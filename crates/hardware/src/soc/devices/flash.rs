//! AMD/Fujitsu command-set NOR flash.
//!
//! Models one memory-mapped chip: the write-cycle command state machine
//! (unlock preamble, program, chip/sector erase with timed completion,
//! unlock bypass, autoselect, CFI query), the status register with its
//! data-toggle busy indication, and the array storage itself.
//!
//! # Protocol
//!
//! Commands are latched through a fixed preamble: `0xAA` at device address
//! `0x555`, then `0x55` at `0x2AA`, then the command byte at `0x555`. Erase
//! needs the full preamble twice. A malformed step at any point is not an
//! error — real hardware silently ignores it — so the machine just resets
//! to idle and the chip drops back to its direct-mapped ROM read path.
//!
//! Programming can only clear bits (the new byte is AND-ed into storage);
//! only erase sets bits back to one. Guest flash drivers rely on both.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::common::error::ConstructError;
use crate::config::{Endianness, FlashConfig, SectorLayout};
use crate::soc::traits::{BackingStore, MappingListener, MappingMode, TimerService};

/// First unlock write: `0xAA` at device address `0x555`.
const UNLOCK0_ADDR: u64 = 0x555;
/// First unlock byte.
const UNLOCK0_BYTE: u8 = 0xAA;
/// Second unlock write: `0x55` at device address `0x2AA`.
const UNLOCK1_ADDR: u64 = 0x2AA;
/// Second unlock byte.
const UNLOCK1_BYTE: u8 = 0x55;
/// CFI query entry, accepted at device address `0x55` directly from idle.
const CFI_ENTRY_ADDR: u64 = 0x55;

/// Chip erase, second-level command.
const CMD_CHIP_ERASE: u8 = 0x10;
/// Unlock bypass entry.
const CMD_BYPASS: u8 = 0x20;
/// Sector erase, second-level command (any address within the sector).
const CMD_SECTOR_ERASE: u8 = 0x30;
/// Erase setup (first-level; arms the double-unlock confirmation).
const CMD_ERASE_SETUP: u8 = 0x80;
/// Autoselect (identity read) mode.
const CMD_AUTOSELECT: u8 = 0x90;
/// CFI query mode.
const CMD_CFI_QUERY: u8 = 0x98;
/// Single-word program.
const CMD_PROGRAM: u8 = 0xA0;
/// Reset to read mode.
const CMD_RESET: u8 = 0xF0;

/// Erased byte value; NOR erase sets all bits.
const ERASED: u8 = 0xFF;
/// Status data-toggle bit, flipped by every busy status read.
const STATUS_TOGGLE: u8 = 0x40;
/// Status ready bit, set when a timed operation completes.
const STATUS_READY: u8 = 0x80;

/// Chip-erase completion time.
const CHIP_ERASE_TIME: Duration = Duration::from_secs(5);
/// Sector-erase completion time.
const SECTOR_ERASE_TIME: Duration = Duration::from_millis(500);

/// Device id value that escapes to the extended id bytes in autoselect.
const EXTENDED_ID_ESCAPE: u8 = 0x7E;

/// Position in the command protocol.
///
/// Every transition arm that observes a malformed write lands back on
/// [`WriteCycle::Idle`]; there is no dead state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteCycle {
    /// Read mode; no command in flight.
    Idle,
    /// First unlock byte accepted.
    Unlock0Seen,
    /// Full unlock preamble accepted; next write is a command byte.
    Unlock1Seen,
    /// A first-level command is latched (`pending` holds it).
    CommandLatched,
    /// Erase setup latched; first byte of the confirming unlock seen.
    AwaitingSecondUnlock,
    /// Erase fully confirmed; next write selects chip or sector erase.
    EraseCommandLatched,
    /// A timed erase is running; writes are ignored until the timer fires.
    EraseInProgress,
    /// CFI query mode; reads index the query table, any write resets.
    CfiQuery,
}

/// One memory-mapped AMD/Fujitsu NOR flash chip.
///
/// All entry points take `&mut self`; the timer callback re-enters through
/// [`FlashChip::on_timer`], so whoever drives the timer must hold the same
/// exclusive access as the memory router does for reads and writes.
pub struct FlashChip {
    base_address: u64,
    sector_bounds: Vec<(u64, u64)>,
    width: u32,
    endianness: Endianness,
    manufacturer_id: u8,
    device_id: u8,
    extended_ids: [u8; 2],
    cfi_table: [u8; 0x52],

    storage: Vec<u8>,
    cycle: WriteCycle,
    pending: u8,
    status: u8,
    bypass: bool,
    mode: MappingMode,

    listener: Box<dyn MappingListener>,
    timer: Box<dyn TimerService>,
    backing: Option<Box<dyn BackingStore>>,
}

impl FlashChip {
    /// Builds a chip from its fixed geometry and identity.
    ///
    /// # Errors
    ///
    /// - [`ConstructError::UnsupportedWidth`] unless the width is 1, 2, or
    ///   4 bytes.
    /// - [`ConstructError::UnsupportedSize`] unless the total length is a
    ///   power of two between 512 KiB and 8 MiB, the sizes the emulated
    ///   parts ship in.
    /// - [`ConstructError::BadSectorGeometry`] when the sector grid cannot
    ///   tile the array (zero counts, or a boot-block layout whose sector
    ///   length does not split into quarters).
    pub fn new(
        config: &FlashConfig,
        listener: Box<dyn MappingListener>,
        timer: Box<dyn TimerService>,
        backing: Option<Box<dyn BackingStore>>,
    ) -> Result<Self, ConstructError> {
        if !matches!(config.width, 1 | 2 | 4) {
            return Err(ConstructError::UnsupportedWidth(config.width));
        }
        let total = config.total_length();
        if !total.is_power_of_two() || !(0x8_0000..=0x80_0000).contains(&total) {
            return Err(ConstructError::UnsupportedSize(total));
        }
        let sector_bounds = sector_bounds(config)?;

        debug!(
            base = format_args!("{:#x}", config.base_address),
            total = format_args!("{total:#x}"),
            sectors = sector_bounds.len(),
            width = config.width,
            "attached flash chip"
        );

        Ok(Self {
            base_address: config.base_address,
            sector_bounds,
            width: config.width,
            endianness: config.endianness,
            manufacturer_id: config.manufacturer_id,
            device_id: config.device_id,
            extended_ids: config.extended_ids,
            cfi_table: build_cfi_table(config),
            storage: vec![ERASED; total as usize],
            cycle: WriteCycle::Idle,
            pending: 0,
            status: 0,
            bypass: false,
            mode: MappingMode::Rom,
            listener,
            timer,
            backing,
        })
    }

    /// Guest-physical base address of the mapped array.
    #[inline]
    pub const fn base_address(&self) -> u64 {
        self.base_address
    }

    /// Array length in bytes.
    #[inline]
    pub fn total_length(&self) -> u64 {
        self.storage.len() as u64
    }

    /// Reads `width` bytes at the chip-relative byte offset.
    ///
    /// In read mode this is the array contents; in autoselect mode the
    /// identity bytes; during a timed erase the status register, whose
    /// toggle bit flips as a side effect of the read itself (the data
    /// toggle is how guests poll for completion, so status reads are not
    /// idempotent); in query mode the CFI table.
    pub fn read(&mut self, offset: u64, width: u32) -> u64 {
        let boffset = self.device_addr(offset);
        match self.cycle {
            WriteCycle::EraseInProgress => {
                let value = self.status;
                self.status ^= STATUS_TOGGLE;
                u64::from(value)
            }
            WriteCycle::CfiQuery => u64::from(
                self.cfi_table
                    .get(boffset as usize)
                    .copied()
                    .unwrap_or(0),
            ),
            WriteCycle::CommandLatched if self.pending == CMD_AUTOSELECT => {
                u64::from(self.identity_byte(boffset))
            }
            _ => self.read_array(offset, width),
        }
    }

    /// Feeds one write into the command state machine.
    ///
    /// A malformed sequence step silently resets the machine; nothing is
    /// surfaced to the caller.
    pub fn write(&mut self, offset: u64, value: u64, width: u32) {
        let boffset = self.device_addr(offset);
        let cmd = (value & 0xFF) as u8;
        trace!(
            offset = format_args!("{offset:#x}"),
            value = format_args!("{value:#x}"),
            cycle = ?self.cycle,
            "flash write"
        );

        match self.cycle {
            WriteCycle::Idle => {
                if boffset == CFI_ENTRY_ADDR && cmd == CMD_CFI_QUERY {
                    self.enter(WriteCycle::CfiQuery);
                } else if boffset == UNLOCK0_ADDR && cmd == UNLOCK0_BYTE {
                    self.enter(WriteCycle::Unlock0Seen);
                } else {
                    self.reset();
                }
            }
            WriteCycle::Unlock0Seen => {
                if boffset == UNLOCK1_ADDR && cmd == UNLOCK1_BYTE {
                    self.cycle = WriteCycle::Unlock1Seen;
                } else {
                    self.reset();
                }
            }
            WriteCycle::Unlock1Seen => self.latch_command(boffset, cmd),
            WriteCycle::CommandLatched => match self.pending {
                CMD_PROGRAM => self.program(offset, value, width),
                CMD_AUTOSELECT => {
                    // Query mode stays reachable from autoselect.
                    if boffset == CFI_ENTRY_ADDR && cmd == CMD_CFI_QUERY {
                        self.enter(WriteCycle::CfiQuery);
                    } else {
                        self.reset();
                    }
                }
                CMD_ERASE_SETUP => {
                    // Erase wants the whole preamble a second time.
                    if boffset == UNLOCK0_ADDR && cmd == UNLOCK0_BYTE {
                        self.cycle = WriteCycle::AwaitingSecondUnlock;
                    } else {
                        self.reset();
                    }
                }
                other => {
                    warn!(command = format_args!("{other:#04x}"), "unknown flash command");
                    self.reset();
                }
            },
            WriteCycle::AwaitingSecondUnlock => {
                if boffset == UNLOCK1_ADDR && cmd == UNLOCK1_BYTE {
                    self.cycle = WriteCycle::EraseCommandLatched;
                } else {
                    self.reset();
                }
            }
            WriteCycle::EraseCommandLatched => match cmd {
                CMD_CHIP_ERASE if boffset == UNLOCK0_ADDR => self.chip_erase(),
                CMD_SECTOR_ERASE => self.sector_erase(offset),
                _ => self.reset(),
            },
            // Erase cannot be interrupted; the protocol has no suspend.
            WriteCycle::EraseInProgress => {}
            WriteCycle::CfiQuery => self.reset(),
        }
    }

    /// Timer-service completion callback for a pending erase.
    ///
    /// This is the one entry point outside the read/write path that mutates
    /// chip state; the `&mut self` receiver makes the required exclusion
    /// explicit.
    pub fn on_timer(&mut self) {
        debug!(bypass = self.bypass, "flash operation complete");
        self.status ^= STATUS_READY;
        self.pending = 0;
        if self.bypass {
            // Bypass shortcuts the next preamble: re-enter at the point
            // where a command byte is accepted anywhere.
            self.cycle = WriteCycle::Unlock1Seen;
        } else {
            self.cycle = WriteCycle::Idle;
            self.set_mapping(MappingMode::Rom);
        }
    }

    /// Accepts a first-level command byte after the unlock preamble.
    ///
    /// Bypass mode lifts the address check, matching parts that accept
    /// bypassed commands anywhere in the array.
    fn latch_command(&mut self, boffset: u64, cmd: u8) {
        if boffset != UNLOCK0_ADDR && !self.bypass {
            self.reset();
            return;
        }
        match cmd {
            CMD_AUTOSELECT | CMD_PROGRAM | CMD_ERASE_SETUP => {
                self.pending = cmd;
                self.cycle = WriteCycle::CommandLatched;
            }
            CMD_BYPASS => {
                debug!("flash unlock bypass enabled");
                self.bypass = true;
                self.pending = 0;
                self.cycle = WriteCycle::Unlock1Seen;
            }
            CMD_RESET => self.reset(),
            other => {
                warn!(command = format_args!("{other:#04x}"), "unknown flash command");
                self.reset();
            }
        }
    }

    /// Programs one device word: AND into storage, mirror, done.
    ///
    /// Programming completes synchronously; only the data-polling bit in
    /// the status register records it (DQ7 reads as the complement of the
    /// programmed bit 7 on real parts).
    fn program(&mut self, offset: u64, value: u64, width: u32) {
        let start = offset as usize;
        let bytes = value_bytes(value, width, self.endianness);
        for (i, byte) in bytes.iter().take(width as usize).enumerate() {
            if let Some(cell) = self.storage.get_mut(start + i) {
                *cell &= byte;
            }
        }
        self.status = !(value as u8) & STATUS_READY;
        self.mirror(offset, width as u64);

        self.pending = 0;
        if self.bypass {
            self.cycle = WriteCycle::Unlock1Seen;
        } else {
            self.reset();
        }
    }

    /// Fills the whole array with the erased value and arms the long timer.
    fn chip_erase(&mut self) {
        debug!("flash chip erase");
        self.storage.fill(ERASED);
        self.mirror(0, self.storage.len() as u64);
        self.start_erase(CMD_CHIP_ERASE, CHIP_ERASE_TIME);
    }

    /// Fills the addressed sector and arms the short timer.
    fn sector_erase(&mut self, offset: u64) {
        let (start, len) = self.find_sector(offset);
        debug!(
            sector = format_args!("{start:#x}"),
            len = format_args!("{len:#x}"),
            "flash sector erase"
        );
        let range = start as usize..(start + len) as usize;
        self.storage[range].fill(ERASED);
        self.mirror(start, len);
        self.start_erase(CMD_SECTOR_ERASE, SECTOR_ERASE_TIME);
    }

    fn start_erase(&mut self, cmd: u8, after: Duration) {
        self.pending = cmd;
        self.status = 0;
        self.cycle = WriteCycle::EraseInProgress;
        self.timer.schedule(after);
    }

    /// Resets the state machine to idle read mode, dropping bypass.
    fn reset(&mut self) {
        self.cycle = WriteCycle::Idle;
        self.pending = 0;
        self.bypass = false;
        self.set_mapping(MappingMode::Rom);
    }

    /// Leaves idle: from here every access must trap into the device.
    fn enter(&mut self, cycle: WriteCycle) {
        self.cycle = cycle;
        self.set_mapping(MappingMode::Io);
    }

    fn set_mapping(&mut self, mode: MappingMode) {
        if self.mode != mode {
            self.mode = mode;
            self.listener.on_mode_change(mode);
        }
    }

    /// Byte offset scaled to a device-word address for command matching.
    fn device_addr(&self, offset: u64) -> u64 {
        (offset / u64::from(self.width)) & 0x7FF
    }

    /// Autoselect identity byte for a device-word address.
    ///
    /// Offset 2 is the block-lock status; locking is not modeled, so every
    /// block reads back unlocked.
    fn identity_byte(&self, boffset: u64) -> u8 {
        match boffset & 0xFF {
            0x00 => self.manufacturer_id,
            0x01 => self.device_id,
            0x02 => 0,
            0x0E if self.device_id == EXTENDED_ID_ESCAPE => self.extended_ids[0],
            0x0F if self.device_id == EXTENDED_ID_ESCAPE => self.extended_ids[1],
            _ => 0,
        }
    }

    /// Assembles `width` array bytes at `offset` per the configured order.
    fn read_array(&self, offset: u64, width: u32) -> u64 {
        let start = offset as usize;
        let mut value = 0u64;
        for i in 0..width as usize {
            let byte = self.storage.get(start + i).copied().unwrap_or(0);
            let shift = match self.endianness {
                Endianness::Little => 8 * i,
                Endianness::Big => 8 * (width as usize - 1 - i),
            };
            value |= u64::from(byte) << shift;
        }
        value
    }

    /// Sector (start, length) containing the byte offset.
    ///
    /// Offsets past the end clamp to the last sector; the bounds vector is
    /// never empty after construction.
    fn find_sector(&self, offset: u64) -> (u64, u64) {
        self.sector_bounds
            .iter()
            .copied()
            .find(|&(start, len)| offset >= start && offset < start + len)
            .unwrap_or_else(|| self.sector_bounds[self.sector_bounds.len() - 1])
    }

    /// Best-effort mirror of a mutated range to the backing store.
    fn mirror(&mut self, offset: u64, len: u64) {
        if let Some(backing) = self.backing.as_mut() {
            let range = offset as usize..(offset + len).min(self.storage.len() as u64) as usize;
            backing.block_write(offset, &self.storage[range]);
        }
    }
}

/// Splits a program value into bytes in the order they land in storage.
fn value_bytes(value: u64, width: u32, endianness: Endianness) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    for (i, byte) in bytes.iter_mut().take(width as usize).enumerate() {
        let shift = match endianness {
            Endianness::Little => 8 * i,
            Endianness::Big => 8 * (width as usize - 1 - i),
        };
        *byte = (value >> shift) as u8;
    }
    bytes
}

/// Builds the per-sector (start, length) table for the configured layout.
fn sector_bounds(config: &FlashConfig) -> Result<Vec<(u64, u64)>, ConstructError> {
    let (sector_len, count) = (u64::from(config.sector_length), config.sector_count);
    let bad = ConstructError::BadSectorGeometry {
        sector_len: config.sector_length,
        total_len: config.total_length(),
    };
    if sector_len == 0 || count == 0 {
        return Err(bad);
    }

    let uniform = |range: std::ops::Range<u32>| {
        range.map(move |i| (u64::from(i) * sector_len, sector_len))
    };
    // Boot-block parts replace one end sector with reduced-size blocks.
    let boot = |base: u64, fractions: [u64; 3]| {
        let mut start = base;
        fractions.map(|frac| {
            let len = sector_len / frac;
            let block = (start, len);
            start += len;
            block
        })
    };

    let bounds: Vec<(u64, u64)> = match config.layout {
        SectorLayout::Uniform => uniform(0..count).collect(),
        SectorLayout::BootBlockBottom => {
            if sector_len % 4 != 0 {
                return Err(bad);
            }
            boot(0, [2, 4, 4]).into_iter().chain(uniform(1..count)).collect()
        }
        SectorLayout::BootBlockTop => {
            if sector_len % 4 != 0 {
                return Err(bad);
            }
            let last = u64::from(count - 1) * sector_len;
            uniform(0..count - 1).chain(boot(last, [4, 4, 2])).collect()
        }
    };
    Ok(bounds)
}

/// Builds the CFI query table for the configured geometry.
///
/// Guest firmware parses this table by fixed offset, so the byte layout is
/// load-bearing down to individual values.
fn build_cfi_table(config: &FlashConfig) -> [u8; 0x52] {
    let mut t = [0u8; 0x52];
    let total = config.total_length();
    let nb_sect = config.sector_count - 1;
    // Sector size is reported in units of 256 bytes.
    let sect_256 = config.sector_length >> 8;

    // "QRY" signature and the AMD/Fujitsu primary command set.
    t[0x10] = b'Q';
    t[0x11] = b'R';
    t[0x12] = b'Y';
    t[0x13] = 0x02;
    t[0x14] = 0x00;
    // Address of the primary extended table.
    t[0x15] = 0x31;
    t[0x16] = 0x00;
    // Vcc 4.5V..5.5V, no Vpp.
    t[0x1B] = 0x45;
    t[0x1C] = 0x55;
    // Typical timeouts, log2 in the unit of each row: word program in us,
    // erase in ms.
    t[0x1F] = 0x04;
    t[0x20] = 0x00;
    t[0x21] = 0x0A;
    t[0x22] = 0x0D;
    // Max timeouts as multipliers over typical.
    t[0x23] = 0x01;
    t[0x24] = 0x00;
    t[0x25] = 0x0A;
    t[0x26] = 0x0D;
    // Device size, log2 bytes.
    t[0x27] = total.trailing_zeros() as u8;
    // x8/x16 interface, no multi-byte write buffer.
    t[0x28] = 0x02;
    t[0x29] = 0x00;
    t[0x2A] = 0x00;
    t[0x2B] = 0x00;
    // One uniform erase-block region.
    t[0x2C] = 0x01;
    t[0x2D] = nb_sect as u8;
    t[0x2E] = (nb_sect >> 8) as u8;
    t[0x2F] = sect_256 as u8;
    t[0x30] = (sect_256 >> 8) as u8;
    // Primary extended table: "PRI" version 1.0, nothing optional.
    t[0x31] = b'P';
    t[0x32] = b'R';
    t[0x33] = b'I';
    t[0x34] = b'1';
    t[0x35] = b'0';
    t
}
