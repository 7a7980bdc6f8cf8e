//! Configuration surface.
//!
//! Small, serde-deserializable structures an embedding frontend fills in from
//! its own JSON/TOML and hands to the constructors here. Only device-attach
//! time parameters live in this module; per-instruction state does not.

use serde::Deserialize;

/// Byte order used when assembling multi-byte flash reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Endianness {
    /// Big-endian (the common MIPS board configuration).
    #[default]
    Big,
    /// Little-endian.
    Little,
}

/// Sector arrangement of a flash chip.
///
/// Uniform sectoring is the default. Boot-block parts replace one end sector
/// with a group of reduced-size blocks; that geometry is an explicit option
/// here rather than an address-range special case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum SectorLayout {
    /// All sectors share the configured sector length.
    #[default]
    Uniform,
    /// The first sector is split into boot blocks (1/2, 1/4, 1/4 of a
    /// sector).
    BootBlockBottom,
    /// The last sector is split into boot blocks (1/4, 1/4, 1/2 of a
    /// sector).
    BootBlockTop,
}

/// Flash device geometry and identity, fixed at construction.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct FlashConfig {
    /// Guest-physical base address of the mapped array.
    pub base_address: u64,
    /// Length of one (uniform) sector in bytes.
    pub sector_length: u32,
    /// Number of sectors.
    pub sector_count: u32,
    /// Device width in bytes: 1, 2, or 4.
    pub width: u32,
    /// JEDEC manufacturer id, reported in autoselect mode.
    pub manufacturer_id: u8,
    /// JEDEC device id. `0x7E` selects the extended-id escape, exposing
    /// `extended_ids` at autoselect offsets 0x0E/0x0F.
    pub device_id: u8,
    /// Extended device ids (cycle 2 and 3), used when `device_id` is `0x7E`.
    #[serde(default)]
    pub extended_ids: [u8; 2],
    /// Sector arrangement.
    #[serde(default)]
    pub layout: SectorLayout,
    /// Byte order for multi-byte array reads.
    #[serde(default)]
    pub endianness: Endianness,
}

impl FlashConfig {
    /// Total array length in bytes.
    #[inline]
    pub const fn total_length(&self) -> u32 {
        self.sector_length * self.sector_count
    }
}
