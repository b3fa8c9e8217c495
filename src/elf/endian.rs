//! Byte order of multi-byte ELF fields
//!
//! ELF files record their byte order in the `EI_DATA` byte of the
//! identification prefix. Header fields are read out of the raw buffer in host
//! order and then corrected: the correction is the identity when the file was
//! written in host order and a full byte reversal otherwise.

use core::fmt::Display;
use elf::abi::{ELFDATA2LSB, ELFDATA2MSB};

/// Byte order declared by an ELF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// `ELFDATA2LSB`
    Little,
    /// `ELFDATA2MSB`
    Big,
}

cfg_if::cfg_if! {
    if #[cfg(target_endian = "little")] {
        const HOST: Endian = Endian::Little;
    } else {
        const HOST: Endian = Endian::Big;
    }
}

/// Reverses the two bytes of a 16-bit value.
#[inline]
pub const fn bswap16(value: u16) -> u16 {
    ((value & 0xff) << 8) | (value >> 8)
}

/// Reverses the bytes of a 32-bit value by swapping each 16-bit half and then
/// exchanging the halves.
#[inline]
pub const fn bswap32(value: u32) -> u32 {
    ((bswap16((value & 0xffff) as u16) as u32) << 16) | bswap16((value >> 16) as u16) as u32
}

/// Reverses the bytes of a 64-bit value by swapping each 32-bit half and then
/// exchanging the halves.
#[inline]
pub const fn bswap64(value: u64) -> u64 {
    ((bswap32((value & 0xffff_ffff) as u32) as u64) << 32) | bswap32((value >> 32) as u32) as u64
}

impl Endian {
    /// Byte order of the host this crate was compiled for.
    pub const NATIVE: Endian = HOST;

    /// Decodes the `EI_DATA` byte. Returns `None` for anything other than
    /// `ELFDATA2LSB` or `ELFDATA2MSB`.
    #[inline]
    pub const fn from_ei_data(value: u8) -> Option<Self> {
        match value {
            ELFDATA2LSB => Some(Endian::Little),
            ELFDATA2MSB => Some(Endian::Big),
            _ => None,
        }
    }

    /// The `EI_DATA` byte for this byte order.
    #[inline]
    pub const fn ei_data(self) -> u8 {
        match self {
            Endian::Little => ELFDATA2LSB,
            Endian::Big => ELFDATA2MSB,
        }
    }

    /// Whether values in this byte order can be used without conversion.
    #[inline]
    pub const fn is_native(self) -> bool {
        matches!(
            (self, HOST),
            (Endian::Little, Endian::Little) | (Endian::Big, Endian::Big)
        )
    }

    /// Converts a 16-bit field from this byte order to host order.
    #[inline]
    pub const fn file16_to_host(self, value: u16) -> u16 {
        if self.is_native() { value } else { bswap16(value) }
    }

    /// Converts a 32-bit field from this byte order to host order.
    #[inline]
    pub const fn file32_to_host(self, value: u32) -> u32 {
        if self.is_native() { value } else { bswap32(value) }
    }

    /// Converts a 64-bit field from this byte order to host order.
    #[inline]
    pub const fn file64_to_host(self, value: u64) -> u64 {
        if self.is_native() { value } else { bswap64(value) }
    }

    /// Converts a 16-bit host value to this byte order.
    #[inline]
    pub const fn host16_to_file(self, value: u16) -> u16 {
        self.file16_to_host(value)
    }

    /// Converts a 32-bit host value to this byte order.
    #[inline]
    pub const fn host32_to_file(self, value: u32) -> u32 {
        self.file32_to_host(value)
    }

    /// Converts a 64-bit host value to this byte order.
    #[inline]
    pub const fn host64_to_file(self, value: u64) -> u64 {
        self.file64_to_host(value)
    }

    /// Reads a 16-bit field at `offset` in `bytes` and converts it to host order.
    ///
    /// # Panics
    /// If `bytes` is shorter than `offset + 2`.
    #[inline]
    pub fn read_u16(self, bytes: &[u8], offset: usize) -> u16 {
        let mut raw = [0u8; 2];
        raw.copy_from_slice(&bytes[offset..offset + 2]);
        self.file16_to_host(u16::from_ne_bytes(raw))
    }

    /// Reads a 32-bit field at `offset` in `bytes` and converts it to host order.
    ///
    /// # Panics
    /// If `bytes` is shorter than `offset + 4`.
    #[inline]
    pub fn read_u32(self, bytes: &[u8], offset: usize) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[offset..offset + 4]);
        self.file32_to_host(u32::from_ne_bytes(raw))
    }

    /// Reads a 64-bit field at `offset` in `bytes` and converts it to host order.
    ///
    /// # Panics
    /// If `bytes` is shorter than `offset + 8`.
    #[inline]
    pub fn read_u64(self, bytes: &[u8], offset: usize) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[offset..offset + 8]);
        self.file64_to_host(u64::from_ne_bytes(raw))
    }
}

impl Display for Endian {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Endian::Little => f.write_str("little-endian"),
            Endian::Big => f.write_str("big-endian"),
        }
    }
}
