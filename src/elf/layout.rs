//! Class-dependent header layouts
//!
//! The 32-bit and 64-bit ELF headers carry the same logical fields at
//! different offsets and widths. [`ElfLayout`] captures those differences so
//! the resolver can be written once and instantiated for [`Elf32`] and
//! [`Elf64`]. Field offsets and structure sizes are taken from the C-style
//! definitions in the `elf` crate.

use crate::elf::{ElfClass, Endian};
use core::mem::{offset_of, size_of};
use elf::{
    file::{Elf32_Ehdr, Elf64_Ehdr},
    section::{Elf32_Shdr, Elf64_Shdr},
};

/// Size of the largest ELF header of any class.
pub(crate) const MAX_EHDR_SIZE: usize = size_of::<Elf64_Ehdr>();
/// Size of the largest section header of any class.
pub(crate) const MAX_SHDR_SIZE: usize = size_of::<Elf64_Shdr>();

/// Location of the section header table, as declared by the ELF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTable {
    /// `e_shoff`
    pub shoff: u64,
    /// `e_shentsize`
    pub shentsize: u64,
    /// `e_shnum`
    pub shnum: u64,
}

impl SectionTable {
    /// File offset of the last entry in the table.
    ///
    /// Returns `None` when the table is empty or the offset overflows.
    #[inline]
    pub fn last_entry_offset(&self) -> Option<u64> {
        let index = self.shnum.checked_sub(1)?;
        self.shentsize.checked_mul(index)?.checked_add(self.shoff)
    }

    /// File offset one past the end of the table.
    #[inline]
    pub fn end(&self) -> Option<u64> {
        self.shentsize.checked_mul(self.shnum)?.checked_add(self.shoff)
    }
}

/// File extent of a single section, as declared by its section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionExtent {
    /// `sh_offset`
    pub offset: u64,
    /// `sh_size`
    pub size: u64,
}

impl SectionExtent {
    /// File offset one past the end of the section's data.
    #[inline]
    pub fn end(&self) -> Option<u64> {
        self.offset.checked_add(self.size)
    }
}

/// Header layout of one ELF class.
pub trait ElfLayout {
    /// The class this layout decodes.
    const CLASS: ElfClass;
    /// Size in bytes of the ELF header.
    const EHDR_SIZE: usize;
    /// Size in bytes of one section header.
    const SHDR_SIZE: usize;

    /// Decodes the section header table location from a raw ELF header.
    ///
    /// `ehdr` must hold at least [`Self::EHDR_SIZE`] bytes.
    fn section_table(ehdr: &[u8], endian: Endian) -> SectionTable;

    /// Decodes the section extent from a raw section header.
    ///
    /// `shdr` must hold at least [`Self::SHDR_SIZE`] bytes.
    fn section_extent(shdr: &[u8], endian: Endian) -> SectionExtent;
}

/// 32-bit layout (`Elf32_Ehdr`, `Elf32_Shdr`).
#[derive(Debug, Clone, Copy)]
pub struct Elf32;

/// 64-bit layout (`Elf64_Ehdr`, `Elf64_Shdr`).
#[derive(Debug, Clone, Copy)]
pub struct Elf64;

impl ElfLayout for Elf32 {
    const CLASS: ElfClass = ElfClass::Elf32;
    const EHDR_SIZE: usize = size_of::<Elf32_Ehdr>();
    const SHDR_SIZE: usize = size_of::<Elf32_Shdr>();

    fn section_table(ehdr: &[u8], endian: Endian) -> SectionTable {
        SectionTable {
            shoff: endian.read_u32(ehdr, offset_of!(Elf32_Ehdr, e_shoff)) as u64,
            shentsize: endian.read_u16(ehdr, offset_of!(Elf32_Ehdr, e_shentsize)) as u64,
            shnum: endian.read_u16(ehdr, offset_of!(Elf32_Ehdr, e_shnum)) as u64,
        }
    }

    fn section_extent(shdr: &[u8], endian: Endian) -> SectionExtent {
        SectionExtent {
            offset: endian.read_u32(shdr, offset_of!(Elf32_Shdr, sh_offset)) as u64,
            size: endian.read_u32(shdr, offset_of!(Elf32_Shdr, sh_size)) as u64,
        }
    }
}

impl ElfLayout for Elf64 {
    const CLASS: ElfClass = ElfClass::Elf64;
    const EHDR_SIZE: usize = size_of::<Elf64_Ehdr>();
    const SHDR_SIZE: usize = size_of::<Elf64_Shdr>();

    fn section_table(ehdr: &[u8], endian: Endian) -> SectionTable {
        SectionTable {
            shoff: endian.read_u64(ehdr, offset_of!(Elf64_Ehdr, e_shoff)),
            shentsize: endian.read_u16(ehdr, offset_of!(Elf64_Ehdr, e_shentsize)) as u64,
            shnum: endian.read_u16(ehdr, offset_of!(Elf64_Ehdr, e_shnum)) as u64,
        }
    }

    fn section_extent(shdr: &[u8], endian: Endian) -> SectionExtent {
        SectionExtent {
            offset: endian.read_u64(shdr, offset_of!(Elf64_Shdr, sh_offset)),
            size: endian.read_u64(shdr, offset_of!(Elf64_Shdr, sh_size)),
        }
    }
}
