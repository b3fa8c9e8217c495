//! ELF identification prefix (`e_ident`)

use crate::{
    Result,
    elf::Endian,
    error::{unsupported_class_error, unsupported_encoding_error},
};
use core::fmt::Display;
use elf::abi::{EI_CLASS, EI_DATA, EI_NIDENT, ELFCLASS32, ELFCLASS64};

/// Number of bytes in the identification prefix.
pub const IDENT_SIZE: usize = EI_NIDENT;

/// Width of the header fields of an ELF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElfClass {
    /// `ELFCLASS32`
    Elf32,
    /// `ELFCLASS64`
    Elf64,
}

impl ElfClass {
    /// Decodes the `EI_CLASS` byte.
    #[inline]
    pub const fn from_ei_class(value: u8) -> Option<Self> {
        match value {
            ELFCLASS32 => Some(ElfClass::Elf32),
            ELFCLASS64 => Some(ElfClass::Elf64),
            _ => None,
        }
    }

    /// The `EI_CLASS` byte for this class.
    #[inline]
    pub const fn ei_class(self) -> u8 {
        match self {
            ElfClass::Elf32 => ELFCLASS32,
            ElfClass::Elf64 => ELFCLASS64,
        }
    }
}

impl Display for ElfClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ElfClass::Elf32 => f.write_str("ELF32"),
            ElfClass::Elf64 => f.write_str("ELF64"),
        }
    }
}

/// The two facts of the identification prefix that drive decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElfIdent {
    pub class: ElfClass,
    pub data: Endian,
}

impl ElfIdent {
    /// Decodes an identification prefix read from `file`.
    ///
    /// The data encoding is checked before the class, so an unknown encoding
    /// is reported even when the class byte is also bad. The magic bytes are
    /// not checked.
    pub fn parse(file: &str, ident: &[u8; IDENT_SIZE]) -> Result<Self> {
        let data = Endian::from_ei_data(ident[EI_DATA])
            .ok_or_else(|| unsupported_encoding_error(file, ident[EI_DATA]))?;
        let class = ElfClass::from_ei_class(ident[EI_CLASS])
            .ok_or_else(|| unsupported_class_error(file, ident[EI_CLASS]))?;
        Ok(Self { class, data })
    }
}
