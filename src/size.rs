//! Resolution of the logical end of an ELF image
//!
//! An ELF image ends either with its section header table or with the data of
//! its last section, whichever lies farther into the file. Only the
//! identification prefix, the ELF header and the last section header are
//! read; everything past that point, such as a payload appended to the
//! binary, is never touched.

use crate::{
    Result,
    elf::{
        Elf32, Elf64, ElfClass, ElfIdent, ElfLayout, Endian, IDENT_SIZE, MAX_EHDR_SIZE,
        MAX_SHDR_SIZE,
    },
    error::{empty_section_table_error, overflow_error},
    input::{ElfReader, IntoElfReader},
};

/// The resolved extent of an ELF image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElfSize {
    size: u64,
    sht_end: u64,
    last_section_end: u64,
    class: ElfClass,
    endian: Endian,
}

impl ElfSize {
    /// Offset one past the last byte of the ELF image.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Offset one past the end of the section header table.
    #[inline]
    pub fn sht_end(&self) -> u64 {
        self.sht_end
    }

    /// Offset one past the end of the last section's data.
    #[inline]
    pub fn last_section_end(&self) -> u64 {
        self.last_section_end
    }

    #[inline]
    pub fn class(&self) -> ElfClass {
        self.class
    }

    #[inline]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Number of bytes a file of `file_len` bytes carries after the image.
    #[inline]
    pub fn trailing_len(&self, file_len: u64) -> u64 {
        file_len.saturating_sub(self.size)
    }

    /// Splits the full contents of a file into the ELF image and the bytes
    /// appended after it.
    ///
    /// Returns `None` if `bytes` is shorter than the image.
    pub fn split<'a>(&self, bytes: &'a [u8]) -> Option<(&'a [u8], &'a [u8])> {
        let size = usize::try_from(self.size).ok()?;
        if size > bytes.len() {
            return None;
        }
        Some(bytes.split_at(size))
    }
}

/// Resolves the size of the ELF image at the start of `source`.
///
/// `source` can be a path, a byte slice or an [`ElfReader`] implementation.
///
/// # Examples
/// ```no_run
/// let size = elf_size::elf_size("target/liba.so").unwrap();
/// println!("image ends at {:#x}", size.size());
/// ```
pub fn elf_size<'a, I>(source: I) -> Result<ElfSize>
where
    I: IntoElfReader<'a>,
{
    let mut reader = source.into_reader()?;
    elf_size_from_reader(&mut reader)
}

/// Resolves the size of the ELF image readable through `reader`.
pub fn elf_size_from_reader<R>(reader: &mut R) -> Result<ElfSize>
where
    R: ElfReader + ?Sized,
{
    let mut buf = [0u8; IDENT_SIZE];
    reader
        .read(&mut buf, 0)
        .map_err(|err| err.reading("e_ident"))?;
    let ident = ElfIdent::parse(reader.file_name(), &buf)?;
    #[cfg(feature = "log")]
    log::trace!(
        "[{}] {} {}",
        reader.shortname(),
        ident.class,
        ident.data
    );
    match ident.class {
        ElfClass::Elf32 => resolve::<Elf32, R>(reader, ident.data),
        ElfClass::Elf64 => resolve::<Elf64, R>(reader, ident.data),
    }
}

/// Legacy signed interface: the size of the ELF image in the file at `path`,
/// or `-1` on any failure.
///
/// With the `log` feature the diagnostic is emitted as an error record;
/// otherwise it is discarded. Prefer [`elf_size`] where the cause matters.
#[cfg(feature = "std")]
pub fn get_elf_size(path: impl AsRef<std::path::Path>) -> i64 {
    match elf_size(path.as_ref()) {
        Ok(size) => i64::try_from(size.size()).unwrap_or(-1),
        Err(_err) => {
            #[cfg(feature = "log")]
            log::error!("{_err}");
            -1
        }
    }
}

fn resolve<L, R>(reader: &mut R, endian: Endian) -> Result<ElfSize>
where
    L: ElfLayout,
    R: ElfReader + ?Sized,
{
    // The identification prefix is part of the header, so read from 0 again.
    let mut ehdr = [0u8; MAX_EHDR_SIZE];
    let ehdr = &mut ehdr[..L::EHDR_SIZE];
    reader
        .read(ehdr, 0)
        .map_err(|err| err.reading("ELF header"))?;
    let table = L::section_table(ehdr, endian);
    #[cfg(feature = "log")]
    log::trace!(
        "[{}] e_shoff: {:#x}, e_shentsize: {}, e_shnum: {}",
        reader.shortname(),
        table.shoff,
        table.shentsize,
        table.shnum
    );

    if table.shnum == 0 {
        return Err(empty_section_table_error(reader.file_name()));
    }
    let sht_end = table
        .end()
        .ok_or_else(|| overflow_error(reader.file_name(), "section header table end"))?;
    let last_shdr = table
        .last_entry_offset()
        .and_then(|offset| usize::try_from(offset).ok())
        .ok_or_else(|| overflow_error(reader.file_name(), "last section header offset"))?;

    let mut shdr = [0u8; MAX_SHDR_SIZE];
    let shdr = &mut shdr[..L::SHDR_SIZE];
    reader
        .read(shdr, last_shdr)
        .map_err(|err| err.reading("ELF section header"))?;
    let extent = L::section_extent(shdr, endian);
    let last_section_end = extent
        .end()
        .ok_or_else(|| overflow_error(reader.file_name(), "last section end"))?;
    #[cfg(feature = "log")]
    log::trace!(
        "[{}] last section: offset {:#x}, size {:#x}",
        reader.shortname(),
        extent.offset,
        extent.size
    );

    let size = sht_end.max(last_section_end);
    #[cfg(feature = "log")]
    log::debug!(
        "[{}] ELF image ends at {:#x} (sht_end {:#x}, last section end {:#x})",
        reader.shortname(),
        size,
        sht_end,
        last_section_end
    );
    Ok(ElfSize {
        size,
        sht_end,
        last_section_end,
        class: L::CLASS,
        endian,
    })
}
