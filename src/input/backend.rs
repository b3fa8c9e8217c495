use super::{ElfReader, IntoElfReader};
use crate::{Result, error::short_read_error};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

/// Name reported for anonymous in-memory sources.
const MEMORY_NAME: &str = "<memory>";

/// Copies `buf.len()` bytes of `bytes` starting at `offset` into `buf`.
fn read_slice(name: &str, bytes: &[u8], buf: &mut [u8], offset: usize) -> Result<()> {
    let data = offset
        .checked_add(buf.len())
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| {
            short_read_error(
                name,
                "data",
                alloc::format!(
                    "wanted {} bytes at offset {:#x}, source holds {:#x}",
                    buf.len(),
                    offset,
                    bytes.len()
                ),
            )
        })?;
    buf.copy_from_slice(data);
    Ok(())
}

/// An ELF object source backed by an in-memory byte slice.
///
/// This is useful for images that are already in memory, such as those
/// embedded in the binary or received over a network.
#[derive(Debug)]
pub struct ElfBinary<'bytes> {
    /// The name assigned to this ELF object.
    name: String,
    /// The raw ELF data, possibly followed by appended bytes.
    bytes: &'bytes [u8],
}

impl<'bytes> ElfBinary<'bytes> {
    /// Creates a new memory-based ELF object.
    ///
    /// # Arguments
    /// - `name` - A string identifier for the ELF object, typically the
    ///   original file path. Used for error reporting.
    /// - `bytes` - A byte slice containing the ELF data.
    ///
    /// # Examples
    /// ```rust
    /// use elf_size::ElfBinary;
    ///
    /// let data = &[]; // In practice, this would be the bytes of an ELF file
    /// let binary = ElfBinary::new("liba.so", data);
    /// ```
    pub fn new(name: &str, bytes: &'bytes [u8]) -> Self {
        Self {
            name: name.to_string(),
            bytes,
        }
    }

    /// Returns the whole byte slice backing this object.
    pub fn bytes(&self) -> &'bytes [u8] {
        self.bytes
    }
}

impl<'bytes> ElfReader for ElfBinary<'bytes> {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn read(&mut self, buf: &mut [u8], offset: usize) -> Result<()> {
        read_slice(&self.name, self.bytes, buf, offset)
    }
}

// Byte slices read in place under a generic name.
impl<'a> ElfReader for &'a [u8] {
    fn file_name(&self) -> &str {
        MEMORY_NAME
    }

    fn read(&mut self, buf: &mut [u8], offset: usize) -> Result<()> {
        read_slice(MEMORY_NAME, self, buf, offset)
    }
}

impl<'a> IntoElfReader<'a> for &'a [u8] {
    type Reader = ElfBinary<'a>;

    fn into_reader(self) -> Result<Self::Reader> {
        Ok(ElfBinary::new(MEMORY_NAME, self))
    }
}

impl<'a> IntoElfReader<'a> for &'a Vec<u8> {
    type Reader = ElfBinary<'a>;

    fn into_reader(self) -> Result<Self::Reader> {
        Ok(ElfBinary::new(MEMORY_NAME, self.as_slice()))
    }
}

// Already constructed ElfBinary (pass-through)
impl<'a, 'b> IntoElfReader<'a> for ElfBinary<'b>
where
    'b: 'a,
{
    type Reader = ElfBinary<'b>;

    fn into_reader(self) -> Result<Self::Reader> {
        Ok(self)
    }
}

#[cfg(feature = "std")]
mod file {
    use super::{ElfReader, IntoElfReader};
    use crate::{
        Result,
        error::{io_error, open_error, short_read_error},
    };
    use alloc::string::{String, ToString};
    use std::{
        fs::File,
        io::{ErrorKind, Read, Seek, SeekFrom},
        path::{Path, PathBuf},
    };

    /// An ELF object source backed by a file on the filesystem.
    ///
    /// The file is closed when the `ElfFile` is dropped.
    #[derive(Debug)]
    pub struct ElfFile {
        /// The path the file was opened from.
        name: String,
        inner: File,
    }

    impl ElfFile {
        /// Opens the file at `path` for reading.
        ///
        /// # Returns
        /// - `Ok(ElfFile)` - If the file was successfully opened.
        /// - `Err` - [`Error::Open`](crate::Error::Open) if it could not be.
        pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let name = path.display().to_string();
            let inner = File::open(path).map_err(|err| open_error(&name, err.to_string()))?;
            Ok(ElfFile { name, inner })
        }

        /// Wraps a file that is already open. `name` is only used in
        /// diagnostics.
        pub fn from_file(name: &str, file: File) -> Self {
            ElfFile {
                name: name.to_string(),
                inner: file,
            }
        }

        /// Returns the length of the underlying file in bytes.
        pub fn len(&self) -> Result<u64> {
            self.inner
                .metadata()
                .map(|meta| meta.len())
                .map_err(|err| io_error(&self.name, err.to_string()))
        }

        /// Whether the underlying file is empty.
        pub fn is_empty(&self) -> Result<bool> {
            self.len().map(|len| len == 0)
        }
    }

    impl ElfReader for ElfFile {
        fn file_name(&self) -> &str {
            &self.name
        }

        fn read(&mut self, buf: &mut [u8], offset: usize) -> Result<()> {
            self.inner
                .seek(SeekFrom::Start(offset as u64))
                .map_err(|err| io_error(&self.name, err.to_string()))?;
            self.inner.read_exact(buf).map_err(|err| match err.kind() {
                ErrorKind::UnexpectedEof => short_read_error(
                    &self.name,
                    "data",
                    alloc::format!(
                        "end of file before {} bytes at offset {:#x}",
                        buf.len(),
                        offset
                    ),
                ),
                _ => io_error(&self.name, err.to_string()),
            })
        }
    }

    impl<'a> IntoElfReader<'a> for &'a str {
        type Reader = ElfFile;

        fn into_reader(self) -> Result<Self::Reader> {
            ElfFile::from_path(self)
        }
    }

    impl<'a> IntoElfReader<'a> for String {
        type Reader = ElfFile;

        fn into_reader(self) -> Result<Self::Reader> {
            ElfFile::from_path(self)
        }
    }

    impl<'a> IntoElfReader<'a> for &'a Path {
        type Reader = ElfFile;

        fn into_reader(self) -> Result<Self::Reader> {
            ElfFile::from_path(self)
        }
    }

    impl<'a> IntoElfReader<'a> for PathBuf {
        type Reader = ElfFile;

        fn into_reader(self) -> Result<Self::Reader> {
            ElfFile::from_path(self)
        }
    }

    impl<'a> IntoElfReader<'a> for ElfFile {
        type Reader = ElfFile;

        fn into_reader(self) -> Result<Self::Reader> {
            Ok(self)
        }
    }
}

#[cfg(feature = "std")]
pub use file::ElfFile;
