use crate::Result;

/// A trait for reading ELF data from various sources.
///
/// `ElfReader` abstracts the underlying storage (memory, file system, etc.)
/// behind positioned reads, which is all the resolver needs.
pub trait ElfReader {
    /// Returns the full name or path of the ELF object.
    fn file_name(&self) -> &str;

    /// Fills `buf` with the bytes starting at `offset`.
    ///
    /// Fails with [`Error::ShortRead`](crate::Error::ShortRead) when the
    /// source ends before `buf` is full. Nothing is returned for a partial
    /// read.
    fn read(&mut self, buf: &mut [u8], offset: usize) -> Result<()>;

    /// Returns the short name of the ELF object (the filename without the path).
    fn shortname(&self) -> &str {
        let name = self.file_name();
        name.rsplit('/').next().unwrap_or(name)
    }
}

/// A trait for converting various input sources into an `ElfReader`.
///
/// Implemented for paths (opened as files), byte slices (read in place) and
/// for the readers themselves.
pub trait IntoElfReader<'a> {
    /// The type of reader produced by this conversion.
    type Reader: ElfReader + 'a;

    /// Converts the input into an `ElfReader`.
    ///
    /// # Returns
    /// * `Ok(reader)` - The converted reader.
    /// * `Err(error)` - If the conversion fails (e.g., file not found).
    fn into_reader(self) -> Result<Self::Reader>;
}
