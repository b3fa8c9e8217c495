use alloc::{borrow::Cow, string::String};
use core::fmt::Display;

/// Error types used throughout the `elf_size` library.
///
/// Every variant carries the name of the source it was raised for, so the
/// `Display` output is enough to tell an operator which file failed and why.
#[derive(Debug)]
pub enum Error {
    /// The source could not be opened.
    ///
    /// This error typically indicates:
    /// * File not found
    /// * Permission denied
    Open {
        /// Name of the source.
        file: String,
        /// A descriptive message about the failure.
        msg: Cow<'static, str>,
    },

    /// A read returned fewer bytes than the structure being decoded requires.
    ///
    /// Raised for truncated files and for section header offsets that point
    /// past the end of the source.
    ShortRead {
        /// Name of the source.
        file: String,
        /// The structure that was being read.
        what: &'static str,
        /// A descriptive message about the failure.
        msg: Cow<'static, str>,
    },

    /// The `EI_DATA` byte is neither `ELFDATA2LSB` nor `ELFDATA2MSB`.
    UnsupportedEncoding {
        /// Name of the source.
        file: String,
        /// The byte found in the identification prefix.
        value: u8,
    },

    /// The `EI_CLASS` byte is neither `ELFCLASS32` nor `ELFCLASS64`.
    UnsupportedClass {
        /// Name of the source.
        file: String,
        /// The byte found in the identification prefix.
        value: u8,
    },

    /// The ELF header declares zero section headers, so there is no last
    /// section header to read.
    EmptySectionTable {
        /// Name of the source.
        file: String,
    },

    /// An offset computed from header fields does not fit in 64 bits, or
    /// does not fit in the host address width.
    OffsetOverflow {
        /// Name of the source.
        file: String,
        /// The quantity whose computation overflowed.
        what: &'static str,
    },

    /// Any other I/O failure while positioning or reading the source.
    Io {
        /// Name of the source.
        file: String,
        /// A descriptive message about the I/O error.
        msg: Cow<'static, str>,
    },
}

impl Error {
    /// Returns the name of the source the error was raised for.
    pub fn file_name(&self) -> &str {
        match self {
            Error::Open { file, .. }
            | Error::ShortRead { file, .. }
            | Error::UnsupportedEncoding { file, .. }
            | Error::UnsupportedClass { file, .. }
            | Error::EmptySectionTable { file }
            | Error::OffsetOverflow { file, .. }
            | Error::Io { file, .. } => file,
        }
    }

    /// Names the structure a short read happened on. Other errors pass
    /// through unchanged.
    pub(crate) fn reading(self, what: &'static str) -> Self {
        match self {
            Error::ShortRead { file, msg, .. } => Error::ShortRead { file, what, msg },
            other => other,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Open { file, msg } => write!(f, "Cannot open {file}: {msg}"),
            Error::ShortRead { file, what, msg } => {
                write!(f, "Read of {what} from {file} failed: {msg}")
            }
            Error::UnsupportedEncoding { file, value } => {
                write!(f, "Unknown ELF data order {value} in {file}")
            }
            Error::UnsupportedClass { file, value } => {
                write!(f, "Unknown ELF class {value} in {file}")
            }
            Error::EmptySectionTable { file } => {
                write!(f, "{file} has no section headers")
            }
            Error::OffsetOverflow { file, what } => {
                write!(f, "{what} of {file} overflows the addressable range")
            }
            Error::Io { file, msg } => write!(f, "I/O error on {file}: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

#[cold]
#[inline(never)]
#[allow(unused)]
pub(crate) fn open_error(file: &str, msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Open {
        file: file.into(),
        msg: msg.into(),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn short_read_error(
    file: &str,
    what: &'static str,
    msg: impl Into<Cow<'static, str>>,
) -> Error {
    Error::ShortRead {
        file: file.into(),
        what,
        msg: msg.into(),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn unsupported_encoding_error(file: &str, value: u8) -> Error {
    Error::UnsupportedEncoding {
        file: file.into(),
        value,
    }
}

#[cold]
#[inline(never)]
pub(crate) fn unsupported_class_error(file: &str, value: u8) -> Error {
    Error::UnsupportedClass {
        file: file.into(),
        value,
    }
}

#[cold]
#[inline(never)]
pub(crate) fn empty_section_table_error(file: &str) -> Error {
    Error::EmptySectionTable { file: file.into() }
}

#[cold]
#[inline(never)]
pub(crate) fn overflow_error(file: &str, what: &'static str) -> Error {
    Error::OffsetOverflow {
        file: file.into(),
        what,
    }
}

#[cold]
#[inline(never)]
#[allow(unused)]
pub(crate) fn io_error(file: &str, msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Io {
        file: file.into(),
        msg: msg.into(),
    }
}
