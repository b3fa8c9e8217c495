//! # elf_size
//! Find where an ELF image ends inside a file that may carry extra data
//! appended after it, such as a payload concatenated to a binary.
//! ## Usage
//! The size is resolved from three small reads: the identification prefix,
//! the ELF header and the last section header. The image ends at whichever
//! lies farther into the file, the end of the section header table or the end
//! of the last section's data. Both 32-bit and 64-bit images are supported in
//! either byte order.
//! ## Example
//! ```no_run
//! use elf_size::elf_size;
//!
//! let size = elf_size("target/app.bin").unwrap();
//! let bytes = std::fs::read("target/app.bin").unwrap();
//! let (image, payload) = size.split(&bytes).unwrap();
//! println!("{} byte image, {} byte payload", image.len(), payload.len());
//! ```
#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod elf;
mod error;
pub mod input;
mod size;

pub use ::elf::abi;
pub use crate::elf::{ElfClass, Endian};
pub use error::Error;
#[cfg(feature = "std")]
pub use input::ElfFile;
pub use input::{ElfBinary, ElfReader, IntoElfReader};
#[cfg(feature = "std")]
pub use size::get_elf_size;
pub use size::{ElfSize, elf_size, elf_size_from_reader};

pub type Result<T> = core::result::Result<T, Error>;
