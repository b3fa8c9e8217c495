//! Byte sources the resolver can read from
//!
//! This module provides the [`ElfReader`] trait and its implementations for
//! in-memory images and files on disk, plus [`IntoElfReader`] so the entry
//! points accept paths, byte slices or ready-made readers alike.

#[cfg(feature = "std")]
pub use backend::ElfFile;
pub use backend::ElfBinary;
pub use traits::{ElfReader, IntoElfReader};

mod backend;
mod traits;
