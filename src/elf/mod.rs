//! ELF header decoding: byte order, identification and class layouts.

mod endian;
mod ident;
mod layout;

pub(crate) use layout::{MAX_EHDR_SIZE, MAX_SHDR_SIZE};

pub use endian::{Endian, bswap16, bswap32, bswap64};
pub use ident::{ElfClass, ElfIdent, IDENT_SIZE};
pub use layout::{Elf32, Elf64, ElfLayout, SectionExtent, SectionTable};
