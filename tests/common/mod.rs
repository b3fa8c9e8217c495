#![allow(dead_code)]

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use elf_size::{ElfClass, Endian};
use std::path::PathBuf;

/// Builds a minimal ELF image that carries only what the resolver reads: the
/// identification prefix, the section header table fields of the ELF header,
/// and the extent of the last section header. Field offsets are the ones
/// fixed by the ELF specification.
#[derive(Debug, Clone, Copy)]
pub struct ImageBuilder {
    pub class: ElfClass,
    pub endian: Endian,
    pub shoff: u64,
    pub shentsize: u16,
    pub shnum: u16,
    pub last_offset: u64,
    pub last_size: u64,
}

impl ImageBuilder {
    pub fn new(class: ElfClass, endian: Endian) -> Self {
        let shentsize = match class {
            ElfClass::Elf32 => 40,
            ElfClass::Elf64 => 64,
        };
        Self {
            class,
            endian,
            shoff: 0x1000,
            shentsize,
            shnum: 30,
            last_offset: 0x0fe0,
            last_size: 0x10,
        }
    }

    pub fn section_table(mut self, shoff: u64, shentsize: u16, shnum: u16) -> Self {
        self.shoff = shoff;
        self.shentsize = shentsize;
        self.shnum = shnum;
        self
    }

    pub fn last_section(mut self, offset: u64, size: u64) -> Self {
        self.last_offset = offset;
        self.last_size = size;
        self
    }

    pub fn ehdr_size(&self) -> u64 {
        match self.class {
            ElfClass::Elf32 => 52,
            ElfClass::Elf64 => 64,
        }
    }

    pub fn sht_end(&self) -> u64 {
        self.shoff + self.shentsize as u64 * self.shnum as u64
    }

    pub fn last_section_end(&self) -> u64 {
        self.last_offset + self.last_size
    }

    /// The size the resolver is expected to report.
    pub fn expected_size(&self) -> u64 {
        self.sht_end().max(self.last_section_end())
    }

    /// Writes the image, exactly `expected_size` bytes long (never shorter
    /// than the ELF header).
    pub fn build(&self) -> Vec<u8> {
        let len = self.expected_size().max(self.ehdr_size()) as usize;
        let mut buf = vec![0u8; len];
        self.write_headers(&mut buf);
        buf
    }

    /// Writes the image followed by `payload`.
    pub fn build_with_payload(&self, payload: &[u8]) -> Vec<u8> {
        let mut buf = self.build();
        buf.extend_from_slice(payload);
        buf
    }

    fn write_headers(&self, buf: &mut [u8]) {
        buf[..4].copy_from_slice(b"\x7fELF");
        buf[4] = self.class.ei_class();
        buf[5] = self.endian.ei_data();
        buf[6] = 1;
        match self.class {
            ElfClass::Elf32 => {
                self.put_u32(buf, 0x20, self.shoff as u32);
                self.put_u16(buf, 0x2e, self.shentsize);
                self.put_u16(buf, 0x30, self.shnum);
            }
            ElfClass::Elf64 => {
                self.put_u64(buf, 0x28, self.shoff);
                self.put_u16(buf, 0x3a, self.shentsize);
                self.put_u16(buf, 0x3c, self.shnum);
            }
        }
        if self.shnum == 0 {
            return;
        }
        let last = (self.shoff + self.shentsize as u64 * (self.shnum as u64 - 1)) as usize;
        match self.class {
            ElfClass::Elf32 => {
                self.put_u32(buf, last + 0x10, self.last_offset as u32);
                self.put_u32(buf, last + 0x14, self.last_size as u32);
            }
            ElfClass::Elf64 => {
                self.put_u64(buf, last + 0x18, self.last_offset);
                self.put_u64(buf, last + 0x20, self.last_size);
            }
        }
    }

    fn put_u16(&self, buf: &mut [u8], offset: usize, value: u16) {
        match self.endian {
            Endian::Little => LittleEndian::write_u16(&mut buf[offset..], value),
            Endian::Big => BigEndian::write_u16(&mut buf[offset..], value),
        }
    }

    fn put_u32(&self, buf: &mut [u8], offset: usize, value: u32) {
        match self.endian {
            Endian::Little => LittleEndian::write_u32(&mut buf[offset..], value),
            Endian::Big => BigEndian::write_u32(&mut buf[offset..], value),
        }
    }

    fn put_u64(&self, buf: &mut [u8], offset: usize, value: u64) {
        match self.endian {
            Endian::Little => LittleEndian::write_u64(&mut buf[offset..], value),
            Endian::Big => BigEndian::write_u64(&mut buf[offset..], value),
        }
    }
}

/// Writes `bytes` to a fresh file under the system temp directory.
pub fn write_temp(name: &str, bytes: &[u8]) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("elf_size_{}_{}", std::process::id(), name));
    std::fs::write(&path, bytes).expect("Failed to write test image");
    path
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
