use crc32fast::Hasher as Crc32Hasher;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

pub const FORMAT_VERSION: u16 = 1;

/// Kind of file written into an output segment, identified by its magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    MeasureColumn,
    NonDictionaryColumn,
    MdKeyColumn,
}

impl FileKind {
    pub const fn magic(&self) -> [u8; 8] {
        match self {
            FileKind::MeasureColumn => *b"SGMMSR\0\0",
            FileKind::NonDictionaryColumn => *b"SGMNDC\0\0",
            FileKind::MdKeyColumn => *b"SGMMDK\0\0",
        }
    }
}

/// Fixed 16-byte header: magic, version, reserved, CRC32 of the preceding bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFileHeader {
    pub magic: [u8; 8],
    pub version: u16,
    pub crc32: u32,
}

impl ColumnFileHeader {
    pub const LEN: usize = 8 + 2 + 2 + 4;

    pub fn new(kind: FileKind) -> Self {
        let magic = kind.magic();
        Self {
            magic,
            version: FORMAT_VERSION,
            crc32: Self::checksum(&magic, FORMAT_VERSION),
        }
    }

    fn checksum(magic: &[u8; 8], version: u16) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(magic);
        hasher.update(&version.to_le_bytes());
        hasher.update(&0u16.to_le_bytes());
        hasher.finalize()
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        let mut buf = [0u8; Self::LEN];
        buf[..8].copy_from_slice(&self.magic);
        buf[8..10].copy_from_slice(&self.version.to_le_bytes());
        buf[12..16].copy_from_slice(&self.crc32.to_le_bytes());
        w.write_all(&buf)
    }

    /// Reads a header and checks its CRC, magic and version against `kind`.
    pub fn read_expecting<R: Read>(mut r: R, kind: FileKind) -> std::io::Result<Self> {
        let mut buf = [0u8; Self::LEN];
        r.read_exact(&mut buf)?;

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&buf[..8]);
        let version = u16::from_le_bytes([buf[8], buf[9]]);
        let crc32 = u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]);

        if Self::checksum(&magic, version) != crc32 {
            return Err(invalid_data("header CRC mismatch"));
        }
        if magic != kind.magic() {
            return Err(invalid_data("invalid magic"));
        }
        if version != FORMAT_VERSION {
            return Err(invalid_data("unsupported version"));
        }
        Ok(Self {
            magic,
            version,
            crc32,
        })
    }
}

/// Creates (or truncates) `path` and writes the header for `kind`.
pub fn create_with_header(path: &Path, kind: FileKind) -> std::io::Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    ColumnFileHeader::new(kind).write_to(&mut file)?;
    Ok(file)
}

/// Opens `path` and validates its header; the returned file is positioned
/// right after it.
pub fn open_with_header(path: &Path, kind: FileKind) -> std::io::Result<File> {
    let mut file = File::open(path)?;
    ColumnFileHeader::read_expecting(&mut file, kind)?;
    Ok(file)
}

fn invalid_data(msg: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, msg.to_string())
}
