//! Synthetic installations for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Byte order of container fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Little,
    Big,
}

impl Order {
    fn u16(self, value: u16) -> [u8; 2] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    fn u24(self, value: u32) -> [u8; 3] {
        let [b0, b1, b2, _] = value.to_le_bytes();
        match self {
            Self::Little => [b0, b1, b2],
            Self::Big => [b2, b1, b0],
        }
    }
}

/// LZSS stream made of literals only
pub fn literal_lzss(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 8 + 1);
    for chunk in data.chunks(8) {
        out.push(0xFF);
        out.extend_from_slice(chunk);
    }
    out
}

/// Fixed-width 8.3 name fields
pub fn name_fields(name: &str) -> [u8; 11] {
    let (base, ext) = name.split_once('.').unwrap_or((name, ""));
    let mut fields = [0u8; 11];
    fields[..base.len()].copy_from_slice(base.as_bytes());
    fields[8..8 + ext.len()].copy_from_slice(ext.as_bytes());
    fields
}

/// Builder for a full-game directory index and data container
#[derive(Default)]
pub struct ContainerBuilder {
    index: Vec<u8>,
    data: Vec<u8>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pad the data container so later records start at a non-trivial offset
    pub fn pad_data(mut self, len: usize) -> Self {
        self.data.resize(self.data.len() + len, 0xCC);
        self
    }

    /// Append one single-part record
    pub fn file(self, name: &str, payload: &[u8], order: Order) -> Self {
        self.group(name, &[payload], order)
    }

    /// Append a record addressing several sub-files
    ///
    /// A single payload is stored with a plain offset; more than one uses
    /// the group form of the packed location.
    pub fn group(mut self, name: &str, payloads: &[&[u8]], order: Order) -> Self {
        let offset = self.data.len() as u32;
        let packed = if payloads.len() > 1 {
            assert!(offset <= 0xFFFF, "group offsets are limited to 16 bits");
            (1 << 23) | ((payloads.len() as u32) << 16) | offset
        } else {
            offset
        };

        self.index.extend_from_slice(&name_fields(name));
        self.index.extend_from_slice(&order.u24(packed));

        for payload in payloads {
            let packed = literal_lzss(payload);
            self.data.extend_from_slice(&order.u16(payload.len() as u16));
            self.data.extend_from_slice(&order.u16(packed.len() as u16));
            self.data.extend(packed);
        }
        self
    }

    /// Append a record whose payload is not valid LZSS for its header
    pub fn truncated(mut self, name: &str, claimed_size: u16, order: Order) -> Self {
        let offset = self.data.len() as u32;
        self.index.extend_from_slice(&name_fields(name));
        self.index.extend_from_slice(&order.u24(offset));

        let packed = literal_lzss(b"short");
        self.data.extend_from_slice(&order.u16(claimed_size));
        self.data.extend_from_slice(&order.u16(packed.len() as u16));
        self.data.extend(packed);
        self
    }

    /// Raw directory bytes
    pub fn index(&self) -> &[u8] {
        &self.index
    }

    /// Raw data container bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Write `index_name` and `data_name` into `dir`
    pub fn write(&self, dir: &Path, index_name: &str, data_name: &str) {
        fs::write(dir.join(index_name), &self.index).unwrap();
        fs::write(dir.join(data_name), &self.data).unwrap();
    }

    /// Write as a DOS install
    pub fn write_pc(&self, dir: &Path) {
        self.write(dir, "data.dir", "data.001");
    }

    /// Write as an Amiga install
    pub fn write_amiga(&self, dir: &Path) {
        self.write(dir, "data000.dir", "data.000");
    }

    /// Write as a Macintosh install, with the directory behind the fork header
    pub fn write_mac(&self, dir: &Path, directory_offset: usize) {
        let mut fork = vec![0xEEu8; directory_offset];
        fork.extend_from_slice(&self.index);
        fs::write(dir.join("._Star Trek Data"), fork).unwrap();
        fs::write(dir.join("Star Trek Data"), &self.data).unwrap();
    }
}

/// Builder for the 25th Anniversary demo layout with uncompressed records
#[derive(Default)]
pub struct DemoBuilder {
    index: Vec<u8>,
    data: Vec<u8>,
}

impl DemoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, payload: &[u8]) -> Self {
        let offset = self.data.len() as u32;
        self.index.extend_from_slice(&name_fields(name));
        self.index.push(0);
        self.index.extend_from_slice(&1u16.to_le_bytes());
        self.index.extend_from_slice(&offset.to_le_bytes());
        self.index.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        self.data.extend_from_slice(payload);
        self
    }

    pub fn write(&self, dir: &Path) {
        fs::write(dir.join("data.dir"), &self.index).unwrap();
        fs::write(dir.join("data.001"), &self.data).unwrap();
    }
}

/// Write a `Star Trek Audio` file with fixed table offsets
///
/// Names are `SND000` to `SND138`; blob `n` holds `n + 1` copies of
/// the byte `n`.
pub fn write_mac_audio(
    dir: &Path,
    name_table_offset: usize,
    blob_table_offset: usize,
    blob_count: u8,
) {
    let mut file = vec![0u8; blob_table_offset];
    for blob in 0..blob_count {
        let len = u32::from(blob) + 1;
        file.extend_from_slice(&len.to_be_bytes());
        file.extend(std::iter::repeat_n(blob, len as usize));
    }

    assert!(file.len() <= name_table_offset);
    file.resize(name_table_offset, 0);
    for index in 0..139 {
        let name = format!("SND{index:03}");
        file.push(name.len() as u8);
        file.extend_from_slice(name.as_bytes());
    }

    fs::write(dir.join("Star Trek Audio"), file).unwrap();
}

pub fn temp_install() -> TempDir {
    TempDir::new().unwrap()
}
