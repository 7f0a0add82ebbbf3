//! Store-only ZIP archive writer
//!
//! Packages a handful of small, fully buffered named byte buffers into one
//! in-memory archive that any conformant ZIP reader can open. Only the
//! "store" method is written: no compression, no encryption, no ZIP64, no
//! archive comment and no extra fields.
//!
//! # Top Level
//!
//! | Block              | Count | Description |
//! | ------------------ | ----- | ----------- |
//! | Local record       | N     | Local header, name and raw content of each entry, in input order |
//! | Directory record   | N     | Directory header and name of each entry, in the same order |
//! | Trailer            | 1     | Entry count plus the location and size of the directory |
//!
//! Unless otherwise noted everything is stored in Little Endian format. The
//! timestamp fields are always zero so the same input always yields the same
//! bytes.
//!
//! ## Local record
//!
//! See [`local::LocalHeader`].
//!
//! | Offset | Type    | Name               | Value |
//! | -----: | ------: | ------------------ | ----- |
//! | 0      | u32     | signature          | `0x04034b50` |
//! | 4      | u16     | version needed     | 20 |
//! | 6      | u16     | flags              | 0 |
//! | 8      | u16     | method             | 0 (store) |
//! | 10     | u16     | mod time           | 0 |
//! | 12     | u16     | mod date           | 0 |
//! | 14     | u32     | crc-32             | checksum of the content |
//! | 18     | u32     | compressed size    | content length |
//! | 22     | u32     | uncompressed size  | content length |
//! | 26     | u16     | name length        | byte length of the UTF-8 name |
//! | 28     | u16     | extra length       | 0 |
//! | 30     | [u8; N] | name               | UTF-8 name |
//! | 30+N   | [u8; M] | content            | raw content |
//!
//! ## Directory record
//!
//! See [`directory::DirectoryHeader`].
//!
//! | Offset | Type    | Name                | Value |
//! | -----: | ------: | ------------------- | ----- |
//! | 0      | u32     | signature           | `0x02014b50` |
//! | 4      | u16     | version made by     | 20 |
//! | 6      | u16     | version needed      | 20 |
//! | 8      | u16     | flags               | 0 |
//! | 10     | u16     | method              | 0 |
//! | 12     | u16     | mod time            | 0 |
//! | 14     | u16     | mod date            | 0 |
//! | 16     | u32     | crc-32              | same as the local record |
//! | 20     | u32     | compressed size     | same as the local record |
//! | 24     | u32     | uncompressed size   | same as the local record |
//! | 28     | u16     | name length         | same as the local record |
//! | 30     | u16     | extra length        | 0 |
//! | 32     | u16     | comment length      | 0 |
//! | 34     | u16     | disk number start   | 0 |
//! | 36     | u16     | internal attributes | 0 |
//! | 38     | u32     | external attributes | 0 |
//! | 42     | u32     | local offset        | offset of the entry's local record |
//! | 46     | [u8; N] | name                | UTF-8 name |
//!
//! ## Trailer
//!
//! See [`trailer::Trailer`].
//!
//! | Offset | Type | Name                 | Value |
//! | -----: | ---: | -------------------- | ----- |
//! | 0      | u32  | signature            | `0x06054b50` |
//! | 4      | u16  | disk number          | 0 |
//! | 6      | u16  | directory disk       | 0 |
//! | 8      | u16  | entries on this disk | entry count |
//! | 10     | u16  | total entries        | entry count |
//! | 12     | u32  | directory size       | byte length of all directory records |
//! | 16     | u32  | directory offset     | byte length of all local records |
//! | 20     | u16  | comment length       | 0 |
//!
//! # Limits
//!
//! The 16 and 32 bit field widths bound what can be written. Exceeding any of
//! them is reported as an [`ArchiveError`] before any output is produced:
//! - at most 65535 entries
//! - at most 65535 bytes of UTF-8 name per entry
//! - at most 4 GiB - 1 bytes of content per entry
//! - every local record offset and the directory must sit below 4 GiB
pub mod builder;
pub mod directory;
pub mod local;
pub mod reader;
pub mod trailer;

use thiserror::Error;

pub const LOCAL_SIGNATURE: u32 = 0x0403_4b50;
pub const DIRECTORY_SIGNATURE: u32 = 0x0201_4b50;
pub const TRAILER_SIGNATURE: u32 = 0x0605_4b50;

// 2.0, the lowest version that knows about folders and the store method
pub const VERSION: u16 = 20;
pub const METHOD_STORE: u16 = 0;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArchiveError {
    #[error("entry name is not valid utf-8: {0:?}")]
    NameEncoding(String),
    #[error("entry {name:?} is {len} bytes, the limit is 4294967295")]
    EntryTooLarge { name: String, len: u64 },
    #[error("{0} entries given, the limit is 65535")]
    TooManyEntries(usize),
    #[error("entry name is {0} bytes, the limit is 65535")]
    NameTooLong(usize),
    #[error("archive would exceed the 4 GiB offset limit")]
    ArchiveTooLarge,
}

/// One named payload to be stored in the archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    name: String,
    content: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new<N: Into<String>, C: Into<Vec<u8>>>(name: N, content: C) -> Self {
        ArchiveEntry {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Build an entry from a name that has not been checked for UTF-8 yet.
    pub fn from_utf8<C: Into<Vec<u8>>>(name: Vec<u8>, content: C) -> Result<Self, ArchiveError> {
        let name = String::from_utf8(name)
            .map_err(|e| ArchiveError::NameEncoding(String::from_utf8_lossy(e.as_bytes()).into_owned()))?;

        Ok(ArchiveEntry::new(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

// Length of the encoded name as stored in the u16 name length fields
pub(crate) fn name_len(name: &str) -> Result<u16, ArchiveError> {
    let len = name.len();
    u16::try_from(len).map_err(|_| ArchiveError::NameTooLong(len))
}

// Stored size, which for the store method is also the compressed size
pub(crate) fn content_len(name: &str, len: usize) -> Result<u32, ArchiveError> {
    u32::try_from(len).map_err(|_| ArchiveError::EntryTooLarge {
        name: name.to_string(),
        len: len as u64,
    })
}

pub(crate) fn offset_u32(offset: u64) -> Result<u32, ArchiveError> {
    u32::try_from(offset).map_err(|_| ArchiveError::ArchiveTooLarge)
}
