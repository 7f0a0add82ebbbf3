use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

use zcore::crc::checksum;

use crate::zip::{DIRECTORY_SIGNATURE, LOCAL_SIGNATURE, METHOD_STORE, TRAILER_SIGNATURE};

const TRAILER_LEN: usize = 22;

// Encrypted entry, bit 0 of the general purpose flags
const FLAG_ENCRYPTED: u16 = 0x0001;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Io(io::Error),
    #[error("archive is truncated")]
    Truncated,
    #[error("bad signature, expected {expected:#010x} found {found:#010x}")]
    Signature { expected: u32, found: u32 },
    #[error("end of central directory not found")]
    MissingTrailer,
    #[error("multi disk archives are not supported")]
    MultiDisk,
    #[error("compression method {0} is not supported")]
    Unsupported(u16),
    #[error("encrypted entries are not supported")]
    Encrypted,
    #[error("local header of {0:?} disagrees with its directory record")]
    HeaderMismatch(String),
    #[error("checksum failed for {name:?}, expected {expected:08x} found {found:08x}")]
    Checksum { name: String, expected: u32, found: u32 },
    #[error("entry name is not valid utf-8")]
    Utf8Name,
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => ReadError::Truncated,
            _ => ReadError::Io(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailerRecord {
    pub entry_count: u16,
    pub directory_size: u32,
    pub directory_offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    pub name: String,
    pub crc: u32,
    pub compressed_size: u32,
    pub size: u32,
    pub local_offset: u32,
}

// Only valid entries are returned, the content borrows from the archive
#[derive(Debug, PartialEq, Eq)]
pub struct StoredEntry<'a> {
    pub name: String,
    pub crc: u32,
    pub content: &'a [u8],
}

/// Reads back store-only archives such as the ones [`crate::create_archive`] writes.
pub struct ArchiveReader<'a> {
    data: &'a [u8],
    trailer: TrailerRecord,
}

impl<'a> ArchiveReader<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let at = find_trailer(data).ok_or(ReadError::MissingTrailer)?;
        let mut rdr = &data[at..];

        expect_signature(&mut rdr, TRAILER_SIGNATURE)?;
        let disk = rdr.read_u16::<LittleEndian>()?;
        let directory_disk = rdr.read_u16::<LittleEndian>()?;
        let disk_entries = rdr.read_u16::<LittleEndian>()?;
        let entry_count = rdr.read_u16::<LittleEndian>()?;
        let directory_size = rdr.read_u32::<LittleEndian>()?;
        let directory_offset = rdr.read_u32::<LittleEndian>()?;

        if disk != 0 || directory_disk != 0 || disk_entries != entry_count {
            return Err(ReadError::MultiDisk);
        }

        // The directory has to sit between the local records and the trailer
        if directory_offset as u64 + directory_size as u64 > at as u64 {
            return Err(ReadError::Truncated);
        }

        Ok(ArchiveReader {
            data,
            trailer: TrailerRecord {
                entry_count,
                directory_size,
                directory_offset,
            },
        })
    }

    pub fn trailer(&self) -> &TrailerRecord {
        &self.trailer
    }

    pub fn records(&self) -> Records<'a> {
        let data = self.data;
        let start = self.trailer.directory_offset as usize;
        let end = start + self.trailer.directory_size as usize;

        Records {
            inner: &data[start..end],
            remaining: self.trailer.entry_count,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = Result<StoredEntry<'a>, ReadError>> + 'a {
        let data = self.data;
        self.records()
            .map(move |record| record.and_then(|record| resolve(data, record)))
    }
}

/// Directory records in the order they are stored.
pub struct Records<'a> {
    inner: &'a [u8],
    remaining: u16,
}

impl<'a> Records<'a> {
    fn read_record(&mut self) -> Result<DirectoryRecord, ReadError> {
        let mut rdr = self.inner;

        expect_signature(&mut rdr, DIRECTORY_SIGNATURE)?;
        let _made_by = rdr.read_u16::<LittleEndian>()?;
        let _needed = rdr.read_u16::<LittleEndian>()?;
        let flags = rdr.read_u16::<LittleEndian>()?;
        let method = rdr.read_u16::<LittleEndian>()?;
        let _time = rdr.read_u16::<LittleEndian>()?;
        let _date = rdr.read_u16::<LittleEndian>()?;
        let crc = rdr.read_u32::<LittleEndian>()?;
        let compressed_size = rdr.read_u32::<LittleEndian>()?;
        let size = rdr.read_u32::<LittleEndian>()?;
        let name_len = rdr.read_u16::<LittleEndian>()?;
        let extra_len = rdr.read_u16::<LittleEndian>()?;
        let comment_len = rdr.read_u16::<LittleEndian>()?;
        let _disk_start = rdr.read_u16::<LittleEndian>()?;
        let _internal = rdr.read_u16::<LittleEndian>()?;
        let _external = rdr.read_u32::<LittleEndian>()?;
        let local_offset = rdr.read_u32::<LittleEndian>()?;

        let name = read_name(&mut rdr, name_len)?;
        skip(&mut rdr, extra_len as usize + comment_len as usize)?;

        check_method(flags, method)?;
        self.inner = rdr;

        Ok(DirectoryRecord {
            name,
            crc,
            compressed_size,
            size,
            local_offset,
        })
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<DirectoryRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match self.read_record() {
            Ok(record) => {
                self.remaining -= 1;
                Some(Ok(record))
            }
            // The rest of the directory can't be trusted after a bad record
            Err(err) => {
                self.remaining = 0;
                Some(Err(err))
            }
        }
    }
}

fn resolve(data: &[u8], record: DirectoryRecord) -> Result<StoredEntry<'_>, ReadError> {
    let mut rdr = data
        .get(record.local_offset as usize..)
        .ok_or(ReadError::Truncated)?;

    expect_signature(&mut rdr, LOCAL_SIGNATURE)?;
    let _needed = rdr.read_u16::<LittleEndian>()?;
    let flags = rdr.read_u16::<LittleEndian>()?;
    let method = rdr.read_u16::<LittleEndian>()?;
    let _time = rdr.read_u16::<LittleEndian>()?;
    let _date = rdr.read_u16::<LittleEndian>()?;
    let crc = rdr.read_u32::<LittleEndian>()?;
    let compressed_size = rdr.read_u32::<LittleEndian>()?;
    let size = rdr.read_u32::<LittleEndian>()?;
    let name_len = rdr.read_u16::<LittleEndian>()?;
    let extra_len = rdr.read_u16::<LittleEndian>()?;

    check_method(flags, method)?;

    let name = rdr.get(..name_len as usize).ok_or(ReadError::Truncated)?;
    if name != record.name.as_bytes()
        || crc != record.crc
        || compressed_size != record.compressed_size
        || size != record.size
        || compressed_size != size
    {
        return Err(ReadError::HeaderMismatch(record.name));
    }
    skip(&mut rdr, name_len as usize + extra_len as usize)?;

    let content = rdr.get(..size as usize).ok_or(ReadError::Truncated)?;
    let found = checksum(content);
    if found != record.crc {
        return Err(ReadError::Checksum {
            name: record.name,
            expected: record.crc,
            found,
        });
    }

    Ok(StoredEntry {
        name: record.name,
        crc,
        content,
    })
}

// Scan backward for the trailer signature, past an archive comment if any
fn find_trailer(data: &[u8]) -> Option<usize> {
    let last = data.len().checked_sub(TRAILER_LEN)?;
    let first = last.saturating_sub(u16::MAX as usize);
    let magic = TRAILER_SIGNATURE.to_le_bytes();

    (first..=last).rev().find(|&at| {
        let comment_len = u16::from_le_bytes([data[at + 20], data[at + 21]]) as usize;
        data[at..at + 4] == magic && at + TRAILER_LEN + comment_len == data.len()
    })
}

fn expect_signature<R: Read>(rdr: &mut R, expected: u32) -> Result<(), ReadError> {
    let found = rdr.read_u32::<LittleEndian>()?;
    if found != expected {
        return Err(ReadError::Signature { expected, found });
    }
    Ok(())
}

fn check_method(flags: u16, method: u16) -> Result<(), ReadError> {
    if flags & FLAG_ENCRYPTED != 0 {
        return Err(ReadError::Encrypted);
    }
    if method != METHOD_STORE {
        return Err(ReadError::Unsupported(method));
    }
    Ok(())
}

fn read_name(rdr: &mut &[u8], len: u16) -> Result<String, ReadError> {
    let mut name = vec![0; len as usize];
    rdr.read_exact(&mut name)?;
    String::from_utf8(name).map_err(|_| ReadError::Utf8Name)
}

fn skip(rdr: &mut &[u8], len: usize) -> Result<(), ReadError> {
    *rdr = rdr.get(len..).ok_or(ReadError::Truncated)?;
    Ok(())
}
