use zcore::buf::LittleEndianWriter;

use crate::zip::{content_len, name_len, ArchiveEntry, ArchiveError};
use crate::zip::{DIRECTORY_SIGNATURE, METHOD_STORE, VERSION};

/// Directory record of one entry, pointing back at its local record.
#[derive(Debug, Clone)]
pub struct DirectoryHeader<'a> {
    name: &'a str,
    crc: u32,
    name_len: u16,
    size: u32,
    offset: u32,
}

impl<'a> DirectoryHeader<'a> {
    pub const FIXED_LEN: usize = 46;

    pub fn new(entry: &'a ArchiveEntry, crc: u32, offset: u32) -> Result<Self, ArchiveError> {
        Ok(DirectoryHeader {
            name: entry.name(),
            crc,
            name_len: name_len(entry.name())?,
            size: content_len(entry.name(), entry.content().len())?,
            offset,
        })
    }

    pub fn encoded_len(&self) -> usize {
        Self::FIXED_LEN + self.name.len()
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.put_u32_le(DIRECTORY_SIGNATURE);
        out.put_u16_le(VERSION); // made by
        out.put_u16_le(VERSION); // needed
        out.put_u16_le(0); // flags
        out.put_u16_le(METHOD_STORE);
        out.put_u16_le(0); // mod time
        out.put_u16_le(0); // mod date
        out.put_u32_le(self.crc);
        out.put_u32_le(self.size); // compressed
        out.put_u32_le(self.size); // uncompressed
        out.put_u16_le(self.name_len);
        out.put_u16_le(0); // extra
        out.put_u16_le(0); // comment
        out.put_u16_le(0); // disk number start
        out.put_u16_le(0); // internal attributes
        out.put_u32_le(0); // external attributes
        out.put_u32_le(self.offset);
        out.extend_from_slice(self.name.as_bytes());
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        out
    }
}
