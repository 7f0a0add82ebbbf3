use zcore::buf::LittleEndianWriter;

use crate::zip::{content_len, name_len, ArchiveEntry, ArchiveError};
use crate::zip::{LOCAL_SIGNATURE, METHOD_STORE, VERSION};

/// Local record of one entry: the 30 byte header, the name, then the content.
#[derive(Debug, Clone)]
pub struct LocalHeader<'a> {
    name: &'a str,
    content: &'a [u8],
    crc: u32,
    name_len: u16,
    size: u32,
}

impl<'a> LocalHeader<'a> {
    pub const FIXED_LEN: usize = 30;

    pub fn new(entry: &'a ArchiveEntry, crc: u32) -> Result<Self, ArchiveError> {
        Ok(LocalHeader {
            name: entry.name(),
            content: entry.content(),
            crc,
            name_len: name_len(entry.name())?,
            size: content_len(entry.name(), entry.content().len())?,
        })
    }

    pub fn encoded_len(&self) -> usize {
        Self::FIXED_LEN + self.name.len() + self.content.len()
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.put_u32_le(LOCAL_SIGNATURE);
        out.put_u16_le(VERSION);
        out.put_u16_le(0); // flags
        out.put_u16_le(METHOD_STORE);
        out.put_u16_le(0); // mod time
        out.put_u16_le(0); // mod date
        out.put_u32_le(self.crc);
        out.put_u32_le(self.size); // compressed
        out.put_u32_le(self.size); // uncompressed
        out.put_u16_le(self.name_len);
        out.put_u16_le(0); // extra
        out.extend_from_slice(self.name.as_bytes());
        out.extend_from_slice(self.content);
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        out
    }
}
