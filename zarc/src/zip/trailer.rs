use zcore::buf::LittleEndianWriter;

use crate::zip::TRAILER_SIGNATURE;

// End of central directory record, always single disk and without a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    entry_count: u16,
    directory_size: u32,
    directory_offset: u32,
}

impl Trailer {
    pub const LEN: usize = 22;

    pub fn new(entry_count: u16, directory_size: u32, directory_offset: u32) -> Self {
        Trailer {
            entry_count,
            directory_size,
            directory_offset,
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.put_u32_le(TRAILER_SIGNATURE);
        out.put_u16_le(0); // disk number
        out.put_u16_le(0); // disk with the directory
        out.put_u16_le(self.entry_count); // on this disk
        out.put_u16_le(self.entry_count); // total
        out.put_u32_le(self.directory_size);
        out.put_u32_le(self.directory_offset);
        out.put_u16_le(0); // comment
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        self.write_to(&mut out);
        out
    }
}
