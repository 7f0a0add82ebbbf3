use byteorder::{ByteOrder, LittleEndian};

/// Append-only little endian packing for the fixed size record fields.
pub trait LittleEndianWriter {
    fn put_u16_le(&mut self, v: u16);

    // Low half-word first, then the high half-word
    fn put_u32_le(&mut self, v: u32) {
        self.put_u16_le((v & 0xFFFF) as u16);
        self.put_u16_le((v >> 16) as u16);
    }
}

impl LittleEndianWriter for Vec<u8> {
    fn put_u16_le(&mut self, v: u16) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, v);
        self.extend_from_slice(&buf);
    }
}
