// Reflected form of the CRC-32 polynomial 0x04C11DB7
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Byte-at-a-time lookup table, built once at compile time.
pub static TABLE: [u32; 256] = make_table();

const fn make_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8 {
            c = if c & 1 == 1 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }

        table[n] = c;
        n += 1;
    }
    table
}

// Make the checksum api be similiar to blake3's
#[derive(Clone, Debug)]
pub struct Checksum(u32);

impl Checksum {
    pub fn new() -> Checksum {
        Checksum(0xFFFF_FFFF)
    }

    pub fn update(&mut self, data: &[u8]) {
        let mut acc = self.0;
        for &b in data {
            let idx = ((acc ^ b as u32) & 0xFF) as usize;
            acc = TABLE[idx] ^ (acc >> 8);
        }
        self.0 = acc;
    }

    pub fn finalize(self) -> u32 {
        self.0 ^ 0xFFFF_FFFF
    }
}

impl Default for Checksum {
    fn default() -> Self {
        Checksum::new()
    }
}

/// CRC-32 of `data`, as stored in the ZIP local and central directory records.
pub fn checksum(data: &[u8]) -> u32 {
    let mut hash = Checksum::new();
    hash.update(data);
    hash.finalize()
}
