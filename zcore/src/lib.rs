//! Shared primitives for the archive writer: the CRC-32 checksum used by the
//! ZIP format and little endian integer packing.
pub mod buf;
pub mod crc;
