pub mod zip;

pub use crate::zip::reader::{ArchiveReader, DirectoryRecord, ReadError, StoredEntry, TrailerRecord};
pub use crate::zip::{ArchiveEntry, ArchiveError};

/// Package `entries`, in order, into a store-only ZIP archive held in memory.
///
/// The result is either a complete archive or an [`ArchiveError`] naming the
/// format limit that was exceeded, never a partially written buffer.
pub fn create_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    zip::builder::assemble(entries)
}
