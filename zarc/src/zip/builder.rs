use log::{debug, trace};

use zcore::crc::checksum;

use crate::zip::directory::DirectoryHeader;
use crate::zip::local::LocalHeader;
use crate::zip::trailer::Trailer;
use crate::zip::{offset_u32, ArchiveEntry, ArchiveError};

/// Lay out `entries` as local records, then directory records, then the trailer.
///
/// All records are derived in one pass before anything is written, so a limit
/// violation anywhere fails the whole call.
pub fn assemble(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let entry_count =
        u16::try_from(entries.len()).map_err(|_| ArchiveError::TooManyEntries(entries.len()))?;

    let mut locals = Vec::with_capacity(entries.len());
    let mut directories = Vec::with_capacity(entries.len());

    // Byte position of the next local record
    let mut offset: u64 = 0;

    for entry in entries {
        let crc = checksum(entry.content());
        let local = LocalHeader::new(entry, crc)?;
        let directory = DirectoryHeader::new(entry, crc, offset_u32(offset)?)?;

        debug!(
            "entry {:?}: {} bytes, crc {:08x}, at {}",
            entry.name(),
            entry.content().len(),
            crc,
            offset
        );

        offset += local.encoded_len() as u64;
        locals.push(local);
        directories.push(directory);
    }

    let directory_offset = offset_u32(offset)?;
    let directory_size = offset_u32(directories.iter().map(|d| d.encoded_len() as u64).sum())?;
    let trailer = Trailer::new(entry_count, directory_size, directory_offset);

    trace!(
        "directory: {} records, {} bytes, at {}",
        entry_count,
        directory_size,
        directory_offset
    );

    let total = offset + directory_size as u64 + Trailer::LEN as u64;
    let mut out = Vec::with_capacity(usize::try_from(total).map_err(|_| ArchiveError::ArchiveTooLarge)?);

    for local in locals.iter() {
        local.write_to(&mut out);
    }
    for directory in directories.iter() {
        directory.write_to(&mut out);
    }
    trailer.write_to(&mut out);

    debug!("archive: {} entries, {} bytes", entry_count, out.len());
    Ok(out)
}

#[cfg(test)]
mod test_assemble {
    use super::*;
    use crate::zip::reader::ArchiveReader;

    fn theme_entries() -> Vec<ArchiveEntry> {
        vec![
            ArchiveEntry::new("theme.json", r#"{"a":1}"#),
            ArchiveEntry::new("fonts.txt", "Nunito"),
        ]
    }

    fn local_len(entry: &ArchiveEntry) -> usize {
        LocalHeader::FIXED_LEN + entry.name().len() + entry.content().len()
    }

    fn directory_len(entry: &ArchiveEntry) -> usize {
        DirectoryHeader::FIXED_LEN + entry.name().len()
    }

    #[test]
    fn empty_archive() {
        let buf = assemble(&[]).unwrap();

        assert_eq!(buf.len(), 22);
        assert_eq!(buf, Trailer::new(0, 0, 0).build());

        let reader = ArchiveReader::new(&buf).unwrap();
        assert_eq!(reader.trailer().entry_count, 0);
        assert!(reader.entries().next().is_none());
    }

    #[test]
    fn theme_bundle() {
        let entries = theme_entries();
        let buf = assemble(&entries).unwrap();

        let reader = ArchiveReader::new(&buf).unwrap();
        let stored: Vec<_> = reader.entries().collect::<Result<_, _>>().unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].name, "theme.json");
        assert_eq!(stored[0].content, br#"{"a":1}"#);
        assert_eq!(stored[1].name, "fonts.txt");
        assert_eq!(stored[1].content, b"Nunito");
    }

    #[test]
    fn concatenation_of_records() {
        let entries = theme_entries();
        let buf = assemble(&entries).unwrap();

        let mut expect = Vec::new();
        let mut offset = 0u32;
        let mut dirs = Vec::new();
        for entry in entries.iter() {
            let crc = checksum(entry.content());
            let local = LocalHeader::new(entry, crc).unwrap().build();
            dirs.extend(DirectoryHeader::new(entry, crc, offset).unwrap().build());
            offset += local.len() as u32;
            expect.extend(local);
        }
        let dir_size = dirs.len() as u32;
        expect.extend(dirs);
        expect.extend(Trailer::new(2, dir_size, offset).build());

        assert_eq!(buf, expect);
    }

    #[test]
    fn offsets_and_trailer() {
        let entries = vec![
            ArchiveEntry::new("theme.json", r#"{"name":"dark"}"#),
            ArchiveEntry::new("fonts.txt", "Nunito\nRoboto"),
            ArchiveEntry::new("logo.png", vec![0x89, b'P', b'N', b'G', 0, 0xFF]),
            ArchiveEntry::new("palette.json", Vec::<u8>::new()),
        ];
        let buf = assemble(&entries).unwrap();
        let reader = ArchiveReader::new(&buf).unwrap();

        let records: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
        let mut expected_offset = 0;
        for (record, entry) in records.iter().zip(entries.iter()) {
            assert_eq!(record.name, entry.name());
            assert_eq!(record.local_offset as usize, expected_offset);
            assert_eq!(record.crc, checksum(entry.content()));
            expected_offset += local_len(entry);
        }

        let trailer = reader.trailer();
        assert_eq!(trailer.entry_count as usize, entries.len());
        assert_eq!(trailer.directory_offset as usize, expected_offset);
        assert_eq!(
            trailer.directory_size as usize,
            entries.iter().map(directory_len).sum::<usize>()
        );
        assert_eq!(buf.len(), expected_offset + trailer.directory_size as usize + 22);
    }

    #[test]
    fn checksum_consistency() {
        let entries = theme_entries();
        let buf = assemble(&entries).unwrap();
        let reader = ArchiveReader::new(&buf).unwrap();

        for record in reader.records() {
            let record = record.unwrap();
            let at = record.local_offset as usize;
            let local_crc = u32::from_le_bytes([buf[at + 14], buf[at + 15], buf[at + 16], buf[at + 17]]);

            assert_eq!(local_crc, record.crc);
        }
    }

    #[test]
    fn deterministic() {
        let entries = theme_entries();

        assert_eq!(assemble(&entries).unwrap(), assemble(&entries).unwrap());
    }

    #[test]
    fn order_is_preserved() {
        let mut entries = theme_entries();
        entries.reverse();
        let buf = assemble(&entries).unwrap();

        let reader = ArchiveReader::new(&buf).unwrap();
        let names: Vec<String> = reader.records().map(|r| r.unwrap().name).collect();
        assert_eq!(names, vec!["fonts.txt", "theme.json"]);
    }

    #[test]
    fn multi_byte_names_round_trip() {
        let entries = vec![
            ArchiveEntry::new("тема.json", "{}"),
            ArchiveEntry::new("日本語.txt", "こんにちは"),
        ];
        let buf = assemble(&entries).unwrap();
        let reader = ArchiveReader::new(&buf).unwrap();

        let stored: Vec<_> = reader.entries().collect::<Result<_, _>>().unwrap();
        assert_eq!(stored[0].name, "тема.json");
        assert_eq!(stored[1].name, "日本語.txt");
        assert_eq!(stored[1].content, "こんにちは".as_bytes());

        // Name length field holds the byte count, 3 characters of 3 bytes plus ".txt"
        let at = 30 + "тема.json".len() + 2;
        assert_eq!(&buf[(at + 26)..(at + 28)], &13u16.to_le_bytes());
    }

    #[test]
    fn too_many_entries() {
        let entries = vec![ArchiveEntry::new("", Vec::<u8>::new()); 65_536];

        assert_eq!(assemble(&entries).unwrap_err(), ArchiveError::TooManyEntries(65_536));
    }

    #[test]
    fn max_entries() {
        let entries: Vec<_> = (0..65_535u32)
            .map(|i| ArchiveEntry::new(i.to_string(), Vec::<u8>::new()))
            .collect();
        let buf = assemble(&entries).unwrap();

        let reader = ArchiveReader::new(&buf).unwrap();
        assert_eq!(reader.trailer().entry_count, u16::MAX);
    }

    #[test]
    fn name_too_long_fails_whole_archive() {
        let entries = vec![
            ArchiveEntry::new("theme.json", "{}"),
            ArchiveEntry::new("a".repeat(65_536), "x"),
        ];

        assert_eq!(assemble(&entries).unwrap_err(), ArchiveError::NameTooLong(65_536));
    }
}
