use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use time::macros::format_description;
use time::OffsetDateTime;

use zarc::ArchiveReader;

use crate::cli::Config;
use crate::error::AppError;
use crate::theme;

pub fn default_output() -> Result<PathBuf, AppError> {
    let now = OffsetDateTime::now_utc();
    let name = now.format(format_description!(
        "theme-[year][month][day]T[hour][minute][second].zip"
    ))?;

    Ok(PathBuf::from(name))
}

/// Gather the theme, build the archive and write it out, returning where it went.
pub fn pack(config: &Config, base: &Path, output: Option<&Path>) -> Result<PathBuf, AppError> {
    let path = match (output, &config.output) {
        (Some(output), _) => output.to_path_buf(),
        (None, Some(output)) => base.join(output),
        (None, None) => default_output()?,
    };

    let entries = theme::gather(&config.theme, base)?;
    let archive = zarc::create_archive(&entries)?;

    fs::write(&path, &archive).map_err(|source| AppError::WriteFile {
        path: path.clone(),
        source,
    })?;

    info!(
        "packed theme {:?}: {} entries, {} bytes into {}",
        config.theme.name,
        entries.len(),
        archive.len(),
        path.display()
    );
    Ok(path)
}

/// Print one `crc size name` line per entry, verifying each entry's checksum.
pub fn list<W: Write>(archive: &Path, out: &mut W) -> Result<(), AppError> {
    let data = fs::read(archive).map_err(|source| AppError::ReadFile {
        path: archive.to_path_buf(),
        source,
    })?;
    let reader = ArchiveReader::new(&data)?;

    for entry in reader.entries() {
        let entry = entry?;
        writeln!(out, "{:08x} {:>10} {}", entry.crc, entry.content.len(), entry.name)?;
    }
    Ok(())
}
