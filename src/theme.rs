use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use zarc::{ArchiveEntry, ArchiveError};

use crate::error::AppError;

pub const DESCRIPTION_NAME: &str = "theme.json";
pub const FONTS_NAME: &str = "fonts.txt";
pub const PALETTE_NAME: &str = "palette.json";

#[derive(Deserialize, Debug, Clone)]
pub struct ThemeConfig {
    pub name: String,

    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub fonts: Vec<String>,
    #[serde(default)]
    pub palette: Vec<String>,

    pub image: Option<PathBuf>,

    #[serde(default)]
    pub extra: Vec<ExtraFile>,
}

// Any other asset to ship alongside the theme
#[derive(Deserialize, Debug, Clone)]
pub struct ExtraFile {
    /// Name inside the archive, defaults to the file name
    pub name: Option<String>,
    pub path: PathBuf,
}

#[derive(Serialize)]
struct Description<'a> {
    name: &'a str,
    colors: &'a BTreeMap<String, String>,
}

/// Collect the theme description, font list, palette, image and extra files
/// in the order they go into the archive.
pub fn gather(theme: &ThemeConfig, base: &Path) -> Result<Vec<ArchiveEntry>, AppError> {
    let mut entries = Vec::new();

    let description = serde_json::to_vec_pretty(&Description {
        name: &theme.name,
        colors: &theme.colors,
    })?;
    entries.push(ArchiveEntry::new(DESCRIPTION_NAME, description));
    entries.push(ArchiveEntry::new(FONTS_NAME, theme.fonts.join("\n")));
    entries.push(ArchiveEntry::new(PALETTE_NAME, serde_json::to_vec_pretty(&theme.palette)?));

    if let Some(image) = &theme.image {
        entries.push(read_asset(base, image, None)?);
    }
    for extra in theme.extra.iter() {
        entries.push(read_asset(base, &extra.path, extra.name.as_deref())?);
    }

    let mut seen = HashSet::new();
    for entry in entries.iter() {
        if !seen.insert(entry.name()) {
            return Err(AppError::DuplicateName(entry.name().to_string()));
        }
    }

    Ok(entries)
}

fn read_asset(base: &Path, path: &Path, name: Option<&str>) -> Result<ArchiveEntry, AppError> {
    let path = base.join(path);
    let content = fs::read(&path).map_err(|source| AppError::ReadFile {
        path: path.clone(),
        source,
    })?;

    let name = match name {
        Some(name) => name.to_string(),
        None => {
            let file_name = path
                .file_name()
                .ok_or_else(|| AppError::NoFileName(path.clone()))?;

            file_name
                .to_str()
                .ok_or_else(|| ArchiveError::NameEncoding(file_name.to_string_lossy().into_owned()))?
                .to_string()
        }
    };

    debug!("asset {:?} from {}: {} bytes", name, path.display(), content.len());
    Ok(ArchiveEntry::new(name, content))
}
