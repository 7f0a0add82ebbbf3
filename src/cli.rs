use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::error::AppError;
use crate::theme::ThemeConfig;

#[derive(Parser)]
#[command(name = "themezip")]
#[command(about = "Bundle a dashboard theme into a downloadable zip archive")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Packs the configured theme into an archive
    Pack {
        /// Where to write the archive, otherwise a timestamped name is used
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Lists the entries of an archive
    List {
        /// The archive to read
        archive: PathBuf,
    },
}

// Used when no config file is given
pub const DEFAULT_CONFIG: &str = r##"
[theme]
name = "Default"
fonts = ["Nunito"]
palette = ["#ffffff", "#f4f5f7", "#1b1b1b", "#3b82f6"]

[theme.colors]
background = "#ffffff"
text = "#1b1b1b"
primary = "#3b82f6"
"##;

#[derive(Deserialize, Debug)]
pub struct Config {
    pub output: Option<PathBuf>,

    pub theme: ThemeConfig,
}

impl Config {
    /// Load the config and the directory its relative paths resolve against.
    pub fn load(path: Option<&Path>) -> Result<(Config, PathBuf), AppError> {
        match path {
            None => Ok((toml::from_str(DEFAULT_CONFIG)?, PathBuf::from("."))),
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| AppError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                })?;
                let base = match path.parent() {
                    Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                    _ => PathBuf::from("."),
                };

                Ok((toml::from_str(&content)?, base))
            }
        }
    }
}

#[cfg(test)]
mod test_cli {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_pack() {
        let cli = Cli::try_parse_from(["themezip", "-c", "theme.toml", "pack", "-o", "out.zip"]).unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("theme.toml")));
        match cli.command {
            Commands::Pack { output } => assert_eq!(output, Some(PathBuf::from("out.zip"))),
            _ => panic!("expected pack"),
        }
    }

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["themezip", "list", "theme.zip"]).unwrap();

        assert!(cli.config.is_none());
        match cli.command {
            Commands::List { archive } => assert_eq!(archive, PathBuf::from("theme.zip")),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn command_required() {
        assert!(Cli::try_parse_from(["themezip"]).is_err());
    }
}
