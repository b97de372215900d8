//! Feed configuration: export root, listen port, merge mappings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use config::{Config, File};
use serde::Deserialize;

use crate::error::{FeedError, FeedResult};

static DEFAULT_EXPORT_DIR: &str = "export";
const DEFAULT_PORT: u16 = 8422;

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Feed configuration at ./coursecal.toml (or `$COURSECAL_CONFIG`).
///
/// Loaded once at startup and passed into the server as an immutable
/// object. The merge tables map a virtual calendar name to an ordered
/// list of source calendar names; earlier sources win when events share
/// a UID. A virtual name shadows an export of the same name.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Directory the exporter writes into, relative to the working
    /// directory unless absolute. `~` is expanded.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub merge: BTreeMap<String, Vec<String>>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            export_dir: default_export_dir(),
            port: default_port(),
            merge: BTreeMap::new(),
        }
    }
}

impl FeedConfig {
    pub fn config_path() -> PathBuf {
        std::env::var_os("COURSECAL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("coursecal.toml"))
    }

    /// Load the config file, falling back to defaults when it is absent.
    pub fn load() -> FeedResult<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(path: PathBuf) -> FeedResult<Self> {
        let config: FeedConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| FeedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FeedError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Export root with `~` expanded.
    pub fn export_root(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.export_dir.to_string_lossy()).into_owned();

        PathBuf::from(expanded)
    }

    /// Source calendars for a virtual name, if one is configured.
    pub fn merge_sources(&self, name: &str) -> Option<&[String]> {
        self.merge.get(name).map(|sources| sources.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FeedConfig::load_from(dir.path().join("nope.toml")).unwrap();

        assert_eq!(config.export_dir, PathBuf::from("export"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.merge.is_empty());
    }

    #[test]
    fn test_merge_tables_parse_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coursecal.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "export_dir = \"/srv/export\"\n\
             port = 9000\n\n\
             [merge]\n\
             ALL = [\"TIETOTEKNIIKKA\", \"MATEMATIIKKA\"]\n"
        )
        .unwrap();

        let config = FeedConfig::load_from(path).unwrap();

        assert_eq!(config.export_dir, PathBuf::from("/srv/export"));
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.merge_sources("ALL"),
            Some(&["TIETOTEKNIIKKA".to_string(), "MATEMATIIKKA".to_string()][..])
        );
        assert_eq!(config.merge_sources("OTHER"), None);
    }
}
