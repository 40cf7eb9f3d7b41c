use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::index::{IndexOptions, InvalidPathPolicy};
use crate::models::NameOrder;
use crate::render::OutputFormat;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LibraryConfig {
    /// The osu! `Songs` directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct IndexConfig {
    #[serde(default)]
    pub ordering: NameOrder,
    #[serde(default)]
    pub on_invalid_path: InvalidPathPolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            order: self.index.ordering,
            on_invalid_path: self.index.on_invalid_path,
        }
    }

    pub fn library_path(&self) -> Option<&Path> {
        self.library.path.as_deref()
    }

    /// Point the library at `path`, which must be an existing directory.
    /// A blank path unsets it.
    pub fn set_library_path(&mut self, path: &str) -> Result<()> {
        let path = path.trim();
        if path.is_empty() {
            self.library.path = None;
            return Ok(());
        }

        let path = PathBuf::from(path);
        if !path.is_dir() {
            bail!("invalid path: `{}` is not a directory", path.display());
        }
        self.library.path = Some(path);
        Ok(())
    }
}

/// Read the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config(&tmp.path().join("bmi.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.library_path().is_none());
        assert_eq!(cfg.index_options(), IndexOptions::default());
    }

    #[test]
    fn parses_all_sections() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bmi.toml");
        std::fs::write(
            &path,
            r#"
[library]
path = "/games/osu/Songs"

[index]
ordering = "case-insensitive"
on_invalid_path = "clear"

[output]
format = "json"
"#,
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.library_path(), Some(Path::new("/games/osu/Songs")));
        assert_eq!(cfg.index.ordering, NameOrder::CaseInsensitive);
        assert_eq!(cfg.index.on_invalid_path, InvalidPathPolicy::Clear);
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bmi.toml");
        std::fs::write(&path, "[index]\nordering = \"sideways\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bmi.toml"));
    }

    #[test]
    fn save_then_load_keeps_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("bmi.toml");
        let mut cfg = Config::default();
        cfg.set_library_path(tmp.path().to_str().unwrap()).unwrap();
        save_config(&path, &cfg).unwrap();

        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn set_library_path_rejects_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = Config::default();
        let missing = tmp.path().join("nope");
        assert!(cfg.set_library_path(missing.to_str().unwrap()).is_err());
        assert!(cfg.library_path().is_none());

        cfg.set_library_path(tmp.path().to_str().unwrap()).unwrap();
        cfg.set_library_path("   ").unwrap();
        assert!(cfg.library_path().is_none());
    }
}
