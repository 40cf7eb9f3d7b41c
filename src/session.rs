//! One run of the tool: the config file it was started with and the index
//! built from the configured library path.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::index::{BeatmapIndex, LoadReport};

pub struct Session {
    config_path: PathBuf,
    config: Config,
    path_override: Option<PathBuf>,
    index: BeatmapIndex,
}

impl Session {
    /// Load the config at `config_path` and index the library.
    ///
    /// `path_override` replaces the configured library path for this
    /// session only; it is never written back.
    pub fn open(config_path: &Path, path_override: Option<PathBuf>) -> Result<Self> {
        let config = config::load_config(config_path)?;
        let mut session = Self {
            config_path: config_path.to_path_buf(),
            index: BeatmapIndex::new(config.index_options()),
            config,
            path_override,
        };
        session.reindex();
        Ok(session)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn index(&self) -> &BeatmapIndex {
        &self.index
    }

    pub fn library_path(&self) -> Option<&Path> {
        self.path_override
            .as_deref()
            .or_else(|| self.config.library_path())
    }

    /// Re-read the config file and rescan the library.
    ///
    /// The index is reused, so an unreadable library is handled by the
    /// configured [`InvalidPathPolicy`](crate::index::InvalidPathPolicy).
    pub fn flush(&mut self) -> Result<Option<LoadReport>> {
        self.config = config::load_config(&self.config_path)?;
        self.index.set_options(self.config.index_options());
        Ok(self.reindex())
    }

    /// Persist a new library path and reindex from it.
    pub fn set_library_path(&mut self, path: &str) -> Result<Option<LoadReport>> {
        let mut config = config::load_config(&self.config_path)?;
        config.set_library_path(path)?;
        config::save_config(&self.config_path, &config)?;
        tracing::info!(
            path = ?config.library_path(),
            config = %self.config_path.display(),
            "library path saved"
        );
        self.path_override = None;
        self.flush()
    }

    fn reindex(&mut self) -> Option<LoadReport> {
        let path = self.library_path()?.to_path_buf();
        Some(self.index.load(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn library(names: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in names {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        tmp
    }

    #[test]
    fn open_without_path_is_empty() {
        let tmp = TempDir::new().unwrap();
        let session = Session::open(&tmp.path().join("bmi.toml"), None).unwrap();
        assert!(session.library_path().is_none());
        assert!(!session.index().is_loaded());
    }

    #[test]
    fn override_is_indexed_but_not_saved() {
        let tmp = TempDir::new().unwrap();
        let songs = library(&["1 A - One"]);
        let cfg_path = tmp.path().join("bmi.toml");

        let session = Session::open(&cfg_path, Some(songs.path().to_path_buf())).unwrap();
        assert_eq!(session.index().len(), 1);
        assert!(!cfg_path.exists());
    }

    #[test]
    fn set_library_path_persists_and_reindexes() {
        let tmp = TempDir::new().unwrap();
        let songs = library(&["1 A - One", "2 B - Two"]);
        let cfg_path = tmp.path().join("bmi.toml");

        let mut session = Session::open(&cfg_path, None).unwrap();
        let report = session
            .set_library_path(songs.path().to_str().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(report.loaded, 2);

        let reopened = Session::open(&cfg_path, None).unwrap();
        assert_eq!(reopened.library_path(), Some(songs.path()));
        assert_eq!(reopened.index().len(), 2);
    }

    #[test]
    fn set_library_path_rejects_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let cfg_path = tmp.path().join("bmi.toml");
        let mut session = Session::open(&cfg_path, None).unwrap();
        assert!(session
            .set_library_path(tmp.path().join("missing").to_str().unwrap())
            .is_err());
        assert!(!cfg_path.exists());
    }

    fn write_policy(cfg_path: &Path, policy: &str) {
        fs::write(cfg_path, format!("[index]\non_invalid_path = \"{}\"\n", policy)).unwrap();
    }

    #[test]
    fn flush_keeps_previous_when_library_disappears() {
        let tmp = TempDir::new().unwrap();
        let songs = tmp.path().join("Songs");
        fs::create_dir(&songs).unwrap();
        fs::create_dir(songs.join("1 A - One")).unwrap();
        let cfg_path = tmp.path().join("bmi.toml");
        write_policy(&cfg_path, "keep-previous");

        let mut session = Session::open(&cfg_path, Some(songs.clone())).unwrap();
        assert_eq!(session.index().len(), 1);

        fs::rename(&songs, tmp.path().join("Moved")).unwrap();
        let report = session.flush().unwrap().unwrap();
        assert!(!report.scanned);
        assert_eq!(session.index().len(), 1);
        assert!(session.index().is_loaded());
    }

    #[test]
    fn flush_clears_when_library_disappears_under_clear() {
        let tmp = TempDir::new().unwrap();
        let songs = tmp.path().join("Songs");
        fs::create_dir(&songs).unwrap();
        fs::create_dir(songs.join("1 A - One")).unwrap();
        let cfg_path = tmp.path().join("bmi.toml");
        write_policy(&cfg_path, "clear");

        let mut session = Session::open(&cfg_path, Some(songs.clone())).unwrap();
        assert_eq!(session.index().len(), 1);

        fs::rename(&songs, tmp.path().join("Moved")).unwrap();
        let report = session.flush().unwrap().unwrap();
        assert!(!report.scanned);
        assert!(session.index().is_empty());
        assert!(!session.index().is_loaded());
    }

    #[test]
    fn flush_applies_reloaded_ordering() {
        let tmp = TempDir::new().unwrap();
        let songs = library(&["1 A - banana", "2 B - Zed", "3 C - apple"]);
        let cfg_path = tmp.path().join("bmi.toml");
        let mut session = Session::open(&cfg_path, Some(songs.path().to_path_buf())).unwrap();
        assert_eq!(session.index().beatmaps()[0].name(), "Zed");

        fs::write(&cfg_path, "[index]\nordering = \"case-insensitive\"\n").unwrap();
        session.flush().unwrap();
        let names: Vec<&str> = session.index().beatmaps().iter().map(|b| b.name()).collect();
        assert_eq!(names, ["apple", "banana", "Zed"]);
    }

    #[test]
    fn flush_picks_up_new_entries() {
        let tmp = TempDir::new().unwrap();
        let songs = library(&["1 A - One"]);
        let mut session =
            Session::open(&tmp.path().join("bmi.toml"), Some(songs.path().to_path_buf())).unwrap();
        assert_eq!(session.index().len(), 1);

        fs::create_dir(songs.path().join("2 B - Two")).unwrap();
        session.flush().unwrap();
        assert_eq!(session.index().len(), 2);
    }
}
