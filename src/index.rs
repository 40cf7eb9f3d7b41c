//! In-memory beatmap index built from one directory listing.
//!
//! The index only reads entry **names**; folder contents are never opened.
//! Every [`load`](BeatmapIndex::load) rebuilds the index from scratch.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::criterion::Criterion;
use crate::models::{Beatmap, NameOrder};
use crate::parse::parse_beatmap;

/// What a load against a missing or unreadable directory does to the
/// beatmaps already indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidPathPolicy {
    #[default]
    KeepPrevious,
    Clear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
    pub order: NameOrder,
    pub on_invalid_path: InvalidPathPolicy,
}

/// Outcome of a single [`BeatmapIndex::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Beatmaps now in the index.
    pub loaded: usize,
    /// Entries that could not be read, were not UTF-8, or did not parse.
    pub skipped: usize,
    /// False when the path was not a readable directory.
    pub scanned: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BeatmapIndex {
    options: IndexOptions,
    beatmaps: Vec<Beatmap>,
    loaded: bool,
}

impl BeatmapIndex {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            options,
            beatmaps: Vec::new(),
            loaded: false,
        }
    }

    pub fn options(&self) -> IndexOptions {
        self.options
    }

    /// Replace the options used by later loads. Already indexed beatmaps
    /// are kept as they are until the next [`load`](Self::load).
    pub fn set_options(&mut self, options: IndexOptions) {
        self.options = options;
    }

    /// Whether a scan has succeeded since construction (or since a
    /// [`InvalidPathPolicy::Clear`] reset).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Rebuild the index from the direct children of `path`.
    ///
    /// Never fails: a path that is not a readable directory is handled per
    /// [`InvalidPathPolicy`], and unparsable names are logged and skipped.
    pub fn load(&mut self, path: &Path) -> LoadReport {
        let Some(listing) = list_entries(path) else {
            tracing::warn!(path = %path.display(), "beatmap directory is not readable");
            if self.options.on_invalid_path == InvalidPathPolicy::Clear {
                self.beatmaps.clear();
                self.loaded = false;
            }
            return LoadReport {
                loaded: self.beatmaps.len(),
                skipped: 0,
                scanned: false,
            };
        };

        let mut beatmaps = Vec::with_capacity(listing.names.len());
        let mut skipped = listing.dropped;
        for name in listing.names {
            match parse_beatmap(&name) {
                Ok(beatmap) => beatmaps.push(beatmap),
                Err(e) => {
                    tracing::warn!("skipping entry: {}", e);
                    skipped += 1;
                }
            }
        }

        let order = self.options.order;
        beatmaps.sort_by(|a, b| order.compare(a, b));

        tracing::debug!(
            path = %path.display(),
            loaded = beatmaps.len(),
            skipped,
            "beatmap index rebuilt"
        );

        self.beatmaps = beatmaps;
        self.loaded = true;
        LoadReport {
            loaded: self.beatmaps.len(),
            skipped,
            scanned: true,
        }
    }

    pub fn beatmaps(&self) -> &[Beatmap] {
        &self.beatmaps
    }

    pub fn len(&self) -> usize {
        self.beatmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beatmaps.is_empty()
    }

    /// Beatmaps matching `criterion`, in index order.
    pub fn filter(&self, criterion: &Criterion) -> Vec<&Beatmap> {
        self.beatmaps
            .iter()
            .filter(|b| criterion.matches(b))
            .collect()
    }

    /// One beatmap per sid that occurs more than once.
    ///
    /// The representative is the first occurrence in index order, and the
    /// groups come out in the order their first member was seen.
    pub fn check(&self) -> Vec<&Beatmap> {
        self.duplicate_groups()
            .into_iter()
            .filter_map(|group| group.into_iter().next())
            .collect()
    }

    /// Every member of each duplicated sid, grouped, in first-seen order.
    pub fn duplicate_groups(&self) -> Vec<Vec<&Beatmap>> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<Vec<&Beatmap>> = Vec::new();
        for b in &self.beatmaps {
            let pos = *positions.entry(b.sid()).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[pos].push(b);
        }
        groups.retain(|group| group.len() > 1);
        groups
    }
}

struct Listing {
    names: Vec<String>,
    /// Entries that could not be read or whose names are not UTF-8.
    dropped: usize,
}

/// Names of the direct children of `path` in file-name order, or `None`
/// when `path` is not a readable directory.
fn list_entries(path: &Path) -> Option<Listing> {
    if !path.is_dir() {
        return None;
    }

    let mut names = Vec::new();
    let mut dropped = 0;
    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself failing means nothing could be listed.
            Err(e) if e.depth() == 0 => {
                tracing::warn!("cannot read {}: {}", path.display(), e);
                return None;
            }
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                dropped += 1;
                continue;
            }
        };
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => {
                tracing::warn!(
                    "skipping entry with non-UTF-8 name: {}",
                    entry.path().display()
                );
                dropped += 1;
            }
        }
    }
    Some(Listing { names, dropped })
}
