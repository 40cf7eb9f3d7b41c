//! Core data models used throughout the beatmap index.
//!
//! A [`Beatmap`] is the record parsed from one folder name in the osu!
//! `Songs` directory. It is immutable once built; the lowercase forms of
//! the free-text fields are cached at construction so that repeated
//! case-insensitive searches do not re-fold every record.

use serde::{Deserialize, Serialize, Serializer};
use std::cmp;
use std::hash::{Hash, Hasher};

/// One beatmap entry: `"<sid> <artist> - <name>"`.
///
/// Equality and hashing consider `sid` only, which is what duplicate
/// detection groups by. Ordering is not intrinsic; see [`NameOrder`].
#[derive(Debug, Clone)]
pub struct Beatmap {
    sid: String,
    artist: String,
    name: String,
    sid_lower: String,
    artist_lower: String,
    name_lower: String,
}

impl Beatmap {
    pub fn new(
        sid: impl Into<String>,
        artist: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let sid = sid.into();
        let artist = artist.into();
        let name = name.into();
        Self {
            sid_lower: sid.to_lowercase(),
            artist_lower: artist.to_lowercase(),
            name_lower: name.to_lowercase(),
            sid,
            artist,
            name,
        }
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sid_lower(&self) -> &str {
        &self.sid_lower
    }

    pub fn artist_lower(&self) -> &str {
        &self.artist_lower
    }

    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    /// Whether `keyword` occurs in any field, ignoring case.
    ///
    /// An empty keyword matches every beatmap.
    pub fn contains(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.contains_lowered(&keyword)
    }

    /// Same as [`contains`](Self::contains) for a keyword that is already
    /// lowercase.
    pub(crate) fn contains_lowered(&self, keyword: &str) -> bool {
        self.sid_lower.contains(keyword)
            || self.artist_lower.contains(keyword)
            || self.name_lower.contains(keyword)
    }
}

impl PartialEq for Beatmap {
    fn eq(&self, other: &Self) -> bool {
        self.sid == other.sid
    }
}

impl Eq for Beatmap {}

impl Hash for Beatmap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sid.hash(state);
    }
}

impl Serialize for Beatmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Row<'a> {
            sid: &'a str,
            artist: &'a str,
            name: &'a str,
        }

        Row {
            sid: &self.sid,
            artist: &self.artist,
            name: &self.name,
        }
        .serialize(serializer)
    }
}

/// How beatmaps are sorted after a load. Only `name` takes part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameOrder {
    /// Plain byte-wise comparison of `name`.
    #[default]
    CaseSensitive,
    /// Compare the lowercase forms of `name`.
    CaseInsensitive,
}

impl NameOrder {
    pub fn compare(&self, a: &Beatmap, b: &Beatmap) -> cmp::Ordering {
        match self {
            NameOrder::CaseSensitive => a.name.cmp(&b.name),
            NameOrder::CaseInsensitive => a.name_lower.cmp(&b.name_lower),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_uses_sid_only() {
        let a = Beatmap::new("1", "A", "X");
        let b = Beatmap::new("1", "B", "Y");
        let c = Beatmap::new("2", "A", "X");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<&Beatmap> = [&a, &b, &c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn contains_is_case_insensitive_across_fields() {
        let b = Beatmap::new("123", "DJ Okawari", "Flower Dance");
        assert!(b.contains("okawari"));
        assert!(b.contains("FLOWER"));
        assert!(b.contains("23"));
        assert!(b.contains(""));
        assert!(!b.contains("piano"));
    }

    #[test]
    fn ordering_policies_differ_on_case() {
        let upper = Beatmap::new("1", "a", "Zebra");
        let lower = Beatmap::new("2", "a", "apple");
        assert_eq!(
            NameOrder::CaseSensitive.compare(&upper, &lower),
            cmp::Ordering::Less
        );
        assert_eq!(
            NameOrder::CaseInsensitive.compare(&upper, &lower),
            cmp::Ordering::Greater
        );
    }

    #[test]
    fn serializes_public_fields_only() {
        let b = Beatmap::new("45", "X", "Y");
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sid": "45", "artist": "X", "name": "Y" })
        );
    }
}
