//! Filter criteria for [`BeatmapIndex::filter`](crate::index::BeatmapIndex::filter).
//!
//! A criterion is either a free-text keyword matched against every field,
//! or a set of `selector=keyword` pairs each matched against one field.
//! All matching ignores case; keywords are folded once when the criterion
//! is built.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::Beatmap;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriterionError {
    #[error("unknown field selector `{0}` (expected sid, artist, or name)")]
    UnknownField(String),
}

/// A single beatmap field a criterion can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Sid,
    Artist,
    Name,
}

impl Field {
    fn value_lower<'a>(&self, beatmap: &'a Beatmap) -> &'a str {
        match self {
            Field::Sid => beatmap.sid_lower(),
            Field::Artist => beatmap.artist_lower(),
            Field::Name => beatmap.name_lower(),
        }
    }
}

impl FromStr for Field {
    type Err = CriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sid" | "id" => Ok(Field::Sid),
            "artist" | "creator" => Ok(Field::Artist),
            "name" | "title" => Ok(Field::Name),
            _ => Err(CriterionError::UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Sid => "sid",
            Field::Artist => "artist",
            Field::Name => "name",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    All,
    Keyword(String),
    Fields(Vec<(Field, String)>),
}

/// What to keep when filtering an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    kind: Kind,
}

impl Criterion {
    /// The identity filter.
    pub fn all() -> Self {
        Self { kind: Kind::All }
    }

    /// Match `keyword` against sid, artist, and name. An empty keyword is
    /// the identity filter.
    pub fn keyword(keyword: &str) -> Self {
        if keyword.is_empty() {
            return Self::all();
        }
        Self {
            kind: Kind::Keyword(keyword.to_lowercase()),
        }
    }

    /// Build a field-scoped criterion from `(selector, keyword)` pairs.
    ///
    /// Every pair must hold for a beatmap to match. A selector given twice
    /// keeps its last keyword. No pairs at all is the identity filter.
    pub fn from_fields<I, K, V>(pairs: I) -> Result<Self, CriterionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut fields: Vec<(Field, String)> = Vec::new();
        for (key, value) in pairs {
            let field: Field = key.as_ref().parse()?;
            let value = value.as_ref().to_lowercase();
            match fields.iter_mut().find(|(f, _)| *f == field) {
                Some(existing) => existing.1 = value,
                None => fields.push((field, value)),
            }
        }

        if fields.is_empty() {
            return Ok(Self::all());
        }
        Ok(Self {
            kind: Kind::Fields(fields),
        })
    }

    /// Parse the interactive `[<selector>=]<keyword>` syntax.
    ///
    /// `artist=DJ Okawari name=flower` is field-scoped; words that do not
    /// start a new `selector=` pair extend the previous keyword. When the
    /// input does not begin with a known selector it is taken whole as a
    /// keyword, so `a=b` searches for the literal text `a=b`.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let mut pairs: Vec<(Field, &str)> = Vec::new();
        // Field whose value is still open, and the byte offset it starts at.
        let mut open: Option<(Field, usize)> = None;

        for (start, word) in words(input) {
            let Some((field, value)) = split_selector(word) else {
                if open.is_none() {
                    return Self::keyword(input);
                }
                continue;
            };
            if let Some((prev, from)) = open.take() {
                pairs.push((prev, input[from..start].trim()));
            }
            open = Some((field, start + word.len() - value.len()));
        }
        if let Some((field, from)) = open {
            pairs.push((field, input[from..].trim()));
        }

        // Selectors already parsed, so this only dedups and folds case.
        Self::from_fields(pairs.iter().map(|(f, v)| (f.to_string(), *v)))
            .unwrap_or_else(|_| Self::keyword(input))
    }

    pub fn is_all(&self) -> bool {
        matches!(self.kind, Kind::All)
    }

    pub fn matches(&self, beatmap: &Beatmap) -> bool {
        match &self.kind {
            Kind::All => true,
            Kind::Keyword(keyword) => beatmap.contains_lowered(keyword),
            Kind::Fields(fields) => fields
                .iter()
                .all(|(field, keyword)| field.value_lower(beatmap).contains(keyword.as_str())),
        }
    }
}

impl Default for Criterion {
    fn default() -> Self {
        Self::all()
    }
}

/// Whitespace-separated words of `input` with their byte offsets.
fn words(input: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in input.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &input[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &input[s..]));
    }
    out
}

fn split_selector(word: &str) -> Option<(Field, &str)> {
    let (key, value) = word.split_once('=')?;
    let field = key.parse().ok()?;
    Some((field, value))
}
