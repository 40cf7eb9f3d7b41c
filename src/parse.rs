//! Folder-name parsing.
//!
//! osu! names each beatmap folder `"<sid> <artist> - <name>"`. Both the
//! artist and the title may themselves contain `" - "` or spaces, so the
//! name is split on the **last** `" - "` first, and the remaining head on
//! its **first** space.

use thiserror::Error;

use crate::models::Beatmap;

const TITLE_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing \" - \" separator in `{filename}`")]
    MissingSeparator { filename: String },

    #[error("empty beatmap id in `{filename}`")]
    EmptyId { filename: String },
}

/// Parse one directory-entry name into a [`Beatmap`].
///
/// Surrounding whitespace is trimmed from every field. A head without a
/// space is all id, with an empty artist.
pub fn parse_beatmap(filename: &str) -> Result<Beatmap, ParseError> {
    let (head, name) =
        filename
            .rsplit_once(TITLE_SEPARATOR)
            .ok_or_else(|| ParseError::MissingSeparator {
                filename: filename.to_string(),
            })?;

    let head = head.trim();
    let (sid, artist) = head.split_once(' ').unwrap_or((head, ""));

    let sid = sid.trim();
    if sid.is_empty() {
        return Err(ParseError::EmptyId {
            filename: filename.to_string(),
        });
    }

    Ok(Beatmap::new(sid, artist.trim(), name.trim()))
}
