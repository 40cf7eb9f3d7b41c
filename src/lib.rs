//! # Beatmap Index
//!
//! A local index over a directory of osu! beatmap folders.
//!
//! Each folder in the `Songs` directory is named
//! `"<sid> <artist> - <name>"`. The index parses those names (folder
//! contents are never read), keeps them sorted by title, and answers
//! keyword searches, field-scoped searches, and duplicate-sid checks.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ Songs/ dir   │──▶│   parse     │──▶│ BeatmapIndex │
//! │ (names only) │   │ name → rec  │   │ sort/filter  │
//! └──────────────┘   └─────────────┘   └──────┬───────┘
//!                                             │
//!                           ┌─────────────────┤
//!                           ▼                 ▼
//!                     ┌──────────┐      ┌──────────┐
//!                     │ commands │      │  shell   │
//!                     │ (bmi …)  │      │ (REPL)   │
//!                     └──────────┘      └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! bmi path ~/osu/Songs          # remember the library
//! bmi list                      # everything, sorted by title
//! bmi find flower               # keyword in sid, artist, or name
//! bmi find artist=okawari       # scoped to one field
//! bmi check                     # duplicated sids
//! bmi shell                     # interactive loop
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | The `Beatmap` record and name ordering |
//! | [`parse`] | Folder name parsing |
//! | [`criterion`] | Keyword and field filters |
//! | [`index`] | The in-memory index |
//! | [`config`] | TOML configuration |
//! | [`render`] | Table and JSON output |
//! | [`session`] | Config + index for one run |
//! | [`commands`] | One-shot subcommands |
//! | [`shell`] | Interactive command loop |

pub mod commands;
pub mod config;
pub mod criterion;
pub mod index;
pub mod models;
pub mod parse;
pub mod render;
pub mod session;
pub mod shell;

pub use criterion::{Criterion, CriterionError, Field};
pub use index::{BeatmapIndex, IndexOptions, InvalidPathPolicy, LoadReport};
pub use models::{Beatmap, NameOrder};
pub use parse::{parse_beatmap, ParseError};
