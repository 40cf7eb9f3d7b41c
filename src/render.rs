//! Result rendering.
//!
//! The index hands back plain lists of beatmaps; how they are shown is
//! chosen once at startup. Output goes to the writer the caller passes,
//! normally stdout.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::models::Beatmap;

const WIDTH_SID: usize = 8;
const WIDTH_ARTIST: usize = 42;

/// Renders a list of beatmaps.
pub trait Printer {
    fn print(&self, out: &mut dyn Write, beatmaps: &[&Beatmap]) -> io::Result<()>;
}

/// Fixed-width text table:
///
/// ```text
/// sid      | artist                                     | name
/// ------------------------------------------------------------
/// 123      | DJ Okawari                                 | Flower Dance
/// total: 1
/// ```
pub struct TablePrinter;

impl Printer for TablePrinter {
    fn print(&self, out: &mut dyn Write, beatmaps: &[&Beatmap]) -> io::Result<()> {
        writeln!(
            out,
            "{:<ws$} | {:<wa$} | name",
            "sid",
            "artist",
            ws = WIDTH_SID,
            wa = WIDTH_ARTIST
        )?;
        writeln!(out, "{}", "-".repeat(WIDTH_SID + WIDTH_ARTIST + 10))?;
        for b in beatmaps {
            writeln!(
                out,
                "{:<ws$} | {:<wa$.wa$} | {}",
                b.sid(),
                b.artist(),
                b.name(),
                ws = WIDTH_SID,
                wa = WIDTH_ARTIST
            )?;
        }
        writeln!(out, "total: {}", beatmaps.len())
    }
}

/// One pretty-printed JSON document per call.
pub struct JsonPrinter;

impl Printer for JsonPrinter {
    fn print(&self, out: &mut dyn Write, beatmaps: &[&Beatmap]) -> io::Result<()> {
        let doc = serde_json::json!({
            "total": beatmaps.len(),
            "beatmaps": beatmaps,
        });
        serde_json::to_writer_pretty(&mut *out, &doc)?;
        writeln!(out)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn printer(&self) -> Box<dyn Printer> {
        match self {
            OutputFormat::Table => Box::new(TablePrinter),
            OutputFormat::Json => Box::new(JsonPrinter),
        }
    }
}
