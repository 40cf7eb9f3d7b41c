//! One-shot subcommands: `list`, `find`, `check`, and `path`.
//!
//! Each runner takes an open [`Session`] and writes its result through the
//! selected [`Printer`].

use anyhow::{bail, Result};
use std::io::Write;

use crate::criterion::Criterion;
use crate::render::Printer;
use crate::session::Session;

fn require_library(session: &Session) -> Result<()> {
    if session.library_path().is_none() {
        bail!(
            "No beatmap library configured in {}. Run `bmi path <DIR>` or pass --path.",
            session.config_path().display()
        );
    }
    Ok(())
}

pub fn run_list(session: &Session, printer: &dyn Printer, out: &mut dyn Write) -> Result<()> {
    require_library(session)?;
    let all: Vec<_> = session.index().beatmaps().iter().collect();
    printer.print(out, &all)?;
    Ok(())
}

/// Filter by free text words or by explicit `selector=keyword` fields.
///
/// `fields`, when non-empty, takes precedence and any unknown selector in
/// it is an error. Otherwise `words` are joined and parsed with the shell
/// syntax.
pub fn run_find(
    session: &Session,
    printer: &dyn Printer,
    out: &mut dyn Write,
    words: &[String],
    fields: &[(String, String)],
) -> Result<()> {
    require_library(session)?;

    let criterion = if fields.is_empty() {
        Criterion::parse(&words.join(" "))
    } else {
        if !words.is_empty() {
            bail!("Pass either a keyword or --field selectors, not both.");
        }
        Criterion::from_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))?
    };

    printer.print(out, &session.index().filter(&criterion))?;
    Ok(())
}

/// Report duplicated sids: one row per sid, or every member with `all`.
pub fn run_check(
    session: &Session,
    printer: &dyn Printer,
    out: &mut dyn Write,
    all: bool,
) -> Result<()> {
    require_library(session)?;

    let index = session.index();
    let rows: Vec<_> = if all {
        index.duplicate_groups().into_iter().flatten().collect()
    } else {
        index.check()
    };
    printer.print(out, &rows)?;
    Ok(())
}

/// Show the library path, or save a new one when `dir` is given.
pub fn run_path(session: &mut Session, out: &mut dyn Write, dir: Option<&str>) -> Result<()> {
    if let Some(dir) = dir {
        let report = session.set_library_path(dir)?;
        if let Some(report) = report {
            writeln!(
                out,
                "path saved: {} ({} beatmaps, {} skipped)",
                dir.trim(),
                report.loaded,
                report.skipped
            )?;
            return Ok(());
        }
    }

    match session.library_path() {
        Some(path) => writeln!(out, "path: {} ({})", path.display(), session.index().len())?,
        None => writeln!(out, "path: <unset>")?,
    }
    Ok(())
}
