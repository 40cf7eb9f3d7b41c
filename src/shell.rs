//! Interactive command loop (`bmi shell`).
//!
//! Reads one command per line:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `check` | Reindex, then list one beatmap per duplicated sid |
//! | `exit` | Leave the loop (end of input does the same) |
//! | `find [criterion]` | Filter; asks for a keyword when none is given |
//! | `flush` | Re-read the config and reindex |
//! | `list` | List every indexed beatmap |
//! | `path [dir]` | Change the saved library path; asks when none is given |

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::criterion::Criterion;
use crate::render::Printer;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Check,
    Exit,
    Find(Option<String>),
    Flush,
    List,
    Path(Option<String>),
}

const COMMAND_MENU: &str = "- check | exit | find [condition=]<keyword> | flush | list | path";

impl Command {
    /// Parse one input line. `None` for blank lines and unknown commands.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (key, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match key.to_lowercase().as_str() {
            "check" => Some(Command::Check),
            "exit" => Some(Command::Exit),
            "find" => Some(Command::Find(arg)),
            "flush" => Some(Command::Flush),
            "list" => Some(Command::List),
            "path" => Some(Command::Path(arg)),
            _ => None,
        }
    }
}

/// Run the loop until `exit` or end of input.
///
/// With `interactive` set, the current path and command menu are printed
/// before every command.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    printer: &dyn Printer,
    input: &mut R,
    out: &mut W,
    interactive: bool,
) -> Result<()> {
    loop {
        if interactive {
            write_prompt(session, out)?;
        }
        let Some(line) = read_line(input)? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = Command::parse(&line) else {
            writeln!(out, "unknown command: `{}`", line.trim())?;
            continue;
        };
        if command == Command::Exit {
            break;
        }
        if let Err(e) = execute(session, printer, command, input, out, interactive) {
            writeln!(out, "error: {:#}", e)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn execute<R: BufRead, W: Write>(
    session: &mut Session,
    printer: &dyn Printer,
    command: Command,
    input: &mut R,
    out: &mut W,
    interactive: bool,
) -> Result<()> {
    match command {
        Command::Check => {
            session.flush()?;
            printer.print(out, &session.index().check())?;
        }
        Command::Find(arg) => {
            let text = match arg {
                Some(text) => text,
                None => {
                    if interactive {
                        writeln!(out, "keyword:")?;
                    }
                    read_line(input)?.unwrap_or_default()
                }
            };
            let criterion = Criterion::parse(&text);
            printer.print(out, &session.index().filter(&criterion))?;
        }
        Command::Flush => {
            session.flush()?;
        }
        Command::List => {
            let all: Vec<_> = session.index().beatmaps().iter().collect();
            printer.print(out, &all)?;
        }
        Command::Path(arg) => {
            let dir = match arg {
                Some(dir) => dir,
                None => {
                    if interactive {
                        writeln!(out, "switch to (enter `q` to cancel):")?;
                    }
                    match read_line(input)? {
                        Some(dir) if !dir.trim().eq_ignore_ascii_case("q") => dir,
                        _ => return Ok(()),
                    }
                }
            };
            session.set_library_path(&dir)?;
        }
        Command::Exit => {}
    }
    Ok(())
}

fn write_prompt<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let path = session
        .library_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unset>".to_string());
    writeln!(out, "path: {} ({})", path, session.index().len())?;
    writeln!(out, "command:")?;
    writeln!(out, "{}", COMMAND_MENU)?;
    write!(out, ">>> ")?;
    out.flush()?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
