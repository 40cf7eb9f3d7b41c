//! # Beatmap Index CLI (`bmi`)
//!
//! ## Usage
//!
//! ```bash
//! bmi --config ./bmi.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bmi list` | List every beatmap, sorted by title |
//! | `bmi find <criterion>` | Keyword or `selector=keyword` search |
//! | `bmi check` | List beatmaps whose sid appears more than once |
//! | `bmi path [DIR]` | Show or save the library path |
//! | `bmi shell` | Interactive command loop |

use beatmap_index::render::OutputFormat;
use beatmap_index::session::Session;
use beatmap_index::{commands, shell};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Beatmap Index: list, search, and find duplicates in an osu! `Songs`
/// directory.
#[derive(Parser)]
#[command(
    name = "bmi",
    about = "Beatmap Index: list, search, and find duplicates in an osu! Songs directory",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Created on first `bmi path <DIR>`. A missing file means defaults.
    #[arg(long, global = true, default_value = "./bmi.toml")]
    config: PathBuf,

    /// Use this library directory for one run instead of the saved path.
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// Output format. Defaults to `[output].format` from the config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every beatmap, sorted by title.
    List,

    /// Search beatmaps.
    ///
    /// Words are matched case-insensitively against sid, artist, and name.
    /// Prefix with `sid=`, `artist=`, or `name=` to search one field.
    Find {
        /// Keyword, or `selector=keyword` pairs.
        criterion: Vec<String>,

        /// Field-scoped keyword as `selector=keyword`. Repeatable; all must match.
        #[arg(long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },

    /// List beatmaps whose sid appears more than once.
    Check {
        /// Show every member of each duplicate group, not one per sid.
        #[arg(long)]
        all: bool,
    },

    /// Show the saved library path, or save a new one.
    Path {
        /// New library directory (an osu! `Songs` folder).
        dir: Option<String>,
    },

    /// Start the interactive command loop.
    Shell,
}

/// Parse a `key=value` pair for `--field` arguments.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut session = Session::open(&cli.config, cli.path)?;
    let format = cli.format.unwrap_or(session.config().output.format);
    let printer = format.printer();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List => {
            commands::run_list(&session, printer.as_ref(), &mut out)?;
        }
        Commands::Find { criterion, fields } => {
            commands::run_find(&session, printer.as_ref(), &mut out, &criterion, &fields)?;
        }
        Commands::Check { all } => {
            commands::run_check(&session, printer.as_ref(), &mut out, all)?;
        }
        Commands::Path { dir } => {
            commands::run_path(&mut session, &mut out, dir.as_deref())?;
        }
        Commands::Shell => {
            let interactive = atty::is(atty::Stream::Stdin);
            let stdin = io::stdin();
            let mut input = stdin.lock();
            shell::run_shell(
                &mut session,
                printer.as_ref(),
                &mut input,
                &mut out,
                interactive,
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
