//! Deck - Markdown slide presentations in the terminal.
//!
//! # Usage
//!
//! ```bash
//! deck talk.md
//! deck --theme light talk.md
//! cat talk.md | deck
//! deck            # built-in tutorial
//! ```

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use deck::app::App;
use deck::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use deck::logging;
use deck::version::VersionInfo;

const TUTORIAL: &str = include_str!("tutorial.md");

/// Present markdown slide decks in the terminal
#[derive(Parser, Debug)]
#[command(name = "deck", about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Markdown deck to present (defaults to stdin, then the tutorial)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,

    /// Color theme (auto follows the deck, then the terminal)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Do not reload the deck when the file changes
    #[arg(long)]
    no_watch: bool,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Where the deck text came from.
enum Source {
    Stdin(String),
    File(PathBuf, String),
    Tutorial,
}

impl Source {
    fn load(file: Option<PathBuf>) -> Result<Self> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            let mut text = String::new();
            stdin
                .lock()
                .read_to_string(&mut text)
                .context("Failed to read deck from stdin")?;
            return Ok(Self::Stdin(text));
        }
        if let Some(path) = file {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Ok(Self::File(path, text));
        }
        Ok(Self::Tutorial)
    }
}

fn main() -> Result<()> {
    let version = VersionInfo::current();
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    if cli.version {
        println!("deck {}", version.info());
        return Ok(());
    }

    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    logging::init(effective.debug_log.as_deref())?;
    tracing::debug!(version = version.short(), ?effective, "starting");

    let app = match Source::load(cli.file)? {
        Source::Stdin(text) => App::new(text),
        Source::File(path, text) => {
            let watch = (!effective.no_watch).then_some(path);
            App::new(text).with_watch(watch)
        }
        Source::Tutorial => App::new(TUTORIAL),
    };

    app.with_theme(effective.theme.and_then(ThemeMode::theme))
        .run()
        .context("Application error")
}
