//! Saved default flags.
//!
//! A config file is a list of command-line flags, whitespace separated,
//! with `#` starting a comment line. Flags from the global file and a local
//! `.deckrc` are merged, then the real command line is applied on top.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::render::Theme;

const APP_DIR: &str = "deck";
const CONFIG_FILE: &str = "config";
const LOCAL_FILE: &str = ".deckrc";

/// `--theme` values.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    /// Follow the deck's frontmatter, then the terminal
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    /// The forced theme, or `None` to detect from the terminal.
    pub const fn theme(self) -> Option<Theme> {
        match self {
            Self::Auto => None,
            Self::Light => Some(Theme::Light),
            Self::Dark => Some(Theme::Dark),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        [Self::Auto, Self::Light, Self::Dark]
            .into_iter()
            .find(|mode| mode.as_str() == value)
    }
}

/// Flags that can be saved as defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_watch: bool,
    pub theme: Option<ThemeMode>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Layer `other` over `self`. Switches stay on once set anywhere; valued
    /// flags from `other` replace those in `self`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_watch: self.no_watch || other.no_watch,
            theme: other.theme.or(self.theme),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.no_watch {
            lines.push("--no-watch".to_string());
        }
        if let Some(theme) = self.theme {
            lines.push(format!("--theme {}", theme.as_str()));
        }
        if let Some(log) = &self.debug_log {
            lines.push(format!("--debug-log {}", log.display()));
        }
        lines
    }
}

/// Per-user config file location.
///
/// Falls back to the local override file when no home directory is known.
pub fn global_config_path() -> PathBuf {
    let env = |key: &str| std::env::var_os(key).map(PathBuf::from);

    let base = if cfg!(target_os = "windows") {
        env("APPDATA")
    } else if cfg!(target_os = "macos") {
        env("HOME").map(|home| home.join("Library").join("Application Support"))
    } else {
        env("XDG_CONFIG_HOME").or_else(|| env("HOME").map(|home| home.join(".config")))
    };

    base.map_or_else(
        || PathBuf::from(LOCAL_FILE),
        |dir| dir.join(APP_DIR).join(CONFIG_FILE),
    )
}

/// Config file in the working directory, layered over the global one.
pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read flags from `path`; a missing file yields no flags.
///
/// # Errors
/// Fails when the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens: Vec<String> = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(String::from)
        .collect();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories.
///
/// # Errors
/// Fails when the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir {}", dir.display()))?;
    }
    let mut content = String::from("# deck defaults, written by --save\n");
    for line in flags.to_lines() {
        content.push_str(&line);
        content.push('\n');
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved default flags");
    Ok(())
}

/// Delete the config file at `path` if there is one.
///
/// # Errors
/// Fails when an existing file cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
        tracing::info!(path = %path.display(), "cleared default flags");
    }
    Ok(())
}

/// Pick the saveable flags out of a token list.
///
/// Accepts `--flag value` and `--flag=value`. Unknown tokens, including the
/// program name and positional arguments, are skipped. An unknown theme
/// name leaves the theme unset.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut tokens = tokens.iter().map(String::as_str);

    while let Some(token) = tokens.next() {
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        match name {
            "--no-watch" if inline.is_none() => flags.no_watch = true,
            "--theme" => {
                if let Some(value) = inline.or_else(|| tokens.next()) {
                    flags.theme = ThemeMode::parse(value);
                }
            }
            "--debug-log" => {
                if let Some(value) = inline.or_else(|| tokens.next()) {
                    flags.debug_log = Some(PathBuf::from(value));
                }
            }
            _ => {}
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "deck",
            "--no-watch",
            "--theme",
            "dark",
            "--debug-log=deck.log",
            "talk.md",
        ]));
        assert!(flags.no_watch);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.debug_log, Some(PathBuf::from("deck.log")));
    }

    #[test]
    fn test_unknown_theme_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--theme", "neon"]));
        assert_eq!(flags.theme, None);
    }

    #[test]
    fn test_trailing_valued_flag_is_ignored() {
        assert_eq!(parse_flag_tokens(&tokens(&["--debug-log"])), ConfigFlags::default());
    }

    #[test]
    fn test_theme_mode_maps_to_theme() {
        assert_eq!(ThemeMode::Auto.theme(), None);
        assert_eq!(ThemeMode::Light.theme(), Some(Theme::Light));
        assert_eq!(ThemeMode::Dark.theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_union_prefers_later_values() {
        let base = ConfigFlags {
            no_watch: true,
            theme: Some(ThemeMode::Light),
            debug_log: None,
        };
        let top = ConfigFlags {
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = base.union(&top);
        assert!(merged.no_watch);
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(LOCAL_FILE);
        let flags = ConfigFlags {
            no_watch: true,
            theme: Some(ThemeMode::Light),
            debug_log: Some(PathBuf::from("deck.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
