use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Console configuration, loaded from `~/.config/botdesk/console.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub downloads: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How many of the most recent history records the default (no-query)
    /// view shows.
    pub history_window: usize,
    /// Result-size bound for local search.
    pub search_limit: usize,
    /// Default target language for summaries and translations.
    pub target_lang: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            history_window: 200,
            search_limit: 50,
            target_lang: "Chinese".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DownloadConfig {
    /// Where translated files are saved; defaults to `~/Downloads`.
    pub dir: Option<PathBuf>,
}

impl ConsoleConfig {
    pub fn downloads_dir(&self) -> PathBuf {
        if let Some(dir) = &self.downloads.dir {
            return dir.clone();
        }
        home_dir().join("Downloads")
    }
}

// ── File I/O ────────────────────────────────────────────────────────────

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("botdesk"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("console.toml"))
}

/// Load config from the default path, falling back to defaults when the file
/// is missing or malformed.
pub fn load() -> ConsoleConfig {
    match config_path() {
        Ok(path) => load_from(&path),
        Err(_) => ConsoleConfig::default(),
    }
}

pub fn load_from(path: &Path) -> ConsoleConfig {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| toml::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn save_to(config: &ConsoleConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_file_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_from(&dir.path().join("console.toml"));
        assert_eq!(config.server.url, "http://127.0.0.1:8000");
        assert_eq!(config.server.timeout_secs, 15);
        assert_eq!(config.ui.history_window, 200);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("console.toml");
        std::fs::write(&path, "[server]\nurl = \"http://bot.example:9000\"\n").expect("write");
        let config = load_from(&path);
        assert_eq!(config.server.url, "http://bot.example:9000");
        assert_eq!(config.server.timeout_secs, 15);
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("console.toml");
        let mut config = ConsoleConfig::default();
        config.ui.search_limit = 25;
        config.ui.target_lang = "English".to_string();
        save_to(&config, &path).expect("save");
        let loaded = load_from(&path);
        assert_eq!(loaded.ui.search_limit, 25);
        assert_eq!(loaded.ui.target_lang, "English");
    }
}
