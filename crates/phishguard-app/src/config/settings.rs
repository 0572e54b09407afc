//! Settings loader and writer for `config.toml`, plus the on-disk locations
//! PhishGuard uses.

use super::types::Settings;
use phishguard_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "phishguard";
const STORE_DIR: &str = "store";

/// Overrides the directory holding `config.toml`
pub const CONFIG_DIR_ENV: &str = "PHISHGUARD_CONFIG_DIR";
/// Overrides the data directory (the key-value store lives under it)
pub const DATA_DIR_ENV: &str = "PHISHGUARD_DATA_DIR";
/// Overrides `server.base_url`
pub const SERVER_URL_ENV: &str = "PHISHGUARD_SERVER_URL";

// ─────────────────────────────────────────────────────────────────────────────
// Locations
// ─────────────────────────────────────────────────────────────────────────────

/// Directory containing `config.toml`
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Root data directory
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Directory of the key-value store (one JSON file per key)
pub fn store_dir() -> PathBuf {
    data_dir().join(STORE_DIR)
}

// ─────────────────────────────────────────────────────────────────────────────
// Load / Save
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `<dir>/config.toml`.
///
/// A missing file yields defaults. A malformed file is logged and also
/// yields defaults; settings never prevent startup.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply environment overrides on top of loaded settings
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        let url = url.trim();
        if !url.is_empty() {
            debug!("Server URL overridden by {}: {}", SERVER_URL_ENV, url);
            settings.server.base_url = url.to_string();
        }
    }
}

/// Load settings from the default location with env overrides applied
pub fn load_effective_settings() -> Settings {
    let mut settings = load_settings(&config_dir());
    apply_env_overrides(&mut settings);
    settings
}

/// Save settings to `<dir>/config.toml` atomically (temp file + rename)
pub fn save_settings(dir: &Path, settings: &Settings) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    let temp_path = dir.join(".config.toml.tmp");

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("{}{}", generate_config_header(), content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, &config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

fn generate_config_header() -> String {
    "# PhishGuard configuration\n\
     # [server] base_url, request_timeout_secs\n\
     # [history] max_entries (0 = unlimited)\n\
     # [behavior] auto_scan_clipboard, notifications, haptics, resume_delay_ms\n\
     # [ui] icons = \"unicode\" | \"nerd_fonts\"\n\n"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_load_malformed_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "this is [not toml").unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.behavior.notifications = false;
        settings.history.max_entries = 10;
        settings.server.base_url = "http://127.0.0.1:5000".into();

        save_settings(dir.path(), &settings).unwrap();

        let content = std::fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.starts_with("# PhishGuard configuration"));
        assert!(!dir.path().join(".config.toml.tmp").exists());
        assert_eq!(load_settings(dir.path()), settings);
    }

    #[test]
    fn test_save_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        save_settings(&nested, &Settings::default()).unwrap();
        assert!(nested.join(CONFIG_FILENAME).exists());
    }

    #[test]
    #[serial]
    fn test_server_url_env_override() {
        std::env::set_var(SERVER_URL_ENV, "http://localhost:9999");
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);
        std::env::remove_var(SERVER_URL_ENV);

        assert_eq!(settings.server.base_url, "http://localhost:9999");
    }

    #[test]
    #[serial]
    fn test_dir_env_overrides() {
        let dir = TempDir::new().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, dir.path());
        std::env::set_var(DATA_DIR_ENV, dir.path());

        assert_eq!(config_dir(), dir.path());
        assert_eq!(store_dir(), dir.path().join("store"));

        std::env::remove_var(CONFIG_DIR_ENV);
        std::env::remove_var(DATA_DIR_ENV);
    }
}
