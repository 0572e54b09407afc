//! Configuration for PhishGuard
//!
//! - `config.toml` in the config directory - global settings
//! - Environment overrides for server URL and directories

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, config_dir, data_dir, load_effective_settings, load_settings,
    save_settings, store_dir, CONFIG_DIR_ENV, DATA_DIR_ENV, SERVER_URL_ENV,
};
pub use types::*;
