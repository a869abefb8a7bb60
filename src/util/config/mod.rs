//! User configuration
//!
//! Supports a user-level config file with merge semantics.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high -> low):
//! 1. CLI arguments
//! 2. User-level (~/.config/mysticvm/config.toml)
//! 3. Default values
//! ```
//!
//! # Usage
//!
//! ```rust
//! use mysticvm::util::config::load_user_config;
//!
//! let config = load_user_config().unwrap();
//! assert!(config.solver.parallel);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::vm::{VMConfig, DEFAULT_STEP_LIMIT};

/// User-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Machine settings
    #[serde(default)]
    pub vm: VmSection,
    /// Batch solver settings
    #[serde(default)]
    pub solver: SolverSection,
}

/// Machine configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmSection {
    /// Instruction ceiling per run
    #[serde(default = "default_step_limit")]
    pub step_limit: u64,
    /// Log every executed instruction
    #[serde(default)]
    pub trace: bool,
}

fn default_step_limit() -> u64 {
    DEFAULT_STEP_LIMIT
}

impl Default for VmSection {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            trace: false,
        }
    }
}

impl VmSection {
    /// Machine configuration carrying these settings
    pub fn to_vm_config(&self) -> VMConfig {
        VMConfig {
            step_limit: self.step_limit,
            trace: self.trace,
        }
    }
}

/// Batch solver configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSection {
    /// Solve cases of a batch in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for SolverSection {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("mysticvm"));
    }

    // Fallback to ~/.config/mysticvm
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("mysticvm"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("mysticvm"));
    }

    None
}

/// Get the user config file path (~/.config/mysticvm/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Check if user config exists
pub fn config_exists() -> bool {
    get_config_path().map(|p| p.exists()).unwrap_or(false)
}

/// Load user-level configuration
/// Returns default config if file doesn't exist
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    let path = match get_config_path() {
        Some(p) => p,
        None => return Ok(UserConfig::default()),
    };

    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Save user-level configuration
pub fn save_user_config(config: &UserConfig) -> Result<(), ConfigError> {
    let dir = get_config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    // Create directory if not exists
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(ConfigError::IoError)?;
    }

    let content = toml::to_string_pretty(config).map_err(ConfigError::SerializeError)?;
    fs::write(&path, content).map_err(ConfigError::IoError)?;

    Ok(())
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(toml::de::Error),
    SerializeError(toml::ser::Error),
    NoConfigDir,
}

impl std::fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Config serialize error: {}", e),
            ConfigError::NoConfigDir => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for ConfigError {}
