use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Represents the complete configuration for version-bump-hooks.
///
/// Names the two sub-project folders whose manifests are bumped, the env
/// store file that carries the pending tag value between hook runs, and the
/// log settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub folders: FoldersConfig,

    #[serde(default = "default_store_path")]
    pub store_path: String,

    #[serde(default)]
    pub logs: LogConfig,
}

/// One sub-project: a repo-relative path prefix and its manifest file.
///
/// Provided by configuration and never mutated by the core.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FolderConfig {
    pub folder: String,
    pub path: String,
}

impl FolderConfig {
    /// File name of the manifest (e.g., "package.json"), used to filter
    /// manifest-only change sets.
    pub fn manifest_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// The two sub-projects combined into the composite deployment tag,
/// in back-then-web order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FoldersConfig {
    #[serde(default = "default_back_folder")]
    pub back: FolderConfig,

    #[serde(default = "default_web_folder")]
    pub web: FolderConfig,
}

fn default_back_folder() -> FolderConfig {
    FolderConfig {
        folder: "back/".to_string(),
        path: "back/package.json".to_string(),
    }
}

fn default_web_folder() -> FolderConfig {
    FolderConfig {
        folder: "web/".to_string(),
        path: "web/package.json".to_string(),
    }
}

impl Default for FoldersConfig {
    fn default() -> Self {
        FoldersConfig {
            back: default_back_folder(),
            web: default_web_folder(),
        }
    }
}

fn default_store_path() -> String {
    "build/.env".to_string()
}

/// Configuration for the log manager.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default)]
    pub clear_debug_log: bool,
}

fn default_log_dir() -> String {
    "build/logs".to_string()
}

fn default_max_entries() -> usize {
    500
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            dir: default_log_dir(),
            max_entries: default_max_entries(),
            clear_debug_log: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            folders: FoldersConfig::default(),
            store_path: default_store_path(),
            logs: LogConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `vbhooks.toml` in current directory
/// 3. `~/.config/.vbhooks.toml` in user config directory
/// 4. Default configuration if no file found
///
/// The `VBH_ENV_FILE`, `VBH_LOG_DIR` and `VBH_MAX_ENTRIES` environment
/// variables override the file values, matching the hook shims which may
/// run outside any shell profile.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        Some(fs::read_to_string(path)?)
    } else if Path::new("./vbhooks.toml").exists() {
        Some(fs::read_to_string("./vbhooks.toml")?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".vbhooks.toml");
        if config_path.exists() {
            Some(fs::read_to_string(config_path)?)
        } else {
            None
        }
    } else {
        None
    };

    let mut config: Config = match config_str {
        Some(s) => toml::from_str(&s)?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(store_path) = env::var("VBH_ENV_FILE") {
        config.store_path = store_path;
    }
    if let Ok(log_dir) = env::var("VBH_LOG_DIR") {
        config.logs.dir = log_dir;
    }
    if let Ok(max_entries) = env::var("VBH_MAX_ENTRIES") {
        if let Ok(n) = max_entries.parse::<usize>() {
            config.logs.max_entries = n;
        }
    }
}
