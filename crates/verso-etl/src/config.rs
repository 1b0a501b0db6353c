use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use verso_core::text::TokenizerKind;

/// Configuration for verso.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (VERSO_* prefix)
/// 3. Config file (~/.config/verso/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the library file (a JSON array of songs).
    ///
    /// Can be set via:
    /// - CLI: --library /path/to/library.json
    /// - ENV: VERSO_LIBRARY_PATH
    /// - Config: library_path = "/path/to/library.json"
    /// - Default: ~/.local/share/verso/library.json
    #[serde(default = "default_library_path")]
    pub library_path: PathBuf,

    /// Path to the style dictionary (`.json` or `.toml`).
    ///
    /// Can be set via:
    /// - CLI: --styles /path/to/styles.json
    /// - ENV: VERSO_STYLE_DICT_PATH
    /// - Config: style_dict_path = "/path/to/styles.json"
    /// - Default: ~/.config/verso/styles.json
    #[serde(default = "default_style_dict_path")]
    pub style_dict_path: PathBuf,

    /// Word segmentation: "jieba" (default) or "unicode".
    #[serde(default)]
    pub tokenizer: TokenizerKind,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: default_library_path(),
            style_dict_path: default_style_dict_path(),
            tokenizer: TokenizerKind::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// The `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_coloured")]
    pub coloured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            coloured: default_coloured(),
        }
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn level(&self) -> &str {
        &self.level
    }

    #[must_use]
    pub fn coloured(&self) -> bool {
        self.coloured
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/verso/config.toml
    /// Reads environment variables with VERSO_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file plus the environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .with_context(|| format!("Failed to load config file {}", config_path.display()))?;
        }

        let env_opts = env::Options::with_top_level("verso");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration, then apply CLI overrides.
    pub fn load_with_overrides(library: Option<PathBuf>, styles: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(library, styles);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, library: Option<PathBuf>, styles: Option<PathBuf>) {
        if let Some(library) = library {
            self.library_path = library;
        }
        if let Some(styles) = styles {
            self.style_dict_path = styles;
        }
    }
}

/// Get the default library path.
///
/// Returns: ~/.local/share/verso/library.json (or platform equivalent)
fn default_library_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verso")
        .join("library.json")
}

fn default_style_dict_path() -> PathBuf {
    config_dir().join("styles.json")
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_coloured() -> bool {
    true
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verso")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/verso/config.toml
/// - macOS: ~/Library/Application Support/verso/config.toml
/// - Windows: %APPDATA%\verso\config.toml
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Verso Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (VERSO_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the song library (JSON array of songs)
#
# Can also be set via:
# - CLI: verso --library /custom/library.json list
# - Environment: VERSO_LIBRARY_PATH=/custom/library.json
#
# Default: Platform-specific data directory
#library_path = "/path/to/library.json"

# Path to the style dictionary
#
# JSON:  {"中国风": ["江南", "烟雨"], "摇滚": ["呐喊", "自由"]}
# TOML:  中国风 = ["江南", "烟雨"]
#
# Styles are scored in the order they are declared.
#
# Can also be set via:
# - CLI: verso --styles /custom/styles.toml classify
# - Environment: VERSO_STYLE_DICT_PATH=/custom/styles.toml
#style_dict_path = "/path/to/styles.json"

# Word segmentation: "jieba" for Chinese lyrics, "unicode" for
# whitespace-delimited languages
tokenizer = "jieba"

[logging]
# trace, debug, info, warn, or error
level = "info"
coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;
    log::info!("Created config file at {}", config_path.display());

    Ok(true)
}
