//! Emotion Jar: a terminal journaling jar.
//!
//! Write down what weighs on you, watch it crumple and land in the jar, then
//! unfold it again as a first-person affirmation paired with a real quotation.
//! Saved notes stay in the jar; they can be browsed or drawn at random.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← stdin/stdout loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Session: timers and transformation tasks         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Gateway       │
//! │ (ui/)         │   │ (storage/)    │   │ (gateway/)    │
//! │ - Rendering   │   │ - JSON slot   │   │ - HTTP client │
//! │ - Theming     │   │ - Note store  │   │ - Fallbacks   │
//! │ - Commands    │   │ - Backend API │   │ - Pacing      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Paths, pacing, randomness (infrastructure/)      │
//! │  - Error types, Note model (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing-subscriber → rotating log file           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Settings are read from a TOML file, by default `<data_dir>/config.toml`.
//! Every key is optional:
//!
//! ```toml
//! data_dir = "~/.local/share/emotion-jar"
//! api_key = "..."            # GEMINI_API_KEY or API_KEY take precedence
//! model = "gemini-2.5-flash"
//! temperature = 0.8
//! request_timeout_ms = 30000
//! theme = "night"
//! trace_level = "debug"
//!
//! [pacing]
//! crumple_ms = 1500
//! throw_ms = 1000
//! transform_floor_ms = 2600
//! ```
//!
//! # Example
//!
//! ```rust
//! use emotion_jar::{initialize, Config, Event, Screen};
//!
//! let dir = tempfile::tempdir()?;
//! let config = Config {
//!     data_dir: Some(dir.path().display().to_string()),
//!     ..Default::default()
//! };
//!
//! let mut session = initialize(&config)?;
//! session.dispatch(Event::OpenInput)?;
//! assert_eq!(session.screen(), Screen::Input);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Screen, Session};
pub use domain::{JarError, Note, Result, Transformation};
pub use ui::Theme;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gateway::{
    FallbackPool, GeminiRewriter, GeminiSettings, TransformationGateway, DEFAULT_ENDPOINT,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::infrastructure::{expand_tilde, get_data_dir, Pacing, SystemRandom};
use crate::storage::{JsonFileStorage, NoteStore};

/// Environment variables checked for the API credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding notes, logs and the default config file.
    ///
    /// `~` expands to the home directory. Default: see
    /// [`get_data_dir`](crate::infrastructure::get_data_dir).
    pub data_dir: Option<String>,

    /// Credential for the rewrite service. Without one every transformation
    /// uses the fallback pool.
    pub api_key: Option<String>,

    pub model: String,

    /// Base URL of the generative-language API.
    pub endpoint: String,

    pub temperature: f64,

    pub request_timeout_ms: u64,

    pub pacing: PacingConfig,

    /// Built-in theme name: `mint` or `night`. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Log filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

/// Durations of the timed phases, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub crumple_ms: u64,
    pub throw_ms: u64,
    pub transform_floor_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            crumple_ms: 1500,
            throw_ms: 1000,
            transform_floor_ms: 2600,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout_ms: 30_000,
            pacing: PacingConfig::default(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads configuration from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`JarError::Config`] if the file exists but cannot be read or
    /// is not valid TOML for this structure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use emotion_jar::Config;
    ///
    /// let config = Config::load("/no/such/config.toml")?;
    /// assert_eq!(config, Config::default());
    /// # Ok::<(), emotion_jar::JarError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(JarError::Config(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        toml::from_str(&contents)
            .map_err(|e| JarError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Applies the API key from the process environment, if set.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Applies the API key from `lookup`, trying [`API_KEY_VARS`] in order.
    ///
    /// Blank values are skipped.
    #[must_use]
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
        {
            self.api_key = Some(key);
        }
        self
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(get_data_dir, expand_tilde)
    }

    /// Default location of the config file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        get_data_dir().join(CONFIG_FILE_NAME)
    }

    #[must_use]
    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            temperature: self.temperature,
            timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    #[must_use]
    pub const fn pacing(&self) -> Pacing {
        Pacing::from_millis(
            self.pacing.crumple_ms,
            self.pacing.throw_ms,
            self.pacing.transform_floor_ms,
        )
    }

    /// Resolves the theme: file first, then built-in name, then `mint`.
    ///
    /// Load failures are logged and fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Builds a ready-to-run [`Session`] from configuration.
///
/// Opens the note slot in the data directory (an unreadable slot starts an
/// empty jar), builds the HTTP rewriter and wires the gateway with its
/// fallback pool.
///
/// # Errors
///
/// Returns [`JarError::Io`] if the data directory cannot be created, or
/// [`JarError::Config`] if the HTTP client cannot be built.
pub fn initialize(config: &Config) -> Result<Session> {
    let data_dir = config.data_dir();
    tracing::debug!(data_dir = %data_dir.display(), "initializing emotion jar");

    let random = Arc::new(SystemRandom::new());
    let storage = JsonFileStorage::in_dir(&data_dir)?;
    let store = NoteStore::load(Box::new(storage), random.clone());

    let rewriter = GeminiRewriter::new(config.gemini_settings())
        .map_err(|e| JarError::Config(format!("failed to build HTTP client: {e}")))?;
    let pacing = config.pacing();
    let gateway = TransformationGateway::new(
        Arc::new(rewriter),
        FallbackPool::new(random),
        pacing.transform_floor,
    );

    if config.api_key.is_none() {
        tracing::info!("no API key configured, transformations will use fallbacks");
    }

    Ok(Session::new(store, gateway, pacing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            theme = "night"
            [pacing]
            crumple_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.theme_name.as_deref(), Some("night"));
        assert_eq!(config.pacing.crumple_ms, 10);
        assert_eq!(config.pacing.throw_ms, 1000);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "temperature = \"hot\"").unwrap();

        assert!(matches!(Config::load(&path), Err(JarError::Config(_))));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            ..Config::default()
        };

        let config = config.with_env_from(|name| match name {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "API_KEY" => Some("from-env".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("from-env"));

        let untouched = Config::default().with_env_from(|_| None);
        assert_eq!(untouched.api_key, None);
    }

    #[test]
    fn pacing_and_settings_follow_config() {
        let config = Config {
            request_timeout_ms: 500,
            ..Config::default()
        };
        assert_eq!(config.gemini_settings().timeout, Duration::from_millis(500));
        assert_eq!(config.pacing(), Pacing::default());
    }

    #[test]
    fn unknown_theme_falls_back_to_mint() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());
    }
}
