//! Configuration for the `protolex` command.
//!
//! Provides [`ProtolexConfig`], loaded from TOML files, environment
//! variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `PROTOLEX_CONFIG` environment variable
//! 3. XDG default: `~/.config/protolex/config.toml`
//! 4. Built-in defaults
//!
//! Environment overrides use the `PROTOLEX_` prefix, e.g.
//! `PROTOLEX_VALIDATION_STRICT=true` or `PROTOLEX_QUIZ_DISTRACTORS=4`.

use confyg::{env, Confygery};
use protolex::fts::{SearchConfig, DEFAULT_LIMIT, MAX_LIMIT};
use protolex::graph::ReferencePolicy;
use protolex::quiz::{QuizConfig, DEFAULT_DISTRACTORS};
use protolex::EngineConfig;
use protolex_core::traits::ConfigProvider;
use protolex_core::util::paths::expand_tilde;
use protolex_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the `protolex` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtolexConfig {
    /// Project name.
    pub project_name: String,

    /// Base path for all project data. Defaults to the working directory.
    pub base_path: Option<String>,

    pub content: ContentConfig,
    pub validation: ValidationConfig,
    pub search: SearchSettings,
    pub quiz: QuizSettings,
    pub output: OutputConfig,
}

/// Where the corpus lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// JSON file or directory of protocol records.
    pub protocols: Option<String>,
    /// JSON file or directory of authored quiz questions.
    pub quizzes: Option<String>,
}

/// Validation behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Treat dangling `relatedProtocols` entries as fatal.
    #[serde(deserialize_with = "from_str_or_value")]
    pub strict: bool,
}

/// Search paging limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    #[serde(deserialize_with = "from_str_or_value")]
    pub default_limit: usize,
    #[serde(deserialize_with = "from_str_or_value")]
    pub max_limit: usize,
}

/// Quiz generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    #[serde(deserialize_with = "from_str_or_value")]
    pub distractors: usize,
}

/// Build artifact locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub index_path: Option<String>,
    pub graph_path: Option<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for ProtolexConfig {
    fn default() -> Self {
        Self {
            project_name: "protolex".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            validation: ValidationConfig::default(),
            search: SearchSettings::default(),
            quiz: QuizSettings::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            distractors: DEFAULT_DISTRACTORS,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl ProtolexConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("PROTOLEX");
        env_opts.add_section("content");
        env_opts.add_section("validation");
        env_opts.add_section("search");
        env_opts.add_section("quiz");
        env_opts.add_section("output");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }

        if let Ok(path) = std::env::var("PROTOLEX_CONFIG") {
            return Some(expand_tilde(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("protolex").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Engine settings derived from this config.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            reference_policy: ReferencePolicy::from_strict(self.validation.strict),
            search: SearchConfig {
                default_limit: self.search.default_limit,
                max_limit: self.search.max_limit,
            },
            quiz: QuizConfig::with_distractors(self.quiz.distractors),
        }
    }

    /// Path of the protocol record feed.
    pub fn protocols_path(&self) -> Result<PathBuf> {
        self.content_path("protocols")
    }

    /// Path of authored quiz questions, if configured.
    pub fn quizzes_path(&self) -> Option<PathBuf> {
        self.content.quizzes.as_deref().map(expand_tilde)
    }

    /// Where `index build` writes the search index.
    pub fn index_path(&self) -> Result<PathBuf> {
        self.output_path(self.output.index_path.as_deref(), "index.json")
    }

    /// Where `graph export` writes the reference graph.
    pub fn graph_path(&self) -> Result<PathBuf> {
        self.output_path(self.output.graph_path.as_deref(), "graph.json")
    }

    fn output_path(&self, configured: Option<&str>, file_name: &str) -> Result<PathBuf> {
        match configured {
            Some(p) => Ok(expand_tilde(p)),
            None => Ok(self.base_path()?.join("data").join(file_name)),
        }
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for ProtolexConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        let configured = match content_type {
            "protocols" => self.content.protocols.as_deref(),
            "quizzes" => self.content.quizzes.as_deref(),
            _ => None,
        };
        match configured {
            Some(p) => Ok(expand_tilde(p)),
            None => Ok(self.base_path()?.join("data").join(content_type)),
        }
    }
}

// ============================================================================
// Helper: accept env strings for typed fields
// ============================================================================

/// Deserialize a typed value that may arrive as a string.
///
/// Environment overrides reach serde as strings, so `"true"` and `"4"` must
/// be accepted alongside TOML booleans and integers.
fn from_str_or_value<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Value(v) => Ok(v),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// Tests
// ============================================================================
