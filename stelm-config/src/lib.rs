//! Shared configuration loader for the stelm toolchain.
//!
//! `defaults/stelm.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`StelmConfig`].
//!
//! Values that reach the engine are validated here, once, at load time: the
//! protocol class table comes out of [`LinkConfig::protocol_classes`] as an
//! immutable [`ProtocolClasses`] with bad entries already reported and dropped.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use stelm_format::{Engine, EngineOptions, ProtocolClasses, QueueError};

/// The embedded defaults, also printed by `stelm generate-config`.
pub const DEFAULT_TOML: &str = include_str!("../defaults/stelm.default.toml");

/// Top-level configuration consumed by stelm applications.
#[derive(Debug, Clone, Deserialize)]
pub struct StelmConfig {
    pub engine: EngineConfig,
    pub link: LinkConfig,
    pub hashtag: HashtagConfig,
}

impl StelmConfig {
    /// Engine options with the hashtag prefix folded in.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            tag_prefix: self.hashtag.url_prefix.clone(),
            ..EngineOptions::from(&self.engine)
        }
    }

    /// Build the engine this configuration describes.
    pub fn build_engine(&self) -> Result<Engine, QueueError> {
        Engine::from_options(&self.engine_options(), self.link.protocol_classes())
    }
}

/// Mirrors the knobs exposed by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub max_depth: usize,
    pub substitutions: bool,
    pub hashtags: bool,
    /// Whether callers should entity-escape raw input before rendering.
    pub escape_input: bool,
}

impl From<&EngineConfig> for EngineOptions {
    fn from(config: &EngineConfig) -> Self {
        EngineOptions {
            max_depth: config.max_depth,
            substitutions: config.substitutions,
            hashtags: config.hashtags,
            ..EngineOptions::default()
        }
    }
}

/// Raw protocol class table, validated on demand.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    #[serde(default)]
    pub protocol_classes: BTreeMap<String, Value>,
}

impl LinkConfig {
    /// Validate the table into the value the link formatter consumes.
    ///
    /// Scheme names are lowercased. A string is a class name and an empty
    /// string or null means "no class". Anything else, and class names with
    /// characters outside `[A-Za-z0-9_-]`, is logged and skipped.
    pub fn protocol_classes(&self) -> ProtocolClasses {
        self.protocol_classes
            .iter()
            .filter_map(|(scheme, value)| {
                let class = match value {
                    Value::Null => None,
                    Value::String(class) if class.is_empty() => None,
                    Value::String(class) if is_class_name(class) => Some(class.clone()),
                    Value::String(class) => {
                        log::warn!("Ignoring protocol class for '{scheme}': invalid class name '{class}'");
                        return None;
                    }
                    other => {
                        log::warn!(
                            "Ignoring protocol class for '{scheme}': expected a string or null, got {other}"
                        );
                        return None;
                    }
                };
                Some((scheme.to_lowercase(), class))
            })
            .collect()
    }
}

fn is_class_name(class: &str) -> bool {
    class
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashtagConfig {
    pub url_prefix: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<StelmConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<StelmConfig, ConfigError> {
    Loader::new().build()
}
