#![forbid(unsafe_code)]

//! Configuration for the history coordinator.
//!
//! Can be built in code or, with the `config-file` feature, loaded from TOML
//! or JSON:
//!
//! ```toml
//! # configurator.toml
//! platform = "mobile"
//! enabled = true
//! max_depth = 200
//! null_target_replay = "platform-default"
//! ```
//!
//! ```rust,ignore
//! let config = CoordinatorConfig::from_toml_file("configurator.toml")?;
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

/// Device class the front-end is rendering for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "kebab-case"))]
pub enum Platform {
    #[default]
    Desktop,
    Mobile,
}

impl Platform {
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

/// What replay does with a group, step or attribute step whose target is
/// "nothing selected".
///
/// The desktop layout always keeps a group open, so clearing the selection on
/// undo would leave an empty panel; the mobile layout closes its drawer
/// instead. `PlatformDefault` keeps that split (skip on desktop, apply on
/// mobile).
// TODO: confirm with product whether desktop should also replay deselection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "kebab-case"))]
pub enum NullTargetReplay {
    #[default]
    PlatformDefault,
    Always,
    Never,
}

impl NullTargetReplay {
    /// Whether a deselection step is replayed on `platform`.
    #[must_use]
    pub const fn applies_on(self, platform: Platform) -> bool {
        match self {
            Self::PlatformDefault => platform.is_mobile(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Settings for [`UndoRedoCoordinator`](crate::undo::UndoRedoCoordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct CoordinatorConfig {
    pub platform: Platform,
    /// Seller-level switch. When off, nothing is recorded and undo/redo do
    /// nothing.
    pub enabled: bool,
    /// Maximum number of batches on the undo stack. `usize::MAX` means
    /// unlimited.
    pub max_depth: usize,
    pub null_target_replay: NullTargetReplay,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Desktop,
            enabled: true,
            max_depth: usize::MAX,
            null_target_replay: NullTargetReplay::PlatformDefault,
        }
    }
}

impl CoordinatorConfig {
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_null_target_replay(mut self, policy: NullTargetReplay) -> Self {
        self.null_target_replay = policy;
        self
    }

    /// Whether deselection steps are replayed under this configuration.
    #[must_use]
    pub fn replays_null_targets(&self) -> bool {
        self.null_target_replay.applies_on(self.platform)
    }

    /// Validate all parameters. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push("max_depth must be > 0".into());
        }
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config-file")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors from loading a [`CoordinatorConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
