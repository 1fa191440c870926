//! Field configuration and its TOML form.
//!
//! ```toml
//! length = 6
//! value_type = "number"   # "text" | "number" | "password"
//! masked = false
//! disabled = false
//! focus_on_init = true
//! ```
//!
//! Every key is optional. `"password"` is shorthand for the text policy with
//! `masked = true`.

use crate::validate::{InputType, ValueType};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_LENGTH: usize = 6;

/// Configuration of a one-time-password field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawConfig")]
pub struct OtpConfig {
    /// Number of segments.
    pub length: usize,
    pub value_type: ValueType,
    /// Obfuscate segment contents when rendering. No effect on the value.
    pub masked: bool,
    pub disabled: bool,
    /// Focus the first segment once the field is activated.
    pub focus_on_init: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            value_type: ValueType::Text,
            masked: false,
            disabled: false,
            focus_on_init: false,
        }
    }
}

impl OtpConfig {
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn focus_on_init(mut self, focus_on_init: bool) -> Self {
        self.focus_on_init = focus_on_init;
        self
    }

    pub fn input_type(&self) -> InputType {
        InputType::for_field(self.value_type, self.masked)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Parse)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!(target: "otp.control", "loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawValueType {
    #[default]
    Text,
    Password,
    Number,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    length: usize,
    #[serde(alias = "type")]
    value_type: RawValueType,
    masked: bool,
    disabled: bool,
    focus_on_init: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        let defaults = OtpConfig::default();
        Self {
            length: defaults.length,
            value_type: RawValueType::Text,
            masked: defaults.masked,
            disabled: defaults.disabled,
            focus_on_init: defaults.focus_on_init,
        }
    }
}

impl From<RawConfig> for OtpConfig {
    fn from(raw: RawConfig) -> Self {
        let (value_type, masked) = match raw.value_type {
            RawValueType::Text => (ValueType::Text, raw.masked),
            RawValueType::Password => (ValueType::Text, true),
            RawValueType::Number => (ValueType::Number, raw.masked),
        };
        OtpConfig {
            length: raw.length,
            value_type,
            masked,
            disabled: raw.disabled,
            focus_on_init: raw.focus_on_init,
        }
    }
}

/// Failure to load an [`OtpConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: String,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read otp config {path}: {source}")
            }
            ConfigError::Parse(err) => write!(f, "invalid otp config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
        }
    }
}
