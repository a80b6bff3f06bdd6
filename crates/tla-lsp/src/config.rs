//! Server Configuration
//!
//! Settings reach the server from three places, applied in order:
//!
//! 1. The `--prefer-unicode` command-line flag
//! 2. `initializationOptions` sent with the `initialize` request
//! 3. `workspace/didChangeConfiguration` notifications
//!
//! Clients may send settings either bare (`{"preferUnicode": true}`) or
//! nested under the `tlaplus` section (`{"tlaplus": {"preferUnicode": true}}`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The settings section the server reads from client configuration.
pub const SETTINGS_SECTION: &str = "tlaplus";

/// Errors raised while reading client-provided settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings payload is not a JSON object.
    #[error("settings must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A known setting has the wrong type.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

/// Runtime configuration of the language server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Insert Unicode glyphs (`∈`) instead of ASCII operators (`\in`)
    /// when a completion is resolved.
    pub prefer_unicode: bool,
}

/// A partial settings update; absent keys leave the current value alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsPatch {
    prefer_unicode: Option<bool>,
}

impl ServerConfig {
    /// Returns a copy of `self` with the client settings applied on top.
    ///
    /// `null` leaves the configuration unchanged.
    pub fn merged_with(&self, settings: &Value) -> Result<Self, ConfigError> {
        let section = match settings {
            Value::Null => return Ok(self.clone()),
            Value::Object(map) => map.get(SETTINGS_SECTION).unwrap_or(settings),
            other => return Err(ConfigError::NotAnObject(json_type_name(other))),
        };
        if section.is_null() {
            return Ok(self.clone());
        }
        if !section.is_object() {
            return Err(ConfigError::NotAnObject(json_type_name(section)));
        }

        let patch: SettingsPatch = serde_json::from_value(section.clone())?;
        let mut config = self.clone();
        if let Some(prefer_unicode) = patch.prefer_unicode {
            config.prefer_unicode = prefer_unicode;
        }
        Ok(config)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
