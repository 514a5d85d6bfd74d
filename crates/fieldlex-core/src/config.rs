//! Output format configuration
//!
//! The hosting deployment supplies a per-type output pattern used by the
//! external formatting engine for read-only display, plus the UI hierarchy
//! separator that combined dateTime submissions are split on. Defaults match
//! the original property defaults of the hosting container.

use crate::error::{Error, Result};
use crate::DeclaredType;

/// Per-deployment display configuration, loadable from a JSON document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InputFormatConfig {
    /// Output pattern for `date` values
    pub date_format: String,
    /// Output pattern for `time` values
    pub time_format: String,
    /// Output pattern for full `dateTime` values
    pub datetime_format: String,
    /// Separator between the date and time parts of a combined submission
    pub datetime_separator: char,
}

impl Default for InputFormatConfig {
    fn default() -> Self {
        Self {
            date_format: "[M]/[D]/[Y]".to_string(),
            time_format: "[h]:[m]:[s] [P]".to_string(),
            datetime_format: "[M]/[D]/[Y] [h]:[m]:[s] [P]".to_string(),
            datetime_separator: '\u{b7}',
        }
    }
}

impl InputFormatConfig {
    /// Load configuration from a JSON document. Missing fields keep their
    /// defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// The configured output pattern for a schema type name, if the type has
    /// one. Only the temporal built-ins carry display patterns.
    pub fn pattern_for(&self, type_name: &str) -> Option<&str> {
        match DeclaredType::from_name(type_name) {
            DeclaredType::Date => Some(&self.date_format),
            DeclaredType::Time => Some(&self.time_format),
            DeclaredType::DateTime => Some(&self.datetime_format),
            DeclaredType::Boolean | DeclaredType::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InputFormatConfig::default();
        assert_eq!(config.date_format, "[M]/[D]/[Y]");
        assert_eq!(config.time_format, "[h]:[m]:[s] [P]");
        assert_eq!(config.datetime_separator, '\u{b7}');
    }

    #[test]
    fn test_from_json_partial_keeps_defaults() {
        let config = InputFormatConfig::from_json(r#"{"date_format": "[D].[M].[Y]"}"#).unwrap();
        assert_eq!(config.date_format, "[D].[M].[Y]");
        assert_eq!(config.time_format, "[h]:[m]:[s] [P]");
    }

    #[test]
    fn test_from_json_invalid_is_config_error() {
        let err = InputFormatConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_pattern_for() {
        let config = InputFormatConfig::default();
        assert_eq!(config.pattern_for("date"), Some("[M]/[D]/[Y]"));
        assert_eq!(config.pattern_for("time"), Some("[h]:[m]:[s] [P]"));
        assert!(config.pattern_for("boolean").is_none());
        assert!(config.pattern_for("decimal").is_none());
    }
}
