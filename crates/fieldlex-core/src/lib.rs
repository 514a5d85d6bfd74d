//! fieldlex core — value normalization for form-input controls
//!
//! This is the single source of truth for how a form-input control reconciles
//! its *internal value* (a canonical, schema-lexical representation such as an
//! ISO date) with its *external value* (whatever a client submits or must
//! display, which may be locale-formatted or partially typed).
//!
//! # Architecture
//!
//! ```text
//! External input → Converter → parser tables + splitter → Internal value
//!                      ↓
//!                 InputControl → display accessors → Formatter (injected)
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same input, mode, type, and clock year always produce
//!   the same normalized value
//! - **Ordered**: parse rules fire in authored priority order, first match wins
//! - **Total**: unrecognized input is passed through trimmed, never rejected
//! - **Pure**: no I/O; the clock and the formatting engine are injected seams

pub mod config;
pub mod control;
pub mod convert;
pub mod error;
pub mod patterns;
pub mod splitter;

pub use config::InputFormatConfig;
pub use control::{ExtensionAttributes, InputControl, NodeRef, ValueFormatter};
pub use error::{Error, Result};
pub use patterns::{Clock, FixedClock, SystemClock};

/// Built-in schema type declared on a control.
///
/// Any schema type name that is not one of the four recognized built-ins is
/// carried as [`DeclaredType::Other`] and treated as opaque by the conversion
/// pipeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclaredType {
    Boolean,
    Date,
    Time,
    DateTime,
    Other(String),
}

impl DeclaredType {
    /// Map a schema type name to a declared type. Open-ended: unrecognized
    /// names become [`DeclaredType::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "boolean" => DeclaredType::Boolean,
            "date" => DeclaredType::Date,
            "time" => DeclaredType::Time,
            "dateTime" => DeclaredType::DateTime,
            other => DeclaredType::Other(other.to_string()),
        }
    }

    /// The schema type name for this declared type.
    pub fn name(&self) -> &str {
        match self {
            DeclaredType::Boolean => "boolean",
            DeclaredType::Date => "date",
            DeclaredType::Time => "time",
            DeclaredType::DateTime => "dateTime",
            DeclaredType::Other(name) => name,
        }
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Operating mode of the hosting client.
///
/// A richly scripted client pre-normalizes values before submission, so
/// lenient parsing applies only in [`OperatingMode::Noscript`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Scripted,
    Noscript,
}

impl OperatingMode {
    pub fn is_noscript(self) -> bool {
        matches!(self, OperatingMode::Noscript)
    }
}
