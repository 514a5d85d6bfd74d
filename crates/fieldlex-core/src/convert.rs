//! Value conversion policy — the (type, mode) decision table
//!
//! The store direction (external → internal) is where all lenient parsing
//! happens, and only for temporal types in noscript mode: a scripted client
//! is trusted to submit already-canonical values. The display direction
//! (internal → external) is the identity for everything except booleans.
//!
//! Every `(declared type, operating mode)` combination is one arm of an
//! explicit match so each branch stays independently testable.

use crate::patterns::{self, Clock};
use crate::splitter;
use crate::{DeclaredType, OperatingMode};

/// Convert a submitted external value to its internal canonical form.
///
/// `separator` is the character a combined dateTime submission is split on
/// (the UI hierarchy separator in the default pipeline). The clock feeds the
/// year-less date rule only.
pub fn convert_from_external(
    declared_type: Option<&DeclaredType>,
    mode: OperatingMode,
    external: &str,
    separator: char,
    clock: &dyn Clock,
) -> String {
    let converted = match (declared_type, mode) {
        // Booleans normalize in every mode: anything but the literal "true"
        // is "false". No case folding, no other truthy spellings.
        (Some(DeclaredType::Boolean), _) => {
            let normalized = if external == "true" { "true" } else { "false" };
            normalized.to_string()
        }

        (Some(DeclaredType::Date), OperatingMode::Noscript) => {
            patterns::parse_date(external.trim(), clock.current_year())
        }

        (Some(DeclaredType::Time), OperatingMode::Noscript) => {
            patterns::parse_time(external.trim())
        }

        (Some(DeclaredType::DateTime), OperatingMode::Noscript) => {
            let trimmed = external.trim();
            let date = splitter::date_part(trimmed, separator);
            let time = splitter::time_part(trimmed, separator);

            if date.is_empty() && time.is_empty() {
                // Special case of empty parts
                String::new()
            } else {
                // Recombined result may still be an invalid dateTime lexical
                // value; schema validation owns rejection.
                splitter::join(
                    &patterns::parse_date(date, clock.current_year()),
                    &patterns::parse_time(time),
                )
            }
        }

        // Scripted clients submit canonical values directly
        (Some(DeclaredType::Date), OperatingMode::Scripted)
        | (Some(DeclaredType::Time), OperatingMode::Scripted)
        | (Some(DeclaredType::DateTime), OperatingMode::Scripted) => external.to_string(),

        // Unrecognized types and untyped controls pass through in any mode
        (Some(DeclaredType::Other(_)), _) | (None, _) => external.to_string(),
    };

    tracing::debug!(
        declared_type = declared_type.map(DeclaredType::name),
        ?mode,
        external,
        internal = %converted,
        "converted external value"
    );
    converted
}

/// Compute the external display value for an internal canonical value.
///
/// Booleans take their `"true"`/`"false"` string form (never obfuscated or
/// encoded); every other type displays the internal value unchanged. Locale
/// formatting for read-only output is a separate, explicit request on the
/// control.
pub fn convert_to_external(declared_type: Option<&DeclaredType>, internal: &str) -> String {
    match declared_type {
        Some(DeclaredType::Boolean) => (internal == "true").to_string(),
        _ => internal.to_string(),
    }
}
