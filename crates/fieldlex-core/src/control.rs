//! Input control state — per-control value orchestration
//!
//! One [`InputControl`] exists per control instance, created when the control
//! attaches to its hosting container and dropped when it detaches. It owns
//! the internal/external value pair exclusively; nothing is shared across
//! controls. The hosting document, the bound node, and the formatting engine
//! stay external: the control holds only an opaque [`NodeRef`] and calls the
//! engine through the [`ValueFormatter`] seam.

use crate::config::InputFormatConfig;
use crate::convert;
use crate::error::Result;
use crate::patterns::Clock;
use crate::splitter::{self, JOIN_SEPARATOR};
use crate::{DeclaredType, OperatingMode};

/// Opaque handle to a node in the hosting document tree.
///
/// Never owned or mutated here; it exists only to be handed back to the
/// external formatting engine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodeRef(pub String);

/// External expression/formatting engine seam.
///
/// Renders a canonical value into its locale display form using the supplied
/// output pattern. Failures are the caller's to surface; they never corrupt
/// control state.
pub trait ValueFormatter {
    fn format_value(
        &self,
        node: &NodeRef,
        type_name: &str,
        value: &str,
        pattern: &str,
    ) -> Result<String>;
}

/// Extension attributes carried on an input control.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExtensionAttributes {
    pub size: Option<String>,
    pub maxlength: Option<String>,
    pub autocomplete: Option<String>,
}

/// Value state of one form-input control.
#[derive(Debug, Clone)]
pub struct InputControl {
    declared_type: Option<DeclaredType>,
    mode: OperatingMode,
    internal_value: String,
    external_value: String,
    bound_node: Option<NodeRef>,
    extension_attributes: ExtensionAttributes,
}

impl InputControl {
    pub fn new(declared_type: Option<DeclaredType>, mode: OperatingMode) -> Self {
        Self {
            declared_type,
            mode,
            internal_value: String::new(),
            external_value: String::new(),
            bound_node: None,
            extension_attributes: ExtensionAttributes::default(),
        }
    }

    // ── Bindings & attributes ─────────────────────────

    pub fn declared_type(&self) -> Option<&DeclaredType> {
        self.declared_type.as_ref()
    }

    pub fn operating_mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn set_bound_node(&mut self, node: Option<NodeRef>) {
        self.bound_node = node;
    }

    pub fn bound_node(&self) -> Option<&NodeRef> {
        self.bound_node.as_ref()
    }

    pub fn set_extension_attributes(&mut self, attributes: ExtensionAttributes) {
        self.extension_attributes = attributes;
    }

    pub fn size(&self) -> Option<&str> {
        self.extension_attributes.size.as_deref()
    }

    pub fn maxlength(&self) -> Option<&str> {
        self.extension_attributes.maxlength.as_deref()
    }

    pub fn autocomplete(&self) -> Option<&str> {
        self.extension_attributes.autocomplete.as_deref()
    }

    // ── Value access ──────────────────────────────────

    pub fn internal_value(&self) -> &str {
        &self.internal_value
    }

    pub fn external_value(&self) -> &str {
        &self.external_value
    }

    /// Host-side update of the internal value during an evaluation pass,
    /// e.g. after the bound node changed underneath the control.
    pub fn set_internal_value(&mut self, value: impl Into<String>) {
        self.internal_value = value.into();
    }

    // ── Store & refresh ───────────────────────────────

    /// Apply the store-direction conversion to a submitted value and keep the
    /// result as the internal value.
    pub fn store_external_value(
        &mut self,
        raw: &str,
        config: &InputFormatConfig,
        clock: &dyn Clock,
    ) {
        self.internal_value = convert::convert_from_external(
            self.declared_type.as_ref(),
            self.mode,
            raw,
            config.datetime_separator,
            clock,
        );
    }

    /// Recompute the external value from the internal value, as done on every
    /// evaluation/refresh cycle.
    pub fn refresh_external_value(&mut self) {
        self.external_value =
            convert::convert_to_external(self.declared_type.as_ref(), &self.internal_value);
    }

    // ── Sub-field types ───────────────────────────────

    /// Schema type of the first input sub-field. A dateTime control splits
    /// into a date field and a time field.
    pub fn first_value_type(&self) -> Option<&str> {
        match self.declared_type {
            Some(DeclaredType::DateTime) => Some("date"),
            Some(ref declared) => Some(declared.name()),
            None => None,
        }
    }

    /// Schema type of the second input sub-field; only dateTime controls
    /// have one.
    pub fn second_value_type(&self) -> Option<&str> {
        match self.declared_type {
            Some(DeclaredType::DateTime) => Some("time"),
            _ => None,
        }
    }

    // ── Display accessors ─────────────────────────────

    /// Value to show in the first input field.
    ///
    /// Temporal types are rendered through the formatting engine; everything
    /// else shows the current external value. Never fails: a missing node or
    /// a formatter failure degrades to the empty string.
    pub fn first_display_value(
        &self,
        formatter: &dyn ValueFormatter,
        config: &InputFormatConfig,
    ) -> String {
        match self.declared_type {
            Some(DeclaredType::Date) | Some(DeclaredType::Time) => self
                .format_sub_value(formatter, config, self.first_value_type(), &self.internal_value)
                .unwrap_or_default(),
            Some(DeclaredType::DateTime) => {
                let date = splitter::date_part(&self.internal_value, JOIN_SEPARATOR);
                self.format_sub_value(formatter, config, self.first_value_type(), date)
                    .unwrap_or_default()
            }
            _ => self.external_value.clone(),
        }
    }

    /// Value to show in the second input field; only meaningful for dateTime.
    /// Never fails; degrades to the empty string.
    pub fn second_display_value(
        &self,
        formatter: &dyn ValueFormatter,
        config: &InputFormatConfig,
    ) -> String {
        match self.declared_type {
            Some(DeclaredType::DateTime) => {
                let time = splitter::time_part(&self.internal_value, JOIN_SEPARATOR);
                self.format_sub_value(formatter, config, self.second_value_type(), time)
                    .unwrap_or_default()
            }
            _ => String::new(),
        }
    }

    /// Formatted value for read-only output.
    ///
    /// `Ok(None)` when there is no bound node (the caller suppresses output).
    /// Formatter failures surface as [`crate::Error::Format`]; the caller
    /// owns the user-visible fallback.
    pub fn readonly_formatted_value(
        &self,
        formatter: &dyn ValueFormatter,
        config: &InputFormatConfig,
    ) -> Result<Option<String>> {
        let Some(node) = self.bound_node.as_ref() else {
            return Ok(None);
        };

        let Some(declared) = self.declared_type.as_ref() else {
            return Ok(Some(self.external_value.clone()));
        };

        match config.pattern_for(declared.name()) {
            Some(pattern) => formatter
                .format_value(node, declared.name(), &self.internal_value, pattern)
                .map(Some),
            // Types without a configured output pattern display as-is
            None => Ok(Some(self.external_value.clone())),
        }
    }

    /// Format one sub-value through the engine. `None` when there is no bound
    /// node or no pattern for the type; formatter failures also degrade to
    /// `None` so display accessors never raise.
    fn format_sub_value(
        &self,
        formatter: &dyn ValueFormatter,
        config: &InputFormatConfig,
        value_type: Option<&str>,
        value: &str,
    ) -> Option<String> {
        let node = self.bound_node.as_ref()?;
        let type_name = value_type?;
        let pattern = config.pattern_for(type_name)?;

        match formatter.format_value(node, type_name, value, pattern) {
            Ok(formatted) => Some(formatted),
            Err(error) => {
                tracing::debug!(%error, type_name, "formatter failed, degrading to empty");
                None
            }
        }
    }
}
