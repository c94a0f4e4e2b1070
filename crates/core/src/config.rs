//! Translator configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into translators behind an `Arc`. Translators never read process-wide environment
//! variables themselves, which keeps every translation a pure function of its input and this
//! configuration.

use crate::constants::{DEFAULT_CONTACT_ATTRIBUTE_TYPE, VOIDED_BY_FHIR_MODULE};
use crate::{TranslatorError, TranslatorResult};
use bridge_types::NonEmptyText;
use std::str::FromStr;

/// How an attribute's type name is compared with the configured contact type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttributeTypeMatch {
    /// Byte-for-byte comparison.
    #[default]
    Exact,
    /// Case-insensitive comparison.
    IgnoreCase,
}

impl FromStr for AttributeTypeMatch {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(AttributeTypeMatch::Exact),
            "ignore-case" | "ignore_case" | "insensitive" => Ok(AttributeTypeMatch::IgnoreCase),
            other => Err(TranslatorError::InvalidConfig(format!(
                "unknown attribute type match '{other}' (expected 'exact' or 'ignore-case')"
            ))),
        }
    }
}

/// Configuration shared by all translators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatorConfig {
    contact_attribute_type: NonEmptyText,
    attribute_type_match: AttributeTypeMatch,
    void_reason: NonEmptyText,
}

impl TranslatorConfig {
    /// Create a new `TranslatorConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslatorError::InvalidConfig`] if either text value is blank.
    pub fn new(
        contact_attribute_type: &str,
        attribute_type_match: AttributeTypeMatch,
        void_reason: &str,
    ) -> TranslatorResult<Self> {
        let contact_attribute_type = NonEmptyText::new(contact_attribute_type).map_err(|_| {
            TranslatorError::InvalidConfig("contact_attribute_type cannot be empty".into())
        })?;
        let void_reason = NonEmptyText::new(void_reason)
            .map_err(|_| TranslatorError::InvalidConfig("void_reason cannot be empty".into()))?;

        Ok(Self {
            contact_attribute_type,
            attribute_type_match,
            void_reason,
        })
    }

    pub fn contact_attribute_type(&self) -> &str {
        self.contact_attribute_type.as_str()
    }

    pub fn attribute_type_match(&self) -> AttributeTypeMatch {
        self.attribute_type_match
    }

    pub fn void_reason(&self) -> &str {
        self.void_reason.as_str()
    }

    /// Whether an attribute type named `type_name` carries contact values.
    pub fn is_contact_attribute_type(&self, type_name: &str) -> bool {
        match self.attribute_type_match {
            AttributeTypeMatch::Exact => self.contact_attribute_type.matches(type_name),
            AttributeTypeMatch::IgnoreCase => {
                self.contact_attribute_type.matches_ignore_case(type_name)
            }
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            contact_attribute_type: NonEmptyText::new(DEFAULT_CONTACT_ATTRIBUTE_TYPE)
                .unwrap_or_else(|_| unreachable!("default contact attribute type is non-empty")),
            attribute_type_match: AttributeTypeMatch::Exact,
            void_reason: NonEmptyText::new(VOIDED_BY_FHIR_MODULE)
                .unwrap_or_else(|_| unreachable!("default void reason is non-empty")),
        }
    }
}
