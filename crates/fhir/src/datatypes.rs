//! FHIR R4 datatypes shared by the person and patient resources.
//!
//! Only the elements the translators read or write are modelled. Every struct is strict on input
//! (`deny_unknown_fields`) so a typo in a hand-written document surfaces as an error rather than
//! as silently dropped data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Administrative gender value set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
}

/// Purpose of a human name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NameUse {
    /// Official name.
    Official,
    /// Usual/preferred name.
    Usual,
    /// Temporary name.
    Temp,
    /// Nickname or informal name.
    Nickname,
    /// Anonymous name.
    Anonymous,
    /// Old name (no longer in use).
    Old,
    /// Maiden name.
    Maiden,
}

/// A human name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HumanName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<NameUse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prefix: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suffix: Vec<String>,
}

/// A postal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Purpose of an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
}

/// Concept carrying only free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A business identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Identifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<IdentifierUse>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub identifier_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A telecom contact point (phone number, e-mail address, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A literal reference to another resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A link from a person to another resource describing the same individual.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersonLink {
    pub target: Reference,
}

/// The `deceased[x]` choice element.
///
/// Absence is expressed by `Option<Deceased>` on the owning resource, so a value of this type
/// always carries exactly one representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deceased {
    Boolean(bool),
    DateTime(DateTime<Utc>),
}

impl Deceased {
    /// Whether this value states that the individual has died.
    pub fn is_deceased(&self) -> bool {
        match self {
            Deceased::Boolean(dead) => *dead,
            Deceased::DateTime(_) => true,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Deceased::Boolean(dead) => Some(*dead),
            Deceased::DateTime(_) => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Deceased::Boolean(_) => None,
            Deceased::DateTime(at) => Some(*at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_uses_lowercase_codes() {
        let json = serde_json::to_string(&AdministrativeGender::Female).expect("serialise");
        assert_eq!(json, "\"female\"");
        let unknown: AdministrativeGender =
            serde_json::from_str("\"unknown\"").expect("deserialise");
        assert_eq!(unknown, AdministrativeGender::Unknown);
    }

    #[test]
    fn identifier_uses_fhir_keys() {
        let identifier = Identifier {
            use_type: Some(IdentifierUse::Official),
            identifier_type: Some(CodeableConcept {
                text: Some("Medical Record Number".into()),
            }),
            value: Some("100-8".into()),
            ..Identifier::default()
        };
        let json = serde_json::to_value(&identifier).expect("serialise");
        assert_eq!(json["use"], "official");
        assert_eq!(json["type"]["text"], "Medical Record Number");
        assert!(json.get("system").is_none());
    }

    #[test]
    fn deceased_accessors() {
        let at = DateTime::from_timestamp(872986980, 0).expect("valid timestamp");
        assert!(Deceased::DateTime(at).is_deceased());
        assert_eq!(Deceased::DateTime(at).as_date_time(), Some(at));
        assert_eq!(Deceased::Boolean(false).as_boolean(), Some(false));
        assert!(!Deceased::Boolean(false).is_deceased());
        assert!(Deceased::Boolean(true).as_date_time().is_none());
    }
}
