//! Patient aggregate: a person that also carries identifiers.

use crate::person::PersonRecord;
use serde::{Deserialize, Serialize};

/// A patient as held by the host application.
///
/// A patient is a person. The person part is held by composition and always has
/// `is_patient` set; [`PatientRecord::new`], `Default` and the readers all enforce that.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PatientRecord {
    pub person: PersonRecord,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<PatientIdentifier>,
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self::new(PersonRecord::default())
    }
}

impl PatientRecord {
    /// Promote a person to a patient with no identifiers yet.
    pub fn new(mut person: PersonRecord) -> Self {
        person.is_patient = true;
        Self {
            person,
            identifiers: Vec::new(),
        }
    }

    /// Re-asserts the patient invariant after deserialisation.
    pub(crate) fn normalised(mut self) -> Self {
        self.person.is_patient = true;
        self
    }

    pub fn uuid(&self) -> Option<&str> {
        self.person.uuid.as_deref()
    }
}

/// One identifier (MRN, national id, ...) held by a patient.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PatientIdentifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub preferred: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_type: Option<PatientIdentifierType>,
}

/// Type descriptor of a [`PatientIdentifier`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PatientIdentifierType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    pub name: String,
}
