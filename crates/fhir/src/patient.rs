//! FHIR-aligned patient resource and its wire model.
//!
//! Responsibilities:
//! - Define the public domain-level [`PatientResource`] consumed and produced by translators
//! - Define a strict wire model for serialisation/deserialisation
//! - Convert between the two, folding the `deceased[x]` choice pair into [`Deceased`]
//!
//! Notes:
//! - The domain type never carries `resourceType`; the wire model always does
//! - A document carrying both `deceasedBoolean` and `deceasedDateTime` is rejected

use crate::wire::{self, WireFormat};
use crate::{Address, AdministrativeGender, Deceased, FhirResult, HumanName, Identifier};
use serde::{Deserialize, Serialize};

pub(crate) const RESOURCE_TYPE: &str = "Patient";

// ============================================================================
// Public domain-level types
// ============================================================================

/// Domain-level carrier for a patient resource.
///
/// Collection fields are always present (possibly empty); scalar fields are `None` when the
/// resource does not state them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientResource {
    pub id: Option<String>,
    pub active: Option<bool>,
    pub identifier: Vec<Identifier>,
    pub name: Vec<HumanName>,
    pub gender: Option<AdministrativeGender>,
    pub address: Vec<Address>,
    pub deceased: Option<Deceased>,
}

// ============================================================================
// Public Patient operations
// ============================================================================

/// Patient resource operations.
///
/// This is a zero-sized type used for namespacing patient-related operations.
pub struct Patient;

impl Patient {
    /// Parse a patient resource from JSON or YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FhirError`] if:
    /// - the text does not match the wire schema (the message names the failing path),
    /// - any unknown keys are present,
    /// - `resourceType` is not `"Patient"`,
    /// - both `deceasedBoolean` and `deceasedDateTime` are present, or the date is malformed.
    pub fn parse(text: &str, format: WireFormat) -> FhirResult<PatientResource> {
        let wire: PatientWire = wire::decode(text, format, RESOURCE_TYPE)?;
        wire::expect_resource_type(&wire.resource_type, RESOURCE_TYPE)?;
        wire_to_domain(wire)
    }

    /// Render a patient resource as JSON or YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FhirError`] if serialisation fails.
    pub fn render(resource: &PatientResource, format: WireFormat) -> FhirResult<String> {
        wire::encode(&domain_to_wire(resource), format)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct PatientWire {
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased_boolean: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased_date_time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: PatientWire) -> FhirResult<PatientResource> {
    let deceased =
        wire::deceased_from_wire(wire.deceased_boolean, wire.deceased_date_time.as_deref())?;

    Ok(PatientResource {
        id: wire.id,
        active: wire.active,
        identifier: wire.identifier,
        name: wire.name,
        gender: wire.gender,
        address: wire.address,
        deceased,
    })
}

pub(crate) fn domain_to_wire(resource: &PatientResource) -> PatientWire {
    let (deceased_boolean, deceased_date_time) = wire::deceased_to_wire(resource.deceased.as_ref());

    PatientWire {
        resource_type: RESOURCE_TYPE.to_string(),
        id: resource.id.clone(),
        active: resource.active,
        identifier: resource.identifier.clone(),
        name: resource.name.clone(),
        gender: resource.gender,
        deceased_boolean,
        deceased_date_time,
        address: resource.address.clone(),
    }
}
