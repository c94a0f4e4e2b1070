//! FHIR-aligned person resource and its wire model.
//!
//! A person differs from a patient in carrying telecom contact points and links to other
//! resources that describe the same individual, and in having no identifiers.

use crate::wire::{self, WireFormat};
use crate::{
    Address, AdministrativeGender, ContactPoint, Deceased, FhirResult, HumanName, PersonLink,
};
use serde::{Deserialize, Serialize};

pub(crate) const RESOURCE_TYPE: &str = "Person";

// ============================================================================
// Public domain-level types
// ============================================================================

/// Domain-level carrier for a person resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonResource {
    pub id: Option<String>,
    pub active: Option<bool>,
    pub gender: Option<AdministrativeGender>,
    pub name: Vec<HumanName>,
    pub telecom: Vec<ContactPoint>,
    pub address: Vec<Address>,
    pub link: Vec<PersonLink>,
    pub deceased: Option<Deceased>,
}

// ============================================================================
// Public Person operations
// ============================================================================

/// Person resource operations.
pub struct Person;

impl Person {
    /// Parse a person resource from JSON or YAML text.
    ///
    /// # Errors
    ///
    /// Same conditions as [`crate::Patient::parse`], with `resourceType` expected to be
    /// `"Person"`.
    pub fn parse(text: &str, format: WireFormat) -> FhirResult<PersonResource> {
        let wire: PersonWire = wire::decode(text, format, RESOURCE_TYPE)?;
        wire::expect_resource_type(&wire.resource_type, RESOURCE_TYPE)?;
        wire_to_domain(wire)
    }

    /// Render a person resource as JSON or YAML text.
    pub fn render(resource: &PersonResource, format: WireFormat) -> FhirResult<String> {
        wire::encode(&domain_to_wire(resource), format)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct PersonWire {
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased_boolean: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased_date_time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<PersonLink>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: PersonWire) -> FhirResult<PersonResource> {
    let deceased =
        wire::deceased_from_wire(wire.deceased_boolean, wire.deceased_date_time.as_deref())?;

    Ok(PersonResource {
        id: wire.id,
        active: wire.active,
        gender: wire.gender,
        name: wire.name,
        telecom: wire.telecom,
        address: wire.address,
        link: wire.link,
        deceased,
    })
}

pub(crate) fn domain_to_wire(resource: &PersonResource) -> PersonWire {
    let (deceased_boolean, deceased_date_time) = wire::deceased_to_wire(resource.deceased.as_ref());

    PersonWire {
        resource_type: RESOURCE_TYPE.to_string(),
        id: resource.id.clone(),
        active: resource.active,
        name: resource.name.clone(),
        telecom: resource.telecom.clone(),
        gender: resource.gender,
        deceased_boolean,
        deceased_date_time,
        address: resource.address.clone(),
        link: resource.link.clone(),
    }
}
