//! Person record ↔ FHIR person.

use super::shared::{death_from_deceased, deceased_from_record, translate_all};
use super::{
    AddressTranslator, ContactTranslator, FhirTranslator, GenderTranslator, NameTranslator,
    SharedTranslator,
};
use crate::config::TranslatorConfig;
use crate::constants::PATIENT_RESOURCE_TYPE;
use crate::TranslatorResult;
use fhir::{
    Address, AdministrativeGender, ContactPoint, HumanName, PersonLink, PersonResource, Reference,
};
use records::{PersonAddress, PersonAttribute, PersonName, PersonRecord};
use std::sync::Arc;

/// Translates a person aggregate to and from a FHIR person.
///
/// Outbound, attributes whose type matches the configured contact type become `telecom`
/// entries and a person who is also a patient gets a link to that patient. Inbound is partial:
/// identity, active state, gender, names, addresses and death are restored, while telecom and
/// link are not turned back into attributes.
#[derive(Clone)]
pub struct PersonTranslator {
    cfg: Arc<TranslatorConfig>,
    gender: SharedTranslator<String, AdministrativeGender>,
    name: SharedTranslator<PersonName, HumanName>,
    contact: SharedTranslator<PersonAttribute, ContactPoint>,
    address: SharedTranslator<PersonAddress, Address>,
}

impl PersonTranslator {
    /// Creates a person translator from explicit collaborators.
    pub fn new(
        cfg: Arc<TranslatorConfig>,
        gender: SharedTranslator<String, AdministrativeGender>,
        name: SharedTranslator<PersonName, HumanName>,
        contact: SharedTranslator<PersonAttribute, ContactPoint>,
        address: SharedTranslator<PersonAddress, Address>,
    ) -> Self {
        Self {
            cfg,
            gender,
            name,
            contact,
            address,
        }
    }

    /// Creates a person translator wired to the built-in collaborators.
    pub fn with_defaults(cfg: Arc<TranslatorConfig>) -> Self {
        Self::new(
            cfg,
            Arc::new(GenderTranslator),
            Arc::new(NameTranslator),
            Arc::new(ContactTranslator),
            Arc::new(AddressTranslator),
        )
    }

    fn patient_link(person: &PersonRecord) -> Vec<PersonLink> {
        match (person.is_patient, person.uuid.as_deref()) {
            (true, Some(uuid)) => vec![PersonLink {
                target: Reference {
                    reference: Some(format!("{PATIENT_RESOURCE_TYPE}/{uuid}")),
                    reference_type: Some(PATIENT_RESOURCE_TYPE.to_string()),
                    display: None,
                },
            }],
            _ => Vec::new(),
        }
    }
}

impl FhirTranslator<PersonRecord, PersonResource> for PersonTranslator {
    fn to_fhir(&self, person: &PersonRecord) -> TranslatorResult<PersonResource> {
        tracing::trace!(uuid = ?person.uuid, "translating person to FHIR");

        let gender = person
            .gender
            .as_ref()
            .map(|code| self.gender.to_fhir(code))
            .transpose()?;
        let contacts =
            person.attributes_of_type(|type_name| self.cfg.is_contact_attribute_type(type_name));

        Ok(PersonResource {
            id: person.uuid.clone(),
            active: Some(!person.voided),
            gender,
            name: translate_all(&person.names, |n| self.name.to_fhir(n))?,
            telecom: translate_all(contacts, |a| self.contact.to_fhir(a))?,
            address: translate_all(&person.addresses, |a| self.address.to_fhir(a))?,
            link: Self::patient_link(person),
            deceased: deceased_from_record(person.dead, person.death_date),
        })
    }

    fn to_record(&self, resource: &PersonResource) -> TranslatorResult<PersonRecord> {
        tracing::trace!(id = ?resource.id, "translating FHIR person to record");

        let death = death_from_deceased(resource.deceased.as_ref());
        let mut person = PersonRecord {
            uuid: resource.id.clone(),
            gender: resource
                .gender
                .as_ref()
                .map(|gender| self.gender.to_record(gender))
                .transpose()?,
            names: translate_all(&resource.name, |n| self.name.to_record(n))?,
            addresses: translate_all(&resource.address, |a| self.address.to_record(a))?,
            dead: death.dead,
            death_date: death.death_date,
            ..PersonRecord::default()
        };

        if let Some(active) = resource.active {
            person.voided = !active;
            if person.voided {
                person.void_reason = Some(self.cfg.void_reason().to_string());
            }
        }

        Ok(person)
    }
}
