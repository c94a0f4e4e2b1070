//! Patient record ↔ FHIR patient.

use super::shared::{death_from_deceased, deceased_from_record, translate_all};
use super::{
    AddressTranslator, FhirTranslator, GenderTranslator, IdentifierTranslator, NameTranslator,
    SharedTranslator,
};
use crate::config::TranslatorConfig;
use crate::TranslatorResult;
use fhir::{Address, AdministrativeGender, HumanName, Identifier, PatientResource};
use records::{PatientIdentifier, PatientRecord, PersonAddress, PersonName, PersonRecord};
use std::sync::Arc;

/// Translates a patient aggregate to and from a FHIR patient.
///
/// Both directions are complete for the fields a patient resource carries: identity, active
/// state, death, identifiers, names, gender and addresses. Collections keep their order and
/// multiplicity.
#[derive(Clone)]
pub struct PatientTranslator {
    cfg: Arc<TranslatorConfig>,
    identifier: SharedTranslator<PatientIdentifier, Identifier>,
    name: SharedTranslator<PersonName, HumanName>,
    gender: SharedTranslator<String, AdministrativeGender>,
    address: SharedTranslator<PersonAddress, Address>,
}

impl PatientTranslator {
    /// Creates a patient translator from explicit collaborators.
    pub fn new(
        cfg: Arc<TranslatorConfig>,
        identifier: SharedTranslator<PatientIdentifier, Identifier>,
        name: SharedTranslator<PersonName, HumanName>,
        gender: SharedTranslator<String, AdministrativeGender>,
        address: SharedTranslator<PersonAddress, Address>,
    ) -> Self {
        Self {
            cfg,
            identifier,
            name,
            gender,
            address,
        }
    }

    /// Creates a patient translator wired to the built-in collaborators.
    pub fn with_defaults(cfg: Arc<TranslatorConfig>) -> Self {
        Self::new(
            cfg,
            Arc::new(IdentifierTranslator),
            Arc::new(NameTranslator),
            Arc::new(GenderTranslator),
            Arc::new(AddressTranslator),
        )
    }
}

impl FhirTranslator<PatientRecord, PatientResource> for PatientTranslator {
    fn to_fhir(&self, patient: &PatientRecord) -> TranslatorResult<PatientResource> {
        tracing::trace!(uuid = ?patient.uuid(), "translating patient to FHIR");
        let person = &patient.person;

        Ok(PatientResource {
            id: person.uuid.clone(),
            active: Some(!person.voided),
            identifier: translate_all(&patient.identifiers, |i| self.identifier.to_fhir(i))?,
            name: translate_all(&person.names, |n| self.name.to_fhir(n))?,
            gender: person
                .gender
                .as_ref()
                .map(|code| self.gender.to_fhir(code))
                .transpose()?,
            address: translate_all(&person.addresses, |a| self.address.to_fhir(a))?,
            deceased: deceased_from_record(person.dead, person.death_date),
        })
    }

    fn to_record(&self, resource: &PatientResource) -> TranslatorResult<PatientRecord> {
        tracing::trace!(id = ?resource.id, "translating FHIR patient to record");

        let death = death_from_deceased(resource.deceased.as_ref());
        let mut person = PersonRecord {
            uuid: resource.id.clone(),
            dead: death.dead,
            death_date: death.death_date,
            gender: resource
                .gender
                .as_ref()
                .map(|gender| self.gender.to_record(gender))
                .transpose()?,
            names: translate_all(&resource.name, |n| self.name.to_record(n))?,
            addresses: translate_all(&resource.address, |a| self.address.to_record(a))?,
            ..PersonRecord::default()
        };

        if let Some(active) = resource.active {
            person.voided = !active;
            if person.voided {
                person.void_reason = Some(self.cfg.void_reason().to_string());
            }
        }

        let mut patient = PatientRecord::new(person);
        patient.identifiers =
            translate_all(&resource.identifier, |i| self.identifier.to_record(i))?;
        Ok(patient)
    }
}
