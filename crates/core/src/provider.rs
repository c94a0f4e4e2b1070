//! Patient lookup and resource-provider boundary.
//!
//! Responsibilities:
//! - [`PatientLookup`] finds internal patient records by uuid or by name
//! - [`FhirPatientService`] pairs a lookup with a [`PatientTranslator`] and returns FHIR patients
//! - [`PatientResourceProvider`] answers read and search requests, reporting a missing patient as
//!   [`ProviderError::NotFound`] and wrapping search results in a searchset [`Bundle`]
//!
//! Notes:
//! - Storage is out of scope. [`InMemoryPatientLookup`] is the only lookup shipped here; hosts
//!   plug their own store in behind the trait.

use crate::config::TranslatorConfig;
use crate::translators::{FhirTranslator, PatientTranslator};
use crate::{ProviderError, ProviderResult};
use fhir::{Bundle, PatientResource};
use records::{PatientRecord, PersonName};
use std::sync::Arc;

// ============================================================================
// Lookup
// ============================================================================

/// Finds internal patient records.
pub trait PatientLookup: Send + Sync {
    /// The patient with this uuid, if any.
    fn get_by_uuid(&self, uuid: &str) -> ProviderResult<Option<PatientRecord>>;

    /// Patients with any name part matching `name`.
    fn find_by_name(&self, name: &str) -> ProviderResult<Vec<PatientRecord>>;

    /// Patients with a given name matching `given`.
    fn find_by_given_name(&self, given: &str) -> ProviderResult<Vec<PatientRecord>>;

    /// Patients with a family name matching `family`.
    fn find_by_family_name(&self, family: &str) -> ProviderResult<Vec<PatientRecord>>;
}

/// A lookup over patients held in memory.
///
/// Name searches are case-insensitive substring matches over every name a patient has, and
/// skip voided patients. Reads by uuid return voided patients too.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPatientLookup {
    patients: Vec<PatientRecord>,
}

impl InMemoryPatientLookup {
    pub fn new(patients: Vec<PatientRecord>) -> Self {
        Self { patients }
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    fn search<F>(&self, query: &str, name_parts: F) -> Vec<PatientRecord>
    where
        F: Fn(&PersonName) -> Vec<&Option<String>>,
    {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.patients
            .iter()
            .filter(|p| !p.person.voided)
            .filter(|p| {
                p.person.names.iter().any(|name| {
                    name_parts(name)
                        .into_iter()
                        .flatten()
                        .any(|part| part.to_lowercase().contains(&needle))
                })
            })
            .cloned()
            .collect()
    }
}

impl PatientLookup for InMemoryPatientLookup {
    fn get_by_uuid(&self, uuid: &str) -> ProviderResult<Option<PatientRecord>> {
        Ok(self
            .patients
            .iter()
            .find(|p| p.uuid() == Some(uuid))
            .cloned())
    }

    fn find_by_name(&self, name: &str) -> ProviderResult<Vec<PatientRecord>> {
        Ok(self.search(name, |n| {
            vec![&n.given_name, &n.middle_name, &n.family_name]
        }))
    }

    fn find_by_given_name(&self, given: &str) -> ProviderResult<Vec<PatientRecord>> {
        Ok(self.search(given, |n| vec![&n.given_name]))
    }

    fn find_by_family_name(&self, family: &str) -> ProviderResult<Vec<PatientRecord>> {
        Ok(self.search(family, |n| vec![&n.family_name]))
    }
}

// ============================================================================
// FHIR patient service
// ============================================================================

/// Looks patients up and returns them as FHIR resources.
#[derive(Clone)]
pub struct FhirPatientService<L> {
    lookup: L,
    translator: PatientTranslator,
}

impl<L: PatientLookup> FhirPatientService<L> {
    pub fn new(lookup: L, translator: PatientTranslator) -> Self {
        Self { lookup, translator }
    }

    /// Creates a service using the built-in patient translator.
    pub fn with_config(lookup: L, cfg: Arc<TranslatorConfig>) -> Self {
        Self::new(lookup, PatientTranslator::with_defaults(cfg))
    }

    pub fn get_patient_by_uuid(&self, uuid: &str) -> ProviderResult<Option<PatientResource>> {
        self.lookup
            .get_by_uuid(uuid)?
            .map(|patient| self.translator.to_fhir(&patient))
            .transpose()
            .map_err(ProviderError::from)
    }

    pub fn find_patients_by_name(&self, name: &str) -> ProviderResult<Vec<PatientResource>> {
        self.translate(self.lookup.find_by_name(name)?)
    }

    pub fn find_patients_by_given_name(&self, given: &str) -> ProviderResult<Vec<PatientResource>> {
        self.translate(self.lookup.find_by_given_name(given)?)
    }

    pub fn find_patients_by_family_name(
        &self,
        family: &str,
    ) -> ProviderResult<Vec<PatientResource>> {
        self.translate(self.lookup.find_by_family_name(family)?)
    }

    fn translate(&self, patients: Vec<PatientRecord>) -> ProviderResult<Vec<PatientResource>> {
        patients
            .iter()
            .map(|p| self.translator.to_fhir(p).map_err(ProviderError::from))
            .collect()
    }
}

// ============================================================================
// Resource provider
// ============================================================================

/// Read and search entry points for the FHIR `Patient` resource type.
#[derive(Clone)]
pub struct PatientResourceProvider<L> {
    service: FhirPatientService<L>,
}

impl<L: PatientLookup> PatientResourceProvider<L> {
    pub fn new(service: FhirPatientService<L>) -> Self {
        Self { service }
    }

    /// The resource type this provider serves.
    pub fn resource_type(&self) -> &'static str {
        crate::constants::PATIENT_RESOURCE_TYPE
    }

    /// Reads one patient.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] if no patient has this id.
    pub fn get_patient_by_id(&self, id: &str) -> ProviderResult<PatientResource> {
        match self.service.get_patient_by_uuid(id)? {
            Some(patient) => Ok(patient),
            None => {
                tracing::warn!(resource_type = self.resource_type(), id, "resource not found");
                Err(ProviderError::NotFound(format!(
                    "Could not find patient with Id {id}"
                )))
            }
        }
    }

    pub fn find_patients_by_name(&self, name: &str) -> ProviderResult<Bundle> {
        let found = self.service.find_patients_by_name(name)?;
        tracing::debug!(name, total = found.len(), "patient search by name");
        Ok(Bundle::of_patients(found))
    }

    pub fn find_patients_by_given_name(&self, given: &str) -> ProviderResult<Bundle> {
        let found = self.service.find_patients_by_given_name(given)?;
        tracing::debug!(given, total = found.len(), "patient search by given name");
        Ok(Bundle::of_patients(found))
    }

    pub fn find_patients_by_family_name(&self, family: &str) -> ProviderResult<Bundle> {
        let found = self.service.find_patients_by_family_name(family)?;
        tracing::debug!(family, total = found.len(), "patient search by family name");
        Ok(Bundle::of_patients(found))
    }
}
