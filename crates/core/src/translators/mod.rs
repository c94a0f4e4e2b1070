//! Bidirectional translators between the internal record model and FHIR resources.
//!
//! Every translator implements [`FhirTranslator`], a two-method capability:
//! `to_fhir` (internal → external) and `to_record` (external → internal). The composite
//! translators ([`PersonTranslator`], [`PatientTranslator`]) hold their collaborators only
//! through that capability, so any collaborator can be swapped for another implementation.
//!
//! All translators are stateless. They hold immutable, shared references to their configuration
//! and collaborators and can be called from many threads at once.

pub mod address;
pub mod contact;
pub mod gender;
pub mod identifier;
pub mod name;
pub mod patient;
pub mod person;
pub mod shared;

#[cfg(test)]
pub(crate) mod testing;

pub use address::AddressTranslator;
pub use contact::ContactTranslator;
pub use gender::GenderTranslator;
pub use identifier::IdentifierTranslator;
pub use name::NameTranslator;
pub use patient::PatientTranslator;
pub use person::PersonTranslator;

use crate::TranslatorResult;
use std::sync::Arc;

/// Bidirectional translation between an internal type `R` and an external type `F`.
pub trait FhirTranslator<R, F>: Send + Sync {
    /// Translate an internal value to its external form.
    fn to_fhir(&self, record: &R) -> TranslatorResult<F>;

    /// Translate an external value to its internal form.
    fn to_record(&self, resource: &F) -> TranslatorResult<R>;

    /// Like [`to_fhir`](Self::to_fhir), but an absent input yields an empty external value.
    fn to_fhir_or_default(&self, record: Option<&R>) -> TranslatorResult<F>
    where
        F: Default,
    {
        match record {
            Some(record) => self.to_fhir(record),
            None => Ok(F::default()),
        }
    }

    /// Like [`to_record`](Self::to_record), but an absent input yields an empty internal value.
    fn to_record_or_default(&self, resource: Option<&F>) -> TranslatorResult<R>
    where
        R: Default,
    {
        match resource {
            Some(resource) => self.to_record(resource),
            None => Ok(R::default()),
        }
    }
}

/// A collaborator held by a composite translator.
pub type SharedTranslator<R, F> = Arc<dyn FhirTranslator<R, F>>;
