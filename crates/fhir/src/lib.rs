//! FHIR wire/boundary support for the translation layer.
//!
//! This crate provides the **external resource model** the translators produce and consume,
//! together with strict wire (de)serialisation:
//! - Person and Patient resources with their datatypes
//! - the `deceased[x]` choice element as a tagged [`Deceased`] value
//! - searchset [`Bundle`]s for returning result sets
//!
//! This crate focuses on:
//! - FHIR R4 semantic alignment for the subset of elements the translators handle
//! - serialisation/deserialisation in JSON and YAML
//! - rejecting malformed or ambiguous documents with a path to the failing element
//!
//! It knows nothing about the internal record model; see `bridge-core` for translation.

pub mod bundle;
pub mod datatypes;
pub mod patient;
pub mod person;
pub mod wire;

// Re-export facades
pub use patient::Patient;
pub use person::Person;

// Re-export public domain-level types
pub use bundle::{Bundle, BundleEntry, BundledResource};
pub use datatypes::{
    Address, AdministrativeGender, CodeableConcept, ContactPoint, Deceased, HumanName, Identifier,
    IdentifierUse, NameUse, PersonLink, Reference,
};
pub use patient::PatientResource;
pub use person::PersonResource;
pub use wire::WireFormat;

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
