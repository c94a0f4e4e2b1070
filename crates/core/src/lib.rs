//! # Bridge Core
//!
//! Translation between the internal clinical record model and FHIR resources.
//!
//! This crate contains the pure translation layer:
//! - Bidirectional translators for gender, names, addresses, identifiers and contacts
//! - Composite person and patient translators built from those collaborators
//! - Configuration resolved once at startup and shared behind an `Arc`
//! - A lookup/resource-provider boundary returning FHIR patients and searchset bundles
//!
//! **No I/O concerns**: reading and writing documents belongs in `records` and `fhir`; process
//! wiring (environment, logging, command line) belongs in `bridge-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod provider;
pub mod service;
pub mod translators;

pub use config::{AttributeTypeMatch, TranslatorConfig};
pub use error::{ProviderError, ProviderResult, TranslatorError, TranslatorResult};
pub use provider::{FhirPatientService, InMemoryPatientLookup, PatientLookup, PatientResourceProvider};
pub use service::TranslatorService;
pub use translators::{
    AddressTranslator, ContactTranslator, FhirTranslator, GenderTranslator, IdentifierTranslator,
    NameTranslator, PatientTranslator, PersonTranslator, SharedTranslator,
};
