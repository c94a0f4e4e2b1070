//! Constants used throughout the translation core.
//!
//! Literal values that appear on the wire or in audit fields live here so that every translator
//! reads them from one place.

/// Default name of the person-attribute type whose values become telecom contact points.
pub const DEFAULT_CONTACT_ATTRIBUTE_TYPE: &str = "contact";

/// Void reason recorded when an inbound resource marked inactive voids a record.
pub const VOIDED_BY_FHIR_MODULE: &str = "Voided by FHIR module";

/// Resource type used for person → patient link targets.
pub const PATIENT_RESOURCE_TYPE: &str = "Patient";

