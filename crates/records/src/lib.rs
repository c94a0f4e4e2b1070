//! Internal clinical-record model.
//!
//! This crate holds the host application's view of a person and a patient: the aggregate roots
//! ([`PersonRecord`], [`PatientRecord`]) together with the sub-records they own (names,
//! addresses, attributes, identifiers). It also provides strict YAML/JSON readers and writers so
//! records can be exchanged as files.
//!
//! Exchange-standard meaning lives in the `fhir` crate; translation between the two lives in
//! `bridge-core`. This crate has no knowledge of either.

pub mod patient;
pub mod person;

pub use patient::{PatientIdentifier, PatientIdentifierType, PatientRecord};
pub use person::{PersonAddress, PersonAttribute, PersonAttributeType, PersonName, PersonRecord};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors returned by the `records` crate.
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("record schema mismatch at {path}: {message}")]
    SchemaMismatch { path: String, message: String },
}

/// Type alias for Results that can fail with a [`RecordsError`].
pub type RecordsResult<T> = Result<T, RecordsError>;

/// Read a person record from YAML.
pub fn read_person_yaml(yaml: &str) -> RecordsResult<PersonRecord> {
    decode_yaml(yaml)
}

/// Read a patient record from YAML.
pub fn read_patient_yaml(yaml: &str) -> RecordsResult<PatientRecord> {
    decode_yaml(yaml).map(PatientRecord::normalised)
}

/// Write a person record to YAML.
pub fn write_person_yaml(record: &PersonRecord) -> RecordsResult<String> {
    Ok(serde_yaml::to_string(record)?)
}

/// Write a patient record to YAML.
pub fn write_patient_yaml(record: &PatientRecord) -> RecordsResult<String> {
    Ok(serde_yaml::to_string(record)?)
}

/// Read a person record from JSON.
pub fn read_person_json(json: &str) -> RecordsResult<PersonRecord> {
    decode_json(json)
}

/// Read a patient record from JSON.
pub fn read_patient_json(json: &str) -> RecordsResult<PatientRecord> {
    decode_json(json).map(PatientRecord::normalised)
}

/// Read a list of patient records from YAML.
pub fn read_patients_yaml(yaml: &str) -> RecordsResult<Vec<PatientRecord>> {
    decode_yaml::<Vec<PatientRecord>>(yaml)
        .map(|patients| patients.into_iter().map(PatientRecord::normalised).collect())
}

/// Read a list of patient records from JSON.
pub fn read_patients_json(json: &str) -> RecordsResult<Vec<PatientRecord>> {
    decode_json::<Vec<PatientRecord>>(json)
        .map(|patients| patients.into_iter().map(PatientRecord::normalised).collect())
}

/// Write a person record to pretty-printed JSON.
pub fn write_person_json(record: &PersonRecord) -> RecordsResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Write a patient record to pretty-printed JSON.
pub fn write_patient_json(record: &PatientRecord) -> RecordsResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

fn decode_yaml<T: DeserializeOwned>(yaml: &str) -> RecordsResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml);
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        schema_mismatch(path, err.into_inner().to_string())
    })
}

fn decode_json<T: DeserializeOwned>(json: &str) -> RecordsResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        schema_mismatch(path, err.into_inner().to_string())
    })
}

fn schema_mismatch(path: String, message: String) -> RecordsError {
    let path = if path.is_empty() || path == "." {
        "<root>".to_string()
    } else {
        path
    };
    RecordsError::SchemaMismatch { path, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_patient_yaml_with_nested_person() {
        let input = r#"person:
  uuid: 123456-abcdef-123456
  voided: true
  dead: true
  death_date: 1997-08-31T00:23:00Z
  gender: M
  names:
    - given_name: Jean Claude
      family_name: van Damme
identifiers:
  - uuid: 654321-fedcba-654321
    identifier: MRN-1
"#;

        let patient = read_patient_yaml(input).expect("parse patient yaml");
        assert_eq!(patient.person.uuid.as_deref(), Some("123456-abcdef-123456"));
        assert!(patient.person.voided);
        assert!(patient.person.is_patient);
        assert_eq!(patient.person.dead, Some(true));
        assert_eq!(
            patient.person.death_date.map(|d| d.timestamp()),
            Some(872986980)
        );
        assert_eq!(patient.identifiers.len(), 1);
        assert_eq!(patient.person.names[0].family_name.as_deref(), Some("van Damme"));
    }

    #[test]
    fn rejects_unknown_keys_with_path() {
        let input = r#"uuid: abc
names:
  - given_name: Sarah
    nickname: Sally
"#;

        let err = read_person_yaml(input).expect_err("unknown key");
        match err {
            RecordsError::SchemaMismatch { path, message } => {
                assert!(path.starts_with("names"));
                assert!(message.contains("nickname"));
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn json_and_yaml_agree() {
        let mut person = PersonRecord {
            uuid: Some("1223et-098342-2723bsd".into()),
            gender: Some("F".into()),
            ..PersonRecord::default()
        };
        person.attributes.push(PersonAttribute {
            uuid: Some("1232-3434-3434-sd45".into()),
            value: Some("0712893493".into()),
            attribute_type: Some(PersonAttributeType::named("contact")),
        });

        let yaml = write_person_yaml(&person).expect("yaml");
        let json = write_person_json(&person).expect("json");
        assert_eq!(read_person_yaml(&yaml).expect("reparse yaml"), person);
        assert_eq!(read_person_json(&json).expect("reparse json"), person);
    }

    #[test]
    fn minimal_person_uses_defaults() {
        let person = read_person_json("{}").expect("empty object");
        assert_eq!(person, PersonRecord::default());
        assert!(!person.voided);
        assert!(person.dead.is_none());
    }

    #[test]
    fn reads_patient_lists() {
        let input = r#"[
  {"person": {"uuid": "p1"}},
  {"person": {"uuid": "p2", "voided": true}, "identifiers": [{"identifier": "MRN-2"}]}
]"#;

        let patients = read_patients_json(input).expect("parse list");
        assert_eq!(patients.len(), 2);
        assert!(patients.iter().all(|p| p.person.is_patient));
        assert_eq!(patients[1].uuid(), Some("p2"));

        let err = read_patients_yaml("- person: {uuid: p1, height: 2}\n").expect_err("unknown key");
        assert!(matches!(err, RecordsError::SchemaMismatch { .. }));
    }
}
