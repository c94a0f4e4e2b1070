//! Person name ↔ human name.

use super::FhirTranslator;
use crate::TranslatorResult;
use fhir::{HumanName, NameUse};
use records::PersonName;

/// Default name translator.
///
/// Given and middle names become the `given` list in that order; a preferred name is marked
/// `official`. In reverse, the first given name is the given name and any remaining given names
/// are joined with a space into the middle name.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameTranslator;

impl FhirTranslator<PersonName, HumanName> for NameTranslator {
    fn to_fhir(&self, record: &PersonName) -> TranslatorResult<HumanName> {
        let given = [&record.given_name, &record.middle_name]
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        Ok(HumanName {
            id: record.uuid.clone(),
            use_type: record.preferred.then_some(NameUse::Official),
            family: record.family_name.clone(),
            given,
            prefix: record.prefix.iter().cloned().collect(),
            suffix: record.family_name_suffix.iter().cloned().collect(),
        })
    }

    fn to_record(&self, resource: &HumanName) -> TranslatorResult<PersonName> {
        let mut given = resource.given.iter();
        let given_name = given.next().cloned();
        let middle_name = join_non_empty(given, " ");

        Ok(PersonName {
            uuid: resource.id.clone(),
            preferred: resource.use_type == Some(NameUse::Official),
            prefix: join_non_empty(resource.prefix.iter(), " "),
            given_name,
            middle_name,
            family_name: resource.family.clone(),
            family_name_suffix: join_non_empty(resource.suffix.iter(), " "),
        })
    }
}

pub(crate) fn join_non_empty<'a, I>(parts: I, separator: &str) -> Option<String>
where
    I: Iterator<Item = &'a String>,
{
    let parts: Vec<&str> = parts.map(String::as_str).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    }
}
