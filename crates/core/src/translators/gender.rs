//! Gender code ↔ administrative gender.

use super::FhirTranslator;
use crate::TranslatorResult;
use fhir::AdministrativeGender;

/// Maps single-letter internal gender codes to the FHIR administrative-gender value set.
///
/// `M`, `F`, `O` and `U` map to male, female, other and unknown. Codes are matched
/// case-insensitively after trimming; any other code maps to unknown rather than failing.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenderTranslator;

impl FhirTranslator<String, AdministrativeGender> for GenderTranslator {
    fn to_fhir(&self, record: &String) -> TranslatorResult<AdministrativeGender> {
        let gender = match record.trim().to_ascii_uppercase().as_str() {
            "M" => AdministrativeGender::Male,
            "F" => AdministrativeGender::Female,
            "O" => AdministrativeGender::Other,
            "U" => AdministrativeGender::Unknown,
            other => {
                tracing::warn!(code = other, "unrecognised gender code, using unknown");
                AdministrativeGender::Unknown
            }
        };
        Ok(gender)
    }

    fn to_record(&self, resource: &AdministrativeGender) -> TranslatorResult<String> {
        let code = match resource {
            AdministrativeGender::Male => "M",
            AdministrativeGender::Female => "F",
            AdministrativeGender::Other => "O",
            AdministrativeGender::Unknown => "U",
        };
        Ok(code.to_string())
    }
}
