//! Patient identifier ↔ FHIR identifier.

use super::FhirTranslator;
use crate::TranslatorResult;
use fhir::{CodeableConcept, Identifier, IdentifierUse};
use records::{PatientIdentifier, PatientIdentifierType};

/// Default identifier translator.
///
/// The identifier type's name travels as `type.text`; a preferred identifier is `official`,
/// any other is `usual`. In reverse only the type name can be restored, since resolving it to
/// a stored identifier type is a lookup concern.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentifierTranslator;

impl FhirTranslator<PatientIdentifier, Identifier> for IdentifierTranslator {
    fn to_fhir(&self, record: &PatientIdentifier) -> TranslatorResult<Identifier> {
        let use_type = if record.preferred {
            IdentifierUse::Official
        } else {
            IdentifierUse::Usual
        };

        Ok(Identifier {
            id: record.uuid.clone(),
            use_type: Some(use_type),
            identifier_type: record.identifier_type.as_ref().map(|t| CodeableConcept {
                text: Some(t.name.clone()),
            }),
            system: None,
            value: record.identifier.clone(),
        })
    }

    fn to_record(&self, resource: &Identifier) -> TranslatorResult<PatientIdentifier> {
        let identifier_type = resource
            .identifier_type
            .as_ref()
            .and_then(|t| t.text.clone())
            .map(|name| PatientIdentifierType { uuid: None, name });

        Ok(PatientIdentifier {
            uuid: resource.id.clone(),
            identifier: resource.value.clone(),
            preferred: resource.use_type == Some(IdentifierUse::Official),
            identifier_type,
        })
    }
}
