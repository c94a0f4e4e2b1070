//! Contact attribute ↔ telecom contact point.

use super::FhirTranslator;
use crate::TranslatorResult;
use fhir::ContactPoint;
use records::PersonAttribute;

/// Copies identity and value between a contact attribute and a contact point.
///
/// Nothing else is set in either direction. In particular `to_record` leaves the attribute type
/// empty: deciding which type a new attribute belongs to is the caller's concern.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContactTranslator;

impl FhirTranslator<PersonAttribute, ContactPoint> for ContactTranslator {
    fn to_fhir(&self, record: &PersonAttribute) -> TranslatorResult<ContactPoint> {
        Ok(ContactPoint {
            id: record.uuid.clone(),
            value: record.value.clone(),
        })
    }

    fn to_record(&self, resource: &ContactPoint) -> TranslatorResult<PersonAttribute> {
        Ok(PersonAttribute {
            uuid: resource.id.clone(),
            value: resource.value.clone(),
            attribute_type: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::PersonAttributeType;

    const CONTACT_ATTRIBUTE_UUID: &str = "12233-34b34-345234";
    const CONTACT_VALUE: &str = "0723781237";

    #[test]
    fn translates_attribute_uuid_to_id() {
        let attribute = PersonAttribute {
            uuid: Some(CONTACT_ATTRIBUTE_UUID.into()),
            ..PersonAttribute::default()
        };

        let result = ContactTranslator.to_fhir(&attribute).expect("translate");
        assert_eq!(result.id.as_deref(), Some(CONTACT_ATTRIBUTE_UUID));
        assert!(result.value.is_none());
    }

    #[test]
    fn translates_attribute_value() {
        let attribute = PersonAttribute {
            value: Some(CONTACT_VALUE.into()),
            attribute_type: Some(PersonAttributeType::named("contact")),
            ..PersonAttribute::default()
        };

        let result = ContactTranslator.to_fhir(&attribute).expect("translate");
        assert_eq!(result.value.as_deref(), Some(CONTACT_VALUE));
        assert!(result.id.is_none());
    }

    #[test]
    fn translates_contact_point_id_to_uuid() {
        let contact_point = ContactPoint {
            id: Some(CONTACT_ATTRIBUTE_UUID.into()),
            value: None,
        };

        let result = ContactTranslator.to_record(&contact_point).expect("translate");
        assert_eq!(result.uuid.as_deref(), Some(CONTACT_ATTRIBUTE_UUID));
    }

    #[test]
    fn translates_contact_point_value() {
        let contact_point = ContactPoint {
            id: None,
            value: Some(CONTACT_VALUE.into()),
        };

        let result = ContactTranslator.to_record(&contact_point).expect("translate");
        assert_eq!(result.value.as_deref(), Some(CONTACT_VALUE));
        assert!(result.attribute_type.is_none());
    }

    #[test]
    fn absent_input_gives_empty_output() {
        let result = ContactTranslator.to_fhir_or_default(None).expect("translate");
        assert_eq!(result, ContactPoint::default());
    }
}
