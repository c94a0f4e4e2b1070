//! Person address ↔ FHIR address.

use super::name::join_non_empty;
use super::FhirTranslator;
use crate::TranslatorResult;
use fhir::Address;
use records::PersonAddress;

/// Default address translator.
///
/// `address1` and `address2` become the `line` list. In reverse, the first line is `address1`
/// and any further lines are joined with ", " into `address2`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddressTranslator;

impl FhirTranslator<PersonAddress, Address> for AddressTranslator {
    fn to_fhir(&self, record: &PersonAddress) -> TranslatorResult<Address> {
        let line = [&record.address1, &record.address2]
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        Ok(Address {
            id: record.uuid.clone(),
            line,
            city: record.city_village.clone(),
            district: record.county_district.clone(),
            state: record.state_province.clone(),
            postal_code: record.postal_code.clone(),
            country: record.country.clone(),
        })
    }

    fn to_record(&self, resource: &Address) -> TranslatorResult<PersonAddress> {
        let mut lines = resource.line.iter();
        let address1 = lines.next().cloned();
        let address2 = join_non_empty(lines, ", ");

        Ok(PersonAddress {
            uuid: resource.id.clone(),
            preferred: false,
            address1,
            address2,
            city_village: resource.city.clone(),
            county_district: resource.district.clone(),
            state_province: resource.state.clone(),
            postal_code: resource.postal_code.clone(),
            country: resource.country.clone(),
        })
    }
}
