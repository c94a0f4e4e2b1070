//! Person aggregate and the sub-records it owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person as held by the host application.
///
/// `voided` carries the inverse of an "active" flag: a voided person is retired, not deleted.
/// `dead` is optional so that "never recorded" can be told apart from "recorded as alive", and
/// `death_date` is only meaningful while `dead` is `Some(true)`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PersonRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    pub voided: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<DateTime<Utc>>,

    /// Single-token gender code, e.g. `M`, `F`, `O`, `U`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Set when this person is also registered as a patient.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_patient: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<PersonName>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<PersonAddress>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<PersonAttribute>,
}

impl PersonRecord {
    /// Iterates attributes whose type name satisfies `is_match`.
    pub fn attributes_of_type<'a, F>(&'a self, is_match: F) -> impl Iterator<Item = &'a PersonAttribute>
    where
        F: Fn(&str) -> bool + 'a,
    {
        self.attributes.iter().filter(move |attribute| {
            attribute
                .type_name()
                .map(|name| is_match(name))
                .unwrap_or(false)
        })
    }
}

/// One name held by a person.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PersonName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub preferred: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name_suffix: Option<String>,
}

/// One postal address held by a person.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PersonAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub preferred: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_village: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub county_district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A typed free-text attribute, e.g. a phone number under a "contact" type.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PersonAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<PersonAttributeType>,
}

impl PersonAttribute {
    /// Name of this attribute's type descriptor, if it has one.
    pub fn type_name(&self) -> Option<&str> {
        self.attribute_type.as_ref().map(|t| t.name.as_str())
    }
}

/// Type descriptor of a [`PersonAttribute`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PersonAttributeType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    pub name: String,
}

impl PersonAttributeType {
    /// An attribute type carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            uuid: None,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_attributes_by_type_name() {
        let contact = PersonAttribute {
            uuid: Some("a".into()),
            value: Some("0712893493".into()),
            attribute_type: Some(PersonAttributeType::named("contact")),
        };
        let untyped = PersonAttribute {
            uuid: Some("b".into()),
            value: Some("x".into()),
            attribute_type: None,
        };
        let other = PersonAttribute {
            uuid: Some("c".into()),
            value: Some("Kenya".into()),
            attribute_type: Some(PersonAttributeType::named("Birthplace")),
        };
        let person = PersonRecord {
            attributes: vec![contact.clone(), untyped, other],
            ..PersonRecord::default()
        };

        let matched: Vec<_> = person.attributes_of_type(|n| n == "contact").collect();
        assert_eq!(matched, vec![&contact]);
    }
}
