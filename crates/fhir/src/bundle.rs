//! Search-result bundles.
//!
//! Only the `searchset` shape is produced: a total plus one entry per matching resource. Bundles
//! are render-only; inbound bundles are not accepted by this crate.

use crate::patient::{self, PatientResource, PatientWire};
use crate::person::{self, PersonResource, PersonWire};
use crate::wire::{self, WireFormat};
use crate::FhirResult;
use serde::Serialize;

const RESOURCE_TYPE: &str = "Bundle";
const SEARCHSET: &str = "searchset";

/// A resource carried by a bundle entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BundledResource {
    Patient(PatientResource),
    Person(PersonResource),
}

impl BundledResource {
    fn id(&self) -> Option<&str> {
        match self {
            BundledResource::Patient(p) => p.id.as_deref(),
            BundledResource::Person(p) => p.id.as_deref(),
        }
    }

    fn resource_type(&self) -> &'static str {
        match self {
            BundledResource::Patient(_) => patient::RESOURCE_TYPE,
            BundledResource::Person(_) => person::RESOURCE_TYPE,
        }
    }
}

/// One bundle entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleEntry {
    /// `<ResourceType>/<id>` when the resource has an id.
    pub full_url: Option<String>,
    pub resource: BundledResource,
}

/// A `searchset` bundle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    pub total: usize,
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Build a searchset from resources, preserving their order.
    pub fn searchset<I>(resources: I) -> Self
    where
        I: IntoIterator<Item = BundledResource>,
    {
        let entry: Vec<BundleEntry> = resources
            .into_iter()
            .map(|resource| {
                let full_url = resource
                    .id()
                    .map(|id| format!("{}/{id}", resource.resource_type()));
                BundleEntry { full_url, resource }
            })
            .collect();

        Self {
            total: entry.len(),
            entry,
        }
    }

    /// Convenience for a searchset of patients.
    pub fn of_patients(patients: Vec<PatientResource>) -> Self {
        Self::searchset(patients.into_iter().map(BundledResource::Patient))
    }

    /// Render as JSON or YAML text.
    pub fn render(&self, format: WireFormat) -> FhirResult<String> {
        let wire = BundleWire {
            resource_type: RESOURCE_TYPE,
            bundle_type: SEARCHSET,
            total: self.total,
            entry: self
                .entry
                .iter()
                .map(|e| BundleEntryWire {
                    full_url: e.full_url.clone(),
                    resource: match &e.resource {
                        BundledResource::Patient(p) => {
                            ResourceWire::Patient(patient::domain_to_wire(p))
                        }
                        BundledResource::Person(p) => {
                            ResourceWire::Person(person::domain_to_wire(p))
                        }
                    },
                })
                .collect(),
        };
        wire::encode(&wire, format)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BundleWire {
    resource_type: &'static str,
    #[serde(rename = "type")]
    bundle_type: &'static str,
    total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entry: Vec<BundleEntryWire>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BundleEntryWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_url: Option<String>,
    resource: ResourceWire,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ResourceWire {
    Patient(PatientWire),
    Person(PersonWire),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchset_counts_and_orders_entries() {
        let bundle = Bundle::of_patients(vec![
            PatientResource {
                id: Some("b".into()),
                ..PatientResource::default()
            },
            PatientResource::default(),
            PatientResource {
                id: Some("a".into()),
                ..PatientResource::default()
            },
        ]);

        assert_eq!(bundle.total, 3);
        let urls: Vec<_> = bundle.entry.iter().map(|e| e.full_url.clone()).collect();
        assert_eq!(
            urls,
            vec![Some("Patient/b".to_string()), None, Some("Patient/a".to_string())]
        );
    }

    #[test]
    fn renders_nested_resources() {
        let bundle = Bundle::searchset(vec![BundledResource::Person(PersonResource {
            id: Some("p1".into()),
            active: Some(true),
            ..PersonResource::default()
        })]);

        let json = bundle.render(WireFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["resourceType"], "Bundle");
        assert_eq!(value["type"], "searchset");
        assert_eq!(value["total"], 1);
        assert_eq!(value["entry"][0]["fullUrl"], "Person/p1");
        assert_eq!(value["entry"][0]["resource"]["resourceType"], "Person");
        assert_eq!(value["entry"][0]["resource"]["active"], true);
    }

    #[test]
    fn empty_searchset_has_zero_total() {
        let json = Bundle::of_patients(vec![])
            .render(WireFormat::Json)
            .expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["total"], 0);
        assert!(value.get("entry").is_none());
    }
}
