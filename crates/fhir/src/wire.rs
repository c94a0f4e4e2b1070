//! Shared wire helpers: format selection, path-reporting decode, and the `deceased[x]` pair.

use crate::{Deceased, FhirError, FhirResult};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Text encoding of a resource document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WireFormat {
    #[default]
    Json,
    Yaml,
}

impl WireFormat {
    /// Picks a format from a file extension (`json`, `yaml`, `yml`), case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(WireFormat::Json),
            "yaml" | "yml" => Some(WireFormat::Yaml),
            _ => None,
        }
    }
}

/// Decode `text` into a wire struct, naming the failing path on mismatch.
pub(crate) fn decode<T: DeserializeOwned>(
    text: &str,
    format: WireFormat,
    resource: &str,
) -> FhirResult<T> {
    let result = match format {
        WireFormat::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(text);
            serde_path_to_error::deserialize(&mut deserializer)
                .map_err(|err| (err.path().to_string(), err.into_inner().to_string()))
        }
        WireFormat::Yaml => {
            let deserializer = serde_yaml::Deserializer::from_str(text);
            serde_path_to_error::deserialize(deserializer)
                .map_err(|err| (err.path().to_string(), err.into_inner().to_string()))
        }
    };

    result.map_err(|(path, source)| {
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        FhirError::Translation(format!("{resource} schema mismatch at {path}: {source}"))
    })
}

/// Encode a wire struct.
pub(crate) fn encode<T: Serialize>(value: &T, format: WireFormat) -> FhirResult<String> {
    match format {
        WireFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        WireFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/// Fail unless the document declares the expected `resourceType`.
pub(crate) fn expect_resource_type(actual: &str, expected: &str) -> FhirResult<()> {
    if actual != expected {
        return Err(FhirError::InvalidInput(format!(
            "Expected resourceType '{expected}', got '{actual}'"
        )));
    }
    Ok(())
}

/// Fold the `deceasedBoolean` / `deceasedDateTime` pair into the choice type.
pub(crate) fn deceased_from_wire(
    boolean: Option<bool>,
    date_time: Option<&str>,
) -> FhirResult<Option<Deceased>> {
    match (boolean, date_time) {
        (Some(_), Some(_)) => Err(FhirError::InvalidInput(
            "deceasedBoolean and deceasedDateTime are mutually exclusive".into(),
        )),
        (Some(dead), None) => Ok(Some(Deceased::Boolean(dead))),
        (None, Some(text)) => parse_date_time(text).map(|at| Some(Deceased::DateTime(at))),
        (None, None) => Ok(None),
    }
}

/// Split the choice type back into its wire pair.
pub(crate) fn deceased_to_wire(deceased: Option<&Deceased>) -> (Option<bool>, Option<String>) {
    match deceased {
        Some(Deceased::Boolean(dead)) => (Some(*dead), None),
        Some(Deceased::DateTime(at)) => (None, Some(format_date_time(at))),
        None => (None, None),
    }
}

/// Parse a FHIR `dateTime`.
///
/// Partial forms (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`) are read as the first instant of the period
/// in UTC. A timestamp with an offset is normalised to UTC.
pub(crate) fn parse_date_time(text: &str) -> FhirResult<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(at.with_timezone(&Utc));
    }
    partial_date(text)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FhirError::InvalidInput(format!("invalid dateTime '{text}'")))
}

fn partial_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('-').collect();

    match parts.as_slice() {
        [year] if digits(year, 4) => NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1),
        [year, month] if digits(year, 4) && digits(month, 2) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        [year, month, day] if digits(year, 4) && digits(month, 2) && digits(day, 2) => {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

fn digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn format_date_time(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(WireFormat::from_extension("JSON"), Some(WireFormat::Json));
        assert_eq!(WireFormat::from_extension("yml"), Some(WireFormat::Yaml));
        assert_eq!(WireFormat::from_extension("xml"), None);
    }

    #[test]
    fn deceased_pair_is_exclusive() {
        let err = deceased_from_wire(Some(true), Some("1997-08-31")).expect_err("both set");
        assert!(matches!(err, FhirError::InvalidInput(_)));
        assert_eq!(deceased_from_wire(None, None).expect("absent"), None);
        assert_eq!(
            deceased_from_wire(Some(false), None).expect("boolean"),
            Some(Deceased::Boolean(false))
        );
    }

    #[test]
    fn date_time_round_trips_at_second_precision() {
        let at = parse_date_time("1997-08-31T00:23:00Z").expect("rfc3339");
        assert_eq!(at.timestamp(), 872986980);
        assert_eq!(format_date_time(&at), "1997-08-31T00:23:00Z");
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let at = parse_date_time("1997-08-31").expect("date");
        assert_eq!(format_date_time(&at), "1997-08-31T00:00:00Z");
        assert!(parse_date_time("31/08/1997").is_err());
    }

    #[test]
    fn partial_dates_start_their_period() {
        let year = parse_date_time("1997").expect("year");
        assert_eq!(format_date_time(&year), "1997-01-01T00:00:00Z");

        let month = parse_date_time("1997-08").expect("year and month");
        assert_eq!(format_date_time(&month), "1997-08-01T00:00:00Z");

        assert!(parse_date_time("1997-13").is_err());
        assert!(parse_date_time("97").is_err());
        assert!(parse_date_time("1997-8").is_err());
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let at = parse_date_time("1997-08-31T00:23:00+02:00").expect("offset");
        assert_eq!(format_date_time(&at), "1997-08-30T22:23:00Z");
    }
}
