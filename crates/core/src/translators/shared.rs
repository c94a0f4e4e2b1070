//! Collection and decision helpers shared by the composite translators.

use crate::TranslatorResult;
use chrono::{DateTime, Utc};
use fhir::Deceased;

/// Translate every element of `items` in order, stopping at the first error.
///
/// The output is a freshly built `Vec` with one element per input element; nothing is sorted,
/// merged or dropped.
pub fn translate_all<'a, S, T, I, F>(items: I, translate: F) -> TranslatorResult<Vec<T>>
where
    S: 'a,
    I: IntoIterator<Item = &'a S>,
    F: FnMut(&'a S) -> TranslatorResult<T>,
{
    items.into_iter().map(translate).collect()
}

/// The `deceased[x]` value implied by an internal death flag and date.
///
/// - `dead = true` with a date gives the date-time form.
/// - `dead` set without a usable date gives the boolean form.
/// - `dead` unset gives no value; a stray date alone is not evidence of death.
pub fn deceased_from_record(
    dead: Option<bool>,
    death_date: Option<DateTime<Utc>>,
) -> Option<Deceased> {
    match (dead, death_date) {
        (Some(true), Some(at)) => Some(Deceased::DateTime(at)),
        (Some(dead), _) => Some(Deceased::Boolean(dead)),
        (None, _) => None,
    }
}

/// Internal death fields restored from a `deceased[x]` value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordedDeath {
    pub dead: Option<bool>,
    pub death_date: Option<DateTime<Utc>>,
}

/// Inverse of [`deceased_from_record`]. An absent value leaves both fields unset.
pub fn death_from_deceased(deceased: Option<&Deceased>) -> RecordedDeath {
    match deceased {
        Some(Deceased::Boolean(dead)) => RecordedDeath {
            dead: Some(*dead),
            death_date: None,
        },
        Some(Deceased::DateTime(at)) => RecordedDeath {
            dead: Some(true),
            death_date: Some(*at),
        },
        None => RecordedDeath::default(),
    }
}
