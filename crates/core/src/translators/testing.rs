//! Stand-in collaborators for translator tests.

use super::FhirTranslator;
use crate::{TranslatorError, TranslatorResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Always fails, in both directions.
pub(crate) struct Failing(pub &'static str);

impl<R, F> FhirTranslator<R, F> for Failing {
    fn to_fhir(&self, _record: &R) -> TranslatorResult<F> {
        Err(TranslatorError::Collaborator {
            translator: self.0,
            message: "stand-in failure".into(),
        })
    }

    fn to_record(&self, _resource: &F) -> TranslatorResult<R> {
        Err(TranslatorError::Collaborator {
            translator: self.0,
            message: "stand-in failure".into(),
        })
    }
}

/// Returns clones of fixed values regardless of input.
pub(crate) struct Fixed<R, F> {
    pub record: R,
    pub resource: F,
}

impl<R, F> FhirTranslator<R, F> for Fixed<R, F>
where
    R: Clone + Send + Sync,
    F: Clone + Send + Sync,
{
    fn to_fhir(&self, _record: &R) -> TranslatorResult<F> {
        Ok(self.resource.clone())
    }

    fn to_record(&self, _resource: &F) -> TranslatorResult<R> {
        Ok(self.record.clone())
    }
}

/// Delegates to an inner translator and counts calls.
pub(crate) struct Counting<R, F> {
    inner: Arc<dyn FhirTranslator<R, F>>,
    calls: Arc<AtomicUsize>,
}

impl<R, F> Counting<R, F> {
    pub(crate) fn wrap(inner: Arc<dyn FhirTranslator<R, F>>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl<R, F> FhirTranslator<R, F> for Counting<R, F> {
    fn to_fhir(&self, record: &R) -> TranslatorResult<F> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.to_fhir(record)
    }

    fn to_record(&self, resource: &F) -> TranslatorResult<R> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.to_record(resource)
    }
}
