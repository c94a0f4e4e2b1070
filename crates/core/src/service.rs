//! Translator service.
//!
//! Holds one fully wired set of translators built from a single [`TranslatorConfig`]. Build it
//! once at startup and share it; every translator inside is stateless and `Send + Sync`.

use crate::config::TranslatorConfig;
use crate::translators::{PatientTranslator, PersonTranslator};
use std::sync::Arc;

/// The translators a host application exposes.
#[derive(Clone)]
pub struct TranslatorService {
    cfg: Arc<TranslatorConfig>,
    person: PersonTranslator,
    patient: PatientTranslator,
}

impl TranslatorService {
    /// Creates a new instance of TranslatorService wired to the built-in collaborators.
    pub fn new(cfg: Arc<TranslatorConfig>) -> Self {
        Self {
            person: PersonTranslator::with_defaults(cfg.clone()),
            patient: PatientTranslator::with_defaults(cfg.clone()),
            cfg,
        }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.cfg
    }

    pub fn person(&self) -> &PersonTranslator {
        &self.person
    }

    pub fn patient(&self) -> &PatientTranslator {
        &self.patient
    }
}

impl Default for TranslatorService {
    fn default() -> Self {
        Self::new(Arc::new(TranslatorConfig::default()))
    }
}
