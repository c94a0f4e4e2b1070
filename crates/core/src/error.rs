/// Errors raised while translating between the internal and external models.
///
/// The built-in translators never produce these on their own; they exist so that substituted
/// collaborators can fail, and so their failures reach the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{translator} translator failed: {message}")]
    Collaborator {
        translator: &'static str,
        message: String,
    },
}

pub type TranslatorResult<T> = std::result::Result<T, TranslatorError>;

/// Errors raised by the lookup/resource-provider boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    NotFound(String),
    #[error("lookup failed: {0}")]
    Lookup(String),
    #[error(transparent)]
    Translation(#[from] TranslatorError),
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
