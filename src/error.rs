use thiserror::Error;

/// Failures surfaced by the identity provider adapter. The adapter does
/// not retry; the message of `Provider` is supplied by the provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity provider rejected the request: {0}")]
    Provider(String),
    #[error("identity request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("identity provider returned an unexpected payload: {0}")]
    Payload(String),
    #[error("identity provider not configured: {0}")]
    NotConfigured(&'static str),
    #[error("another account operation is already in progress")]
    Busy,
}

/// Input problems caught before any mutating call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("at least one learning preference must be selected")]
    NoLearningPreferences,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
}

/// Storage-level failures. The mirror fails soft on these: a corrupted
/// value counts as missing, a failed write is logged and skipped.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl AppError {
    pub fn is_busy(&self) -> bool {
        matches!(self, AppError::Auth(AuthError::Busy))
    }
}
