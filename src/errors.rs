use poise::serenity_prelude as serenity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<serenity::Error>),
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Tagged failure of a single call against the Discord API.
///
/// Every variant keeps the description text so it can still be shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("{0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("missing permissions: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Unknown(String),
}

impl PlatformError {
    /// Classifies an unsuccessful HTTP response by status code.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => Self::Validation(message),
            403 => Self::PermissionDenied(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            _ => Self::Unknown(message),
        }
    }

    /// The bare description, without the variant prefix.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Validation(m)
            | Self::NotFound(m)
            | Self::RateLimited(m)
            | Self::PermissionDenied(m)
            | Self::Unknown(m) => m,
        }
    }
}

impl From<serenity::Error> for PlatformError {
    fn from(value: serenity::Error) -> Self {
        match value {
            serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) => {
                Self::from_status(response.status_code.as_u16(), response.error.message)
            }
            other => Self::Unknown(other.to_string()),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
