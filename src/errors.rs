/*!
 * Error types for the gengo client.
 *
 * Every failure surfaced by the library is a `GengoError`. Job validation
 * failures have their own enum so callers can match on the exact rule that
 * was broken, and convert into `GengoError::InvalidJob` via `?`.
 */

use thiserror::Error;

/// Reasons a job cannot be encoded for submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The job still carries the unknown tier sentinel
    #[error("Job tier must be one of standard, pro, ultra or machine")]
    UnknownTier,

    /// A file-backed job without a file identifier
    #[error("File job requires a file identifier")]
    MissingFileIdentifier,

    /// A text job with a blank body
    #[error("Text job requires a non-blank body")]
    MissingBody,

    /// Blank slug
    #[error("Job slug must not be blank")]
    MissingSlug,

    /// Blank source language code
    #[error("Job source language must not be blank")]
    MissingSourceLanguage,

    /// Blank target language code
    #[error("Job target language must not be blank")]
    MissingTargetLanguage,

    /// Callback URL that could not be parsed as an absolute URL
    #[error("Callback URL must be absolute: {0}")]
    CallbackUrlNotAbsolute(String),

    /// A server-confirmed job was handed to the batch encoder
    #[error("Job {0} has already been submitted")]
    AlreadySubmitted(i64),
}

/// Errors that can occur when talking to the Gengo API
#[derive(Error, Debug)]
pub enum GengoError {
    /// Malformed input rejected before any network interaction
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// A job failed validation while being encoded
    #[error("Invalid job: {0}")]
    InvalidJob(#[from] JobError),

    /// The response body did not follow the envelope protocol
    #[error("Malformed API response: {0}")]
    Protocol(String),

    /// The service answered with an `err` object
    #[error(
        "API responded with error (opstat: {}, code: {}): {}",
        .opstat.as_deref().unwrap_or("-"),
        .code.as_deref().unwrap_or("-"),
        .message.as_deref().unwrap_or("no message")
    )]
    Service {
        /// Raw `opstat` value from the envelope
        opstat: Option<String>,
        /// Service error code
        code: Option<String>,
        /// Service error message
        message: Option<String>,
    },

    /// Non-success HTTP status without a usable body
    #[error("HTTP request failed: {status_code} - {message}")]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error text
        message: String,
    },

    /// The request could not be sent or the body could not be read
    #[error("Transport error: {0}")]
    Transport(String),
}

impl GengoError {
    /// True for the errors raised before a request is sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidJob(_))
    }

    /// The service error code, if this is a service error
    pub fn service_code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}

impl From<reqwest::Error> for GengoError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for GengoError {
    fn from(error: serde_json::Error) -> Self {
        Self::Protocol(error.to_string())
    }
}

impl From<url::ParseError> for GengoError {
    fn from(error: url::ParseError) -> Self {
        Self::Validation(error.to_string())
    }
}
