//! Error types for Termin
//!
//! Every failure a user can trigger is recoverable. The `Display` output of
//! these types is what the terminal shows, so it is fixed text from
//! [`crate::messages`]; diagnostic detail is kept in the variants for logging.

use crate::messages;

/// A manual or merged form submission that cannot be stored
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", messages::REQUIRED_FIELDS)]
    MissingFields(Vec<&'static str>),
    #[error("{}", messages::INVALID_DATE)]
    InvalidDate(String),
    #[error("{}", messages::INVALID_TIME)]
    InvalidTime(String),
}

/// Why a smart parse attempt was rejected.
///
/// Only ever logged; callers see [`ParseFailed`].
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error("language model request failed: {0:#}")]
    Request(anyhow::Error),
    #[error("model output is not a valid appointment object: {0}")]
    Malformed(String),
    #[error("model output is missing required fields: {0:?}")]
    MissingFields(Vec<&'static str>),
}

/// The single outcome of any smart parse failure
#[derive(Debug, thiserror::Error)]
#[error("{}", messages::SMART_PARSE_FAILED)]
pub struct ParseFailed {
    cause: ParseFailure,
}

impl ParseFailed {
    pub fn new(cause: ParseFailure) -> Self {
        Self { cause }
    }

    pub fn cause(&self) -> &ParseFailure {
        &self.cause
    }
}

impl From<ParseFailure> for ParseFailed {
    fn from(cause: ParseFailure) -> Self {
        Self::new(cause)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    /// No location capability is configured
    #[error("{}", messages::GEOLOCATION_UNSUPPORTED)]
    Unsupported,
    #[error("{}", messages::GEOLOCATION_UNAVAILABLE)]
    Unavailable(anyhow::Error),
}

/// Failure reading or writing the state directory.
///
/// Logged only: losing persistence must never block interactive use.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("state I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
    #[error("{0}")]
    TooLarge(String),
    #[error("could not find home directory")]
    NoHomeDir,
}
