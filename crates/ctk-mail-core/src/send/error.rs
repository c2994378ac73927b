//! Error types for the send workflow.

use thiserror::Error;

use crate::validation::ValidationResult;

/// Failure talking to the one-time-code service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    /// The request never got a response.
    #[error("OTP service unreachable: {0}")]
    Transport(String),

    /// The service answered with an unexpected status.
    #[error("OTP service error ({status}): {message}")]
    Service {
        /// HTTP status or equivalent.
        status: u16,
        /// Server message.
        message: String,
    },
}

/// Failure handing a message to the mail backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request never got a response.
    #[error("Mail backend unreachable: {0}")]
    Transport(String),

    /// The backend refused the message.
    #[error("Send failed: {0}")]
    Rejected(String),
}

/// Errors from [`SendGate`](super::SendGate).
#[derive(Debug, Error)]
pub enum SendError {
    /// The draft has validation errors.
    #[error("Draft has {} validation error(s)", .0.errors.len())]
    Invalid(Box<ValidationResult>),

    /// The sender address is missing or malformed.
    #[error("Invalid sender address: {0}")]
    InvalidSender(String),

    /// One-time-code service failed.
    #[error(transparent)]
    Otp(#[from] OtpError),

    /// The one-time code did not verify.
    #[error("Verification code was rejected")]
    CodeRejected,

    /// Mail backend failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl SendError {
    /// Validation outcome when the draft was blocked.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            Self::Invalid(result) => Some(result),
            _ => None,
        }
    }
}
