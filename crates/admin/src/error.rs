//! Admin flow errors.

use frituur_client::ApiError;
use frituur_core::ValidationErrors;
use thiserror::Error;

/// Errors from submitting an entity form.
#[derive(Debug, Error)]
pub enum FormError {
    /// Input failed validation; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The mutation reached the network and failed.
    #[error("Request failed: {0}")]
    Transport(#[from] ApiError),

    /// A submission for this form has not finished yet.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// The form has no entity loaded or started.
    #[error("No entity is being edited")]
    NotEditing,

    /// A result was reported for a form that is not submitting.
    #[error("No submission is in flight")]
    NotSubmitting,
}

impl FormError {
    /// The field errors, if this is a validation failure.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
