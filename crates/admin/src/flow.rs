//! Form state machine.
//!
//! ```text
//! Empty --create/edit--> Editing --begin_submit--> Submitting --finish(ok)--> Success
//!                          ^  |                        |
//!                          |  +--invalid--> ValidationFailed
//!                          +-----------finish(err)-----+
//! ```
//!
//! Validation runs before anything is sent, and a form accepts one
//! submission at a time.

use frituur_client::{ApiError, CatalogApi, Invalidation};
use frituur_core::{FieldValues, ValidationErrors};
use tracing::{debug, info, instrument, warn};

use crate::error::FormError;
use crate::forms::FormEntity;

/// Where a form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Nothing selected.
    Empty,
    /// Inputs enabled.
    Editing,
    /// The last submission was rejected locally; inputs stay enabled.
    ValidationFailed(ValidationErrors),
    /// A mutation is in flight; inputs disabled.
    Submitting,
    /// The last submission was saved and the form was cleared.
    Success,
}

/// One entity form.
#[derive(Debug)]
pub struct FormFlow<E: FormEntity> {
    state: FormState,
    editing: Option<E::Id>,
    values: FieldValues,
}

impl<E: FormEntity> Default for FormFlow<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: FormEntity> FormFlow<E> {
    /// A form with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FormState::Empty,
            editing: None,
            values: FieldValues::new(),
        }
    }

    /// Start a blank form for a new entity.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SubmissionInFlight` while a submission is pending.
    pub fn create(&mut self) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.editing = None;
        self.values.clear();
        self.state = FormState::Editing;
        Ok(())
    }

    /// Start editing an existing entity, with its fields filled in.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SubmissionInFlight` while a submission is pending.
    pub fn edit(&mut self, saved: &E::Saved) -> Result<(), FormError> {
        self.ensure_idle()?;
        self.editing = Some(E::id_of(saved));
        self.values = E::values_of(saved);
        self.state = FormState::Editing;
        Ok(())
    }

    const fn ensure_idle(&self) -> Result<(), FormError> {
        if self.is_submitting() {
            Err(FormError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }

    /// Change one input.
    ///
    /// Clears any inline errors from the previous attempt.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SubmissionInFlight` while submitting and
    /// `FormError::NotEditing` if no form was started.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        match self.state {
            FormState::Submitting => Err(FormError::SubmissionInFlight),
            FormState::Empty | FormState::Success => Err(FormError::NotEditing),
            FormState::Editing | FormState::ValidationFailed(_) => {
                self.values.set(name, value);
                self.state = FormState::Editing;
                Ok(())
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub const fn values(&self) -> &FieldValues {
        &self.values
    }

    /// ID of the entity being edited; `None` when creating.
    #[must_use]
    pub const fn editing(&self) -> Option<E::Id> {
        self.editing
    }

    /// Inline message for a field after a rejected submission.
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&str> {
        match &self.state {
            FormState::ValidationFailed(errors) => errors.get(field),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting)
    }

    /// Validate the inputs and lock the form for submission.
    ///
    /// Nothing is sent here. Send the returned [`Submission`] and hand its
    /// result to [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// Returns `FormError::Validation` (and moves to `ValidationFailed`) if
    /// any field is rejected, `FormError::SubmissionInFlight` if a submission
    /// is already pending, or `FormError::NotEditing` if no form was started.
    pub fn begin_submit(&mut self) -> Result<Submission<E>, FormError> {
        match self.state {
            FormState::Submitting => return Err(FormError::SubmissionInFlight),
            FormState::Empty | FormState::Success => return Err(FormError::NotEditing),
            FormState::Editing | FormState::ValidationFailed(_) => {}
        }

        let draft = E::schema()
            .validate(&self.values)
            .and_then(|()| E::parse(&self.values));
        match draft {
            Ok(draft) => {
                self.state = FormState::Submitting;
                Ok(Submission {
                    id: self.editing,
                    draft,
                })
            }
            Err(errors) => {
                debug!(kind = E::KIND, %errors, "Form rejected");
                self.state = FormState::ValidationFailed(errors.clone());
                Err(FormError::Validation(errors))
            }
        }
    }

    /// Record the outcome of a submission.
    ///
    /// Takes back the [`Submission`] handed out by
    /// [`begin_submit`](Self::begin_submit). On success the form is cleared
    /// and reports `Success`. On failure it returns to `Editing` with every
    /// value kept.
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotSubmitting` if the form is not submitting, and
    /// `FormError::Transport` if the mutation failed.
    pub fn finish<T>(
        &mut self,
        submission: Submission<E>,
        result: Result<T, ApiError>,
    ) -> Result<T, FormError> {
        if !self.is_submitting() || submission.id != self.editing {
            return Err(FormError::NotSubmitting);
        }
        match result {
            Ok(saved) => {
                self.editing = None;
                self.values.clear();
                self.state = FormState::Success;
                Ok(saved)
            }
            Err(e) => {
                warn!(kind = E::KIND, error = %e, "Failed to save");
                self.state = FormState::Editing;
                Err(FormError::Transport(e))
            }
        }
    }

    /// Validate, send and record in one step.
    ///
    /// `on_success` runs once with the stale queries after the backend
    /// accepted the mutation, and never otherwise.
    ///
    /// # Errors
    ///
    /// See [`begin_submit`](Self::begin_submit) and [`finish`](Self::finish).
    #[instrument(skip_all, fields(kind = E::KIND, id = ?self.editing))]
    pub async fn submit(
        &mut self,
        api: &impl CatalogApi,
        on_success: impl AsyncFnOnce(Invalidation),
    ) -> Result<E::Saved, FormError> {
        let submission = self.begin_submit()?;
        let result = submission.send(api).await;
        let (saved, invalidation) = self.finish(submission, result)?;
        let id = E::id_of(&saved);
        info!(%id, "Saved {}", E::KIND);
        on_success(invalidation).await;
        Ok(saved)
    }
}

/// A validated request body, ready to send.
///
/// Only [`FormFlow::begin_submit`] creates one, and
/// [`FormFlow::finish`] consumes it.
#[derive(Debug)]
#[must_use = "a submission locks its form until passed to `finish`"]
pub struct Submission<E: FormEntity> {
    id: Option<E::Id>,
    draft: E::Draft,
}

impl<E: FormEntity> Submission<E> {
    #[must_use]
    pub const fn draft(&self) -> &E::Draft {
        &self.draft
    }

    /// Issue the create or update call.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    pub async fn send(
        &self,
        api: &impl CatalogApi,
    ) -> Result<(E::Saved, Invalidation), ApiError> {
        match self.id {
            Some(id) => {
                let saved = E::update(api, id, &self.draft).await?;
                Ok((saved, E::updated(id)))
            }
            None => {
                let saved = E::create(api, &self.draft).await?;
                let invalidation = E::created(&saved);
                Ok((saved, invalidation))
            }
        }
    }
}
