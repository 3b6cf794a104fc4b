//! User form state and its submission lifecycle

use super::field::{FormField, UnknownField, UserField};
use super::validation::{self, ErrorSet};
use crate::service::UserGateway;
use crate::state::{UserDraft, UserRecord};
use thiserror::Error;
use uuid::Uuid;

/// Trait for common form navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field_index(&self) -> usize;
    fn set_active_field_index(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field_index();
        self.set_active_field_index((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field_index();
        if current == 0 {
            self.set_active_field_index(count - 1);
        } else {
            self.set_active_field_index(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Whether a create call is currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Why a submission did not produce a record
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has invalid fields: {0}")]
    Invalid(ErrorSet),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("failed to create user: {0}")]
    Failed(String),
    #[error("no matching submission is in flight")]
    NotInFlight,
}

/// Single-use token for the submission started by `UserForm::begin_submit`.
/// Only the form that issued it accepts it back in `UserForm::settle`.
#[derive(Debug)]
pub struct PendingSubmission {
    ticket: Uuid,
    draft: UserDraft,
}

impl PendingSubmission {
    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }
}

/// The user entry form: raw field values, recorded errors and the
/// idle/submitting lifecycle.
#[derive(Debug, Clone)]
pub struct UserForm {
    name: FormField,
    email: FormField,
    phone: FormField,
    age: FormField,
    active_field_index: usize,
    errors: ErrorSet,
    state: SubmissionState,
    /// Ticket of the in-flight submission, set only while `Submitting`
    ticket: Option<Uuid>,
}

impl UserForm {
    pub fn new() -> Self {
        Self {
            name: FormField::new(UserField::Name),
            email: FormField::new(UserField::Email),
            phone: FormField::new(UserField::Phone),
            age: FormField::new(UserField::Age),
            active_field_index: 0,
            errors: ErrorSet::new(),
            state: SubmissionState::Idle,
            ticket: None,
        }
    }

    pub fn field(&self, field: UserField) -> &FormField {
        match field {
            UserField::Name => &self.name,
            UserField::Email => &self.email,
            UserField::Phone => &self.phone,
            UserField::Age => &self.age,
        }
    }

    fn field_mut(&mut self, field: UserField) -> &mut FormField {
        match field {
            UserField::Name => &mut self.name,
            UserField::Email => &mut self.email,
            UserField::Phone => &mut self.phone,
            UserField::Age => &mut self.age,
        }
    }

    /// Raw text of one field
    pub fn value(&self, field: UserField) -> &str {
        self.field(field).as_text()
    }

    pub fn active_field(&self) -> UserField {
        UserField::from_index(self.active_field_index).unwrap_or(UserField::Name)
    }

    pub fn focus_field(&mut self, field: UserField) {
        self.active_field_index = field.index();
    }

    /// Apply an edit to one field. Any edit clears that field's recorded
    /// error without re-validating it. Ignored while submitting.
    fn edit(&mut self, field: UserField, apply: impl FnOnce(&mut FormField) -> bool) -> bool {
        if self.is_submitting() {
            tracing::debug!("Ignoring edit to {field} while submitting");
            return false;
        }
        if !apply(self.field_mut(field)) {
            return false;
        }
        if self.errors.clear_field(field) {
            tracing::debug!("Cleared recorded error for {field}");
        }
        true
    }

    /// Overwrite one field's raw text
    pub fn set_field(&mut self, field: UserField, value: impl Into<String>) {
        let value = value.into();
        self.edit(field, |f| {
            f.set_text(value);
            true
        });
    }

    /// Overwrite a field addressed by its key (`"name"`, `"email"`, ...)
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownField> {
        let field: UserField = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Type one character into the active field
    pub fn input_char(&mut self, c: char) {
        let field = self.active_field();
        self.edit(field, |f| {
            f.push_char(c);
            true
        });
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) {
        let field = self.active_field();
        self.edit(field, FormField::pop_char);
    }

    /// Evaluate every rule against the current values. Never mutates the form.
    pub fn validate(&self) -> ErrorSet {
        let form = self;
        validation::validate_all(move |field| form.value(field))
    }

    /// Errors recorded by the last submit attempt, minus fields edited since
    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Recomputed from the current values, independent of recorded errors
    pub fn is_form_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Combined length of all raw values
    pub fn total_chars(&self) -> usize {
        UserField::ALL
            .into_iter()
            .map(|f| self.value(f).chars().count())
            .sum()
    }

    /// Validate and, when clean, move to `Submitting`.
    ///
    /// Invalid input records the errors and leaves the state untouched.
    /// A call while already submitting is rejected without any change.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        if self.is_submitting() {
            tracing::debug!("Submit ignored, a submission is already in flight");
            return Err(SubmitError::InFlight);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            tracing::debug!("Submit rejected with {} invalid field(s)", errors.len());
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        self.errors.clear();
        self.state = SubmissionState::Submitting;
        let ticket = Uuid::new_v4();
        self.ticket = Some(ticket);
        let draft = UserDraft::trimmed(
            self.name.as_text(),
            self.email.as_text(),
            self.phone.as_text(),
            self.age.as_text(),
        );
        Ok(PendingSubmission { ticket, draft })
    }

    /// Finish an in-flight submission with the outcome of the create step.
    ///
    /// Returns to `Idle`. Success yields a new record and clears the form;
    /// failure keeps the typed values so the user can retry. A token this
    /// form did not issue, or one already settled, is rejected with no change.
    pub fn settle(
        &mut self,
        pending: PendingSubmission,
        outcome: anyhow::Result<()>,
    ) -> Result<UserRecord, SubmitError> {
        if self.ticket != Some(pending.ticket) {
            tracing::warn!("Ignoring settle for a submission this form is not running");
            return Err(SubmitError::NotInFlight);
        }
        self.ticket = None;
        self.state = SubmissionState::Idle;
        match outcome {
            Ok(()) => {
                let record = UserRecord::from_draft(pending.draft);
                tracing::info!("Created user {} ({})", record.name(), record.id());
                self.reset();
                Ok(record)
            }
            Err(e) => {
                tracing::warn!("User create failed: {e:#}");
                Err(SubmitError::Failed(e.to_string()))
            }
        }
    }

    /// Validate, run the create step and settle, in one call
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<UserRecord, SubmitError>
    where
        G: UserGateway + ?Sized,
    {
        let pending = self.begin_submit()?;
        let outcome = gateway.create_user(pending.draft()).await;
        self.settle(pending, outcome)
    }

    /// Clear all values and recorded errors
    pub fn reset(&mut self) {
        for field in UserField::ALL {
            self.field_mut(field).clear();
        }
        self.errors.clear();
        self.active_field_index = 0;
    }
}

impl Default for UserForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for UserForm {
    fn field_count(&self) -> usize {
        UserField::ALL.len()
    }
    fn active_field_index(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field_index(&mut self, index: usize) {
        self.active_field_index = index.min(UserField::ALL.len() - 1);
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        UserField::from_index(index).map(|f| self.field(f))
    }
}
