//! Contact form state machine.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use super::field::{Field, FieldState};
use super::gateway::{SubmitGateway, SubmitOutcome};
use crate::domain::entities::ContactDraft;
use crate::domain::validation::FieldError;
use crate::error::RELAY_FAILURE_MESSAGE;

/// How long a success notice stays before the form returns to idle.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

/// Notice shown after the server accepted a message.
pub const SUCCESS_NOTICE: &str = "Message sent successfully! I'll get back to you soon.";

/// Summary shown when a submit attempt fails local validation.
pub const INVALID_FORM_NOTICE: &str = "Please fix the errors in the form before sending";

/// Resting state of the form.
///
/// Field validation is synchronous and happens inside edits, blurs and
/// submit attempts, so it never shows up as a state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Client-side controller of the contact form.
///
/// ```text
/// idle ──submit(valid)──▶ submitting ──2xx──▶ succeeded ──5 s──▶ idle
///   │                         └──error──▶ failed ──edit──▶ idle
///   └──submit(invalid)──▶ failed
/// ```
///
/// Edits are ignored while a submission is in flight. There is no way to
/// cancel one.
#[derive(Debug, Clone)]
pub struct ContactForm {
    name: FieldState,
    email: FieldState,
    message: FieldState,
    status: FormStatus,
    notice: Option<String>,
    idle_at: Option<Instant>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: FieldState::default(),
            email: FieldState::default(),
            message: FieldState::default(),
            status: FormStatus::Idle,
            notice: None,
            idle_at: None,
        }
    }

    /// Current status, after applying a due success timeout.
    pub fn status(&mut self) -> FormStatus {
        self.expire_success(Instant::now());
        self.status
    }

    /// Success or failure notice of the last submission, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Inputs and the submit control are disabled while submitting.
    pub fn inputs_enabled(&self) -> bool {
        self.status != FormStatus::Submitting
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.field(field).value()
    }

    /// Visible error of a field. Untouched fields never show one.
    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.field(field).error()
    }

    /// Replaces a field's value.
    ///
    /// Returns `false` and changes nothing while submitting. Editing a failed
    /// form returns it to idle.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !self.inputs_enabled() {
            return false;
        }

        self.field_mut(field).set_value(field, value.into());

        if self.status == FormStatus::Failed {
            self.status = FormStatus::Idle;
            self.notice = None;
        }

        true
    }

    /// Marks a field touched and validates it. Returns whether it is valid.
    pub fn blur(&mut self, field: Field) -> bool {
        self.field_mut(field).touch(field)
    }

    /// Validates every field and, when all pass, moves to `submitting`.
    ///
    /// Returns the draft to send, or `None` when the form is invalid (the
    /// form is then `failed` with per-field errors) or already submitting.
    pub fn begin_submit(&mut self) -> Option<ContactDraft> {
        if self.status == FormStatus::Submitting {
            return None;
        }

        let mut valid = true;
        for field in Field::ALL {
            valid &= self.field_mut(field).touch(field);
        }

        if !valid {
            debug!("Contact form has invalid fields, not submitting");
            self.status = FormStatus::Failed;
            self.notice = Some(INVALID_FORM_NOTICE.to_string());
            self.idle_at = None;
            return None;
        }

        self.status = FormStatus::Submitting;
        self.notice = None;
        self.idle_at = None;

        Some(ContactDraft::new(
            self.name.value(),
            self.email.value(),
            self.message.value(),
        ))
    }

    /// Applies the result of the request started by [`Self::begin_submit`].
    pub fn complete(&mut self, outcome: SubmitOutcome) {
        if self.status != FormStatus::Submitting {
            warn!("Ignoring submission result outside of a submission");
            return;
        }

        match outcome {
            SubmitOutcome::Sent { .. } => {
                for field in Field::ALL {
                    self.field_mut(field).clear();
                }
                self.status = FormStatus::Succeeded;
                self.notice = Some(SUCCESS_NOTICE.to_string());
                self.idle_at = Some(Instant::now() + SUCCESS_DISPLAY);
            }
            SubmitOutcome::Rejected { status, message } => {
                debug!("Submission rejected with {}: {}", status, message);
                self.fail(message);
            }
        }
    }

    /// Runs a full submission through `gateway`.
    ///
    /// A network error is reported like a server failure with the generic
    /// message.
    pub async fn submit<G>(&mut self, gateway: &G) -> FormStatus
    where
        G: SubmitGateway + ?Sized,
    {
        let Some(draft) = self.begin_submit() else {
            return self.status;
        };

        match gateway.send(draft).await {
            Ok(outcome) => self.complete(outcome),
            Err(e) => {
                warn!("Contact submission failed: {}", e);
                self.fail(RELAY_FAILURE_MESSAGE.to_string());
            }
        }

        self.status
    }

    /// When the success notice expires, if one is showing.
    pub fn idle_deadline(&self) -> Option<Instant> {
        self.idle_at
    }

    /// Waits for the success notice to expire and returns to idle.
    ///
    /// Returns immediately unless the form is showing a success.
    pub async fn settle(&mut self) {
        if let Some(deadline) = self.idle_at {
            tokio::time::sleep_until(deadline).await;
            self.expire_success(deadline);
        }
    }

    fn fail(&mut self, message: String) {
        self.status = FormStatus::Failed;
        self.notice = Some(message);
        self.idle_at = None;
    }

    fn expire_success(&mut self, now: Instant) {
        if self.status == FormStatus::Succeeded
            && let Some(deadline) = self.idle_at
            && now >= deadline
        {
            self.status = FormStatus::Idle;
            self.notice = None;
            self.idle_at = None;
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::gateway::{GatewayError, MockSubmitGateway};

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.edit(Field::Name, "Jane Doe");
        form.edit(Field::Email, "jane@example.com");
        form.edit(Field::Message, "Let's talk about the new project opportunity.");
        form
    }

    fn sent() -> SubmitOutcome {
        SubmitOutcome::Sent {
            message: "Email sent successfully".to_string(),
        }
    }

    #[test]
    fn test_pristine_form_shows_no_errors() {
        let mut form = ContactForm::new();
        form.edit(Field::Name, "J");

        assert_eq!(form.error(Field::Name), None);
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn test_blur_then_edit_revalidates() {
        let mut form = ContactForm::new();
        form.edit(Field::Name, "J");

        assert!(!form.blur(Field::Name));
        assert_eq!(form.error(Field::Name), Some(&FieldError::NameTooShort));

        form.edit(Field::Name, "Jo");
        assert_eq!(form.error(Field::Name), None);
    }

    #[tokio::test]
    async fn test_invalid_submit_makes_no_request() {
        let mut gateway = MockSubmitGateway::new();
        gateway.expect_send().never();

        let mut form = ContactForm::new();
        form.edit(Field::Name, "Jane");

        assert_eq!(form.submit(&gateway).await, FormStatus::Failed);
        assert_eq!(form.notice(), Some(INVALID_FORM_NOTICE));
        assert_eq!(form.error(Field::Name), None);
        assert_eq!(form.error(Field::Email), Some(&FieldError::EmailRequired));
        assert_eq!(form.error(Field::Message), Some(&FieldError::MessageRequired));
    }

    #[tokio::test]
    async fn test_successful_submit_clears_fields() {
        let mut gateway = MockSubmitGateway::new();
        gateway
            .expect_send()
            .withf(|draft| draft.name.as_deref() == Some("Jane Doe"))
            .times(1)
            .returning(|_| Ok(sent()));

        let mut form = filled_form();

        assert_eq!(form.submit(&gateway).await, FormStatus::Succeeded);
        assert_eq!(form.notice(), Some(SUCCESS_NOTICE));
        for field in Field::ALL {
            assert_eq!(form.value(field), "");
            assert!(!form.field(field).is_touched());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_returns_to_idle_after_delay() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.complete(sent());

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(form.status(), FormStatus::Succeeded);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.notice(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_idle() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.complete(sent());

        let started = Instant::now();
        form.settle().await;

        assert_eq!(form.status(), FormStatus::Idle);
        assert!(started.elapsed() >= SUCCESS_DISPLAY);
    }

    #[test]
    fn test_edits_ignored_while_submitting() {
        let mut form = filled_form();
        form.begin_submit().unwrap();

        assert!(!form.inputs_enabled());
        assert!(!form.edit(Field::Name, "Someone Else"));
        assert_eq!(form.value(Field::Name), "Jane Doe");
        assert!(form.begin_submit().is_none());
    }

    #[tokio::test]
    async fn test_server_message_shown_verbatim() {
        let mut gateway = MockSubmitGateway::new();
        gateway.expect_send().times(1).returning(|_| {
            Ok(SubmitOutcome::Rejected {
                status: 429,
                message: "Too many requests. Please try again later.".to_string(),
            })
        });

        let mut form = filled_form();

        assert_eq!(form.submit(&gateway).await, FormStatus::Failed);
        assert_eq!(
            form.notice(),
            Some("Too many requests. Please try again later.")
        );
        assert!(form.inputs_enabled());
        assert_eq!(form.value(Field::Name), "Jane Doe");
    }

    #[tokio::test]
    async fn test_network_error_uses_generic_message() {
        let mut gateway = MockSubmitGateway::new();
        gateway.expect_send().times(1).returning(|_| {
            let err = reqwest::Client::new()
                .get("not a url")
                .build()
                .unwrap_err();
            Err(GatewayError::Network(err))
        });

        let mut form = filled_form();

        assert_eq!(form.submit(&gateway).await, FormStatus::Failed);
        assert_eq!(form.notice(), Some("Failed to send message"));
    }

    #[test]
    fn test_edit_after_failure_returns_to_idle() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.complete(SubmitOutcome::Rejected {
            status: 500,
            message: "Failed to send message".to_string(),
        });
        assert_eq!(form.status(), FormStatus::Failed);

        form.edit(Field::Message, "Trying once more with feeling.");

        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.notice(), None);
    }

    #[tokio::test]
    async fn test_resubmit_after_failure() {
        let mut gateway = MockSubmitGateway::new();
        let mut seq = mockall::Sequence::new();
        gateway
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(SubmitOutcome::Rejected {
                    status: 500,
                    message: "Failed to send message".to_string(),
                })
            });
        gateway
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(sent()));

        let mut form = filled_form();

        assert_eq!(form.submit(&gateway).await, FormStatus::Failed);
        assert_eq!(form.submit(&gateway).await, FormStatus::Succeeded);
    }

    #[test]
    fn test_complete_without_submission_is_ignored() {
        let mut form = filled_form();
        form.complete(sent());

        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.value(Field::Name), "Jane Doe");
    }
}
