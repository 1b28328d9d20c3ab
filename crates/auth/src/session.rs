//! The enrollment state machine.
//!
//! Signup runs `Details -> AwaitingCode -> Completed`; login runs
//! `Details -> Completed`. Every submission is split into a synchronous
//! `begin_*` that validates and marks the session pending, and a
//! [`EnrollmentSession::complete`] that applies the result once the
//! dispatched call returns. The session itself never awaits.

use std::fmt;

use cuid2::CuidConstructor;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::code::VerificationCode;
use crate::credentials::{Credentials, Field, FlowMode};
use crate::error::{FlowError, FlowResult, TransportError};
use crate::notification::Notification;
use crate::role::{resolve_role, Identity, Role};
use crate::transport::Request;
use crate::validation::{validate, FieldErrors};

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Details,
    AwaitingCode,
    Completed,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Details => "details",
            Step::AwaitingCode => "awaiting_code",
            Step::Completed => "completed",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    SendCode,
    Authenticate { role: Role },
    VerifyCode,
}

/// Ticket for a submission that passed its guard and is waiting on the transport.
///
/// Holds a snapshot of the email taken at submit time, so edits made while
/// the call is in flight do not change its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCall {
    serial: u64,
    action: Action,
    email: String,
}

impl PendingCall {
    pub fn request(&self) -> Request {
        let email = self.email.clone();
        match self.action {
            Action::SendCode => Request::SendCode { email },
            Action::Authenticate { .. } => Request::Authenticate { email },
            Action::VerifyCode => Request::VerifyCode { email },
        }
    }

    pub(crate) fn serial(&self) -> u64 {
        self.serial
    }
}

/// Result of a `begin_*` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The guard failed. Nothing is in flight.
    Rejected(Notification),
    /// The guard passed and the session is pending until the call is completed.
    Dispatched(PendingCall),
}

#[derive(Debug)]
pub struct EnrollmentSession {
    id: String,
    mode: FlowMode,
    step: Step,
    credentials: Credentials,
    code: VerificationCode,
    errors: FieldErrors,
    in_flight: Option<u64>,
    next_serial: u64,
    identity: Option<Identity>,
}

impl EnrollmentSession {
    pub fn new(mode: FlowMode) -> Self {
        let session = Self {
            id: CUID.create_id(),
            mode,
            step: Step::Details,
            credentials: Credentials::default(),
            code: VerificationCode::default(),
            errors: FieldErrors::new(),
            in_flight: None,
            next_serial: 0,
            identity: None,
        };
        debug!(flow_id = %session.id, %mode, "enrollment session created");
        session
    }

    pub fn signup() -> Self {
        Self::new(FlowMode::Signup)
    }

    pub fn login() -> Self {
        Self::new(FlowMode::Login)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn code(&self) -> &VerificationCode {
        &self.code
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Consume the session and hand over the identity, if the flow completed.
    pub fn into_identity(self) -> Option<Identity> {
        self.identity
    }

    /// Store a form edit and clear that field's error only.
    ///
    /// Refused with [`FlowError::Busy`] while a submission is in flight, so the
    /// held credentials are always the ones that were validated.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> FlowResult<()> {
        self.require(Step::Details)?;
        self.ensure_idle()?;
        self.credentials.set(field, value);
        self.errors.clear(field);
        Ok(())
    }

    pub fn set_code(&mut self, code: impl Into<VerificationCode>) -> FlowResult<()> {
        self.require(Step::AwaitingCode)?;
        self.ensure_idle()?;
        self.code = code.into();
        Ok(())
    }

    /// Validate the held credentials and, if they pass, start the details call.
    pub fn begin_submit_details(&mut self) -> FlowResult<Submission> {
        self.require(Step::Details)?;
        self.ensure_idle()?;

        let errors = validate(&self.credentials, self.mode);
        if !errors.is_empty() {
            debug!(flow_id = %self.id, failed = errors.len(), "details rejected");
            self.errors = errors.clone();
            return Ok(Submission::Rejected(Notification::ValidationFailed { errors }));
        }

        self.errors = FieldErrors::new();
        let action = match self.mode {
            FlowMode::Signup => Action::SendCode,
            FlowMode::Login => Action::Authenticate {
                role: resolve_role(&self.credentials.email, &self.credentials.password),
            },
        };
        Ok(Submission::Dispatched(self.issue(action)))
    }

    /// Check the held code length and, if it is right, start verification.
    pub fn begin_submit_code(&mut self) -> FlowResult<Submission> {
        self.require(Step::AwaitingCode)?;
        self.ensure_idle()?;

        if !self.code.is_submittable() {
            debug!(flow_id = %self.id, length = self.code.len(), "code rejected");
            return Ok(Submission::Rejected(Notification::CodeInvalid));
        }

        Ok(Submission::Dispatched(self.issue(Action::VerifyCode)))
    }

    /// Apply the outcome of a dispatched call.
    pub fn complete(
        &mut self,
        call: PendingCall,
        outcome: Result<(), TransportError>,
    ) -> FlowResult<Notification> {
        if self.step == Step::Completed {
            return Err(FlowError::Completed);
        }
        if self.in_flight != Some(call.serial) {
            debug!(flow_id = %self.id, serial = call.serial, "stale call ignored");
            return Err(FlowError::Superseded);
        }
        self.in_flight = None;

        if let Err(error) = outcome {
            warn!(flow_id = %self.id, step = %self.step, %error, "call failed");
            return Ok(Notification::TransportFailed {
                reason: error.to_string(),
            });
        }

        let notification = match call.action {
            Action::SendCode => {
                self.step = Step::AwaitingCode;
                self.code.clear();
                debug!(flow_id = %self.id, "verification code sent");
                Notification::CodeSent {
                    email: call.email,
                    resent: false,
                }
            }
            Action::Authenticate { role } => {
                self.finish(Identity::new(role, call.email));
                Notification::LoginSucceeded { role }
            }
            Action::VerifyCode => {
                self.finish(Identity::new(Role::User, call.email));
                Notification::SignupCompleted
            }
        };

        Ok(notification)
    }

    /// Give up on an in-flight call without applying it.
    ///
    /// Returns `false` when the call was already completed or superseded.
    pub fn cancel(&mut self, call: &PendingCall) -> bool {
        self.abandon(call.serial)
    }

    pub fn resend_code(&self) -> FlowResult<Notification> {
        self.require(Step::AwaitingCode)?;
        debug!(flow_id = %self.id, "verification code resent");
        Ok(Notification::CodeSent {
            email: self.credentials.email.clone(),
            resent: true,
        })
    }

    /// Leave the code step. The held code and any in-flight verification are dropped.
    pub fn go_back(&mut self) -> FlowResult<()> {
        self.require(Step::AwaitingCode)?;
        self.step = Step::Details;
        self.code.clear();
        self.in_flight = None;
        debug!(flow_id = %self.id, "returned to details");
        Ok(())
    }

    pub(crate) fn abandon(&mut self, serial: u64) -> bool {
        if self.in_flight == Some(serial) {
            self.in_flight = None;
            warn!(flow_id = %self.id, step = %self.step, "pending call cancelled");
            true
        } else {
            false
        }
    }

    fn issue(&mut self, action: Action) -> PendingCall {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.in_flight = Some(serial);

        let call = PendingCall {
            serial,
            action,
            email: self.credentials.email.clone(),
        };
        debug!(flow_id = %self.id, request = call.request().name(), "call dispatched");
        call
    }

    fn finish(&mut self, identity: Identity) {
        info!(
            flow_id = %self.id,
            mode = %self.mode,
            role = %identity.role,
            "enrollment completed"
        );
        self.step = Step::Completed;
        self.identity = Some(identity);
    }

    fn require(&self, expected: Step) -> FlowResult<()> {
        if self.step == Step::Completed {
            return Err(FlowError::Completed);
        }
        if self.step != expected {
            return Err(FlowError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }

    fn ensure_idle(&self) -> FlowResult<()> {
        if self.is_pending() {
            return Err(FlowError::Busy);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatched(submission: Submission) -> PendingCall {
        match submission {
            Submission::Dispatched(call) => call,
            Submission::Rejected(notification) => panic!("unexpected rejection: {notification:?}"),
        }
    }

    fn filled_signup() -> EnrollmentSession {
        let mut session = EnrollmentSession::signup();
        session.set_field(Field::Name, "Ayushman").unwrap();
        session.set_field(Field::Email, "ayushman@urbanroot.com").unwrap();
        session.set_field(Field::Phone, "555-123-4567").unwrap();
        session.set_field(Field::Password, "secret1").unwrap();
        session.set_field(Field::ConfirmPassword, "secret1").unwrap();
        session
    }

    fn at_code_step() -> EnrollmentSession {
        let mut session = filled_signup();
        let call = dispatched(session.begin_submit_details().unwrap());
        session.complete(call, Ok(())).unwrap();
        session
    }

    #[test]
    fn new_session_starts_idle_at_details() {
        let session = EnrollmentSession::signup();
        assert_eq!(session.step(), Step::Details);
        assert!(!session.is_pending());
        assert!(session.errors().is_empty());
        assert!(!session.id().is_empty());
    }

    #[test]
    fn invalid_details_stay_put_and_store_errors() {
        let mut session = EnrollmentSession::login();

        let submission = session.begin_submit_details().unwrap();

        assert!(matches!(
            submission,
            Submission::Rejected(Notification::ValidationFailed { .. })
        ));
        assert_eq!(session.step(), Step::Details);
        assert!(!session.is_pending());
        assert_eq!(session.errors().len(), 2);
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut session = EnrollmentSession::signup();
        session.begin_submit_details().unwrap();
        assert!(session.errors().contains(Field::Email));
        assert!(session.errors().contains(Field::Name));

        session.set_field(Field::Email, "x").unwrap();

        assert!(!session.errors().contains(Field::Email));
        assert!(session.errors().contains(Field::Name));
        assert!(session.errors().contains(Field::Phone));
    }

    #[test]
    fn second_submit_while_pending_is_busy() {
        let mut session = filled_signup();
        let _call = dispatched(session.begin_submit_details().unwrap());

        assert_eq!(session.begin_submit_details(), Err(FlowError::Busy));
        assert!(session.is_pending());
        assert_eq!(session.step(), Step::Details);
    }

    #[test]
    fn signup_details_move_to_code_step() {
        let mut session = filled_signup();
        let call = dispatched(session.begin_submit_details().unwrap());
        assert!(session.is_pending());

        let notification = session.complete(call, Ok(())).unwrap();

        assert_eq!(session.step(), Step::AwaitingCode);
        assert!(!session.is_pending());
        assert_eq!(
            notification,
            Notification::CodeSent {
                email: "ayushman@urbanroot.com".into(),
                resent: false,
            }
        );
    }

    #[test]
    fn short_code_is_invalid_and_keeps_step() {
        let mut session = at_code_step();
        session.set_code("12345").unwrap();

        let submission = session.begin_submit_code().unwrap();

        assert_eq!(submission, Submission::Rejected(Notification::CodeInvalid));
        assert_eq!(session.step(), Step::AwaitingCode);
        assert!(!session.is_pending());
        assert!(session.errors().is_empty());
    }

    #[test]
    fn six_character_code_completes_as_user() {
        let mut session = at_code_step();
        session.set_code("ab12cd").unwrap();

        let call = dispatched(session.begin_submit_code().unwrap());
        let notification = session.complete(call, Ok(())).unwrap();

        assert_eq!(notification, Notification::SignupCompleted);
        assert_eq!(session.step(), Step::Completed);
        assert_eq!(session.identity().map(|identity| identity.role), Some(Role::User));
    }

    #[test]
    fn admin_credentials_cannot_sign_up_as_admin() {
        let mut session = EnrollmentSession::signup();
        session.set_field(Field::Name, "Admin").unwrap();
        session.set_field(Field::Email, "admin@urbanroot.com").unwrap();
        session.set_field(Field::Phone, "5551234567").unwrap();
        session.set_field(Field::Password, "admin123").unwrap();
        session.set_field(Field::ConfirmPassword, "admin123").unwrap();
        let call = dispatched(session.begin_submit_details().unwrap());
        session.complete(call, Ok(())).unwrap();
        session.set_code("000000").unwrap();
        let call = dispatched(session.begin_submit_code().unwrap());
        session.complete(call, Ok(())).unwrap();

        assert_eq!(session.into_identity().map(|identity| identity.role), Some(Role::User));
    }

    #[test]
    fn go_back_discards_code_and_reentry_starts_empty() {
        let mut session = at_code_step();
        session.set_code("123").unwrap();

        session.go_back().unwrap();
        assert_eq!(session.step(), Step::Details);
        assert!(session.code().is_empty());

        let call = dispatched(session.begin_submit_details().unwrap());
        session.complete(call, Ok(())).unwrap();
        assert_eq!(session.step(), Step::AwaitingCode);
        assert!(session.code().is_empty());
    }

    #[test]
    fn go_back_supersedes_in_flight_verification() {
        let mut session = at_code_step();
        session.set_code("123456").unwrap();
        let call = dispatched(session.begin_submit_code().unwrap());

        session.go_back().unwrap();

        assert!(!session.is_pending());
        assert_eq!(session.complete(call, Ok(())), Err(FlowError::Superseded));
        assert_eq!(session.step(), Step::Details);
    }

    #[test]
    fn go_back_from_details_is_wrong_step() {
        let mut session = EnrollmentSession::signup();
        assert_eq!(
            session.go_back(),
            Err(FlowError::WrongStep {
                expected: Step::AwaitingCode,
                actual: Step::Details,
            })
        );
    }

    #[test]
    fn resend_never_changes_state() {
        let mut session = at_code_step();
        session.set_code("12").unwrap();

        for _ in 0..3 {
            let notification = session.resend_code().unwrap();
            assert_eq!(
                notification,
                Notification::CodeSent {
                    email: "ayushman@urbanroot.com".into(),
                    resent: true,
                }
            );
        }

        assert_eq!(session.step(), Step::AwaitingCode);
        assert_eq!(session.code().as_str(), "12");
        assert!(session.identity().is_none());
    }

    #[test]
    fn transport_failure_restores_pre_submit_state() {
        let mut session = filled_signup();
        let call = dispatched(session.begin_submit_details().unwrap());

        let notification = session
            .complete(call, Err(TransportError::Timeout))
            .unwrap();

        assert!(matches!(notification, Notification::TransportFailed { .. }));
        assert_eq!(session.step(), Step::Details);
        assert!(!session.is_pending());
        assert!(matches!(
            session.begin_submit_details(),
            Ok(Submission::Dispatched(_))
        ));
    }

    #[test]
    fn login_edits_in_flight_are_busy() {
        let mut session = EnrollmentSession::login();
        session.set_field(Field::Email, "admin@urbanroot.com").unwrap();
        session.set_field(Field::Password, "admin123").unwrap();
        let call = dispatched(session.begin_submit_details().unwrap());

        assert_eq!(session.set_field(Field::Password, "changed!"), Err(FlowError::Busy));
        let notification = session.complete(call, Ok(())).unwrap();

        assert_eq!(notification, Notification::LoginSucceeded { role: Role::Admin });
        assert_eq!(session.credentials().password, "admin123");
    }

    #[test]
    fn signup_edits_in_flight_are_busy() {
        let mut session = filled_signup();
        let call = dispatched(session.begin_submit_details().unwrap());

        assert_eq!(session.set_field(Field::Email, "not an email"), Err(FlowError::Busy));
        assert_eq!(session.set_field(Field::Phone, "1"), Err(FlowError::Busy));
        session.complete(call, Ok(())).unwrap();

        assert_eq!(session.step(), Step::AwaitingCode);
        assert!(validate(session.credentials(), FlowMode::Signup).is_empty());
        assert_eq!(
            session.resend_code(),
            Ok(Notification::CodeSent {
                email: "ayushman@urbanroot.com".into(),
                resent: true,
            })
        );
    }

    #[test]
    fn code_edits_during_verification_are_busy() {
        let mut session = at_code_step();
        session.set_code("123456").unwrap();
        let call = dispatched(session.begin_submit_code().unwrap());

        assert_eq!(session.set_code("000000"), Err(FlowError::Busy));
        session.complete(call, Ok(())).unwrap();

        let identity = session.identity().unwrap();
        assert_eq!(identity.email, "ayushman@urbanroot.com");
    }

    #[test]
    fn edits_resume_after_a_failed_call() {
        let mut session = filled_signup();
        let call = dispatched(session.begin_submit_details().unwrap());
        session
            .complete(call, Err(TransportError::Timeout))
            .unwrap();

        assert_eq!(session.set_field(Field::Phone, "5559876543"), Ok(()));
    }

    #[test]
    fn completed_session_rejects_input() {
        let mut session = EnrollmentSession::login();
        session.set_field(Field::Email, "user@urbanroot.com").unwrap();
        session.set_field(Field::Password, "password123").unwrap();
        let call = dispatched(session.begin_submit_details().unwrap());
        session.complete(call.clone(), Ok(())).unwrap();

        assert_eq!(session.set_field(Field::Email, "x"), Err(FlowError::Completed));
        assert_eq!(session.begin_submit_details(), Err(FlowError::Completed));
        assert_eq!(session.resend_code(), Err(FlowError::Completed));
        assert_eq!(session.complete(call, Ok(())), Err(FlowError::Completed));
    }

    #[test]
    fn cancel_clears_pending_once() {
        let mut session = filled_signup();
        let call = dispatched(session.begin_submit_details().unwrap());

        assert!(session.cancel(&call));
        assert!(!session.cancel(&call));
        assert!(!session.is_pending());
        assert_eq!(session.complete(call, Ok(())), Err(FlowError::Superseded));
    }

    #[test]
    fn code_edits_are_rejected_on_details_step() {
        let mut session = EnrollmentSession::signup();
        assert!(matches!(
            session.set_code("123456"),
            Err(FlowError::WrongStep { .. })
        ));
    }
}
