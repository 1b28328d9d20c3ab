//! Async driver that runs a session's submissions through a [`Transport`].

use std::sync::Arc;

use crate::code::VerificationCode;
use crate::credentials::{Field, FlowMode};
use crate::error::FlowResult;
use crate::notification::Notification;
use crate::role::Identity;
use crate::session::{EnrollmentSession, PendingCall, Submission};
use crate::transport::Transport;

/// An [`EnrollmentSession`] paired with the transport its calls go through.
///
/// Each submit has one suspension point: the transport round trip. Dropping
/// the returned future before it resolves cancels the call and the session
/// goes back to its pre-submit state.
pub struct EnrollmentFlow {
    session: EnrollmentSession,
    transport: Arc<dyn Transport>,
}

impl EnrollmentFlow {
    pub fn new(session: EnrollmentSession, transport: Arc<dyn Transport>) -> Self {
        Self { session, transport }
    }

    pub fn start(mode: FlowMode, transport: Arc<dyn Transport>) -> Self {
        Self::new(EnrollmentSession::new(mode), transport)
    }

    pub fn session(&self) -> &EnrollmentSession {
        &self.session
    }

    pub fn into_session(self) -> EnrollmentSession {
        self.session
    }

    pub fn into_identity(self) -> Option<Identity> {
        self.session.into_identity()
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> FlowResult<()> {
        self.session.set_field(field, value)
    }

    pub fn set_code(&mut self, code: impl Into<VerificationCode>) -> FlowResult<()> {
        self.session.set_code(code)
    }

    pub async fn submit_details(&mut self) -> FlowResult<Notification> {
        match self.session.begin_submit_details()? {
            Submission::Rejected(notification) => Ok(notification),
            Submission::Dispatched(call) => self.dispatch(call).await,
        }
    }

    pub async fn submit_code(&mut self) -> FlowResult<Notification> {
        match self.session.begin_submit_code()? {
            Submission::Rejected(notification) => Ok(notification),
            Submission::Dispatched(call) => self.dispatch(call).await,
        }
    }

    pub fn resend_code(&self) -> FlowResult<Notification> {
        self.session.resend_code()
    }

    pub fn go_back(&mut self) -> FlowResult<()> {
        self.session.go_back()
    }

    async fn dispatch(&mut self, call: PendingCall) -> FlowResult<Notification> {
        let request = call.request();
        let guard = InFlight::new(&mut self.session, call.serial());
        let outcome = self.transport.dispatch(&request).await;
        guard.disarm();

        self.session.complete(call, outcome)
    }
}

/// Clears the session's pending call if the submit future is dropped mid-flight.
struct InFlight<'a> {
    session: &'a mut EnrollmentSession,
    serial: u64,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(session: &'a mut EnrollmentSession, serial: u64) -> Self {
        Self {
            session,
            serial,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.abandon(self.serial);
        }
    }
}
