//! The call made between "submit" and the state change.
//!
//! [`SimulatedTransport`] stands in for the network with a timer and never
//! fails. A real backend would implement [`Transport`] and report
//! [`TransportError`]s.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TransportError;

/// Default simulated round trip.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1_000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    /// Ask the backend to send a signup code.
    SendCode { email: String },
    /// Check a login pair.
    Authenticate { email: String },
    /// Check a signup code.
    VerifyCode { email: String },
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::SendCode { .. } => "send_code",
            Request::Authenticate { .. } => "authenticate",
            Request::VerifyCode { .. } => "verify_code",
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Request::SendCode { email }
            | Request::Authenticate { email }
            | Request::VerifyCode { email } => email,
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(&self, request: &Request) -> Result<(), TransportError>;
}

/// Waits a fixed delay and then succeeds unconditionally.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    latency: Duration,
}

impl SimulatedTransport {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn dispatch(&self, request: &Request) -> Result<(), TransportError> {
        debug!(
            request = request.name(),
            latency_ms = u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX),
            "simulating round trip"
        );
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn simulated_transport_waits_then_succeeds() {
        let transport = SimulatedTransport::new(Duration::from_millis(1_000));
        let started = tokio::time::Instant::now();

        let request = Request::SendCode {
            email: "grower@urbanroot.com".into(),
        };
        transport.dispatch(&request).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1_000));
    }

    #[test]
    fn default_latency_is_one_second() {
        assert_eq!(SimulatedTransport::default().latency(), Duration::from_secs(1));
    }

    #[test]
    fn request_accessors() {
        let request = Request::VerifyCode {
            email: "a@b.co".into(),
        };
        assert_eq!(request.name(), "verify_code");
        assert_eq!(request.email(), "a@b.co");
    }
}
