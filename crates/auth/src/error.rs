//! Error types for the enrollment flow.

use thiserror::Error;

use crate::session::Step;

/// Operations the session refuses. None of these change session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("a submission is already in flight")]
    Busy,

    #[error("operation requires the {expected:?} step but the session is at {actual:?}")]
    WrongStep { expected: Step, actual: Step },

    #[error("the flow has already completed")]
    Completed,

    #[error("the pending call was superseded")]
    Superseded,
}

/// Failure of a dispatched call. The simulated transport never produces one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(FlowError::Busy.to_string(), "a submission is already in flight");
        assert_eq!(
            FlowError::WrongStep {
                expected: Step::AwaitingCode,
                actual: Step::Details,
            }
            .to_string(),
            "operation requires the AwaitingCode step but the session is at Details"
        );
        assert_eq!(
            TransportError::Unavailable("maintenance".into()).to_string(),
            "service unavailable: maintenance"
        );
    }
}
