use thiserror::Error;

use crate::remote::RemoteError;
use crate::wizard::copy::Notice;
use crate::wizard::step::ValidationError;

/// Reasons a navigation call was refused without touching wizard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("wizard has not been started")]
    NotStarted,
    #[error("already at the first step")]
    AtFirstStep,
    #[error("a submission is in progress")]
    Submitting,
    #[error("waiting for the user to acknowledge creation")]
    AwaitingAcknowledgement,
    #[error("nothing to acknowledge")]
    NotAwaitingAcknowledgement,
    #[error("wizard session is closed")]
    SessionClosed,
}

/// Failures raised while handing form data to a remote create-operation.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Error type returned by [`crate::wizard::WizardController`] operations.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,
    #[error("step {} is incomplete: {reason}", .step + 1)]
    ValidationFailed { step: usize, reason: ValidationError },
    #[error("Invalid operation: {0}")]
    PreconditionViolated(Precondition),
    #[error("{}", .notice.title)]
    SubmissionFailed {
        notice: Notice,
        #[source]
        source: SubmissionError,
    },
}

impl WizardError {
    /// True when the caller may retry the same action without re-entering data.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WizardError::SubmissionFailed { .. })
    }
}
