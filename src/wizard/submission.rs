use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::SubmissionError;

/// Entity returned by a remote create-operation.
pub trait CreatedEntity {
    /// Name shown in the success notice.
    fn display_name(&self) -> &str;
}

/// Maps a finished form onto one remote create-operation.
#[async_trait]
pub trait Submitter: Send + Sync {
    type Form: Send + Sync;
    type Entity: CreatedEntity + Send;

    async fn submit(&self, form: &Self::Form) -> Result<Self::Entity, SubmissionError>;
}

/// Runs at most one submission at a time for a wizard session.
#[derive(Debug)]
pub struct SubmissionCoordinator<S> {
    submitter: S,
    in_flight: AtomicBool,
    attempts: AtomicUsize,
}

impl<S: Submitter> SubmissionCoordinator<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            submitter,
            in_flight: AtomicBool::new(false),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Number of submissions that reached the submitter.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Acquire)
    }

    /// Performs exactly one create-operation, or fails with
    /// [`SubmissionError::InFlight`] if another one is still running.
    pub async fn submit(&self, form: &S::Form) -> Result<S::Entity, SubmissionError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::warn!("rejected submission while another is in flight");
            return Err(SubmissionError::InFlight);
        };
        let attempt = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::info!(attempt, "submitting wizard form");

        let result = self.submitter.submit(form).await;
        match &result {
            Ok(entity) => {
                tracing::info!(attempt, name = entity.display_name(), "submission succeeded")
            }
            Err(err) => tracing::warn!(attempt, error = %err, "submission failed"),
        }
        result
    }
}

/// Clears the in-flight flag when the submission finishes or its future is dropped.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
