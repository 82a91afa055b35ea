//! The four-step event creation wizard: basic info, metrics, schedule, review.

pub mod form;
pub mod request;
pub mod steps;

pub use form::{EventFormData, EventType, WorkoutMetric};
pub use request::CompetitionEvent;
pub use steps::event_steps;

use async_trait::async_trait;

use crate::clock::Clock;
use crate::config::WizardConfig;
use crate::errors::{SubmissionError, WizardError};
use crate::remote::EventRepository;
use crate::wizard::{Submitter, WizardController, WizardCopy};

/// Sends a finished event form to the remote `events` table.
#[derive(Debug)]
pub struct EventSubmitter<R, C> {
    repository: R,
    clock: C,
    config: WizardConfig,
}

impl<R: EventRepository, C: Clock> EventSubmitter<R, C> {
    pub fn new(repository: R, clock: C, config: WizardConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: EventRepository, C: Clock> Submitter for EventSubmitter<R, C> {
    type Form = EventFormData;
    type Entity = CompetitionEvent;

    async fn submit(&self, form: &EventFormData) -> Result<CompetitionEvent, SubmissionError> {
        let request = CompetitionEvent::from_form(form, &self.config, self.clock.now())?;
        tracing::info!(id = %request.id, name = %request.name, "creating event");
        Ok(self.repository.create_event(request).await?)
    }
}

pub type EventWizard<R, C> = WizardController<EventSubmitter<R, C>>;

pub fn event_copy() -> WizardCopy {
    WizardCopy::for_entity("event", "Event")
}

/// Builds an unstarted event wizard over an empty form.
pub fn event_wizard<R, C>(
    repository: R,
    clock: C,
    config: WizardConfig,
) -> Result<EventWizard<R, C>, WizardError>
where
    R: EventRepository,
    C: Clock,
{
    let steps = event_steps(&config);
    WizardController::new(
        steps,
        EventFormData::default(),
        EventSubmitter::new(repository, clock, config),
        event_copy(),
    )
}
