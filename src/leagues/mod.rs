//! The two-step monthly team league wizard: settings, review.

pub mod form;
pub mod request;
pub mod steps;

pub use form::{default_league_name, LeagueFormData, PayoutType};
pub use request::{month_window, LeagueContext, TeamLeague};
pub use steps::league_steps;

use async_trait::async_trait;

use crate::clock::Clock;
use crate::errors::{SubmissionError, WizardError};
use crate::remote::LeagueRepository;
use crate::wizard::{Submitter, WizardController, WizardCopy};

/// Sends a finished league form to the remote `team_leagues` table.
#[derive(Debug)]
pub struct LeagueSubmitter<R, C> {
    repository: R,
    clock: C,
    context: LeagueContext,
}

impl<R: LeagueRepository, C: Clock> LeagueSubmitter<R, C> {
    pub fn new(repository: R, clock: C, context: LeagueContext) -> Self {
        Self {
            repository,
            clock,
            context,
        }
    }

    pub fn context(&self) -> &LeagueContext {
        &self.context
    }
}

#[async_trait]
impl<R: LeagueRepository, C: Clock> Submitter for LeagueSubmitter<R, C> {
    type Form = LeagueFormData;
    type Entity = TeamLeague;

    async fn submit(&self, form: &LeagueFormData) -> Result<TeamLeague, SubmissionError> {
        let request = TeamLeague::from_form(form, &self.context, self.clock.now());
        tracing::info!(
            id = %request.id,
            team_id = %request.team_id,
            name = %request.name,
            "creating team league"
        );
        Ok(self.repository.create_team_league(request).await?)
    }
}

pub type LeagueWizard<R, C> = WizardController<LeagueSubmitter<R, C>>;

pub fn league_copy() -> WizardCopy {
    WizardCopy {
        success_message:
            "Your monthly league '{name}' has been created successfully and is now active.".into(),
        ..WizardCopy::for_entity("league", "League")
    }
}

pub fn league_wizard<R, C>(
    repository: R,
    clock: C,
    context: LeagueContext,
) -> Result<LeagueWizard<R, C>, WizardError>
where
    R: LeagueRepository,
    C: Clock,
{
    let steps = league_steps(&context, clock.now());
    WizardController::new(
        steps,
        LeagueFormData::default(),
        LeagueSubmitter::new(repository, clock, context),
        league_copy(),
    )
}
