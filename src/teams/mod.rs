//! The five-step team creation wizard: team information, metrics,
//! leaderboard, wallet, review.

pub mod form;
pub mod request;
pub mod steps;

pub use form::{LeaderboardPeriod, LeaderboardType, SpeedRankingDistance, TeamFormData, TeamMetric};
pub use request::{Team, TeamContext, TeamWallet};
pub use steps::team_steps;

use async_trait::async_trait;
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{SubmissionError, WizardError};
use crate::remote::TeamRepository;
use crate::wizard::{Submitter, WizardController, WizardCopy};

/// Opens the team wallet, then stores the team under the same id.
#[derive(Debug)]
pub struct TeamSubmitter<R, C> {
    repository: R,
    clock: C,
    context: TeamContext,
}

impl<R: TeamRepository, C: Clock> TeamSubmitter<R, C> {
    pub fn new(repository: R, clock: C, context: TeamContext) -> Self {
        Self {
            repository,
            clock,
            context,
        }
    }

    pub fn context(&self) -> &TeamContext {
        &self.context
    }
}

#[async_trait]
impl<R: TeamRepository, C: Clock> Submitter for TeamSubmitter<R, C> {
    type Form = TeamFormData;
    type Entity = Team;

    async fn submit(&self, form: &TeamFormData) -> Result<Team, SubmissionError> {
        if !form.wallet_ready {
            return Err(SubmissionError::InvalidRequest(
                "team wallet is not ready".into(),
            ));
        }
        let now = self.clock.now();
        let team_id = Uuid::new_v4();

        // The team row is only written once its wallet exists.
        let wallet = self
            .repository
            .create_team_wallet(TeamWallet::new(team_id, &self.context, now))
            .await?;
        tracing::info!(team_id = %team_id, wallet_id = %wallet.id, "team wallet created");

        let request = Team::from_form(team_id, form, &self.context, now);
        tracing::info!(id = %request.id, name = %request.name, "creating team");
        Ok(self.repository.create_team(request).await?)
    }
}

pub type TeamWizard<R, C> = WizardController<TeamSubmitter<R, C>>;

pub fn team_copy() -> WizardCopy {
    let mut copy = WizardCopy::for_entity("team", "Team");
    copy.cancel_prompt.message =
        "Your progress will be lost. Are you sure you want to cancel?".into();
    copy.success_title = "Team Created Successfully!".into();
    copy.success_message = "Your team '{name}' is now live with a Bitcoin wallet! Start sharing \
        your QR code to get members and fund your team's prize pool."
        .into();
    copy
}

pub fn team_wizard<R, C>(
    repository: R,
    clock: C,
    context: TeamContext,
) -> Result<TeamWizard<R, C>, WizardError>
where
    R: TeamRepository,
    C: Clock,
{
    WizardController::new(
        team_steps(),
        TeamFormData::default(),
        TeamSubmitter::new(repository, clock, context),
        team_copy(),
    )
}
