//! Contracts of the remote create-operations the wizards submit to, plus an
//! in-memory backend used by tests and the terminal front end.

mod memory;

pub use memory::InMemoryRemote;

use async_trait::async_trait;
use thiserror::Error;

use crate::events::CompetitionEvent;
use crate::leagues::TeamLeague;
use crate::teams::{Team, TeamWallet};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persists competition events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create_event(&self, event: CompetitionEvent) -> Result<CompetitionEvent, RemoteError>;
}

/// Persists team leagues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    async fn create_team_league(&self, league: TeamLeague) -> Result<TeamLeague, RemoteError>;
}

/// Opens team wallets and persists teams.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create_team_wallet(&self, wallet: TeamWallet) -> Result<TeamWallet, RemoteError>;
    async fn create_team(&self, team: Team) -> Result<Team, RemoteError>;
}

#[async_trait]
impl<R: EventRepository + ?Sized> EventRepository for std::sync::Arc<R> {
    async fn create_event(&self, event: CompetitionEvent) -> Result<CompetitionEvent, RemoteError> {
        (**self).create_event(event).await
    }
}

#[async_trait]
impl<R: LeagueRepository + ?Sized> LeagueRepository for std::sync::Arc<R> {
    async fn create_team_league(&self, league: TeamLeague) -> Result<TeamLeague, RemoteError> {
        (**self).create_team_league(league).await
    }
}

#[async_trait]
impl<R: TeamRepository + ?Sized> TeamRepository for std::sync::Arc<R> {
    async fn create_team_wallet(&self, wallet: TeamWallet) -> Result<TeamWallet, RemoteError> {
        (**self).create_team_wallet(wallet).await
    }

    async fn create_team(&self, team: Team) -> Result<Team, RemoteError> {
        (**self).create_team(team).await
    }
}
