use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::events::CompetitionEvent;
use crate::leagues::TeamLeague;
use crate::remote::{EventRepository, LeagueRepository, RemoteError, TeamRepository};
use crate::teams::{Team, TeamWallet};

/// Backend stand-in that stores rows as JSON, the way the real tables see them.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    events: Mutex<Vec<Value>>,
    leagues: Mutex<Vec<Value>>,
    teams: Mutex<Vec<Value>>,
    wallets: Mutex<Vec<Value>>,
    failures: Mutex<VecDeque<RemoteError>>,
    latency: Option<Duration>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every call, which keeps a submission in flight long enough to observe.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queues an error returned by the next create call instead of storing.
    pub async fn fail_next(&self, error: RemoteError) {
        self.failures.lock().await.push_back(error);
    }

    pub async fn events(&self) -> Result<Vec<CompetitionEvent>, RemoteError> {
        decode_rows(&self.events.lock().await)
    }

    pub async fn leagues(&self) -> Result<Vec<TeamLeague>, RemoteError> {
        decode_rows(&self.leagues.lock().await)
    }

    pub async fn teams(&self) -> Result<Vec<Team>, RemoteError> {
        decode_rows(&self.teams.lock().await)
    }

    pub async fn wallets(&self) -> Result<Vec<TeamWallet>, RemoteError> {
        decode_rows(&self.wallets.lock().await)
    }

    async fn insert<T>(&self, table: &Mutex<Vec<Value>>, row: &T) -> Result<T, RemoteError>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(error) = self.failures.lock().await.pop_front() {
            return Err(error);
        }
        let value = serde_json::to_value(row)?;
        let stored = serde_json::from_value(value.clone())?;
        table.lock().await.push(value);
        Ok(stored)
    }
}

fn decode_rows<T: DeserializeOwned>(rows: &[Value]) -> Result<Vec<T>, RemoteError> {
    rows.iter()
        .map(|row| serde_json::from_value(row.clone()).map_err(RemoteError::from))
        .collect()
}

#[async_trait]
impl EventRepository for InMemoryRemote {
    async fn create_event(&self, event: CompetitionEvent) -> Result<CompetitionEvent, RemoteError> {
        let created = self.insert(&self.events, &event).await?;
        tracing::debug!(id = %created.id, name = %created.name, "event row inserted");
        Ok(created)
    }
}

#[async_trait]
impl LeagueRepository for InMemoryRemote {
    async fn create_team_league(&self, league: TeamLeague) -> Result<TeamLeague, RemoteError> {
        let created = self.insert(&self.leagues, &league).await?;
        tracing::debug!(id = %created.id, name = %created.name, "league row inserted");
        Ok(created)
    }
}

#[async_trait]
impl TeamRepository for InMemoryRemote {
    async fn create_team_wallet(&self, wallet: TeamWallet) -> Result<TeamWallet, RemoteError> {
        let created = self.insert(&self.wallets, &wallet).await?;
        tracing::debug!(id = %created.id, team_id = %created.team_id, "wallet row inserted");
        Ok(created)
    }

    async fn create_team(&self, team: Team) -> Result<Team, RemoteError> {
        let created = self.insert(&self.teams, &team).await?;
        tracing::debug!(id = %created.id, name = %created.name, "team row inserted");
        Ok(created)
    }
}
