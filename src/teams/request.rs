use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::MinorUnits;
use crate::teams::form::TeamFormData;
use crate::wizard::CreatedEntity;

pub const DEFAULT_MAX_MEMBERS: u32 = 50;

/// Captain creating the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamContext {
    pub captain_id: String,
}

/// Row shape of the remote `teams` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub captain_id: String,
    pub member_count: u32,
    pub max_members: u32,
    pub total_earnings: MinorUnits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub selected_metrics: Vec<String>,
    pub leaderboard_type: String,
    pub leaderboard_period: String,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Builds the create request for a team whose id was reserved up front.
    pub fn from_form(
        id: Uuid,
        form: &TeamFormData,
        context: &TeamContext,
        now: DateTime<Utc>,
    ) -> Self {
        let description = form.description.trim();
        Self {
            id,
            name: form.team_name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            captain_id: context.captain_id.clone(),
            member_count: 1,
            max_members: DEFAULT_MAX_MEMBERS,
            total_earnings: MinorUnits::ZERO,
            image_url: None,
            selected_metrics: form
                .selected_metrics
                .iter()
                .map(|metric| metric.identifier().to_string())
                .collect(),
            leaderboard_type: form.leaderboard_type.as_str().to_string(),
            leaderboard_period: form.leaderboard_period.as_str().to_string(),
            created_at: now,
        }
    }
}

impl CreatedEntity for Team {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Wallet opened for a team before the team row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWallet {
    pub id: Uuid,
    pub team_id: Uuid,
    pub captain_id: String,
    pub created_at: DateTime<Utc>,
}

impl TeamWallet {
    pub fn new(team_id: Uuid, context: &TeamContext, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            captain_id: context.captain_id.clone(),
            created_at: now,
        }
    }
}
