use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::MinorUnits;
use crate::leagues::form::LeagueFormData;
use crate::wizard::CreatedEntity;

pub const SEASON_MONTHLY: &str = "monthly";
pub const LEAGUE_TYPE_CASUAL: &str = "casual";
pub const STATUS_ACTIVE: &str = "active";

/// Team and user a league is created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueContext {
    pub team_id: String,
    pub team_name: String,
    pub created_by: String,
    pub member_count: u32,
}

/// Row shape of the remote `team_leagues` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLeague {
    pub id: Uuid,
    pub team_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by: String,
    pub season: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_teams: Option<u32>,
    pub current_team_count: u32,
    pub status: String,
    pub prize_pool: MinorUnits,
    pub entry_fee: MinorUnits,
    pub league_type: String,
    pub payout_percentages: Vec<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TeamLeague {
    pub fn from_form(form: &LeagueFormData, context: &LeagueContext, now: DateTime<Utc>) -> Self {
        let (start_date, end_date) = month_window(now);
        Self {
            id: Uuid::new_v4(),
            team_id: context.team_id.clone(),
            name: form.league_name.trim().to_string(),
            description: None,
            created_by: context.created_by.clone(),
            season: SEASON_MONTHLY.to_string(),
            start_date,
            end_date,
            max_teams: None,
            current_team_count: 1,
            status: STATUS_ACTIVE.to_string(),
            prize_pool: MinorUnits::ZERO,
            entry_fee: MinorUnits::ZERO,
            league_type: LEAGUE_TYPE_CASUAL.to_string(),
            payout_percentages: form.payout_type.percentages().to_vec(),
            created_at: now,
            updated_at: None,
        }
    }
}

impl CreatedEntity for TeamLeague {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// UTC calendar month containing `now`, as `[first day, first day of next month)`.
pub fn month_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    let next = first.checked_add_months(Months::new(1)).unwrap_or(first);
    (midnight(first), midnight(next))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}
