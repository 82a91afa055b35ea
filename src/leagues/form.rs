use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the team wallet is split between the top finishers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutType {
    #[default]
    WinnerTakesAll,
    TopThreeSplit,
    TopFiveSplit,
}

impl PayoutType {
    pub const ALL: [PayoutType; 3] = [
        PayoutType::WinnerTakesAll,
        PayoutType::TopThreeSplit,
        PayoutType::TopFiveSplit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PayoutType::WinnerTakesAll => "winner_takes_all",
            PayoutType::TopThreeSplit => "top_three_split",
            PayoutType::TopFiveSplit => "top_five_split",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PayoutType::WinnerTakesAll => "Winner Takes All",
            PayoutType::TopThreeSplit => "Top 3 Split",
            PayoutType::TopFiveSplit => "Top 5 Split",
        }
    }

    /// Share of the wallet per finishing place, best first.
    pub fn percentages(self) -> &'static [u8] {
        match self {
            PayoutType::WinnerTakesAll => &[100],
            PayoutType::TopThreeSplit => &[70, 20, 10],
            PayoutType::TopFiveSplit => &[50, 25, 15, 10],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PayoutType::WinnerTakesAll => "1st place gets 100% of team wallet",
            PayoutType::TopThreeSplit => "1st: 70%, 2nd: 20%, 3rd: 10%",
            PayoutType::TopFiveSplit => "1st: 50%, 2nd: 25%, 3rd: 15%, 4th: 10%",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueFormData {
    pub league_name: String,
    pub payout_type: PayoutType,
}

impl LeagueFormData {
    pub fn has_name(&self) -> bool {
        !self.league_name.trim().is_empty()
    }
}

/// Suggested name for a league running through the month of `now`.
pub fn default_league_name(now: DateTime<Utc>) -> String {
    format!("{} Distance League", now.format("%B %Y"))
}
