use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Activities a team can track for its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMetric {
    Running,
    Walking,
    Cycling,
    Strength,
    WorkoutStreaks,
}

impl TeamMetric {
    pub const ALL: [TeamMetric; 5] = [
        TeamMetric::Running,
        TeamMetric::Walking,
        TeamMetric::Cycling,
        TeamMetric::Strength,
        TeamMetric::WorkoutStreaks,
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            TeamMetric::Running => "running",
            TeamMetric::Walking => "walking",
            TeamMetric::Cycling => "cycling",
            TeamMetric::Strength => "strength",
            TeamMetric::WorkoutStreaks => "workout_streaks",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TeamMetric::Running => "Running",
            TeamMetric::Walking => "Walking",
            TeamMetric::Cycling => "Cycling",
            TeamMetric::Strength => "Strength Training",
            TeamMetric::WorkoutStreaks => "Workout Streaks",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TeamMetric::Running => "Track distance, pace, and duration for runs",
            TeamMetric::Walking => "Daily steps and walking distance",
            TeamMetric::Cycling => "Bike rides, distance, and elevation",
            TeamMetric::Strength => "Gym workouts and weightlifting sessions",
            TeamMetric::WorkoutStreaks => "Consecutive days of any workout activity",
        }
    }
}

/// How the team leaderboard ranks members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardType {
    #[default]
    Distance,
    WorkoutCount,
    Streaks,
    SpeedRankings,
}

impl LeaderboardType {
    pub const ALL: [LeaderboardType; 4] = [
        LeaderboardType::Distance,
        LeaderboardType::WorkoutCount,
        LeaderboardType::Streaks,
        LeaderboardType::SpeedRankings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeaderboardType::Distance => "distance",
            LeaderboardType::WorkoutCount => "workout_count",
            LeaderboardType::Streaks => "streaks",
            LeaderboardType::SpeedRankings => "speed_rankings",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LeaderboardType::Distance => "Total Distance",
            LeaderboardType::WorkoutCount => "Workout Count",
            LeaderboardType::Streaks => "Workout Streaks",
            LeaderboardType::SpeedRankings => "Speed Rankings",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LeaderboardType::Distance => "Rank by total distance covered across all workouts",
            LeaderboardType::WorkoutCount => "Rank by number of completed workouts",
            LeaderboardType::Streaks => "Rank by longest consecutive workout streaks",
            LeaderboardType::SpeedRankings => {
                "Rank by fastest single effort (5K, 10K, custom distance)"
            }
        }
    }
}

/// How often the leaderboard resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    Daily,
    #[default]
    Weekly,
    Monthly,
    AllTime,
}

impl LeaderboardPeriod {
    pub const ALL: [LeaderboardPeriod; 4] = [
        LeaderboardPeriod::Daily,
        LeaderboardPeriod::Weekly,
        LeaderboardPeriod::Monthly,
        LeaderboardPeriod::AllTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeaderboardPeriod::Daily => "daily",
            LeaderboardPeriod::Weekly => "weekly",
            LeaderboardPeriod::Monthly => "monthly",
            LeaderboardPeriod::AllTime => "all_time",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LeaderboardPeriod::Daily => "Daily",
            LeaderboardPeriod::Weekly => "Weekly",
            LeaderboardPeriod::Monthly => "Monthly",
            LeaderboardPeriod::AllTime => "All-Time",
        }
    }
}

/// Reference distance for speed rankings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedRankingDistance {
    #[default]
    #[serde(rename = "5K")]
    FiveK,
    #[serde(rename = "10K")]
    TenK,
    #[serde(rename = "half_marathon")]
    HalfMarathon,
    #[serde(rename = "marathon")]
    Marathon,
    #[serde(rename = "custom")]
    Custom,
}

impl SpeedRankingDistance {
    pub const ALL: [SpeedRankingDistance; 5] = [
        SpeedRankingDistance::FiveK,
        SpeedRankingDistance::TenK,
        SpeedRankingDistance::HalfMarathon,
        SpeedRankingDistance::Marathon,
        SpeedRankingDistance::Custom,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SpeedRankingDistance::FiveK => "5K",
            SpeedRankingDistance::TenK => "10K",
            SpeedRankingDistance::HalfMarathon => "Half Marathon",
            SpeedRankingDistance::Marathon => "Marathon",
            SpeedRankingDistance::Custom => "Custom Distance",
        }
    }

    /// Fixed distance in kilometres; `None` for a custom distance.
    pub fn distance_km(self) -> Option<f64> {
        match self {
            SpeedRankingDistance::FiveK => Some(5.0),
            SpeedRankingDistance::TenK => Some(10.0),
            SpeedRankingDistance::HalfMarathon => Some(21.1),
            SpeedRankingDistance::Marathon => Some(42.2),
            SpeedRankingDistance::Custom => None,
        }
    }
}

/// Everything the team wizard collects across its steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFormData {
    pub team_name: String,
    pub description: String,
    pub selected_metrics: BTreeSet<TeamMetric>,
    pub leaderboard_type: LeaderboardType,
    pub leaderboard_period: LeaderboardPeriod,
    pub speed_ranking_distance: SpeedRankingDistance,
    pub custom_speed_distance_km: f64,
    /// Set once the wallet provider confirmed it can open a team wallet.
    pub wallet_ready: bool,
}

impl Default for TeamFormData {
    fn default() -> Self {
        Self {
            team_name: String::new(),
            description: String::new(),
            selected_metrics: BTreeSet::from([TeamMetric::Running]),
            leaderboard_type: LeaderboardType::default(),
            leaderboard_period: LeaderboardPeriod::default(),
            speed_ranking_distance: SpeedRankingDistance::default(),
            custom_speed_distance_km: 5.0,
            wallet_ready: false,
        }
    }
}

impl TeamFormData {
    pub fn toggle_metric(&mut self, metric: TeamMetric) {
        if !self.selected_metrics.remove(&metric) {
            self.selected_metrics.insert(metric);
        }
    }

    /// Distance speed rankings are measured over, in kilometres.
    pub fn ranking_distance_km(&self) -> f64 {
        self.speed_ranking_distance
            .distance_km()
            .unwrap_or(self.custom_speed_distance_km)
    }
}
