use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of competition an event can be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[default]
    Challenge,
    Competition,
    Marathon,
    Sprint,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Challenge,
        EventType::Competition,
        EventType::Marathon,
        EventType::Sprint,
    ];

    /// Value stored in the backend `type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Challenge => "challenge",
            EventType::Competition => "competition",
            EventType::Marathon => "marathon",
            EventType::Sprint => "sprint",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EventType::Challenge => "Challenge",
            EventType::Competition => "Competition",
            EventType::Marathon => "Marathon",
            EventType::Sprint => "Sprint",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EventType::Challenge => "Long-term fitness challenge with flexible goals",
            EventType::Competition => "Head-to-head competition with rankings",
            EventType::Marathon => "Endurance-focused event over extended period",
            EventType::Sprint => "Short, intense burst of activity",
        }
    }
}

/// Workout metrics an event can rank on. Ordered as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkoutMetric {
    #[serde(rename = "distance")]
    Distance,
    #[serde(rename = "steps")]
    Steps,
    #[serde(rename = "calories")]
    Calories,
    #[serde(rename = "duration")]
    Duration,
    #[serde(rename = "heartRate")]
    HeartRate,
    #[serde(rename = "elevation")]
    Elevation,
}

impl WorkoutMetric {
    pub const ALL: [WorkoutMetric; 6] = [
        WorkoutMetric::Distance,
        WorkoutMetric::Steps,
        WorkoutMetric::Calories,
        WorkoutMetric::Duration,
        WorkoutMetric::HeartRate,
        WorkoutMetric::Elevation,
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            WorkoutMetric::Distance => "distance",
            WorkoutMetric::Steps => "steps",
            WorkoutMetric::Calories => "calories",
            WorkoutMetric::Duration => "duration",
            WorkoutMetric::HeartRate => "heartRate",
            WorkoutMetric::Elevation => "elevation",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WorkoutMetric::Distance => "Distance",
            WorkoutMetric::Steps => "Steps",
            WorkoutMetric::Calories => "Calories",
            WorkoutMetric::Duration => "Duration",
            WorkoutMetric::HeartRate => "Heart Rate",
            WorkoutMetric::Elevation => "Elevation",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            WorkoutMetric::Distance => "km",
            WorkoutMetric::Steps => "steps",
            WorkoutMetric::Calories => "cal",
            WorkoutMetric::Duration => "min",
            WorkoutMetric::HeartRate => "bpm",
            WorkoutMetric::Elevation => "m",
        }
    }
}

/// Everything the event wizard collects across its steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFormData {
    pub name: String,
    pub description: String,
    pub event_type: EventType,
    pub selected_metrics: BTreeSet<WorkoutMetric>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Display units; converted to minor units on submission.
    pub entry_fee: f64,
    pub prize_pool: f64,
    pub max_participants: Option<u32>,
    pub is_public: bool,
    pub target_value: Option<f64>,
    pub target_unit: String,
    pub requires_registration: bool,
    pub terms_accepted: bool,
}

impl Default for EventFormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            event_type: EventType::default(),
            selected_metrics: BTreeSet::new(),
            start_date: None,
            end_date: None,
            entry_fee: 0.0,
            prize_pool: 0.0,
            max_participants: None,
            is_public: true,
            target_value: None,
            target_unit: String::new(),
            requires_registration: true,
            terms_accepted: false,
        }
    }
}

impl EventFormData {
    /// Selects or deselects a metric; the target unit follows the first selection.
    pub fn toggle_metric(&mut self, metric: WorkoutMetric) {
        if !self.selected_metrics.remove(&metric) {
            self.selected_metrics.insert(metric);
        }
        self.target_unit = self
            .selected_metrics
            .iter()
            .next()
            .map(|metric| metric.unit().to_string())
            .unwrap_or_default();
    }

    /// Sets the start and pushes an earlier end date to one day after it.
    pub fn set_start_date(&mut self, start: DateTime<Utc>) {
        self.start_date = Some(start);
        if self.end_date.is_some_and(|end| end < start) {
            self.end_date = Some(start + Duration::days(1));
        }
    }

    /// Fills a missing start with tomorrow 09:00 UTC and a missing end with
    /// `duration` after the start.
    pub fn apply_schedule_defaults(&mut self, now: DateTime<Utc>, duration: Duration) {
        let start = *self.start_date.get_or_insert_with(|| {
            let tomorrow = now.date_naive() + Duration::days(1);
            tomorrow
                .and_hms_opt(9, 0, 0)
                .map(|at| at.and_utc())
                .unwrap_or(now)
        });
        if self.end_date.is_none() {
            self.end_date = start.checked_add_signed(duration);
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
