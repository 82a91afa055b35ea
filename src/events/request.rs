use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WizardConfig;
use crate::currency::MinorUnits;
use crate::errors::SubmissionError;
use crate::events::form::EventFormData;
use crate::wizard::CreatedEntity;

pub const STATUS_ACTIVE: &str = "active";

/// Row shape of the remote `events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionEvent {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub target_value: f64,
    pub unit: String,
    pub entry_fee: MinorUnits,
    pub prize_pool: MinorUnits,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    pub participant_count: u32,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CompetitionEvent {
    /// Builds the create request from a finished form.
    pub fn from_form(
        form: &EventFormData,
        config: &WizardConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, SubmissionError> {
        let entry_fee = to_minor_units("entry fee", form.entry_fee, config)?;
        let prize_pool = to_minor_units("prize pool", form.prize_pool, config)?;
        if form.entry_fee > config.max_entry_fee {
            return Err(SubmissionError::InvalidRequest(format!(
                "entry fee exceeds the maximum of {}",
                config.max_entry_fee
            )));
        }

        let description = form.description.trim();
        let unit = form.target_unit.trim();
        let start_date = form.start_date.unwrap_or(now);
        let end_date = match form.end_date {
            Some(end) => end,
            None => config
                .default_event_duration()
                .and_then(|duration| start_date.checked_add_signed(duration))
                .ok_or_else(|| {
                    SubmissionError::InvalidRequest(format!(
                        "default duration of {} days is out of range",
                        config.default_event_duration_days
                    ))
                })?,
        };

        Ok(Self {
            id: Uuid::new_v4(),
            name: form.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            event_type: form.event_type.as_str().to_string(),
            target_value: form.target_value.unwrap_or(0.0),
            unit: if unit.is_empty() {
                config.default_target_unit.clone()
            } else {
                unit.to_string()
            },
            entry_fee,
            prize_pool,
            start_date,
            end_date,
            max_participants: form.max_participants,
            participant_count: 0,
            status: STATUS_ACTIVE.to_string(),
            image_url: None,
            created_at: now,
        })
    }
}

fn to_minor_units(
    label: &str,
    value: f64,
    config: &WizardConfig,
) -> Result<MinorUnits, SubmissionError> {
    MinorUnits::from_decimal(value, config.minor_units_per_unit)
        .map_err(|err| SubmissionError::InvalidRequest(format!("{label}: {err}")))
}

impl CreatedEntity for CompetitionEvent {
    fn display_name(&self) -> &str {
        &self.name
    }
}
