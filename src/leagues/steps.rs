use chrono::{DateTime, Duration, Utc};

use crate::leagues::form::{LeagueFormData, PayoutType};
use crate::leagues::request::{month_window, LeagueContext};
use crate::wizard::{StepDescriptor, ValidationError};

pub const SETTINGS: &str = "league_settings";
pub const REVIEW: &str = "review";

pub fn league_steps(
    context: &LeagueContext,
    now: DateTime<Utc>,
) -> Vec<StepDescriptor<LeagueFormData>> {
    vec![settings_step(), review_step(context.clone(), now)]
}

fn settings_step() -> StepDescriptor<LeagueFormData> {
    StepDescriptor::new(SETTINGS, "League Settings")
        .with_validator(check_settings)
        .with_renderer(|form: &LeagueFormData| {
            let mut lines = vec![format!("League Name: {}", form.league_name)];
            lines.extend(PayoutType::ALL.iter().map(|payout| {
                let mark = if *payout == form.payout_type { "(x)" } else { "( )" };
                format!("{mark} {}: {}", payout.display_name(), payout.description())
            }));
            lines
        })
}

fn review_step(context: LeagueContext, now: DateTime<Utc>) -> StepDescriptor<LeagueFormData> {
    let (start, end) = month_window(now);
    // Shown inclusive; the stored window ends at the next month's first instant.
    let last_day = end - Duration::days(1);
    StepDescriptor::new(REVIEW, "Review & Create").with_renderer(move |form: &LeagueFormData| {
        vec![
            format!("League Name: {}", form.league_name.trim()),
            format!(
                "Duration: {} - {}",
                start.format("%b %-d, %Y"),
                last_day.format("%b %-d, %Y")
            ),
            "Type: Distance Competition".to_string(),
            format!("Distribution: {}", form.payout_type.description()),
            format!("Team: {}", context.team_name),
            format!("Members: {}", context.member_count),
            "Prizes will be paid from your team's wallet at the end of the month".to_string(),
        ]
    })
}

pub fn check_settings(form: &LeagueFormData) -> Result<(), ValidationError> {
    if form.has_name() {
        Ok(())
    } else {
        Err(ValidationError::new("league_name", "Please enter a league name"))
    }
}
