use crate::teams::form::{LeaderboardType, TeamFormData, TeamMetric};
use crate::wizard::{StepDescriptor, ValidationError};

pub const BASIC_INFO: &str = "basic_info";
pub const METRICS: &str = "metrics";
pub const LEADERBOARD: &str = "leaderboard";
pub const WALLET: &str = "wallet";
pub const REVIEW: &str = "review";

pub const MIN_TEAM_NAME_CHARS: usize = 3;

/// The five team wizard steps in presentation order.
pub fn team_steps() -> Vec<StepDescriptor<TeamFormData>> {
    vec![
        StepDescriptor::new(BASIC_INFO, "Team Information")
            .with_validator(check_basic_info)
            .with_renderer(|form: &TeamFormData| {
                vec![
                    format!("Team Name: {}", form.team_name),
                    format!("Description: {}", form.description),
                ]
            }),
        StepDescriptor::new(METRICS, "Fitness Metrics")
            .with_validator(check_metrics)
            .with_renderer(|form: &TeamFormData| {
                TeamMetric::ALL
                    .iter()
                    .map(|metric| {
                        let mark = if form.selected_metrics.contains(metric) {
                            "x"
                        } else {
                            " "
                        };
                        format!("[{mark}] {}: {}", metric.display_name(), metric.description())
                    })
                    .collect()
            }),
        StepDescriptor::new(LEADERBOARD, "Leaderboard Setup").with_renderer(leaderboard_lines),
        StepDescriptor::new(WALLET, "Bitcoin Wallet Setup")
            .with_validator(check_wallet)
            .with_renderer(|form: &TeamFormData| {
                vec![if form.wallet_ready {
                    "Bitcoin wallet ready!".to_string()
                } else {
                    "Preparing wallet setup...".to_string()
                }]
            }),
        StepDescriptor::new(REVIEW, "Review & Create").with_renderer(review_lines),
    ]
}

pub fn check_basic_info(form: &TeamFormData) -> Result<(), ValidationError> {
    let name = form.team_name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("team_name", "Please enter a team name"));
    }
    if name.chars().count() < MIN_TEAM_NAME_CHARS {
        return Err(ValidationError::new(
            "team_name",
            "Team name must be at least 3 characters",
        ));
    }
    Ok(())
}

pub fn check_metrics(form: &TeamFormData) -> Result<(), ValidationError> {
    if form.selected_metrics.is_empty() {
        Err(ValidationError::new(
            "selected_metrics",
            "Please select at least one fitness metric to track",
        ))
    } else {
        Ok(())
    }
}

pub fn check_wallet(form: &TeamFormData) -> Result<(), ValidationError> {
    if form.wallet_ready {
        Ok(())
    } else {
        Err(ValidationError::new(
            "wallet_ready",
            "Please wait for the Bitcoin wallet to be ready before proceeding",
        ))
    }
}

fn leaderboard_lines(form: &TeamFormData) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Ranking Method: {} ({})",
            form.leaderboard_type.display_name(),
            form.leaderboard_type.description()
        ),
        format!("Leaderboard Period: {}", form.leaderboard_period.display_name()),
    ];
    if form.leaderboard_type == LeaderboardType::SpeedRankings {
        lines.push(format!(
            "Speed Distance: {} ({} km)",
            form.speed_ranking_distance.display_name(),
            form.ranking_distance_km()
        ));
    }
    lines
}

fn review_lines(form: &TeamFormData) -> Vec<String> {
    let name = form.team_name.trim();
    let description = form.description.trim();
    let metrics = if form.selected_metrics.is_empty() {
        "None selected".to_string()
    } else {
        form.selected_metrics
            .iter()
            .map(|metric| metric.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    };
    vec![
        format!("Team Name: {}", if name.is_empty() { "Not specified" } else { name }),
        format!(
            "Description: {}",
            if description.is_empty() { "None" } else { description }
        ),
        format!("Selected Metrics: {metrics}"),
        format!("Ranking Method: {}", form.leaderboard_type.display_name()),
        format!("Reset Period: {}", form.leaderboard_period.display_name()),
        "Next Steps: After creation, you'll get a QR code to share with potential members"
            .to_string(),
    ]
}
