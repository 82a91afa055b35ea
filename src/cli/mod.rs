//! Terminal front end that walks the event, league and team wizards against
//! the in-memory backend.

mod io;
pub mod output;

use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, ConfigManager, WizardConfig};
use crate::errors::WizardError;
use crate::events::{self, EventFormData, EventType, WorkoutMetric};
use crate::leagues::{self, default_league_name, LeagueContext, LeagueFormData, PayoutType};
use crate::remote::InMemoryRemote;
use crate::teams::{
    self, LeaderboardPeriod, LeaderboardType, SpeedRankingDistance, TeamContext, TeamFormData,
    TeamMetric,
};
use crate::wizard::{NextOutcome, Submitter, WizardController};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Input error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// How a single wizard session ended from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Created,
    Cancelled,
}

pub fn run_cli() -> Result<(), CliError> {
    let manager = ConfigManager::with_base_dir(ConfigManager::default_base_dir())?;
    let config = manager.load()?;
    tracing::debug!(path = %manager.config_path().display(), "configuration loaded");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let theme = ColorfulTheme::default();
    let remote = Arc::new(InMemoryRemote::new());

    let choices = vec![
        "Create Event".to_string(),
        "Create League".to_string(),
        "Create Team".to_string(),
        "Exit".to_string(),
    ];
    loop {
        match io::select_index(&theme, "What would you like to do?", &choices, 0)? {
            0 => run_event_wizard(&runtime, &theme, Arc::clone(&remote), &config)?,
            1 => run_league_wizard(&runtime, &theme, Arc::clone(&remote))?,
            2 => run_team_wizard(&runtime, &theme, Arc::clone(&remote))?,
            _ => break,
        }
    }
    Ok(())
}

fn run_event_wizard(
    runtime: &Runtime,
    theme: &ColorfulTheme,
    remote: Arc<InMemoryRemote>,
    config: &WizardConfig,
) -> Result<(), CliError> {
    let mut wizard = events::event_wizard(remote, SystemClock, config.clone())?;
    let end = drive(runtime, theme, &mut wizard, |wizard, theme| {
        edit_event_step(wizard, theme, config)
    })?;
    tracing::debug!(?end, "event wizard closed");
    Ok(())
}

fn run_league_wizard(
    runtime: &Runtime,
    theme: &ColorfulTheme,
    remote: Arc<InMemoryRemote>,
) -> Result<(), CliError> {
    let team_name = io::prompt_text(theme, "Team name", "", false)?;
    let created_by = io::prompt_text(theme, "Your user id", "", false)?;
    let context = LeagueContext {
        team_id: team_name.trim().to_lowercase().replace(' ', "-"),
        team_name,
        created_by,
        member_count: 1,
    };
    let mut wizard = leagues::league_wizard(remote, SystemClock, context)?;
    let end = drive(runtime, theme, &mut wizard, edit_league_step)?;
    tracing::debug!(?end, "league wizard closed");
    Ok(())
}

fn run_team_wizard(
    runtime: &Runtime,
    theme: &ColorfulTheme,
    remote: Arc<InMemoryRemote>,
) -> Result<(), CliError> {
    let captain_id = io::prompt_text(theme, "Your user id", "", false)?;
    let mut wizard = teams::team_wizard(remote, SystemClock, TeamContext { captain_id })?;
    let end = drive(runtime, theme, &mut wizard, edit_team_step)?;
    tracing::debug!(?end, "team wizard closed");
    Ok(())
}

/// Shows the current step, lets `edit` fill it in, then asks where to go.
fn drive<S, F>(
    runtime: &Runtime,
    theme: &ColorfulTheme,
    wizard: &mut WizardController<S>,
    mut edit: F,
) -> Result<SessionEnd, CliError>
where
    S: Submitter,
    F: FnMut(&mut WizardController<S>, &ColorfulTheme) -> Result<(), CliError>,
{
    wizard.start()?;
    loop {
        show_current_step(wizard);
        edit(wizard, theme)?;
        show_current_step(wizard);

        let mut actions = vec![wizard.next_label().to_string()];
        if wizard.can_go_back() {
            actions.push(wizard.copy().back_action.clone());
        }
        actions.push(wizard.cancel_prompt().confirm_label.clone());
        let choice = io::select_index(theme, "Continue", &actions, 0)?;
        let chosen = actions[choice].as_str();

        if choice == 0 {
            match runtime.block_on(wizard.go_next()) {
                Ok(NextOutcome::Advanced { .. }) => {}
                Ok(NextOutcome::Created { notice, .. }) => {
                    output::success(&notice.title);
                    output::line(&notice.message);
                    io::confirm_action(theme, &notice.action, true)?;
                    wizard.acknowledge()?;
                    return Ok(SessionEnd::Created);
                }
                Err(WizardError::ValidationFailed { reason, .. }) => {
                    output::warning(&reason.message);
                }
                Err(WizardError::SubmissionFailed { notice, source }) => {
                    tracing::warn!(error = %source, "submission failed");
                    output::error(&notice.title);
                    output::line(&notice.message);
                }
                Err(other) => return Err(other.into()),
            }
        } else if chosen == wizard.copy().back_action {
            wizard.go_back()?;
        } else {
            let prompt = wizard.cancel_prompt().clone();
            output::warning(&prompt.title);
            output::line(&prompt.message);
            if io::confirm_action(theme, &prompt.confirm_label, false)? {
                wizard.cancel()?;
                output::info("Wizard cancelled.");
                return Ok(SessionEnd::Cancelled);
            }
        }
    }
}

fn show_current_step<S: Submitter>(wizard: &WizardController<S>) {
    let Some(view) = wizard.visible_step() else {
        return;
    };
    println!();
    output::section(format!("{} | {}", wizard.copy().title, view.title));
    output::info(format!(
        "{} {}",
        wizard.step_label(),
        output::progress_bar(wizard.progress(), 20)
    ));
    for line in &view.lines {
        output::line(line);
    }
}

fn edit_event_step<S>(
    wizard: &mut WizardController<S>,
    theme: &ColorfulTheme,
    config: &WizardConfig,
) -> Result<(), CliError>
where
    S: Submitter<Form = EventFormData>,
{
    let Some(current) = wizard.data().cloned() else {
        return Ok(());
    };
    let per_unit = config.minor_units_per_unit;
    let key = wizard.visible_step().map(|view| view.key).unwrap_or_default();
    match key {
        events::steps::BASIC_INFO => {
            let name = io::prompt_text(theme, "Event name", &current.name, true)?;
            let types: Vec<String> = EventType::ALL
                .iter()
                .map(|kind| format!("{} - {}", kind.display_name(), kind.description()))
                .collect();
            let selected = EventType::ALL
                .iter()
                .position(|kind| *kind == current.event_type)
                .unwrap_or(0);
            let event_type =
                EventType::ALL[io::select_index(theme, "Event type", &types, selected)?];
            let description =
                io::prompt_text(theme, "Description", &current.description, true)?;
            wizard.update(|form| {
                form.name = name;
                form.event_type = event_type;
                form.description = description;
            })?;
        }
        events::steps::METRICS => {
            let labels: Vec<String> = WorkoutMetric::ALL
                .iter()
                .map(|metric| format!("{} ({})", metric.display_name(), metric.unit()))
                .collect();
            let checked: Vec<bool> = WorkoutMetric::ALL
                .iter()
                .map(|metric| current.selected_metrics.contains(metric))
                .collect();
            let picked = io::select_many(theme, "Metrics to track", &labels, &checked)?;
            wizard.update(|form| {
                for (index, metric) in WorkoutMetric::ALL.iter().enumerate() {
                    if picked.contains(&index) != form.selected_metrics.contains(metric) {
                        form.toggle_metric(*metric);
                    }
                }
            })?;
            let target = io::prompt_optional(
                theme,
                "Target value (empty for none)",
                current.target_value,
            )?;
            wizard.update(|form| form.target_value = target)?;
        }
        events::steps::SCHEDULE => {
            if let Some(duration) = config.default_event_duration() {
                wizard.update(|form| form.apply_schedule_defaults(SystemClock.now(), duration))?;
            }
            let defaults = wizard.data().cloned().unwrap_or(current);
            let start = io::prompt_datetime(theme, "Starts", defaults.start_date)?;
            if let Some(start) = start {
                wizard.update(|form| form.set_start_date(start))?;
            }
            let end_default = wizard.data().and_then(|form| form.end_date);
            let end = io::prompt_datetime(theme, "Ends", end_default)?;
            wizard.update(|form| form.end_date = end)?;
        }
        events::steps::REVIEW => {
            let entry_fee = io::prompt_amount(theme, "Entry fee", current.entry_fee, per_unit)?;
            let prize_pool = io::prompt_amount(theme, "Prize pool", current.prize_pool, per_unit)?;
            let max_participants = io::prompt_optional(
                theme,
                "Max participants (empty for unlimited)",
                current.max_participants,
            )?;
            let is_public = io::confirm_action(theme, "Public event?", current.is_public)?;
            let terms_accepted = io::confirm_action(
                theme,
                "I agree to the event terms and conditions",
                current.terms_accepted,
            )?;
            wizard.update(|form| {
                form.entry_fee = entry_fee;
                form.prize_pool = prize_pool;
                form.max_participants = max_participants;
                form.is_public = is_public;
                form.terms_accepted = terms_accepted;
            })?;
        }
        _ => {}
    }
    Ok(())
}

fn edit_league_step<S>(
    wizard: &mut WizardController<S>,
    theme: &ColorfulTheme,
) -> Result<(), CliError>
where
    S: Submitter<Form = LeagueFormData>,
{
    let Some(current) = wizard.data().cloned() else {
        return Ok(());
    };
    if wizard.visible_step().map(|view| view.key) != Some(leagues::steps::SETTINGS) {
        return Ok(());
    }
    let initial = if current.league_name.is_empty() {
        default_league_name(SystemClock.now())
    } else {
        current.league_name
    };
    let league_name = io::prompt_text(theme, "League name", &initial, true)?;
    let payouts: Vec<String> = PayoutType::ALL
        .iter()
        .map(|payout| format!("{} - {}", payout.display_name(), payout.description()))
        .collect();
    let selected = PayoutType::ALL
        .iter()
        .position(|payout| *payout == current.payout_type)
        .unwrap_or(0);
    let payout_type =
        PayoutType::ALL[io::select_index(theme, "Payout structure", &payouts, selected)?];
    wizard.update(|form| {
        form.league_name = league_name;
        form.payout_type = payout_type;
    })?;
    Ok(())
}

fn edit_team_step<S>(
    wizard: &mut WizardController<S>,
    theme: &ColorfulTheme,
) -> Result<(), CliError>
where
    S: Submitter<Form = TeamFormData>,
{
    let Some(current) = wizard.data().cloned() else {
        return Ok(());
    };
    let key = wizard.visible_step().map(|view| view.key).unwrap_or_default();
    match key {
        teams::steps::BASIC_INFO => {
            let team_name = io::prompt_text(theme, "Team name", &current.team_name, true)?;
            let description =
                io::prompt_text(theme, "Description", &current.description, true)?;
            wizard.update(|form| {
                form.team_name = team_name;
                form.description = description;
            })?;
        }
        teams::steps::METRICS => {
            let labels: Vec<String> = TeamMetric::ALL
                .iter()
                .map(|metric| format!("{} - {}", metric.display_name(), metric.description()))
                .collect();
            let checked: Vec<bool> = TeamMetric::ALL
                .iter()
                .map(|metric| current.selected_metrics.contains(metric))
                .collect();
            let picked = io::select_many(theme, "Metrics to track", &labels, &checked)?;
            wizard.update(|form| {
                for (index, metric) in TeamMetric::ALL.iter().enumerate() {
                    if picked.contains(&index) != form.selected_metrics.contains(metric) {
                        form.toggle_metric(*metric);
                    }
                }
            })?;
        }
        teams::steps::LEADERBOARD => {
            let types: Vec<String> = LeaderboardType::ALL
                .iter()
                .map(|kind| format!("{} - {}", kind.display_name(), kind.description()))
                .collect();
            let selected = LeaderboardType::ALL
                .iter()
                .position(|kind| *kind == current.leaderboard_type)
                .unwrap_or(0);
            let leaderboard_type =
                LeaderboardType::ALL[io::select_index(theme, "Ranking method", &types, selected)?];

            let periods: Vec<String> = LeaderboardPeriod::ALL
                .iter()
                .map(|period| period.display_name().to_string())
                .collect();
            let selected = LeaderboardPeriod::ALL
                .iter()
                .position(|period| *period == current.leaderboard_period)
                .unwrap_or(0);
            let index = io::select_index(theme, "Reset period", &periods, selected)?;
            let leaderboard_period = LeaderboardPeriod::ALL[index];

            let mut distance = current.speed_ranking_distance;
            let mut custom_km = current.custom_speed_distance_km;
            if leaderboard_type == LeaderboardType::SpeedRankings {
                let distances: Vec<String> = SpeedRankingDistance::ALL
                    .iter()
                    .map(|distance| distance.display_name().to_string())
                    .collect();
                let selected = SpeedRankingDistance::ALL
                    .iter()
                    .position(|option| *option == distance)
                    .unwrap_or(0);
                let index = io::select_index(theme, "Ranking distance", &distances, selected)?;
                distance = SpeedRankingDistance::ALL[index];
                if distance == SpeedRankingDistance::Custom {
                    custom_km = io::prompt_optional(theme, "Distance in km", Some(custom_km))?
                        .unwrap_or(custom_km);
                }
            }
            wizard.update(|form| {
                form.leaderboard_type = leaderboard_type;
                form.leaderboard_period = leaderboard_period;
                form.speed_ranking_distance = distance;
                form.custom_speed_distance_km = custom_km;
            })?;
        }
        teams::steps::WALLET => {
            let ready =
                io::confirm_action(theme, "Open the team Bitcoin wallet?", current.wallet_ready)?;
            wizard.update(|form| form.wallet_ready = ready)?;
        }
        _ => {}
    }
    Ok(())
}
