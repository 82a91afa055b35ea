#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use wizard_core::{
    clock::FixedClock,
    config::{ConfigManager, WizardConfig},
    events::{event_wizard, EventFormData, EventSubmitter, WorkoutMetric},
    leagues::{league_wizard, LeagueContext, LeagueFormData, LeagueSubmitter},
    remote::InMemoryRemote,
    teams::{team_wizard, TeamContext, TeamFormData, TeamSubmitter},
    wizard::{Completion, WizardController},
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub type TestEventWizard = WizardController<EventSubmitter<Arc<InMemoryRemote>, FixedClock>>;
pub type TestLeagueWizard = WizardController<LeagueSubmitter<Arc<InMemoryRemote>, FixedClock>>;
pub type TestTeamWizard = WizardController<TeamSubmitter<Arc<InMemoryRemote>, FixedClock>>;

/// Creates a config manager rooted in a unique temporary directory.
pub fn setup_config_env() -> ConfigManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    ConfigManager::with_base_dir(base).expect("create config manager for temp dir")
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(fixed_now())
}

/// Records every completion callback invocation.
#[derive(Clone)]
pub struct CompletionLog<D> {
    entries: Arc<Mutex<Vec<Completion<D>>>>,
}

impl<D: Clone + Send + 'static> CompletionLog<D> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn recorder(&self) -> impl FnOnce(Completion<D>) + Send + 'static {
        let entries = Arc::clone(&self.entries);
        move |completion| entries.lock().expect("lock completion log").push(completion)
    }

    pub fn entries(&self) -> Vec<Completion<D>> {
        self.entries.lock().expect("lock completion log").clone()
    }
}

pub fn started_event_wizard(
    remote: Arc<InMemoryRemote>,
    config: WizardConfig,
) -> (TestEventWizard, CompletionLog<EventFormData>) {
    let log = CompletionLog::new();
    let mut wizard = event_wizard(remote, fixed_clock(), config)
        .expect("build event wizard")
        .with_completion(log.recorder());
    wizard.start().expect("start wizard");
    (wizard, log)
}

pub fn team_context() -> LeagueContext {
    LeagueContext {
        team_id: "team-42".into(),
        team_name: "Night Owls".into(),
        created_by: "captain-7".into(),
        member_count: 12,
    }
}

pub fn started_league_wizard(
    remote: Arc<InMemoryRemote>,
) -> (TestLeagueWizard, CompletionLog<LeagueFormData>) {
    let log = CompletionLog::new();
    let mut wizard = league_wizard(remote, fixed_clock(), team_context())
        .expect("build league wizard")
        .with_completion(log.recorder());
    wizard.start().expect("start wizard");
    (wizard, log)
}

pub fn started_team_wizard(
    remote: Arc<InMemoryRemote>,
) -> (TestTeamWizard, CompletionLog<TeamFormData>) {
    let log = CompletionLog::new();
    let context = TeamContext {
        captain_id: "captain-7".into(),
    };
    let mut wizard = team_wizard(remote, fixed_clock(), context)
        .expect("build team wizard")
        .with_completion(log.recorder());
    wizard.start().expect("start wizard");
    (wizard, log)
}

/// Walks a fresh event wizard to the review step with valid data.
pub async fn advance_to_review(wizard: &mut TestEventWizard) {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    wizard
        .update(|form| form.name = "Trail Run".into())
        .expect("edit name");
    wizard.go_next().await.expect("leave basic info");
    wizard
        .update(|form| form.toggle_metric(WorkoutMetric::Distance))
        .expect("pick metric");
    wizard.go_next().await.expect("leave metrics");
    wizard
        .update(|form| {
            form.set_start_date(start);
            form.end_date = Some(start + Duration::days(7));
        })
        .expect("set schedule");
    wizard.go_next().await.expect("leave schedule");
    assert_eq!(wizard.current_step(), 3);
}
