mod common;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, TimeZone, Utc};
use common::{advance_to_review, started_event_wizard};
use wizard_core::{
    config::WizardConfig,
    currency::MinorUnits,
    errors::{Precondition, SubmissionError, WizardError},
    events::WorkoutMetric,
    remote::{InMemoryRemote, RemoteError},
    wizard::{Completion, NextOutcome, WizardPhase},
};

fn remote() -> Arc<InMemoryRemote> {
    Arc::new(InMemoryRemote::new())
}

#[tokio::test]
async fn basic_info_requires_a_name() {
    let (mut wizard, _) = started_event_wizard(remote(), WizardConfig::default());

    let err = wizard.go_next().await.unwrap_err();
    assert!(matches!(err, WizardError::ValidationFailed { step: 0, .. }));
    assert_eq!(wizard.current_step(), 0);

    let valid = wizard.update(|form| form.name = "Trail Run".into()).unwrap();
    assert!(valid);
    let outcome = wizard.go_next().await.unwrap();
    assert_eq!(outcome, NextOutcome::Advanced { from: 0, to: 1 });
    assert_eq!(wizard.current_step(), 1);
    assert_eq!(wizard.step_label(), "Step 2 of 4");
}

#[tokio::test]
async fn metrics_step_requires_a_selection() {
    let (mut wizard, _) = started_event_wizard(remote(), WizardConfig::default());
    wizard.update(|form| form.name = "Trail Run".into()).unwrap();
    wizard.go_next().await.unwrap();

    assert!(wizard.go_next().await.is_err());
    assert_eq!(wizard.current_step(), 1);

    wizard
        .update(|form| form.toggle_metric(WorkoutMetric::Steps))
        .unwrap();
    wizard.go_next().await.unwrap();
    assert_eq!(wizard.current_step(), 2);
}

#[tokio::test]
async fn schedule_step_requires_both_dates() {
    let (mut wizard, _) = started_event_wizard(remote(), WizardConfig::default());
    wizard.update(|form| form.name = "Trail Run".into()).unwrap();
    wizard.go_next().await.unwrap();
    wizard
        .update(|form| form.toggle_metric(WorkoutMetric::Distance))
        .unwrap();
    wizard.go_next().await.unwrap();

    let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    wizard.update(|form| form.set_start_date(start)).unwrap();
    let err = wizard.go_next().await.unwrap_err();
    match err {
        WizardError::ValidationFailed { step, reason } => {
            assert_eq!(step, 2);
            assert_eq!(reason.field, "end_date");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(wizard.current_step(), 2);

    wizard
        .update(|form| form.end_date = Some(start + Duration::days(2)))
        .unwrap();
    wizard.go_next().await.unwrap();
    assert_eq!(wizard.current_step(), 3);
    assert_eq!(wizard.next_label(), "Create Event");
}

#[tokio::test]
async fn successful_submission_completes_once_after_acknowledgement() {
    let remote = remote();
    let (mut wizard, log) = started_event_wizard(Arc::clone(&remote), WizardConfig::default());
    advance_to_review(&mut wizard).await;
    wizard
        .update(|form| {
            form.entry_fee = 12.5;
            form.terms_accepted = true;
        })
        .unwrap();

    let outcome = wizard.go_next().await.unwrap();
    let NextOutcome::Created { entity, notice } = outcome else {
        panic!("expected a created outcome");
    };
    assert_eq!(entity.name, "Trail Run");
    assert_eq!(notice.title, "Event Created!");
    assert_eq!(
        notice.message,
        "Your event 'Trail Run' has been created successfully and is now live."
    );
    assert_eq!(wizard.current_step(), 3);
    assert_eq!(wizard.phase(), WizardPhase::AwaitingAcknowledgement);
    assert!(log.entries().is_empty());

    wizard.acknowledge().unwrap();
    assert_eq!(wizard.current_step(), 3);
    assert_eq!(wizard.phase(), WizardPhase::Finished);

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].success());
    let data = entries[0].clone().into_data().unwrap();
    assert_eq!(data.name, "Trail Run");

    assert!(matches!(
        wizard.acknowledge(),
        Err(WizardError::PreconditionViolated(Precondition::SessionClosed))
    ));
    assert_eq!(log.entries().len(), 1);

    let stored = remote.events().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].entry_fee, MinorUnits(1250));
    assert_eq!(stored[0].unit, "km");
}

#[tokio::test]
async fn failed_submission_keeps_the_session_and_retries() {
    let remote = remote();
    let (mut wizard, log) = started_event_wizard(Arc::clone(&remote), WizardConfig::default());
    advance_to_review(&mut wizard).await;
    wizard.update(|form| form.terms_accepted = true).unwrap();
    remote
        .fail_next(RemoteError::Unavailable("connection reset".into()))
        .await;

    let err = wizard.go_next().await.unwrap_err();
    assert!(err.is_retryable());
    match &err {
        WizardError::SubmissionFailed { notice, source } => {
            assert_eq!(notice.title, "Event Creation Failed");
            assert_eq!(
                notice.message,
                "Sorry, we couldn't create your event. Please try again."
            );
            assert!(matches!(source, SubmissionError::Remote(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!wizard.state().is_submitting);
    assert_eq!(wizard.current_step(), 3);
    assert_eq!(wizard.phase(), WizardPhase::Editing);
    assert!(log.entries().is_empty());
    assert_eq!(wizard.data().unwrap().name, "Trail Run");

    let retried = wizard.go_next().await.unwrap();
    assert!(matches!(retried, NextOutcome::Created { .. }));
    assert_eq!(wizard.coordinator().attempts(), 2);
    assert_eq!(remote.events().await.unwrap().len(), 1);
}

#[tokio::test]
async fn cancel_fires_once_and_closes_the_session() {
    let (mut wizard, log) = started_event_wizard(remote(), WizardConfig::default());
    wizard.update(|form| form.name = "Trail Run".into()).unwrap();
    wizard.go_next().await.unwrap();

    let prompt = wizard.cancel_prompt();
    assert_eq!(prompt.title, "Cancel Event Creation?");
    assert_eq!(prompt.keep_label, "Keep Editing");

    wizard.cancel().unwrap();
    assert_eq!(wizard.phase(), WizardPhase::Cancelled);
    assert!(wizard.data().is_none());
    assert!(wizard.visible_step().is_none());
    assert_eq!(log.entries(), vec![Completion::Cancelled]);

    let closed = WizardError::PreconditionViolated(Precondition::SessionClosed);
    assert_eq!(
        wizard.go_next().await.unwrap_err().to_string(),
        closed.to_string()
    );
    assert_eq!(wizard.go_back().unwrap_err().to_string(), closed.to_string());
    assert!(wizard.cancel().is_err());
    assert_eq!(log.entries().len(), 1);
}

#[tokio::test]
async fn cancel_is_rejected_while_awaiting_acknowledgement() {
    let (mut wizard, log) = started_event_wizard(remote(), WizardConfig::default());
    advance_to_review(&mut wizard).await;
    wizard.update(|form| form.terms_accepted = true).unwrap();
    wizard.go_next().await.unwrap();

    assert!(matches!(
        wizard.cancel(),
        Err(WizardError::PreconditionViolated(
            Precondition::AwaitingAcknowledgement
        ))
    ));
    assert!(wizard.go_back().is_err());
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn going_back_moves_one_step_without_validation() {
    let (mut wizard, _) = started_event_wizard(remote(), WizardConfig::default());
    assert!(!wizard.can_go_back());
    assert!(matches!(
        wizard.go_back(),
        Err(WizardError::PreconditionViolated(Precondition::AtFirstStep))
    ));

    advance_to_review(&mut wizard).await;
    wizard.update(|form| form.name.clear()).unwrap();
    assert_eq!(wizard.go_back().unwrap(), 2);
    assert_eq!(wizard.go_back().unwrap(), 1);
    assert_eq!(wizard.go_back().unwrap(), 0);
    assert_eq!(wizard.visible_step().unwrap().key, "basic_info");
    assert!(wizard.go_back().is_err());
    assert_eq!(wizard.current_step(), 0);
}

#[tokio::test]
async fn index_stays_in_bounds_for_mixed_navigation() {
    let (mut wizard, log) = started_event_wizard(remote(), WizardConfig::default());
    wizard
        .update(|form| {
            form.start_date = Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap());
            form.end_date = Some(Utc.with_ymd_and_hms(2025, 6, 8, 9, 0, 0).unwrap());
        })
        .unwrap();

    // Linear congruential sequence; consent stays off so the terminal step never submits.
    let mut seed: u32 = 17;
    for _ in 0..400 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let before = wizard.current_step();
        match (seed >> 16) % 4 {
            0 => {
                let valid = wizard.can_go_next();
                let result = wizard.go_next().await;
                if valid {
                    assert!(result.is_ok());
                    assert_eq!(wizard.current_step(), before + 1);
                } else {
                    assert!(result.is_err());
                    assert_eq!(wizard.current_step(), before);
                }
            }
            1 => {
                let result = wizard.go_back();
                if before > 0 {
                    assert_eq!(result.unwrap(), before - 1);
                } else {
                    assert!(result.is_err());
                    assert_eq!(wizard.current_step(), 0);
                }
            }
            2 => {
                wizard
                    .update(|form| {
                        form.name = if form.name.is_empty() {
                            "Loop".into()
                        } else {
                            String::new()
                        }
                    })
                    .unwrap();
            }
            _ => {
                wizard
                    .update(|form| form.toggle_metric(WorkoutMetric::Calories))
                    .unwrap();
            }
        }
        assert!(wizard.current_step() < wizard.total_steps());
        let progress = wizard.progress();
        assert!((0.0..=1.0).contains(&progress));
    }
    assert_eq!(wizard.coordinator().attempts(), 0);
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn review_consent_gate_can_be_disabled() {
    let config = WizardConfig {
        require_review_consent: false,
        ..WizardConfig::default()
    };
    let (mut wizard, _) = started_event_wizard(remote(), config);
    advance_to_review(&mut wizard).await;

    let outcome = wizard.go_next().await.unwrap();
    assert!(matches!(outcome, NextOutcome::Created { .. }));
}

#[tokio::test]
async fn review_without_consent_does_not_submit() {
    let (mut wizard, _) = started_event_wizard(remote(), WizardConfig::default());
    advance_to_review(&mut wizard).await;

    let err = wizard.go_next().await.unwrap_err();
    assert!(matches!(err, WizardError::ValidationFailed { step: 3, .. }));
    assert_eq!(wizard.coordinator().attempts(), 0);
}

#[tokio::test]
async fn abandoned_submission_can_be_retried() {
    let remote = Arc::new(InMemoryRemote::new().with_latency(StdDuration::from_millis(200)));
    let (mut wizard, _) = started_event_wizard(Arc::clone(&remote), WizardConfig::default());
    advance_to_review(&mut wizard).await;
    wizard.update(|form| form.terms_accepted = true).unwrap();

    let timed_out = tokio::time::timeout(StdDuration::from_millis(10), wizard.go_next()).await;
    assert!(timed_out.is_err());
    assert!(!wizard.coordinator().is_submitting());
    assert!(!wizard.state().is_submitting);
    assert_eq!(wizard.phase(), WizardPhase::Editing);
    assert!(wizard.can_go_back());
    assert!(wizard.can_go_next());

    let outcome = wizard.go_next().await.unwrap();
    assert!(matches!(outcome, NextOutcome::Created { .. }));
    assert_eq!(wizard.coordinator().attempts(), 2);
    assert_eq!(remote.events().await.unwrap().len(), 1);
}

#[tokio::test]
async fn progress_tracks_the_current_step() {
    let (mut wizard, _) = started_event_wizard(remote(), WizardConfig::default());
    assert_eq!(wizard.progress(), 0.0);
    advance_to_review(&mut wizard).await;
    assert_eq!(wizard.progress(), 1.0);
    wizard.go_back().unwrap();
    assert!((wizard.progress() - 2.0 / 3.0).abs() < f32::EPSILON);
}
