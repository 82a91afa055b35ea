use chrono::{DateTime, Utc};

use crate::config::WizardConfig;
use crate::currency::{format_amount, CurrencyCode};
use crate::events::form::{EventFormData, WorkoutMetric};
use crate::wizard::{StepDescriptor, ValidationError};

pub const BASIC_INFO: &str = "basic_info";
pub const METRICS: &str = "metrics";
pub const SCHEDULE: &str = "schedule";
pub const REVIEW: &str = "review";

const DATE_FORMAT: &str = "%b %-d, %Y %H:%M UTC";

/// The four event wizard steps in presentation order.
pub fn event_steps(config: &WizardConfig) -> Vec<StepDescriptor<EventFormData>> {
    vec![
        basic_info_step(),
        metrics_step(),
        schedule_step(),
        review_step(config),
    ]
}

fn basic_info_step() -> StepDescriptor<EventFormData> {
    StepDescriptor::new(BASIC_INFO, "Basic Info")
        .with_validator(check_basic_info)
        .with_renderer(|form: &EventFormData| {
            vec![
                format!("Name: {}", form.name),
                format!(
                    "Type: {} ({})",
                    form.event_type.display_name(),
                    form.event_type.description()
                ),
                format!("Description: {}", form.description),
            ]
        })
}

fn metrics_step() -> StepDescriptor<EventFormData> {
    StepDescriptor::new(METRICS, "Metrics")
        .with_validator(check_metrics)
        .with_renderer(|form: &EventFormData| {
            WorkoutMetric::ALL
                .iter()
                .map(|metric| {
                    let mark = if form.selected_metrics.contains(metric) {
                        "x"
                    } else {
                        " "
                    };
                    format!("[{mark}] {} ({})", metric.display_name(), metric.unit())
                })
                .chain(std::iter::once(target_line(form)))
                .collect()
        })
}

fn schedule_step() -> StepDescriptor<EventFormData> {
    StepDescriptor::new(SCHEDULE, "Schedule")
        .with_validator(check_schedule)
        .with_renderer(schedule_lines)
}

fn review_step(config: &WizardConfig) -> StepDescriptor<EventFormData> {
    let currency = config.currency_code.clone();
    let step = StepDescriptor::new(REVIEW, "Review Event")
        .with_renderer(move |form: &EventFormData| review_lines(form, &currency));
    if config.require_review_consent {
        step.with_validator(check_review)
    } else {
        step
    }
}

pub fn check_basic_info(form: &EventFormData) -> Result<(), ValidationError> {
    if form.has_name() {
        Ok(())
    } else {
        Err(ValidationError::new("name", "Please enter an event name"))
    }
}

pub fn check_metrics(form: &EventFormData) -> Result<(), ValidationError> {
    if form.selected_metrics.is_empty() {
        Err(ValidationError::new(
            "selected_metrics",
            "Please select at least one metric",
        ))
    } else {
        Ok(())
    }
}

pub fn check_schedule(form: &EventFormData) -> Result<(), ValidationError> {
    match (form.start_date, form.end_date) {
        (None, _) => Err(ValidationError::new("start_date", "Please choose a start date")),
        (_, None) => Err(ValidationError::new("end_date", "Please choose an end date")),
        (Some(start), Some(end)) if end < start => Err(ValidationError::new(
            "end_date",
            "The end date must not be before the start date",
        )),
        _ => Ok(()),
    }
}

/// Terminal gate: consent plus the fields earlier steps already required.
pub fn check_review(form: &EventFormData) -> Result<(), ValidationError> {
    if !form.terms_accepted {
        return Err(ValidationError::new(
            "terms_accepted",
            "Please agree to the event terms and conditions",
        ));
    }
    check_basic_info(form)?;
    check_metrics(form)
}

fn target_line(form: &EventFormData) -> String {
    match form.target_value {
        Some(value) if value > 0.0 => format!("Target: {} {}", value.trunc(), form.target_unit),
        _ => "No target goal set".to_string(),
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn schedule_lines(form: &EventFormData) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(start) = form.start_date {
        lines.push(format!("Starts: {}", format_date(start)));
    }
    if let Some(end) = form.end_date {
        lines.push(format!("Ends: {}", format_date(end)));
    }
    if let (Some(start), Some(end)) = (form.start_date, form.end_date) {
        lines.push(duration_line(end - start));
    }
    lines
}

fn duration_line(duration: chrono::Duration) -> String {
    let days = duration.num_days();
    if days > 0 {
        format!("Duration: {days} day{}", if days == 1 { "" } else { "s" })
    } else {
        let hours = duration.num_hours();
        format!("Duration: {hours} hour{}", if hours == 1 { "" } else { "s" })
    }
}

fn review_lines(form: &EventFormData, currency: &CurrencyCode) -> Vec<String> {
    let mut lines = vec![
        if form.has_name() {
            form.name.trim().to_string()
        } else {
            "Untitled Event".to_string()
        },
        form.event_type.display_name().to_uppercase(),
        if form.description.trim().is_empty() {
            "No description provided".to_string()
        } else {
            form.description.trim().to_string()
        },
    ];
    lines.extend(schedule_lines(form));

    if form.selected_metrics.is_empty() {
        lines.push("No metrics selected".into());
    } else {
        let names: Vec<&str> = form
            .selected_metrics
            .iter()
            .map(|metric| metric.display_name())
            .collect();
        lines.push(names.join(", "));
    }
    lines.push(target_line(form));

    lines.push(if form.entry_fee > 0.0 {
        format!("Entry Fee: {}", format_amount(form.entry_fee, currency))
    } else {
        "Entry Fee: Free".into()
    });
    lines.push(if form.prize_pool > 0.0 {
        format!("Prize Pool: {}", format_amount(form.prize_pool, currency))
    } else {
        "Prize Pool: No prize set".into()
    });
    lines.push(match form.max_participants {
        Some(limit) => format!("Max Participants: {limit}"),
        None => "Max Participants: Unlimited".into(),
    });
    lines.push(
        if form.is_public {
            "Visibility: Public event"
        } else {
            "Visibility: Team members only"
        }
        .into(),
    );
    lines.push(format!(
        "[{}] I agree to the event terms and conditions",
        if form.terms_accepted { "x" } else { " " }
    ));
    lines
}
