use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::cli::CliError;
use crate::currency::MinorUnits;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CliError> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Prompt for free-form text, pre-filled with `initial`.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: &str,
    allow_empty: bool,
) -> Result<String, CliError> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(allow_empty)
        .interact_text()?)
}

/// Prompt for an optional number; an empty answer yields `None`.
pub fn prompt_optional<T>(
    theme: &ColorfulTheme,
    prompt: &str,
    current: Option<T>,
) -> Result<Option<T>, CliError>
where
    T: FromStr + ToString,
{
    let initial = current.map(|value| value.to_string()).unwrap_or_default();
    let answer = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            let trimmed = input.trim();
            if trimmed.is_empty() || trimmed.parse::<T>().is_ok() {
                Ok(())
            } else {
                Err(format!("'{trimmed}' is not a valid number"))
            }
        })
        .interact_text()?;
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(trimmed.parse().ok())
}

/// Prompt for a non-negative amount, checked with exact decimal parsing.
pub fn prompt_amount(
    theme: &ColorfulTheme,
    prompt: &str,
    current: f64,
    per_unit: u32,
) -> Result<f64, CliError> {
    let answer = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(format!("{current}"))
        .validate_with(|input: &String| -> Result<(), String> {
            MinorUnits::parse(input, per_unit)
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
        .interact_text()?;
    Ok(MinorUnits::parse(&answer, per_unit)
        .map(|units| units.to_decimal(per_unit))
        .unwrap_or(current))
}

/// Prompt for a UTC timestamp in `YYYY-MM-DD HH:MM` form.
pub fn prompt_datetime(
    theme: &ColorfulTheme,
    prompt: &str,
    current: Option<DateTime<Utc>>,
) -> Result<Option<DateTime<Utc>>, CliError> {
    let initial = current
        .map(|at| at.format(DATE_INPUT_FORMAT).to_string())
        .unwrap_or_default();
    let answer = Input::<String>::with_theme(theme)
        .with_prompt(format!("{prompt} (YYYY-MM-DD HH:MM, UTC)"))
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            let trimmed = input.trim();
            if trimmed.is_empty() || parse_datetime(trimmed).is_some() {
                Ok(())
            } else {
                Err("Use the format YYYY-MM-DD HH:MM".into())
            }
        })
        .interact_text()?;
    Ok(parse_datetime(answer.trim()))
}

pub fn select_index(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
    default: usize,
) -> Result<usize, CliError> {
    Ok(Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()?)
}

pub fn select_many(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
    checked: &[bool],
) -> Result<Vec<usize>, CliError> {
    Ok(MultiSelect::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .defaults(checked)
        .interact()?)
}

fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(input, DATE_INPUT_FORMAT)
        .ok()
        .map(|at| at.and_utc())
}
