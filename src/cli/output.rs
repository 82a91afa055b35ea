use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => format!("[i] {text}").cyan().to_string(),
        MessageKind::Success => format!("[✓] {text}").green().bold().to_string(),
        MessageKind::Warning => format!("[!] {text}").yellow().to_string(),
        MessageKind::Error => format!("[x] {text}").red().bold().to_string(),
    }
}

fn emit(kind: MessageKind, message: impl fmt::Display) {
    let line = apply_style(kind, message);
    if matches!(kind, MessageKind::Warning | MessageKind::Error) {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn info(message: impl fmt::Display) {
    emit(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    emit(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    emit(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    emit(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    emit(MessageKind::Section, title);
}

/// Plain indented body line.
pub fn line(text: impl fmt::Display) {
    println!("  {text}");
}

/// Text progress bar, e.g. `[#####-----] 50%`.
pub fn progress_bar(progress: f32, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * width as f32).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        progress * 100.0
    )
}
