//! Terminal rendering of the transcript, status line and summary panel.

use colored::Colorize;
use intake_core::{CollectedInfo, MessageRole, TranscriptMessage};

/// First assistant message, shown at start and after every reset.
pub const GREETING: &str = "Hello! I'm here to help you with your health concerns. Please describe what you're experiencing, and I'll help assess your symptoms and provide appropriate guidance. What brings you in today?";

pub const TYPING_STATUS: &str = "Nurse is typing...";
pub const ONLINE_STATUS: &str = "Online";
pub const EMPTY_SUMMARY: &str =
    "No information collected yet. The nurse will gather details as you chat.";
pub const RESET_PROMPT: &str =
    "Start a new intake? This will clear the current conversation history. (y/N) ";

const PROGRESS_CELLS: usize = 10;

/// Plain-text progress bar, e.g. `[#####-----] 50%`.
pub fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = usize::from(percent) * PROGRESS_CELLS / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_CELLS - filled),
        percent
    )
}

/// Plain-text summary panel lines.
pub fn summary_lines(info: &CollectedInfo) -> Vec<String> {
    if info.is_empty() {
        return vec![EMPTY_SUMMARY.to_string()];
    }

    let mut lines = Vec::new();
    if !info.symptoms().is_empty() {
        lines.push(format!("Symptoms: {}", info.symptoms().join(", ")));
    }
    if let Some(resolution) = info.resolution() {
        lines.push(format!("Resolution: {resolution}"));
    }
    lines
}

/// Prints one transcript message with role, time and alert styling.
pub fn print_message(message: &TranscriptMessage) {
    let author = match message.role {
        MessageRole::User => "You",
        MessageRole::Assistant => "Nurse",
    };
    let header = format!("[{}] {}", author, message.display_time());
    println!("{}", header.bright_black());

    for line in message.display_text().lines() {
        let styled = if message.is_emergency {
            line.bright_red().bold()
        } else if message.is_notice {
            line.yellow()
        } else {
            match message.role {
                MessageRole::User => line.green(),
                MessageRole::Assistant => line.bright_blue(),
            }
        };
        println!("{styled}");
    }
    println!();
}

/// Prints the greeting as an assistant message that does not count toward progress.
pub fn print_greeting() {
    print_message(&TranscriptMessage::assistant(GREETING));
}

pub fn print_status(status: &str) {
    println!("{}", status.italic().bright_black());
}

pub fn print_progress(percent: u8) {
    println!("{}", format!("Progress {}", progress_bar(percent)).bright_magenta());
}

/// Prints the progress bar and the summary panel.
pub fn print_summary(progress: u8, info: &CollectedInfo) {
    print_progress(progress);
    for line in summary_lines(info) {
        if info.is_empty() {
            println!("{}", line.italic().bright_black());
        } else {
            println!("{}", line.bright_white());
        }
    }
    println!();
}

pub fn print_help() {
    println!("{}", "Type your message and press Enter.".bright_black());
    println!("{}", "  /summary  show progress and collected information".bright_black());
    println!("{}", "  /reset    start a new intake".bright_black());
    println!("{}", "  /health   check the backend".bright_black());
    println!("{}", "  quit      exit".bright_black());
    println!();
}
