use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use intake_application::IntakeService;
use intake_core::progress;
use intake_interaction::{ConfigOverrides, HttpIntakeClient, load_client_config};

mod helper;
mod render;

use helper::{CliHelper, InputMode};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Intake - talk to the symptom intake nurse from your terminal", long_about = None)]
struct Cli {
    /// Backend origin, e.g. http://localhost:5000
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to a config.toml (defaults to ~/.config/intake/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the startup health check
    #[arg(long)]
    no_health_check: bool,
}

type IntakeEditor = Editor<CliHelper, DefaultHistory>;

/// What the REPL should do after handling a line.
enum Flow {
    Continue,
    Quit,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The main entry point for the Intake REPL.
///
/// Loads configuration, checks the backend, then reads one message at a
/// time. The next line is only read once the pending reply has arrived, so
/// at most one chat request is ever in flight.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // ===== Configuration =====
    let overrides = ConfigOverrides {
        api_url: cli.api_url,
        request_timeout_secs: cli.timeout,
    };
    let config = load_client_config(cli.config.as_deref(), &overrides)
        .context("Failed to load configuration")?;
    tracing::info!("[Main] Using backend {}", config.api_url);

    // ===== Backend Initialization =====
    let prefix = config.conversation_prefix.clone();
    let transport = Arc::new(HttpIntakeClient::new(config)?);
    let mut service = IntakeService::new(transport, prefix);

    if !cli.no_health_check {
        service.health_check().await;
    }

    // ===== REPL Setup =====
    let mut rl: IntakeEditor = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Intake Nurse ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();
    render::print_greeting();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match handle_line(trimmed, &mut service, &mut rl).await {
                    Flow::Continue => {}
                    Flow::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn handle_line(line: &str, service: &mut IntakeService, rl: &mut IntakeEditor) -> Flow {
    match line {
        "quit" | "exit" => Flow::Quit,
        "/help" => {
            render::print_help();
            Flow::Continue
        }
        "/summary" => {
            let session = service.session();
            render::print_summary(session.progress(), session.collected());
            Flow::Continue
        }
        "/health" => {
            match service.health_check().await {
                Some(body) => println!("{}", format!("Backend is up: {body}").bright_green()),
                None => println!("{}", "Backend health check failed.".yellow()),
            }
            Flow::Continue
        }
        "/reset" => {
            reset(service, rl).await;
            Flow::Continue
        }
        message => {
            send(message, service).await;
            Flow::Continue
        }
    }
}

async fn send(message: &str, service: &mut IntakeService) {
    // Ctrl-C while waiting abandons the pending reply instead of exiting.
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    render::print_status(render::TYPING_STATUS);
    let result = service.send_message_with_cancel(message, &cancel).await;
    watcher.abort();

    match result {
        Ok(Some(outcome)) => {
            let session = service.session();
            // The reply was the last message appended; the user line came just before it.
            render::print_message(&outcome.user_message);
            render::print_progress(progress(session.message_count().saturating_sub(1)));
            render::print_message(&outcome.reply);
            render::print_summary(session.progress(), session.collected());
            render::print_status(render::ONLINE_STATUS);
        }
        Ok(None) => {}
        Err(err) => eprintln!("{}", format!("Error: {err}").red()),
    }
}

async fn reset(service: &mut IntakeService, rl: &mut IntakeEditor) {
    set_input_mode(rl, InputMode::Confirm);
    let answer = rl.readline(render::RESET_PROMPT);
    set_input_mode(rl, InputMode::Chat);

    let confirmed = match answer {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    };
    if !confirmed {
        println!("{}", "Reset cancelled.".bright_black());
        return;
    }

    let outcome = service.reset().await;
    if let Some(err) = outcome.backend_error {
        println!(
            "{}",
            format!("Backend did not confirm the reset ({err}); local history cleared anyway.")
                .yellow()
        );
    }
    println!();
    render::print_greeting();
    let session = service.session();
    render::print_summary(session.progress(), session.collected());
}

fn set_input_mode(rl: &mut IntakeEditor, mode: InputMode) {
    if let Some(helper) = rl.helper_mut() {
        helper.set_mode(mode);
    }
}
