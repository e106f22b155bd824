//! Inquiry Notifier CLI
//!
//! Previews the rendered notification bodies for a client-inquiry record,
//! or dispatches the inquiry email to a list of addresses using the
//! environment-configured SMTP settings.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use serde_json::json;
use socialconnect::{ClientInquiry, EmailMessenger, TemplateEngine, UnitDetails};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "inquiry-notifier")]
#[command(about = "Preview and dispatch client-inquiry notifications")]
struct Cli {
    /// Path to a JSON client-inquiry record; a built-in sample is used when omitted
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the email subject, both bodies and the WhatsApp message to stdout
    Preview,
    /// Send the inquiry email and print the per-destination outcomes as JSON
    Email {
        /// Destination address (repeatable)
        #[arg(long = "to", required = true)]
        to: Vec<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Silently continues if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init();
}

fn sample_inquiry() -> ClientInquiry {
    ClientInquiry::new(
        "Ahmed Hassan",
        "+20 12 3456 7890",
        UnitDetails::new("New Capital Heights", "2-Bedroom Apartment", "2,800,000 EGP")
            .with_unit_number("A-205")
            .with_size("120 sqm")
            .with_floor("2nd Floor"),
    )
    .with_chat_description(
        "Client contacted via WhatsApp expressing interest in a 2-bedroom apartment.",
    )
    .with_client_request("Interested in flexible payment plan and site visit.")
}

fn load_inquiry(path: Option<&PathBuf>) -> Result<ClientInquiry> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw).wrap_err("failed to parse inquiry record")
        }
        None => Ok(sample_inquiry()),
    }
}

fn main() -> Result<()> {
    // Install color-eyre first for colored error output
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();

    init_tracing();

    let cli = Cli::parse();
    let inquiry = load_inquiry(cli.data.as_ref())?;

    match cli.command {
        Command::Preview => {
            let engine = TemplateEngine::new()?;
            let rendered = engine.render_inquiry_email(&inquiry)?;
            let interest = engine.render_interest_message(&inquiry)?;

            println!("Subject: {}", rendered.subject);
            println!("\n--- text body ---\n{}", rendered.text_body);
            println!("--- html body ---\n{}", rendered.html_body);
            println!("--- whatsapp message ---\n{}", interest);
        }
        Command::Email { to } => {
            let messenger = EmailMessenger::from_env()?;
            let result = messenger.send_message(&inquiry, &to)?;

            let stats = result.statistics();
            if stats.failed > 0 {
                tracing::warn!(
                    failed = stats.failed,
                    total = stats.total,
                    "Some destinations failed; see the outcome list"
                );
            }

            let report = json!({
                "results": result.outcomes(),
                "statistics": stats,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
