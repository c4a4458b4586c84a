//! Terminal client for the contact endpoint.
//!
//! Fills the contact form interactively, with the same validation the web
//! form applies, and submits it to a running server.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for every field
//! cargo run --bin contact -- send
//!
//! # Provide fields up front and skip the confirmation
//! cargo run --bin contact -- send --name "Jane Doe" --email jane@example.com \
//!     --message "Let's talk about the new project opportunity." -y
//!
//! # Check server health
//! cargo run --bin contact -- health
//! ```
//!
//! # Environment Variables
//!
//! - `CONTACT_ENDPOINT` (optional): server base URL (default: `http://localhost:3000`)

use contact_relay::form::{ContactForm, Field, FormStatus, HttpGateway};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::time::Duration;

/// Command-line client for contact-relay.
#[derive(Parser)]
#[command(name = "contact")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(
        long,
        global = true,
        env = "CONTACT_ENDPOINT",
        default_value = "http://localhost:3000"
    )]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 15)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in and send a contact message
    Send {
        /// Your name
        #[arg(short, long)]
        name: Option<String>,

        /// Your email address
        #[arg(short, long)]
        email: Option<String>,

        /// The message
        #[arg(short, long)]
        message: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show server health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let gateway = HttpGateway::new(&cli.endpoint, Duration::from_secs(cli.timeout))
        .context("Failed to create HTTP client")?;

    match cli.command {
        Commands::Send {
            name,
            email,
            message,
            yes,
        } => send_message(&gateway, [name, email, message], yes).await?,
        Commands::Health => show_health(&gateway).await?,
    }

    Ok(())
}

/// Fills the form and submits it.
///
/// # Flow
///
/// 1. Take each field from the arguments, or prompt for it
/// 2. Leaving a field validates it; invalid input is asked for again
/// 3. Show a summary and confirm (unless `--yes`)
/// 4. Submit and print the server's answer
async fn send_message(
    gateway: &HttpGateway,
    preset: [Option<String>; 3],
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✉️  Send a message".bright_blue().bold());
    println!();

    let mut form = ContactForm::new();

    for (field, preset) in Field::ALL.into_iter().zip(preset) {
        fill_field(&mut form, field, preset)?;
    }

    println!();
    println!("{}", "Message details:".bright_white().bold());
    println!("  Name:    {}", form.value(Field::Name).cyan());
    println!("  Email:   {}", form.value(Field::Email).cyan());
    println!("  Message: {}", form.value(Field::Message).trim());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Send to {}?", gateway.base_url()))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    println!("{}", "Sending...".bright_black());

    let status = form.submit(gateway).await;
    let notice = form.notice().unwrap_or_default();

    println!();
    match status {
        FormStatus::Succeeded => println!("{}", format!("✅ {}", notice).green().bold()),
        _ => {
            println!("{}", format!("❌ {}", notice).red().bold());
            anyhow::bail!("Message was not sent");
        }
    }
    println!();

    Ok(())
}

/// Sets one field, prompting until it passes validation.
///
/// A preset value that fails validation is reported and then prompted for.
fn fill_field(form: &mut ContactForm, field: Field, preset: Option<String>) -> Result<()> {
    if let Some(value) = preset {
        form.edit(field, value);
        if form.blur(field) {
            return Ok(());
        }
        print_field_error(form, field);
    }

    loop {
        let value: String = Input::new()
            .with_prompt(field.label())
            .with_initial_text(form.value(field))
            .allow_empty(true)
            .interact_text()?;

        form.edit(field, value);
        if form.blur(field) {
            return Ok(());
        }
        print_field_error(form, field);
    }
}

fn print_field_error(form: &ContactForm, field: Field) {
    if let Some(error) = form.error(field) {
        println!("  {}", format!("⚠️  {}", error).yellow());
    }
}

/// Displays the server health report.
///
/// # Output Format
///
/// ```text
/// 🩺 Server health
///
///   Status:   healthy (v0.1.0)
///   mail_relay         OK     Relay reachable
///   rate_limit_store   OK     memory store available
/// ```
async fn show_health(gateway: &HttpGateway) -> Result<()> {
    println!("{}", "🩺 Server health".bright_blue().bold());
    println!();

    let (status, report) = gateway
        .health()
        .await
        .with_context(|| format!("Failed to reach {}", gateway.base_url()))?;

    let overall = if status.is_success() {
        report.status.green().bold()
    } else {
        report.status.red().bold()
    };
    println!("  Status:   {} (v{})", overall, report.version);

    for (name, check) in [
        ("mail_relay", &report.checks.mail_relay),
        ("rate_limit_store", &report.checks.rate_limit_store),
    ] {
        let marker = if check.is_ok() { "OK".green() } else { "ERROR".red() };
        println!(
            "  {:<18} {:<6} {}",
            name.cyan(),
            marker,
            check.message.as_deref().unwrap_or("").bright_black()
        );
    }
    println!();

    Ok(())
}
