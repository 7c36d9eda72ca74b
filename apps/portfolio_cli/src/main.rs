use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    ContactForm, HttpContactEndpoint, Notification, Notifier, SequenceMatcher, SequenceState,
    TokioUnlockTimer, TracingNotifier,
};
use shared::domain::{ContactFields, SubmissionStatus};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a message through the contact endpoint.
    Send {
        #[arg(long)]
        server_url: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,
    },
    /// Feed concept clicks to the sequence matcher in order.
    Sequence {
        tokens: Vec<String>,
        /// Stay until the unlock window closes.
        #[arg(long)]
        wait: bool,
    },
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.description() {
            Some(description) => println!("{} {description}", notification.title()),
            None => println!("{}", notification.title()),
        }
        TracingNotifier.notify(notification);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Send {
            server_url,
            name,
            email,
            message,
            timeout_secs,
        } => {
            let endpoint =
                HttpContactEndpoint::with_timeout(&server_url, Duration::from_secs(timeout_secs))?;
            let mut form = ContactForm::new(ContactFields::new(name, email, message));
            let status = form.submit(&endpoint, &ConsoleNotifier).await;
            if status != SubmissionStatus::Success {
                bail!(
                    "{}",
                    form.error_message()
                        .unwrap_or(client_core::GENERIC_FAILURE_MESSAGE)
                );
            }
        }
        Command::Sequence { tokens, wait } => {
            let (timer, mut expiries) = TokioUnlockTimer::new();
            let mut matcher = SequenceMatcher::new(timer);
            for token in tokens {
                let state = matcher.select(token.as_str());
                println!("{token}: {}", describe(state));
            }
            if wait && matcher.is_unlocked() {
                let window = matcher.config().unlock_window;
                println!("waiting {}s for the window to close", window.as_secs());
                if let Some(event) = expiries.recv().await {
                    println!("expired: {}", describe(matcher.apply(event)));
                }
            }
        }
    }

    Ok(())
}

fn describe(state: &SequenceState) -> String {
    match state {
        SequenceState::Idle => "idle".to_string(),
        SequenceState::Collecting(tokens) => format!("collecting [{}]", tokens.join(", ")),
        SequenceState::Unlocked => "unlocked".to_string(),
    }
}
