//! Scheduled daily posting.
//!
//! Usage:
//!   cargo run --bin scheduler -- morning      # 07:00 weather + birthdays
//!   cargo run --bin scheduler -- motivation   # 10:00 motivation
//!   cargo run --bin scheduler -- education    # 14:00 education fact
//!
//! Credentials come from TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID and
//! GEMINI_API_KEY. Meant to be re-invoked by an external timer (cron);
//! a failed run exits non-zero.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use dotenvy::dotenv;
use tracing::error;
use tracing_subscriber::EnvFilter;

use magistr_content::commands::{Mode, Runner};

#[derive(Parser, Debug)]
#[command(name = "scheduler")]
#[command(about = "Scheduled daily posts for @magistr_guliston")]
struct Args {
    /// Routine to run: morning | motivation | education
    selector: Option<String>,
}

fn print_usage() {
    println!("Usage:");
    println!("  scheduler morning      - 07:00 (weather + birthdays)");
    println!("  scheduler motivation   - 10:00 (motivation)");
    println!("  scheduler education    - 14:00 (education fact)");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mode = match args.selector.as_deref().and_then(Mode::parse) {
        Some(mode) => mode,
        None => {
            print_usage();
            return Ok(());
        }
    };

    let runner = Runner::from_env()?;
    let today = Local::now().date_naive();

    if let Err(e) = runner.run(mode, today).await {
        error!(error = %e, "scheduled run failed");
        std::process::exit(1);
    }

    Ok(())
}
