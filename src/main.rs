//! Magistr Content - interactive review console
//!
//! Generates the four daily posts for @magistr_guliston and lets the
//! operator review them, send one at a time, or send all with confirmation.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use dotenvy::dotenv;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use magistr_content::commands::{Publisher, Session};
use magistr_content::config::{ConfigStore, DeliveryConfig, CONFIG_FILE};
use magistr_content::posts::DeliveryState;
use magistr_content::{Error, GeminiClient, TelegramClient, WeatherClient};

#[derive(Parser)]
#[command(name = "magistr")]
#[command(about = "Daily content generator for @magistr_guliston", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the delivery config record
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::at(cli.config);
    let mut config = store.load().unwrap_or_else(|e| {
        warn!(error = %e, "could not read stored config, starting empty");
        DeliveryConfig::default()
    });

    let weather = WeatherClient::new()?;
    let gemini = GeminiClient::from_env()?;
    let publisher = Publisher::new(TelegramClient::new()?);
    let mut session = Session::new();

    println!("Magistr Content — Telegram post generator");
    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let cmd = match parts.next() {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            "g" | "generate" => {
                println!("Generating today's posts...");
                let today = Local::now().date_naive();
                match session.generate(&weather, &gemini, today).await {
                    Ok(()) => print_posts(&session),
                    Err(e) => eprintln!("Generation failed: {}", e),
                }
            }
            "l" | "list" => print_posts(&session),
            "s" | "send" => {
                let index: usize = match parts.next().and_then(|s| s.parse().ok()) {
                    Some(n) if n >= 1 && n <= session.posts.len() => n,
                    _ => {
                        println!("Usage: send <1-{}>", session.posts.len().max(1));
                        continue;
                    }
                };

                let item = &mut session.posts[index - 1];
                match publisher.send_item(&config, item).await {
                    Ok(()) => println!("✓ {} delivered", item.title),
                    Err(Error::ConfigRequired) => {
                        println!("Set the bot token and chat id first (command: c).")
                    }
                    Err(e) => eprintln!("Send failed: {}", e),
                }
            }
            "a" | "sendall" => {
                if session.posts.is_empty() {
                    println!("Nothing to send - generate first.");
                    continue;
                }
                if !config.is_complete() {
                    println!("Set the bot token and chat id first (command: c).");
                    continue;
                }
                if !confirm("Send all posts to the channel?")? {
                    continue;
                }
                match publisher.send_all(&config, &mut session.posts).await {
                    Ok(report) => {
                        println!(
                            "Sent {}, skipped {}, failed {}",
                            report.sent,
                            report.skipped,
                            report.failures.len()
                        );
                        for (post, message) in &report.failures {
                            eprintln!("  {} failed: {}", post, message);
                        }
                    }
                    Err(e) => eprintln!("Bulk send failed: {}", e),
                }
            }
            "c" | "config" => {
                let token = prompt_line("Bot token: ")?;
                let chat_id = prompt_line("Chat id: ")?;
                config = DeliveryConfig::new(token.trim(), chat_id.trim());
                match store.save(&config) {
                    Ok(()) => println!("Saved to {}", store.path().display()),
                    Err(e) => eprintln!("Could not save config: {}", e),
                }
            }
            "h" | "help" => print_help(),
            "q" | "quit" => break,
            other => println!("Unknown command: {} (h for help)", other),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  g | generate   - build today's four posts");
    println!("  l | list       - show the current posts");
    println!("  s | send <n>   - send one post to the channel");
    println!("  a | sendall    - send every unsent post, 1s apart");
    println!("  c | config     - set bot token and chat id");
    println!("  q | quit");
}

fn print_posts(session: &Session) {
    if session.posts.is_empty() {
        println!("No posts yet - run generate.");
        return;
    }
    for (i, item) in session.posts.iter().enumerate() {
        let state = match item.state {
            DeliveryState::NotSent => " ",
            DeliveryState::Sending => "…",
            DeliveryState::Sent => "✓",
        };
        println!("\n[{}]{} {} {}", i + 1, state, item.icon, item.title);
        println!("{}", item.body);
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn prompt_line(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value)
}
