//! Textline snapshot inspector
//!
//! Loads a JSON dump of the provider tables into the in-memory store and
//! runs the messaging core over it: conversation list, grouped thread
//! view, contact lookup, and a simulated send through the loopback
//! transport. Useful for eyeballing exported message dumps and for
//! exercising the aggregation pipeline outside a device.

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use textline_core::{
    group_messages, BubblePosition, ContactResolver, InboxState, LoopbackTransport,
    MemoryStore, MessageRepository, StoreSnapshot,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "textline", about = "Inspect a Textline provider snapshot", version)]
struct Cli {
    /// Path to a JSON provider snapshot
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List conversation summaries, newest first
    Conversations,
    /// Show one thread as grouped bubbles
    Thread {
        /// Thread id
        #[arg(long)]
        id: i64,
    },
    /// Resolve a phone number against the snapshot's contacts
    Contact {
        /// Phone number to look up
        number: String,
    },
    /// Simulate sending a text and show the resulting thread
    Send {
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Message body
        #[arg(long)]
        body: String,
    },
}

fn format_time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn load_store(path: Option<&PathBuf>) -> Result<Arc<MemoryStore>> {
    let snapshot = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            serde_json::from_str::<StoreSnapshot>(&raw)
                .with_context(|| format!("Failed to parse snapshot {}", path.display()))?
        }
        None => StoreSnapshot::default(),
    };
    debug!(
        "Snapshot loaded: {} sms, {} mms, {} contacts",
        snapshot.sms.len(),
        snapshot.mms.len(),
        snapshot.contacts.len()
    );
    Ok(Arc::new(MemoryStore::from_snapshot(snapshot)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let store = load_store(cli.snapshot.as_ref())?;
    let (transport, mut reports) = LoopbackTransport::new();
    let transport = Arc::new(transport);
    let resolver = Arc::new(ContactResolver::new(store.clone()));
    let repo = Arc::new(MessageRepository::new(
        store.clone(),
        resolver.clone(),
        transport.clone(),
        transport,
    ));

    match cli.command {
        Command::Conversations => {
            let state = InboxState::new(repo);
            state.refresh_conversations().await;
            let conversations = state.watch_conversations().borrow().clone();
            if conversations.is_empty() {
                println!("No conversations.");
            }
            for c in conversations {
                let who = c.contact_name.unwrap_or_else(|| c.address.clone());
                let unread = if c.unread_count > 0 {
                    format!(" [{} unread]", c.unread_count)
                } else {
                    String::new()
                };
                println!(
                    "#{:<4} {:<24} {}  {}{}",
                    c.thread_id,
                    who,
                    format_time(c.last_message_date),
                    c.last_message,
                    unread
                );
            }
        }
        Command::Thread { id } => {
            let messages = repo.get_messages_for_thread(id).await?;
            if messages.is_empty() {
                println!("Thread {id} is empty.");
            }
            for g in group_messages(&messages) {
                let side = if g.message.box_type.is_outgoing() { ">>" } else { "<<" };
                let marker = match g.position {
                    BubblePosition::Start => "┌",
                    BubblePosition::Middle => "│",
                    BubblePosition::End => "└",
                    BubblePosition::Single => "─",
                };
                let mut line = format!("{side} {marker} {}", g.message.body);
                for a in &g.message.attachments {
                    line.push_str(&format!(
                        " [{} {}]",
                        a.content_type,
                        a.file_name.as_deref().unwrap_or("unnamed")
                    ));
                }
                if g.show_timestamp {
                    line.push_str(&format!("   ({})", format_time(g.message.date)));
                }
                println!("{line}");
            }
        }
        Command::Contact { number } => {
            let info = resolver.resolve(&number).await?;
            match info.name {
                Some(name) => {
                    println!("{name}");
                    if let Some(uri) = info.lookup_uri {
                        println!("  lookup: {uri}");
                    }
                    if let Some(photo) = info.photo_uri {
                        println!("  photo:  {photo}");
                    }
                }
                None => println!("No contact for {number}."),
            }
        }
        Command::Send { to, body } => {
            let locator = repo.send_message(&to, &body).await?;
            println!("Inserted {locator}");
            if let Some(report) = reports.recv().await {
                repo.apply_delivery_report(report).await?;
            }
            let thread_id = repo.thread_id_for_address(&to).await?;
            for message in repo.get_messages_for_thread(thread_id).await? {
                println!(
                    "{:?} {}  {}",
                    message.box_type,
                    format_time(message.date),
                    message.body
                );
            }
        }
    }

    Ok(())
}
