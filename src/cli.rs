//! CLI interface for mailrank

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::store::{WeightStore, GLOBAL_USER};
use crate::trainer::OnlineTrainer;
use crate::types::{EmailRecord, RankLabels};

#[derive(Parser)]
#[command(name = "mailrank")]
#[command(about = "Online email priority scoring with per-user weight tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Override the configured model directory
    #[arg(long, global = true)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap empty weight tables for a user
    Init {
        /// User identifier (mailbox owner)
        user: String,
    },
    /// Score one normalized email and update the recipient's tables
    Train {
        /// Path to the normalized email record as JSON, or `-` for stdin
        email: PathBuf,
        /// Externally-computed rank
        #[arg(long)]
        rank: f64,
        /// Externally-computed priority label
        #[arg(long)]
        priority: String,
        /// Externally-computed intent label
        #[arg(long)]
        intent: String,
    },
    /// Print a user's rank ledger
    Ledger {
        user: String,
    },
    /// Print a user's sender weights
    Weights {
        user: String,
    },
}

/// Parse arguments and dispatch
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let model_dir = cli.model_dir.unwrap_or_else(|| config.model_dir.clone());
    let store = WeightStore::open(model_dir);

    match cli.command {
        Commands::Init { user } => init(&store, &user),
        Commands::Train {
            email,
            rank,
            priority,
            intent,
        } => train(store, &config, &email, RankLabels::new(rank, priority, intent)),
        Commands::Ledger { user } => show_ledger(&store, &user),
        Commands::Weights { user } => show_weights(&store, &user),
    }
}

fn init(store: &WeightStore, user: &str) -> Result<()> {
    store
        .bootstrap(user)
        .with_context(|| format!("Failed to bootstrap tables for '{}'", user))?;
    // Every train call appends to the global ledger, so make sure that
    // scope exists as well.
    if user != GLOBAL_USER && !store.exists(GLOBAL_USER) {
        store
            .bootstrap(GLOBAL_USER)
            .context("Failed to bootstrap the global scope")?;
    }
    println!("Initialized weight tables for '{}'", user);
    Ok(())
}

fn train(store: WeightStore, config: &Config, email_path: &PathBuf, labels: RankLabels) -> Result<()> {
    let contents = if email_path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read email record from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(email_path)
            .with_context(|| format!("Failed to read {}", email_path.display()))?
    };
    let email: EmailRecord =
        serde_json::from_str(&contents).context("Failed to parse normalized email record")?;

    let trainer = OnlineTrainer::new(store, config.vectorizer());
    trainer
        .train(&email, &labels)
        .with_context(|| format!("Training failed for user '{}'", email.user()))?;

    println!(
        "Scored email from {} for user '{}' (rank {})",
        email.from,
        email.user(),
        labels.rank
    );
    Ok(())
}

fn show_ledger(store: &WeightStore, user: &str) -> Result<()> {
    let ledger = store.load_rank_log(user)?;
    if ledger.is_empty() {
        println!("No ranked emails for '{}'", user);
        return Ok(());
    }
    println!("{:<25} {:<28} {:>7} {:<10} {}", "date", "sender", "rank", "priority", "subject");
    for entry in ledger.rows() {
        println!(
            "{:<25} {:<28} {:>7.3} {:<10} {}",
            entry.date.format("%Y-%m-%d %H:%M:%S"),
            entry.sender,
            entry.rank,
            entry.priority,
            entry.subject
        );
    }
    Ok(())
}

fn show_weights(store: &WeightStore, user: &str) -> Result<()> {
    let tables = store.load(user)?;
    if tables.senders.is_empty() {
        println!("No sender weights for '{}'", user);
        return Ok(());
    }
    println!("{:<40} {:>10}", "sender", "weight");
    for row in tables.senders.rows() {
        println!("{:<40} {:>10.4}", row.sender, row.weight);
    }
    Ok(())
}
