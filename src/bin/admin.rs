//! CLI administration tool for shortify.
//!
//! Manages links and inspects the database without going through the HTTP
//! admin area.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Delete a link (asks for confirmation unless -y)
//! cargo run --bin admin -- links delete 42
//!
//! # Shorten a URL from the command line
//! cargo run --bin admin -- links shorten https://example.com --host short.ly
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL or SQLite connection string
//! - `REDIS_URL` (optional): cache to invalidate on delete
//! - `CODE_LENGTH`, `MAX_GENERATION_ATTEMPTS` (optional): as for the server

use shortify::application::services::{
    DEFAULT_MAX_ATTEMPTS, LinkAdminService, ShortenService, ShortenSettings,
};
use shortify::domain::repositories::LinkRepository;
use shortify::infrastructure::cache::{CacheService, NullCache, RedisCache};
use shortify::infrastructure::persistence::{
    Backend, PoolSettings, RetryPolicy, connect_link_repository,
};
use shortify::utils::code_generator::{AlphaCodeGenerator, DEFAULT_CODE_LENGTH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing shortify.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List all links
    List,

    /// Permanently delete a link
    Delete {
        /// Link ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Get or create the short URL for a URL
    Shorten {
        /// Original URL
        url: String,

        /// Host placed in the short URL (e.g. "short.ly")
        #[arg(long)]
        host: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and schema
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let repo = connect_link_repository(
        &database_url,
        &PoolSettings::default(),
        RetryPolicy {
            attempts: 1,
            ..RetryPolicy::default()
        },
    )
    .await
    .context("Failed to connect to database")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, repo).await?,
        Commands::Stats => handle_stats(repo).await?,
        Commands::Db { action } => handle_db_action(action, &database_url, repo).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, repo: Arc<dyn LinkRepository>) -> Result<()> {
    match action {
        LinkAction::List => list_links(repo).await,
        LinkAction::Delete { id, yes } => delete_link(repo, id, yes).await,
        LinkAction::Shorten { url, host } => shorten(repo, &url, &host).await,
    }
}

/// Prints all links as a table.
async fn list_links(repo: Arc<dyn LinkRepository>) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<30} {:<20} {}",
        "ID".bright_white().bold(),
        "Short URL".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for link in &links {
        println!(
            "  {:<6} {:<30} {:<20} {}",
            link.id.to_string().bright_black(),
            link.short_url.cyan(),
            link.created_at_display().bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link after confirmation and drops its cache entry.
async fn delete_link(repo: Arc<dyn LinkRepository>, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .into_iter()
        .find(|link| link.id == id)
        .context("Link not found")?;

    println!("  ID:       {}", link.id.to_string().bright_black());
    println!("  Short:    {}", link.short_url.cyan());
    println!("  Original: {}", link.original_url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? It cannot be restored.")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = LinkAdminService::new(repo, connect_cache().await);
    service
        .delete_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

async fn shorten(repo: Arc<dyn LinkRepository>, url: &str, host: &str) -> Result<()> {
    let settings = ShortenSettings {
        code_length: env_or("CODE_LENGTH", DEFAULT_CODE_LENGTH)?,
        max_attempts: env_or("MAX_GENERATION_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
    };
    let generator = AlphaCodeGenerator::new();
    let service = ShortenService::new(repo, Arc::new(generator), settings);

    let short_url = service
        .shorten(url, host)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", short_url.bright_yellow().bold());

    Ok(())
}

/// Displays link count and code space usage.
async fn handle_stats(repo: Arc<dyn LinkRepository>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let code_length: usize = env_or("CODE_LENGTH", DEFAULT_CODE_LENGTH)?;
    let capacity = (AlphaCodeGenerator::new().alphabet_len() as f64).powi(code_length as i32);
    let usage = links_count as f64 / capacity * 100.0;

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Code space:    {} ({} chars)",
        format!("{capacity:.0}").bright_white(),
        code_length
    );
    println!("  Used:          {}", format!("{usage:.4}%").bright_white());

    if usage > 50.0 {
        println!();
        println!(
            "{}",
            "⚠️  Code space is over half full; collisions will become frequent. Raise CODE_LENGTH."
                .yellow()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    database_url: &str,
    repo: Arc<dyn LinkRepository>,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let backend = Backend::from_url(database_url)?;
            repo.count()
                .await
                .map_err(|e| anyhow::anyhow!("Query failed: {}", e))?;

            println!(
                "{}",
                format!("✅ {} connection OK, schema up to date", backend.name())
                    .green()
                    .bold()
            );
        }
    }

    Ok(())
}

/// Redis cache if `REDIS_URL` is set and reachable, otherwise a no-op cache.
async fn connect_cache() -> Arc<dyn CacheService> {
    let Ok(redis_url) = std::env::var("REDIS_URL") else {
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(&redis_url, 3600).await {
        Ok(redis) => Arc::new(redis),
        Err(e) => {
            println!(
                "{}",
                format!("⚠️  Redis unavailable ({e}); cache not invalidated").yellow()
            );
            Arc::new(NullCache::new())
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key}: '{value}'")),
        Err(_) => Ok(default),
    }
}
