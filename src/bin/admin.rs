//! CLI administration tool for snaplink.
//!
//! Manages short links directly against the database, without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL, optionally with a custom alias and expiry
//! cargo run --bin admin -- create https://example.com/a/b --alias docs-1
//!
//! # Show click statistics for a code
//! cargo run --bin admin -- stats docs-1
//!
//! # Delete a link (asks for confirmation unless --yes)
//! cargo run --bin admin -- delete docs-1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `PUBLIC_BASE_URL` (optional): prefix for printed short URLs

use snaplink::AppError;
use snaplink::api::dto::shorten::ShortenRequest;
use snaplink::config::{self, Config};
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::persistence::PgLinkRepository;
use snaplink::server::connect_pool;
use snaplink::state::AppState;
use snaplink::utils::code_generator::{validate_custom_alias, validate_short_code};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Create {
        /// URL to shorten (http or https)
        url: String,

        /// Custom short code
        #[arg(short, long)]
        alias: Option<String>,

        /// Expiry as an ISO 8601 date or timestamp
        #[arg(short, long)]
        expires_at: Option<String>,
    },

    /// Show statistics for a short code
    Stats {
        /// Short code to look up
        code: String,
    },

    /// Permanently delete a short link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let pool = connect_pool(&config, &database_url).await?;

    match cli.command {
        Commands::Create {
            url,
            alias,
            expires_at,
        } => create_link(&config, &pool, url, alias, expires_at).await?,
        Commands::Stats { code } => show_stats(&config, &pool, &code).await?,
        Commands::Delete { code, yes } => delete_link(&config, &pool, &code, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Wires the services to the database the same way the server does.
fn state_for(config: &Config, pool: &PgPool) -> AppState {
    let repository: Arc<dyn LinkRepository> =
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    AppState::new(
        repository,
        config.link_policy,
        config.public_base_url.clone(),
    )
}

/// Creates a short link after applying the same checks as `POST /api/shorten`.
async fn create_link(
    config: &Config,
    pool: &PgPool,
    url: String,
    alias: Option<String>,
    expires_at: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let request = ShortenRequest {
        original_url: url,
        custom_alias: alias,
        expires_at,
    };
    request.validate().map_err(AppError::from)?;
    request.ensure_http_url()?;
    let expires_at = request.parse_expires_at(Utc::now())?;
    if let Some(alias) = request.custom_alias.as_deref() {
        validate_custom_alias(alias, &config.link_policy)?;
    }

    let base_url = config
        .public_base_url
        .clone()
        .unwrap_or_else(|| format!("http://{}", config.listen_addr));

    let state = state_for(config, pool);
    let created = state
        .link_service
        .create_short_link(
            request.original_url,
            request.custom_alias,
            expires_at,
            &base_url,
        )
        .await?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  Short URL: {}", created.short_url.bright_yellow().bold());
    println!("  Code:      {}", created.link.short_code.cyan());
    println!("  Target:    {}", created.link.original_url);
    match created.link.expires_at {
        Some(at) => println!("  Expires:   {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("  Expires:   {}", "never".bright_black()),
    }
    println!();

    Ok(())
}

/// Prints statistics for one short code.
async fn show_stats(config: &Config, pool: &PgPool, code: &str) -> Result<()> {
    validate_short_code(code, &config.link_policy)?;

    let state = state_for(config, pool);
    let stats = state.stats_service.get_stats(code).await?;

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();
    println!("  Code:          {}", stats.short_code.cyan());
    println!("  Target:        {}", stats.original_url);
    println!(
        "  Custom alias:  {}",
        if stats.is_custom_alias { "yes" } else { "no" }
    );
    println!(
        "  Clicks:        {}",
        stats.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:       {}",
        stats.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    match stats.last_accessed_at {
        Some(at) => println!("  Last access:   {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("  Last access:   {}", "never".bright_black()),
    }
    match stats.expires_at {
        Some(at) if stats.is_expired => println!(
            "  Expires:       {} {}",
            at.format("%Y-%m-%d %H:%M UTC"),
            "(EXPIRED)".red()
        ),
        Some(at) => println!("  Expires:       {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("  Expires:       {}", "never".bright_black()),
    }
    println!();

    Ok(())
}

/// Deletes a short link with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Deletion is permanent; the code can be reused right away
async fn delete_link(config: &Config, pool: &PgPool, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();

    validate_short_code(code, &config.link_policy)?;

    let state = state_for(config, pool);
    let stats = state.stats_service.get_stats(code).await?;

    println!("  Code:   {}", stats.short_code.cyan());
    println!("  Target: {}", stats.original_url);
    println!("  Clicks: {}", stats.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    state.link_service.delete_link(code).await?;

    println!();
    println!("{}", "✅ Short link deleted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
                .fetch_one(pool)
                .await
                .context("short_links table missing, has the server run its migrations?")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links stored: {}", links.to_string().bright_white());
        }
    }

    Ok(())
}
