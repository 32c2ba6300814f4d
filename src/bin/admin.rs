//! CLI administration tool for foodgram.
//!
//! Loads reference data, shows statistics, and performs database checks
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Import ingredients: [{"name": "Salt", "measurement_unit": "g"}, ...]
//! cargo run --bin admin -- import ingredients data/ingredients.json
//!
//! # Import tags: [{"name": "Breakfast", "slug": "breakfast"}, ...]
//! cargo run --bin admin -- import tags data/tags.json -y
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
//! - `DATABASE_URL` (required): PostgreSQL connection string

use foodgram::application::services::CatalogService;
use foodgram::domain::entities::{NewIngredient, NewTag};
use foodgram::infrastructure::persistence::{PgIngredientRepository, PgTagRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde::Deserialize;
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI tool for managing foodgram.
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
    /// Import reference data from JSON files
    Import {
        #[command(subcommand)]
        target: ImportTarget,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Reference data that can be imported.
#[derive(Subcommand)]
enum ImportTarget {
    /// Import ingredients; existing name+unit pairs are skipped
    Ingredients {
        /// JSON file with `[{"name", "measurement_unit"}]`
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Import tags; tags with a taken name or slug are skipped
    Tags {
        /// JSON file with `[{"name", "slug"}]`
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(Debug, Deserialize)]
struct IngredientRecord {
    name: String,
    measurement_unit: String,
}

#[derive(Debug, Deserialize)]
struct TagRecord {
    name: String,
    slug: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Import { target } => handle_import(target, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches import commands.
async fn handle_import(target: ImportTarget, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let catalog = CatalogService::new(
        Arc::new(PgTagRepository::new(pool.clone())),
        Arc::new(PgIngredientRepository::new(pool)),
    );

    match target {
        ImportTarget::Ingredients { file, yes } => {
            let records: Vec<IngredientRecord> = read_json(&file)?;
            let total = records.len();

            if !confirm_import("ingredients", total, &file, yes)? {
                return Ok(());
            }

            let ingredients = records
                .into_iter()
                .map(|r| NewIngredient {
                    name: r.name.trim().to_string(),
                    measurement_unit: r.measurement_unit.trim().to_string(),
                })
                .collect();

            let inserted = catalog
                .import_ingredients(ingredients)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to import ingredients: {}", e))?;

            print_import_summary(total, inserted);
        }
        ImportTarget::Tags { file, yes } => {
            let records: Vec<TagRecord> = read_json(&file)?;
            let total = records.len();

            if !confirm_import("tags", total, &file, yes)? {
                return Ok(());
            }

            let tags = records
                .into_iter()
                .map(|r| NewTag {
                    name: r.name.trim().to_string(),
                    slug: r.slug.trim().to_string(),
                })
                .collect();

            let inserted = catalog
                .import_tags(tags)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to import tags: {}", e))?;

            print_import_summary(total, inserted);
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Shows what is about to be imported and asks for confirmation unless `--yes`.
fn confirm_import(kind: &str, total: usize, file: &Path, skip_confirm: bool) -> Result<bool> {
    println!("{}", format!("📥 Import {}", kind).bright_blue().bold());
    println!();
    println!("  File:    {}", file.display().to_string().cyan());
    println!("  Records: {}", total.to_string().bright_white().bold());
    println!();

    if total == 0 {
        println!("{}", "⚠️  Nothing to import".yellow());
        return Ok(false);
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Import {} {}?", total, kind))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(false);
        }
    }

    Ok(true)
}

fn print_import_summary(total: usize, inserted: u64) {
    let skipped = (total as u64).saturating_sub(inserted);

    println!();
    println!("{}", "✅ Import finished".green().bold());
    println!("  Added:   {}", inserted.to_string().bright_green().bold());
    println!("  Skipped: {}", skipped.to_string().bright_black());
    println!();
}

/// Displays row counts for the main tables.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let rows = [
        ("Users", "SELECT COUNT(*) FROM users"),
        ("Recipes", "SELECT COUNT(*) FROM recipes"),
        ("Tags", "SELECT COUNT(*) FROM tags"),
        ("Ingredients", "SELECT COUNT(*) FROM ingredients"),
        ("Favorites", "SELECT COUNT(*) FROM favorites"),
        ("Cart entries", "SELECT COUNT(*) FROM shopping_cart"),
        ("Subscriptions", "SELECT COUNT(*) FROM follows"),
        ("Short links", "SELECT COUNT(*) FROM short_links"),
    ];

    for (label, query) in rows {
        let count: i64 = sqlx::query_scalar(query).fetch_one(pool).await?;
        println!(
            "  {:<15}{}",
            format!("{}:", label),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await
                    .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
