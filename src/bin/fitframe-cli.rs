// ABOUTME: FitFrame CLI - command-line tool for profiles, estimation, and history
// ABOUTME: Composes config, database, collaborator, and estimator into one pipeline
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! FitFrame engine management CLI
//!
//! Usage:
//! ```bash
//! # Save a subject profile (latest write wins)
//! fitframe-cli profile set --user <uuid> --weight-kg 75 --height-cm 180 --age 30 --gender male
//!
//! # Show the stored profile
//! fitframe-cli profile show --user <uuid>
//!
//! # Estimate BMR and persist the result
//! fitframe-cli estimate --user <uuid> --method harris_benedict --record
//!
//! # Recent estimates, newest first
//! fitframe-cli history --user <uuid> --limit 5
//!
//! # Collaborator health probe
//! fitframe-cli health
//! ```

#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use fitframe::{
    config::environment::ServerConfig,
    config::intelligence::IntelligenceConfig,
    database::Database,
    errors::{AppError, AppResult},
    external::bridge::{collaborator_from_config, ComputeCollaborator},
    intelligence::{estimator::BmrEstimator, profile_resolver::resolve_profile},
    logging,
    models::{BmrMethod, Gender, Profile},
};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "fitframe-cli",
    about = "FitFrame engine management CLI",
    long_about = "Command-line tool for managing subject profiles, running BMR estimations, and browsing the estimate history."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Profile management commands
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Estimate BMR for a subject
    Estimate {
        /// Subject identifier
        #[arg(long)]
        user: Uuid,

        /// Calculation method (defaults to mifflin_st_jeor)
        #[arg(long)]
        method: Option<String>,

        /// Persist the result as a history record
        #[arg(long)]
        record: bool,
    },

    /// Show recent estimates, newest first
    History {
        /// Subject identifier
        #[arg(long)]
        user: Uuid,

        /// Maximum number of records (defaults to 10)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Probe the computation collaborator
    Health,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Create or update a subject profile (latest write wins)
    Set {
        /// Subject identifier
        #[arg(long)]
        user: Uuid,

        /// Body mass in kilograms
        #[arg(long)]
        weight_kg: Option<f64>,

        /// Stature in centimeters
        #[arg(long)]
        height_cm: Option<f64>,

        /// Age in years
        #[arg(long)]
        age: Option<u16>,

        /// Biological sex category (male or female)
        #[arg(long)]
        gender: Option<String>,

        /// Body fat percentage
        #[arg(long)]
        body_fat: Option<f64>,
    },

    /// Show the stored profile
    Show {
        /// Subject identifier
        #[arg(long)]
        user: Uuid,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env().map_err(|e| AppError::config(e.to_string()))?;
    if cli.verbose {
        config.logging.level = "debug".into();
    }
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    logging::init_logging(&config.logging).map_err(|e| AppError::config(e.to_string()))?;

    match cli.command {
        Command::Profile { action } => handle_profile(&config, action).await,
        Command::Estimate {
            user,
            method,
            record,
        } => handle_estimate(&config, user, method.as_deref(), record).await,
        Command::History { user, limit } => handle_history(&config, user, limit).await,
        Command::Health => handle_health(&config).await,
    }
}

async fn handle_profile(config: &ServerConfig, action: ProfileCommand) -> AppResult<()> {
    let database = Database::new(&config.database_url).await?;

    match action {
        ProfileCommand::Set {
            user,
            weight_kg,
            height_cm,
            age,
            gender,
            body_fat,
        } => {
            let mut profile = database
                .get_profile(user)
                .await?
                .unwrap_or_else(|| Profile::new(user));

            if let Some(weight) = weight_kg {
                profile.weight_kg = Some(weight);
            }
            if let Some(height) = height_cm {
                profile.height_cm = Some(height);
            }
            if let Some(age) = age {
                profile.age = Some(age);
            }
            if let Some(gender) = gender {
                profile.gender = Some(Gender::from_str_or_default(&gender));
            }
            if let Some(body_fat) = body_fat {
                profile.body_fat_percentage = Some(body_fat);
            }
            profile.updated_at = chrono::Utc::now();

            database.upsert_profile(&profile).await?;
            info!(user_id = %user, "profile saved");
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        ProfileCommand::Show { user } => match database.get_profile(user).await? {
            Some(profile) => {
                println!("{}", serde_json::to_string_pretty(&profile)?);
                Ok(())
            }
            None => Err(AppError::not_found(format!("profile for {user}"))),
        },
    }
}

async fn handle_estimate(
    config: &ServerConfig,
    user: Uuid,
    method: Option<&str>,
    record: bool,
) -> AppResult<()> {
    let database = Database::new(&config.database_url).await?;
    let profile = database.get_profile(user).await?;
    let inputs = resolve_profile(profile.as_ref());

    let collaborator = collaborator_from_config(&config.bridge, IntelligenceConfig::default());
    let estimator = BmrEstimator::new(collaborator, IntelligenceConfig::default());

    let method = method.map(BmrMethod::from_str_or_default);
    let result = estimator.estimate(&inputs, method).await;

    if record {
        let saved = database.record_estimate(user, &result).await?;
        info!(estimate_id = %saved.id, "estimate recorded");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn handle_history(config: &ServerConfig, user: Uuid, limit: Option<u32>) -> AppResult<()> {
    let database = Database::new(&config.database_url).await?;
    let history = database.bmr_history(user, limit).await?;
    println!("{}", serde_json::to_string_pretty(&history)?);
    Ok(())
}

async fn handle_health(config: &ServerConfig) -> AppResult<()> {
    let collaborator = collaborator_from_config(&config.bridge, IntelligenceConfig::default());
    let status = collaborator.health_check().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
