// ABOUTME: Database management for profile and estimate history storage
// ABOUTME: SQLite connection pool, migrations, and the repository impls
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! # Database Management
//!
//! Persistence for subject profiles (latest write wins) and the append-only
//! BMR estimate history. Storage failures propagate as
//! [`AppError::database`](crate::errors::AppError) - unlike estimation,
//! persistence is allowed to fail.

mod estimates;
mod profiles;

use crate::errors::{AppError, AppResult};
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for profile and estimate storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_profiles().await?;
        self.migrate_estimates().await?;
        Ok(())
    }
}
