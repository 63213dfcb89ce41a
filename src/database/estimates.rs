// ABOUTME: BMR estimate history - append-only rows, newest-first retrieval
// ABOUTME: No uniqueness constraint; repeated calculations for the same subject accumulate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

use super::profiles::{parse_timestamp, parse_uuid};
use super::Database;
use crate::constants::estimates;
use crate::errors::{AppError, AppResult};
use crate::models::{BmrEstimate, BmrResult};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the estimate history table and index
    pub(super) async fn migrate_estimates(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS bmr_estimates (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                method TEXT NOT NULL,
                bmr REAL NOT NULL,
                confidence REAL,
                components TEXT NOT NULL DEFAULT '{}',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("failed to create bmr_estimates table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_bmr_estimates_user_created
             ON bmr_estimates(user_id, created_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("failed to create bmr_estimates index: {e}")))?;

        Ok(())
    }

    /// Append an immutable estimate record for a subject
    ///
    /// There is no uniqueness constraint: recording the same calculation
    /// twice produces two distinct rows.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails.
    pub async fn record_estimate(
        &self,
        user_id: Uuid,
        result: &BmrResult,
    ) -> AppResult<BmrEstimate> {
        let estimate = BmrEstimate {
            id: Uuid::new_v4(),
            user_id,
            method: result.method.clone(),
            bmr: result.bmr,
            confidence: Some(result.confidence),
            components: result.components.clone(),
            created_at: Utc::now(),
        };
        let components_json = serde_json::to_string(&estimate.components)?;

        sqlx::query(
            r"
            INSERT INTO bmr_estimates (id, user_id, method, bmr, confidence, components, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(estimate.id.to_string())
        .bind(user_id.to_string())
        .bind(&estimate.method)
        .bind(estimate.bmr)
        .bind(estimate.confidence)
        .bind(&components_json)
        .bind(estimate.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("failed to record estimate: {e}")))?;

        Ok(estimate)
    }

    /// Most recent estimates for a subject, newest first
    ///
    /// `limit` defaults to 10.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a stored row
    /// cannot be decoded.
    pub async fn bmr_history(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
    ) -> AppResult<Vec<BmrEstimate>> {
        let limit = i64::from(limit.unwrap_or(estimates::DEFAULT_HISTORY_LIMIT));

        let rows = sqlx::query(
            r"
            SELECT id, user_id, method, bmr, confidence, components, created_at
            FROM bmr_estimates
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("failed to get estimate history: {e}")))?;

        rows.iter().map(estimate_from_row).collect()
    }
}

fn estimate_from_row(row: &SqliteRow) -> AppResult<BmrEstimate> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let components_json: String = row.get("components");

    Ok(BmrEstimate {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        method: row.get("method"),
        bmr: row.get("bmr"),
        confidence: row.get("confidence"),
        components: serde_json::from_str(&components_json)?,
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
    })
}
