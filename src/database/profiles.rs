// ABOUTME: Profile persistence - one row per subject, latest write wins
// ABOUTME: Created on first save, updated in place thereafter
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Gender, Profile};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the profiles table
    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                weight_kg REAL,
                height_cm REAL,
                age INTEGER,
                gender TEXT CHECK (gender IN ('male', 'female')),
                body_fat_percentage REAL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("failed to create profiles table: {e}")))?;

        Ok(())
    }

    /// Create or update a subject profile in place
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert_profile(&self, profile: &Profile) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO profiles (user_id, weight_kg, height_cm, age, gender, body_fat_percentage, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(user_id) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                age = excluded.age,
                gender = excluded.gender,
                body_fat_percentage = excluded.body_fat_percentage,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(profile.age.map(i64::from))
        .bind(profile.gender.map(|g| g.as_str()))
        .bind(profile.body_fat_percentage)
        .bind(profile.created_at.to_rfc3339())
        .bind(profile.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("failed to upsert profile: {e}")))?;

        Ok(())
    }

    /// Get a subject profile
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a stored row
    /// cannot be decoded.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let row = sqlx::query(
            r"
            SELECT user_id, weight_kg, height_cm, age, gender, body_fat_percentage, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("failed to get profile: {e}")))?;

        row.map(|r| profile_from_row(&r)).transpose()
    }
}

fn profile_from_row(row: &SqliteRow) -> AppResult<Profile> {
    let user_id: String = row.get("user_id");
    let gender: Option<String> = row.get("gender");
    let age: Option<i64> = row.get("age");

    Ok(Profile {
        user_id: parse_uuid(&user_id)?,
        weight_kg: row.get("weight_kg"),
        height_cm: row.get("height_cm"),
        age: age.and_then(|a| u16::try_from(a).ok()),
        gender: gender.map(|g| Gender::from_str_or_default(&g)),
        body_fat_percentage: row.get("body_fat_percentage"),
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}

pub(super) fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::database(format!("invalid stored uuid: {e}")))
}

pub(super) fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("invalid stored timestamp: {e}")))
}
