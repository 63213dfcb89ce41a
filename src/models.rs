// ABOUTME: Core data model for profiles, resolved inputs, methods, and estimate records
// ABOUTME: Wire shapes match the compute bridge protocol and the persisted history schema
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! Core data structures for the FitFrame engine

use crate::constants::profile_defaults;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Biological sex category for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male (higher BMR constant)
    Male,
    /// Female (lower BMR constant)
    Female,
}

impl Gender {
    /// Wire name of this gender
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parse a gender string, defaulting to male for unknown values
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        if s.eq_ignore_ascii_case("female") {
            Self::Female
        } else {
            Self::Male
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored subject profile
///
/// Not versioned; latest write wins per subject. Created on first save,
/// updated in place thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Subject this profile belongs to
    pub user_id: Uuid,
    /// Body mass in kilograms
    pub weight_kg: Option<f64>,
    /// Stature in centimeters
    pub height_cm: Option<f64>,
    /// Age in years
    pub age: Option<u16>,
    /// Biological sex category
    pub gender: Option<Gender>,
    /// Body fat percentage, if measured (used by Katch-McArdle)
    pub body_fat_percentage: Option<f64>,
    /// When the profile was first saved
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create an empty profile for a subject
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            weight_kg: None,
            height_cm: None,
            age: None,
            gender: None,
            body_fat_percentage: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fully populated physiological input tuple
///
/// Produced by the profile resolver; every required field carries either the
/// stored value or the fixed default. Values are passed through without range
/// correction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedProfile {
    /// Body mass in kilograms
    pub weight_kg: f64,
    /// Stature in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: u32,
    /// Biological sex category
    pub gender: Gender,
    /// Body fat percentage, if measured (never defaulted)
    pub body_fat_percentage: Option<f64>,
}

impl ResolvedProfile {
    /// Body mass index from the resolved mass and stature
    #[must_use]
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

impl Default for ResolvedProfile {
    fn default() -> Self {
        Self {
            weight_kg: profile_defaults::WEIGHT_KG,
            height_cm: profile_defaults::HEIGHT_CM,
            age: u32::from(profile_defaults::AGE_YEARS),
            gender: Gender::Male,
            body_fat_percentage: None,
        }
    }
}

/// Supported BMR calculation methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmrMethod {
    /// Mifflin-St Jeor equation (1990), most accurate for the general population
    #[serde(rename = "mifflin_st_jeor")]
    MifflinStJeor,
    /// Harris-Benedict equation (revised)
    #[serde(rename = "harris_benedict")]
    HarrisBenedict,
    /// Katch-McArdle formula, requires or estimates body fat percentage
    #[serde(rename = "katch_mcardle")]
    KatchMcArdle,
    /// Weighted blend of the other methods
    #[serde(rename = "adaptive_ensemble")]
    AdaptiveEnsemble,
}

impl BmrMethod {
    /// Wire name of this method
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MifflinStJeor => "mifflin_st_jeor",
            Self::HarrisBenedict => "harris_benedict",
            Self::KatchMcArdle => "katch_mcardle",
            Self::AdaptiveEnsemble => "adaptive_ensemble",
        }
    }

    /// Parse a method name; unknown names resolve to Mifflin-St Jeor
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "harris_benedict" => Self::HarrisBenedict,
            "katch_mcardle" => Self::KatchMcArdle,
            "adaptive_ensemble" => Self::AdaptiveEnsemble,
            _ => Self::MifflinStJeor,
        }
    }
}

impl Default for BmrMethod {
    fn default() -> Self {
        Self::MifflinStJeor
    }
}

impl fmt::Display for BmrMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized BMR estimation result
///
/// The fixed shape every estimation returns regardless of which path produced
/// it. `method` is a free string because fallback results carry a tag that is
/// not a [`BmrMethod`] variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrResult {
    /// Estimated basal metabolic rate in kcal/day
    pub bmr: f64,
    /// Method that produced the estimate
    pub method: String,
    /// Confidence score in [0, 1]
    pub confidence: f64,
    /// Breakdown of contributing terms
    pub components: serde_json::Value,
}

/// Immutable history record of one BMR estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrEstimate {
    /// Record identifier
    pub id: Uuid,
    /// Subject the estimate belongs to
    pub user_id: Uuid,
    /// Method that produced the estimate
    pub method: String,
    /// Estimated basal metabolic rate in kcal/day
    pub bmr: f64,
    /// Confidence score in [0, 1]
    pub confidence: Option<f64>,
    /// Breakdown of contributing terms
    pub components: serde_json::Value,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_round_trip() {
        for method in [
            BmrMethod::MifflinStJeor,
            BmrMethod::HarrisBenedict,
            BmrMethod::KatchMcArdle,
            BmrMethod::AdaptiveEnsemble,
        ] {
            assert_eq!(BmrMethod::from_str_or_default(method.as_str()), method);
        }
    }

    #[test]
    fn unknown_method_defaults_to_mifflin() {
        assert_eq!(
            BmrMethod::from_str_or_default("quantum_metabolics"),
            BmrMethod::MifflinStJeor
        );
    }

    #[test]
    fn gender_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Gender::Female).unwrap(),
            "\"female\""
        );
        assert_eq!(Gender::from_str_or_default("FEMALE"), Gender::Female);
        assert_eq!(Gender::from_str_or_default("other"), Gender::Male);
    }

    #[test]
    fn resolved_profile_bmi() {
        let profile = ResolvedProfile::default();
        assert!((profile.bmi() - 24.22).abs() < 0.01);
    }
}
