// ABOUTME: Formula coefficient and scoring configuration for BMR calculations
// ABOUTME: Literature defaults for Mifflin-St Jeor, Harris-Benedict, Katch-McArdle, and ensemble weighting
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! BMR calculation configuration
//!
//! Coefficients are configuration rather than inline literals so alternative
//! formula revisions can be swapped in without touching the calculators.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. <https://doi.org/10.1093/ajcn/51.2.241>
//! - Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation
//!   reevaluated. *American Journal of Clinical Nutrition*, 40(1), 168-182.
//! - Katch, F.I., & `McArdle`, W.D. (1996). Exercise Physiology, 4th ed.

use serde::{Deserialize, Serialize};

/// Top-level intelligence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// BMR formula coefficients
    pub bmr: BmrConfig,
    /// Confidence scoring parameters
    pub confidence: ConfidenceConfig,
    /// Adaptive ensemble weighting parameters
    pub ensemble: EnsembleWeightsConfig,
}

/// BMR formula coefficient configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,

    /// Harris-Benedict (revised) male base constant
    pub hb_male_base: f64,
    /// Harris-Benedict male weight coefficient
    pub hb_male_weight_coef: f64,
    /// Harris-Benedict male height coefficient
    pub hb_male_height_coef: f64,
    /// Harris-Benedict male age coefficient
    pub hb_male_age_coef: f64,
    /// Harris-Benedict (revised) female base constant
    pub hb_female_base: f64,
    /// Harris-Benedict female weight coefficient
    pub hb_female_weight_coef: f64,
    /// Harris-Benedict female height coefficient
    pub hb_female_height_coef: f64,
    /// Harris-Benedict female age coefficient
    pub hb_female_age_coef: f64,

    /// Katch-McArdle base constant (370)
    pub km_base: f64,
    /// Katch-McArdle lean body mass coefficient (21.6)
    pub km_lbm_coef: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,

            hb_male_base: 88.362,
            hb_male_weight_coef: 13.397,
            hb_male_height_coef: 4.799,
            hb_male_age_coef: -5.677,
            hb_female_base: 447.593,
            hb_female_weight_coef: 9.247,
            hb_female_height_coef: 3.098,
            hb_female_age_coef: -4.330,

            km_base: 370.0,
            km_lbm_coef: 21.6,
        }
    }
}

/// Confidence scoring configuration
///
/// Base confidences reflect published method accuracy for the general
/// population; penalties apply when the subject falls outside the populations
/// the formulas were validated on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Base confidence for Mifflin-St Jeor (0.95)
    pub mifflin_base: f64,
    /// Base confidence for Harris-Benedict (0.90)
    pub harris_base: f64,
    /// Base confidence for Katch-McArdle (0.93)
    pub katch_base: f64,
    /// Base confidence for the adaptive ensemble (0.97)
    pub ensemble_base: f64,
    /// Lower validated age bound (18)
    pub age_validated_min: u32,
    /// Upper validated age bound (80)
    pub age_validated_max: u32,
    /// Multiplier applied outside the validated age range (0.90)
    pub age_penalty: f64,
    /// Lower BMI bound before penalty applies (18.5)
    pub bmi_low: f64,
    /// Upper BMI bound before penalty applies (35.0)
    pub bmi_high: f64,
    /// Multiplier applied outside the BMI bounds (0.92)
    pub bmi_penalty: f64,
    /// Multiplier applied when Katch-McArdle has a measured body fat (1.05)
    pub body_fat_bonus: f64,
    /// Upper cap on any confidence score (0.99)
    pub cap: f64,
    /// Additive bonus the ensemble method receives over its base (0.05)
    pub ensemble_bonus: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            mifflin_base: 0.95,
            harris_base: 0.90,
            katch_base: 0.93,
            ensemble_base: 0.97,
            age_validated_min: 18,
            age_validated_max: 80,
            age_penalty: 0.90,
            bmi_low: 18.5,
            bmi_high: 35.0,
            bmi_penalty: 0.92,
            body_fat_bonus: 1.05,
            cap: 0.99,
            ensemble_bonus: 0.05,
        }
    }
}

/// Adaptive ensemble weighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleWeightsConfig {
    /// Default Mifflin-St Jeor weight (0.6)
    pub mifflin_base: f64,
    /// Default Harris-Benedict weight (0.4)
    pub harris_base: f64,
    /// Mifflin weight for subjects with normal BMI (0.7)
    pub normal_bmi_mifflin: f64,
    /// Harris weight for subjects with normal BMI (0.3)
    pub normal_bmi_harris: f64,
    /// Mifflin weight for BMI above 30 (0.55)
    pub high_bmi_mifflin: f64,
    /// Harris weight for BMI above 30 (0.45)
    pub high_bmi_harris: f64,
    /// Weight shifted from Mifflin to Harris above age 60 (0.05)
    pub senior_age_shift: f64,
    /// Katch-McArdle blend weight when body fat is known (0.3)
    pub katch_blend: f64,
}

impl Default for EnsembleWeightsConfig {
    fn default() -> Self {
        Self {
            mifflin_base: 0.6,
            harris_base: 0.4,
            normal_bmi_mifflin: 0.7,
            normal_bmi_harris: 0.3,
            high_bmi_mifflin: 0.55,
            high_bmi_harris: 0.45,
            senior_age_shift: 0.05,
            katch_blend: 0.3,
        }
    }
}
