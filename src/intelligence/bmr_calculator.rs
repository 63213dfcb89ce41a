// ABOUTME: In-process BMR formula implementations with confidence scoring
// ABOUTME: Mifflin-St Jeor, Harris-Benedict, Katch-McArdle, and an adaptive ensemble
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! BMR Calculator Module
//!
//! Evidence-based basal metabolic rate calculations. Each method returns the
//! estimated rate, a confidence score, and a breakdown of contributing terms.
//!
//! Inputs are used as given: the resolver deliberately passes out-of-range
//! values through, so no range validation or minimum clamp happens here.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. <https://doi.org/10.1093/ajcn/51.2.241>
//! - Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation
//!   reevaluated. *American Journal of Clinical Nutrition*, 40(1), 168-182.
//! - Katch, F.I., & `McArdle`, W.D. (1996). Exercise Physiology, 4th ed.

use crate::config::intelligence::{ConfidenceConfig, EnsembleWeightsConfig, IntelligenceConfig};
use crate::models::{BmrMethod, BmrResult, Gender, ResolvedProfile};
use serde_json::json;
use tracing::debug;

/// Calculate BMR with the given method
#[must_use]
pub fn calculate(
    profile: &ResolvedProfile,
    method: BmrMethod,
    config: &IntelligenceConfig,
) -> BmrResult {
    match method {
        BmrMethod::MifflinStJeor => mifflin_st_jeor(profile, config),
        BmrMethod::HarrisBenedict => harris_benedict(profile, config),
        BmrMethod::KatchMcArdle => katch_mcardle(profile, config),
        BmrMethod::AdaptiveEnsemble => adaptive_ensemble(profile, config),
    }
}

/// Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_constant`
/// - Men: +5
/// - Women: -161
#[must_use]
pub fn mifflin_st_jeor(profile: &ResolvedProfile, config: &IntelligenceConfig) -> BmrResult {
    let weight_component = config.bmr.msj_weight_coef * profile.weight_kg;
    let height_component = config.bmr.msj_height_coef * profile.height_cm;
    let age_component = config.bmr.msj_age_coef * f64::from(profile.age);
    let base = weight_component + height_component + age_component;
    let adjustment = gender_adjustment(profile.gender, config);

    BmrResult {
        bmr: round_dp(base + adjustment, 1),
        method: BmrMethod::MifflinStJeor.as_str().to_owned(),
        confidence: confidence_for(profile, BmrMethod::MifflinStJeor, &config.confidence),
        components: json!({
            "base": round_dp(base, 1),
            "gender_adjustment": adjustment,
            "weight_component": round_dp(weight_component, 1),
            "height_component": round_dp(height_component, 1),
            "age_component": round_dp(age_component, 1),
        }),
    }
}

/// Harris-Benedict equation (revised)
///
/// Men: BMR = 88.362 + (13.397 x weight) + (4.799 x height) - (5.677 x age)
/// Women: BMR = 447.593 + (9.247 x weight) + (3.098 x height) - (4.330 x age)
#[must_use]
pub fn harris_benedict(profile: &ResolvedProfile, config: &IntelligenceConfig) -> BmrResult {
    let (base_constant, weight_coef, height_coef, age_coef) = match profile.gender {
        Gender::Male => (
            config.bmr.hb_male_base,
            config.bmr.hb_male_weight_coef,
            config.bmr.hb_male_height_coef,
            config.bmr.hb_male_age_coef,
        ),
        Gender::Female => (
            config.bmr.hb_female_base,
            config.bmr.hb_female_weight_coef,
            config.bmr.hb_female_height_coef,
            config.bmr.hb_female_age_coef,
        ),
    };

    let weight_component = weight_coef * profile.weight_kg;
    let height_component = height_coef * profile.height_cm;
    let age_component = age_coef * f64::from(profile.age);
    let bmr = base_constant + weight_component + height_component + age_component;

    BmrResult {
        bmr: round_dp(bmr, 1),
        method: BmrMethod::HarrisBenedict.as_str().to_owned(),
        confidence: confidence_for(profile, BmrMethod::HarrisBenedict, &config.confidence),
        components: json!({
            "base_constant": base_constant,
            "weight_component": round_dp(weight_component, 1),
            "height_component": round_dp(height_component, 1),
            "age_component": round_dp(age_component, 1),
        }),
    }
}

/// Katch-McArdle formula
///
/// BMR = 370 + (21.6 x LBM), where LBM = weight x (1 - `body_fat` / 100).
/// Estimates body fat from BMI and age when the profile has no measurement.
#[must_use]
pub fn katch_mcardle(profile: &ResolvedProfile, config: &IntelligenceConfig) -> BmrResult {
    let body_fat = profile.body_fat_percentage.unwrap_or_else(|| {
        let estimated = estimate_body_fat(profile);
        debug!(estimated, "body fat not provided, estimating from BMI");
        estimated
    });

    let lean_body_mass = profile.weight_kg * (1.0 - body_fat / 100.0);
    let lbm_component = config.bmr.km_lbm_coef * lean_body_mass;
    let bmr = config.bmr.km_base + lbm_component;

    BmrResult {
        bmr: round_dp(bmr, 1),
        method: BmrMethod::KatchMcArdle.as_str().to_owned(),
        confidence: confidence_for(profile, BmrMethod::KatchMcArdle, &config.confidence),
        components: json!({
            "base_constant": config.bmr.km_base,
            "lean_body_mass": round_dp(lean_body_mass, 1),
            "lbm_component": round_dp(lbm_component, 1),
            "body_fat_used": round_dp(body_fat, 1),
        }),
    }
}

/// Adaptive ensemble combining the individual equations with BMI- and
/// age-dependent weights
///
/// Katch-McArdle joins the blend only when a measured body fat is available.
#[must_use]
pub fn adaptive_ensemble(profile: &ResolvedProfile, config: &IntelligenceConfig) -> BmrResult {
    let mifflin = mifflin_st_jeor(profile, config);
    let harris = harris_benedict(profile, config);
    let (mifflin_weight, harris_weight) = ensemble_weights(profile, &config.ensemble);
    let blended = mifflin.bmr * mifflin_weight + harris.bmr * harris_weight;

    let (bmr, weights) = if profile.body_fat_percentage.is_some() {
        let katch = katch_mcardle(profile, config);
        let katch_weight = config.ensemble.katch_blend;
        (
            blended * (1.0 - katch_weight) + katch.bmr * katch_weight,
            json!({
                "mifflin": round_dp(mifflin_weight * (1.0 - katch_weight), 2),
                "harris": round_dp(harris_weight * (1.0 - katch_weight), 2),
                "katch_mcardle": katch_weight,
            }),
        )
    } else {
        (
            blended,
            json!({
                "mifflin": mifflin_weight,
                "harris": harris_weight,
            }),
        )
    };

    let base = confidence_for(profile, BmrMethod::AdaptiveEnsemble, &config.confidence);
    let confidence = round_dp(
        (base + config.confidence.ensemble_bonus).min(config.confidence.cap),
        3,
    );

    BmrResult {
        bmr: round_dp(bmr, 1),
        method: BmrMethod::AdaptiveEnsemble.as_str().to_owned(),
        confidence,
        components: json!({
            "mifflin_bmr": mifflin.bmr,
            "harris_bmr": harris.bmr,
            "weights_used": weights,
        }),
    }
}

/// Gender constant for the Mifflin-St Jeor formula: +5 male, -161 female
#[must_use]
pub fn gender_adjustment(gender: Gender, config: &IntelligenceConfig) -> f64 {
    match gender {
        Gender::Male => config.bmr.msj_male_constant,
        Gender::Female => config.bmr.msj_female_constant,
    }
}

/// Rough body fat estimate from BMI and age, clamped to [5, 50]
#[must_use]
pub fn estimate_body_fat(profile: &ResolvedProfile) -> f64 {
    let bmi = profile.bmi();
    let age = f64::from(profile.age);
    let estimate = match profile.gender {
        Gender::Male => 1.20 * bmi + 0.23 * age - 16.2,
        Gender::Female => 1.20 * bmi + 0.23 * age - 5.4,
    };
    estimate.clamp(5.0, 50.0)
}

/// Confidence score from method accuracy and subject characteristics
fn confidence_for(profile: &ResolvedProfile, method: BmrMethod, config: &ConfidenceConfig) -> f64 {
    let mut confidence = match method {
        BmrMethod::MifflinStJeor => config.mifflin_base,
        BmrMethod::HarrisBenedict => config.harris_base,
        BmrMethod::KatchMcArdle => config.katch_base,
        BmrMethod::AdaptiveEnsemble => config.ensemble_base,
    };

    if profile.age < config.age_validated_min || profile.age > config.age_validated_max {
        confidence *= config.age_penalty;
    }

    let bmi = profile.bmi();
    if bmi < config.bmi_low || bmi > config.bmi_high {
        confidence *= config.bmi_penalty;
    }

    if method == BmrMethod::KatchMcArdle && profile.body_fat_percentage.is_some() {
        confidence *= config.body_fat_bonus;
    }

    round_dp(confidence.min(config.cap), 3)
}

/// Ensemble weights for (mifflin, harris) from BMI and age
fn ensemble_weights(profile: &ResolvedProfile, config: &EnsembleWeightsConfig) -> (f64, f64) {
    let bmi = profile.bmi();

    let (mut mifflin, mut harris) = if (18.5..=25.0).contains(&bmi) {
        (config.normal_bmi_mifflin, config.normal_bmi_harris)
    } else if bmi > 30.0 {
        (config.high_bmi_mifflin, config.high_bmi_harris)
    } else {
        (config.mifflin_base, config.harris_base)
    };

    if profile.age > 60 {
        harris += config.senior_age_shift;
        mifflin -= config.senior_age_shift;
    }

    (round_dp(mifflin, 2), round_dp(harris, 2))
}

/// Round to the given number of decimal places
fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round() / factor
}
