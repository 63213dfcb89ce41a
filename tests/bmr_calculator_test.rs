// ABOUTME: Algorithm tests for all in-process BMR calculation methods
// ABOUTME: Hand-computed vectors for Mifflin-St Jeor, Harris-Benedict, Katch-McArdle, and the ensemble
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! Formula tests for the BMR calculator module
//!
//! Every expected value is computed by hand from the published formulas so a
//! coefficient regression shows up as an exact mismatch.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitframe::{
    config::intelligence::IntelligenceConfig,
    intelligence::bmr_calculator::{
        adaptive_ensemble, calculate, estimate_body_fat, harris_benedict, katch_mcardle,
        mifflin_st_jeor,
    },
    intelligence::profile_resolver::resolve_profile,
    models::{BmrMethod, Gender, ResolvedProfile},
};

mod common;

fn subject(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> ResolvedProfile {
    ResolvedProfile {
        weight_kg,
        height_cm,
        age,
        gender,
        body_fat_percentage: None,
    }
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// MIFFLIN-ST JEOR
// ============================================================================

#[test]
fn test_mifflin_default_subject_male() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // 70kg, 170cm, 25y male: base = 700 + 1062.5 - 125 = 1637.5, +5 = 1642.5
    let result = mifflin_st_jeor(&subject(70.0, 170.0, 25, Gender::Male), &config);

    assert_close(result.bmr, 1642.5, 0.01);
    assert_close(result.components["base"].as_f64().unwrap(), 1637.5, 0.01);
    assert_close(
        result.components["gender_adjustment"].as_f64().unwrap(),
        5.0,
        0.01,
    );
    assert_close(result.confidence, 0.95, 0.001);
}

#[test]
fn test_mifflin_default_subject_female() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // Same inputs, female: 1637.5 - 161 = 1476.5
    let result = mifflin_st_jeor(&subject(70.0, 170.0, 25, Gender::Female), &config);

    assert_close(result.bmr, 1476.5, 0.01);
    assert_close(
        result.components["gender_adjustment"].as_f64().unwrap(),
        -161.0,
        0.01,
    );
}

#[test]
fn test_mifflin_component_breakdown() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    let result = mifflin_st_jeor(&subject(70.0, 170.0, 25, Gender::Male), &config);

    assert_close(
        result.components["weight_component"].as_f64().unwrap(),
        700.0,
        0.01,
    );
    assert_close(
        result.components["height_component"].as_f64().unwrap(),
        1062.5,
        0.01,
    );
    assert_close(
        result.components["age_component"].as_f64().unwrap(),
        -125.0,
        0.01,
    );
}

#[test]
fn test_mifflin_typical_athlete() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // 30-year-old male, 75kg, 180cm: 750 + 1125 - 150 + 5 = 1730
    let result = mifflin_st_jeor(&subject(75.0, 180.0, 30, Gender::Male), &config);
    assert_close(result.bmr, 1730.0, 0.01);
}

#[test]
fn test_mifflin_out_of_range_inputs_pass_through() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // No validation and no minimum clamp: a zero-mass subject produces a
    // formula-exact value, not an error
    let result = mifflin_st_jeor(&subject(0.0, 170.0, 25, Gender::Male), &config);
    assert_close(result.bmr, 942.5, 0.01);
    assert!(result.bmr.is_finite());
}

// ============================================================================
// HARRIS-BENEDICT (REVISED)
// ============================================================================

#[test]
fn test_harris_benedict_male() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // 75kg, 180cm, 30y male:
    // 88.362 + 13.397*75 + 4.799*180 - 5.677*30
    // = 88.362 + 1004.775 + 863.82 - 170.31 = 1786.647 -> 1786.6
    let result = harris_benedict(&subject(75.0, 180.0, 30, Gender::Male), &config);

    assert_close(result.bmr, 1786.6, 0.01);
    assert_close(
        result.components["base_constant"].as_f64().unwrap(),
        88.362,
        0.001,
    );
    assert_close(result.confidence, 0.90, 0.001);
}

#[test]
fn test_harris_benedict_female() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // 60kg, 165cm, 25y female:
    // 447.593 + 9.247*60 + 3.098*165 - 4.330*25
    // = 447.593 + 554.82 + 511.17 - 108.25 = 1405.333 -> 1405.3
    let result = harris_benedict(&subject(60.0, 165.0, 25, Gender::Female), &config);

    assert_close(result.bmr, 1405.3, 0.01);
    assert_close(
        result.components["base_constant"].as_f64().unwrap(),
        447.593,
        0.001,
    );
}

// ============================================================================
// KATCH-MCARDLE
// ============================================================================

#[test]
fn test_katch_mcardle_with_measured_body_fat() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // 80kg at 20% body fat: LBM = 64, BMR = 370 + 21.6*64 = 1752.4
    let mut profile = subject(80.0, 180.0, 30, Gender::Male);
    profile.body_fat_percentage = Some(20.0);
    let result = katch_mcardle(&profile, &config);

    assert_close(result.bmr, 1752.4, 0.01);
    assert_close(
        result.components["lean_body_mass"].as_f64().unwrap(),
        64.0,
        0.01,
    );
    assert_close(
        result.components["body_fat_used"].as_f64().unwrap(),
        20.0,
        0.01,
    );
    // Measured body fat earns the accuracy bonus: 0.93 * 1.05 capped at 0.99
    assert!(result.confidence > 0.93);
    assert!(result.confidence <= 0.99);
}

#[test]
fn test_katch_mcardle_estimates_missing_body_fat() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // 70kg, 170cm, 25y male: BMI = 24.2215, estimated body fat
    // = 1.2*24.2215 + 0.23*25 - 16.2 = 18.6157, LBM = 56.969, BMR = 1600.5
    let result = katch_mcardle(&subject(70.0, 170.0, 25, Gender::Male), &config);

    assert_close(result.bmr, 1600.5, 0.05);
    assert_close(
        result.components["body_fat_used"].as_f64().unwrap(),
        18.6,
        0.05,
    );
}

#[test]
fn test_body_fat_estimate_gender_offset() {
    common::init_test_logging();

    let male = estimate_body_fat(&subject(70.0, 170.0, 25, Gender::Male));
    let female = estimate_body_fat(&subject(70.0, 170.0, 25, Gender::Female));

    // Same anthropometrics differ only by the gender offset (16.2 vs 5.4)
    assert_close(female - male, 10.8, 0.001);
}

#[test]
fn test_body_fat_estimate_clamped_to_plausible_range() {
    common::init_test_logging();

    let lean = estimate_body_fat(&subject(40.0, 190.0, 18, Gender::Male));
    let heavy = estimate_body_fat(&subject(250.0, 150.0, 80, Gender::Female));

    assert!(lean >= 5.0);
    assert!(heavy <= 50.0);
}

// ============================================================================
// ADAPTIVE ENSEMBLE
// ============================================================================

#[test]
fn test_ensemble_normal_bmi_weighting() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // 70kg/170cm/25y male, BMI 24.2 -> weights 0.7/0.3
    // mifflin = 1642.5, harris = 88.362 + 937.79 + 815.83 - 141.925 = 1700.1
    // ensemble = 1642.5*0.7 + 1700.1*0.3 = 1659.78 -> 1659.8
    let result = adaptive_ensemble(&subject(70.0, 170.0, 25, Gender::Male), &config);

    assert_close(result.bmr, 1659.8, 0.05);
    assert_close(
        result.components["weights_used"]["mifflin"].as_f64().unwrap(),
        0.7,
        0.001,
    );
    assert_close(result.confidence, 0.99, 0.001);
}

#[test]
fn test_ensemble_blends_katch_when_body_fat_known() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    let mut profile = subject(80.0, 180.0, 30, Gender::Male);
    profile.body_fat_percentage = Some(20.0);
    let result = adaptive_ensemble(&profile, &config);

    assert_close(
        result.components["weights_used"]["katch_mcardle"]
            .as_f64()
            .unwrap(),
        0.3,
        0.001,
    );
    assert!(result.bmr.is_finite());
}

#[test]
fn test_ensemble_components_carry_member_results() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    let result = adaptive_ensemble(&subject(70.0, 170.0, 25, Gender::Male), &config);

    assert_close(
        result.components["mifflin_bmr"].as_f64().unwrap(),
        1642.5,
        0.01,
    );
    assert_close(
        result.components["harris_bmr"].as_f64().unwrap(),
        1700.1,
        0.05,
    );
}

// ============================================================================
// CONFIDENCE SCORING
// ============================================================================

#[test]
fn test_confidence_penalized_outside_validated_age_range() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    let adult = mifflin_st_jeor(&subject(70.0, 170.0, 25, Gender::Male), &config);
    let senior = mifflin_st_jeor(&subject(70.0, 170.0, 85, Gender::Male), &config);

    // 0.95 * 0.90 = 0.855
    assert_close(adult.confidence, 0.95, 0.001);
    assert_close(senior.confidence, 0.855, 0.001);
}

#[test]
fn test_confidence_penalized_outside_bmi_bounds() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // 45kg at 180cm: BMI 13.9, below 18.5 -> 0.95 * 0.92 = 0.874
    let result = mifflin_st_jeor(&subject(45.0, 180.0, 25, Gender::Male), &config);
    assert_close(result.confidence, 0.874, 0.001);
}

#[test]
fn test_confidence_always_in_unit_interval() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    for method in [
        BmrMethod::MifflinStJeor,
        BmrMethod::HarrisBenedict,
        BmrMethod::KatchMcArdle,
        BmrMethod::AdaptiveEnsemble,
    ] {
        let result = calculate(&subject(70.0, 170.0, 25, Gender::Male), method, &config);
        assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
        assert!(result.bmr.is_finite());
    }
}

// ============================================================================
// DISPATCH AND RESOLUTION
// ============================================================================

#[test]
fn test_calculate_dispatches_by_method() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();
    let profile = subject(70.0, 170.0, 25, Gender::Male);

    assert_eq!(
        calculate(&profile, BmrMethod::MifflinStJeor, &config).method,
        "mifflin_st_jeor"
    );
    assert_eq!(
        calculate(&profile, BmrMethod::HarrisBenedict, &config).method,
        "harris_benedict"
    );
    assert_eq!(
        calculate(&profile, BmrMethod::KatchMcArdle, &config).method,
        "katch_mcardle"
    );
    assert_eq!(
        calculate(&profile, BmrMethod::AdaptiveEnsemble, &config).method,
        "adaptive_ensemble"
    );
}

#[test]
fn test_resolved_defaults_feed_the_formula() {
    common::init_test_logging();
    let config = IntelligenceConfig::default();

    // A fully-absent profile resolves to {70, 170, 25, male} and therefore
    // computes 1642.5
    let inputs = resolve_profile(None);
    let result = mifflin_st_jeor(&inputs, &config);
    assert_close(result.bmr, 1642.5, 0.01);
}
