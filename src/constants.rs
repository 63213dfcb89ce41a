// ABOUTME: Named constants shared across the engine
// ABOUTME: Profile defaults, bridge protocol actions, and estimate normalization values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! Central constants so magic values live in exactly one place

/// Service names for structured logging
pub mod service_names {
    /// Main engine service name
    pub const FITFRAME: &str = "fitframe";
}

/// Fixed defaults substituted for missing profile fields
pub mod profile_defaults {
    /// Default body mass in kilograms
    pub const WEIGHT_KG: f64 = 70.0;
    /// Default stature in centimeters
    pub const HEIGHT_CM: f64 = 170.0;
    /// Default age in years
    pub const AGE_YEARS: u16 = 25;
}

/// Compute bridge wire protocol
pub mod bridge {
    /// BMR calculation action name
    pub const ACTION_CALCULATE_BMR: &str = "calculate_bmr";
    /// Collaborator health probe action name
    pub const ACTION_HEALTH_CHECK: &str = "health_check";
    /// Default bound on a single request/response exchange, in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
}

/// Estimate result normalization and fallback tagging
pub mod estimates {
    /// Method tag for fallback-produced results, distinguishable from the
    /// primary path so provenance is never conflated
    pub const FALLBACK_METHOD: &str = "mifflin_st_jeor_fallback";
    /// Confidence assigned to fallback-produced results
    pub const FALLBACK_CONFIDENCE: f64 = 0.85;
    /// Confidence assumed when a collaborator reply omits one
    pub const DEFAULT_CONFIDENCE: f64 = 0.95;
    /// Default number of history records returned
    pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
}
