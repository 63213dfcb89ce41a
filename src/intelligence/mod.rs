// ABOUTME: Intelligence module grouping BMR formulas, profile resolution, and the estimator
// ABOUTME: Everything downstream of a resolved profile and upstream of persistence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! BMR intelligence: formulas, resolution, estimation

/// In-process BMR formula implementations
pub mod bmr_calculator;

/// The total estimation operation with collaborator delegation and fallback
pub mod estimator;

/// Stored-profile to input-tuple resolution
pub mod profile_resolver;
