// ABOUTME: Resolves stored profiles into fully populated physiological input tuples
// ABOUTME: Missing fields get fixed defaults; present values pass through without range correction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! Profile resolution
//!
//! Given a stored profile (possibly partially populated, possibly absent),
//! produce a fully populated input tuple by substituting fixed defaults:
//! 70 kg, 170 cm, 25 years, male. There is no validation beyond numeric
//! coercion - out-of-range values pass through uncorrected.

use crate::constants::profile_defaults;
use crate::models::{Gender, Profile, ResolvedProfile};

/// Resolve a stored profile into a complete input tuple
#[must_use]
pub fn resolve_profile(profile: Option<&Profile>) -> ResolvedProfile {
    profile.map_or_else(ResolvedProfile::default, |p| ResolvedProfile {
        weight_kg: p.weight_kg.unwrap_or(profile_defaults::WEIGHT_KG),
        height_cm: p.height_cm.unwrap_or(profile_defaults::HEIGHT_CM),
        age: p
            .age
            .map_or(u32::from(profile_defaults::AGE_YEARS), u32::from),
        gender: p.gender.unwrap_or(Gender::Male),
        body_fat_percentage: p.body_fat_percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn absent_profile_resolves_to_defaults() {
        let resolved = resolve_profile(None);
        assert!((resolved.weight_kg - 70.0).abs() < f64::EPSILON);
        assert!((resolved.height_cm - 170.0).abs() < f64::EPSILON);
        assert_eq!(resolved.age, 25);
        assert_eq!(resolved.gender, Gender::Male);
        assert!(resolved.body_fat_percentage.is_none());
    }

    #[test]
    fn empty_profile_resolves_to_defaults() {
        let profile = Profile::new(Uuid::new_v4());
        let resolved = resolve_profile(Some(&profile));
        assert_eq!(resolved, ResolvedProfile::default());
    }

    #[test]
    fn present_fields_take_precedence() {
        let mut profile = Profile::new(Uuid::new_v4());
        profile.weight_kg = Some(82.5);
        profile.gender = Some(Gender::Female);
        let resolved = resolve_profile(Some(&profile));
        assert!((resolved.weight_kg - 82.5).abs() < f64::EPSILON);
        assert!((resolved.height_cm - 170.0).abs() < f64::EPSILON);
        assert_eq!(resolved.gender, Gender::Female);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let mut profile = Profile::new(Uuid::new_v4());
        profile.weight_kg = Some(-12.0);
        profile.age = Some(0);
        let resolved = resolve_profile(Some(&profile));
        assert!((resolved.weight_kg - -12.0).abs() < f64::EPSILON);
        assert_eq!(resolved.age, 0);
    }
}
