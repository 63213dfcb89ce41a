// ABOUTME: The total BMR estimation operation - collaborator delegation, normalization, fallback
// ABOUTME: estimate() always returns a result; every collaborator failure becomes the deterministic fallback
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! BMR estimation
//!
//! One estimation is one request/response exchange with the configured
//! compute collaborator. On success the reply is normalized into the fixed
//! result shape; on any failure (transport error, non-zero exit, timeout,
//! unparseable output) the estimator computes Mifflin-St Jeor locally and
//! tags the result as a fallback with reduced confidence. `estimate` is a
//! total function: it never returns an error.

use crate::config::intelligence::IntelligenceConfig;
use crate::constants::estimates;
use crate::external::bridge::{ComputeCollaborator, LocalEngine};
use crate::intelligence::bmr_calculator;
use crate::models::{BmrMethod, BmrResult, ResolvedProfile};
use serde_json::{json, Value};
use tracing::{info, warn};

/// BMR estimator over a compute collaborator
pub struct BmrEstimator {
    collaborator: Box<dyn ComputeCollaborator>,
    config: IntelligenceConfig,
}

impl BmrEstimator {
    /// Create an estimator over the given collaborator
    #[must_use]
    pub fn new(collaborator: Box<dyn ComputeCollaborator>, config: IntelligenceConfig) -> Self {
        Self {
            collaborator,
            config,
        }
    }

    /// Create an estimator over the in-process engine
    #[must_use]
    pub fn local(config: IntelligenceConfig) -> Self {
        let engine = LocalEngine::new(config.clone());
        Self::new(Box::new(engine), config)
    }

    /// Estimate BMR for resolved inputs
    ///
    /// The method defaults to Mifflin-St Jeor when unspecified. This
    /// operation always succeeds; collaborator failures are converted into
    /// the deterministic fallback result.
    pub async fn estimate(
        &self,
        profile: &ResolvedProfile,
        method: Option<BmrMethod>,
    ) -> BmrResult {
        let method = method.unwrap_or_default();

        match self.collaborator.calculate_bmr(profile, method).await {
            Ok(reply) => {
                let result = normalize_reply(&reply, profile, method, &self.config);
                info!(
                    bmr = result.bmr,
                    method = %result.method,
                    confidence = result.confidence,
                    "BMR estimate computed"
                );
                result
            }
            Err(err) => {
                warn!(error = %err, "collaborator failed, using Mifflin-St Jeor fallback");
                self.fallback(profile)
            }
        }
    }

    /// Probe the collaborator
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator is unreachable or replies with
    /// an unparseable payload. Unlike estimation, health probes do not fall
    /// back.
    pub async fn health_check(&self) -> crate::errors::AppResult<Value> {
        self.collaborator.health_check().await
    }

    /// Deterministic in-process fallback: Mifflin-St Jeor with reduced
    /// confidence and a provenance-preserving method tag
    fn fallback(&self, profile: &ResolvedProfile) -> BmrResult {
        let mut result = bmr_calculator::mifflin_st_jeor(profile, &self.config);
        result.method = estimates::FALLBACK_METHOD.to_owned();
        result.confidence = estimates::FALLBACK_CONFIDENCE;
        result
    }
}

/// Normalize a raw collaborator reply into the fixed result shape
///
/// Missing fields get their contract defaults: `bmr` 0, `confidence` 0.95
/// (clamped to [0, 1]), `components` `{base, gender_adjustment}`, `method`
/// the requested method name.
#[must_use]
pub fn normalize_reply(
    reply: &Value,
    profile: &ResolvedProfile,
    requested: BmrMethod,
    config: &IntelligenceConfig,
) -> BmrResult {
    let bmr = reply.get("bmr").and_then(Value::as_f64).unwrap_or(0.0);

    let method = reply
        .get("method")
        .and_then(Value::as_str)
        .map_or_else(|| requested.as_str().to_owned(), str::to_owned);

    let confidence = reply
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(estimates::DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0);

    let components = reply
        .get("components")
        .filter(|v| v.is_object())
        .cloned()
        .unwrap_or_else(|| {
            json!({
                "base": bmr,
                "gender_adjustment": bmr_calculator::gender_adjustment(profile.gender, config),
            })
        });

    BmrResult {
        bmr,
        method,
        confidence,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn normalize_fills_contract_defaults() {
        let profile = ResolvedProfile::default();
        let reply = json!({});
        let result = normalize_reply(
            &reply,
            &profile,
            BmrMethod::MifflinStJeor,
            &IntelligenceConfig::default(),
        );
        assert!((result.bmr - 0.0).abs() < f64::EPSILON);
        assert_eq!(result.method, "mifflin_st_jeor");
        assert!((result.confidence - 0.95).abs() < f64::EPSILON);
        assert!((result.components["gender_adjustment"].as_f64().unwrap() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_clamps_confidence() {
        let profile = ResolvedProfile {
            gender: Gender::Female,
            ..ResolvedProfile::default()
        };
        let reply = json!({"bmr": 1500.0, "confidence": 7.5});
        let result = normalize_reply(
            &reply,
            &profile,
            BmrMethod::MifflinStJeor,
            &IntelligenceConfig::default(),
        );
        assert!((result.confidence - 1.0).abs() < f64::EPSILON);
        assert!(
            (result.components["gender_adjustment"].as_f64().unwrap() - -161.0).abs()
                < f64::EPSILON
        );
    }
}
