// ABOUTME: Compute collaborator seam - subprocess JSON bridge and in-process engine
// ABOUTME: One newline-terminated JSON command per call; the reply is the last JSON-parseable stdout line
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! Compute collaborator bridge
//!
//! The estimator talks to its computation collaborator through the
//! [`ComputeCollaborator`] trait: a single blocking request/response exchange
//! per call, no pooling, no retries. Two implementations ship here:
//!
//! - [`ProcessBridge`] spawns the configured command per exchange, writes one
//!   newline-terminated JSON object to its stdin, and takes the last stdout
//!   line that parses as a JSON object as the reply. Non-zero exit, timeout,
//!   or silence count as failure.
//! - [`LocalEngine`] runs the formula module in-process behind the same
//!   seam, for deployments without an external collaborator.

use crate::config::environment::BridgeConfig;
use crate::config::intelligence::IntelligenceConfig;
use crate::constants::bridge as protocol;
use crate::errors::{AppError, AppResult};
use crate::intelligence::bmr_calculator;
use crate::models::{BmrMethod, ResolvedProfile};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Synchronous request/response seam to a computation collaborator
#[async_trait]
pub trait ComputeCollaborator: Send + Sync {
    /// Execute one BMR calculation exchange, returning the raw reply object
    ///
    /// # Errors
    ///
    /// Returns an error on any transport failure, abnormal exit, or
    /// unparseable reply. Callers decide what failure means; the estimator
    /// converts it into the deterministic fallback.
    async fn calculate_bmr(&self, profile: &ResolvedProfile, method: BmrMethod)
        -> AppResult<Value>;

    /// Probe collaborator liveness
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator cannot be reached or replies
    /// with an unparseable payload.
    async fn health_check(&self) -> AppResult<Value>;
}

/// Build the collaborator selected by the bridge configuration
#[must_use]
pub fn collaborator_from_config(
    bridge: &BridgeConfig,
    intelligence: IntelligenceConfig,
) -> Box<dyn ComputeCollaborator> {
    match &bridge.command {
        Some(command) => Box::new(ProcessBridge::new(
            command.clone(),
            bridge.args.clone(),
            bridge.timeout,
        )),
        None => Box::new(LocalEngine::new(intelligence)),
    }
}

/// Subprocess computation collaborator
///
/// Each exchange spawns a fresh process; concurrent callers get independent
/// process instances, so there is no queueing or admission control here.
pub struct ProcessBridge {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessBridge {
    /// Create a bridge for the given command line
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    /// One full request/response exchange with a fresh collaborator process
    async fn exchange(&self, request: &Value) -> AppResult<Value> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AppError::external_service_unavailable(self.command.as_str()).with_source(e)
            })?;

        // One newline-terminated JSON object per call; closing stdin signals
        // the collaborator to reply and exit.
        let payload = format!("{request}\n");
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload.as_bytes())
                .await
                .map_err(|e| AppError::external_service("bridge", "stdin write failed").with_source(e))?;
            stdin
                .shutdown()
                .await
                .map_err(|e| AppError::external_service("bridge", "stdin close failed").with_source(e))?;
        }

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                AppError::external_service(
                    "bridge",
                    format!("collaborator exceeded {}s timeout", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| AppError::external_service("bridge", "collaborator I/O failed").with_source(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::external_service(
                "bridge",
                format!(
                    "collaborator exited with {}: {}",
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(bytes = stdout.len(), "collaborator replied");
        last_json_object(&stdout).ok_or_else(|| {
            AppError::external_service("bridge", "no JSON object in collaborator output")
        })
    }
}

#[async_trait]
impl ComputeCollaborator for ProcessBridge {
    async fn calculate_bmr(
        &self,
        profile: &ResolvedProfile,
        method: BmrMethod,
    ) -> AppResult<Value> {
        let reply = self
            .exchange(&calculate_command(profile, method))
            .await?;

        // The collaborator's error envelope counts as a malformed response.
        if reply.get("success").and_then(Value::as_bool) == Some(false) {
            let detail = reply
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("collaborator reported failure");
            return Err(AppError::external_service("bridge", detail));
        }

        Ok(reply)
    }

    async fn health_check(&self) -> AppResult<Value> {
        self.exchange(&json!({ "action": protocol::ACTION_HEALTH_CHECK }))
            .await
    }
}

/// In-process computation collaborator backed by the formula module
///
/// The behavioral contract is transport-agnostic, so a library call is a
/// valid collaborator; this engine never fails.
pub struct LocalEngine {
    config: IntelligenceConfig,
}

impl LocalEngine {
    /// Create an engine with the given formula configuration
    #[must_use]
    pub fn new(config: IntelligenceConfig) -> Self {
        Self { config }
    }
}

impl Default for LocalEngine {
    fn default() -> Self {
        Self::new(IntelligenceConfig::default())
    }
}

#[async_trait]
impl ComputeCollaborator for LocalEngine {
    async fn calculate_bmr(
        &self,
        profile: &ResolvedProfile,
        method: BmrMethod,
    ) -> AppResult<Value> {
        let result = bmr_calculator::calculate(profile, method, &self.config);
        Ok(serde_json::to_value(&result)?)
    }

    async fn health_check(&self) -> AppResult<Value> {
        Ok(json!({
            "status": "healthy",
            "engine": "in_process",
            "methods": [
                BmrMethod::MifflinStJeor.as_str(),
                BmrMethod::HarrisBenedict.as_str(),
                BmrMethod::KatchMcArdle.as_str(),
                BmrMethod::AdaptiveEnsemble.as_str(),
            ],
        }))
    }
}

/// Build the calculate_bmr command object for the wire
fn calculate_command(profile: &ResolvedProfile, method: BmrMethod) -> Value {
    let mut wire_profile = json!({
        "weight_kg": profile.weight_kg,
        "height_cm": profile.height_cm,
        "age": profile.age,
        "gender": profile.gender.as_str(),
    });
    if let Some(body_fat) = profile.body_fat_percentage {
        wire_profile["body_fat_percentage"] = json!(body_fat);
    }

    json!({
        "action": protocol::ACTION_CALCULATE_BMR,
        "method": method.as_str(),
        "profile": wire_profile,
    })
}

/// The reply is the last stdout line that parses as a JSON object; log noise
/// before it is ignored
fn last_json_object(stdout: &str) -> Option<Value> {
    stdout.lines().rev().find_map(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        serde_json::from_str::<Value>(trimmed)
            .ok()
            .filter(Value::is_object)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn last_json_object_skips_log_noise() {
        let stdout = "INFO starting up\nnot json at all\n{\"bmr\": 1500.0}\n";
        let reply = last_json_object(stdout).unwrap();
        assert!((reply["bmr"].as_f64().unwrap() - 1500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn last_json_object_requires_an_object() {
        assert!(last_json_object("42\n\"just a string\"\n").is_none());
        assert!(last_json_object("").is_none());
    }

    #[test]
    fn calculate_command_carries_the_wire_shape() {
        let profile = ResolvedProfile {
            gender: Gender::Female,
            body_fat_percentage: Some(22.0),
            ..ResolvedProfile::default()
        };
        let command = calculate_command(&profile, BmrMethod::KatchMcArdle);
        assert_eq!(command["action"], "calculate_bmr");
        assert_eq!(command["method"], "katch_mcardle");
        assert_eq!(command["profile"]["gender"], "female");
        assert!((command["profile"]["body_fat_percentage"].as_f64().unwrap() - 22.0).abs() < f64::EPSILON);
    }
}
