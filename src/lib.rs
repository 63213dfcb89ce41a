// ABOUTME: Crate root for the FitFrame BMR estimation engine
// ABOUTME: Wires together config, models, intelligence, external bridge, and persistence modules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! # FitFrame
//!
//! The computational core of a fitness-tracking backend: profile resolution,
//! basal metabolic rate (BMR) estimation, and an immutable estimate history.
//!
//! ## Features
//!
//! - **Profile resolution**: stored profiles are normalized into fully
//!   populated input tuples, substituting fixed defaults for missing fields
//! - **BMR estimation**: delegates to an external computation collaborator
//!   over a single request/response exchange, falling back to an in-process
//!   Mifflin-St Jeor computation on any failure - estimation never errors
//! - **Multiple formulas**: Mifflin-St Jeor, Harris-Benedict, Katch-McArdle,
//!   and an adaptive ensemble, each with a confidence score and a breakdown
//!   of contributing terms
//! - **History persistence**: append-only estimate records with newest-first
//!   retrieval over `SQLite`
//!
//! ## Architecture
//!
//! - **Models**: profile, resolved inputs, and estimate record types
//! - **Intelligence**: formula implementations, the profile resolver, and the
//!   total `estimate` operation
//! - **External**: the compute collaborator seam - subprocess bridge or
//!   in-process engine behind one trait
//! - **Database**: profile upserts and estimate history over `sqlx`
//! - **Config**: environment-driven runtime configuration plus formula
//!   coefficient tables
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitframe::config::intelligence::IntelligenceConfig;
//! use fitframe::intelligence::estimator::BmrEstimator;
//! use fitframe::intelligence::profile_resolver::resolve_profile;
//!
//! #[tokio::main]
//! async fn main() {
//!     let estimator = BmrEstimator::local(IntelligenceConfig::default());
//!     let inputs = resolve_profile(None);
//!     let result = estimator.estimate(&inputs, None).await;
//!     println!("BMR: {} kcal/day ({})", result.bmr, result.method);
//! }
//! ```

/// Environment and formula configuration
pub mod config;

/// Named constants shared across modules
pub mod constants;

/// Profile and estimate persistence over `SQLite`
pub mod database;

/// Unified error handling
pub mod errors;

/// External computation collaborator seam
pub mod external;

/// BMR formulas, profile resolution, and the estimator
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Core data model
pub mod models;
