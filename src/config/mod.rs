// ABOUTME: Configuration module grouping environment and formula configuration
// ABOUTME: Runtime settings come from the environment, formula coefficients carry literature defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! Configuration management

/// Environment-driven runtime configuration
pub mod environment;

/// Formula coefficients and scoring configuration
pub mod intelligence;
