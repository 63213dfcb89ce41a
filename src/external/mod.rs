// ABOUTME: External collaborator module
// ABOUTME: Hosts the compute bridge seam and its implementations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! External computation collaborators

/// Compute collaborator trait, subprocess bridge, and in-process engine
pub mod bridge;
