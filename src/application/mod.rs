//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `RewardEngine` which acts as the primary entry
//! point for the scratch-card flow. Settlements run as cancellable `tokio`
//! tasks so the hosting view can tear them down cleanly.

pub mod engine;
