//! The sampling engine for boolean Bayesian networks.
//!
//! This module provides:
//! - **errors**: Error types for loading and sampling failures
//! - **cpt**: Conditional probability tables and the parent-assignment index
//! - **evidence**: Per-node evidence classification
//! - **network**: Immutable network structure shared by all trials
//! - **instance**: Per-trial realized values
//! - **evaluator**: Recursive ancestor resolution used by both samplers
//! - **estimate**: Trial aggregates and their final estimates
//! - **trials**: Sequential, seeded and parallel trial drivers
//! - **rejection** / **likelihood**: The two samplers

pub mod config;
pub mod cpt;
pub mod errors;
pub mod estimate;
pub mod evaluator;
pub mod evidence;
pub mod instance;
pub mod likelihood;
pub mod network;
pub mod rejection;
pub mod trials;
