#![forbid(unsafe_code)]

//! Core domain model and business logic for the Liftplan methodology engine.
//!
//! This crate provides:
//! - Domain types (profiles, exercises, workouts, methodology candidates)
//! - Exercise classification (main vs warm-up/cooldown)
//! - Methodology catalog and rule-based scorer
//! - Context filters and the compatibility table
//! - Structural transformers and the orchestrating engine
//! - Configuration, logging and JSON document I/O

pub mod types;
pub mod error;
pub mod classifier;
pub mod catalog;
pub mod scorer;
pub mod compat;
pub mod filters;
pub mod transform;
pub mod config;
pub mod logging;
pub mod document;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::get_default_catalog;
pub use classifier::classify_main;
pub use compat::{CompatibilityOracle, IncompatibilityTable};
pub use config::Config;
pub use scorer::{MethodologyScorer, RuleBasedScorer};
pub use engine::{apply_training_methods, MethodEngine};
