//! # pt-core
//!
//! Core types, traits, and configuration for Project Tracker.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types and the `TrackerResult` alias
//! - Core traits (Entity, Identifiable, Timestamped, ProjectScoped)
//! - Application configuration

pub mod config;
pub mod error;
pub mod traits;

pub use error::*;
pub use traits::*;
