//! # pt-contracts
//!
//! Contract validation for Project Tracker.
//!
//! Field-level rules live on the DTOs (`validator` derive). Contracts check
//! the assembled entity before it is written: cross-field rules and whether
//! the entity may be changed at all.

pub mod base;
pub mod projects;
pub mod reports;

pub use base::*;
