//! API handlers

pub mod items;
pub mod projects;
pub mod reports;
