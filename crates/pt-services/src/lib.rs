//! # pt-services
//!
//! Business operations over projects and reports.
//!
//! Services validate input (DTO field rules, then contracts), apply the
//! lifecycle engine and persist through the injected stores.

pub mod projects;
pub mod reports;
pub mod validation;

pub use projects::ProjectService;
pub use reports::items::ReportItem;
pub use reports::ReportService;
