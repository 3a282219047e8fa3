//! # pt-api
//!
//! JSON REST handlers for Project Tracker, mounted under `/api/v1`.
//!
//! The acting user is taken from the `X-User-Id` header.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
