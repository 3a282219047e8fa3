//! # pt-store
//!
//! Persistence interfaces for projects and reports, plus an in-memory
//! implementation used by the server and in tests.
//!
//! Stores are injected into services as `Arc<dyn ProjectStore>` and
//! `Arc<dyn ReportStore>`. Each write is atomic for the document it touches;
//! concurrent writers to the same document follow last-write-wins.

pub mod memory;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{ProjectStore, ReportStore, StoreError, StoreResult};
