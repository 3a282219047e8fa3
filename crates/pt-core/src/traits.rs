//! Core traits shared by models, stores, and services

use chrono::{DateTime, Utc};

/// Primary key type for persisted entities
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Option<Id>;
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
    fn is_new_record(&self) -> bool {
        !self.is_persisted()
    }
}

/// Trait for entities with timestamps (created_at, updated_at)
pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

/// Trait for entities that belong to a project
pub trait ProjectScoped {
    fn project_id(&self) -> Id;
}

/// Base trait for all persisted domain entities
pub trait Entity: Identifiable + Timestamped + Send + Sync {
    /// Collection name in the store
    const COLLECTION: &'static str;

    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}
