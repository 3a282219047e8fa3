//! # pt-lifecycle
//!
//! Report lifecycle engine: pure transformations over report values.
//!
//! - [`synthesize_initial_report`] builds a new project's first report
//! - [`advance_quarter`] derives the next period's draft from a report
//! - [`submit`] and [`mark_for_review`] move a report through
//!   Draft -> Review -> Submitted
//!
//! Nothing here touches a store or a clock; callers persist the results.

pub mod error;
pub mod initial;
pub mod quarter;
pub mod rollover;
pub mod submission;

pub use error::{LifecycleError, LifecycleResult};
pub use initial::synthesize_initial_report;
pub use quarter::{initial_period, initial_quarter, next_period};
pub use rollover::{advance_quarter, strip_fields};
pub use submission::{mark_for_review, submit, SubmitOutcome};
