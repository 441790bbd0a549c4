//! Progress note result model.
//!
//! # Responsibility
//! - Define the plain records handed back to callers after extraction.
//!
//! # Invariants
//! - A `Note` always has a non-empty title and at least one task.
//! - Task order matches document order.

pub mod note;
