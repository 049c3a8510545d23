//! Rule store subsystem
//!
//! Loads the declarative rule definitions once at startup and exposes them
//! as an immutable, ordered [`RuleSet`].
//!
//! # Design Principles
//!
//! - Loaded once, never mutated or reloaded
//! - Strongly typed after load: predicates are validated up front
//! - Missing or malformed stores fail initialization (no partial rule sets)
//! - Duplicate ids are tolerated; lookups resolve to the first record

mod errors;
mod loader;
mod set;
mod types;

pub use errors::{RuleStoreError, RuleStoreErrorCode, RuleStoreResult};
pub use loader::RuleLoader;
pub use set::RuleSet;
pub use types::{Condition, Literal, Predicate, RangeBounds, RuleRecord, UNKNOWN_SOURCE};
