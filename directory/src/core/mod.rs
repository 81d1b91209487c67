//! Core business logic modules
//!
//! This module contains pure logic with no I/O dependencies: the section
//! reducer, query evaluation, aggregation and map projection. Everything here
//! is deterministic and easily testable.

pub mod aggregation;
pub mod collation;
pub mod projector;
pub mod query;
pub mod store;

pub use aggregation::{summarize, AggregateStats, CriterionRow};
pub use projector::{Marker, MarkerPosition, Projector};
pub use query::{QueryEngine, QuerySpec, SortKey, SortOrder};
pub use store::{reduce, Action, SectionAction, SectionState, StateStore, StoreState};
