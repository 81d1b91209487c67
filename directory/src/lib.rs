//! School directory data layer
//!
//! Keeps per-section fetch state for the directory's pages, runs provider
//! round trips through a single orchestrator, and derives filtered lists,
//! statistics and map positions from the loaded records.

pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use core::{AggregateStats, Projector, QueryEngine, QuerySpec, SortKey, SortOrder, StateStore};
pub use error::{DirectoryError, DirectoryResult, FailureKind, SectionError};
pub use orchestrator::{FetchOrchestrator, LoadOutcome};
pub use services::SimulatedProvider;
pub use traits::DataProvider;
