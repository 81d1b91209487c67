//! Shared types for the school directory data layer
//!
//! Contains the record model, the data provider message types and the
//! configuration and logging helpers used by every crate in the workspace.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{
    // Data provider boundary
    PageData, RatingSubmission, SearchFilters, SearchResponse, SubmissionReceipt,

    // Configuration types
    DirectoryConfig, FetchSettings, ProjectionProfile, ProjectionSettings, ProviderSettings, QuerySettings,
};
