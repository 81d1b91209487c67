//! Message types exchanged with the directory's collaborators
//!
//! - `provider`: requests and responses of the data provider boundary
//! - `config`: configuration for the provider, fetch lifecycle and projection

pub mod config;
pub mod provider;

pub use config::{DirectoryConfig, FetchSettings, ProjectionProfile, ProjectionSettings, ProviderSettings, QuerySettings};
pub use provider::{PageData, RatingSubmission, SearchFilters, SearchResponse, SubmissionReceipt};
