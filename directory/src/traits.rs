//! Trait definitions with mockall annotations for testing
//!
//! The data provider is the only collaborator the directory layer talks to.
//! Everything behind it (HTTP backend, fixtures, simulated latency) is swapped
//! in through this trait.

use async_trait::async_trait;
use shared::{PageData, RatingSubmission, SearchFilters, SearchResponse, SectionKey, SubmissionReceipt};

use crate::error::DirectoryResult;

/// Source of school data and sink for rating submissions
#[mockall::automock]
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch the structured data backing one page section
    async fn get_page_data(&self, section: SectionKey) -> DirectoryResult<PageData>;

    /// Server-side equivalent of the in-memory query engine
    async fn search(&self, query: &str, filters: &SearchFilters) -> DirectoryResult<SearchResponse>;

    /// Record a visitor's evaluation
    ///
    /// # Returns
    /// A receipt with the stored evaluation's id, or `SubmissionFailed`
    async fn submit_rating(&self, payload: RatingSubmission) -> DirectoryResult<SubmissionReceipt>;
}
