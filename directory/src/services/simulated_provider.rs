//! In-memory data provider with artificial latency and failures
//!
//! Stands in for the backend during demos and tests. Every call sleeps for the
//! configured latency and then fails with the configured probability, so the
//! fetch lifecycle can be exercised end to end without a network.

use async_trait::async_trait;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;

use shared::{
    CriterionScore, PageData, ProviderSettings, QuerySettings, RatingSubmission, SchoolRecord, SearchFilters,
    SearchResponse, SectionKey, SubmissionReceipt,
};

use crate::core::query::{recently_added, QueryEngine, QuerySpec};
use crate::error::{DirectoryError, DirectoryResult};
use crate::services::dataset;
use crate::traits::DataProvider;

/// Simulated backend serving the seeded school catalogue
pub struct SimulatedProvider {
    settings: ProviderSettings,
    query: QuerySettings,
    records: Vec<SchoolRecord>,
    criteria: BTreeMap<String, Vec<CriterionScore>>,
}

impl SimulatedProvider {
    /// Create a provider over the seeded dataset
    pub fn new(settings: ProviderSettings) -> DirectoryResult<Self> {
        Self::with_dataset(settings, dataset::schools(), dataset::criteria()?)
    }

    /// Create a provider over a caller-supplied dataset
    ///
    /// Every record is validated up front; the first invalid one is rejected.
    pub fn with_dataset(
        settings: ProviderSettings,
        records: Vec<SchoolRecord>,
        criteria: BTreeMap<String, Vec<CriterionScore>>,
    ) -> DirectoryResult<Self> {
        for record in &records {
            record.validate()?;
        }
        info!(
            "📚 Simulated provider ready with {} schools (latency {}ms, failure rate {:.2})",
            records.len(),
            settings.latency_ms,
            settings.failure_rate
        );
        Ok(Self {
            settings,
            query: QuerySettings::default(),
            records,
            criteria,
        })
    }

    pub fn with_query_settings(mut self, query: QuerySettings) -> Self {
        self.query = query;
        self
    }

    pub fn records(&self) -> &[SchoolRecord] {
        &self.records
    }

    fn engine(&self) -> QueryEngine {
        QueryEngine::with_top_only_floor(self.query.top_only_floor)
    }

    fn should_fail(&self) -> bool {
        let rate = self.settings.failure_rate.clamp(0.0, 1.0);
        rand::thread_rng().gen_bool(rate)
    }

    async fn simulate_round_trip(&self) -> bool {
        let latency = self.settings.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.should_fail()
    }

    fn criteria_for(&self, records: &[SchoolRecord]) -> BTreeMap<String, Vec<CriterionScore>> {
        records
            .iter()
            .filter_map(|record| {
                self.criteria
                    .get(&record.id)
                    .map(|scores| (record.id.clone(), scores.clone()))
            })
            .collect()
    }

    fn records_for(&self, section: SectionKey) -> Vec<SchoolRecord> {
        match section {
            SectionKey::BestOf => self.engine().best_of(&self.records, self.query.best_of_limit),
            SectionKey::RecentlyAdded => recently_added(&self.records, self.query.recent_limit),
            _ => self.records.clone(),
        }
    }

    fn check_submission(&self, payload: &RatingSubmission) -> DirectoryResult<()> {
        if payload.school_id.trim().is_empty() {
            return Err(DirectoryError::invalid_rating("school id is empty"));
        }
        if !(1..=5).contains(&payload.stars) {
            return Err(DirectoryError::invalid_rating(format!(
                "stars must be between 1 and 5, got {}",
                payload.stars
            )));
        }
        if !self.records.iter().any(|record| record.id == payload.school_id) {
            return Err(DirectoryError::invalid_rating(format!(
                "unknown school '{}'",
                payload.school_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DataProvider for SimulatedProvider {
    async fn get_page_data(&self, section: SectionKey) -> DirectoryResult<PageData> {
        if self.simulate_round_trip().await {
            return Err(DirectoryError::load(format!("simulated outage while loading {section}")));
        }

        let records = self.records_for(section);
        let criteria = self.criteria_for(&records);
        debug!(%section, count = records.len(), "📦 Serving page data");
        Ok(PageData::new(section, records).with_criteria(criteria))
    }

    async fn search(&self, query: &str, filters: &SearchFilters) -> DirectoryResult<SearchResponse> {
        if self.simulate_round_trip().await {
            return Err(DirectoryError::load("simulated outage while searching"));
        }

        let spec = QuerySpec::from_filters(query, filters);
        let records = self.engine().apply(&self.records, &spec);
        debug!(query, count = records.len(), "🔎 Search served");
        Ok(SearchResponse {
            total_count: records.len(),
            records,
        })
    }

    async fn submit_rating(&self, payload: RatingSubmission) -> DirectoryResult<SubmissionReceipt> {
        self.check_submission(&payload)?;
        if self.simulate_round_trip().await {
            return Err(DirectoryError::submission("simulated outage while saving the rating"));
        }

        let id = Uuid::new_v4().to_string();
        info!(school_id = %payload.school_id, stars = payload.stars, receipt = %id, "⭐ Rating recorded");
        Ok(SubmissionReceipt {
            success: true,
            message: "تم حفظ تقييمك بنجاح".to_string(),
            id,
        })
    }
}
