//! Service-specific tests


// Common test utilities for services
#[cfg(test)]
pub mod common {
    use shared::{CriterionScore, ProviderSettings, RatingSubmission};

    /// Provider settings with no latency and no failures
    pub fn instant_settings() -> ProviderSettings {
        ProviderSettings {
            latency_ms: 0,
            failure_rate: 0.0,
        }
    }

    pub fn failing_settings() -> ProviderSettings {
        ProviderSettings {
            latency_ms: 0,
            failure_rate: 1.0,
        }
    }

    pub fn rating(school_id: &str, stars: u8) -> RatingSubmission {
        RatingSubmission {
            school_id: school_id.to_string(),
            stars,
            criteria: vec![CriterionScore::new("جودة التعليم", 80.0).expect("Valid criterion")],
            comment: Some("مدرسة ممتازة".to_string()),
        }
    }
}
