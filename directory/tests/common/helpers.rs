//! Test helpers for directory tests
//!
//! Canned provider calls and store assertions that keep the orchestrator
//! tests short.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use directory::core::SectionState;
use directory::traits::MockDataProvider;
use directory::{DirectoryError, DirectoryResult, FetchOrchestrator, StateStore};
use shared::{PageData, SchoolRecord, SectionKey};

/// A provider call usable with `FetchOrchestrator::load`
pub type TestCall<T> = Box<dyn Fn() -> BoxFuture<'static, DirectoryResult<T>> + Send + Sync>;

pub struct TestHelpers;

impl TestHelpers {
    /// Orchestrator over a fresh store
    pub fn orchestrator<T>() -> Arc<FetchOrchestrator<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        Arc::new(FetchOrchestrator::new(Arc::new(StateStore::new())))
    }

    /// Resolves with `value` after `delay`
    pub fn delayed<T>(value: T, delay: Duration) -> TestCall<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Box::new(move || {
            let value = value.clone();
            async move {
                tokio::time::sleep(delay).await;
                Ok(value)
            }
            .boxed()
        })
    }

    /// Resolves with `value` immediately
    pub fn ready<T>(value: T) -> TestCall<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Self::delayed(value, Duration::ZERO)
    }

    /// Always rejects with a load failure
    pub fn failing<T>(message: &str) -> TestCall<T>
    where
        T: Send + 'static,
    {
        let message = message.to_string();
        Box::new(move || {
            let message = message.clone();
            async move { Err(DirectoryError::load(message)) }.boxed()
        })
    }

    /// Fails the first `failures` invocations, then resolves with `value`;
    /// `calls` counts every invocation
    pub fn flaky<T>(value: T, failures: usize, calls: Arc<AtomicUsize>) -> TestCall<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Box::new(move || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            let value = value.clone();
            async move {
                if attempt < failures {
                    Err(DirectoryError::load(format!("attempt {} failed", attempt + 1)))
                } else {
                    Ok(value)
                }
            }
            .boxed()
        })
    }

    /// Mock provider answering `get_page_data` for any section with `records`
    pub fn mock_provider(records: Vec<SchoolRecord>) -> MockDataProvider {
        let mut provider = MockDataProvider::new();
        provider
            .expect_get_page_data()
            .returning(move |section| Ok(PageData::new(section, records.clone())))
            .times(0..);
        provider
    }

    /// Assert a slot finished loading with `expected`
    pub fn assert_loaded<T>(slot: &SectionState<T>, expected: &T)
    where
        T: PartialEq + Debug,
    {
        assert_eq!(slot.data.as_ref(), Some(expected));
        assert!(!slot.loading, "slot still loading");
        assert!(slot.error.is_none(), "unexpected error: {:?}", slot.error);
        assert_eq!(slot.retry_count, 0);
    }
}
