//! Fetch lifecycle orchestration
//!
//! Runs one provider round trip per section and reports every lifecycle step
//! into the injected [`StateStore`]. Failures never escape this boundary:
//! callers observe them through the section's `error` slot.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use shared::{section_debug, section_info, section_warn, PageData, RatingSubmission, SectionKey, SubmissionReceipt};

use crate::core::store::{Action, SectionAction, StateStore};
use crate::error::{DirectoryError, DirectoryResult, SectionError};
use crate::traits::DataProvider;

/// A re-invocable provider call bound to one section
pub type ProviderCall<T> = Arc<dyn Fn() -> BoxFuture<'static, DirectoryResult<T>> + Send + Sync>;

/// Call and timeout registered for a section, replayed together by `retry`
struct Registration<T> {
    call: ProviderCall<T>,
    timeout: Option<Duration>,
}

impl<T> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            call: Arc::clone(&self.call),
            timeout: self.timeout,
        }
    }
}

/// How a single load attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    Failed(SectionError),
    /// A newer load (or a reset) superseded this one; its result was discarded
    Stale,
}

/// Coordinates provider calls and section lifecycles
pub struct FetchOrchestrator<T> {
    /// Shared state, mutated only through dispatch
    store: Arc<StateStore<T>>,

    /// Default bound on provider latency
    timeout: Option<Duration>,

    /// Last call registered per section, replayed by `retry`
    calls: RwLock<HashMap<SectionKey, Registration<T>>>,
}

impl<T> FetchOrchestrator<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create new orchestrator reporting into the given store
    pub fn new(store: Arc<StateStore<T>>) -> Self {
        Self {
            store,
            timeout: None,
            calls: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<StateStore<T>> {
        &self.store
    }

    /// Load a section with the default timeout
    pub async fn load<F, Fut>(&self, section: SectionKey, call: F) -> LoadOutcome
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DirectoryResult<T>> + Send + 'static,
    {
        self.load_with_timeout(section, call, self.timeout).await
    }

    /// Load a section with a caller-supplied timeout
    pub async fn load_with_timeout<F, Fut>(&self, section: SectionKey, call: F, timeout: Option<Duration>) -> LoadOutcome
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DirectoryResult<T>> + Send + 'static,
    {
        let call: ProviderCall<T> = Arc::new(move || call().boxed());
        let registration = Registration {
            call: Arc::clone(&call),
            timeout,
        };
        self.calls.write().await.insert(section, registration);
        self.run(section, call, timeout).await
    }

    /// Re-run the last call registered for a section under its original timeout
    pub async fn retry(&self, section: SectionKey) -> DirectoryResult<LoadOutcome> {
        let registration = self
            .calls
            .read()
            .await
            .get(&section)
            .cloned()
            .ok_or(DirectoryError::UnknownSection { section })?;

        let attempts = self.store.section(section).retry_count;
        section_info!(section, "🔁 Manual retry after {} failed attempt(s)", attempts);
        Ok(self.run(section, registration.call, registration.timeout).await)
    }

    /// Run `load` on its own task so independent sections proceed concurrently
    pub fn spawn_load<F, Fut>(self: &Arc<Self>, section: SectionKey, call: F) -> JoinHandle<LoadOutcome>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DirectoryResult<T>> + Send + 'static,
    {
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move { orchestrator.load(section, call).await })
    }

    async fn run(&self, section: SectionKey, call: ProviderCall<T>, timeout: Option<Duration>) -> LoadOutcome {
        // BeginLoad always applies, so the returned snapshot holds our generation
        let state = self.store.dispatch(Action::new(section, SectionAction::BeginLoad));
        let generation = state.get(section).map(|slot| slot.generation).unwrap_or_default();
        section_debug!(section, "⏳ Loading (generation {})", generation);

        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, call()).await {
                Ok(result) => result,
                Err(_) => Err(DirectoryError::Timeout { timeout: limit }),
            },
            None => call().await,
        };

        let (action, outcome) = match result {
            Ok(data) => (Action::set_data(section, data), LoadOutcome::Loaded),
            Err(error) => {
                let section_error = SectionError::from(&error);
                (
                    Action::new(section, SectionAction::Fail(section_error.clone())),
                    LoadOutcome::Failed(section_error),
                )
            }
        };

        if self.store.try_dispatch(action.at_generation(generation)).is_none() {
            section_debug!(section, "🗑️  Discarded stale response for generation {}", generation);
            return LoadOutcome::Stale;
        }

        match &outcome {
            LoadOutcome::Loaded => {
                section_info!(section, "✅ Loaded");
            }
            LoadOutcome::Failed(error) => {
                section_warn!(section, kind = %error.kind, "❌ Load failed: {}", error.message);
            }
            LoadOutcome::Stale => {}
        }
        outcome
    }
}

impl FetchOrchestrator<PageData> {
    /// Load a page section straight from a data provider
    pub async fn load_page<P>(&self, provider: Arc<P>, section: SectionKey) -> LoadOutcome
    where
        P: DataProvider + ?Sized + 'static,
    {
        self.load(section, move || {
            let provider = Arc::clone(&provider);
            async move { provider.get_page_data(section).await }
        })
        .await
    }
}

impl FetchOrchestrator<SubmissionReceipt> {
    /// Submit a rating, tracking the round trip in the rating form section
    pub async fn submit_rating<P>(&self, provider: Arc<P>, payload: RatingSubmission) -> LoadOutcome
    where
        P: DataProvider + ?Sized + 'static,
    {
        self.load(SectionKey::RatingForm, move || {
            let provider = Arc::clone(&provider);
            let payload = payload.clone();
            async move { provider.submit_rating(payload).await }
        })
        .await
    }
}
