//! Reducer-style state store with one independent slot per page section
//!
//! Every transition is computed by the pure [`reduce`] function and published
//! as a fresh immutable [`StoreState`] snapshot. Slots that an action does not
//! touch are carried over as the same `Arc`, so consumers can detect changes
//! with `Arc::ptr_eq`.

use shared::{section_debug, SectionKey};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::SectionError;

/// Lifecycle slot for one section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<SectionError>,
    pub retry_count: u32,
    /// Bumped by every `BeginLoad` and `Reset`; stale responses carry an older value
    pub generation: u64,
}

impl<T> Default for SectionState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            retry_count: 0,
            generation: 0,
        }
    }
}

impl<T> SectionState<T> {
    /// No data, not loading, no error
    pub fn is_idle(&self) -> bool {
        self.data.is_none() && !self.loading && self.error.is_none()
    }
}

/// Transitions recognised by the store
#[derive(Debug, Clone, PartialEq)]
pub enum SectionAction<T> {
    SetLoading(bool),
    SetError(SectionError),
    ClearError,
    /// Stores the payload, clears loading and error, resets the retry count
    SetData(T),
    Reset,
    /// `SetLoading(true)` and `ClearError` in one step, opening a new generation
    BeginLoad,
    /// `SetError` that also counts a failed attempt
    Fail(SectionError),
}

impl<T> SectionAction<T> {
    pub fn name(&self) -> &'static str {
        match self {
            SectionAction::SetLoading(_) => "set_loading",
            SectionAction::SetError(_) => "set_error",
            SectionAction::ClearError => "clear_error",
            SectionAction::SetData(_) => "set_data",
            SectionAction::Reset => "reset",
            SectionAction::BeginLoad => "begin_load",
            SectionAction::Fail(_) => "fail",
        }
    }
}

/// An action addressed to one section
#[derive(Debug, Clone, PartialEq)]
pub struct Action<T> {
    pub section: SectionKey,
    pub kind: SectionAction<T>,
    /// When set, the action only applies if the slot is still at this generation
    pub expected_generation: Option<u64>,
}

impl<T> Action<T> {
    pub fn new(section: SectionKey, kind: SectionAction<T>) -> Self {
        Self {
            section,
            kind,
            expected_generation: None,
        }
    }

    pub fn at_generation(mut self, generation: u64) -> Self {
        self.expected_generation = Some(generation);
        self
    }

    pub fn set_loading(section: SectionKey, loading: bool) -> Self {
        Self::new(section, SectionAction::SetLoading(loading))
    }

    pub fn set_error(section: SectionKey, error: impl Into<SectionError>) -> Self {
        Self::new(section, SectionAction::SetError(error.into()))
    }

    pub fn clear_error(section: SectionKey) -> Self {
        Self::new(section, SectionAction::ClearError)
    }

    pub fn set_data(section: SectionKey, data: T) -> Self {
        Self::new(section, SectionAction::SetData(data))
    }

    pub fn reset(section: SectionKey) -> Self {
        Self::new(section, SectionAction::Reset)
    }
}

/// Immutable snapshot of every section slot
#[derive(Debug)]
pub struct StoreState<T> {
    sections: BTreeMap<SectionKey, Arc<SectionState<T>>>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            sections: BTreeMap::new(),
        }
    }
}

impl<T> Clone for StoreState<T> {
    fn clone(&self) -> Self {
        Self {
            sections: self.sections.clone(),
        }
    }
}

impl<T> StoreState<T> {
    /// Slot for a section that has received at least one action
    pub fn get(&self, section: SectionKey) -> Option<&Arc<SectionState<T>>> {
        self.sections.get(&section)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&SectionKey, &Arc<SectionState<T>>)> {
        self.sections.iter()
    }

    pub fn is_any_loading(&self) -> bool {
        self.sections.values().any(|slot| slot.loading)
    }
}

/// Compute the next snapshot, or `None` when the action changes nothing
pub fn reduce<T: Clone>(state: &StoreState<T>, action: &Action<T>) -> Option<StoreState<T>> {
    let idle = SectionState::default();
    let current = state.sections.get(&action.section).map(Arc::as_ref).unwrap_or(&idle);

    if let Some(expected) = action.expected_generation {
        if expected != current.generation {
            return None;
        }
    }

    let next = transition(current, &action.kind)?;
    let mut sections = state.sections.clone();
    sections.insert(action.section, Arc::new(next));
    Some(StoreState { sections })
}

fn transition<T: Clone>(current: &SectionState<T>, kind: &SectionAction<T>) -> Option<SectionState<T>> {
    let next = match kind {
        SectionAction::SetLoading(true) => {
            if current.loading {
                return None;
            }
            SectionState {
                loading: true,
                error: None,
                ..current.clone()
            }
        }
        SectionAction::SetLoading(false) => {
            if !current.loading {
                return None;
            }
            SectionState {
                loading: false,
                ..current.clone()
            }
        }
        SectionAction::SetError(error) => SectionState {
            loading: false,
            error: Some(error.clone()),
            ..current.clone()
        },
        SectionAction::ClearError => {
            current.error.as_ref()?;
            SectionState {
                error: None,
                ..current.clone()
            }
        }
        SectionAction::SetData(data) => SectionState {
            data: Some(data.clone()),
            loading: false,
            error: None,
            retry_count: 0,
            generation: current.generation,
        },
        // In-flight responses for the old generation must not repopulate the slot
        SectionAction::Reset => SectionState {
            generation: current.generation + 1,
            ..SectionState::default()
        },
        SectionAction::BeginLoad => SectionState {
            loading: true,
            error: None,
            generation: current.generation + 1,
            ..current.clone()
        },
        SectionAction::Fail(error) => SectionState {
            loading: false,
            error: Some(error.clone()),
            retry_count: current.retry_count + 1,
            ..current.clone()
        },
    };
    Some(next)
}

/// Shared owner of the current snapshot
///
/// The only mutation path is [`StateStore::dispatch`]; subscribers are notified
/// once per applied action.
pub struct StateStore<T> {
    sender: watch::Sender<Arc<StoreState<T>>>,
}

impl<T: Clone> Default for StateStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> StateStore<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(StoreState::default()));
        Self { sender }
    }

    /// Apply an action and return the resulting snapshot
    pub fn dispatch(&self, action: Action<T>) -> Arc<StoreState<T>> {
        self.try_dispatch(action).unwrap_or_else(|| self.snapshot())
    }

    /// Apply an action, returning `None` if it was a no-op
    pub fn try_dispatch(&self, action: Action<T>) -> Option<Arc<StoreState<T>>> {
        let mut applied = None;
        self.sender.send_if_modified(|state| match reduce(state, &action) {
            Some(next) => {
                let next = Arc::new(next);
                *state = Arc::clone(&next);
                applied = Some(next);
                true
            }
            None => false,
        });

        match &applied {
            Some(_) => {
                section_debug!(action.section, "Applied {}", action.kind.name());
            }
            None => {
                section_debug!(action.section, "Ignored {} (no change)", action.kind.name());
            }
        }
        applied
    }

    pub fn snapshot(&self) -> Arc<StoreState<T>> {
        Arc::clone(&self.sender.borrow())
    }

    /// Current slot for a section; untouched sections read as idle
    pub fn section(&self, section: SectionKey) -> Arc<SectionState<T>> {
        self.snapshot()
            .get(section)
            .cloned()
            .unwrap_or_else(|| Arc::new(SectionState::default()))
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<StoreState<T>>> {
        self.sender.subscribe()
    }
}
