//! Pure load-state transitions.

use shared::domain::CatalogEntry;

use crate::controller::events::LoadEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Before the first mount: nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded(Vec<CatalogEntry>),
    Failed,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        match self {
            Self::Loaded(entries) => entries,
            Self::Idle | Self::Loading | Self::Failed => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed => "failed",
        }
    }
}

pub fn reduce(_state: &LoadState, event: LoadEvent) -> LoadState {
    match event {
        LoadEvent::BeginLoad => LoadState::Loading,
        LoadEvent::LoadSucceeded(entries) => LoadState::Loaded(entries),
        LoadEvent::LoadFailed => LoadState::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::default_catalog;

    fn all_states() -> Vec<LoadState> {
        vec![
            LoadState::Idle,
            LoadState::Loading,
            LoadState::Loaded(default_catalog()),
            LoadState::Failed,
        ]
    }

    #[test]
    fn idle_is_neither_loading_nor_failed() {
        let state = LoadState::default();
        assert_eq!(state, LoadState::Idle);
        assert!(!state.is_loading());
        assert!(!state.is_error());
        assert!(state.entries().is_empty());
    }

    #[test]
    fn begin_load_clears_entries_and_error_from_any_state() {
        for state in all_states() {
            let next = reduce(&state, LoadEvent::BeginLoad);
            assert!(next.is_loading(), "from {}", state.label());
            assert!(!next.is_error());
            assert!(next.entries().is_empty());
        }
    }

    #[test]
    fn success_carries_entries_in_order() {
        let next = reduce(&LoadState::Loading, LoadEvent::LoadSucceeded(default_catalog()));
        assert!(!next.is_loading());
        assert!(!next.is_error());
        assert_eq!(next.entries(), default_catalog().as_slice());
    }

    #[test]
    fn success_with_no_entries_is_still_loaded() {
        let next = reduce(&LoadState::Loading, LoadEvent::LoadSucceeded(Vec::new()));
        assert_eq!(next, LoadState::Loaded(Vec::new()));
        assert!(next.entries().is_empty());
    }

    #[test]
    fn failure_sets_error_and_clears_entries() {
        let loaded = LoadState::Loaded(default_catalog());
        let next = reduce(&loaded, LoadEvent::LoadFailed);
        assert!(next.is_error());
        assert!(!next.is_loading());
        assert!(next.entries().is_empty());
    }

    #[test]
    fn exactly_one_flag_holds_per_state() {
        for state in all_states() {
            let loaded_with_data = !state.entries().is_empty();
            let flags = [state.is_loading(), state.is_error(), loaded_with_data];
            assert!(
                flags.iter().filter(|flag| **flag).count() <= 1,
                "state {} sets more than one flag",
                state.label()
            );
        }
    }
}
