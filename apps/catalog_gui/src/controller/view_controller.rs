//! Owns the load state for one catalog view and applies backend results to it.

use std::{fmt, str::FromStr};

use client_core::CancelToken;
use tracing::{debug, error, info};

use crate::backend_bridge::commands::FetchRequest;
use crate::controller::{
    events::{LoadEvent, RequestId, UiEvent},
    reducer::{reduce, LoadState},
};
use crate::ui::list_view::{ListView, Screen};

/// What a rejected fetch does to the view state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and move to `Failed`.
    #[default]
    Transition,
    /// Log the failure and leave the state where it was.
    LogOnly,
}

impl FailurePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transition => "transition",
            Self::LogOnly => "log-only",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "transition" | "fail" => Ok(Self::Transition),
            "log-only" | "log_only" | "log" => Ok(Self::LogOnly),
            other => Err(format!(
                "unknown fetch failure policy '{other}' (expected 'transition' or 'log-only')"
            )),
        }
    }
}

/// What `ViewController::handle` did with a backend result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// The result moved the state machine.
    Applied,
    /// A failure was logged but the state was left alone.
    LoggedOnly,
    /// Stale or arrived after teardown.
    Dropped,
}

struct PendingFetch {
    request_id: RequestId,
    cancel: CancelToken,
}

pub struct ViewController {
    state: LoadState,
    policy: FailurePolicy,
    next_request: u64,
    pending: Option<PendingFetch>,
    torn_down: bool,
}

impl ViewController {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            state: LoadState::default(),
            policy,
            next_request: 0,
            pending: None,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Enters `Loading` and returns the request the backend should run.
    ///
    /// Any fetch still pending from an earlier mount is cancelled.
    pub fn mount(&mut self) -> FetchRequest {
        if let Some(previous) = self.pending.take() {
            previous.cancel.cancel();
            debug!(request_id = previous.request_id.0, "superseded pending catalog fetch");
        }

        self.torn_down = false;
        self.next_request += 1;
        let request = FetchRequest {
            request_id: RequestId(self.next_request),
            cancel: CancelToken::new(),
        };

        self.dispatch(LoadEvent::BeginLoad);
        self.pending = Some(PendingFetch {
            request_id: request.request_id,
            cancel: request.cancel.clone(),
        });
        info!(request_id = request.request_id.0, "catalog load started");
        request
    }

    pub fn handle(&mut self, event: UiEvent) -> HandleOutcome {
        if self.torn_down {
            debug!(
                request_id = event.request_id().0,
                "dropping catalog result after teardown"
            );
            return HandleOutcome::Dropped;
        }

        let expected = self.pending.as_ref().map(|pending| pending.request_id);
        if expected != Some(event.request_id()) {
            debug!(
                request_id = event.request_id().0,
                expected = ?expected.map(|id| id.0),
                "dropping stale catalog result"
            );
            return HandleOutcome::Dropped;
        }
        self.pending = None;

        match event {
            UiEvent::CatalogLoaded { entries, .. } => {
                info!(count = entries.len(), "catalog load succeeded");
                self.dispatch(LoadEvent::LoadSucceeded(entries));
                HandleOutcome::Applied
            }
            UiEvent::CatalogFailed { error, .. } => {
                error!(
                    code = ?error.code(),
                    policy = %self.policy,
                    "catalog fetch failed: {error}"
                );
                match self.policy {
                    FailurePolicy::Transition => {
                        self.dispatch(LoadEvent::LoadFailed);
                        HandleOutcome::Applied
                    }
                    FailurePolicy::LogOnly => HandleOutcome::LoggedOnly,
                }
            }
        }
    }

    /// Cancels the pending fetch; results arriving afterwards are ignored.
    pub fn teardown(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
            debug!(request_id = pending.request_id.0, "cancelled catalog fetch on teardown");
        }
        self.torn_down = true;
    }

    pub fn screen(&self) -> Screen {
        if self.state.is_loading() {
            Screen::Loading
        } else {
            Screen::List(ListView::from_entries(self.state.entries()))
        }
    }

    fn dispatch(&mut self, event: LoadEvent) {
        let name = event.name();
        let next = reduce(&self.state, event);
        debug!(
            event = name,
            from = self.state.label(),
            to = next.label(),
            "load state transition"
        );
        self.state = next;
    }
}

#[cfg(test)]
#[path = "../tests/view_controller_tests.rs"]
mod tests;
