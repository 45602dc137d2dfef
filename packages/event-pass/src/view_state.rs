//! View states and the slot the rendering layer watches.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

use crate::types::{EventRecord, Identity, PassRecord};

/// What the pass screen should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewState {
    /// A resolution is in progress
    Loading,
    /// Leave the screen for the default route
    Redirect,
    /// The event exists but nobody is signed in
    Unauthenticated { event: EventRecord },
    HasPass {
        identity: Identity,
        event: EventRecord,
        pass: PassRecord,
    },
    NoPass { identity: Identity, event: EventRecord },
    /// Pass issuance for the event is closed
    Locked { identity: Option<Identity> },
}

impl ViewState {
    pub fn kind(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Redirect => "redirect",
            ViewState::Unauthenticated { .. } => "unauthenticated",
            ViewState::HasPass { .. } => "has_pass",
            ViewState::NoPass { .. } => "no_pass",
            ViewState::Locked { .. } => "locked",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }
}

/// Holds the current [`ViewState`] and whether a resolution is running.
///
/// Every resolution writes its terminal state here; when resolutions
/// overlap, the one that finishes last wins.
#[derive(Debug)]
pub struct ViewSlot {
    state: watch::Sender<ViewState>,
    in_flight: AtomicUsize,
}

impl Default for ViewSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSlot {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            state,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// True while at least one resolution holds a [`LoadingGuard`].
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Publish `Loading` and mark a resolution as in progress until the
    /// returned guard is dropped.
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let previous = self.state.send_replace(ViewState::Loading);
        LoadingGuard {
            slot: self,
            previous,
            committed: false,
        }
    }

    pub(crate) fn publish(&self, state: ViewState) {
        self.state.send_replace(state);
    }
}

/// Scoped "resolution in progress" marker.
///
/// Released on drop, so every exit path of a resolution (including a
/// cancelled future) clears it. A guard dropped without [`commit`] that was
/// the last one in flight replaces a lingering `Loading` with the terminal
/// state seen before it began, or `Redirect` if there was none.
///
/// [`commit`]: LoadingGuard::commit
#[must_use = "dropping the guard immediately ends the resolution"]
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    slot: &'a ViewSlot,
    previous: ViewState,
    committed: bool,
}

impl LoadingGuard<'_> {
    /// Publish the terminal state and release the guard.
    pub fn commit(mut self, state: ViewState) -> ViewState {
        self.slot.publish(state.clone());
        self.committed = true;
        state
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let remaining = self.slot.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        if self.committed || remaining > 0 {
            return;
        }

        let fallback = if self.previous.is_terminal() {
            std::mem::replace(&mut self.previous, ViewState::Loading)
        } else {
            ViewState::Redirect
        };
        self.slot.state.send_if_modified(|current| {
            if current.is_terminal() {
                return false;
            }
            *current = fallback;
            true
        });
    }
}
