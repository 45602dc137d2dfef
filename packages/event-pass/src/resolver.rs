//! Access-state resolution for the pass screen.
//!
//! Lookups run strictly in order: identity, then event, then pass. The pass
//! lookup only happens for a signed-in viewer whose event lookup succeeded.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::FetchError;
use crate::traits::{
    BaseEventService, BaseIdentityProvider, BaseNavigator, BaseNotifier, BasePassService,
};
use crate::types::{EventId, Identity};
use crate::view_state::{ViewSlot, ViewState};

/// Route the resolver navigates to on `Redirect`.
pub const DEFAULT_ROUTE: &str = "/";

/// Collaborators the resolver depends on.
#[derive(Clone)]
pub struct ResolverDeps {
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub events: Arc<dyn BaseEventService>,
    pub passes: Arc<dyn BasePassService>,
    pub notifier: Arc<dyn BaseNotifier>,
    pub navigator: Arc<dyn BaseNavigator>,
}

/// Decides which [`ViewState`] the pass screen shows for an event.
#[derive(Clone)]
pub struct AccessStateResolver {
    deps: ResolverDeps,
    slot: Arc<ViewSlot>,
    default_route: String,
}

impl AccessStateResolver {
    pub fn new(deps: ResolverDeps) -> Self {
        Self {
            deps,
            slot: Arc::new(ViewSlot::new()),
            default_route: DEFAULT_ROUTE.to_string(),
        }
    }

    /// Set the route used for redirects.
    pub fn with_default_route(mut self, route: impl Into<String>) -> Self {
        self.default_route = route.into();
        self
    }

    /// Publish into an existing slot instead of a private one.
    pub fn with_slot(mut self, slot: Arc<ViewSlot>) -> Self {
        self.slot = slot;
        self
    }

    pub fn slot(&self) -> &Arc<ViewSlot> {
        &self.slot
    }

    /// Resolve the view for `raw_id`.
    ///
    /// Publishes `Loading` while lookups run and always finishes with a
    /// terminal state, which is both returned and written to the slot.
    #[tracing::instrument(skip(self), name = "resolve_access_state")]
    pub async fn resolve(&self, raw_id: Option<&str>) -> ViewState {
        let Some(id) = EventId::parse(raw_id) else {
            warn!("No event ID provided");
            self.deps.navigator.go_to(&self.default_route);
            self.slot.publish(ViewState::Redirect);
            return ViewState::Redirect;
        };

        let guard = self.slot.begin();
        let state = self.lookup(&id).await;
        if state == ViewState::Redirect {
            self.deps.navigator.go_to(&self.default_route);
        }

        info!(event_id = %id, view = state.kind(), "Resolved pass view");
        guard.commit(state)
    }

    async fn lookup(&self, id: &EventId) -> ViewState {
        let identity = self.deps.identity.current_identity().await;

        let event = match self.deps.events.get_event(id).await {
            Ok(event) => event,
            Err(err) => return self.on_failure(id, identity, err),
        };

        let Some(identity) = identity else {
            return ViewState::Unauthenticated { event };
        };

        match self.deps.passes.get_pass(id).await {
            Ok(Some(pass)) => ViewState::HasPass {
                identity,
                event,
                pass,
            },
            Ok(None) => ViewState::NoPass { identity, event },
            Err(FetchError::Unprocessable) => {
                debug!(event_id = %id, "No more passes available");
                ViewState::NoPass { identity, event }
            }
            Err(err) => self.on_failure(id, Some(identity), err),
        }
    }

    fn on_failure(&self, id: &EventId, identity: Option<Identity>, err: FetchError) -> ViewState {
        match err {
            FetchError::Forbidden => ViewState::Locked { identity },
            FetchError::NotFound => {
                debug!(event_id = %id, "Event not found");
                ViewState::Redirect
            }
            FetchError::Unprocessable | FetchError::Other(_) => {
                error!(event_id = %id, error = %err, "Lookup failed");
                self.deps.notifier.notify(&format!("Error: {}", err));
                ViewState::Redirect
            }
        }
    }
}
