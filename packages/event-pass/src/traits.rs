// Collaborator traits for dependency injection
//
// The resolver only talks to the outside world through these. Lookup
// services return classified failures; UI side effects are fire-and-forget.
//
// Naming convention: Base* for trait names (e.g., BaseEventService)

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::{EventId, EventRecord, Identity, PassRecord};

// =============================================================================
// Lookup services
// =============================================================================

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// The current viewer, or `None` when anonymous. Never fails.
    async fn current_identity(&self) -> Option<Identity>;
}

#[async_trait]
pub trait BaseEventService: Send + Sync {
    /// Fetch an event. Fails with `Forbidden`, `NotFound` or `Other`.
    async fn get_event(&self, id: &EventId) -> FetchResult<EventRecord>;
}

#[async_trait]
pub trait BasePassService: Send + Sync {
    /// Fetch the viewer's pass for an event. `Ok(None)` means the viewer has
    /// no pass; `Unprocessable` means none are available.
    async fn get_pass(&self, id: &EventId) -> FetchResult<Option<PassRecord>>;
}

// =============================================================================
// UI side effects
// =============================================================================

pub trait BaseNotifier: Send + Sync {
    /// Show a message to the viewer
    fn notify(&self, message: &str);
}

pub trait BaseNavigator: Send + Sync {
    /// Request navigation to `path`. Completion is not awaited.
    fn go_to(&self, path: &str);
}
