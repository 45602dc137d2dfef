//! Testing utilities including mock implementations.
//!
//! These let the resolver run without real identity, event, notification
//! or navigation services. Every mock writes to a shared [`CallLog`] so tests
//! can assert on the order of calls across collaborators.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::FetchResult;
use crate::resolver::{AccessStateResolver, ResolverDeps};
use crate::traits::{
    BaseEventService, BaseIdentityProvider, BaseNavigator, BaseNotifier, BasePassService,
};
use crate::types::{EventId, EventRecord, Identity, PassRecord};

/// Record of a call made to one of the mocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Identity,
    Event { id: String },
    Pass { id: String },
    Notify { message: String },
    GoTo { path: String },
}

/// Ordered log shared by all mocks of one [`MockCollaborators`].
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Get all calls in the order they were made.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

// =============================================================================
// Mock Identity Provider
// =============================================================================

#[derive(Clone)]
pub struct MockIdentityProvider {
    identity: Arc<Mutex<Option<Identity>>>,
    log: CallLog,
}

impl MockIdentityProvider {
    pub fn new(log: CallLog) -> Self {
        Self {
            identity: Arc::new(Mutex::new(None)),
            log,
        }
    }

    /// Set the viewer returned from now on (`None` for anonymous).
    pub fn set_identity(&self, identity: Option<Identity>) {
        *self.identity.lock().unwrap() = identity;
    }

    pub fn call_count(&self) -> usize {
        self.log
            .calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Identity))
            .count()
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    async fn current_identity(&self) -> Option<Identity> {
        self.log.record(MockCall::Identity);
        self.identity.lock().unwrap().clone()
    }
}

// =============================================================================
// Mock Event + Pass Service
// =============================================================================

/// Serves both event and pass lookups with canned responses.
///
/// Without a configured event response, any id resolves to an event named
/// after it. Without a configured pass response, the viewer has no pass.
#[derive(Clone)]
pub struct MockEventService {
    event: Arc<Mutex<Option<FetchResult<EventRecord>>>>,
    pass: Arc<Mutex<FetchResult<Option<PassRecord>>>>,
    log: CallLog,
}

impl MockEventService {
    pub fn new(log: CallLog) -> Self {
        Self {
            event: Arc::new(Mutex::new(None)),
            pass: Arc::new(Mutex::new(Ok(None))),
            log,
        }
    }

    pub fn set_event(&self, response: FetchResult<EventRecord>) {
        *self.event.lock().unwrap() = Some(response);
    }

    pub fn set_pass(&self, response: FetchResult<Option<PassRecord>>) {
        *self.pass.lock().unwrap() = response;
    }

    pub fn event_call_count(&self) -> usize {
        self.log
            .calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Event { .. }))
            .count()
    }

    pub fn pass_call_count(&self) -> usize {
        self.log
            .calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Pass { .. }))
            .count()
    }
}

#[async_trait]
impl BaseEventService for MockEventService {
    async fn get_event(&self, id: &EventId) -> FetchResult<EventRecord> {
        self.log.record(MockCall::Event {
            id: id.to_string(),
        });
        match self.event.lock().unwrap().clone() {
            Some(response) => response,
            None => Ok(EventRecord::new(id.as_str(), format!("Event {}", id))),
        }
    }
}

#[async_trait]
impl BasePassService for MockEventService {
    async fn get_pass(&self, id: &EventId) -> FetchResult<Option<PassRecord>> {
        self.log.record(MockCall::Pass {
            id: id.to_string(),
        });
        self.pass.lock().unwrap().clone()
    }
}

// =============================================================================
// Recording UI collaborators
// =============================================================================

#[derive(Clone)]
pub struct RecordingNotifier {
    log: CallLog,
}

impl RecordingNotifier {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    /// Messages shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.log
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Notify { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl BaseNotifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.log.record(MockCall::Notify {
            message: message.to_string(),
        });
    }
}

#[derive(Clone)]
pub struct RecordingNavigator {
    log: CallLog,
}

impl RecordingNavigator {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    /// Paths navigated to so far.
    pub fn destinations(&self) -> Vec<String> {
        self.log
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::GoTo { path } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl BaseNavigator for RecordingNavigator {
    fn go_to(&self, path: &str) {
        self.log.record(MockCall::GoTo {
            path: path.to_string(),
        });
    }
}

// =============================================================================
// Bundle
// =============================================================================

/// One of each mock, sharing a single call log.
#[derive(Clone)]
pub struct MockCollaborators {
    pub log: CallLog,
    pub identity: MockIdentityProvider,
    pub events: MockEventService,
    pub notifier: RecordingNotifier,
    pub navigator: RecordingNavigator,
}

impl Default for MockCollaborators {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCollaborators {
    /// Anonymous viewer, every event exists, no pass.
    pub fn new() -> Self {
        let log = CallLog::new();
        Self {
            identity: MockIdentityProvider::new(log.clone()),
            events: MockEventService::new(log.clone()),
            notifier: RecordingNotifier::new(log.clone()),
            navigator: RecordingNavigator::new(log.clone()),
            log,
        }
    }

    /// Start with a signed-in viewer (builder pattern).
    pub fn signed_in(self, identity: Identity) -> Self {
        self.identity.set_identity(Some(identity));
        self
    }

    pub fn deps(&self) -> ResolverDeps {
        ResolverDeps {
            identity: Arc::new(self.identity.clone()),
            events: Arc::new(self.events.clone()),
            passes: Arc::new(self.events.clone()),
            notifier: Arc::new(self.notifier.clone()),
            navigator: Arc::new(self.navigator.clone()),
        }
    }

    /// Resolver wired to these mocks.
    pub fn resolver(&self) -> AccessStateResolver {
        AccessStateResolver::new(self.deps())
    }

    /// Number of identity, event and pass lookups made.
    pub fn fetch_count(&self) -> usize {
        self.identity.call_count() + self.events.event_call_count() + self.events.pass_call_count()
    }
}
