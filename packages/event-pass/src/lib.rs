//! Access-state resolution for the event pass screen
//!
//! Given an event identifier, the [`AccessStateResolver`] looks up the
//! viewer, the event and the viewer's pass, and settles on exactly one
//! [`ViewState`] for the rendering layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use event_pass::{AccessStateResolver, ApiClient, Config, ResolverDeps};
//! use event_pass::console::{LoggingNavigator, StderrNotifier};
//!
//! let config = Config::from_env()?;
//! let api = Arc::new(ApiClient::from_config(&config)?);
//!
//! let resolver = AccessStateResolver::new(ResolverDeps {
//!     identity: api.clone(),
//!     events: api.clone(),
//!     passes: api,
//!     notifier: Arc::new(StderrNotifier),
//!     navigator: Arc::new(LoggingNavigator),
//! });
//!
//! let view = resolver.resolve(Some("evt-1")).await;
//! ```

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod resolver;
pub mod testing;
pub mod traits;
pub mod types;
pub mod view_state;

pub use client::ApiClient;
pub use config::Config;
pub use error::{ClientError, FetchError, FetchResult};
pub use resolver::{AccessStateResolver, ResolverDeps, DEFAULT_ROUTE};
pub use traits::{
    BaseEventService, BaseIdentityProvider, BaseNavigator, BaseNotifier, BasePassService,
};
pub use types::{EventId, EventRecord, Identity, PassRecord};
pub use view_state::{LoadingGuard, ViewSlot, ViewState};
