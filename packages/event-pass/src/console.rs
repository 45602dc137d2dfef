//! Terminal stand-ins for the notification and navigation collaborators.

use tracing::info;

use crate::traits::{BaseNavigator, BaseNotifier};

/// Writes notifications to stderr.
#[derive(Debug, Clone, Default)]
pub struct StderrNotifier;

impl BaseNotifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Logs navigation requests instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct LoggingNavigator;

impl BaseNavigator for LoggingNavigator {
    fn go_to(&self, path: &str) {
        info!(path = %path, "Navigation requested");
    }
}
