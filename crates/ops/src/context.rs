//! Operations context for dependency injection

use pkgweb_client::PackageClient;
use pkgweb_config::Config;
use pkgweb_errors::{Error, OpsError};
use pkgweb_events::{EventEmitter, EventSender};
use pkgweb_tracker::StateTracker;
use std::fmt;
use std::sync::Arc;

/// Operations context providing access to the daemon and the tracker
pub struct OpsCtx {
    /// Package daemon client
    pub client: Arc<dyn PackageClient>,
    /// Operation state tracker, shared by every request
    pub tracker: StateTracker,
    /// Event sender for progress reporting
    pub tx: EventSender,
}

// No public constructor - use OpsContextBuilder instead

impl fmt::Debug for OpsCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpsCtx")
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for operations context
pub struct OpsContextBuilder {
    client: Option<Arc<dyn PackageClient>>,
    tracker: Option<StateTracker>,
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: None,
            tracker: None,
            tx: None,
            config: None,
        }
    }

    /// Set package daemon client
    #[must_use]
    pub fn with_client(mut self, client: impl PackageClient + 'static) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Set an already shared package daemon client
    #[must_use]
    pub fn with_shared_client(mut self, client: Arc<dyn PackageClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Use an existing tracker instead of building one from configuration
    #[must_use]
    pub fn with_tracker(mut self, tracker: StateTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// Without an explicit tracker one is created from the `[tracker]`
    /// configuration section and wired to the event sender.
    ///
    /// # Errors
    ///
    /// Returns an error if any required component is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let client = self.client.ok_or_else(|| OpsError::MissingComponent {
            component: "client".to_string(),
        })?;

        let tx = self.tx.ok_or_else(|| OpsError::MissingComponent {
            component: "event sender".to_string(),
        })?;

        let tracker = self.tracker.unwrap_or_else(|| {
            let config = self.config.unwrap_or_default();
            StateTracker::from_config(&config.tracker).with_event_sender(tx.clone())
        });

        Ok(OpsCtx {
            client,
            tracker,
            tx,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
