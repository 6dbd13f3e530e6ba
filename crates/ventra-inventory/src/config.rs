//! Inventory client configuration.

use std::time::Duration;

/// Per-call timeout applied to every remote inventory request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Explicitly constructed configuration for the inventory client.
///
/// Passed in rather than read from process-wide state so tests can point the
/// client at a double.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Base URL of the inventory service, without a trailing slash.
    pub base_url: String,
    /// Optional shared secret sent on every call for service-to-service
    /// trust. Absence means calls go out unauthenticated; enforcing the
    /// secret is the remote service's policy.
    pub shared_secret: Option<String>,
    /// Timeout applied independently to each remote call.
    pub timeout: Duration,
}

impl InventoryConfig {
    /// Creates a config with the default 5 second per-call timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, shared_secret: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            shared_secret,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
