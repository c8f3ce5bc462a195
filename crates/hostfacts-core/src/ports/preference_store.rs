//! Platform preference store port.

use async_trait::async_trait;

use super::PreferenceError;

/// Reads scalar values from the platform preference store.
///
/// `domain` is either a bundle identifier (`com.apple.screensaver`) or an
/// absolute plist path without extension
/// (`/Library/Preferences/com.apple.alf`).
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read one key. An unset key is `Ok(None)`, not an error.
    async fn read(&self, domain: &str, key: &str) -> Result<Option<String>, PreferenceError>;
}
