//! Persistence for the user-profile document.

use std::sync::Arc;

use tracing::warn;

use prep_core::model::UserProfile;
use storage::repository::KeyValueStore;

use crate::error::ProfileServiceError;

/// Store key for the profile document.
pub const PROFILE_KEY: &str = "user_profile";

/// Loads and saves the settings-screen profile.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored profile; missing or malformed data reads as the default.
    pub async fn load(&self) -> UserProfile {
        let raw = match self.store.get(PROFILE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return UserProfile::default(),
            Err(error) => {
                warn!(%error, "profile store unreadable; using defaults");
                return UserProfile::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%error, "stored profile malformed; using defaults");
            UserProfile::default()
        })
    }

    /// Replace the stored profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` if the document cannot be serialized
    /// or written.
    pub async fn save(&self, profile: &UserProfile) -> Result<(), ProfileServiceError> {
        let serialized = serde_json::to_string(profile)?;
        self.store.set(PROFILE_KEY, &serialized).await?;
        Ok(())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
