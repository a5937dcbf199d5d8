//! Feed weight persistence
//!
//! Stores the distribution as a JSON object under a single fixed key.
//! Reads never fail: missing or corrupt records fall back to defaults,
//! partially valid records are repaired key by key.

use crate::error::{Result, WeightsError};
use crate::platform::KeyValueStore;
use crate::weights::FeedWeights;

/// Default storage key
pub const STORAGE_KEY: &str = "feed_weights";

/// Load/save of `FeedWeights` over an injected key-value store
#[derive(Debug)]
pub struct WeightStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> WeightStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn into_backend(self) -> S {
        self.store
    }

    /// Load the stored distribution, falling back to defaults
    pub fn load(&self) -> FeedWeights {
        match self.try_load() {
            Ok(Some(weights)) => weights,
            Ok(None) => {
                log::info!("No stored feed weights, using defaults");
                FeedWeights::default()
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                FeedWeights::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<FeedWeights>> {
        let bytes = match self.store.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(None),
            Err(e) => return Err(WeightsError::PersistenceReadCorrupt(e.to_string())),
        };

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| WeightsError::PersistenceReadCorrupt(e.to_string()))?;

        let defaults = FeedWeights::default();
        let (weights, filled) = FeedWeights::repair_from_json_value(&value, &defaults)
            .ok_or_else(|| {
                WeightsError::PersistenceReadCorrupt("record is not a JSON object".to_string())
            })?;

        if !filled.is_empty() {
            log::warn!("Stored feed weights missing {:?}; filled from defaults", filled);
        }

        weights.validate().map_err(|e| {
            WeightsError::PersistenceReadCorrupt(format!("repaired record unusable: {}", e))
        })?;

        log::info!("Loaded feed weights from storage");
        Ok(Some(weights))
    }

    /// Overwrite the stored distribution
    pub fn save(&mut self, weights: &FeedWeights) -> Result<()> {
        let json = serde_json::to_vec(weights).map_err(|e| {
            WeightsError::PersistenceWriteFailed(crate::error::StorageError::Unavailable(
                e.to_string(),
            ))
        })?;
        self.store
            .set(&self.key, &json)
            .map_err(WeightsError::PersistenceWriteFailed)?;
        log::info!("Feed weights saved");
        Ok(())
    }

    /// Drop the stored record; the next load yields defaults
    pub fn clear(&mut self) -> Result<()> {
        self.store
            .remove(&self.key)
            .map_err(WeightsError::PersistenceWriteFailed)
    }
}
