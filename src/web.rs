//! Browser bindings
//!
//! Exposes a tuner backed by LocalStorage. Results cross the boundary as
//! JSON strings (`BoostReport` / `FeedWeights`).

use wasm_bindgen::prelude::*;

use crate::engine::{self, BoostReport};
use crate::platform::LocalStorageStore;
use crate::settings::TunerConfig;
use crate::tuner::FeedTuner;
use crate::weights::Category;
use crate::WeightsError;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A second init (e.g. module re-instantiation) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebFeedTuner {
    inner: FeedTuner<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebFeedTuner {
    /// Open the tuner; `storage_key` scopes the record per user
    #[wasm_bindgen(constructor)]
    pub fn new(storage_key: Option<String>) -> WebFeedTuner {
        let config = storage_key
            .map(TunerConfig::with_storage_key)
            .unwrap_or_default();
        WebFeedTuner {
            inner: FeedTuner::open(LocalStorageStore, &config),
        }
    }

    /// Current distribution as JSON
    pub fn weights(&self) -> Result<String, JsValue> {
        to_json(self.inner.weights())
    }

    /// Boost a category by name; returns a `BoostReport` as JSON
    pub fn boost(&mut self, category: &str) -> Result<String, JsValue> {
        let result = category
            .parse::<Category>()
            .and_then(|c| self.inner.boost(c));
        if let Err(WeightsError::UnknownCategory(name)) = &result {
            log::warn!("Ignoring boost of unknown category {:?}", name);
        }
        to_json(&BoostReport::from(&result))
    }

    /// Boost report for a caller-supplied JSON distribution; storage untouched
    pub fn preview(&self, weights: &str, category: &str) -> Result<String, JsValue> {
        let result = serde_json::from_str::<serde_json::Value>(weights)
            .map_err(|e| WeightsError::InvalidDistribution(e.to_string()))
            .and_then(|value| {
                let category = category.parse::<Category>()?;
                engine::boost_json(&value, category, self.inner.policy())
            });
        to_json(&BoostReport::from(&result))
    }

    /// Restore defaults; returns the new distribution as JSON
    pub fn reset(&mut self) -> Result<String, JsValue> {
        to_json(self.inner.reset())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
