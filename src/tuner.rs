//! Feed tuner: the boost → persist control flow
//!
//! Holds the in-memory distribution, which stays authoritative for the
//! session even when a save fails.

use crate::engine::{self, BoostOutcome, BoostPolicy};
use crate::error::Result;
use crate::persistence::WeightStore;
use crate::platform::KeyValueStore;
use crate::settings::TunerConfig;
use crate::weights::{Category, FeedWeights};

pub struct FeedTuner<S> {
    store: WeightStore<S>,
    policy: BoostPolicy,
    weights: FeedWeights,
}

impl<S: KeyValueStore> FeedTuner<S> {
    /// Load the stored distribution (or defaults) from `backend`
    ///
    /// Categories stored below the policy floor are lifted to it and the
    /// repaired record is written back.
    pub fn open(backend: S, config: &TunerConfig) -> Self {
        let store = WeightStore::with_key(backend, config.storage_key.clone());
        let loaded = store.load();
        let weights = match engine::normalize(&loaded, &config.policy) {
            Ok(weights) => weights,
            Err(e) => {
                log::warn!("{}; keeping stored weights", e);
                loaded
            }
        };

        let mut tuner = Self {
            store,
            policy: config.policy,
            weights,
        };
        if weights != loaded {
            log::warn!(
                "Stored feed weights below the {}% floor; lifted to {:?}",
                config.policy.floor,
                weights
            );
            tuner.persist();
        }
        tuner
    }

    pub fn weights(&self) -> &FeedWeights {
        &self.weights
    }

    pub fn policy(&self) -> &BoostPolicy {
        &self.policy
    }

    pub fn store(&self) -> &WeightStore<S> {
        &self.store
    }

    /// Boost `category`, persisting the result when applied
    ///
    /// `LimitReached`, or a boost that rounds back to the same values, leaves
    /// storage untouched. Save failures are logged, never returned.
    pub fn boost(&mut self, category: Category) -> Result<BoostOutcome> {
        let outcome = engine::boost(&self.weights, category, &self.policy)?;
        match outcome {
            BoostOutcome::Applied(weights) if weights == self.weights => {
                log::info!("Boost of {} changed nothing after rounding", category.label());
            }
            BoostOutcome::Applied(weights) => {
                self.weights = weights;
                self.persist();
            }
            BoostOutcome::LimitReached(_) => {
                log::info!("{} is already at the limit", category.label());
            }
        }
        Ok(outcome)
    }

    /// Restore the default distribution
    pub fn reset(&mut self) -> &FeedWeights {
        self.weights = FeedWeights::default();
        self.persist();
        &self.weights
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.weights) {
            log::warn!("{} (keeping in-memory weights)", e);
        }
    }
}
