//! Feed Weights - category weighting for a social feed
//!
//! Core modules:
//! - `weights`: The four-category percentage distribution
//! - `engine`: Boost redistribution (pure, deterministic)
//! - `persistence`: Load/save with default fallback and repair
//! - `platform`: Key-value storage backends (LocalStorage on web, files on native)
//! - `tuner`: Boost → persist control flow
//! - `settings`: Tuner configuration

pub mod engine;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod tuner;
pub mod weights;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{BoostOutcome, BoostPolicy, BoostReport, boost};
pub use error::{StorageError, WeightsError};
pub use persistence::WeightStore;
pub use settings::TunerConfig;
pub use tuner::FeedTuner;
pub use weights::{Category, FeedWeights};
