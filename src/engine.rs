//! Boost redistribution
//!
//! Shifts feed emphasis toward one category while keeping the distribution
//! valid. Pure computation: no I/O, no randomness.
//!
//! The boosted category gains a fixed step (capped at the ceiling). The
//! other three give up that mass in proportion to their current share, each
//! floored so no category ever disappears. Rounding drift is absorbed by the
//! boosted category so the total stays exactly 100.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeightsError};
use crate::weights::{Category, FeedWeights};

/// Tunable limits for a boost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostPolicy {
    /// Points added to the boosted category per boost
    pub step: u32,
    /// Highest value a boost may leave any category at
    pub ceiling: u32,
    /// Lowest value a boost may leave a non-boosted category at
    pub floor: u32,
    /// Pull the boosted category back under the ceiling if drift correction
    /// pushed it over; the overflow goes to the largest other category
    pub reclamp_ceiling: bool,
}

impl Default for BoostPolicy {
    fn default() -> Self {
        Self {
            step: 10,
            ceiling: 70,
            floor: 5,
            reclamp_ceiling: true,
        }
    }
}

/// Result of a well-formed boost request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostOutcome {
    /// New distribution to adopt and persist
    Applied(FeedWeights),
    /// Category already at or above the ceiling; distribution unchanged
    LimitReached(FeedWeights),
}

impl BoostOutcome {
    pub fn weights(&self) -> &FeedWeights {
        match self {
            BoostOutcome::Applied(w) | BoostOutcome::LimitReached(w) => w,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, BoostOutcome::Applied(_))
    }
}

/// Wire form of a boost result for the presentation layer
///
/// `{"ok":true,"weights":{...}}` on success, `{"ok":false,"reason":"..."}`
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostReport {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<FeedWeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BoostReport {
    pub const LIMIT_REACHED: &'static str = "limit-reached";
}

impl From<&Result<BoostOutcome>> for BoostReport {
    fn from(result: &Result<BoostOutcome>) -> Self {
        match result {
            Ok(BoostOutcome::Applied(w)) => Self {
                ok: true,
                weights: Some(*w),
                reason: None,
            },
            Ok(BoostOutcome::LimitReached(_)) => Self {
                ok: false,
                weights: None,
                reason: Some(Self::LIMIT_REACHED.to_string()),
            },
            Err(e) => Self {
                ok: false,
                weights: None,
                reason: Some(e.reason().to_string()),
            },
        }
    }
}

/// Round to nearest integer, halves toward +inf
#[inline]
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Boost `target` within `current`
///
/// Fails with `InvalidDistribution` (and mutates nothing) when `current` is
/// not a valid distribution or has a category below the policy floor.
pub fn boost(current: &FeedWeights, target: Category, policy: &BoostPolicy) -> Result<BoostOutcome> {
    current.validate()?;
    if let Some((category, value)) = current.iter().find(|&(_, v)| v < policy.floor) {
        return Err(WeightsError::InvalidDistribution(format!(
            "{} is at {}, below the floor of {}",
            category, value, policy.floor
        )));
    }

    let current_value = current.get(target);
    let new_target = current_value.saturating_add(policy.step).min(policy.ceiling);
    if new_target <= current_value {
        log::debug!(
            "Boost of {} refused: already at {} (ceiling {})",
            target,
            current_value,
            policy.ceiling
        );
        return Ok(BoostOutcome::LimitReached(*current));
    }
    let added = (new_target - current_value) as f64;

    let others_total: u32 = target.others().map(|c| current.get(c)).sum();
    if others_total == 0 {
        return Err(WeightsError::InvalidDistribution(format!(
            "no weight outside {} to redistribute",
            target
        )));
    }
    let others_total = others_total as f64;

    let mut values = [0i64; 4];
    for (i, category) in Category::ALL.into_iter().enumerate() {
        values[i] = if category == target {
            new_target as i64
        } else {
            let value = current.get(category) as f64;
            round_half_up(value - added * (value / others_total)).max(policy.floor as i64)
        };
    }

    let target_index = index_of(target);
    let drift = FeedWeights::TOTAL as i64 - values.iter().sum::<i64>();
    values[target_index] += drift;

    let ceiling = policy.ceiling as i64;
    if policy.reclamp_ceiling && values[target_index] > ceiling {
        let overflow = values[target_index] - ceiling;
        values[target_index] = ceiling;
        let largest = largest_other(&values, target_index);
        values[largest] += overflow;
    }

    if values[target_index] < 0 {
        return Err(WeightsError::InvalidDistribution(format!(
            "floor of {} leaves no room for {}",
            policy.floor, target
        )));
    }

    let mut result = *current;
    for (i, category) in Category::ALL.into_iter().enumerate() {
        result.set(category, values[i] as u32);
    }

    log::debug!(
        "Boosted {}: {:?} -> {:?} (drift {})",
        target,
        current,
        result,
        drift
    );
    Ok(BoostOutcome::Applied(result))
}

/// Boost a caller-supplied distribution given as JSON
///
/// The record must carry all four keys as integers in 0..=100.
pub fn boost_json(
    current: &serde_json::Value,
    target: Category,
    policy: &BoostPolicy,
) -> Result<BoostOutcome> {
    let weights = FeedWeights::from_json_value(current)?;
    boost(&weights, target, policy)
}

/// Lift every category to at least the policy floor
///
/// Points are taken one at a time from the largest category, so a valid
/// distribution stays at 100. Fails when four floors do not fit in 100.
pub fn normalize(weights: &FeedWeights, policy: &BoostPolicy) -> Result<FeedWeights> {
    weights.validate()?;
    if policy.floor.saturating_mul(Category::ALL.len() as u32) > FeedWeights::TOTAL {
        return Err(WeightsError::InvalidDistribution(format!(
            "floor of {} leaves no valid distribution",
            policy.floor
        )));
    }

    let mut result = *weights;
    for category in Category::ALL {
        while result.get(category) < policy.floor {
            // Some category is above the floor while this one is below it
            let donor = result.dominant();
            result.set(donor, result.get(donor) - 1);
            result.set(category, result.get(category) + 1);
        }
    }
    Ok(result)
}

fn index_of(category: Category) -> usize {
    Category::ALL
        .iter()
        .position(|&c| c == category)
        .unwrap_or_default()
}

/// Index of the largest value other than `skip` (first on ties)
fn largest_other(values: &[i64; 4], skip: usize) -> usize {
    let mut best: Option<usize> = None;
    for i in (0..values.len()).filter(|&i| i != skip) {
        if best.is_none_or(|b| values[i] > values[b]) {
            best = Some(i);
        }
    }
    best.unwrap_or_default()
}
