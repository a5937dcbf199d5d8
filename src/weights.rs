//! Feed category weights
//!
//! Four integer percentages, one per feed source, that always sum to 100.

use serde::{Deserialize, Serialize};

use crate::error::WeightsError;

/// Feed source categories (closed set, fixed order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Family,
    Communities,
    Trending,
    Chronological,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::Family,
        Category::Communities,
        Category::Trending,
        Category::Chronological,
    ];

    /// Storage key for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Family => "family",
            Category::Communities => "communities",
            Category::Trending => "trending",
            Category::Chronological => "chronological",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "family" => Some(Category::Family),
            "communities" | "community" => Some(Category::Communities),
            "trending" => Some(Category::Trending),
            "chronological" | "chrono" => Some(Category::Chronological),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Family => "Family",
            Category::Communities => "Communities",
            Category::Trending => "Trending",
            Category::Chronological => "Chronological",
        }
    }

    /// The three categories other than `self`, in display order
    pub fn others(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| c != self)
    }
}

impl std::str::FromStr for Category {
    type Err = WeightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_str(s).ok_or_else(|| WeightsError::UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage distribution across the four feed categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedWeights {
    pub family: u32,
    pub communities: u32,
    pub trending: u32,
    pub chronological: u32,
}

impl Default for FeedWeights {
    fn default() -> Self {
        Self {
            family: 40,
            communities: 30,
            trending: 20,
            chronological: 10,
        }
    }
}

impl FeedWeights {
    /// Target total of a valid distribution
    pub const TOTAL: u32 = 100;

    pub fn new(family: u32, communities: u32, trending: u32, chronological: u32) -> Self {
        Self {
            family,
            communities,
            trending,
            chronological,
        }
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Family => self.family,
            Category::Communities => self.communities,
            Category::Trending => self.trending,
            Category::Chronological => self.chronological,
        }
    }

    pub fn set(&mut self, category: Category, value: u32) {
        match category {
            Category::Family => self.family = value,
            Category::Communities => self.communities = value,
            Category::Trending => self.trending = value,
            Category::Chronological => self.chronological = value,
        }
    }

    /// (category, value) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Sum of all four values; saturates instead of wrapping
    pub fn total(&self) -> u32 {
        self.iter().fold(0u32, |acc, (_, v)| acc.saturating_add(v))
    }

    /// Largest category (first in display order on ties)
    pub fn dominant(&self) -> Category {
        let mut best = Category::Family;
        for (category, value) in self.iter() {
            if value > self.get(best) {
                best = category;
            }
        }
        best
    }

    /// Check the distribution sums to 100 and no category holds all of it
    ///
    /// A category at 100 leaves nothing to take a boost from, so it is
    /// rejected alongside bad totals.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let total = self.total();
        if total != Self::TOTAL {
            return Err(WeightsError::InvalidDistribution(format!(
                "weights must sum to {}, got {}",
                Self::TOTAL,
                total
            )));
        }
        if let Some((category, _)) = self.iter().find(|&(_, v)| v == Self::TOTAL) {
            return Err(WeightsError::InvalidDistribution(format!(
                "{} holds the entire feed",
                category
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Strict parse of a JSON object with all four integer keys
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, WeightsError> {
        let object = value.as_object().ok_or_else(|| {
            WeightsError::InvalidDistribution("expected a JSON object".to_string())
        })?;

        let mut weights = Self::default();
        for category in Category::ALL {
            let raw = object.get(category.as_str()).ok_or_else(|| {
                WeightsError::InvalidDistribution(format!("missing key `{}`", category))
            })?;
            let value = parse_percentage(raw).ok_or_else(|| {
                WeightsError::InvalidDistribution(format!(
                    "`{}` is not an integer in 0..=100: {}",
                    category, raw
                ))
            })?;
            weights.set(category, value);
        }
        Ok(weights)
    }

    /// Lenient parse: keys missing or malformed are taken from `fallback`
    ///
    /// Returns the repaired weights and the categories that were filled in.
    pub fn repair_from_json_value(
        value: &serde_json::Value,
        fallback: &FeedWeights,
    ) -> Option<(Self, Vec<Category>)> {
        let object = value.as_object()?;

        let mut weights = *fallback;
        let mut filled = Vec::new();
        for category in Category::ALL {
            match object.get(category.as_str()).and_then(parse_percentage) {
                Some(v) => weights.set(category, v),
                None => filled.push(category),
            }
        }
        Some((weights, filled))
    }
}

/// Accept integral JSON numbers in 0..=100
fn parse_percentage(value: &serde_json::Value) -> Option<u32> {
    value
        .as_u64()
        .filter(|&v| v <= FeedWeights::TOTAL as u64)
        .map(|v| v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_distribution() {
        let w = FeedWeights::default();
        assert_eq!(w, FeedWeights::new(40, 30, 20, 10));
        assert_eq!(w.total(), 100);
        assert!(w.is_valid());
        assert_eq!(w.dominant(), Category::Family);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from_str("Family"), Some(Category::Family));
        assert_eq!(Category::from_str(" trending "), Some(Category::Trending));
        assert_eq!(Category::from_str("chrono"), Some(Category::Chronological));
        assert_eq!(Category::from_str("memes"), None);

        let parsed: Result<Category, _> = "memes".parse();
        assert!(matches!(parsed, Err(WeightsError::UnknownCategory(_))));
    }

    #[test]
    fn test_others_excludes_target() {
        let others: Vec<_> = Category::Trending.others().collect();
        assert_eq!(
            others,
            vec![Category::Family, Category::Communities, Category::Chronological]
        );
    }

    #[test]
    fn test_validate_rejects_bad_totals() {
        assert!(FeedWeights::new(40, 30, 20, 20).validate().is_err());
        assert!(FeedWeights::new(0, 0, 0, 0).validate().is_err());
        assert!(FeedWeights::new(100, 0, 0, 0).validate().is_err());
        assert!(FeedWeights::new(97, 1, 1, 1).validate().is_ok());
    }

    #[test]
    fn test_total_saturates() {
        // Would wrap to exactly 100 with plain u32 addition
        let w = FeedWeights::new(u32::MAX, 101, 0, 0);
        assert_eq!(w.total(), u32::MAX);
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_dominant_prefers_display_order_on_ties() {
        let w = FeedWeights::new(10, 40, 40, 10);
        assert_eq!(w.dominant(), Category::Communities);
    }

    #[test]
    fn test_serializes_with_lowercase_keys() {
        let json = serde_json::to_value(FeedWeights::default()).unwrap();
        assert_eq!(
            json,
            json!({"family": 40, "communities": 30, "trending": 20, "chronological": 10})
        );
    }

    #[test]
    fn test_strict_parse() {
        let ok = json!({"family": 25, "communities": 25, "trending": 25, "chronological": 25});
        assert_eq!(
            FeedWeights::from_json_value(&ok).unwrap(),
            FeedWeights::new(25, 25, 25, 25)
        );

        let missing = json!({"family": 25, "communities": 25, "trending": 50});
        assert!(matches!(
            FeedWeights::from_json_value(&missing),
            Err(WeightsError::InvalidDistribution(_))
        ));

        let non_numeric = json!({"family": "lots", "communities": 25, "trending": 25, "chronological": 25});
        assert!(FeedWeights::from_json_value(&non_numeric).is_err());

        let negative = json!({"family": -5, "communities": 35, "trending": 35, "chronological": 35});
        assert!(FeedWeights::from_json_value(&negative).is_err());

        let fractional = json!({"family": 24.5, "communities": 25.5, "trending": 25, "chronological": 25});
        assert!(FeedWeights::from_json_value(&fractional).is_err());

        let oversized = json!({"family": 101, "communities": 0, "trending": 0, "chronological": 0});
        assert!(FeedWeights::from_json_value(&oversized).is_err());
    }

    #[test]
    fn test_repair_fills_missing_keys() {
        let partial = json!({"family": 45, "communities": 25, "chronological": 10});
        let (w, filled) =
            FeedWeights::repair_from_json_value(&partial, &FeedWeights::default()).unwrap();
        assert_eq!(w, FeedWeights::new(45, 25, 20, 10));
        assert_eq!(filled, vec![Category::Trending]);

        assert!(FeedWeights::repair_from_json_value(&json!([1, 2, 3]), &FeedWeights::default())
            .is_none());
    }
}
