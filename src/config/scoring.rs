//! Value-alignment scoring configuration.
//!
//! The value hierarchy (categories, dimensions, and their semantic roles),
//! the action threshold bands, and the impact estimation weights are all
//! supplied here; the scorer hardcodes none of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic role a value dimension plays during scoring.
///
/// The role decides which feature signals drive the dimension's alignment
/// score; dimensions with no meaningful mapping score neutrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DimensionRole {
    /// Rewards educational content and learning-aligned topics.
    Learning,
    /// Penalizes distraction domains and clickbait.
    Focus,
    /// Penalizes distressing, negatively valenced content.
    Restfulness,
    /// Rewards reputable, high-quality sources.
    SourceQuality,
    /// No feature mapping; always scores the neutral midpoint.
    #[default]
    Neutral,
}

/// Hierarchy of value categories and dimensions with declared roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueHierarchy {
    pub categories: BTreeMap<String, BTreeMap<String, DimensionRole>>,
}

impl ValueHierarchy {
    /// Returns the role declared for a dimension, neutral when undeclared.
    pub fn role_of(&self, category: &str, dimension: &str) -> DimensionRole {
        self.categories
            .get(category)
            .and_then(|dims| dims.get(dimension))
            .copied()
            .unwrap_or(DimensionRole::Neutral)
    }

    /// Iterates over every (category, dimension, role) triple.
    pub fn dimensions(&self) -> impl Iterator<Item = (&str, &str, DimensionRole)> {
        self.categories.iter().flat_map(|(category, dims)| {
            dims.iter()
                .map(move |(dimension, role)| (category.as_str(), dimension.as_str(), *role))
        })
    }

    /// Total number of dimensions across all categories.
    pub fn dimension_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }
}

impl Default for ValueHierarchy {
    fn default() -> Self {
        let table: &[(&str, &[(&str, DimensionRole)])] = &[
            (
                "productivity",
                &[
                    ("focus", DimensionRole::Focus),
                    ("learning", DimensionRole::Learning),
                    ("output_quality", DimensionRole::SourceQuality),
                    ("efficiency", DimensionRole::Focus),
                ],
            ),
            (
                "wellbeing",
                &[
                    ("sleep_quality", DimensionRole::Restfulness),
                    ("stress_management", DimensionRole::Restfulness),
                    ("mood", DimensionRole::Restfulness),
                ],
            ),
            (
                "personal_growth",
                &[
                    ("skill_development", DimensionRole::Learning),
                    ("creativity", DimensionRole::Neutral),
                    ("self_reflection", DimensionRole::Neutral),
                ],
            ),
        ];
        let categories = table
            .iter()
            .map(|(category, dims)| {
                (
                    (*category).to_string(),
                    dims.iter()
                        .map(|(dim, role)| ((*dim).to_string(), *role))
                        .collect(),
                )
            })
            .collect();
        Self { categories }
    }
}

/// Threshold bands mapping alignment to a recommended action.
///
/// Comparisons at the prioritize and allow edges are inclusive so that a
/// score landing exactly on a boundary takes the more permissive action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdBands {
    /// Alignment at or above this recommends ALLOW_PRIORITIZE.
    pub prioritize_min: f64,
    /// Wellbeing below this floor disqualifies prioritization.
    pub prioritize_wellbeing_floor: f64,
    /// Alignment at or above this recommends ALLOW.
    pub allow_min: f64,
    /// Alignment strictly above this recommends a muted or warned allow;
    /// at or below it, BLOCK.
    pub warn_min: f64,
    /// Wellbeing below this ceiling turns the warned allow into a mute.
    pub mute_wellbeing_ceiling: f64,
}

impl Default for ThresholdBands {
    fn default() -> Self {
        Self {
            prioritize_min: 0.8,
            prioritize_wellbeing_floor: -0.2,
            allow_min: 0.5,
            warn_min: 0.3,
            mute_wellbeing_ceiling: -0.3,
        }
    }
}

/// Weights for the productivity and wellbeing impact aggregations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactWeights {
    /// Productivity bonus for boosted-reputation domains.
    pub boosted_productivity_bonus: f64,
    /// Productivity penalty for penalized-reputation domains.
    pub penalized_productivity_penalty: f64,
    /// Productivity penalty for clickbait titles.
    pub clickbait_productivity_penalty: f64,
    /// Productivity penalty for promotional content.
    pub promotional_productivity_penalty: f64,
    /// Multiplier applied to emotional valence for wellbeing impact.
    pub valence_wellbeing_weight: f64,
    /// Wellbeing penalty for sensational, negatively valenced titles.
    pub sensational_wellbeing_penalty: f64,
    /// Wellbeing penalty for penalized (distraction) domains.
    pub penalized_wellbeing_penalty: f64,
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            boosted_productivity_bonus: 0.6,
            penalized_productivity_penalty: -0.5,
            clickbait_productivity_penalty: -0.3,
            promotional_productivity_penalty: -0.2,
            valence_wellbeing_weight: 0.5,
            sensational_wellbeing_penalty: -0.3,
            penalized_wellbeing_penalty: -0.1,
        }
    }
}

/// Configuration for the value-alignment scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub hierarchy: ValueHierarchy,
    pub bands: ThresholdBands,
    pub impacts: ImpactWeights,
    /// Topics counted as learning-aligned by the Learning role.
    pub learning_topics: Vec<String>,
    /// Confidence multiplier applied when features carry little signal.
    pub low_information_factor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            hierarchy: ValueHierarchy::default(),
            bands: ThresholdBands::default(),
            impacts: ImpactWeights::default(),
            learning_topics: vec![
                "science".to_string(),
                "technology".to_string(),
                "productivity".to_string(),
            ],
            low_information_factor: 0.5,
        }
    }
}
