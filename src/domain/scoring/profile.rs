//! User value profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ValueHierarchy;
use crate::domain::foundation::{Timestamp, UnitScore, ValidationError, Weight};

/// The uniform prior weight assigned to freshly initialized dimensions.
const UNIFORM_PRIOR: f64 = 0.5;

/// A learned model of what content dimensions a user cares about.
///
/// Weights map category name to dimension name to a value in [0, 1];
/// confidence expresses how certain the system is about the inferred
/// weights. The profile is mutated exclusively by the belief updater.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueProfile {
    pub values: BTreeMap<String, BTreeMap<String, Weight>>,
    pub confidence: UnitScore,
    pub updated_at: Timestamp,
}

impl ValueProfile {
    /// Creates a profile from raw weights, validating every weight and
    /// the confidence to [0, 1].
    pub fn try_from_weights(
        values: BTreeMap<String, BTreeMap<String, f64>>,
        confidence: f64,
        updated_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let mut validated = BTreeMap::new();
        for (category, dims) in values {
            let mut out = BTreeMap::new();
            for (dimension, weight) in dims {
                let weight = Weight::try_new(weight).map_err(|_| {
                    ValidationError::out_of_range(
                        format!("values.{category}.{dimension}"),
                        0.0,
                        1.0,
                        weight,
                    )
                })?;
                out.insert(dimension, weight);
            }
            validated.insert(category, out);
        }
        Ok(Self {
            values: validated,
            confidence: UnitScore::try_new(confidence)
                .map_err(|_| ValidationError::out_of_range("confidence", 0.0, 1.0, confidence))?,
            updated_at,
        })
    }

    /// Initializes a profile over a value hierarchy with uniform priors
    /// (every dimension at 0.5) and zero confidence.
    pub fn from_hierarchy(hierarchy: &ValueHierarchy, now: Timestamp) -> Self {
        let values = hierarchy
            .categories
            .iter()
            .map(|(category, dims)| {
                (
                    category.clone(),
                    dims.keys()
                        .map(|dim| (dim.clone(), Weight::new(UNIFORM_PRIOR)))
                        .collect(),
                )
            })
            .collect();
        Self {
            values,
            confidence: UnitScore::ZERO,
            updated_at: now,
        }
    }

    /// Creates an empty profile: no weighted dimensions, zero confidence.
    pub fn empty(now: Timestamp) -> Self {
        Self {
            values: BTreeMap::new(),
            confidence: UnitScore::ZERO,
            updated_at: now,
        }
    }

    /// Iterates over (category, dimension, weight) triples.
    pub fn dimensions(&self) -> impl Iterator<Item = (&str, &str, Weight)> {
        self.values.iter().flat_map(|(category, dims)| {
            dims.iter()
                .map(move |(dimension, weight)| (category.as_str(), dimension.as_str(), *weight))
        })
    }

    /// Iterates over dimensions carrying a strictly positive weight.
    pub fn weighted_dimensions(&self) -> impl Iterator<Item = (&str, &str, Weight)> {
        self.dimensions().filter(|(_, _, weight)| !weight.is_zero())
    }

    /// Returns the weight of a dimension, if present.
    pub fn weight_of(&self, category: &str, dimension: &str) -> Option<Weight> {
        self.values
            .get(category)
            .and_then(|dims| dims.get(dimension))
            .copied()
    }

    /// Returns true when no dimension carries positive weight.
    pub fn is_unweighted(&self) -> bool {
        self.weighted_dimensions().next().is_none()
    }

    /// Mean weight across all dimensions, zero for an empty profile.
    ///
    /// Used by drift detection as the per-snapshot aggregate.
    pub fn mean_weight(&self) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for (_, _, weight) in self.dimensions() {
            sum += weight.value();
            count += 1;
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}
