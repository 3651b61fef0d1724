//! Behavioral pattern analysis over decision and feedback history.
//!
//! Derives advisory signals for scheduling belief updates: engagement by
//! time of day, content-type and domain preferences, attention
//! fragmentation, and value drift. Nothing here runs on the evaluation
//! path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::PatternConfig;
use crate::domain::content::ContentItem;
use crate::domain::decision::InterventionDecision;
use crate::domain::foundation::{ContentId, ContentType, Timestamp, UnitScore};
use crate::domain::learning::{EngagementAction, UserFeedback};
use crate::domain::scoring::ValueProfile;

/// Engagement scores assigned to observed actions.
const ENGAGEMENT_RETURNED: f64 = 0.9;
const ENGAGEMENT_VIEWED: f64 = 0.5;
const ENGAGEMENT_DISMISSED: f64 = 0.1;
const ENGAGEMENT_UNOBSERVED: f64 = 0.5;
/// Dwell time mapping to full engagement for spent-time signals.
const FULL_ENGAGEMENT_DWELL_SECS: f64 = 300.0;

/// One observed interaction, joined by the host from a decision, its
/// content, and any feedback received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub content_id: ContentId,
    pub domain: String,
    pub content_type: ContentType,
    pub timestamp: Timestamp,
    pub time_spent_seconds: Option<f64>,
    /// Engagement on [0, 1]: 0.5 when behavior was unobserved.
    pub engagement: UnitScore,
}

impl EngagementRecord {
    /// Builds a record from a decision, the content it concerned, and
    /// optional feedback on it.
    pub fn from_decision(
        decision: &InterventionDecision,
        content: &ContentItem,
        feedback: Option<&UserFeedback>,
    ) -> Self {
        let time_spent_seconds = feedback.and_then(|f| f.time_spent_seconds);
        Self {
            content_id: decision.content_id.clone(),
            domain: content.domain_lower(),
            content_type: content.content_type,
            timestamp: feedback.map(|f| f.timestamp).unwrap_or(decision.timestamp),
            time_spent_seconds,
            engagement: UnitScore::new(Self::engagement_score(feedback)),
        }
    }

    fn engagement_score(feedback: Option<&UserFeedback>) -> f64 {
        let Some(feedback) = feedback else {
            return ENGAGEMENT_UNOBSERVED;
        };
        if let Some(rating) = feedback.rating {
            // Too strict means the user wanted the content.
            return match rating.value() {
                1 => ENGAGEMENT_RETURNED,
                -1 => ENGAGEMENT_DISMISSED,
                _ => ENGAGEMENT_VIEWED,
            };
        }
        match feedback.action_taken {
            Some(EngagementAction::Returned) => ENGAGEMENT_RETURNED,
            Some(EngagementAction::SpentTime) => {
                let dwell = feedback.time_spent_seconds.unwrap_or(0.0);
                (dwell / FULL_ENGAGEMENT_DWELL_SECS).clamp(0.0, 1.0)
            }
            Some(EngagementAction::Dismissed) | Some(EngagementAction::Ignored) => {
                ENGAGEMENT_DISMISSED
            }
            Some(EngagementAction::Viewed) => ENGAGEMENT_VIEWED,
            None => ENGAGEMENT_UNOBSERVED,
        }
    }
}

/// The window of history the analyzer runs over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub records: Vec<EngagementRecord>,
    /// Profile snapshots in chronological order, one per update window.
    pub profile_history: Vec<ValueProfile>,
    /// The host's notion of "now", bounding the fragmentation window.
    pub now: Timestamp,
}

/// Direction of a sustained value shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftDirection {
    Rising,
    Falling,
}

/// A sustained directional shift in the confidence-weighted dimension
/// average across consecutive update windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDrift {
    pub direction: DriftDirection,
    /// Absolute cumulative shift over the drifting windows.
    pub magnitude: f64,
    /// Number of consecutive same-direction windows observed.
    pub windows: usize,
}

/// Derived behavioral signals, advisory inputs to update scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSignals {
    /// Mean engagement per hour of day; 0.5 for unobserved hours.
    pub hourly_engagement: BTreeMap<u32, f64>,
    pub content_type_preferences: BTreeMap<ContentType, f64>,
    /// Mean engagement per domain, only for sufficiently observed domains.
    pub domain_preferences: BTreeMap<String, f64>,
    /// 0 when dwell times are healthy, approaching 1 as attention shatters.
    pub attention_fragmentation: UnitScore,
    /// True when switching frequency exceeds the configured threshold.
    pub is_fragmented: bool,
    pub value_drift: Option<ValueDrift>,
}

/// Analyzes engagement and profile history for behavioral patterns.
#[derive(Debug, Clone)]
pub struct BehavioralAnalyzer {
    config: PatternConfig,
}

impl BehavioralAnalyzer {
    /// Creates an analyzer with the given thresholds.
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Computes behavioral signals over a window of history.
    pub fn analyze(&self, window: &AnalysisWindow) -> BehaviorSignals {
        let (attention_fragmentation, is_fragmented) = self.fragmentation(window);
        BehaviorSignals {
            hourly_engagement: self.hourly_engagement(&window.records),
            content_type_preferences: self.content_type_preferences(&window.records),
            domain_preferences: self.domain_preferences(&window.records),
            attention_fragmentation,
            is_fragmented,
            value_drift: self.detect_drift(&window.profile_history),
        }
    }

    fn hourly_engagement(&self, records: &[EngagementRecord]) -> BTreeMap<u32, f64> {
        let mut by_hour: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for record in records {
            by_hour
                .entry(record.timestamp.hour())
                .or_default()
                .push(record.engagement.value());
        }

        (0..24)
            .map(|hour| {
                let mean = by_hour
                    .get(&hour)
                    .map(|scores| scores.iter().sum::<f64>() / scores.len() as f64)
                    .unwrap_or(ENGAGEMENT_UNOBSERVED);
                (hour, mean)
            })
            .collect()
    }

    fn content_type_preferences(
        &self,
        records: &[EngagementRecord],
    ) -> BTreeMap<ContentType, f64> {
        let mut by_type: BTreeMap<ContentType, Vec<f64>> = BTreeMap::new();
        for record in records {
            by_type
                .entry(record.content_type)
                .or_default()
                .push(record.engagement.value());
        }
        by_type
            .into_iter()
            .map(|(content_type, scores)| {
                (content_type, scores.iter().sum::<f64>() / scores.len() as f64)
            })
            .collect()
    }

    fn domain_preferences(&self, records: &[EngagementRecord]) -> BTreeMap<String, f64> {
        let mut by_domain: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in records {
            by_domain
                .entry(record.domain.clone())
                .or_default()
                .push(record.engagement.value());
        }
        by_domain
            .into_iter()
            .filter(|(_, scores)| scores.len() >= self.config.min_domain_observations)
            .map(|(domain, scores)| {
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                (domain, mean)
            })
            .collect()
    }

    /// Fragmentation: many recent items with short dwell times. The score
    /// normalizes mean dwell against the configured floor; the flag fires
    /// on switching frequency alone.
    fn fragmentation(&self, window: &AnalysisWindow) -> (UnitScore, bool) {
        let window_secs = (self.config.fragmentation_window_minutes * 60) as u64;
        let window_start = window.now.minus_secs(window_secs);
        let recent: Vec<&EngagementRecord> = window
            .records
            .iter()
            .filter(|r| !r.timestamp.is_before(&window_start))
            .collect();

        if recent.is_empty() {
            return (UnitScore::ZERO, false);
        }

        let mean_dwell = recent
            .iter()
            .map(|r| r.time_spent_seconds.unwrap_or(0.0))
            .sum::<f64>()
            / recent.len() as f64;
        let floor = self.config.fragmentation_dwell_secs;
        let score = UnitScore::new((floor - mean_dwell) / floor);

        let rate_per_minute =
            recent.len() as f64 / self.config.fragmentation_window_minutes as f64;
        let is_fragmented = rate_per_minute > self.config.switch_rate_per_minute;

        (score, is_fragmented)
    }

    /// Drift: the trailing run of same-direction steps in the
    /// confidence-weighted dimension average must span at least the
    /// configured window count and exceed the configured delta in total.
    fn detect_drift(&self, history: &[ValueProfile]) -> Option<ValueDrift> {
        if history.len() < self.config.drift_windows + 1 {
            return None;
        }

        let aggregates: Vec<f64> = history
            .iter()
            .map(|p| p.confidence.value() * p.mean_weight())
            .collect();
        let deltas: Vec<f64> = aggregates.windows(2).map(|w| w[1] - w[0]).collect();

        let last = *deltas.last()?;
        if last == 0.0 {
            return None;
        }
        let direction_positive = last > 0.0;

        let mut run = 0usize;
        let mut cumulative = 0.0;
        for delta in deltas.iter().rev() {
            if (*delta > 0.0) == direction_positive && *delta != 0.0 {
                run += 1;
                cumulative += delta;
            } else {
                break;
            }
        }

        if run >= self.config.drift_windows && cumulative.abs() >= self.config.drift_delta {
            Some(ValueDrift {
                direction: if direction_positive {
                    DriftDirection::Rising
                } else {
                    DriftDirection::Falling
                },
                magnitude: cumulative.abs(),
                windows: run,
            })
        } else {
            None
        }
    }
}
