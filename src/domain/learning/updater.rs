//! Feedback-driven value profile updates.
//!
//! A multiplicative smoothing heuristic, not a true posterior update:
//! every factor is configuration. The updater is pure; serialization of
//! concurrent updates per user is the application layer's job.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LearningConfig;
use crate::domain::foundation::{Timestamp, UnitScore, ValidationError, Weight};
use crate::domain::learning::{EngagementAction, FeedbackType, UserFeedback};
use crate::domain::scoring::ValueProfile;

/// Urgency of the next belief update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePriority {
    High,
    Normal,
}

/// Recommendation for when the next update run should happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSchedule {
    pub should_update: bool,
    pub days_until_due: i64,
    pub signals_needed: usize,
    pub priority: UpdatePriority,
}

/// Adjusts value profiles from feedback signals.
#[derive(Debug, Clone)]
pub struct BeliefUpdater {
    config: LearningConfig,
}

impl BeliefUpdater {
    /// Creates an updater with the given factor configuration.
    pub fn new(config: LearningConfig) -> Self {
        Self { config }
    }

    /// Applies a single feedback event to a profile, returning the next
    /// profile. Pure: the input profile is never mutated.
    ///
    /// Explicit ratings reweight every currently-weighted dimension
    /// multiplicatively. Engagement events only raise confidence here;
    /// their weight nudges accumulate and apply through
    /// [`BeliefUpdater::apply_engagement`] once the configured minimum
    /// event count is reached.
    ///
    /// Confidence grows by the configured increment per event, capped,
    /// and never resets.
    pub fn update(
        &self,
        profile: &ValueProfile,
        feedback: &UserFeedback,
        now: Timestamp,
    ) -> Result<ValueProfile, ValidationError> {
        feedback.validate()?;

        let factor = match feedback.feedback_type {
            FeedbackType::ExplicitRating => self.rating_factor(feedback),
            FeedbackType::Engagement => 1.0,
        };

        let mut next = self.reweighted(profile, factor);
        next.confidence = self.bumped_confidence(profile.confidence);
        next.updated_at = now;

        debug!(
            factor,
            confidence = next.confidence.value(),
            "profile updated from feedback"
        );
        Ok(next)
    }

    /// Applies a batch of accumulated engagement signals.
    ///
    /// Below the configured minimum event count this is a no-op returning
    /// the profile unchanged: single engagement events are too noisy to
    /// act on. Each signal contributes a direction-consistent nudge
    /// through the same multiplicative mechanism as ratings, scaled down
    /// by the engagement scale.
    pub fn apply_engagement(
        &self,
        profile: &ValueProfile,
        signals: &[UserFeedback],
        now: Timestamp,
    ) -> Result<ValueProfile, ValidationError> {
        for signal in signals {
            signal.validate()?;
        }

        if signals.len() < self.config.min_feedback_events {
            return Ok(profile.clone());
        }

        let mut combined = 1.0;
        for signal in signals {
            combined *= self.engagement_factor(signal);
        }

        let mut next = self.reweighted(profile, combined);
        next.updated_at = now;
        debug!(
            signals = signals.len(),
            factor = combined,
            "engagement batch applied"
        );
        Ok(next)
    }

    /// Recommends when the next update run should happen: due after the
    /// configured feedback volume or number of days, whichever first.
    pub fn update_schedule(&self, feedback_count: usize, days_since_update: i64) -> UpdateSchedule {
        let volume_due = feedback_count >= self.config.min_feedback_events;
        let time_due = days_since_update >= self.config.max_days_between_updates;
        let should_update = volume_due || time_due;

        UpdateSchedule {
            should_update,
            days_until_due: (self.config.max_days_between_updates - days_since_update).max(0),
            signals_needed: self
                .config
                .min_feedback_events
                .saturating_sub(feedback_count),
            priority: if should_update {
                UpdatePriority::High
            } else {
                UpdatePriority::Normal
            },
        }
    }

    /// +1 means the system was too strict: soften weights. -1 means too
    /// lenient: tighten. 0 leaves weights unchanged.
    fn rating_factor(&self, feedback: &UserFeedback) -> f64 {
        match feedback.rating.map(|r| r.value()) {
            Some(1) => self.config.soften_factor,
            Some(-1) => self.config.tighten_factor,
            _ => 1.0,
        }
    }

    /// Direction-consistent nudge, scaled down relative to an explicit
    /// rating: engaged content argues the system was too strict,
    /// dismissed content that it was too lenient.
    fn engagement_factor(&self, feedback: &UserFeedback) -> f64 {
        let base = match feedback.action_taken {
            Some(EngagementAction::Returned) => self.config.soften_factor,
            Some(EngagementAction::SpentTime)
                if feedback.time_spent_seconds.unwrap_or(0.0)
                    >= self.config.engagement_dwell_secs =>
            {
                self.config.soften_factor
            }
            Some(EngagementAction::Dismissed) | Some(EngagementAction::Ignored) => {
                self.config.tighten_factor
            }
            _ => 1.0,
        };
        1.0 + self.config.engagement_scale * (base - 1.0)
    }

    /// Multiplies every weighted dimension by the factor, clamped to [0, 1].
    fn reweighted(&self, profile: &ValueProfile, factor: f64) -> ValueProfile {
        let values = profile
            .values
            .iter()
            .map(|(category, dims)| {
                (
                    category.clone(),
                    dims.iter()
                        .map(|(dimension, weight)| {
                            (dimension.clone(), Weight::new(weight.value() * factor))
                        })
                        .collect(),
                )
            })
            .collect();
        ValueProfile {
            values,
            confidence: profile.confidence,
            updated_at: profile.updated_at,
        }
    }

    fn bumped_confidence(&self, confidence: UnitScore) -> UnitScore {
        let bumped = confidence.value() + self.config.confidence_increment;
        // Cap growth, but never reduce confidence already above the cap.
        UnitScore::new(bumped.min(self.config.confidence_cap).max(confidence.value()))
    }
}
