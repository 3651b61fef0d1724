//! Learning module - feedback, belief updates, and behavioral patterns.
//!
//! Everything here runs off the evaluation path: the belief updater is
//! invoked per feedback event, the pattern analyzer periodically over a
//! window of history.

mod feedback;
mod patterns;
mod updater;

pub use feedback::{EngagementAction, FeedbackType, UserFeedback};
pub use patterns::{
    AnalysisWindow, BehaviorSignals, BehavioralAnalyzer, DriftDirection, EngagementRecord,
    ValueDrift,
};
pub use updater::{BeliefUpdater, UpdatePriority, UpdateSchedule};
