//! Decision module - synthesis of the final intervention decision.

mod decision;
mod synthesizer;

pub use decision::{InterventionDecision, MatchedRule};
pub use synthesizer::DecisionSynthesizer;
