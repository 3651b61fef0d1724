//! Intervention action enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The final disposition of a piece of content for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterventionAction {
    /// Suppress the content entirely.
    Block,
    /// Show the content without annotation.
    Allow,
    /// Show and elevate the content.
    AllowPrioritize,
    /// Show the content with notifications muted.
    AllowMute,
    /// Show the content with a warning annotation.
    AllowWarning,
}

impl InterventionAction {
    /// Returns the wire representation of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionAction::Block => "BLOCK",
            InterventionAction::Allow => "ALLOW",
            InterventionAction::AllowPrioritize => "ALLOW_PRIORITIZE",
            InterventionAction::AllowMute => "ALLOW_MUTE",
            InterventionAction::AllowWarning => "ALLOW_WARNING",
        }
    }

    /// Rank of this action on the permissiveness scale.
    ///
    /// Higher means more content reaches the user. Threshold ties in the
    /// scorer resolve toward the higher rank: a false positive in blocking
    /// is costlier than a false negative.
    pub fn permissiveness(&self) -> u8 {
        match self {
            InterventionAction::Block => 0,
            InterventionAction::AllowMute => 1,
            InterventionAction::AllowWarning => 2,
            InterventionAction::Allow => 3,
            InterventionAction::AllowPrioritize => 4,
        }
    }

    /// Returns true when this action suppresses content.
    pub fn is_block(&self) -> bool {
        matches!(self, InterventionAction::Block)
    }
}

impl fmt::Display for InterventionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
