//! User-authored intervention rules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContentType, InterventionAction, RuleId, Timestamp, ValidationError,
};

/// A predicate-action pair that overrides scoring-based decisions.
///
/// Unset predicates are wildcards; a rule must set at least one. Rules
/// are owned by a user and managed by the host; the core only evaluates
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionRule {
    pub rule_id: RuleId,
    /// Match content from exactly this domain (case-insensitive).
    pub domain: Option<String>,
    /// Every keyword must appear in the title for the rule to match.
    #[serde(default)]
    pub keyword_includes: Vec<String>,
    /// No keyword may appear in the title for the rule to match.
    #[serde(default)]
    pub keyword_excludes: Vec<String>,
    /// Match content of exactly this type.
    pub content_type: Option<ContentType>,
    pub action: InterventionAction,
    /// Higher priority wins among matching rules.
    pub priority: i32,
    pub reason: String,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Creation time, the documented tie-break among equal priorities:
    /// the most recently created rule wins.
    pub created_at: Timestamp,
}

fn default_active() -> bool {
    true
}

impl InterventionRule {
    /// Creates a domain-match rule; further predicates attach via the
    /// `with_*` methods.
    pub fn for_domain(
        rule_id: RuleId,
        domain: impl Into<String>,
        action: InterventionAction,
        priority: i32,
        reason: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            rule_id,
            domain: Some(domain.into()),
            keyword_includes: Vec::new(),
            keyword_excludes: Vec::new(),
            content_type: None,
            action,
            priority,
            reason: reason.into(),
            active: true,
            created_at,
        }
    }

    /// Creates a keyword-match rule requiring every given keyword.
    pub fn for_keywords(
        rule_id: RuleId,
        keywords: Vec<String>,
        action: InterventionAction,
        priority: i32,
        reason: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            rule_id,
            domain: None,
            keyword_includes: keywords,
            keyword_excludes: Vec::new(),
            content_type: None,
            action,
            priority,
            reason: reason.into(),
            active: true,
            created_at,
        }
    }

    /// Restricts the rule to a content type.
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Adds excluded keywords.
    pub fn with_excludes(mut self, keywords: Vec<String>) -> Self {
        self.keyword_excludes = keywords;
        self
    }

    /// Deactivates the rule.
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Returns true when at least one predicate is set.
    pub fn has_predicates(&self) -> bool {
        self.domain.is_some()
            || !self.keyword_includes.is_empty()
            || !self.keyword_excludes.is_empty()
            || self.content_type.is_some()
    }

    /// Checks the caller contract: a rule needs at least one predicate
    /// and a non-empty reason.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_predicates() {
            return Err(ValidationError::invalid_format(
                "rule",
                format!("rule {} has all predicates unset", self.rule_id),
            ));
        }
        if self.reason.trim().is_empty() {
            return Err(ValidationError::empty_field("reason"));
        }
        Ok(())
    }
}
