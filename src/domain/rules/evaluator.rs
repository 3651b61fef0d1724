//! Rule matching against content items.

use crate::domain::content::ContentItem;
use crate::domain::foundation::ValidationError;
use crate::domain::rules::InterventionRule;

/// Evaluates user rules against content, independent of scoring.
///
/// Stateless: rules arrive with the call, already loaded by the host.
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Finds the governing rule for a content item, if any.
    ///
    /// A rule matches when all of its set predicates hold. Among matching
    /// active rules the highest priority wins; equal priorities break
    /// toward the most recently created rule. `Ok(None)` signals fall
    /// through to scoring, not an error.
    ///
    /// # Errors
    ///
    /// Fails fast when any supplied rule violates the rule contract,
    /// whether or not it would have matched.
    pub fn find_match<'a>(
        content: &ContentItem,
        rules: &'a [InterventionRule],
    ) -> Result<Option<&'a InterventionRule>, ValidationError> {
        for rule in rules {
            rule.validate()?;
        }

        let mut best: Option<&InterventionRule> = None;
        for rule in rules {
            if !rule.active || !Self::matches(rule, content) {
                continue;
            }
            best = match best {
                None => Some(rule),
                Some(current)
                    if (rule.priority, rule.created_at)
                        > (current.priority, current.created_at) =>
                {
                    Some(rule)
                }
                Some(current) => Some(current),
            };
        }
        Ok(best)
    }

    /// Returns every matching active rule in precedence order
    /// (highest priority first, most recent first among equals).
    pub fn matching_rules<'a>(
        content: &ContentItem,
        rules: &'a [InterventionRule],
    ) -> Vec<&'a InterventionRule> {
        let mut matching: Vec<&InterventionRule> = rules
            .iter()
            .filter(|rule| rule.active && Self::matches(rule, content))
            .collect();
        matching.sort_by(|a, b| {
            (b.priority, b.created_at).cmp(&(a.priority, a.created_at))
        });
        matching
    }

    /// All set predicates must hold; unset predicates are wildcards.
    fn matches(rule: &InterventionRule, content: &ContentItem) -> bool {
        if let Some(domain) = &rule.domain {
            if !domain.eq_ignore_ascii_case(&content.domain) {
                return false;
            }
        }

        if let Some(content_type) = rule.content_type {
            if content_type != content.content_type {
                return false;
            }
        }

        let title = content.title_lower();
        if !rule.keyword_includes.is_empty()
            && !rule
                .keyword_includes
                .iter()
                .all(|kw| title.contains(&kw.to_lowercase()))
        {
            return false;
        }

        if rule
            .keyword_excludes
            .iter()
            .any(|kw| title.contains(&kw.to_lowercase()))
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        ContentId, ContentType, InterventionAction, RuleId, Timestamp,
    };

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn item(title: &str, domain: &str, content_type: ContentType) -> ContentItem {
        ContentItem::new(
            ContentId::try_new("c-1").unwrap(),
            "src",
            title,
            content_type,
            domain,
        )
        .unwrap()
    }

    fn domain_rule(domain: &str, priority: i32, created_at: Timestamp) -> InterventionRule {
        InterventionRule::for_domain(
            RuleId::new(),
            domain,
            InterventionAction::Block,
            priority,
            "test rule",
            created_at,
        )
    }

    #[test]
    fn no_rules_means_no_match() {
        let content = item("Title", "example.com", ContentType::Article);
        assert!(RuleEvaluator::find_match(&content, &[]).unwrap().is_none());
    }

    #[test]
    fn domain_predicate_requires_equality() {
        let content = item("Title", "news.example.com", ContentType::Article);
        let rule = domain_rule("example.com", 0, now());
        // Subdomain is not equality.
        assert!(RuleEvaluator::find_match(&content, &[rule])
            .unwrap()
            .is_none());

        let content = item("Title", "Example.COM", ContentType::Article);
        let rule = domain_rule("example.com", 0, now());
        assert!(RuleEvaluator::find_match(&content, std::slice::from_ref(&rule))
            .unwrap()
            .is_some());
    }

    #[test]
    fn content_type_predicate_must_match() {
        let content = item("Title", "example.com", ContentType::Video);
        let rule = domain_rule("example.com", 0, now()).with_content_type(ContentType::Article);
        assert!(RuleEvaluator::find_match(&content, &[rule])
            .unwrap()
            .is_none());
    }

    #[test]
    fn every_include_keyword_is_required() {
        let content = item("Quarterly earnings report", "example.com", ContentType::Email);
        let all_present = InterventionRule::for_keywords(
            RuleId::new(),
            vec!["earnings".to_string(), "report".to_string()],
            InterventionAction::AllowPrioritize,
            0,
            "finance watch",
            now(),
        );
        assert!(
            RuleEvaluator::find_match(&content, std::slice::from_ref(&all_present))
                .unwrap()
                .is_some()
        );

        let one_missing = InterventionRule::for_keywords(
            RuleId::new(),
            vec!["earnings".to_string(), "forecast".to_string()],
            InterventionAction::AllowPrioritize,
            0,
            "finance watch",
            now(),
        );
        assert!(RuleEvaluator::find_match(&content, &[one_missing])
            .unwrap()
            .is_none());
    }

    #[test]
    fn excluded_keyword_blocks_match() {
        let content = item("Urgent: earnings report", "example.com", ContentType::Email);
        let rule = InterventionRule::for_keywords(
            RuleId::new(),
            vec!["earnings".to_string()],
            InterventionAction::AllowPrioritize,
            0,
            "finance watch",
            now(),
        )
        .with_excludes(vec!["urgent".to_string()]);
        assert!(RuleEvaluator::find_match(&content, &[rule])
            .unwrap()
            .is_none());
    }

    #[test]
    fn inactive_rules_never_match() {
        let content = item("Title", "example.com", ContentType::Article);
        let rule = domain_rule("example.com", 100, now()).deactivated();
        assert!(RuleEvaluator::find_match(&content, &[rule])
            .unwrap()
            .is_none());
    }

    #[test]
    fn highest_priority_rule_wins() {
        let content = item("Title", "example.com", ContentType::Article);
        let low = domain_rule("example.com", 10, now());
        let high = domain_rule("example.com", 11, now());
        let high_id = high.rule_id;

        let rules = [low, high];
        let matched = RuleEvaluator::find_match(&content, &rules)
            .unwrap()
            .unwrap();
        assert_eq!(matched.rule_id, high_id);
    }

    #[test]
    fn equal_priority_breaks_toward_most_recent() {
        let content = item("Title", "example.com", ContentType::Article);
        let older = domain_rule("example.com", 10, now());
        let newer = domain_rule("example.com", 10, now().plus_secs(60));
        let newer_id = newer.rule_id;

        // Order of the input slice must not matter.
        let rules = [newer.clone(), older.clone()];
        let matched = RuleEvaluator::find_match(&content, &rules)
            .unwrap()
            .unwrap();
        assert_eq!(matched.rule_id, newer_id);
        let rules = [older, newer];
        let matched = RuleEvaluator::find_match(&content, &rules)
            .unwrap()
            .unwrap();
        assert_eq!(matched.rule_id, newer_id);
    }

    #[test]
    fn malformed_rule_fails_fast_even_if_unmatched() {
        let content = item("Title", "example.com", ContentType::Article);
        let mut malformed = domain_rule("another.example", 0, now());
        malformed.domain = None;
        assert!(RuleEvaluator::find_match(&content, &[malformed]).is_err());
    }

    #[test]
    fn matching_rules_sorts_by_precedence() {
        let content = item("Title", "example.com", ContentType::Article);
        let low = domain_rule("example.com", 1, now());
        let high = domain_rule("example.com", 9, now());
        let rules = vec![low.clone(), high.clone()];

        let matching = RuleEvaluator::matching_rules(&content, &rules);
        assert_eq!(matching.len(), 2);
        assert_eq!(matching[0].rule_id, high.rule_id);
        assert_eq!(matching[1].rule_id, low.rule_id);
    }
}
