//! Best-rule lookup for a single scope name

use std::collections::HashMap;

use super::{scope_matches, ThemeRule, EMPTY_RULE};

/// Session-scoped theme rule matcher
///
/// The best rule for a scope is the one whose selector is the longest
/// dot-boundary prefix of the scope. Equal lengths keep the rule declared
/// first. Lookups are cached for the matcher's lifetime; create a fresh
/// matcher for each highlighting session.
#[derive(Debug)]
pub struct ThemeRuleMatcher<'t> {
    rules: &'t [ThemeRule],
    /// scope -> index into `rules`, `None` for the empty rule
    cache: HashMap<String, Option<usize>>,
}

impl<'t> ThemeRuleMatcher<'t> {
    /// Create a matcher over rules in declared order
    pub fn new(rules: &'t [ThemeRule]) -> Self {
        Self {
            rules,
            cache: HashMap::new(),
        }
    }

    /// Return the best rule for `scope`, or [`EMPTY_RULE`] if none matches
    pub fn best_rule(&mut self, scope: &str) -> &'t ThemeRule {
        let index = match self.cache.get(scope) {
            Some(cached) => *cached,
            None => {
                let found = self.find_best(scope);
                self.cache.insert(scope.to_string(), found);
                found
            }
        };
        let rules: &'t [ThemeRule] = self.rules;
        match index {
            Some(i) => &rules[i],
            None => &EMPTY_RULE,
        }
    }

    /// Best rule over a scope list: the first scope that matches anything wins
    pub fn best_rule_for_chain<S: AsRef<str>>(&mut self, scopes: &[S]) -> &'t ThemeRule {
        for scope in scopes {
            let rule = self.best_rule(scope.as_ref());
            if !std::ptr::eq(rule, &EMPTY_RULE) {
                return rule;
            }
        }
        &EMPTY_RULE
    }

    /// Number of distinct scopes resolved so far
    pub fn cached_scopes(&self) -> usize {
        self.cache.len()
    }

    fn find_best(&self, scope: &str) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (index, rule) in self.rules.iter().enumerate() {
            for alternative in rule.selector.alternatives() {
                if !scope_matches(alternative, scope) {
                    continue;
                }
                // strictly longer only, so the first declared rule keeps ties
                if best.map_or(true, |(_, len)| alternative.len() > len) {
                    best = Some((index, alternative.len()));
                }
            }
        }
        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::RuleStyle;

    fn rules() -> Vec<ThemeRule> {
        vec![
            ThemeRule::new("variable", RuleStyle::fg("#111111")),
            ThemeRule::new("variable.other", RuleStyle::fg("#222222")),
            ThemeRule::new("comment, string.quoted", RuleStyle::fg("#333333")),
            ThemeRule::new("string.quoted", RuleStyle::fg("#444444")),
        ]
    }

    #[test]
    fn test_longest_prefix_wins() {
        let rules = rules();
        let mut matcher = ThemeRuleMatcher::new(&rules);
        assert_eq!(matcher.best_rule("variable.other.constant").foreground(), Some("#222222"));
        assert_eq!(matcher.best_rule("variable.parameter").foreground(), Some("#111111"));
        assert_eq!(matcher.best_rule("variable").foreground(), Some("#111111"));
    }

    #[test]
    fn test_prefix_needs_dot_boundary() {
        let rules = rules();
        let mut matcher = ThemeRuleMatcher::new(&rules);
        assert!(matcher.best_rule("variables").is_empty_rule());
    }

    #[test]
    fn test_tie_keeps_first_declared() {
        let rules = rules();
        let mut matcher = ThemeRuleMatcher::new(&rules);
        // "string.quoted" appears in rule 2 (as an alternative) and rule 3
        assert_eq!(matcher.best_rule("string.quoted.double").foreground(), Some("#333333"));
    }

    #[test]
    fn test_no_match_returns_empty_rule() {
        let rules = rules();
        let mut matcher = ThemeRuleMatcher::new(&rules);
        let rule = matcher.best_rule("keyword.control");
        assert!(std::ptr::eq(rule, &EMPTY_RULE));
        assert_eq!(rule.foreground(), None);
    }

    #[test]
    fn test_lookup_is_cached_and_idempotent() {
        let rules = rules();
        let mut matcher = ThemeRuleMatcher::new(&rules);
        let first = matcher.best_rule("variable.other.readwrite");
        let second = matcher.best_rule("variable.other.readwrite");
        assert!(std::ptr::eq(first, second));
        assert_eq!(matcher.cached_scopes(), 1);
        matcher.best_rule("nothing.here");
        assert_eq!(matcher.cached_scopes(), 2);
    }

    #[test]
    fn test_fresh_matcher_has_empty_cache() {
        let rules = rules();
        let mut matcher = ThemeRuleMatcher::new(&rules);
        matcher.best_rule("variable");
        let fresh = ThemeRuleMatcher::new(&rules);
        assert_eq!(fresh.cached_scopes(), 0);
    }

    #[test]
    fn test_nested_selector_prefix() {
        let rules = vec![
            ThemeRule::new("a", RuleStyle::fg("#111")),
            ThemeRule::new("a.b", RuleStyle::fg("#222")),
        ];
        let mut matcher = ThemeRuleMatcher::new(&rules);
        assert_eq!(matcher.best_rule("a.b.c").foreground(), Some("#222"));
    }

    #[test]
    fn test_chain_takes_first_matching_scope() {
        let rules = rules();
        let mut matcher = ThemeRuleMatcher::new(&rules);
        let chain = ["unknown.scope", "variable.other.local", "comment"];
        assert_eq!(matcher.best_rule_for_chain(&chain).foreground(), Some("#222222"));
        let none: [&str; 1] = ["nope"];
        assert!(matcher.best_rule_for_chain(&none).is_empty_rule());
    }
}
