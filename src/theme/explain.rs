//! Diagnostic listing of every theme rule that touches a scope chain
//!
//! Looser than color selection: a scope can list several rules here while
//! at most one decides its color.

use super::{scope_matches, ThemeRule};

/// Rules matching one scope of a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeExplanation<'t> {
    pub scope_name: String,
    /// Matching rules in theme order
    pub theme_matches: Vec<&'t ThemeRule>,
}

/// Explain each scope of `chain` (outermost first) against `rules`
///
/// Every scope is matched with the scopes before it as its ancestors.
pub fn explain_scopes<'t, S: AsRef<str>>(
    rules: &'t [ThemeRule],
    chain: &[S],
) -> Vec<ScopeExplanation<'t>> {
    let chain: Vec<&str> = chain.iter().map(|s| s.as_ref()).collect();
    chain
        .iter()
        .enumerate()
        .map(|(i, scope)| ScopeExplanation {
            scope_name: scope.to_string(),
            theme_matches: explain_scope(rules, scope, &chain[..i]),
        })
        .collect()
}

fn explain_scope<'t>(rules: &'t [ThemeRule], scope: &str, ancestors: &[&str]) -> Vec<&'t ThemeRule> {
    rules
        .iter()
        .filter(|rule| {
            rule.selector
                .alternatives()
                .iter()
                .any(|alternative| selector_matches(alternative, scope, ancestors))
        })
        .collect()
}

/// Match one space-separated selector path against a scope and its ancestors
fn selector_matches(selector: &str, scope: &str, ancestors: &[&str]) -> bool {
    let segments: Vec<&str> = selector.split_whitespace().collect();
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };
    if !scope_matches(last, scope) {
        return false;
    }

    // Walk both lists innermost-first. Ancestors always advance; a selector
    // segment advances only when it matches the current ancestor.
    let mut remaining = parents.len();
    let mut ancestor = ancestors.len();
    while remaining > 0 && ancestor > 0 {
        if scope_matches(parents[remaining - 1], ancestors[ancestor - 1]) {
            remaining -= 1;
        }
        ancestor -= 1;
    }
    remaining == 0
}
