//! Splice semantic spans into grammar tokens
//!
//! A span carves the token it falls inside into up to three pieces: the
//! text before it and after it keep the token's style, the span itself is
//! recolored from its own scopes. Spans that do not fit cleanly inside a
//! single token are skipped and leave the tokens untouched.

use crate::theme::ThemeRuleMatcher;
use crate::tokenize::ThemedToken;

use super::SemanticSpan;

/// Outcome counters for spliced spans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpliceStats {
    pub applied: usize,
    pub skipped: usize,
}

/// Why a span was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Empty,
    Overlapping,
    CrossesToken,
    OutsideLine,
    TextMismatch,
    NoScopes,
}

/// Splice `spans` (ordered by start) into the tokens of `line`
///
/// Token offsets are implicit: each token starts where the previous one
/// ended. The output still covers the line left to right.
pub fn splice(
    line: &str,
    tokens: Vec<ThemedToken>,
    spans: &[SemanticSpan],
    matcher: &mut ThemeRuleMatcher<'_>,
    stats: &mut SpliceStats,
) -> Vec<ThemedToken> {
    if spans.is_empty() {
        return tokens;
    }

    let mut out = Vec::with_capacity(tokens.len() + spans.len() * 2);
    let mut pending = spans.iter().peekable();
    let mut token_start = 0;

    for token in tokens {
        let token_end = token_start + token.content.len();
        let mut cursor = token_start;

        while let Some(span) = pending.next_if(|span| span.start < token_end) {
            if let Err(reason) = check(line, &token, token_start, token_end, cursor, span) {
                stats.skipped += 1;
                tracing::debug!(start = span.start, end = span.end, ?reason, "semantic span skipped");
                continue;
            }

            if span.start > cursor {
                out.push(token.piece(&token.content[cursor - token_start..span.start - token_start]));
            }
            let rule = matcher.best_rule_for_chain(&span.scopes);
            out.push(ThemedToken {
                content: token.content[span.start - token_start..span.end - token_start].to_string(),
                color: rule.foreground().map(str::to_ascii_uppercase),
                font_style: rule.style.font_style,
                explanation: None,
            });
            cursor = span.end;
            stats.applied += 1;
        }

        if cursor == token_start {
            out.push(token);
        } else if cursor < token_end {
            out.push(token.piece(&token.content[cursor - token_start..]));
        }
        token_start = token_end;
    }

    for span in pending {
        stats.skipped += 1;
        tracing::debug!(start = span.start, end = span.end, reason = ?Skip::OutsideLine, "semantic span skipped");
    }
    out
}

fn check(
    line: &str,
    token: &ThemedToken,
    token_start: usize,
    token_end: usize,
    cursor: usize,
    span: &SemanticSpan,
) -> Result<(), Skip> {
    if span.end <= span.start {
        return Err(Skip::Empty);
    }
    if span.start < cursor {
        return Err(Skip::Overlapping);
    }
    if span.end > token_end {
        return Err(Skip::CrossesToken);
    }
    if span.scopes.is_empty() {
        return Err(Skip::NoScopes);
    }
    let Some(expected) = line.get(span.start..span.end) else {
        return Err(Skip::OutsideLine);
    };
    match token.content.get(span.start - token_start..span.end - token_start) {
        Some(actual) if actual == expected => Ok(()),
        _ => Err(Skip::TextMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{FontStyle, RuleStyle, ThemeRule};

    fn rules() -> Vec<ThemeRule> {
        vec![
            ThemeRule::new("variable", RuleStyle::fg("#9cdcfe")),
            ThemeRule::new("entity.name.function", RuleStyle::fg("#0000FF").with_bold()),
        ]
    }

    fn gray(content: &str) -> ThemedToken {
        ThemedToken::new(content, Some("#808080"))
    }

    fn run(line: &str, tokens: Vec<ThemedToken>, spans: &[SemanticSpan]) -> (Vec<ThemedToken>, SpliceStats) {
        let rules = rules();
        let mut matcher = ThemeRuleMatcher::new(&rules);
        let mut stats = SpliceStats::default();
        let out = splice(line, tokens, spans, &mut matcher, &mut stats);
        (out, stats)
    }

    fn contents(tokens: &[ThemedToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.content.as_str()).collect()
    }

    #[test]
    fn test_suffix_span_recolors_tail() {
        let (out, stats) = run(
            "helloWorld",
            vec![gray("helloWorld")],
            &[SemanticSpan::new(5, 10, &["entity.name.function"])],
        );
        assert_eq!(
            out,
            [
                gray("hello"),
                ThemedToken::new("World", Some("#0000FF")).with_font_style(FontStyle::BOLD),
            ]
        );
        assert_eq!(stats, SpliceStats { applied: 1, skipped: 0 });
    }

    #[test]
    fn test_middle_span_makes_three_pieces() {
        let (out, _) = run("a.bcd.e", vec![gray("a.bcd.e")], &[SemanticSpan::new(2, 5, &["variable.other"])]);
        assert_eq!(contents(&out), ["a.", "bcd", ".e"]);
        assert_eq!(out[1].color.as_deref(), Some("#9CDCFE"));
        assert_eq!(out[2].color.as_deref(), Some("#808080"));
    }

    #[test]
    fn test_several_spans_in_one_token() {
        let line = "foo(bar, baz)";
        let (out, stats) = run(
            line,
            vec![gray("foo"), gray("(bar, baz)")],
            &[
                SemanticSpan::new(0, 3, &["entity.name.function"]),
                SemanticSpan::new(4, 7, &["variable"]),
                SemanticSpan::new(9, 12, &["variable"]),
            ],
        );
        assert_eq!(contents(&out), ["foo", "(", "bar", ", ", "baz", ")"]);
        assert_eq!(stats.applied, 3);
        let joined: String = out.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(joined, line);
    }

    #[test]
    fn test_whole_token_span_replaces_style() {
        let (out, _) = run("ab cd", vec![gray("ab"), gray(" "), gray("cd")], &[SemanticSpan::new(3, 5, &["variable"])]);
        assert_eq!(contents(&out), ["ab", " ", "cd"]);
        assert_eq!(out[2].color.as_deref(), Some("#9CDCFE"));
    }

    #[test]
    fn test_span_crossing_tokens_is_skipped() {
        let tokens = vec![gray("ab"), gray("cd")];
        let (out, stats) = run("abcd", tokens.clone(), &[SemanticSpan::new(1, 3, &["variable"])]);
        assert_eq!(out, tokens);
        assert_eq!(stats, SpliceStats { applied: 0, skipped: 1 });
    }

    #[test]
    fn test_bad_spans_are_skipped() {
        let tokens = vec![gray("abcdef")];
        let (out, stats) = run(
            "abcdef",
            tokens.clone(),
            &[
                SemanticSpan::new(2, 2, &["variable"]),
                SemanticSpan::new(3, 1, &["variable"]),
                SemanticSpan::new(1, 2, &[]),
                SemanticSpan::new(4, 9, &["variable"]),
                SemanticSpan::new(20, 22, &["variable"]),
            ],
        );
        assert_eq!(out, tokens);
        assert_eq!(stats.skipped, 5);
        assert_eq!(stats.applied, 0);
    }

    #[test]
    fn test_overlapping_span_is_skipped() {
        let (out, stats) = run(
            "abcdef",
            vec![gray("abcdef")],
            &[SemanticSpan::new(0, 3, &["variable"]), SemanticSpan::new(2, 4, &["variable"])],
        );
        assert_eq!(contents(&out), ["abc", "def"]);
        assert_eq!(stats, SpliceStats { applied: 1, skipped: 1 });
    }

    #[test]
    fn test_text_mismatch_is_skipped() {
        // tokens do not spell the line; the span text is not where it claims
        let (out, stats) = run("xyz", vec![gray("abc")], &[SemanticSpan::new(0, 1, &["variable"])]);
        assert_eq!(contents(&out), ["abc"]);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_span_cutting_a_character_is_skipped() {
        let (out, stats) = run("é", vec![gray("é")], &[SemanticSpan::new(0, 1, &["variable"])]);
        assert_eq!(contents(&out), ["é"]);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_unmatched_scopes_clear_color() {
        let (out, stats) = run("abc", vec![gray("abc")], &[SemanticSpan::new(0, 3, &["punctuation"])]);
        assert_eq!(out, [ThemedToken::new("abc", None)]);
        assert_eq!(stats.applied, 1);
    }

    #[test]
    fn test_first_matching_scope_wins() {
        let (out, _) = run(
            "abc",
            vec![gray("abc")],
            &[SemanticSpan::new(0, 3, &["punctuation", "variable", "entity.name.function"])],
        );
        assert_eq!(out[0].color.as_deref(), Some("#9CDCFE"));
    }

    #[test]
    fn test_no_spans_returns_tokens_unchanged() {
        let tokens = vec![gray("a"), gray("b")];
        let (out, stats) = run("ab", tokens.clone(), &[]);
        assert_eq!(out, tokens);
        assert_eq!(stats, SpliceStats::default());
    }
}
