//! End-to-end highlighting through the public API

use std::fs;

use scopetint::grammar::{LineTokens, PackedLineTokens, ScopedToken};
use scopetint::metadata::{self, StandardTokenType};
use scopetint::semantic::StaticAnalyzer;
use scopetint::theme::{FontStyle, RuleStyle};
use scopetint::tokenize::split_lines;
use scopetint::{
    tokenize_with_theme, ColorMap, Grammar, Highlighter, SemanticRecord, Theme, ThemeRule, ThemeRuleMatcher,
    TokenizeOptions,
};

/// Gives every line one token with a fixed scope stack
struct OneScopeGrammar {
    scopes: Vec<String>,
    metadata: u32,
}

impl OneScopeGrammar {
    fn new(theme: &Theme, color_map: &ColorMap, scope: &str) -> Self {
        let mut matcher = ThemeRuleMatcher::new(&theme.rules);
        let rule = matcher.best_rule(scope);
        let foreground = rule
            .foreground()
            .and_then(|color| color_map.id_of(color))
            .unwrap_or(ColorMap::DEFAULT_FOREGROUND_ID);
        Self {
            scopes: vec!["source.demo".to_string(), scope.to_string()],
            metadata: metadata::pack(
                1,
                StandardTokenType::for_scope(scope),
                rule.style.font_style,
                foreground,
                ColorMap::DEFAULT_BACKGROUND_ID,
            ),
        }
    }
}

impl Grammar for OneScopeGrammar {
    type State = ();

    fn scope_name(&self) -> &str {
        "source.demo"
    }

    fn tokenize_line(&self, line: &str, _prior: Option<&()>) -> LineTokens<()> {
        LineTokens {
            tokens: vec![ScopedToken {
                start: 0,
                end: line.len(),
                scopes: self.scopes.clone(),
            }],
            state: (),
        }
    }

    fn tokenize_line_packed(&self, _line: &str, _prior: Option<&()>) -> PackedLineTokens<()> {
        PackedLineTokens {
            tokens: vec![0, self.metadata],
            state: (),
        }
    }
}

#[test]
fn longest_prefix_rule_colors_the_token() {
    let theme = Theme::new(
        "prefixes",
        vec![
            ThemeRule::new("a", RuleStyle::fg("#111111")),
            ThemeRule::new("a.b", RuleStyle::fg("#222222")),
        ],
    );
    let color_map = ColorMap::from_theme(&theme);
    let grammar = OneScopeGrammar::new(&theme, &color_map, "a.b.c");
    let lines = tokenize_with_theme(&theme, &color_map, "text", &grammar, "demo", None).unwrap();
    assert_eq!(lines[0].len(), 1);
    assert_eq!(lines[0][0].color.as_deref(), Some("#222222"));
}

#[test]
fn matcher_prefers_specific_rule_and_keeps_identity() {
    let theme = Theme::new(
        "variables",
        vec![
            ThemeRule::new("variable", RuleStyle::fg("#aaaaaa")),
            ThemeRule::new("variable.other", RuleStyle::fg("#bbbbbb")),
        ],
    );
    let mut matcher = ThemeRuleMatcher::new(&theme.rules);
    let first = matcher.best_rule("variable.other.less");
    assert_eq!(first.foreground(), Some("#bbbbbb"));
    assert!(std::ptr::eq(first, matcher.best_rule("variable.other.less")));
    assert_eq!(matcher.best_rule("variable.parameter").foreground(), Some("#aaaaaa"));
    assert!(matcher.best_rule("variables").is_empty_rule());
}

#[test]
fn every_line_is_covered() {
    let highlighter = Highlighter::new(Theme::builtin_dark());
    let samples = [
        ("rust", "/// Docs\nfn main() {\r\n    let s = \"a /* b\";\n    println!(\"{s}\"); // done\n}\n"),
        ("c", "#include <stdio.h>\n/* multi\n\n   line */ int x = 0x1F;\n"),
        ("python", "def f(x):\n    '''doc\n    string'''\n    return x + 1.5\n"),
        ("toml", "[package]\nname = \"scopetint\"\nversion = \"0.1.0\"\n"),
        ("markdown", "# Title\n\nSome **bold** and `code`.\n```\nraw\n```\n"),
    ];
    for (lang, source) in samples {
        let lines = highlighter.code_to_tokens(source, lang, None).unwrap();
        let expected = split_lines(source);
        assert_eq!(lines.len(), expected.len(), "{lang}");
        for (tokens, line) in lines.iter().zip(expected) {
            let joined: String = tokens.iter().map(|t| t.content.as_str()).collect();
            assert_eq!(joined, line, "{lang}");
            assert!(tokens.iter().all(|t| !t.content.is_empty()), "{lang}");
        }
    }
}

#[test]
fn block_comment_state_carries_over() {
    let highlighter = Highlighter::new(Theme::builtin_dark());
    let lines = highlighter.code_to_tokens("int a; /* start\nstill comment\nend */ int b;", "c", None).unwrap();
    assert_eq!(lines[1].len(), 1);
    assert_eq!(lines[1][0].color.as_deref(), Some("#6A9955"));
    assert!(lines[1][0].font_style.is_italic());
    assert_eq!(lines[2][0].content, "end */");
    assert_eq!(lines[2][0].color.as_deref(), Some("#6A9955"));
}

#[test]
fn semantic_tokens_refine_grammar_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let options = TokenizeOptions {
        temp_dir: Some(dir.path().to_path_buf()),
        ..TokenizeOptions::default()
    };
    let highlighter = Highlighter::new(Theme::builtin_dark()).with_options(options);
    let analyzer = StaticAnalyzer::new(vec![SemanticRecord {
        line: 0,
        start_index: 5,
        end_index: 10,
        scopes: vec!["entity.name.function".to_string()],
    }]);

    let lines = highlighter.code_to_tokens("helloWorld;", "c", Some(&analyzer)).unwrap();
    let contents: Vec<&str> = lines[0].iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, ["hello", "World", ";"]);
    assert_eq!(lines[0][0].color.as_deref(), Some("#D4D4D4"));
    assert_eq!(lines[0][1].color.as_deref(), Some("#DCDCAA"));

    // the document was written for the analyzer under its content hash
    let written: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(written.len(), 1);
}

#[test]
fn theme_file_drives_html_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mini.json");
    fs::write(
        &path,
        r##"{
            "name": "Mini",
            "colors": { "editor.foreground": "#333333", "editor.background": "#fafafa" },
            "tokenColors": [
                { "scope": "keyword", "settings": { "foreground": "#0000ff", "fontStyle": "bold" } }
            ]
        }"##,
    )
    .unwrap();
    let theme = Theme::load(&path).unwrap();
    let highlighter = Highlighter::new(theme);
    let html = highlighter.code_to_html("let x", "rust", None).unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<pre class="scopetint" style="background-color: #fafafa"><div class="language-id">rust</div><code>"#,
            r#"<span style="color: #0000FF; font-weight: bold">let</span><span style="color: #333333"> x</span>"#,
            "</code></pre>"
        )
    );
}

#[test]
fn explanations_name_matching_rules() {
    let options = TokenizeOptions {
        explain: true,
        ..TokenizeOptions::default()
    };
    let highlighter = Highlighter::new(Theme::builtin_dark()).with_options(options);
    let lines = highlighter.code_to_tokens("if x", "python", None).unwrap();
    let explanation = lines[0][0].explanation.as_ref().unwrap();
    assert_eq!(explanation[0].content, "if");
    let scopes: Vec<&str> = explanation[0].scopes.iter().map(|s| s.scope_name.as_str()).collect();
    assert_eq!(scopes, ["source.python", "keyword.control.python"]);
    assert_eq!(explanation[0].scopes[1].theme_matches, ["keyword", "keyword.control"]);
    assert_eq!(lines[0][0].font_style, FontStyle::NONE);
}
