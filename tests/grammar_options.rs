use ruler_rs::{
    Grammar, GrammarError, GrammarOptions, GrammarOptionsBuilder, RuleGraph,
    grammar::{DEFAULT_SNIPPET_PREVIEW_LEN, GrammarOptionsError, MatchStatsSnapshot},
    parts,
};

fn greeting_graph() -> RuleGraph {
    let mut graph = RuleGraph::new();
    let name = graph.pattern(r"[A-Z][a-z]+").expect("pattern should compile");
    graph.name(name, "name").expect("name should apply");
    let root = graph.sequence(parts!["Hello, ", name, "!"]).expect("sequence should build");
    graph.name(root, "greeting").expect("name should apply");
    graph.set_root(root).expect("root should be accepted");
    graph
}

#[test]
fn grammar_options_when_defaults_used_then_values_are_stable() {
    let options = GrammarOptions::default();
    assert_eq!(options.snippet_preview_len, DEFAULT_SNIPPET_PREVIEW_LEN);
    assert!(!options.require_full_match);
    assert!(!options.debug);
    assert_eq!(options.validate(), Ok(()));
}

#[test]
fn grammar_options_when_all_fields_customized_then_values_are_assigned() {
    let options = GrammarOptionsBuilder::default()
        .snippet_preview_len(12)
        .require_full_match(true)
        .debug(true)
        .build()
        .expect("options should build");

    assert_eq!(
        options,
        GrammarOptions {
            snippet_preview_len: 12,
            require_full_match: true,
            debug: true,
        }
    );
}

#[test]
fn grammar_options_when_preview_len_zero_then_build_fails() {
    let err = GrammarOptions::builder()
        .snippet_preview_len(0)
        .build()
        .expect_err("zero preview length should fail");
    assert_eq!(
        err,
        GrammarOptionsError::SnippetPreviewLenInvalid { provided: 0 }
    );
}

#[test]
fn grammar_when_options_invalid_then_construction_fails() {
    let options = GrammarOptions {
        snippet_preview_len: 0,
        ..GrammarOptions::default()
    };
    let err = Grammar::new(&greeting_graph(), Some(options)).expect_err("grammar should fail");
    assert_eq!(
        err,
        GrammarError::Options(GrammarOptionsError::SnippetPreviewLenInvalid { provided: 0 })
    );
}

#[test]
fn grammar_options_when_partially_deserialized_then_defaults_fill_the_rest() {
    let options: GrammarOptions =
        serde_json::from_str(r#"{"require_full_match": true}"#).expect("options should parse");
    assert!(options.require_full_match);
    assert_eq!(options.snippet_preview_len, DEFAULT_SNIPPET_PREVIEW_LEN);

    let encoded = serde_json::to_string(&options).expect("options should serialize");
    let decoded: GrammarOptions = serde_json::from_str(&encoded).expect("options should parse");
    assert_eq!(decoded, options);
}

#[test]
fn grammar_stats_when_matching_then_counts_each_outcome() {
    let grammar = Grammar::new(&greeting_graph(), None).expect("grammar should build");
    assert!(grammar.match_text("Hello, World!").is_match());
    assert!(grammar.match_text("Hello, world!").mismatch().is_some());
    assert!(grammar.match_text("Hello, Ann!").is_match());

    assert_eq!(
        grammar.stats(),
        MatchStatsSnapshot {
            attempts: 3,
            matches: 2,
            mismatches: 1,
        }
    );
}

#[test]
fn grammar_when_debug_enabled_then_outcomes_are_unchanged() {
    let options = GrammarOptions::builder()
        .debug(true)
        .build()
        .expect("options should build");
    let debug = Grammar::new(&greeting_graph(), Some(options)).expect("grammar should build");
    let plain = Grammar::new(&greeting_graph(), None).expect("grammar should build");

    for text in ["Hello, Bob!", "Hello, bob!", ""] {
        assert_eq!(debug.match_text(text), plain.match_text(text));
    }
}

#[test]
fn grammar_when_shared_across_threads_then_matches_independently() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Grammar>();

    let grammar = Grammar::new(&greeting_graph(), None).expect("grammar should build");
    let inputs = ["Hello, Ann!", "Hello, Bob!", "Hello, ann!", "Hello, Rachel!"];

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for text in inputs {
                    let outcome = grammar.match_text(text);
                    let expected = text != "Hello, ann!";
                    assert_eq!(outcome.is_match(), expected, "input {text:?}");
                    if let Some(tree) = outcome.matched() {
                        let name = tree.child("name").and_then(|node| node.matched());
                        let expected_name = text
                            .strip_prefix("Hello, ")
                            .and_then(|rest| rest.strip_suffix('!'));
                        assert_eq!(name, expected_name);
                    }
                }
            });
        }
    });

    let stats = grammar.stats();
    assert_eq!(stats.attempts, 16);
    assert_eq!(stats.mismatches, 4);
}

#[test]
fn grammar_when_root_shared_then_tree_is_reused() {
    let grammar = Grammar::new(&greeting_graph(), None).expect("grammar should build");
    let tree = grammar.tree();
    let root = tree.root();

    assert_eq!(tree.node(root).and_then(|node| node.name()), Some("greeting"));
    assert_eq!(
        grammar
            .match_text("Hello, Ann!")
            .matched()
            .map(|matched| matched.rule()),
        Some(root)
    );
}
