use stringsweep::rewrite::{Rewriter, SpanSubstitution, StringPattern};
use stringsweep::translate::{TranslateError, Translator};
use std::sync::Mutex;

/// Prefixes the target language and keeps every request.
#[derive(Default)]
struct Recording {
    seen: Mutex<Vec<String>>,
}

impl Translator for Recording {
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(format!("[{target}] {text}"))
    }
}

#[test]
fn test_min_length_counts_characters_not_bytes() {
    let rewriter = Rewriter::new(StringPattern::default(), 5);
    let translator = Recording::default();
    // "æøå12" is five characters in eight bytes, "æøå" three in six
    let content = "a = 'æøå12'; b = 'æøå'; c = 'abcd'; d = 'abcde';";

    let report = rewriter.rewrite(content, "da", &translator);

    assert_eq!(*translator.seen.lock().unwrap(), vec!["æøå12", "abcde"]);
    assert_eq!(report.skipped_short, 2);
    assert_eq!(
        report.content,
        "a = \"[da] æøå12\"; b = 'æøå'; c = 'abcd'; d = \"[da] abcde\";"
    );
}

#[test]
fn test_min_length_zero_sends_empty_strings() {
    let rewriter = Rewriter::new(StringPattern::default(), 0);
    let translator = Recording::default();

    let report = rewriter.rewrite("x = '';", "de", &translator);

    assert_eq!(*translator.seen.lock().unwrap(), vec![""]);
    assert_eq!(report.translated, 1);
}

#[test]
fn test_duplicate_literals_translated_once_per_match() {
    let rewriter = Rewriter::new(StringPattern::default(), 5);
    let translator = Recording::default();
    let content = "a = \"Save file\";\nb = 'Save file';\n";

    let report = rewriter.rewrite(content, "da", &translator);

    assert_eq!(translator.seen.lock().unwrap().len(), 2);
    assert_eq!(
        report.content,
        "a = \"[da] Save file\";\nb = \"[da] Save file\";\n"
    );
}

#[test]
fn test_php_template_with_escapes() {
    let rewriter = Rewriter::new(StringPattern::default(), 5);
    let translator = Recording::default();
    let content = concat!(
        "<?php\n",
        "$title = 'Don\\'t panic';\n",
        "$path = \"C:\\\\temp\";\n",
        "echo \"<h1>$title</h1>\";\n",
    );

    let report = rewriter.rewrite(content, "fr", &translator);

    assert_eq!(
        *translator.seen.lock().unwrap(),
        vec!["Don\\'t panic", "C:\\\\temp", "<h1>$title</h1>"]
    );
    assert_eq!(report.translated, 3);
    assert!(report.content.contains("\"[fr] <h1>$title</h1>\""));
}

#[test]
fn test_span_strategy_only_touches_matched_calls() {
    let pattern = StringPattern::new(r#"__\("([^"]*)"\)"#).unwrap();
    let content = "__(\"Sign in\");\nconsole.log(\"Sign in\");\n";
    let translator = Recording::default();

    let literal = Rewriter::new(pattern.clone(), 5).rewrite(content, "da", &translator);
    let span = Rewriter::new(pattern, 5)
        .with_strategy(Box::new(SpanSubstitution))
        .rewrite(content, "da", &translator);

    assert_eq!(
        literal.content,
        "__(\"[da] Sign in\");\nconsole.log(\"[da] Sign in\");\n"
    );
    assert_eq!(span.content, "__(\"[da] Sign in\");\nconsole.log(\"Sign in\");\n");
}

#[test]
fn test_pattern_without_groups_uses_whole_match() {
    let pattern = StringPattern::new(r"[A-Z][a-z]+ [a-z]+").unwrap();
    let translator = Recording::default();

    let report = Rewriter::new(pattern, 5)
        .with_strategy(Box::new(SpanSubstitution))
        .rewrite("label: Good morning", "da", &translator);

    assert_eq!(*translator.seen.lock().unwrap(), vec!["Good morning"]);
    assert_eq!(report.content, "label: \"[da] Good morning\"");
}

#[test]
fn test_span_strategy_keeps_adjacent_matches() {
    let pattern = StringPattern::new("([A-Za-z]+)").unwrap();
    let translator = Recording::default();

    let report = Rewriter::new(pattern, 5)
        .with_strategy(Box::new(SpanSubstitution))
        .rewrite("Hello'World", "da", &translator);

    assert_eq!(report.translated, 2);
    assert_eq!(report.content, "\"[da] Hello\"'\"[da] World\"");
}

#[test]
fn test_rewriting_output_again_translates_again() {
    let rewriter = Rewriter::new(StringPattern::default(), 5);
    let translator = Recording::default();

    let first = rewriter.rewrite("x = 'hello world';", "da", &translator);
    let second = rewriter.rewrite(&first.content, "da", &translator);

    assert_eq!(second.content, "x = \"[da] [da] hello world\";");
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let err = StringPattern::new("([unclosed").unwrap_err();
    assert!(err.to_string().contains("([unclosed"));
}
