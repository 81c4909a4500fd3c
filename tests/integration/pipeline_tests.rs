use stringsweep::pipeline::{Pipeline, RunOptions};
use stringsweep::rewrite::{Rewriter, StringPattern};
use stringsweep::scanner::WalkerConfig;
use stringsweep::translate::{TranslateError, Translator};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Translates into a recognizable form and counts calls.
#[derive(Default)]
struct Marker {
    calls: AtomicUsize,
}

impl Translator for Marker {
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{target}] {text}"))
    }
}

/// Fails every call like an unreachable service.
#[derive(Default)]
struct Unavailable {
    calls: AtomicUsize,
}

impl Translator for Unavailable {
    fn translate(&self, _text: &str, _target: &str) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TranslateError::Service {
            status: 503,
            message: "Service Unavailable".to_string(),
        })
    }
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), "var x = \"hello world\";").unwrap();
    fs::write(dir.path().join("b.php"), "$y = \"hi\";").unwrap();
    dir
}

fn pipeline(translator: Box<dyn Translator>, dry_run: bool) -> Pipeline {
    Pipeline::new(
        Rewriter::new(StringPattern::default(), 5),
        translator,
        RunOptions::new("da", dry_run),
    )
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_translates_long_strings_and_leaves_short_ones() {
    let dir = site();

    let summary = pipeline(Box::new(Marker::default()), false)
        .walk_and_process(dir.path(), &WalkerConfig::default())
        .unwrap();

    assert_eq!(read(&dir.path().join("a.js")), "var x = \"[da] hello world\";");
    assert_eq!(read(&dir.path().join("b.php")), "$y = \"hi\";");
    assert_eq!(summary.files, 2);
    assert_eq!(summary.strings_translated, 1);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_excluded_absolute_path_is_untouched() {
    let dir = site();
    let a = dir.path().join("a.js");
    fs::write(dir.path().join("b.php"), "$y = \"hello there\";").unwrap();
    let config = WalkerConfig::new(
        vec!["php".to_string(), "js".to_string()],
        [a.to_string_lossy().to_string()],
    );

    let summary = pipeline(Box::new(Marker::default()), false)
        .walk_and_process(dir.path(), &config)
        .unwrap();

    assert_eq!(read(&a), "var x = \"hello world\";");
    assert_eq!(read(&dir.path().join("b.php")), "$y = \"[da] hello there\";");
    assert_eq!(summary.files, 1);
}

#[test]
fn test_failing_service_keeps_every_string() {
    let dir = TempDir::new().unwrap();
    let content = "var a = \"first string\";\nvar b = 'second string';\n";
    fs::write(dir.path().join("app.js"), content).unwrap();
    let translator = Arc::new(Unavailable::default());

    let summary = pipeline(Box::new(translator.clone()), false)
        .walk_and_process(dir.path(), &WalkerConfig::default())
        .unwrap();

    // Originals are substituted back double-quoted
    assert_eq!(
        read(&dir.path().join("app.js")),
        "var a = \"first string\";\nvar b = \"second string\";\n"
    );
    assert_eq!(translator.calls.load(Ordering::SeqCst), 2);
    assert_eq!(summary.translation_failures, 2);
    assert_eq!(summary.strings_translated, 0);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_dry_run_leaves_tree_byte_identical() {
    let dir = site();
    let before_a = fs::read(dir.path().join("a.js")).unwrap();
    let before_b = fs::read(dir.path().join("b.php")).unwrap();
    let translator = Arc::new(Marker::default());

    let summary = pipeline(Box::new(translator.clone()), true)
        .walk_and_process(dir.path(), &WalkerConfig::default())
        .unwrap();

    assert_eq!(fs::read(dir.path().join("a.js")).unwrap(), before_a);
    assert_eq!(fs::read(dir.path().join("b.php")).unwrap(), before_b);
    assert_eq!(summary.dry_run, 2);
    assert_eq!(summary.rewritten, 0);
    // Translation still happens in a dry run
    assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_second_pass_makes_no_translator_calls() {
    let dir = site();
    let translator = Arc::new(Marker::default());
    let pipeline = pipeline(Box::new(translator.clone()), false);

    pipeline
        .walk_and_process(dir.path(), &WalkerConfig::default())
        .unwrap();
    let after_first = read(&dir.path().join("a.js"));
    let second = pipeline
        .walk_and_process(dir.path(), &WalkerConfig::default())
        .unwrap();

    assert_eq!(second.unchanged, 2);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(read(&dir.path().join("a.js")), after_first);
}

#[test]
fn test_unreadable_file_does_not_stop_others() {
    let dir = site();
    fs::write(dir.path().join("binary.js"), [0xff, 0xfe, 0x00, 0x22]).unwrap();

    let summary = pipeline(Box::new(Marker::default()), false)
        .walk_and_process(dir.path(), &WalkerConfig::default())
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].0, dir.path().join("binary.js"));
    assert_eq!(read(&dir.path().join("a.js")), "var x = \"[da] hello world\";");
}

#[test]
fn test_nested_directories_and_other_extensions() {
    let dir = TempDir::new().unwrap();
    let deep = dir.path().join("app").join("views").join("admin");
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join("index.php"), "<?php echo 'Welcome aboard'; ?>").unwrap();
    fs::write(deep.join("style.css"), "content: \"Welcome aboard\";").unwrap();
    fs::write(dir.path().join("app").join("main.ts"), "let s = \"Welcome aboard\";").unwrap();

    let summary = pipeline(Box::new(Marker::default()), false)
        .walk_and_process(dir.path(), &WalkerConfig::default())
        .unwrap();

    assert_eq!(summary.files, 1);
    assert_eq!(
        read(&deep.join("index.php")),
        "<?php echo \"[da] Welcome aboard\"; ?>"
    );
    assert_eq!(read(&deep.join("style.css")), "content: \"Welcome aboard\";");
}

#[test]
fn test_custom_extensions() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.ts"), "let s = \"Welcome aboard\";").unwrap();
    fs::write(dir.path().join("a.js"), "var x = \"hello world\";").unwrap();
    let config = WalkerConfig::new(vec!["ts".to_string()], Vec::<String>::new());

    let summary = pipeline(Box::new(Marker::default()), false)
        .walk_and_process(dir.path(), &config)
        .unwrap();

    assert_eq!(summary.files, 1);
    assert_eq!(read(&dir.path().join("main.ts")), "let s = \"[da] Welcome aboard\";");
    assert_eq!(read(&dir.path().join("a.js")), "var x = \"hello world\";");
}

#[test]
fn test_many_files_processed_concurrently() {
    let dir = TempDir::new().unwrap();
    for i in 0..64 {
        fs::write(
            dir.path().join(format!("file_{i}.js")),
            format!("var s = \"message number {i}\";"),
        )
        .unwrap();
    }
    let translator = Arc::new(Marker::default());

    let summary = pipeline(Box::new(translator.clone()), false)
        .walk_and_process(dir.path(), &WalkerConfig::default())
        .unwrap();

    assert_eq!(summary.rewritten, 64);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 64);
    for i in 0..64 {
        assert_eq!(
            read(&dir.path().join(format!("file_{i}.js"))),
            format!("var s = \"[da] message number {i}\";")
        );
    }
}
