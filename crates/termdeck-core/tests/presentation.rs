//! Integration tests for presentation loading and slide realization

use std::io::Cursor;
use std::path::{Path, PathBuf};

use termdeck_core::{
    load_presentation, load_presentation_from_reader, HeadlessHost, PresentationError, Slide,
    SlideKind, View,
};

fn fixture(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(path)
}

fn assert_fibonacci_deck(slides: &[Slide]) {
    assert_eq!(slides.len(), 11);
    assert_eq!(slides[0].kind(), SlideKind::Markdown);
    for slide in &slides[1..] {
        assert_eq!(slide.kind(), SlideKind::Code);
        assert!(slide.is_display_only());
        assert!(!slide.is_runnable());
    }
}

#[test]
fn test_load_fibonacci_separate_files() {
    let presentation = load_presentation(fixture("fibonacci/presentation.toml")).unwrap();
    assert_eq!(presentation.title.as_deref(), Some("Fibonacci"));
    assert_eq!(presentation.slides.len(), 11);

    let slides = presentation.create_slides().unwrap();
    assert_fibonacci_deck(&slides);
    assert!(slides[1].source().contains("long fibonacci(int n)"));
    assert!(slides[1].path().unwrap().ends_with("fibonacci.c"));
}

#[test]
fn test_load_fibonacci_inline() {
    let presentation = load_presentation(fixture("fibonacci-inline.toml")).unwrap();
    assert_eq!(presentation.slides.len(), 11);

    let slides = presentation.create_slides().unwrap();
    assert_fibonacci_deck(&slides);
    assert!(slides.iter().all(|slide| slide.path().is_none()));
}

#[test]
fn test_separate_and_inline_render_the_same_code() {
    let mut separate = load_presentation(fixture("fibonacci/presentation.toml"))
        .unwrap()
        .create_slides()
        .unwrap();
    let mut inline = load_presentation(fixture("fibonacci-inline.toml"))
        .unwrap()
        .create_slides()
        .unwrap();

    let mut host = HeadlessHost::default();
    for (a, b) in separate.iter_mut().zip(inline.iter_mut()).skip(1) {
        assert_eq!(a.render(&mut host), b.render(&mut host));
    }
}

#[test]
fn test_code_slide_render_uses_language_and_title() {
    let mut slides = load_presentation(fixture("fibonacci/presentation.toml"))
        .unwrap()
        .create_slides()
        .unwrap();

    let view = slides[3].render(&mut HeadlessHost::default());
    let View::Column(children) = view else {
        panic!("expected column, got {view:?}");
    };
    assert_eq!(children[0], View::heading("Rust"));
    match &children[1] {
        View::Code { language, code } => {
            assert_eq!(language, "rust");
            assert!(code.starts_with("fn fibonacci(n: u64) -> u64 {"));
        }
        other => panic!("expected code view, got {other:?}"),
    }
}

#[test]
fn test_in_memory_presentation() {
    let content = r##"
title = "My Presentation"
slides = [
    {source = "# This is slide 1"},
    {source = "import this", type = "python" },
]
"##;
    let presentation = load_presentation_from_reader(Cursor::new(content)).unwrap();
    let slides = presentation.create_slides().unwrap();

    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].kind(), SlideKind::Markdown);
    assert_eq!(slides[1].kind(), SlideKind::Python);
    assert!(slides[1].is_runnable());
}

#[test]
fn test_missing_entry_does_not_abort_the_deck() {
    let content = r#"
slides = [
    "tests/fixtures/fibonacci/intro.md",
    "tests/fixtures/fibonacci/missing.md",
    "tests/fixtures/fibonacci/fibonacci.go",
]
"#;
    let presentation = termdeck_core::loader::parse_presentation(
        content,
        termdeck_core::DocumentFormat::Toml,
        env!("CARGO_MANIFEST_DIR"),
    )
    .unwrap();
    let kinds: Vec<_> = presentation
        .create_slides()
        .unwrap()
        .iter()
        .map(Slide::kind)
        .collect();

    assert_eq!(kinds, vec![SlideKind::Markdown, SlideKind::Error, SlideKind::Code]);
}

#[test]
fn test_unknown_slide_type_fails_at_load_time() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("deck.toml");
    std::fs::write(&path, "slides = [{ type = \"slideshow\", source = \"x\" }]\n").unwrap();

    let err = load_presentation(&path).unwrap_err();
    assert!(matches!(err, PresentationError::Toml(_)));
    assert!(err.to_string().contains("unknown variant `slideshow`"));
}

#[test]
fn test_missing_document_reports_path() {
    let err = load_presentation(fixture("nope/presentation.toml")).unwrap_err();
    assert!(matches!(err, PresentationError::Io { .. }));
    assert!(err.to_string().contains("presentation.toml"));
}
