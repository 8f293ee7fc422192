use quizokrat::App;
use quizokrat::docx::{DocxAuthor, extract_raw_text};
use quizokrat::export::{DocumentAuthor, ExportBlock};
use quizokrat::extractor::DocumentTextExtractor;
use quizokrat::test_utils::test_helpers::{
    FailingAuthor, StaticTextExtractor, create_test_app, test_config,
};
use std::io::Read;
use tempfile::TempDir;

const QUIZ: &str = "1. What is 2+2?\na) 3\nb) 4\nc) 5";

fn document_xml(path: &std::path::Path) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

#[test]
fn test_exported_document_bolds_only_the_chosen_answer() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("quiz.txt");
    std::fs::write(&source, QUIZ).unwrap();

    let mut app = create_test_app(dir.path());
    app.open_document(&source);
    app.select_option(1);
    let path = app.export().expect("export succeeds");

    let xml = document_xml(&path);
    let paragraphs: Vec<&str> = xml.split("<w:p>").skip(1).collect();
    let bold_of = |text: &str| {
        paragraphs
            .iter()
            .find(|p| p.contains(&format!(">{text}<")))
            .map(|p| p.contains("<w:b/>"))
    };
    assert_eq!(bold_of("1. What is 2+2?"), Some(true));
    assert_eq!(bold_of("a) 3"), Some(false));
    assert_eq!(bold_of("b) 4"), Some(true));
    assert_eq!(bold_of("c) 5"), Some(false));
}

#[test]
fn test_unanswered_quiz_still_exports_every_question() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("quiz.txt");
    std::fs::write(&source, QUIZ).unwrap();

    let mut app = create_test_app(dir.path());
    app.open_document(&source);
    let path = app.export().unwrap();

    let text = extract_raw_text(&path).unwrap();
    assert!(text.contains("1. What is 2+2?"));
    assert!(text.contains("c) 5"));
    // only the question itself is bold
    assert_eq!(document_xml(&path).matches("<w:b/>").count(), 1);
}

#[test]
fn test_failed_export_leaves_no_file_and_keeps_answers() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("quiz.txt");
    let extractor = StaticTextExtractor::new().with(&source, QUIZ);

    let mut app = App::with_backends(
        test_config(dir.path()),
        Box::new(extractor),
        Some(Box::new(FailingAuthor)),
    );
    assert!(app.open_document(&source));
    app.select_option(0);

    assert!(app.export().is_none());
    assert!(!dir.path().join("answers.docx").exists());
    assert_eq!(app.quiz().unwrap().selection(0), Some("a) 3"));
    let message = &app.notifications.current().unwrap().message;
    assert!(message.contains("writer broke"), "{message}");
}

#[test]
fn test_export_without_writer_is_refused() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("quiz.txt");
    std::fs::write(&source, QUIZ).unwrap();

    let mut app = App::with_backends(
        test_config(dir.path()),
        Box::new(DocumentTextExtractor),
        None,
    );
    app.open_document(&source);

    assert!(app.export().is_none());
    assert_eq!(
        app.notifications.current().unwrap().message,
        "Document writer is not available"
    );
}

#[test]
fn test_export_before_loading_is_refused() {
    let dir = TempDir::new().unwrap();
    let mut app = create_test_app(dir.path());

    assert!(app.export().is_none());
    assert_eq!(
        app.notifications.current().unwrap().message,
        "No questions loaded, nothing to export"
    );
}

#[test]
fn test_docx_quiz_document_loads() {
    let dir = TempDir::new().unwrap();
    let blocks = vec![
        ExportBlock::answer("Chapter 1 review", false),
        ExportBlock::question("1. Largest planet?"),
        ExportBlock::answer("a) Jupiter", false),
        ExportBlock::answer("b) Mars", false),
        ExportBlock::separator(),
        ExportBlock::question("2. Closest star?"),
        ExportBlock::answer("a) Sun", false),
    ];
    let bytes = DocxAuthor::default().author(&blocks).unwrap();
    let source = dir.path().join("planets.docx");
    std::fs::write(&source, bytes).unwrap();

    let mut app = create_test_app(dir.path());
    assert!(app.open_document(&source));

    let state = app.quiz().unwrap();
    assert_eq!(state.len(), 2);
    assert_eq!(state.questions()[0].options, vec!["a) Jupiter", "b) Mars"]);
    assert_eq!(state.questions()[1].options, vec!["a) Sun"]);
}

#[test]
fn test_broken_docx_reports_and_keeps_state() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.txt");
    std::fs::write(&good, QUIZ).unwrap();
    let broken = dir.path().join("broken.docx");
    std::fs::write(&broken, b"not a zip archive").unwrap();

    let mut app = create_test_app(dir.path());
    app.open_document(&good);
    app.select_option(2);

    assert!(!app.open_document(&broken));
    assert_eq!(app.quiz().unwrap().selection(0), Some("c) 5"));
    assert_eq!(app.loaded_document(), Some(good.as_path()));
    let notification = app.notifications.current().unwrap();
    assert_eq!(
        notification.level,
        quizokrat::notification::NotificationLevel::Error
    );
}

#[test]
fn test_document_without_questions_reports() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("essay.txt");
    std::fs::write(&source, "Just prose.\nNo numbered lines.").unwrap();

    let mut app = create_test_app(dir.path());
    assert!(!app.open_document(&source));
    assert!(app.quiz().is_none());
    assert!(
        app.notifications
            .current()
            .unwrap()
            .message
            .starts_with("No questions found")
    );
}
