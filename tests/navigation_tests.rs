use quizokrat::event_source::SimulatedEventSource;
use quizokrat::main_app::QuizFocus;
use quizokrat::test_utils::test_helpers::{
    capture_terminal_state, create_test_app, create_test_terminal, find_on_screen,
};
use quizokrat::App;
use quizokrat::view::QuizView;
use std::time::Instant;
use tempfile::TempDir;

fn paged_quiz(count: usize) -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let text: String = (1..=count)
        .map(|n| format!("{n}. Question number {n}\na) first {n}\nb) second {n}\n"))
        .collect();
    let path = dir.path().join("paged.txt");
    std::fs::write(&path, text).unwrap();

    let mut app = create_test_app(dir.path());
    assert!(app.open_document(&path));
    (app, dir)
}

fn click(app: &mut App, (column, row): (u16, u16)) {
    app.handle_event(SimulatedEventSource::left_click(column, row));
}

#[test]
fn test_twenty_one_questions_make_two_marker_pages() {
    let (mut app, _dir) = paged_quiz(21);
    let mut terminal = create_test_terminal(100, 30);
    terminal.draw(|f| app.draw(f)).unwrap();

    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("Page 1 / 2"));
    assert!(screen.contains(" 20 "));
    let view = QuizView::project(app.quiz().unwrap());
    assert_eq!(view.markers.len(), 20);

    let arrow = find_on_screen(&terminal, "▶").expect("next page arrow");
    click(&mut app, arrow);
    assert_eq!(app.quiz().unwrap().nav_page(), 1);
    assert_eq!(app.quiz().unwrap().current_index(), 0);

    terminal.draw(|f| app.draw(f)).unwrap();
    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("Page 2 / 2"));
    assert!(screen.contains("◀"));

    let view = QuizView::project(app.quiz().unwrap());
    assert_eq!(view.markers.len(), 1);
    let marker = find_on_screen(&terminal, "21").expect("marker 21");
    click(&mut app, marker);
    assert_eq!(app.quiz().unwrap().current_index(), 20);

    terminal.draw(|f| app.draw(f)).unwrap();
    assert!(capture_terminal_state(&terminal).contains("21. Question number 21"));
}

#[test]
fn test_page_arrow_keys_clamp() {
    let (mut app, _dir) = paged_quiz(21);

    app.handle_event(SimulatedEventSource::char_key('['));
    assert_eq!(app.quiz().unwrap().nav_page(), 0);

    app.handle_event(SimulatedEventSource::char_key(']'));
    app.handle_event(SimulatedEventSource::char_key(']'));
    assert_eq!(app.quiz().unwrap().nav_page(), 1);
}

#[test]
fn test_clicking_option_records_answer_and_advances() {
    let (mut app, _dir) = paged_quiz(3);
    let mut terminal = create_test_terminal(80, 24);
    terminal.draw(|f| app.draw(f)).unwrap();

    let option = find_on_screen(&terminal, "b) second 1").expect("option visible");
    click(&mut app, option);

    let state = app.quiz().unwrap();
    assert_eq!(state.selection(0), Some("b) second 1"));
    assert!(app.has_pending_advance());

    app.tick(Instant::now());
    assert_eq!(app.quiz().unwrap().current_index(), 1);
}

#[test]
fn test_marker_keyboard_navigation_stays_on_page() {
    let (mut app, _dir) = paged_quiz(25);

    app.handle_event(SimulatedEventSource::char_key(']'));
    app.handle_event(SimulatedEventSource::code_key(
        quizokrat::event_source::KeyCode::Tab,
    ));
    assert_eq!(app.focus(), QuizFocus::Markers);
    assert_eq!(app.marker_cursor(), 20);

    for _ in 0..10 {
        app.handle_event(SimulatedEventSource::char_key('l'));
    }
    assert_eq!(app.marker_cursor(), 24);

    for _ in 0..10 {
        app.handle_event(SimulatedEventSource::char_key('h'));
    }
    assert_eq!(app.marker_cursor(), 20);

    app.handle_event(SimulatedEventSource::char_key('l'));
    app.handle_event(SimulatedEventSource::code_key(
        quizokrat::event_source::KeyCode::Enter,
    ));
    assert_eq!(app.quiz().unwrap().current_index(), 21);
    assert_eq!(app.focus(), QuizFocus::Options);
}

#[test]
fn test_current_marker_is_highlighted_after_navigation() {
    let (mut app, _dir) = paged_quiz(5);
    app.handle_event(SimulatedEventSource::char_key('l'));
    app.handle_event(SimulatedEventSource::char_key('l'));

    let mut terminal = create_test_terminal(80, 24);
    terminal.draw(|f| app.draw(f)).unwrap();

    let (x, y) = find_on_screen(&terminal, " 3 ").expect("marker 3");
    let buffer = terminal.backend().buffer();
    let palette = quizokrat::theme::current_theme();
    assert_eq!(buffer[(x + 1, y)].bg, palette.base_0d);
    assert!(capture_terminal_state(&terminal).contains("Question 3 / 5"));
}
