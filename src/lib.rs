// Export modules for use in tests
pub mod document_library;
pub mod docx;
pub mod event_source;
pub mod export;
pub mod extractor;
pub mod main_app;
pub mod notification;
pub mod pagination;
pub mod panic_handler;
pub mod parsing;
pub mod paths;
pub mod question;
pub mod quiz_state;
pub mod session;
pub mod settings;
pub mod theme;
pub mod view;
pub mod widget;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main app components
pub use main_app::{App, AppAction, AppConfig, QuizFocus, Screen, run_app_with_event_source};
