//! Leaves the terminal usable when the app dies.

use crossterm::{
    cursor::Show,
    event::DisableMouseCapture,
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use std::io;
use std::panic::{self, PanicHookInfo};

/// Installs `better-panic` backtraces behind a hook that first gives the
/// shell its terminal back and records the panic in the log file.
pub fn initialize_panic_handler() {
    better_panic::Settings::debug()
        .most_recent_first(false)
        .lineno_suffix(true)
        .install();

    let report = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        log::error!("quizokrat panicked: {}", describe(info));
        report(info);
        std::process::exit(1);
    }));
}

fn describe(info: &PanicHookInfo) -> String {
    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>");
    match info.location() {
        Some(location) => format!("{payload} at {}:{}", location.file(), location.line()),
        None => payload.to_string(),
    }
}

/// Raw mode off, main screen, mouse capture off, cursor visible. Used on
/// normal exit and from the panic hook, so every step is best effort.
pub fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        log::warn!("Could not leave raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show) {
        log::warn!("Could not restore the terminal screen: {e}");
    }
}
