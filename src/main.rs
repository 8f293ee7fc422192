use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::EnableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode},
};
use log::{LevelFilter, error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, WriteLogger};

use quizokrat::event_source::KeyboardEventSource;
use quizokrat::extractor::DocumentTextExtractor;
use quizokrat::panic_handler;
use quizokrat::paths;
use quizokrat::session::load_quiz;
use quizokrat::settings;
use quizokrat::theme::{ThemeId, set_theme};
use quizokrat::{App, AppConfig, run_app_with_event_source};

#[derive(Parser, Debug)]
#[command(author, version, about = "Answer multiple-choice quizzes from Word documents")]
struct Cli {
    /// Document to open, or a directory to choose one from
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Directory the answers document is written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// File name of the answers document
    #[arg(long, value_name = "NAME")]
    output_name: Option<String>,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,

    /// Print the parsed questions as JSON and exit
    #[arg(long)]
    print: bool,
}

fn init_logging(level: LevelFilter) {
    let log_file = paths::resolve_log_path().and_then(|path| {
        File::create(&path).with_context(|| format!("Failed to create {path:?}"))
    });
    match log_file {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {e}");
            }
        }
        Err(e) => eprintln!("Logging disabled: {e:#}"),
    }
}

fn print_questions(path: &Path) -> Result<()> {
    if path.is_dir() {
        anyhow::bail!("--print needs a document, {} is a directory", path.display());
    }
    let state = load_quiz(&DocumentTextExtractor, path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let json = serde_json::to_string_pretty(state.questions())?;
    println!("{json}");
    Ok(())
}

fn split_target(path: &Path) -> (PathBuf, Option<PathBuf>) {
    if path.is_file() {
        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        (directory, Some(path.to_path_buf()))
    } else {
        (path.to_path_buf(), None)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    info!("Starting quizokrat");

    settings::load_settings();
    if let Some(theme) = ThemeId::from_name(&settings::get_theme_name()) {
        set_theme(theme);
    }
    if let Some(name) = &cli.output_name {
        settings::set_export_file_name(name.as_str());
    }
    if let Some(dir) = &cli.export_dir {
        settings::set_export_dir(Some(dir.clone()));
    }

    if cli.print {
        return print_questions(&cli.path);
    }

    let export_dir = paths::resolve_export_dir(settings::get_export_dir().as_deref())?;
    let (document_directory, initial_document) = split_target(&cli.path);

    panic_handler::initialize_panic_handler();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new_with_config(AppConfig::from_settings(document_directory, export_dir));
    if let Some(document) = initial_document {
        app.open_document(&document);
    }

    let mut event_source = KeyboardEventSource;
    let res = run_app_with_event_source(&mut terminal, &mut app, &mut event_source);

    panic_handler::restore_terminal();

    if let Err(err) = &res {
        error!("Application error: {err:?}");
    }
    info!("Shutting down quizokrat");
    res
}
