//! termdeck - present slide decks in the terminal

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use termdeck_core::{Slide, VERSION};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod ansi;
mod app;
mod highlight;
mod markdown;
mod progress;
mod settings;
mod source;
mod terminal;
mod ui;

use app::PresentationApp;
use progress::{FileProgress, ProgressStore};
use settings::Settings;
use ui::Chrome;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TERMDECK_LOG";

#[derive(Parser)]
#[command(name = "termdeck")]
#[command(version = VERSION)]
#[command(about = "Run a presentation in the command-line", long_about = None)]
struct Cli {
    /// Presentation document, directory containing one, or a single slide file
    source: PathBuf,

    /// Hide the key hint bar
    #[arg(long)]
    disable_footer: bool,

    /// Continue from the last displayed slide
    #[arg(short = 'c', long = "continue")]
    continue_: bool,

    /// Resolve all slides, print a summary and exit
    #[arg(long)]
    check: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let settings = Settings::load();
    if cli.log_file.is_none() {
        if let Some(path) = &settings.log_file {
            init_logging(path)?;
        }
    }

    info!(version = VERSION, source = %cli.source.display(), "starting termdeck");

    let presentation = source::create_presentation(&cli.source)?;
    let slides = presentation
        .create_slides()
        .context("Failed to create slides")?;

    if cli.check {
        print_summary(presentation.title.as_deref(), &slides);
        return Ok(());
    }

    let progress = FileProgress::new(&settings.progress_file);
    let start = if cli.continue_ {
        progress.load().unwrap_or(0)
    } else {
        0
    };

    let mut app = PresentationApp::new(slides, presentation.title.clone().unwrap_or_default())
        .with_shell_cwd(presentation.working_dir())
        .with_editor(settings.editor_command())
        .with_progress(Box::new(progress))
        .with_start_index(start);

    let chrome = Chrome {
        show_header: settings.show_header,
        show_footer: settings.show_footer && !cli.disable_footer,
    };

    terminal::run(&mut app, chrome).context("Terminal error")?;
    info!(last = app.index(), slides = app.slide_count(), "presentation finished");
    Ok(())
}

/// Send tracing output to `path`. The terminal belongs to the presentation.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn print_summary(title: Option<&str>, slides: &[Slide]) {
    if let Some(title) = title {
        println!("{title}");
    }
    println!("{} slide(s)", slides.len());

    for (i, slide) in slides.iter().enumerate() {
        let detail = match slide.path() {
            Some(path) => path.display().to_string(),
            None => first_line(slide.source()),
        };
        let runnable = if slide.is_runnable() { "  (runnable)" } else { "" };
        println!("{:>3}  {:<8}  {detail}{runnable}", i + 1, slide.kind().to_string());
    }
}

fn first_line(text: &str) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if line.chars().count() > 60 {
        format!("{}...", line.chars().take(57).collect::<String>())
    } else {
        line.to_string()
    }
}
