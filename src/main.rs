mod app;
mod dashboard;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod sound;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use dashboard::{pick_quote, Coordinates, Dashboard};
use domain::Settings;
use persistence::{
    blob_file, ensure_dir, init_local_dir, load, load_settled, log_file, resolve_data_dir,
    LoadSource,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sound::SystemChime;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A terminal Pomodoro timer with tasks, daily stats and themes", long_about = None)]
struct Cli {
    /// Data directory. Defaults to a local .focusflow or ~/.focusflow
    #[arg(long, global = true, env = "FOCUSFLOW_DIR")]
    data_dir: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Settings overrides applied at startup and saved like form edits
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Focus length in minutes
    #[arg(long)]
    focus: Option<u32>,
    /// Short break length in minutes
    #[arg(long)]
    short_break: Option<u32>,
    /// Long break length in minutes
    #[arg(long)]
    long_break: Option<u32>,
    /// Focus sessions between long breaks
    #[arg(long)]
    interval: Option<u32>,
    /// Turn sound off
    #[arg(long)]
    no_sound: bool,
    /// Latitude for the weather widget
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude for the weather widget
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

impl Overrides {
    /// Apply to `settings`. Returns true when anything changed.
    fn apply(&self, settings: &mut Settings) -> bool {
        let before = settings.clone();
        if let Some(minutes) = self.focus {
            settings.pomodoro_time = minutes;
        }
        if let Some(minutes) = self.short_break {
            settings.short_break_time = minutes;
        }
        if let Some(minutes) = self.long_break {
            settings.long_break_time = minutes;
        }
        if let Some(n) = self.interval {
            settings.long_break_interval = n;
        }
        if self.no_sound {
            settings.sound_enabled = false;
        }
        settings.sanitize();
        *settings != before
    }

    fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focusflow directory in the current directory
    Init,
    /// Write a markdown report of focus stats and tasks
    Report {
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a short summary of today and all time
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_dir()?;
            println!("Initialized focusflow directory: {}", data_dir.display());
            println!();
            println!("FocusFlow will now keep its data in this directory.");
            println!("Run 'focusflow' to start a session.");
            Ok(())
        }
        Some(Commands::Report { output }) => {
            logging::init_stderr();
            let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
            let today = Local::now().date_naive();

            println!("Generating report for {}...", today);
            let report_path = report::generate_report(&data_dir, today, output)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Some(Commands::Stats) => {
            logging::init_stderr();
            let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
            let data = load_settled(&blob_file(&data_dir)).context("Failed to load stored data")?;
            print!("{}", report::summary_text(&data, Local::now().date_naive()));
            Ok(())
        }
        None => run_tui(cli.data_dir, &cli.overrides),
    }
}

fn run_tui(data_dir: Option<PathBuf>, overrides: &Overrides) -> Result<()> {
    let data_dir = ensure_dir(&resolve_data_dir(data_dir.as_deref())?)?;
    logging::init(&log_file(&data_dir))?;
    info!(dir = %data_dir.display(), "starting focusflow");

    let blob_path = blob_file(&data_dir);
    let (mut data, source) = load(&blob_path).context("Failed to load stored data")?;
    if source == LoadSource::Recovered {
        eprintln!("Stored data was unreadable; a backup was kept and defaults are in use.");
    }

    let overridden = overrides.apply(&mut data.settings);

    let mut dashboard = Dashboard::new(pick_quote(&mut rand::thread_rng()));
    dashboard.start_weather(overrides.coordinates());

    let mut app = AppState::new(data, Some(blob_path), dashboard, Box::new(SystemChime));
    app.needs_save = overridden || source.needs_rewrite();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save() {
        eprintln!("Error saving state: {:#}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
    }

    info!("focusflow stopped");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let frame = ticker::frame_duration();
    let mut title = String::new();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let next_title = app.terminal_title();
        if next_title != title {
            execute!(terminal.backend_mut(), SetTitle(&next_title))?;
            title = next_title;
        }

        // Wake for input, the next due tick, or the next frame
        if event::poll(app.ticker.timeout(Instant::now(), frame))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick_if_due(Instant::now());
        app.dashboard.poll_weather();

        if app.needs_save {
            if let Err(e) = app.save() {
                warn!(error = %format!("{:#}", e), "save failed, will retry");
            }
        }
    }
}
