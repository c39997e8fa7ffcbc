mod app;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod store;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{
    ensure_dir, init_data_dir, load_settings, log_file, resolve_data_dir, save_settings,
    settings_file, JsonFileRepository, Settings, TaskRepository,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use store::TaskStore;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "timebox")]
#[command(
    about = "A terminal task list with countdown timers and overtime tracking",
    long_about = None
)]
struct Cli {
    /// Data directory to use instead of the nearest .timebox
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .timebox directory in the current directory (or at --dir)
    Init,
    /// Print the task list with each task's timer
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let cwd = std::env::current_dir()?;
            let data_dir = init_data_dir(cli.dir.as_deref(), &cwd)?;
            save_settings(settings_file(&data_dir), &Settings::default())?;
            println!("Initialized timebox directory: {}", data_dir.display());
            println!();
            println!("Run 'timebox' to start tracking tasks.");
            Ok(())
        }
        Some(Commands::List) => {
            logging::init_stderr_logging();
            let data_dir = resolve_data_dir(cli.dir.as_deref())?;
            print_list(&JsonFileRepository::in_dir(&data_dir));
            Ok(())
        }
        None => run_tui(cli.dir),
    }
}

fn print_list(repo: &JsonFileRepository) {
    let list = repo.load();
    if list.is_empty() {
        println!("No tasks.");
        return;
    }

    let now = domain::now_ms();
    for task in list.tasks() {
        println!(
            "{} {:>9}  {:<12} {}",
            domain::check_glyph(task),
            domain::timer_label(task, now),
            domain::status_badge(task),
            task.text
        );
    }
}

fn run_tui(dir_override: Option<PathBuf>) -> Result<()> {
    let data_dir = resolve_data_dir(dir_override.as_deref())?;
    ensure_dir(&data_dir)?;
    logging::init_file_logging(&log_file(&data_dir))?;
    info!(dir = %data_dir.display(), "starting");

    let settings = load_settings(settings_file(&data_dir));
    let repo: Box<dyn TaskRepository> = Box::new(JsonFileRepository::in_dir(&data_dir));
    let store = TaskStore::open(repo, settings.tick_interval(), domain::now_ms());
    let mut app = AppState::new(store, settings);

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

    // Stop tick handles and save on exit
    if let Err(e) = app.shutdown() {
        error!(error = %e, "failed to save on exit");
        eprintln!("Error saving tasks: {}", e);
    }

    if let Err(err) = &result {
        error!(error = %err, "exited with error");
        eprintln!("Error: {}", err);
    }

    info!("stopped");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let tick_rate = app.settings.tick_interval();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick();
    }
}
