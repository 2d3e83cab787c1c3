use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    net::SocketAddr,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{info, warn};
use wordrush::{
    app::{App, AppState},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    controller::SessionController,
    countdown::IntervalDriver,
    logging,
    runtime::{spawn_validation, CrosstermEventSource, FixedTicker, GameEvent, Runner},
    server::{self, WordBank},
    word_service::HttpWordService,
    TICK_RATE_MS,
};

/// timed wordle-style word guessing in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess as many five letter words as you can before the clock runs out. Words come from a word service; run `wordrush serve` to host one locally."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// number of seconds the session lasts
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    number_of_secs: Option<u32>,

    /// base url of the word service
    #[clap(short = 'u', long)]
    service_url: Option<String>,

    /// remember the given options as defaults
    #[clap(long)]
    save_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// host the word service
    Serve {
        /// address to listen on
        #[clap(short, long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,

        /// JSON array of words to serve instead of the bundled list
        #[clap(short, long)]
        words: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command.clone() {
        Some(Command::Serve { addr, words }) => run_server(addr, words),
        None => play(cli),
    }
}

fn run_server(addr: SocketAddr, words: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    logging::init_stdout_logging();

    let bank = match words {
        Some(path) => WordBank::from_path(&path)?,
        None => WordBank::bundled()?,
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(addr, bank))?;
    Ok(())
}

fn play(cli: Cli) -> Result<(), Box<dyn Error>> {
    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(e) = logging::init_file_logging(&path) {
            eprintln!("logging disabled: {e}");
        }
    }

    let store = FileConfigStore::new();
    let config = store
        .load()
        .with_overrides(cli.number_of_secs, cli.service_url.clone());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    let service = HttpWordService::new(config.service_url.clone(), config.request_timeout())?;
    let controller = SessionController::new(
        Arc::new(service),
        Box::new(IntervalDriver::every_second()),
    );
    let mut app = App::new(controller, config.duration_secs);
    if let Err(e) = app.start() {
        warn!(url = %config.service_url, error = %e, "first session did not start");
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result?;
    if let Some(summary) = &app.summary {
        println!("Words Solved: {}", summary.solved_count);
    }

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let now = Instant::now();

        match runner.step() {
            GameEvent::Tick => app.on_tick(now),
            GameEvent::Resize => {}
            GameEvent::Validated { ticket, verdict } => {
                app.handle_validation(ticket, verdict, now)
            }
            GameEvent::Key(key) => {
                if key.code == KeyCode::Esc
                    || (key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c'))
                {
                    break;
                }

                if app.state == AppState::Playing {
                    if let Some(ticket) = app.handle_key(key.into(), now) {
                        spawn_validation(app.controller.service(), ticket, runner.sender());
                    }
                } else if key.code == KeyCode::Char('r') {
                    let _ = app.start();
                }
            }
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
