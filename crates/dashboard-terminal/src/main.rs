// crates/dashboard-terminal/src/main.rs

mod app;
mod components;
mod config;
mod holdings;
mod source;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dashboard_core::{spawn_ticker, FeedEvent, LiveFeed, PriceFeed, RandomWalk};
use dashboard_protocol::{decode_session, ReplaySource};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, path::PathBuf, time::Duration};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::{App, InputMode};
use crate::config::ClientConfig;
use crate::source::{load_replay, VisibleWalk};

#[derive(Parser)]
#[clap(name = "dashboard")]
#[clap(about = "Live portfolio dashboard for the terminal")]
struct Cli {
    /// TOML config file (defaults to the built-in portfolio)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Replay recorded ticks instead of simulating them (CSV, or JSON feed messages)
    #[clap(short, long)]
    replay: Option<PathBuf>,

    /// Seed for the simulated price walk
    #[clap(long)]
    seed: Option<u64>,

    /// Stored session JSON of the signed-in user
    #[clap(long)]
    session: Option<PathBuf>,

    /// Enable debug logging to dashboard.log
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; the terminal owns stdout, so logs go to a file
    if cli.debug {
        init_logging()?;
    }

    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClientConfig::default(),
    };

    let replay = match &cli.replay {
        Some(path) => Some(load_replay(path)?.looping(config.replay_loop)),
        None => None,
    };
    let label = match &cli.replay {
        Some(path) => format!("replay {}", path.display()),
        None => "simulated".to_string(),
    };

    let mut app = App::new(&config, &label)?;
    if let Some(path) = &cli.session {
        let stored = std::fs::read_to_string(path)
            .with_context(|| format!("reading session {}", path.display()))?;
        match decode_session(&stored) {
            Some(session) => app.user = Some(session.username),
            None => warn!("session in {} is unusable, continuing signed out", path.display()),
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, &config, replay, cli.seed).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let file = std::fs::File::create("dashboard.log").context("creating dashboard.log")?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    config: &ClientConfig,
    replay: Option<ReplaySource>,
    seed: Option<u64>,
) -> Result<()> {
    let mut feed = PriceFeed::with_decay_window(config.decay_window());
    feed.initialize(config.seeds())?;

    // Feed task publishes price moves and highlight expiries to the UI
    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<FeedEvent>();
    let live = LiveFeed::spawn(feed, events_tx);

    let ticker = match replay {
        Some(source) => {
            info!(ticks = source.len(), "replaying recorded ticks");
            spawn_ticker(source, config.cadence(), live.sender())
        }
        None => {
            let (visible_tx, visible_rx) = watch::channel(app.visible_symbols());
            app.set_visible_sender(visible_tx);
            let walk = match seed {
                Some(seed) => RandomWalk::seeded(config.seeds(), seed),
                None => RandomWalk::new(config.seeds()),
            };
            spawn_ticker(VisibleWalk::new(walk, visible_rx), config.cadence(), live.sender())
        }
    };

    loop {
        // Draw UI
        terminal.draw(|f| ui::draw(f, &app))?;

        // Handle events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key);
            }
        }

        // Apply feed updates
        while let Ok(event) = events_rx.try_recv() {
            app.handle_feed_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    // Cleanup: stop ticks first, then tear down pending highlight timers
    ticker.abort();
    if live.shutdown().await.is_none() {
        warn!("live feed did not shut down cleanly");
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                app.should_quit = true;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.toggle_help();
            }
            KeyCode::Esc => {
                if app.show_help {
                    app.toggle_help();
                } else if !app.search_query().is_empty() {
                    app.cancel_search();
                }
            }

            // Search
            KeyCode::Char('/') => {
                app.start_search();
            }

            // Sorting
            KeyCode::Left | KeyCode::Char('h') => {
                app.select_prev_column();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                app.select_next_column();
            }
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
                app.sort_selected();
            }

            // Paging
            KeyCode::PageDown | KeyCode::Char('n') | KeyCode::Char('N') => {
                app.next_page();
            }
            KeyCode::PageUp | KeyCode::Char('p') | KeyCode::Char('P') => {
                app.prev_page();
            }
            KeyCode::Home => {
                app.first_page();
            }
            KeyCode::End => {
                app.last_page();
            }
            KeyCode::Char('z') | KeyCode::Char('Z') => {
                app.cycle_page_size();
            }

            _ => {}
        },

        InputMode::Search => match key.code {
            KeyCode::Enter => {
                app.submit_search();
            }
            KeyCode::Esc => {
                app.cancel_search();
            }
            KeyCode::Backspace => {
                app.delete_char();
            }
            KeyCode::Char(c) => {
                app.enter_char(c);
            }
            _ => {}
        },
    }
}
