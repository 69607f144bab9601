use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioEngine;
use crate::coordinator::Coordinator;
use crate::error::Result;
use crate::logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let (settings, config_error) = settings::load_settings();

    // Without a log file the player still works; say so on stderr before the
    // terminal is taken over.
    let _log_handle = match logging::init(&settings.logging) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("glassplay: logging disabled, {e}");
            None
        }
    };
    if let Some(e) = config_error {
        warn!("using default settings, {e}");
    }

    let engine = RodioEngine::new(settings.audio.clone());
    let mut coordinator = Coordinator::new(engine);
    let mut app = App::new(settings.ui.follow_playback);

    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    startup::add_initial_tracks(args, &settings.library, &mut app, &mut coordinator);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &coordinator);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new(&coordinator);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut coordinator,
            &mpris,
            &control_rx,
            &mut state,
        )
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    coordinator
        .engine()
        .shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("shut down");

    run_result
}
