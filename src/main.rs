mod ui;

use anyhow::{Context, Result};
use chrono::TimeZone;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use fastdial::{
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    controller::{FastController, FastSnapshot},
    logging,
    preset::{FastingConfiguration, FastingPreset},
    runtime::{DialEvent, EventPump, InputSource, TerminalInput},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
    sync::mpsc::Receiver,
    time::Duration,
};

/// How long the event pump waits for input before polling the controller
const TICK_RATE_MS: u64 = 200;

/// 24-hour clock dial that tracks an intermittent fasting window
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A 24-hour clock dial for intermittent fasting. Pick a fasting window, start the fast, and watch the progress arc fill until it is done."
)]
pub struct Cli {
    /// fasting window selected at startup
    #[clap(short = 'p', long, value_enum)]
    preset: Option<FastingPreset>,

    /// seconds between progress updates
    #[clap(short = 't', long)]
    tick_secs: Option<u64>,

    /// clear the progress arc when a fast completes instead of leaving it full
    #[clap(long)]
    clear_arc_on_completion: bool,

    /// write logs here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// store the resulting settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line flags win over the stored config
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(preset) = self.preset {
            config.default_preset = preset;
        }
        if let Some(tick_secs) = self.tick_secs {
            config.tick_secs = tick_secs;
        }
        if self.clear_arc_on_completion {
            config.clear_arc_on_completion = true;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Dial,
    Picker,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

/// Highlighted row of the interval picker
#[derive(Debug, Default)]
pub struct PickerState {
    pub cursor: usize,
}

impl PickerState {
    fn move_by(&mut self, delta: isize) {
        let len = FastingPreset::ALL.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    fn highlighted(&self) -> FastingPreset {
        FastingPreset::ALL[self.cursor % FastingPreset::ALL.len()]
    }
}

pub struct App<C: Clock = SystemClock> {
    pub controller: FastController<C>,
    pub fasting: FastingConfiguration,
    pub state: AppState,
    pub picker: PickerState,
    pub snapshot: FastSnapshot<C::Tz>,
    pub last_error: Option<String>,
    updates: Receiver<FastSnapshot<C::Tz>>,
}

impl<C: Clock> App<C> {
    pub fn new(clock: C, config: &Config) -> Self {
        let mut controller = FastController::new(clock, config.controller_settings());
        let updates = controller.subscribe();
        controller.attach();
        let snapshot = controller.snapshot();

        let mut app = Self {
            controller,
            fasting: FastingConfiguration::new(config.default_preset),
            state: AppState::Dial,
            picker: PickerState::default(),
            snapshot,
            last_error: None,
            updates,
        };
        app.drain_updates();
        app
    }

    /// Polls the controller; true when the view needs a redraw
    pub fn on_tick(&mut self) -> bool {
        self.controller.poll();
        self.drain_updates()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        match self.state {
            AppState::Dial => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle_fast(),
                KeyCode::Char('i') => self.open_picker(),
                _ => {}
            },
            AppState::Picker => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.picker.move_by(-1),
                KeyCode::Down | KeyCode::Char('j') => self.picker.move_by(1),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.fasting.select(self.picker.highlighted());
                    log::info!("fasting interval set to {}", self.fasting.selected());
                    self.state = AppState::Dial;
                }
                KeyCode::Esc | KeyCode::Char('q') => self.state = AppState::Dial,
                _ => {}
            },
        }
        self.drain_updates();
        Control::Continue
    }

    fn toggle_fast(&mut self) {
        match self.controller.toggle(self.fasting.duration_hours()) {
            Ok(_) => self.last_error = None,
            Err(err) => {
                log::warn!("could not toggle fast: {err}");
                self.last_error = Some(err.to_string());
            }
        }
    }

    fn open_picker(&mut self) {
        self.picker.cursor = self.fasting.selected().index();
        self.state = AppState::Picker;
    }

    fn drain_updates(&mut self) -> bool {
        let mut changed = false;
        while let Ok(snapshot) = self.updates.try_recv() {
            self.snapshot = snapshot;
            changed = true;
        }
        changed
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(err) = logging::init(cli.log_file.as_deref()) {
        eprintln!("fastdial: logging disabled: {err:#}");
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        store
            .save(&config)
            .with_context(|| format!("Failed to save config to {}", store.path().display()))?;
        log::info!("saved config to {}", store.path().display());
    }

    log::info!("fastdial starting with {} selected", config.default_preset);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(SystemClock, &config);
    let events = EventPump::new(
        TerminalInput::spawn(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let outcome = start_tui(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn start_tui<B, C, I>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
    events: &EventPump<I>,
) -> Result<()>
where
    B: Backend,
    C: Clock,
    <C::Tz as TimeZone>::Offset: std::fmt::Display,
    I: InputSource,
{
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let mut redraw = false;

        match events.next() {
            DialEvent::Wake => {}
            DialEvent::Resize => redraw = true,
            DialEvent::Key(key) => {
                if app.handle_key(key) == Control::Quit {
                    break;
                }
                redraw = true;
            }
        }

        // Poll on every event, so a steady stream of keys cannot starve the timers
        if app.on_tick() {
            redraw = true;
        }

        if redraw {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    app.controller.shutdown();
    log::info!("fastdial exiting");
    Ok(())
}
