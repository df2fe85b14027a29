pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use overdrive::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    duration::DurationField,
    history::History,
    logging,
    mood::Mood,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    session::SessionController,
    timer::{ThreadTickScheduler, TickScheduler, TickToken},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};

use crate::ui::ui;

const BANNER_TTL: Duration = Duration::from_secs(3);
const MOOD_STEP: i32 = 5;

/// terminal training companion: timed sessions, history, and points
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Run a timed training session with pause, done and skip controls, then review your history and points."
)]
pub struct Cli {
    /// session length as MM:SS (overrides the config file)
    #[clap(short = 'd', long)]
    duration: Option<String>,

    /// path to the JSON config file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// file to write logs to
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// redraw interval in milliseconds
    #[clap(short = 't', long)]
    tick_ms: Option<u64>,

    /// start already signed in
    #[clap(long)]
    logged_in: bool,

    /// start with an empty history instead of the demo sessions
    #[clap(long)]
    no_demo: bool,
}

impl Cli {
    /// Config file values with command line overrides applied
    fn resolve_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let mut config = store.load();
        if let Some(duration) = &self.duration {
            config.default_duration = duration.clone();
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_rate_ms = tick_ms;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Tab {
    Training,
    History,
    Points,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Training, Tab::History, Tab::Points];

    pub fn index(&self) -> usize {
        match self {
            Tab::Training => 0,
            Tab::History => 1,
            Tab::Points => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    pub fn needs_login(&self) -> bool {
        !matches!(self, Tab::Training)
    }
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub text: String,
    pub expires_at: Option<Instant>,
}

#[derive(Debug)]
pub struct App {
    pub tab: Tab,
    pub controller: SessionController,
    pub duration: DurationField,
    pub mood: Mood,
    pub history: History,
    pub authed: bool,
    pub banner: Option<Banner>,
}

impl App {
    pub fn new(config: &Config, history: History, scheduler: Box<dyn TickScheduler>) -> Self {
        Self {
            tab: Tab::Training,
            controller: SessionController::with_tick_period(scheduler, config.session_tick()),
            duration: DurationField::new(&config.duration_text()),
            mood: Mood::default(),
            history,
            authed: false,
            banner: None,
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if tab.needs_login() && !self.authed {
            self.banner = Some(Banner {
                text: "Sign in with (l) to see your history and points".to_string(),
                expires_at: None,
            });
            return;
        }
        tracing::debug!(%tab, "tab selected");
        self.tab = tab;
    }

    /// Local stand-in for real authentication
    pub fn login(&mut self) {
        if self.authed {
            return;
        }
        self.authed = true;
        self.banner = Some(Banner {
            text: "Signed in. History and points are now available.".to_string(),
            expires_at: Some(Instant::now() + BANNER_TTL),
        });
        tracing::info!("signed in (local stub)");
    }

    /// Redraw tick: expire the banner
    pub fn on_tick(&mut self, now: Instant) {
        let expired = matches!(
            &self.banner,
            Some(Banner { expires_at: Some(at), .. }) if now >= *at
        );
        if expired {
            self.banner = None;
        }
    }

    pub fn on_session_tick(&mut self, token: TickToken) {
        if let Some(summary) = self.controller.on_tick(token) {
            self.history.record(&summary, self.mood);
        }
    }

    pub fn start_session(&mut self) {
        self.controller.start(self.duration.text());
    }

    pub fn stop_session(&mut self) {
        if let Some(summary) = self.controller.stop() {
            self.history.record(&summary, self.mood);
        }
    }

    /// Returns false when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }

        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Tab => {
                self.select_tab(self.tab.next());
                return true;
            }
            KeyCode::BackTab => {
                self.select_tab(self.tab.previous());
                return true;
            }
            KeyCode::Char('l') => {
                self.login();
                return true;
            }
            _ => {}
        }

        if self.tab == Tab::Training {
            if self.controller.is_active() {
                self.handle_session_key(key);
            } else {
                self.handle_setup_key(key);
            }
        }
        true
    }

    fn handle_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.duration.push(c);
            }
            KeyCode::Backspace => self.duration.backspace(),
            KeyCode::Left => self.mood.nudge(-MOOD_STEP),
            KeyCode::Right => self.mood.nudge(MOOD_STEP),
            KeyCode::Enter => self.start_session(),
            _ => {}
        }
    }

    fn handle_session_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') => self.controller.toggle_pause(),
            KeyCode::Char('d') => self.controller.done(),
            KeyCode::Char('s') => self.controller.skip(),
            KeyCode::Char('x') => self.stop_session(),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        if let Err(err) = logging::init(&log_path) {
            eprintln!("overdrive: logging disabled: {err}");
        }
    }

    let config = cli.resolve_config();
    let history = if cli.no_demo {
        History::new()
    } else {
        History::demo()
    };

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(config.tick_rate()));
    let scheduler = ThreadTickScheduler::new(runner.sender());
    let mut app = App::new(&config, history, Box::new(scheduler));
    if cli.logged_in {
        app.login();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    tracing::info!(sessions = app.history.len(), "exiting");
    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::SessionTick(token) => app.on_session_tick(token),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if !app.handle_key(key) {
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}
