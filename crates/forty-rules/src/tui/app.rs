//! The terminal event loop.
//!
//! [`App`] holds the page, the clipboard and the fetch plumbing, and turns
//! crossterm events into page input. [`run`] owns the terminal for the
//! lifetime of the loop. Fetches run on a tokio runtime; results come back to
//! this thread over a crossbeam channel and are applied between frames.

use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

use forty_rules_core::logging::PerfSpan;

use super::render::{self, GridScroll, Hit, HitMap};
use crate::config::AppConfig;
use crate::model::Rule;
use crate::platform::{ClipboardWriter, SystemClipboard};
use crate::source::{DataUnavailable, RulesSource};
use crate::view::{PageCommand, RulesPage, columns_for_width};
use crate::widget::keyboard::from_crossterm_event;
use crate::widget::{Key, KeyPress};

const TARGET: &str = "forty_rules::tui";

/// Frame interval while something animates.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Longest wait for input when nothing is scheduled.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(250);

type FetchResult = Result<Vec<Rule>, DataUnavailable>;

/// Page state plus the collaborators the loop needs.
pub struct App<C: ClipboardWriter> {
    page: RulesPage,
    scroll: GridScroll,
    hits: HitMap,
    clipboard: C,
    source: Arc<dyn RulesSource>,
    runtime: tokio::runtime::Handle,
    results_tx: Sender<FetchResult>,
    results_rx: Receiver<FetchResult>,
    tick: u64,
    should_quit: bool,
}

impl<C: ClipboardWriter> App<C> {
    /// Build the app. Nothing is fetched until [`Self::start`].
    pub fn new(
        page: RulesPage,
        source: Arc<dyn RulesSource>,
        clipboard: C,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let (results_tx, results_rx) = crossbeam_channel::unbounded();
        Self {
            page,
            scroll: GridScroll::default(),
            hits: HitMap::default(),
            clipboard,
            source,
            runtime,
            results_tx,
            results_rx,
            tick: 0,
            should_quit: false,
        }
    }

    /// Enter loading and start the first fetch.
    pub fn start(&mut self) {
        self.page.collection.begin_load();
        self.spawn_fetch();
    }

    /// The page.
    pub fn page(&self) -> &RulesPage {
        &self.page
    }

    /// The clipboard shares are written to.
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Whether a quit was requested.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn spawn_fetch(&self) {
        let source = Arc::clone(&self.source);
        let results = self.results_tx.clone();
        tracing::debug!(target: TARGET, "Spawning rules fetch");
        self.runtime.spawn(async move {
            let result = source.fetch_all_rules().await;
            if results.send(result).is_err() {
                tracing::debug!(target: TARGET, "Fetch finished after the UI closed");
            }
        });
    }

    /// Apply any fetch results that have arrived. Returns whether one did.
    pub fn drain_results(&mut self) -> bool {
        let mut applied = false;
        while let Ok(result) = self.results_rx.try_recv() {
            self.page.collection.finish_load(result);
            applied = true;
        }
        applied
    }

    /// Advance timers to `now`.
    pub fn tick(&mut self, now: Instant) {
        self.page.tick(now);
    }

    /// Draw a frame and remember its hit regions.
    pub fn render(&mut self, frame: &mut Frame<'_>, now: Instant) {
        let _span = PerfSpan::new("draw");
        self.page
            .collection
            .set_columns(columns_for_width(frame.area().width));
        self.hits = render::draw(frame, &self.page, &mut self.scroll, now, self.tick);
        self.tick = self.tick.wrapping_add(1);
    }

    /// How long to wait for input before the next frame.
    pub fn poll_timeout(&mut self, now: Instant) -> Duration {
        if self.page.collection.is_loading() || self.page.needs_frames(now) {
            return FRAME_INTERVAL;
        }
        self.page
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .map_or(IDLE_INTERVAL, |wait| wait.min(IDLE_INTERVAL))
    }

    /// Feed one terminal event.
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => {
                if let Some(press) = from_crossterm_event(&key) {
                    self.handle_key(press, now);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, press: KeyPress, now: Instant) {
        tracing::trace!(target: TARGET, ?press, "Key");
        let command = self.page.handle_key(press, &mut self.clipboard, now);
        self.run_command(command);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.hits.hit(mouse.column, mouse.row) {
                    Hit::Card(index) => {
                        self.page.click_card(index);
                    }
                    Hit::Overlay(region) => {
                        self.page.click_overlay(region, &mut self.clipboard, now);
                    }
                    Hit::Retry => {
                        let command = self.page.click_retry();
                        self.run_command(command);
                    }
                    Hit::Nothing => {}
                }
            }
            MouseEventKind::ScrollDown => self.handle_key(Key::ArrowDown.into(), now),
            MouseEventKind::ScrollUp => self.handle_key(Key::ArrowUp.into(), now),
            _ => {}
        }
    }

    fn run_command(&mut self, command: PageCommand) {
        match command {
            PageCommand::None => {}
            PageCommand::Fetch => self.spawn_fetch(),
            PageCommand::Quit => {
                tracing::info!(target: TARGET, "Quit requested");
                self.should_quit = true;
            }
        }
    }
}

/// Run the full-screen app until the user quits.
pub fn run(config: &AppConfig, source: Arc<dyn RulesSource>) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("forty-rules-fetch")
        .enable_all()
        .build()?;

    let page = RulesPage::new(config.fallback);
    let mut app = App::new(page, source, SystemClipboard::new(), runtime.handle().clone());
    let result = run_loop(&mut app);

    runtime.shutdown_background();
    result
}

fn run_loop<C: ClipboardWriter>(app: &mut App<C>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    app.start();

    while !app.should_quit() {
        let now = Instant::now();
        app.drain_results();
        app.tick(now);
        terminal.draw(|frame| app.render(frame, now))?;

        let timeout = app.poll_timeout(now);
        if event::poll(timeout)? {
            let event = event::read()?;
            app.handle_event(event, Instant::now());
        }
    }

    Ok(())
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
}
