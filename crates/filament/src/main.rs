mod logging;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use filament_config::Config;
use filament_core::Theme;
use filament_field::{FieldStyle, ParticleBackdrop};
use filament_hero::Typewriter;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

/// Cursor blink period for the typing tagline.
const CURSOR_BLINK_MS: u128 = 500;

/// Most frames stepped in one loop pass after a stall.
const MAX_CATCH_UP_FRAMES: u32 = 5;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let config = Config::load();
    let config_path = Config::default_path()
        .inspect_err(|e| log::warn!("{e}; theme changes will not be saved"))
        .ok();

    let terminal = ratatui::init();
    let result = App::new(config, config_path).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration, including the current theme.
    config: Config,
    /// Where theme changes are persisted.
    config_path: Option<PathBuf>,
    /// Particle background state.
    backdrop: ParticleBackdrop,
    /// Typing tagline state.
    typewriter: Typewriter,
    /// Application start time for animations.
    start_time: Instant,
    /// Time between two animation frames.
    frame_interval: Duration,
    /// When the field was last stepped.
    last_tick: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let backdrop = ParticleBackdrop::new(
            config.field.settings(),
            FieldStyle::default(),
            config.cell_size(),
        );
        let typewriter = Typewriter::new(config.hero.phrases.iter().cloned());
        let frame_interval = Duration::from_millis(config.frame_interval_ms());
        let now = Instant::now();

        Self {
            running: false,
            config,
            config_path,
            backdrop,
            typewriter,
            start_time: now,
            frame_interval,
            last_tick: now,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        log::info!(
            "starting at {} fps with theme {}",
            self.config.fps,
            self.config.theme.name()
        );

        self.running = true;
        while self.running {
            self.advance_animation(Instant::now());
            self.typewriter
                .advance(self.start_time.elapsed().as_millis() as u64);
            terminal.draw(|frame| self.render(frame))?;

            let budget = self.frame_interval.saturating_sub(self.last_tick.elapsed());
            self.handle_crossterm_events(budget)?;
        }
        Ok(())
    }

    /// Step the field once for every frame interval elapsed since the last
    /// step. Redraws in between (input, resize) leave it where it is.
    fn advance_animation(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let due = elapsed.as_nanos() / self.frame_interval.as_nanos().max(1);
        if due == 0 {
            return;
        }

        let steps = due.min(MAX_CATCH_UP_FRAMES as u128) as u32;
        for _ in 0..steps {
            self.backdrop.tick();
        }

        if due > steps as u128 {
            log::debug!("dropped {} animation frames", due - steps as u128);
            self.last_tick = now;
        } else {
            self.last_tick += self.frame_interval * steps;
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let theme = self.config.theme;

        // Backdrop first so the hero text sits on top of it
        self.backdrop.render(frame, theme);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Name
            Constraint::Length(1), // Title
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Typing tagline
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        let name = Paragraph::new(self.config.hero.name.as_str())
            .style(Style::new().fg(theme.accent()).bold())
            .alignment(Alignment::Center);
        frame.render_widget(name, chunks[1]);

        let title = Paragraph::new(self.config.hero.title.as_str())
            .style(Style::new().fg(theme.text()))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[2]);

        let cursor_on = (self.start_time.elapsed().as_millis() / CURSOR_BLINK_MS) % 2 == 0;
        let tagline = format!(
            "{}{}",
            self.typewriter.visible(),
            if cursor_on { "|" } else { " " }
        );
        let tagline = Paragraph::new(tagline)
            .style(Style::new().fg(theme.muted()))
            .alignment(Alignment::Center);
        frame.render_widget(tagline, chunks[4]);

        let accent = theme.accent();
        let pause_label = if self.backdrop.is_paused() {
            " resume  "
        } else {
            " pause  "
        };
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".fg(theme.muted()),
            "t".bold().fg(accent),
            " theme  ".fg(theme.muted()),
            "space".bold().fg(accent),
            pause_label.fg(theme.muted()),
            "r".bold().fg(accent),
            " regenerate".fg(theme.muted()),
        ])
        .centered();
        frame.render_widget(help, chunks[6]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` for the first event, then drains whatever
    /// else is queued so a burst of input costs a single redraw.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        loop {
            self.on_event(event::read()?);
            if !self.running || !event::poll(Duration::ZERO)? {
                return Ok(());
            }
        }
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(width, height) => self.backdrop.resize(width, height),
            // The backdrop is decorative and never takes pointer input
            Event::Mouse(_) => {}
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char(' ')) => {
                let paused = self.backdrop.toggle_pause();
                log::debug!("backdrop paused: {paused}");
            }
            (_, KeyCode::Char('r')) => self.backdrop.regenerate(),
            _ => {}
        }
    }

    /// Switch between light and dark themes and remember the choice.
    fn toggle_theme(&mut self) {
        let Some(path) = &self.config_path else {
            self.config.theme = self.config.theme.toggle();
            return;
        };
        match self.config.toggle_theme_at(path) {
            Ok(theme) => log::info!("theme set to {}", theme.name()),
            Err(e) => log::warn!("failed to save theme: {e}"),
        }
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
