//! TUI application state and event loop.
//!
//! Design: the dashboard thread owns all world state. The link driver runs
//! on its own thread and hands over lifecycle transitions and telemetry
//! frames through a channel; each loop iteration drains that channel,
//! applies key input, and redraws the whole frame. Redraw cadence follows
//! the poll tick, but the map itself only changes when telemetry arrives —
//! the world advances per frame, not per wall-clock tick.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use echomap_core::{LinkState, MapSession, TelemetryFrame};
use echomap_link::{LinkConfig, LinkEvent, LinkHandle};

pub struct App {
    link: LinkHandle,
    session: MapSession,
    link_state: LinkState,
    /// Latest accepted frame, kept for the sensor readout and echo rays.
    latest_frame: Option<TelemetryFrame>,
    frame_count: u64,
    running: bool,
}

impl App {
    pub fn new(config: LinkConfig, speed: f64) -> Self {
        Self {
            link: echomap_link::spawn(config),
            session: MapSession::with_speed(speed),
            link_state: LinkState::Connecting,
            latest_frame: None,
            frame_count: 0,
            running: true,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            self.drain_link();
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    fn drain_link(&mut self) {
        while let Some(event) = self.link.try_recv() {
            match event {
                LinkEvent::State(state) => self.link_state = state,
                LinkEvent::Frame(frame) => {
                    if self.session.handle_frame(&frame) {
                        self.latest_frame = Some(frame);
                        self.frame_count += 1;
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('s') => {
                let cmd = self.session.start();
                self.link.send(cmd);
            }
            KeyCode::Char('x') => {
                let cmd = self.session.stop();
                self.link.send(cmd);
            }
            KeyCode::Char('r') => {
                let cmd = self.session.reset();
                self.link.send(cmd);
            }
            KeyCode::Char('t') => self.session.toggle_trail(),
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                let cmd = self.session.step_speed(1.0);
                self.link.send(cmd);
            }
            KeyCode::Down | KeyCode::Char('-') => {
                let cmd = self.session.step_speed(-1.0);
                self.link.send(cmd);
            }
            _ => {}
        }
    }

    // --- Accessors for the renderer ---

    pub fn session(&self) -> &MapSession {
        &self.session
    }

    pub fn link_state(&self) -> LinkState {
        self.link_state
    }

    pub fn latest_frame(&self) -> Option<&TelemetryFrame> {
        self.latest_frame.as_ref()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
