use std::io;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::COLUMNS_PER_HITBOX;
use crate::frame_loop::FrameScheduler;
use crate::input::{Direction, GameInput, GestureDelta};

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode, alternate screen, mouse capture) for
/// one run of the game.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Restores the terminal; safe to call more than once.
pub fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen)
}

/// Handle for one requested display frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DisplayFrame(u64);

/// Frame scheduler paced at a fixed display refresh interval.
///
/// The main loop asks it how long to wait for input and whether the armed
/// frame is due; cancelling disarms it.
#[derive(Debug)]
pub struct TerminalFrameScheduler {
    interval: Duration,
    next_id: u64,
    armed: Option<(DisplayFrame, Instant)>,
}

impl TerminalFrameScheduler {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            armed: None,
        }
    }

    /// Time until the armed frame fires, `None` when nothing is armed.
    #[must_use]
    pub fn time_until_frame(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    #[must_use]
    pub fn frame_due(&self, now: Instant) -> bool {
        self.armed.is_some_and(|(_, deadline)| now >= deadline)
    }
}

impl FrameScheduler for TerminalFrameScheduler {
    type Handle = DisplayFrame;

    fn schedule_next(&mut self) -> DisplayFrame {
        self.next_id += 1;
        let frame = DisplayFrame(self.next_id);
        self.armed = Some((frame, Instant::now() + self.interval));
        frame
    }

    fn cancel(&mut self, handle: DisplayFrame) {
        if self.armed.is_some_and(|(frame, _)| frame == handle) {
            self.armed = None;
        }
    }
}

/// Converts terminal key and mouse events into game inputs.
///
/// Arrow keys and WASD become unit gestures; a left-button drag becomes a
/// gesture spanning the drag, with columns scaled to match row height.
#[derive(Debug, Default)]
pub struct InputHandler {
    drag_start: Option<(u16, u16)>,
}

impl InputHandler {
    /// Waits up to `timeout` for the next meaningful input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(self.translate(event::read()?))
    }

    fn translate(&mut self, event: Event) -> Option<GameInput> {
        match event {
            Event::Key(key) => translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            _ => None,
        }
    }

    fn translate_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (column, row) = self.drag_start.take()?;
                let dx = (f64::from(mouse.column) - f64::from(column))
                    / f64::from(COLUMNS_PER_HITBOX);
                let dy = f64::from(mouse.row) - f64::from(row);
                Some(GameInput::Gesture(GestureDelta::new(dx, dy)))
            }
            _ => None,
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'k') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s' | 'j') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a' | 'h') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d' | 'l') => Direction::Right,
        KeyCode::Enter | KeyCode::Char(' ') => return Some(GameInput::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => return Some(GameInput::Quit),
        _ => return None,
    };
    Some(GameInput::Gesture(direction.into()))
}
