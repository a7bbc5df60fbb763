//! High-level input service.
//!
//! Consumes coalesced raw events, maps keys through the viewer bindings, and yields
//! domain-level `InputAction`s that the render coordinator consumes.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent, WheelDirection};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// High-level input actions emitted by the key bindings and the mouse.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    FocusNext,
    FocusPrevious,
    MoveUp,
    MoveDown,
    /// Enter a directory, open a trace, or toggle a signal, depending on focus.
    Activate,
    Click {
        column: u16,
        row: u16,
    },
    Wheel {
        direction: WheelDirection,
        lines: u64,
        column: u16,
        row: u16,
    },
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Key map of the viewer.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyBindings;

impl KeyBindings {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            KeyCode::Char('q') if plain => InputAction::Quit,
            KeyCode::Left => InputAction::PanLeft,
            KeyCode::Char('h') if plain => InputAction::PanLeft,
            KeyCode::Right => InputAction::PanRight,
            KeyCode::Char('l') if plain => InputAction::PanRight,
            KeyCode::Char('=' | '+') if plain => InputAction::ZoomIn,
            KeyCode::Char('-') if plain => InputAction::ZoomOut,
            KeyCode::Tab => InputAction::FocusNext,
            KeyCode::BackTab => InputAction::FocusPrevious,
            KeyCode::Up => InputAction::MoveUp,
            KeyCode::Char('k') if plain => InputAction::MoveUp,
            KeyCode::Down => InputAction::MoveDown,
            KeyCode::Char('j') if plain => InputAction::MoveDown,
            KeyCode::Enter => InputAction::Activate,
            KeyCode::Char(' ') if plain => InputAction::Activate,
            _ => InputAction::InvalidInput,
        }
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    bindings: KeyBindings,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            bindings: KeyBindings::new(),
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.process_raw_event(raw_event));

            while let Some(extra_event) = self.raw_input.try_flush() {
                actions.extend(self.process_raw_event(extra_event));
            }
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.raw_input.process_event(event);
        while let Some(raw_event) = self.raw_input.try_flush() {
            actions.extend(self.process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(&self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.bindings.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Click { column, row } => InputAction::Click { column, row },
            RawInputEvent::Wheel {
                direction,
                lines,
                column,
                row,
            } => InputAction::Wheel {
                direction,
                lines,
                column,
                row,
            },
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    log::error!("input thread error: {err}");
                    break;
                }
            }
        }
    })
}
