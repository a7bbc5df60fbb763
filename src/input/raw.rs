//! Low-level input collection: crossterm polling, mouse wheel coalescing, and
//! translation into primitive events that the higher-level input service can consume.

use crate::error::Result;
use ratatui::crossterm::event::{
    self, Event, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default coalescing window in milliseconds for wheel events.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 12;
/// Rows or columns produced by a single mouse wheel tick.
const WHEEL_STEP: u64 = 3;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Direction of a wheel burst. Shift turns vertical ticks horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
    Left,
    Right,
}

impl WheelDirection {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Signed step: up and left move toward the origin.
    pub fn signed(self, amount: u64) -> i64 {
        let amount = i64::try_from(amount).unwrap_or(i64::MAX);
        match self {
            Self::Up | Self::Left => -amount,
            Self::Down | Self::Right => amount,
        }
    }
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize {
        width: u16,
        height: u16,
    },
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
}

/// Aggregates high-frequency wheel events into larger steps.
///
/// A burst keeps the pointer position of its first tick so the whole burst
/// lands on the pane where it started.
#[derive(Debug, Clone)]
pub struct InputCoalescer {
    window: Duration,
    pending: Option<PendingWheel>,
}

#[derive(Debug, Clone)]
struct PendingWheel {
    direction: WheelDirection,
    lines: u64,
    column: u16,
    row: u16,
    last_event: Instant,
}

impl PendingWheel {
    fn into_event(self) -> RawInputEvent {
        RawInputEvent::Wheel {
            direction: self.direction,
            lines: self.lines,
            column: self.column,
            row: self.row,
        }
    }
}

impl InputCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn with_default_window() -> Self {
        Self::new(Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS))
    }

    /// Register a wheel tick, returning any previously queued burst that should be flushed.
    pub fn push(
        &mut self,
        direction: WheelDirection,
        lines: u64,
        column: u16,
        row: u16,
        now: Instant,
    ) -> Option<RawInputEvent> {
        match self.pending {
            Some(ref mut pending) if pending.direction == direction => {
                pending.lines = pending.lines.saturating_add(lines);
                pending.last_event = now;
                None
            }
            _ => {
                let flushed = self.flush();
                self.pending = Some(PendingWheel {
                    direction,
                    lines,
                    column,
                    row,
                    last_event: now,
                });
                flushed
            }
        }
    }

    /// Flush the accumulated burst if the coalescing window has expired.
    pub fn flush_if_stale(&mut self, now: Instant) -> Option<RawInputEvent> {
        if let Some(pending) = &self.pending {
            if now.duration_since(pending.last_event) >= self.window {
                return self.flush();
            }
        }
        None
    }

    /// Flush the accumulated burst immediately.
    pub fn flush(&mut self) -> Option<RawInputEvent> {
        self.pending.take().map(PendingWheel::into_event)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Collector that polls crossterm for events and applies wheel coalescing.
#[derive(Debug)]
pub struct RawInputCollector {
    coalescer: InputCoalescer,
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::from_coalescer(InputCoalescer::with_default_window())
    }

    /// Create a collector with a custom coalescing window (useful for tests).
    pub fn with_window(window: Duration) -> Self {
        Self::from_coalescer(InputCoalescer::new(window))
    }

    fn from_coalescer(coalescer: InputCoalescer) -> Self {
        Self {
            coalescer,
            pending_events: VecDeque::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty() && self.coalescer.is_empty()
    }

    /// Process a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Next ready event without polling crossterm: a stale wheel burst first,
    /// then anything already queued.
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.coalescer
            .flush_if_stale(Instant::now())
            .or_else(|| self.pending_events.pop_front())
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));

        if !event::poll(poll_timeout)? {
            return Ok(self.try_flush());
        }

        let event = event::read()?;
        self.enqueue_event(event);
        Ok(self.pending_events.pop_front())
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                self.flush_pending_wheel();
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Resize(width, height) => {
                self.flush_pending_wheel();
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let shifted = mouse_event.modifiers.contains(KeyModifiers::SHIFT);
        let direction = match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.flush_pending_wheel();
                self.pending_events.push_back(RawInputEvent::Click {
                    column: mouse_event.column,
                    row: mouse_event.row,
                });
                return;
            }
            MouseEventKind::ScrollUp if shifted => WheelDirection::Left,
            MouseEventKind::ScrollDown if shifted => WheelDirection::Right,
            MouseEventKind::ScrollUp => WheelDirection::Up,
            MouseEventKind::ScrollDown => WheelDirection::Down,
            MouseEventKind::ScrollLeft => WheelDirection::Left,
            MouseEventKind::ScrollRight => WheelDirection::Right,
            _ => return,
        };

        if let Some(flushed) = self.coalescer.push(
            direction,
            WHEEL_STEP,
            mouse_event.column,
            mouse_event.row,
            Instant::now(),
        ) {
            self.pending_events.push_back(flushed);
        }
    }

    fn flush_pending_wheel(&mut self) {
        if let Some(flushed) = self.coalescer.flush() {
            self.pending_events.push_back(flushed);
        }
    }
}

impl Default for RawInputCollector {
    fn default() -> Self {
        Self::new()
    }
}
