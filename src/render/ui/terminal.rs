//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer using ratatui
//! for cross-platform terminal interface. It draws what the view state and the
//! waveform display's rendered frame describe and holds no data of its own.

use crate::error::Result;
use crate::render::ui::layout::{list_offset, ScreenLayout};
use crate::render::ui::state::{Focus, ViewState};
use crate::render::ui::{ColorTheme, UIRenderer};
use crate::waveform::{CursorOverlay, Emphasis, StyledLine, StyledRun};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const CURSOR_GLYPH: &str = "│";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn draw(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let layout = &view_state.layout;
        Self::render_browser(frame, view_state, theme);
        Self::render_picker(frame, view_state, theme);
        Self::render_waveform(frame, view_state, theme);
        Self::render_status(frame, layout.status, view_state, theme);
    }

    fn render_title(frame: &mut Frame, area: Rect, title: &str, focused: bool, theme: &ColorTheme) {
        if area.height == 0 {
            return;
        }
        let style = if focused {
            theme.focus
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let title_area = Rect::new(area.x, area.y, area.width, 1);
        frame.render_widget(Paragraph::new(Line::styled(title, style)), title_area);
    }

    fn render_browser(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let layout = &view_state.layout;
        let browser = &view_state.browser;
        let title = format!(" {}", browser.dir().display());
        Self::render_title(
            frame,
            layout.browser,
            &title,
            view_state.focus == Focus::Browser,
            theme,
        );

        let area = layout.browser_list();
        let offset = list_offset(browser.selected(), area.height);
        let lines: Vec<Line> = browser
            .entries()
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(area.height))
            .map(|(index, entry)| {
                let mut style = Style::default();
                if entry.is_dir {
                    style = style.fg(theme.directory);
                }
                if index == browser.selected() {
                    style = style.patch(theme.selection);
                }
                Line::styled(entry.label(), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_picker(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let layout = &view_state.layout;
        let picker = &view_state.picker;
        Self::render_title(
            frame,
            layout.picker,
            " Signals",
            view_state.focus == Focus::Picker,
            theme,
        );

        let area = layout.picker_list();
        let offset = list_offset(picker.selected(), area.height);
        let lines: Vec<Line> = picker
            .items()
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(area.height))
            .map(|(index, item)| {
                let mark = if item.enabled { "[x]" } else { "[ ]" };
                let style = if index == picker.selected() {
                    theme.selection
                } else {
                    Style::default()
                };
                Line::styled(format!("{mark} {}", item.name), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_waveform(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let layout = &view_state.layout;
        let rendered = view_state.display.render_frame();
        let scroll = u16::try_from(rendered.scroll_row).unwrap_or(u16::MAX);

        Self::render_title(
            frame,
            layout.spacer,
            " Waves",
            view_state.focus == Focus::Waves,
            theme,
        );
        frame.render_widget(
            Paragraph::new(to_line(&rendered.timeline)),
            layout.timeline,
        );

        for (lines, area) in [
            (&rendered.names, layout.names),
            (&rendered.values, layout.values),
            (&rendered.waves, layout.waves),
        ] {
            let lines: Vec<Line> = lines.iter().map(to_line).collect();
            frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
        }

        draw_cursor(frame.buffer_mut(), layout, rendered.cursor, theme.cursor);
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }
}

/// Convert one rendered pane row into a ratatui line.
pub fn to_line(line: &StyledLine) -> Line<'static> {
    Line::from(line.runs.iter().map(to_span).collect::<Vec<_>>())
}

fn to_span(run: &StyledRun) -> Span<'static> {
    let style = Style::default().fg(run.color);
    let style = match run.emphasis {
        Emphasis::Normal => style,
        Emphasis::Bold => style.add_modifier(Modifier::BOLD),
        Emphasis::Dim => style.add_modifier(Modifier::DIM),
        Emphasis::Reverse => style.add_modifier(Modifier::REVERSED),
    };
    Span::styled(run.text.clone(), style)
}

/// Overlay the cursor bar on the timeline and waves panes.
fn draw_cursor(buf: &mut Buffer, layout: &ScreenLayout, cursor: CursorOverlay, style: Style) {
    if !cursor.visible {
        return;
    }
    let x = layout.display.x.saturating_add(cursor.column_offset);
    let waves = layout.waves;
    if x < waves.x || x >= waves.x.saturating_add(waves.width) {
        return;
    }
    let top = layout.timeline.y;
    let bottom = waves.y.saturating_add(waves.height);
    for y in top..bottom {
        buf.get_mut(x, y).set_symbol(CURSOR_GLYPH).set_style(style);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;
            terminal.draw(move |frame| Self::draw(frame, view_state, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
