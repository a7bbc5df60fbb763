//! Output types produced by the pane renderers.
//!
//! A frame is plain data: styled text runs per line plus the cursor overlay
//! position. The terminal layer converts runs into ratatui spans; tests inspect
//! them directly.

use ratatui::style::Color;

/// Text attribute applied on top of a run's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Bold,
    Dim,
    Reverse,
}

/// A contiguous piece of text drawn with a single color and emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub color: Color,
    pub emphasis: Emphasis,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, color: Color, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            color,
            emphasis,
        }
    }

    pub fn plain(text: impl Into<String>, color: Color) -> Self {
        Self::new(text, color, Emphasis::Normal)
    }

    /// Width in terminal columns; every glyph used here is single-width.
    pub fn columns(&self) -> usize {
        self.text.chars().count()
    }
}

/// One rendered row of a pane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub runs: Vec<StyledRun>,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run, merging it into the previous one when the style matches.
    pub fn push(&mut self, run: StyledRun) {
        if run.text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.color == run.color && last.emphasis == run.emphasis => {
                last.text.push_str(&run.text);
            }
            _ => self.runs.push(run),
        }
    }

    pub fn columns(&self) -> usize {
        self.runs.iter().map(StyledRun::columns).sum()
    }

    /// Concatenated text without styling.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Where the vertical cursor bar is drawn, relative to the waveform display's
/// left edge (names and values panes included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorOverlay {
    pub visible: bool,
    pub column_offset: u16,
}

/// Everything needed to draw the waveform display once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedFrame {
    pub names: Vec<StyledLine>,
    pub values: Vec<StyledLine>,
    pub waves: Vec<StyledLine>,
    pub timeline: StyledLine,
    pub cursor: CursorOverlay,
    /// Shared vertical offset of the names, values and waves panes.
    pub scroll_row: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_merges_matching_styles() {
        let mut line = StyledLine::new();
        line.push(StyledRun::plain("__", Color::Green));
        line.push(StyledRun::plain("__", Color::Green));
        line.push(StyledRun::new("│", Color::Green, Emphasis::Bold));
        line.push(StyledRun::plain("", Color::Red));

        assert_eq!(line.runs.len(), 2);
        assert_eq!(line.text(), "____│");
        assert_eq!(line.columns(), 5);
    }
}
