//! Renderer seam between the render loop and the terminal.
//!
//! The render loop only needs to hand a [`ViewState`] over and bracket the
//! session with terminal setup and teardown; tests swap in a recording mock.

use crate::error::Result;
use crate::render::ui::state::ViewState;

pub trait UIRenderer {
    /// Draw the sidebar lists, the four waveform panes with the cursor bar, and the status line.
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Enter raw mode and the alternate screen with mouse capture on.
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal. Safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;

    /// (columns, rows)
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
