//! Screen regions and hit testing.
//!
//! ```text
//! +---------+------------------------+----------------+
//! | Files   | (spacer)               | timeline       |
//! |         +----------+-------------+----------------+
//! |         | names    | values      | waves          |
//! +---------+          |             |                |
//! | Signals |          |             |                |
//! +---------+----------+-------------+----------------+
//! | status                                            |
//! +---------------------------------------------------+
//! ```
//!
//! The file and signal lists carry a one-row title above their entries.

use crate::waveform::{PaneGeometry, PaneId};
use ratatui::layout::Rect;

/// Widest the left column gets.
const SIDEBAR_MAX_WIDTH: u16 = 32;
/// Rows taken by a list title.
const LIST_TITLE_ROWS: u16 = 1;

/// What a terminal cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Row of the file list, relative to its first visible entry.
    Browser { row: u16 },
    /// Row of the signal list, relative to its first visible entry.
    Picker { row: u16 },
    /// A waveform pane, with pane-relative coordinates.
    Pane { pane: PaneId, column: u16, row: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub browser: Rect,
    pub picker: Rect,
    /// Left edge of the waveform display; cursor offsets are relative to it.
    pub display: Rect,
    pub spacer: Rect,
    pub timeline: Rect,
    pub names: Rect,
    pub values: Rect,
    pub waves: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    /// Split a `width` x `height` terminal. `geometry.waves_width` is ignored;
    /// the waves pane takes whatever is left.
    pub fn compute(width: u16, height: u16, geometry: PaneGeometry) -> Self {
        let body_height = height.saturating_sub(1);
        let status = Rect::new(0, body_height, width, height.min(1));

        let sidebar_width = SIDEBAR_MAX_WIDTH.min(width / 3);
        let browser_height = body_height / 2;
        let browser = Rect::new(0, 0, sidebar_width, browser_height);
        let picker = Rect::new(0, browser_height, sidebar_width, body_height - browser_height);

        let display_x = sidebar_width;
        let display_width = width - sidebar_width;
        let display = Rect::new(display_x, 0, display_width, body_height);

        let names_width = geometry.names_width.min(display_width);
        let values_width = geometry.values_width.min(display_width - names_width);
        let waves_x = display_x + names_width + values_width;
        let waves_width = display_width - names_width - values_width;

        let timeline_height = body_height.min(1);
        let rows_y = timeline_height;
        let rows_height = body_height - timeline_height;

        Self {
            browser,
            picker,
            display,
            spacer: Rect::new(display_x, 0, names_width + values_width, timeline_height),
            timeline: Rect::new(waves_x, 0, waves_width, timeline_height),
            names: Rect::new(display_x, rows_y, names_width, rows_height),
            values: Rect::new(display_x + names_width, rows_y, values_width, rows_height),
            waves: Rect::new(waves_x, rows_y, waves_width, rows_height),
            status,
        }
    }

    /// Entry area of the file list, below its title.
    pub fn browser_list(&self) -> Rect {
        list_area(self.browser)
    }

    /// Entry area of the signal list, below its title.
    pub fn picker_list(&self) -> Rect {
        list_area(self.picker)
    }

    pub fn pane_rect(&self, pane: PaneId) -> Rect {
        match pane {
            PaneId::Names => self.names,
            PaneId::Values => self.values,
            PaneId::Waves => self.waves,
            PaneId::Timeline => self.timeline,
        }
    }

    /// Map a terminal cell to the region under it.
    pub fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        let browser_list = self.browser_list();
        if contains(browser_list, column, row) {
            return Some(HitTarget::Browser {
                row: row - browser_list.y,
            });
        }
        let picker_list = self.picker_list();
        if contains(picker_list, column, row) {
            return Some(HitTarget::Picker {
                row: row - picker_list.y,
            });
        }
        PaneId::ALL.into_iter().find_map(|pane| {
            let rect = self.pane_rect(pane);
            contains(rect, column, row).then(|| HitTarget::Pane {
                pane,
                column: column - rect.x,
                row: row - rect.y,
            })
        })
    }
}

/// First entry index shown so that `selected` stays inside `height` rows.
pub fn list_offset(selected: usize, height: u16) -> usize {
    let height = usize::from(height.max(1));
    (selected + 1).saturating_sub(height)
}

fn list_area(area: Rect) -> Rect {
    let title = LIST_TITLE_ROWS.min(area.height);
    Rect::new(area.x, area.y + title, area.width, area.height - title)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ScreenLayout {
        ScreenLayout::compute(
            120,
            40,
            PaneGeometry {
                names_width: 30,
                values_width: 15,
                waves_width: 0,
            },
        )
    }

    #[test]
    fn splits_terminal_into_regions() {
        let layout = layout();
        assert_eq!(layout.browser, Rect::new(0, 0, 32, 19));
        assert_eq!(layout.picker, Rect::new(0, 19, 32, 20));
        assert_eq!(layout.spacer, Rect::new(32, 0, 45, 1));
        assert_eq!(layout.timeline, Rect::new(77, 0, 43, 1));
        assert_eq!(layout.names, Rect::new(32, 1, 30, 38));
        assert_eq!(layout.values, Rect::new(62, 1, 15, 38));
        assert_eq!(layout.waves, Rect::new(77, 1, 43, 38));
        assert_eq!(layout.status, Rect::new(0, 39, 120, 1));
        assert_eq!(layout.display.x, 32);
    }

    #[test]
    fn hit_testing_reports_pane_relative_cells() {
        let layout = layout();
        assert_eq!(
            layout.hit(80, 5),
            Some(HitTarget::Pane {
                pane: PaneId::Waves,
                column: 3,
                row: 4
            })
        );
        assert_eq!(
            layout.hit(77, 0),
            Some(HitTarget::Pane {
                pane: PaneId::Timeline,
                column: 0,
                row: 0
            })
        );
        assert_eq!(
            layout.hit(40, 2).map(|hit| matches!(hit, HitTarget::Pane { pane: PaneId::Names, .. })),
            Some(true)
        );
        assert_eq!(layout.hit(3, 2), Some(HitTarget::Browser { row: 1 }));
        assert_eq!(layout.hit(3, 21), Some(HitTarget::Picker { row: 1 }));
        // Titles, spacer and status line are inert.
        assert_eq!(layout.hit(3, 0), None);
        assert_eq!(layout.hit(40, 0), None);
        assert_eq!(layout.hit(5, 39), None);
    }

    #[test]
    fn narrow_terminals_do_not_underflow() {
        let layout = ScreenLayout::compute(20, 2, PaneGeometry::default());
        assert_eq!(layout.waves.width, 0);
        assert_eq!(layout.names.width + layout.values.width, 14);
        let tiny = ScreenLayout::compute(0, 0, PaneGeometry::default());
        assert_eq!(tiny.hit(0, 0), None);
    }

    #[test]
    fn list_offset_keeps_selection_visible() {
        assert_eq!(list_offset(0, 5), 0);
        assert_eq!(list_offset(4, 5), 0);
        assert_eq!(list_offset(5, 5), 1);
        assert_eq!(list_offset(9, 0), 9);
    }
}
