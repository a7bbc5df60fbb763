//! Checkbox list of the signals in the loaded trace.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Enabled(String),
    Disabled(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SignalPicker {
    items: Vec<PickerItem>,
    selected: usize,
}

impl SignalPicker {
    /// One unchecked item per name, in the order given.
    pub fn new(names: Vec<String>) -> Self {
        let items = names
            .into_iter()
            .map(|name| PickerItem {
                name,
                enabled: false,
            })
            .collect();
        Self { items, selected: 0 }
    }

    pub fn items(&self) -> &[PickerItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    /// Flip the selected checkbox.
    pub fn toggle(&mut self) -> Option<PickerEvent> {
        let item = self.items.get_mut(self.selected)?;
        item.enabled = !item.enabled;
        let name = item.name.clone();
        Some(if item.enabled {
            PickerEvent::Enabled(name)
        } else {
            PickerEvent::Disabled(name)
        })
    }
}
