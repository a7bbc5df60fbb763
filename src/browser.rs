//! Directory browser used to pick a trace file.

use crate::error::{Result, WaveError};
use crate::trace::is_trace_file;
use std::path::{Path, PathBuf};

const PARENT_ENTRY: &str = "..";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl BrowserEntry {
    /// Text shown in the listing; directories carry a trailing slash.
    pub fn label(&self) -> String {
        if self.is_dir && self.name != PARENT_ENTRY {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    FileSelected(PathBuf),
}

#[derive(Debug, Clone)]
pub struct FileBrowser {
    dir: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: usize,
}

impl FileBrowser {
    /// List `dir`; relative paths are resolved against the working directory.
    pub fn open(dir: &Path) -> Result<Self> {
        let dir = std::fs::canonicalize(dir)
            .map_err(|e| WaveError::file_error(format!("Cannot open {}", dir.display()), e))?;
        let entries = list_dir(&dir)?;
        Ok(Self {
            dir,
            entries,
            selected: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Select the entry at `index`, ignoring indexes past the end.
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = index;
        }
    }

    /// Enter the selected directory or report the selected trace file.
    ///
    /// Non-trace files are ignored. If the directory cannot be listed the
    /// current listing is kept and the error returned.
    pub fn activate(&mut self) -> Result<Option<BrowserEvent>> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(None);
        };

        if entry.is_dir {
            self.change_dir(&entry.path)?;
            return Ok(None);
        }

        if is_trace_file(&entry.path) {
            log::debug!("selected trace {}", entry.path.display());
            return Ok(Some(BrowserEvent::FileSelected(entry.path)));
        }
        Ok(None)
    }

    fn change_dir(&mut self, target: &Path) -> Result<()> {
        let entries = list_dir(target)?;
        self.dir = target.to_path_buf();
        self.entries = entries;
        self.selected = 0;
        Ok(())
    }
}

fn list_dir(dir: &Path) -> Result<Vec<BrowserEntry>> {
    let read = std::fs::read_dir(dir)
        .map_err(|e| WaveError::file_error(format!("Cannot list {}", dir.display()), e))?;

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in read {
        let entry = entry
            .map_err(|e| WaveError::file_error(format!("Cannot list {}", dir.display()), e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = path.is_dir();
        let item = BrowserEntry { name, path, is_dir };
        if is_dir {
            dirs.push(item);
        } else {
            files.push(item);
        }
    }
    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = dir.parent() {
        entries.push(BrowserEntry {
            name: PARENT_ENTRY.to_string(),
            path: parent.to_path_buf(),
            is_dir: true,
        });
    }
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}
