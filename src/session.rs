// src/session.rs

//! Folder session: the media list, category list and cursor of one selected
//! folder, plus the operations that keep them consistent with the disk.

use crate::config::RESERVED_CATEGORY_CHARS;
use crate::error::{FailedEntry, InvalidNameReason, SessionError};
use crate::file_utils::{DirEntryInfo, FileSystem, StdFileSystem, SystemTrash, Trash};
use crate::media_format::{MediaItem, MediaKind};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Empty,
    Browsing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

/// What the presentation layer should show after an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayAction {
    /// Show this item; it is now current.
    Show(MediaItem),
    /// The media sequence is empty.
    Empty,
    /// Nothing changed, keep showing what is on screen.
    Unchanged,
}

/// JSON-friendly snapshot of a session.
#[derive(Serialize, Debug)]
pub struct SessionSummary {
    pub root: PathBuf,
    pub state: SessionState,
    pub files: Vec<FileSummary>,
    pub categories: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct FileSummary {
    pub name: String,
    pub kind: MediaKind,
}

/// One selected folder. The media sequence only ever changes after the
/// matching filesystem operation has succeeded.
pub struct Session<F = StdFileSystem, T = SystemTrash> {
    root: PathBuf,
    files: Vec<String>,
    categories: Vec<String>,
    index: usize,
    fs: F,
    trash: T,
}

impl Session {
    /// Loads `root` using the local disk and the system recycle bin.
    pub fn open(root: impl Into<PathBuf>) -> Result<(Self, DisplayAction), SessionError> {
        Session::load(root, StdFileSystem, SystemTrash)
    }
}

impl<F: FileSystem, T: Trash> Session<F, T> {
    /// Lists the immediate children of `root` and builds a new session.
    ///
    /// Files with a recognized media extension become the media sequence and
    /// every non-file entry becomes a category; both are sorted by name. Other
    /// files are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if `root` is missing or cannot be listed.
    pub fn load(
        root: impl Into<PathBuf>,
        fs: F,
        trash: T,
    ) -> Result<(Self, DisplayAction), SessionError> {
        let mut session = Session {
            root: root.into(),
            files: Vec::new(),
            categories: Vec::new(),
            index: 0,
            fs,
            trash,
        };
        let action = session.reload()?;
        Ok((session, action))
    }

    /// Re-lists the root folder, replacing the media and category sequences
    /// and resetting the cursor to the first file.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if the root can no longer be listed;
    /// the session is left untouched in that case.
    pub fn reload(&mut self) -> Result<DisplayAction, SessionError> {
        let entries = self
            .fs
            .list_dir(&self.root)
            .map_err(|source| SessionError::NotFound {
                path: self.root.clone(),
                source,
            })?;

        let mut files = Vec::new();
        let mut categories = Vec::new();
        for entry in entries {
            if !entry.is_file {
                categories.push(entry.name);
            } else if MediaKind::classify(&entry.name).is_media() {
                files.push(entry.name);
            }
        }
        files.sort();
        categories.sort();

        info!(
            "Loaded '{}': {} media file(s), {} categories",
            self.root.display(),
            files.len(),
            categories.len()
        );
        self.files = files;
        self.categories = categories;
        self.index = 0;
        Ok(self.current_action())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn state(&self) -> SessionState {
        if self.files.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Browsing
        }
    }

    /// The item under the cursor, or `None` when there are no media files.
    pub fn current(&self) -> Option<MediaItem> {
        let name = self.files.get(self.index)?;
        Some(MediaItem {
            index: self.index,
            name: name.clone(),
            path: self.root.join(name),
            kind: MediaKind::classify(name),
        })
    }

    /// 1-based position of the cursor and the total number of files.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current().map(|_| (self.index + 1, self.files.len()))
    }

    pub fn has_previous(&self) -> bool {
        !self.files.is_empty() && self.index > 0
    }

    pub fn has_next(&self) -> bool {
        !self.files.is_empty() && self.index < self.files.len() - 1
    }

    /// Moves the cursor one step. At either end this is a no-op and
    /// `DisplayAction::Unchanged` is returned.
    pub fn advance(&mut self, direction: Direction) -> DisplayAction {
        let moved = match direction {
            Direction::Forward if self.has_next() => {
                self.index += 1;
                true
            }
            Direction::Back if self.has_previous() => {
                self.index -= 1;
                true
            }
            _ => false,
        };

        if moved {
            self.current_action()
        } else {
            DisplayAction::Unchanged
        }
    }

    /// Moves the current file into `root/category`, keeping its name.
    ///
    /// # Errors
    ///
    /// * `UnknownCategory` if `category` is not one of the session's categories.
    /// * `IoFailure` if the move fails (e.g. a same-named file already exists
    ///   in the category). The media sequence is unchanged.
    pub fn move_to_category(&mut self, category: &str) -> Result<DisplayAction, SessionError> {
        let Some(name) = self.files.get(self.index).cloned() else {
            return Ok(DisplayAction::Unchanged);
        };
        if !self.categories.iter().any(|c| c == category) {
            return Err(SessionError::UnknownCategory(category.to_owned()));
        }

        let from = self.root.join(&name);
        let to = self.root.join(category).join(&name);
        if let Err(source) = self.fs.move_entry(&from, &to) {
            warn!("Could not move {} to {}: {}", name, category, source);
            return Err(SessionError::IoFailure {
                operation: "move",
                target: format!("{} to {}", name, category),
                source,
            });
        }

        info!("Moved {} to {}", name, category);
        self.files.remove(self.index);
        Ok(self.advance_after_removal())
    }

    /// Sends the current file to the recycle bin. Confirmation is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns `IoFailure` naming the file if the trash provider fails; the
    /// media sequence is unchanged.
    pub fn delete_current(&mut self) -> Result<DisplayAction, SessionError> {
        let Some(name) = self.files.get(self.index).cloned() else {
            return Ok(DisplayAction::Unchanged);
        };

        if let Err(source) = self.trash.delete(&self.root.join(&name)) {
            warn!("Could not delete {}: {}", name, source);
            return Err(SessionError::IoFailure {
                operation: "delete",
                target: name,
                source,
            });
        }

        info!("Moved {} to the recycle bin", name);
        self.files.remove(self.index);
        Ok(self.advance_after_removal())
    }

    // Shared by every removal path. The item that slides into the current
    // slot becomes current; only a removed tail pulls the cursor back.
    fn advance_after_removal(&mut self) -> DisplayAction {
        if self.files.is_empty() {
            self.index = 0;
            return DisplayAction::Empty;
        }
        if self.index >= self.files.len() {
            self.index = self.files.len() - 1;
        }
        self.current_action()
    }

    /// Creates `root/name` and appends it to the categories.
    ///
    /// Surrounding whitespace is trimmed first. The name is appended, not
    /// sorted in, so new categories show up last.
    ///
    /// # Errors
    ///
    /// * `InvalidName` for an empty or duplicate name, or one containing any of
    ///   `/ \ : * ? " < > |` (all offending characters are reported).
    /// * `IoFailure` if the directory cannot be created.
    pub fn add_category(&mut self, name: &str) -> Result<(), SessionError> {
        let name = name.trim();
        validate_category_name(name, &self.categories)?;

        if let Err(source) = self.fs.create_dir(&self.root.join(name)) {
            warn!("Could not create category {}: {}", name, source);
            return Err(SessionError::IoFailure {
                operation: "create category",
                target: name.to_owned(),
                source,
            });
        }

        info!("Created category {}", name);
        self.categories.push(name.to_owned());
        Ok(())
    }

    /// Moves everything inside `root/name` back into the root, removes the
    /// emptied directory and reloads the folder. Confirmation is the caller's
    /// job. Unknown names are a no-op.
    ///
    /// # Errors
    ///
    /// * `PartialFailure` listing every entry that could not be moved back.
    ///   The directory is kept and still listed as a category.
    /// * `IoFailure` if the category cannot be listed or the emptied
    ///   directory cannot be removed.
    /// * `NotFound` if everything was moved but the root could not be
    ///   listed again afterwards.
    ///
    /// Apart from a failed category listing, the session is reloaded from
    /// disk before returning. If that reload fails, the entries that did move
    /// are applied to the in-memory lists instead, and a `PartialFailure` or
    /// `IoFailure` is still returned in preference to the reload error.
    pub fn remove_category(&mut self, name: &str) -> Result<DisplayAction, SessionError> {
        if !self.categories.iter().any(|c| c == name) {
            return Ok(DisplayAction::Unchanged);
        }

        let category_path = self.root.join(name);
        let entries = self
            .fs
            .list_dir(&category_path)
            .map_err(|source| SessionError::IoFailure {
                operation: "list category",
                target: name.to_owned(),
                source,
            })?;

        let mut moved = Vec::new();
        let mut failed = Vec::new();
        for entry in entries {
            let from = category_path.join(&entry.name);
            let to = self.root.join(&entry.name);
            match self.fs.move_entry(&from, &to) {
                Ok(()) => {
                    debug!("Moved {} back out of {}", entry.name, name);
                    moved.push(entry);
                }
                Err(cause) => {
                    warn!("Could not move {} out of {}: {}", entry.name, name, cause);
                    failed.push(FailedEntry {
                        name: entry.name,
                        cause,
                    });
                }
            }
        }

        if !failed.is_empty() {
            let _ = self.resync_after_category_removal(name, moved, false);
            return Err(SessionError::PartialFailure {
                category: name.to_owned(),
                failed,
            });
        }

        match self.fs.remove_dir(&category_path) {
            Ok(()) => {
                info!("Removed category {}", name);
                self.resync_after_category_removal(name, moved, true)
            }
            Err(source) => {
                warn!("Could not remove category folder {}: {}", name, source);
                let _ = self.resync_after_category_removal(name, moved, false);
                Err(SessionError::IoFailure {
                    operation: "remove category",
                    target: name.to_owned(),
                    source,
                })
            }
        }
    }

    // Reloads from disk. If the root can't be listed, patches the in-memory
    // lists with what is known to have happened and returns the reload error.
    fn resync_after_category_removal(
        &mut self,
        category: &str,
        moved: Vec<DirEntryInfo>,
        dir_removed: bool,
    ) -> Result<DisplayAction, SessionError> {
        let err = match self.reload() {
            Ok(action) => return Ok(action),
            Err(err) => err,
        };
        warn!("Could not re-read {} after emptying {}: {}", self.root.display(), category, err);

        for entry in moved {
            if !entry.is_file {
                self.categories.push(entry.name);
            } else if MediaKind::classify(&entry.name).is_media() {
                self.files.push(entry.name);
            }
        }
        self.files.sort();
        if dir_removed {
            self.categories.retain(|c| c != category);
        }
        self.index = self.index.min(self.files.len().saturating_sub(1));
        Err(err)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            root: self.root.clone(),
            state: self.state(),
            files: self
                .files
                .iter()
                .map(|name| FileSummary {
                    name: name.clone(),
                    kind: MediaKind::classify(name),
                })
                .collect(),
            categories: self.categories.clone(),
        }
    }

    /// `Show` for the current item, `Empty` if there is none.
    pub fn current_action(&self) -> DisplayAction {
        match self.current() {
            Some(item) => DisplayAction::Show(item),
            None => DisplayAction::Empty,
        }
    }
}

/// Checks a (trimmed) category name against the existing categories.
fn validate_category_name(name: &str, existing: &[String]) -> Result<(), SessionError> {
    let reason = if name.is_empty() {
        Some(InvalidNameReason::Empty)
    } else if existing.iter().any(|c| c == name) {
        Some(InvalidNameReason::Duplicate)
    } else {
        let found: Vec<char> = name
            .chars()
            .filter(|c| RESERVED_CATEGORY_CHARS.contains(c))
            .collect();
        (!found.is_empty()).then_some(InvalidNameReason::ReservedCharacters(found))
    };

    match reason {
        Some(reason) => Err(SessionError::InvalidName {
            name: name.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}
