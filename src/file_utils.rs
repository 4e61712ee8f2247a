// src/file_utils.rs

use std::{
    fs,
    io::{self, Error as IoError, ErrorKind as IoErrorKind},
    path::Path,
};
use walkdir::WalkDir;

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Bare entry name (not a full path).
    pub name: String,
    /// True for regular files and symlinks to them; directories and anything else are false.
    pub is_file: bool,
}

/// Filesystem operations a folder session depends on. Every operation is
/// fallible and reports an `io::Error` (kind + message) on failure.
pub trait FileSystem {
    /// Lists the immediate children of `dir` (non-recursive).
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Moves `from` to `to`. Must fail with `AlreadyExists` rather than
    /// overwrite an existing `to`.
    fn move_entry(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Creates a single directory. Fails if it already exists.
    fn create_dir(&self, dir: &Path) -> io::Result<()>;

    /// Removes an empty directory.
    fn remove_dir(&self, dir: &Path) -> io::Result<()>;
}

/// Sends files to the platform recycle bin.
pub trait Trash {
    fn delete(&self, path: &Path) -> io::Result<()>;
}

/// `FileSystem` backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    /// Scans the specified folder one level deep.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * `dir` is not a valid directory.
    /// * An entry cannot be read while walking the directory.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        if !dir.is_dir() {
            return Err(IoError::new(
                IoErrorKind::NotFound,
                format!("Path is not a directory: {}", dir.display()),
            ));
        }

        let mut entries = Vec::new();
        // Depth 1 only: the contents of the folder, never its subfolders.
        for entry_result in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry_result.map_err(IoError::from)?;
            match entry.file_name().to_str() {
                Some(name) => entries.push(DirEntryInfo {
                    name: name.to_owned(),
                    // Follows symlinks, so a linked photo counts as a file.
                    is_file: entry.path().is_file(),
                }),
                None => log::warn!(
                    "Skipping entry with a non UTF-8 name: {}",
                    entry.path().display()
                ),
            }
        }
        Ok(entries)
    }

    fn move_entry(&self, from: &Path, to: &Path) -> io::Result<()> {
        // fs::rename silently replaces an existing file on Unix.
        if fs::symlink_metadata(to).is_ok() {
            return Err(IoError::new(
                IoErrorKind::AlreadyExists,
                format!("Destination already exists: {}", to.display()),
            ));
        }
        fs::rename(from, to)
    }

    fn create_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir(dir)
    }

    fn remove_dir(&self, dir: &Path) -> io::Result<()> {
        fs::remove_dir(dir)
    }
}

/// `Trash` backed by the operating system's recycle bin.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl Trash for SystemTrash {
    fn delete(&self, path: &Path) -> io::Result<()> {
        trash::delete(path).map_err(|e| IoError::other(e.to_string()))
    }
}
