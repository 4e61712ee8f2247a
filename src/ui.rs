// src/ui.rs

use crate::error::SessionError;
use crate::file_utils::{FileSystem, Trash};
use crate::media_format::MediaItem;
use crate::session::{DisplayAction, Session};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::{Path, PathBuf};

/// Receives whatever the session says should be on screen.
pub trait DisplaySink {
    fn show_media(&mut self, item: &MediaItem, position: usize, total: usize);
    fn show_empty(&mut self, message: &str);
    fn show_error(&mut self, error: &SessionError);
}

/// Forwards a display action to the sink. `Unchanged` shows nothing.
///
/// # Arguments
///
/// * `empty_message` - Placeholder text used if the action is `Empty`.
pub fn present<S, F, T>(
    sink: &mut S,
    session: &Session<F, T>,
    action: &DisplayAction,
    empty_message: &str,
) where
    S: DisplaySink,
    F: FileSystem,
    T: Trash,
{
    match action {
        DisplayAction::Show(item) => {
            let (position, total) = session
                .position()
                .unwrap_or((item.index + 1, session.files().len()));
            sink.show_media(item, position, total);
        }
        DisplayAction::Empty => sink.show_empty(empty_message),
        DisplayAction::Unchanged => {}
    }
}

/// Builds the one-line status shown for the current file.
pub fn status_line(item: &MediaItem, position: usize, total: usize) -> String {
    format!(
        "File: {} of {} | File: {} | {}",
        position, total, item.name, item.kind
    )
}

/// Prints to the terminal and optionally hands each file to the system viewer.
pub struct TerminalDisplay {
    pub open_externally: bool,
}

impl DisplaySink for TerminalDisplay {
    fn show_media(&mut self, item: &MediaItem, position: usize, total: usize) {
        println!("\n{}", status_line(item, position, total));
        if self.open_externally {
            if let Err(e) = open_media(&item.path) {
                eprintln!("Unable to open {}: {}", item.name, e);
            }
        }
    }

    fn show_empty(&mut self, message: &str) {
        println!("\n{}", message);
    }

    fn show_error(&mut self, error: &SessionError) {
        eprintln!("\nError: {}", error);
    }
}

/// Attempts to open the given media file with the system's default application.
pub fn open_media(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    open::that(path).map_err(|e| {
        format!(
            "Failed to open '{}' with the default system viewer: {}",
            path.display(),
            e
        )
        .into()
    })
}

/// Asks for the folder to sort. `~` and environment variables are expanded.
///
/// # Errors
///
/// Returns an error if the dialoguer interaction or the expansion fails.
pub fn prompt_folder(
    theme: &ColorfulTheme,
    default: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt("Enter the path to the media folder (supports ~ and env vars)");
    if let Some(default) = default {
        input = input.default(default.to_string_lossy().into_owned());
    }
    let raw = input.interact_text()?;
    Ok(PathBuf::from(shellexpand::full(&raw)?.into_owned()))
}

/// Lets the user pick one of `categories`. `None` if they pressed Esc.
pub fn pick_category(
    theme: &ColorfulTheme,
    prompt: &str,
    categories: &[String],
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(categories)
        .default(0)
        .interact_opt()?;
    Ok(selection.and_then(|i| categories.get(i).cloned()))
}

pub fn ask_category_name(theme: &ColorfulTheme) -> Result<String, Box<dyn std::error::Error>> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt("New category name")
        .allow_empty(true)
        .interact_text()?)
}

pub fn confirm_delete_file(
    theme: &ColorfulTheme,
    name: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(format!("Move '{}' to the recycle bin?", name))
        .default(true)
        .interact_opt()?
        .unwrap_or(false))
}

pub fn confirm_remove_category(
    theme: &ColorfulTheme,
    category: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(format!(
            "Are you sure to delete {} category?\nAll files in this category will be moved to main folder",
            category
        ))
        .default(false)
        .interact_opt()?
        .unwrap_or(false))
}

/// Serializes a session summary as pretty JSON.
pub fn listing_json<F: FileSystem, T: Trash>(
    session: &Session<F, T>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&session.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ALL_SORTED_MESSAGE, NO_MEDIA_MESSAGE};
    use crate::file_utils::StdFileSystem;
    use crate::media_format::MediaKind;
    use std::fs::File;
    use std::io;

    struct NoTrash;

    impl Trash for NoTrash {
        fn delete(&self, path: &Path) -> io::Result<()> {
            std::fs::remove_file(path)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        shown: Vec<String>,
    }

    impl DisplaySink for RecordingSink {
        fn show_media(&mut self, item: &MediaItem, position: usize, total: usize) {
            self.shown.push(status_line(item, position, total));
        }

        fn show_empty(&mut self, message: &str) {
            self.shown.push(message.to_string());
        }

        fn show_error(&mut self, error: &SessionError) {
            self.shown.push(format!("error: {}", error));
        }
    }

    #[test]
    fn test_status_line_format() {
        let item = MediaItem {
            index: 1,
            name: "clip.mp4".into(),
            path: PathBuf::from("/media/clip.mp4"),
            kind: MediaKind::Video,
        };
        assert_eq!(status_line(&item, 2, 5), "File: 2 of 5 | File: clip.mp4 | Video");
    }

    #[test]
    fn test_present_follows_session() {
        let temp_dir = tempfile::tempdir().unwrap();
        File::create(temp_dir.path().join("a.jpg")).unwrap();
        File::create(temp_dir.path().join("b.jpg")).unwrap();
        let (mut session, action) =
            Session::load(temp_dir.path(), StdFileSystem, NoTrash).unwrap();
        let mut sink = RecordingSink::default();

        present(&mut sink, &session, &action, NO_MEDIA_MESSAGE);
        let action = session.delete_current().unwrap();
        present(&mut sink, &session, &action, ALL_SORTED_MESSAGE);
        let action = session.advance(crate::session::Direction::Forward);
        present(&mut sink, &session, &action, ALL_SORTED_MESSAGE);
        let action = session.delete_current().unwrap();
        present(&mut sink, &session, &action, ALL_SORTED_MESSAGE);

        assert_eq!(
            sink.shown,
            vec![
                "File: 1 of 2 | File: a.jpg | Image".to_string(),
                "File: 1 of 1 | File: b.jpg | Image".to_string(),
                ALL_SORTED_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn test_listing_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        File::create(temp_dir.path().join("a.webm")).unwrap();
        let (session, _) = Session::load(temp_dir.path(), StdFileSystem, NoTrash).unwrap();

        let json = listing_json(&session).unwrap();
        assert!(json.contains("\"a.webm\""));
        assert!(json.contains("\"video\""));
    }
}
