// src/media_format.rs

use crate::config::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// How a file is classified, based purely on its extension.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Unrecognized,
}

impl MediaKind {
    /// Classifies a file name by the text after its last `.`, compared case-insensitively.
    /// Names without an extension are `Unrecognized`.
    ///
    /// # Arguments
    ///
    /// * `name` - A bare file name such as `"holiday.JPG"`.
    pub fn classify(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
            _ => return MediaKind::Unrecognized,
        };

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else {
            MediaKind::Unrecognized
        }
    }

    pub fn is_media(self) -> bool {
        self != MediaKind::Unrecognized
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
            MediaKind::Unrecognized => "Unrecognized",
        };
        f.write_str(label)
    }
}

/// The media file the session currently points at.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Position in the session's media sequence (0-based).
    pub index: usize,
    /// Bare file name, relative to the session root.
    pub name: String,
    /// Absolute (root-joined) path to the file.
    pub path: PathBuf,
    pub kind: MediaKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_formats() {
        assert_eq!(MediaKind::classify("a.jpg"), MediaKind::Image);
        assert_eq!(MediaKind::classify("a.mp4"), MediaKind::Video);
        assert_eq!(MediaKind::classify("a.txt"), MediaKind::Unrecognized);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(MediaKind::classify("SUNSET.JPEG"), MediaKind::Image);
        assert_eq!(MediaKind::classify("clip.MkV"), MediaKind::Video);
    }

    #[test]
    fn test_names_without_extension() {
        assert_eq!(MediaKind::classify("README"), MediaKind::Unrecognized);
        assert_eq!(MediaKind::classify("trailing."), MediaKind::Unrecognized);
        assert_eq!(MediaKind::classify(""), MediaKind::Unrecognized);
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(MediaKind::classify("archive.jpg.zip"), MediaKind::Unrecognized);
        assert_eq!(MediaKind::classify("notes.txt.png"), MediaKind::Image);
    }

    #[test]
    fn test_tables_are_lowercase_and_disjoint() {
        for ext in IMAGE_EXTENSIONS.iter().chain(VIDEO_EXTENSIONS) {
            assert_eq!(*ext, ext.to_lowercase());
        }
        for ext in IMAGE_EXTENSIONS {
            assert!(!VIDEO_EXTENSIONS.contains(ext), "{} is both image and video", ext);
        }
    }
}
