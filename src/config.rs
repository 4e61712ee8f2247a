// src/config.rs

/// Recognized image file extensions (all lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "ico", "tiff", "tif",
];
/// Recognized video file extensions (all lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "webm", "wmv", "flv", "m4v", "mpg", "mpeg",
];
/// Characters that may not appear in a category name.
pub const RESERVED_CATEGORY_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// The application name, shown in the greeting of the terminal front-end.
pub const APP_NAME: &str = "media_sorter";
/// Environment variable consulted for the folder when `--folder` is not given.
pub const FOLDER_ENV_VAR: &str = "MEDIA_SORTER_FOLDER";

/// Shown when a freshly loaded folder has no media files.
pub const NO_MEDIA_MESSAGE: &str = "No media files found.";
/// Shown when the last media file has been moved or deleted.
pub const ALL_SORTED_MESSAGE: &str = "Nothing left to sort.";
