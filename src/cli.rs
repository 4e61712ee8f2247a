// src/cli.rs

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Step through the images and videos in a folder and sort each one into a category subfolder.",
    long_about = None
)]
pub struct Cli {
    /// Folder to sort. Falls back to MEDIA_SORTER_FOLDER, then a prompt.
    #[clap(short, long)]
    pub folder: Option<String>,

    /// Open each displayed file with the system's default viewer.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub open: bool,

    /// Print the folder's media files and categories as JSON and exit.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub list: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["media_sorter", "-f", "~/Pictures", "--open"]);
        assert_eq!(cli.folder.as_deref(), Some("~/Pictures"));
        assert!(cli.open);
        assert!(!cli.list);
    }
}
