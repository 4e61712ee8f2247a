// src/main.rs

use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Select};
use std::env;
use std::path::PathBuf;
use std::process;

// Module declarations
mod cli;
mod config;
mod error;
mod file_utils;
mod media_format;
mod session;
mod ui;

// Crate imports for convenience
use crate::cli::Cli;
use crate::config::{ALL_SORTED_MESSAGE, APP_NAME, FOLDER_ENV_VAR, NO_MEDIA_MESSAGE};
use crate::session::{Direction, Session};
use crate::ui::{
    ask_category_name, confirm_delete_file, confirm_remove_category, listing_json, open_media,
    pick_category, present, prompt_folder, DisplaySink, TerminalDisplay,
};

fn main() {
    env_logger::init();
    if let Err(err) = run_app() {
        eprintln!("\nApplication Error: {}", err);
        process::exit(1);
    }
}

/// Expands `~` and environment variables, the same way the folder prompt does.
fn expand_folder(raw: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(PathBuf::from(shellexpand::full(raw)?.into_owned()))
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli_args = Cli::parse();
    let theme = ColorfulTheme::default();
    let mut display = TerminalDisplay {
        open_externally: cli_args.open,
    };
    let default_folder = dirs::picture_dir();

    let mut current_folder_path: Option<PathBuf> = cli_args
        .folder
        .or_else(|| env::var(FOLDER_ENV_VAR).ok())
        .map(|raw| expand_folder(&raw))
        .transpose()?;

    if cli_args.list {
        let folder = match current_folder_path {
            Some(path) => path,
            None => prompt_folder(&theme, default_folder.as_deref())?,
        };
        let (session, _) = Session::open(folder)?;
        println!("{}", listing_json(&session)?);
        return Ok(());
    }

    println!("{}: use the menu to sort files into categories.", APP_NAME);

    'outer: loop {
        // Every folder selection replaces the session wholesale.
        let folder = match current_folder_path.take() {
            Some(path) => path,
            None => prompt_folder(&theme, default_folder.as_deref())?,
        };
        let (mut session, action) = match Session::open(&folder) {
            Ok(loaded) => loaded,
            Err(e) => {
                display.show_error(&e);
                continue 'outer;
            }
        };
        println!("Sorting '{}'", session.root().display());
        present(&mut display, &session, &action, NO_MEDIA_MESSAGE);

        loop {
            let has_file = session.current().is_some();
            let has_categories = !session.categories().is_empty();

            let mut actions = Vec::new();
            if session.has_next() {
                actions.push("Next file");
            }
            if session.has_previous() {
                actions.push("Previous file");
            }
            if has_file && has_categories {
                actions.push("Move to category");
            }
            if has_file {
                actions.push("Delete file");
            }
            actions.push("Add category");
            if has_categories {
                actions.push("Remove category");
            }
            if has_file {
                actions.push("Open in default viewer");
            }
            actions.extend(["Rescan folder", "Choose a different folder", "Quit"]);

            let choice_prompt = if has_categories {
                format!("Categories: {}. What next?", session.categories().join(", "))
            } else {
                "No categories yet. What next?".to_string()
            };

            let choice_idx = Select::with_theme(&theme)
                .with_prompt(&choice_prompt)
                .items(&actions)
                .default(0)
                .interact_opt()?
                .unwrap_or(actions.len() - 1);

            match actions.get(choice_idx).copied() {
                Some("Next file") => {
                    let action = session.advance(Direction::Forward);
                    present(&mut display, &session, &action, ALL_SORTED_MESSAGE);
                }
                Some("Previous file") => {
                    let action = session.advance(Direction::Back);
                    present(&mut display, &session, &action, ALL_SORTED_MESSAGE);
                }
                Some("Move to category") => {
                    let categories = session.categories().to_vec();
                    if let Some(category) = pick_category(&theme, "Move to", &categories)? {
                        match session.move_to_category(&category) {
                            Ok(action) => present(&mut display, &session, &action, ALL_SORTED_MESSAGE),
                            Err(e) => display.show_error(&e),
                        }
                    }
                }
                Some("Delete file") => {
                    let Some(item) = session.current() else {
                        continue;
                    };
                    if confirm_delete_file(&theme, &item.name)? {
                        match session.delete_current() {
                            Ok(action) => present(&mut display, &session, &action, ALL_SORTED_MESSAGE),
                            Err(e) => display.show_error(&e),
                        }
                    }
                }
                Some("Add category") => {
                    let name = ask_category_name(&theme)?;
                    match session.add_category(&name) {
                        Ok(()) => println!("Category '{}' created.", name.trim()),
                        Err(e) => display.show_error(&e),
                    }
                }
                Some("Remove category") => {
                    let categories = session.categories().to_vec();
                    let Some(category) = pick_category(&theme, "Remove category", &categories)?
                    else {
                        continue;
                    };
                    if confirm_remove_category(&theme, &category)? {
                        match session.remove_category(&category) {
                            Ok(action) => {
                                println!("Category '{}' removed.", category);
                                present(&mut display, &session, &action, NO_MEDIA_MESSAGE);
                            }
                            Err(e) => {
                                display.show_error(&e);
                                // The folder was re-read; show whatever is current now.
                                let action = session.current_action();
                                present(&mut display, &session, &action, NO_MEDIA_MESSAGE);
                            }
                        }
                    }
                }
                Some("Open in default viewer") => {
                    if let Some(item) = session.current() {
                        if let Err(e) = open_media(&item.path) {
                            eprintln!("Unable to open {}: {}", item.name, e);
                        }
                    }
                }
                Some("Rescan folder") => match session.reload() {
                    Ok(action) => present(&mut display, &session, &action, NO_MEDIA_MESSAGE),
                    Err(e) => {
                        display.show_error(&e);
                        continue 'outer;
                    }
                },
                Some("Choose a different folder") => continue 'outer,
                Some("Quit") | Some(_) | None => {
                    println!("Goodbye!");
                    return Ok(());
                }
            }
        }
    }
}
