use crate::core::error::ProjchatError;
use console::style;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{CompletionType, Config, EditMode, Editor};
use std::path::{Path, PathBuf};

fn history_path() -> PathBuf {
    dirs::home_dir()
        .map(|mut path| {
            path.push(".projchat/input_history.txt");
            path
        })
        .unwrap_or_else(|| Path::new(".projchat/input_history.txt").to_path_buf())
}

/// Creates a configured rustyline editor with persistent history.
pub fn create_editor() -> Result<Editor<(), FileHistory>, ProjchatError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| ProjchatError::Input(format!("Failed to create line editor: {}", e)))?;
    let _ = editor.load_history(&history_path());

    Ok(editor)
}

/// Reads one line; `None` means the user asked to leave (Ctrl-C/Ctrl-D).
pub fn read_input(editor: &mut Editor<(), FileHistory>) -> Result<Option<String>, ProjchatError> {
    let prompt = style("you> ").bold().cyan().to_string();
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor.add_history_entry(&line).map_err(|e| {
                    ProjchatError::Input(format!("Failed to add history entry: {}", e))
                })?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Exiting...");
            Ok(None)
        }
        Err(err) => Err(ProjchatError::Input(format!("Input error: {}", err))),
    }
}

pub fn save_history(editor: &mut Editor<(), FileHistory>) -> Result<(), ProjchatError> {
    let path = history_path();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProjchatError::Input(format!("Failed to create history directory: {}", e))
            })?;
        }
    }

    editor
        .save_history(&path)
        .map_err(|e| ProjchatError::Input(format!("Failed to save history: {}", e)))
}
