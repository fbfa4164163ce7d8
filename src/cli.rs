use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Question to ask about the workspace (omit with --chat)
    pub query: Option<String>,

    /// Path to a workspace JSON file (projects/activities/users/teams)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Start an interactive chat session
    #[arg(short, long)]
    pub chat: bool,

    /// Classify the query and print the structured result instead of a
    /// conversational reply
    #[arg(short, long)]
    pub analyze: bool,

    /// Display language [possible values: ar, en]
    #[arg(short, long)]
    pub language: Option<String>,

    /// Model to use (overrides the config file)
    #[arg(short, long)]
    pub model: Option<String>,
}
