pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod gateway;
pub mod input;
pub mod session;
pub mod workspace;

pub use crate::core::error::ProjchatError;
pub use gateway::{Analysis, Gateway, QueryGateway};
pub use session::{ChatMessage, ChatSession, Sender};
pub use workspace::{Language, Snapshot, Workspace};
