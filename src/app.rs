use crate::cli::Args;
use crate::config::Config;
use crate::core::error::ProjchatError;
use crate::display;
use crate::gateway::{Gateway, QueryGateway};
use crate::input;
use crate::session::ChatSession;
use crate::workspace::{Language, Workspace};
use is_terminal::IsTerminal;
use std::io::{self, Read};

pub struct Application {
    pub args: Args,
    pub gateway: Gateway,
    pub workspace: Workspace,
    pub language: Language,
}

impl Application {
    pub fn new(args: Args, mut config: Config) -> Result<Self, ProjchatError> {
        if let Some(model) = &args.model {
            config.model = Some(model.clone());
        }

        let language = match args.language.as_deref() {
            Some(value) => Language::from_str(value)
                .ok_or_else(|| ProjchatError::Input(format!("Unknown language: {}", value)))?,
            None => config.language,
        };

        let workspace = match &args.data {
            Some(path) => Workspace::load(path)?,
            None => Workspace::default(),
        };

        let gateway = Gateway::new(&config)?;

        Ok(Self {
            args,
            gateway,
            workspace,
            language,
        })
    }

    pub async fn run(&mut self) -> Result<(), ProjchatError> {
        let piped = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| ProjchatError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        if self.args.chat {
            self.run_chat().await
        } else {
            let query = match (self.args.query.as_deref(), piped) {
                (Some(arg_q), Some(stdin_q)) => format!("{}\n\n{}", stdin_q.trim(), arg_q),
                (None, Some(stdin_q)) => stdin_q.trim().to_string(),
                (Some(arg_q), None) => arg_q.to_string(),
                (None, None) => {
                    return Err(ProjchatError::Input(
                        "No query provided; pass a question or use --chat".to_string(),
                    ));
                }
            };

            if self.args.analyze {
                self.run_analyze(&query).await
            } else {
                self.run_one_shot(&query).await
            }
        }
    }

    async fn run_one_shot(&self, query: &str) -> Result<(), ProjchatError> {
        let snapshot = self.workspace.snapshot();
        let response = self.gateway.chat_response(query, &snapshot).await?;
        display::display_reply(&response);
        Ok(())
    }

    async fn run_analyze(&self, query: &str) -> Result<(), ProjchatError> {
        let snapshot = self.workspace.snapshot();
        let analysis = self.gateway.analyze_query(query, &snapshot).await;
        display::display_analysis(&analysis, &self.workspace);
        Ok(())
    }

    async fn run_chat(&mut self) -> Result<(), ProjchatError> {
        let mut session = ChatSession::new(self.language);
        session.open();
        if let Some(welcome) = session.last_message() {
            display::display_message(welcome);
        }
        println!(
            "{}",
            console::style("Type /reset to start over, /quit or Ctrl-D to leave.").dim()
        );

        let mut editor = input::create_editor()?;

        loop {
            let Some(line) = input::read_input(&mut editor)? else {
                break;
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            match line.as_str() {
                "/quit" | "/exit" => break,
                "/reset" => {
                    session = ChatSession::new(self.language);
                    session.open();
                    if let Some(welcome) = session.last_message() {
                        display::display_message(welcome);
                    }
                    continue;
                }
                _ => {}
            }

            let before = session.revision();
            let snapshot = self.workspace.snapshot();
            session.exchange(&line, &self.gateway, &snapshot).await;

            // Newest message must be visible after every transcript change.
            if session.revision() != before {
                if let Some(message) = session.last_message() {
                    display::display_message(message);
                }
            }
        }

        input::save_history(&mut editor)?;

        Ok(())
    }
}
