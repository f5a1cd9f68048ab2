//! Application state and command handlers.
//!
//! Handlers write command output to the writer they are given. Status and
//! diagnostics go to stderr or the log, so stdout carries only results.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info};

use m31_core::{
    AiService, ChatSession, ClientMessage, MockModelBuilder, ModelRegistry, ServerMessage, Settings,
};

use crate::commands::{parse_slash_command, SlashCommand, HELP};

/// User-facing text when a suggestion fails.
const SUGGESTION_ERROR: &str = "Error getting suggestion";

/// User-facing text when a model switch fails.
const SWITCH_ERROR: &str = "Failed to switch model";

/// Main application state.
pub struct M31App {
    /// AI service wired to the model registry.
    service: AiService,
}

impl M31App {
    /// Load settings and initialize the model registry.
    pub async fn new(config: Option<&Path>) -> anyhow::Result<Self> {
        let settings = match config {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::load(),
        };
        Self::from_settings(settings).await
    }

    /// Initialize the model registry from already loaded settings.
    pub async fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        debug!(?settings, "Loaded settings");

        let registry = ModelRegistry::from_settings(&settings, Arc::new(MockModelBuilder));
        registry.initialize(&settings.models).await?;

        info!(
            active = %registry.active_name().await,
            declared = settings.available_models.len(),
            "Initialized M31 Code"
        );

        let service = AiService::with_default_policy(Arc::new(registry));
        Ok(Self { service })
    }

    fn registry(&self) -> &ModelRegistry {
        self.service.registry()
    }

    /// Switch the active model.
    ///
    /// Success is logged; failure is reported on stderr. Returns `false` if
    /// the model could not be selected.
    pub async fn select_model(&self, name: &str) -> bool {
        match self.registry().switch_active(name).await {
            Ok(()) => {
                info!(model = %name, "Active model selected");
                true
            }
            Err(e) => {
                error!(error = %e, "Model switch failed");
                eprintln!("{SWITCH_ERROR}");
                false
            }
        }
    }

    /// Write declared models with active and ready markers.
    pub async fn list_models(&self, out: &mut impl Write) -> std::io::Result<()> {
        let active = self.registry().active_name().await;
        for name in self.registry().list_available() {
            let marker = if name == active { "*" } else { " " };
            let ready = if self.registry().is_initialized(&name).await {
                ""
            } else {
                " (not initialized)"
            };
            writeln!(out, "{marker} {name}{ready}")?;
        }
        Ok(())
    }

    /// Write a suggestion for `code`, or for stdin when `code` is `None`.
    pub async fn suggest(&self, code: Option<String>, out: &mut impl Write) -> anyhow::Result<bool> {
        let code = match code {
            Some(code) => code,
            None => read_stdin()?,
        };

        match self.service.get_suggestion(&code).await {
            Ok(suggestion) => {
                writeln!(out, "{suggestion}")?;
                Ok(true)
            }
            Err(e) => {
                error!(error = %e, "Suggestion failed");
                eprintln!("{SUGGESTION_ERROR}");
                Ok(false)
            }
        }
    }

    /// Send one chat message and write the reply.
    pub async fn chat_once(&self, message: String, out: &mut impl Write) -> anyhow::Result<bool> {
        let mut session = ChatSession::new(self.service.clone());
        let reply = send(&mut session, message).await;
        Ok(write_reply(&reply, out)?)
    }

    /// Interactive chat until EOF or `/quit`.
    pub async fn chat_loop<R>(&self, input: R, out: &mut impl Write) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut session = ChatSession::new(self.service.clone());
        let mut lines = input.lines();

        writeln!(out, "M31 Code chat ({}). {HELP}", self.registry().active_name().await)?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match parse_slash_command(&line) {
                None => {
                    let reply = send(&mut session, line).await;
                    write_reply(&reply, out)?;
                }
                Some(SlashCommand::Models) => self.list_models(out).await?,
                Some(SlashCommand::Model(name)) => {
                    if self.select_model(&name).await {
                        writeln!(out, "Switched to {name} model")?;
                    }
                }
                Some(SlashCommand::History) => {
                    writeln!(out, "{}", serde_json::to_string_pretty(session.messages())?)?;
                }
                Some(SlashCommand::Clear) => {
                    session.clear();
                    writeln!(out, "Conversation cleared")?;
                }
                Some(SlashCommand::Quit) => break,
                Some(SlashCommand::Unknown(command)) => {
                    writeln!(out, "Unknown command: {command}. {HELP}")?;
                }
            }
        }

        debug!(messages = session.messages().len(), "Chat loop finished");
        Ok(())
    }

    /// Speak the host JSON protocol, one message per line.
    ///
    /// Every line written to `out` is a JSON `ServerMessage`.
    pub async fn chat_json<R>(&self, input: R, out: &mut impl Write) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut session = ChatSession::new(self.service.clone());
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let reply = match session.handle_json(&line).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!(error = %e, "Malformed host message");
                    serde_json::to_string(&ServerMessage::error())?
                }
            };
            writeln!(out, "{reply}")?;
        }

        Ok(())
    }
}

async fn send(session: &mut ChatSession, message: String) -> ServerMessage {
    session.handle(ClientMessage::SendMessage { message }).await
}

fn write_reply(reply: &ServerMessage, out: &mut impl Write) -> std::io::Result<bool> {
    match reply {
        ServerMessage::Response { message } => {
            writeln!(out, "{message}")?;
            Ok(true)
        }
        ServerMessage::Error { message } => {
            eprintln!("{message}");
            Ok(false)
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}
