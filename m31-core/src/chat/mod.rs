//! Chat sessions between the host UI and the AI service.
//!
//! The host sends `sendMessage` requests and gets back either a `response`
//! or an `error`. The transcript lives only as long as the session.

mod types;

pub use types::{ClientMessage, Message, MessageRole, ServerMessage, CHAT_ERROR_MESSAGE};

use std::error::Error as _;

use tracing::{debug, error};

use crate::service::AiService;

/// One conversation with the active model.
#[derive(Debug)]
pub struct ChatSession {
    service: AiService,
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn new(service: AiService) -> Self {
        Self {
            service,
            messages: Vec::new(),
        }
    }

    /// Handle a host message and produce the reply to send back.
    ///
    /// The user message is recorded even if the request fails; the reply is
    /// recorded only on success.
    pub async fn handle(&mut self, request: ClientMessage) -> ServerMessage {
        match request {
            ClientMessage::SendMessage { message } => self.send(message).await,
        }
    }

    /// Handle a raw JSON host message and return the JSON reply.
    pub async fn handle_json(&mut self, request: &str) -> Result<String, serde_json::Error> {
        let request: ClientMessage = serde_json::from_str(request)?;
        let reply = self.handle(request).await;
        serde_json::to_string(&reply)
    }

    async fn send(&mut self, message: String) -> ServerMessage {
        let result = self.service.chat(&message).await;
        self.messages.push(Message::user(message));

        match result {
            Ok(response) => {
                self.messages.push(Message::assistant(response.clone()));
                debug!(messages = self.messages.len(), "Chat response received");
                ServerMessage::Response { message: response }
            }
            Err(e) => {
                error!(error = %e, cause = ?e.source(), "Chat request failed");
                ServerMessage::error()
            }
        }
    }

    /// Messages exchanged so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drop the transcript.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn service(&self) -> &AiService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::{ModelDescriptor, ModelRegistry};

    async fn session(initialize: &[&str]) -> ChatSession {
        let registry = ModelRegistry::default();
        let descriptors: Vec<_> = initialize.iter().map(|n| ModelDescriptor::new(*n)).collect();
        registry.initialize(&descriptors).await.unwrap();
        ChatSession::new(AiService::with_default_policy(Arc::new(registry)))
    }

    fn send(message: &str) -> ClientMessage {
        ClientMessage::SendMessage {
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_exchange_records_both_messages() {
        let mut session = session(&["gpt4"]).await;

        let reply = session.handle(send("hello")).await;
        assert_eq!(
            reply,
            ServerMessage::Response {
                message: "Response to: hello".to_string()
            }
        );

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "Response to: hello");
    }

    #[tokio::test]
    async fn test_failed_exchange_records_only_user_message() {
        // Active model "gpt4" never initialized
        let mut session = session(&["codellama"]).await;

        let reply = session.handle(send("hello")).await;
        assert!(reply.is_error());
        assert_eq!(reply, ServerMessage::error());
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_json() {
        let mut session = session(&["gpt4"]).await;

        let reply = session
            .handle_json(r#"{"type":"sendMessage","message":"<b>hi</b>"}"#)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();

        assert_eq!(value["type"], "response");
        assert_eq!(value["message"], "Response to: bhi/b");
    }

    #[tokio::test]
    async fn test_handle_json_rejects_malformed_request() {
        let mut session = session(&["gpt4"]).await;
        assert!(session.handle_json("not json").await.is_err());
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let mut session = session(&["gpt4"]).await;
        session.handle(send("one")).await;
        session.handle(send("two")).await;
        assert_eq!(session.messages().len(), 4);

        session.clear();
        assert!(session.messages().is_empty());
    }
}
