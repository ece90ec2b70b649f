// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Chat relay client and in-memory transcript.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

const NO_REPLY_TEXT: &str = "No reply";
const UNREACHABLE_TEXT: &str = "Error: Could not reach server";

/// Chat backend client.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Relay one user message and return the assistant reply.
    pub async fn send(&self, message: &str) -> Result<ChatReply> {
        let url = format!("{}/chat", self.base_url);
        let body = serde_json::json!({ "message": message });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Chat(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Chat(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Chat(format!("Invalid reply: {}", e)))
    }
}

/// Reply body from the chat backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Monotonic per-thread id, usable as a stable list key
    pub id: u64,
    pub from: Sender,
    pub text: String,
}

/// In-memory conversation transcript.
#[derive(Debug, Clone, Default)]
pub struct ChatThread {
    next_id: u64,
    messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append the user's outgoing message.
    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(Sender::User, text.into())
    }

    /// Append the backend's reply; an empty reply renders as a placeholder.
    pub fn push_reply(&mut self, reply: ChatReply) -> &ChatMessage {
        let text = reply.reply.unwrap_or_else(|| NO_REPLY_TEXT.to_string());
        self.push(Sender::Bot, text)
    }

    /// Append the fixed unreachable-backend entry shown when a send fails.
    pub fn push_error(&mut self) -> &ChatMessage {
        self.push(Sender::Bot, UNREACHABLE_TEXT.to_string())
    }

    fn push(&mut self, from: Sender, text: String) -> &ChatMessage {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            from,
            text,
        });
        &self.messages[self.messages.len() - 1]
    }
}
