//! Session-scoped analysis chat.
//!
//! The message log is an explicit, append-only list owned by the session
//! (no process-wide state). Each user turn appends the user message and
//! then exactly one assistant message: the model's reply, a visible error
//! line when the call fails, or a configuration warning when no model is
//! injected. Model failures never escape the session.

use ohlc_feed::models::bar::Bar;
use tracing::warn;

use crate::{analysis::AnalysisModel, context::DataContext};

/// Shown when no model capability is configured.
pub const CONFIG_WARNING: &str =
    "Please set your GOOGLE_API_KEY to enable AI analysis.";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The person asking questions.
    User,
    /// The analysis model (or the session, for error/config notices).
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Message author.
    pub role: Role,
    /// Message body.
    pub content: String,
}

/// One user's conversation for the current session.
///
/// The model is an injected capability: `None` means the feature is
/// disabled by configuration, which is a state, not an error.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    model: Option<Box<dyn AnalysisModel + Send + Sync>>,
}

impl ChatSession {
    /// Creates a session, with or without an analysis model.
    pub fn new(model: Option<Box<dyn AnalysisModel + Send + Sync>>) -> Self {
        Self {
            messages: Vec::new(),
            model,
        }
    }

    /// The ordered message log.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True when an analysis model is configured.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Runs one user turn against the loaded dataset.
    ///
    /// Builds the statistical context prompt, invokes the model once, and
    /// returns the appended assistant message.
    pub async fn ask(&mut self, symbol: &str, bars: &[Bar], question: &str) -> &ChatMessage {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: question.to_string(),
        });

        let content = match &self.model {
            None => {
                warn!("analysis model not configured");
                CONFIG_WARNING.to_string()
            }
            Some(model) => {
                let prompt = DataContext::from_bars(symbol, bars).prompt(question);
                match model.generate(&prompt).await {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(error = %err, "model call failed");
                        format!("Error generating response: {err}")
                    }
                }
            }
        };

        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content,
        });
        self.messages.last().expect("just pushed")
    }
}
