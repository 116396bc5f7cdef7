use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use cappy_context::ContextPipeline;
use cappy_llm::{ChatClient, GenerateOptions, GenerateRequest};

use crate::error::{ChatError, Result};
use crate::messages::{FALLBACK_EMPTY_RESPONSE, FALLBACK_UNAVAILABLE, FALLBACK_UNEXPECTED_ERROR};
use crate::models::{ChatMessage, Session};

/// How the assistant's reply came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Model text
    Answer,
    /// Model returned nothing usable
    EmptyResponse,
    /// Model call failed
    Failed,
    /// No model client configured
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub message: ChatMessage,
    pub kind: ReplyKind,
    pub duration_ms: u64,
}

/// Answers user turns with corpus-augmented prompts.
///
/// Holds only shared read-only state; the conversation lives in the
/// [`Session`] passed to [`Assistant::respond`].
#[derive(Clone)]
pub struct Assistant {
    corpus: Arc<str>,
    pipeline: ContextPipeline,
    client: Option<Arc<dyn ChatClient>>,
    model: String,
    options: GenerateOptions,
}

impl Assistant {
    pub fn new(
        corpus: Arc<str>,
        pipeline: ContextPipeline,
        client: Option<Arc<dyn ChatClient>>,
        model: impl Into<String>,
        options: GenerateOptions,
    ) -> Self {
        Self {
            corpus,
            pipeline,
            client,
            model: model.into(),
            options,
        }
    }

    pub fn corpus(&self) -> &str {
        &self.corpus
    }

    pub fn pipeline(&self) -> &ContextPipeline {
        &self.pipeline
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Prompt that would be sent for `input`
    pub fn prompt_for(&self, input: &str) -> String {
        self.pipeline.build_prompt(input, &self.corpus)
    }

    /// Handle one user turn.
    ///
    /// Appends the user message and exactly one assistant message to the
    /// session. Model failures never surface as errors: they become one of
    /// the fixed fallback texts. Blank input is rejected and leaves the
    /// transcript untouched.
    pub async fn respond(&self, session: &mut Session, input: &str) -> Result<Reply> {
        if input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let started = Instant::now();
        session.push(ChatMessage::user(input));

        let (content, kind) = match &self.client {
            None => {
                tracing::warn!(session_id = %session.id, "No language model configured");
                (FALLBACK_UNAVAILABLE.to_string(), ReplyKind::Unavailable)
            }
            Some(client) => self.generate(client.as_ref(), session, input).await,
        };

        let message = ChatMessage::assistant(content);
        session.push(message.clone());

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            session_id = %session.id,
            kind = ?kind,
            duration_ms,
            "Reply added to transcript"
        );

        Ok(Reply {
            message,
            kind,
            duration_ms,
        })
    }

    async fn generate(
        &self,
        client: &dyn ChatClient,
        session: &Session,
        input: &str,
    ) -> (String, ReplyKind) {
        let prompt = self.prompt_for(input);
        let request = GenerateRequest::new(&self.model, prompt).with_options(self.options.clone());

        match client.generate(request).await {
            Ok(response) => match response.non_empty_text() {
                Some(text) => (text.to_string(), ReplyKind::Answer),
                None => {
                    tracing::warn!(
                        session_id = %session.id,
                        finish_reason = ?response.finish_reason,
                        "Model returned an empty response"
                    );
                    (FALLBACK_EMPTY_RESPONSE.to_string(), ReplyKind::EmptyResponse)
                }
            },
            Err(e) => {
                tracing::error!(
                    session_id = %session.id,
                    provider = client.provider(),
                    error = %e,
                    "Model call failed"
                );
                (FALLBACK_UNEXPECTED_ERROR.to_string(), ReplyKind::Failed)
            }
        }
    }
}
