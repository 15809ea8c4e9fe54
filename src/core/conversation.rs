use std::collections::VecDeque;

use crate::core::message::Message;

/// Fixed reply shown when the chat endpoint is unreachable or its response
/// cannot be decoded. Every failure mode collapses into this one bubble.
pub const FALLBACK_REPLY: &str = "Server not reachable 😕";

/// Owns the transcript, the draft input, and the submit protocol.
///
/// At most one submission is outstanding at a time: `busy` is set by
/// [`begin_submission`](Self::begin_submission) and cleared by
/// [`complete_submission`](Self::complete_submission). The draft is cleared
/// when a submission begins, never when it completes, so the user can start
/// typing the next message while a reply is pending.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: VecDeque<Message>,
    draft: String,
    busy: bool,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &VecDeque<Message> {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn insert_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn insert_newline(&mut self) {
        self.draft.push('\n');
    }

    pub fn delete_char(&mut self) {
        self.draft.pop();
    }

    /// Append a client-side notice bubble. Notices bypass the submit
    /// protocol entirely.
    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.messages.push_back(Message::app(text));
    }

    /// Start a submission from the current draft.
    ///
    /// A whitespace-only draft or an in-flight submission makes this a no-op
    /// returning `None`; nothing changes, including the draft. Otherwise the
    /// trimmed draft is appended as a user message, the draft is cleared,
    /// `busy` is set, and the submitted text is returned for the network
    /// step. The user bubble is visible before any network activity happens.
    pub fn begin_submission(&mut self) -> Option<String> {
        if self.busy {
            return None;
        }
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.messages.push_back(Message::user(text.clone()));
        self.draft.clear();
        self.busy = true;
        Some(text)
    }

    /// Settle the in-flight submission.
    ///
    /// `Some(reply)` appends the reply as a bot message; `None` appends
    /// [`FALLBACK_REPLY`]. Either way exactly one bot bubble lands per begun
    /// submission and `busy` clears, re-enabling submits.
    pub fn complete_submission(&mut self, reply: Option<String>) {
        let content = reply.unwrap_or_else(|| FALLBACK_REPLY.to_string());
        self.messages.push_back(Message::bot(content));
        self.busy = false;
    }

    #[cfg(test)]
    fn roles(&self) -> Vec<crate::core::message::Role> {
        self.messages.iter().map(|m| m.role).collect()
    }
}
