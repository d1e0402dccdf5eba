//! Memo prompt collaborator
//!
//! The widget asks a [`MemoPrompt`] for free text when a history row is
//! annotated. Browsers answer with `window.prompt`, the CLI passes the text
//! from its arguments, and tests script the answers.

use std::collections::VecDeque;

/// Source of memo text
pub trait MemoPrompt {
    /// Asks for text; `None` means the prompt was cancelled
    fn ask(&mut self, message: &str) -> Option<String>;
}

impl<F> MemoPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn ask(&mut self, message: &str) -> Option<String> {
        self(message)
    }
}

/// Prompt that replays queued answers and records the messages it was shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    /// Creates a prompt with no queued answers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a typed answer
    #[must_use]
    pub fn answer(mut self, text: impl Into<String>) -> Self {
        self.answers.push_back(Some(text.into()));
        self
    }

    /// Queues a cancelled prompt
    #[must_use]
    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Queues a typed answer on an existing prompt
    pub fn push_answer(&mut self, text: impl Into<String>) {
        self.answers.push_back(Some(text.into()));
    }

    /// Messages shown so far
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl MemoPrompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        self.asked.push(message.to_string());
        // An exhausted script behaves like a cancelled prompt
        self.answers.pop_front().flatten()
    }
}
