//! In-memory `TextGenerator` for tests. Replies are keyed by a marker that
//! must appear in the prompt, so callers can script per-category behaviour.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{GenerationError, TextGenerator};

enum Reply {
    Text { text: String, delay: Duration },
    Fail(String),
}

#[derive(Default)]
pub struct StubGenerator {
    replies: Vec<(String, Reply)>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies with `text` to any prompt containing `marker`.
    pub fn reply(self, marker: &str, text: &str) -> Self {
        self.reply_after(marker, text, Duration::ZERO)
    }

    /// Like `reply`, but waits `delay` before answering.
    pub fn reply_after(mut self, marker: &str, text: &str, delay: Duration) -> Self {
        self.replies.push((
            marker.to_string(),
            Reply::Text {
                text: text.to_string(),
                delay,
            },
        ));
        self
    }

    /// Fails with `message` for any prompt containing `marker`.
    pub fn fail(mut self, marker: &str, message: &str) -> Self {
        self.replies
            .push((marker.to_string(), Reply::Fail(message.to_string())));
        self
    }

    /// Every `(system_role, prompt)` pair received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, system_role: &str, prompt: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_role.to_string(), prompt.to_string()));

        let reply = self
            .replies
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Text { text, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(text.clone())
            }
            Some(Reply::Fail(message)) => Err(GenerationError::new(message.clone())),
            None => Err(GenerationError::new(format!("no stub reply for prompt: {prompt}"))),
        }
    }
}
