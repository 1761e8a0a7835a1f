use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
  Idle,
  AwaitingResponse,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
  #[error("prompt is empty")]
  EmptyPrompt,
  #[error("a request is already in flight")]
  RequestInFlight,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatEntry {
  pub prompt: String,
  pub response: String,
  pub model: Option<String>,
  pub thinking: bool,
  pub timestamp: DateTime<Utc>,
  pub pending: bool,
}

pub struct ChatSession {
  entries: Vec<ChatEntry>,
  state: SessionState,
  awaiting: Option<usize>,
}

impl ChatSession {
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
      state: SessionState::Idle,
      awaiting: None,
    }
  }

  pub fn state(&self) -> SessionState {
    self.state
  }

  pub fn entries(&self) -> &[ChatEntry] {
    &self.entries
  }

  pub fn pending_entry(&self) -> Option<&ChatEntry> {
    self.awaiting.and_then(|idx| self.entries.get(idx))
  }

  pub fn submit(
    &mut self,
    prompt: &str,
    model: Option<String>,
    thinking: bool,
  ) -> Result<usize, SubmitError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
      return Err(SubmitError::EmptyPrompt);
    }
    if self.state == SessionState::AwaitingResponse {
      return Err(SubmitError::RequestInFlight);
    }

    self.entries.push(ChatEntry {
      prompt: prompt.to_string(),
      response: String::new(),
      model,
      thinking,
      timestamp: Utc::now(),
      pending: true,
    });
    let idx = self.entries.len() - 1;
    self.awaiting = Some(idx);
    self.state = SessionState::AwaitingResponse;
    Ok(idx)
  }

  pub fn resolve(&mut self, response: String) {
    self.complete(response);
  }

  pub fn fail(&mut self, message: &str) {
    self.complete(format!("Error: {message}"));
  }

  fn complete(&mut self, response: String) {
    if let Some(idx) = self.awaiting.take() {
      if let Some(entry) = self.entries.get_mut(idx) {
        entry.response = response;
        entry.pending = false;
      }
    }
    self.state = SessionState::Idle;
  }

  pub fn clear(&mut self) {
    self.entries.clear();
    self.awaiting = None;
    self.state = SessionState::Idle;
  }
}

impl Default for ChatSession {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn submit_marks_entry_pending_and_awaits() {
    let mut session = ChatSession::new();
    let idx = session
      .submit("Hello", Some("llama3.2:3b".to_string()), false)
      .unwrap();

    assert_eq!(session.state(), SessionState::AwaitingResponse);
    let entry = &session.entries()[idx];
    assert_eq!(entry.prompt, "Hello");
    assert!(entry.pending);
    assert!(entry.response.is_empty());
  }

  #[test]
  fn resolve_fills_entry_and_returns_to_idle() {
    let mut session = ChatSession::new();
    let idx = session.submit("Hello", None, false).unwrap();
    session.resolve("Hi there".to_string());

    assert_eq!(session.state(), SessionState::Idle);
    let entry = &session.entries()[idx];
    assert_eq!(entry.response, "Hi there");
    assert!(!entry.pending);
  }

  #[test]
  fn fail_marks_entry_with_error_prefix() {
    let mut session = ChatSession::new();
    let idx = session.submit("Hello", None, false).unwrap();
    session.fail("daemon unreachable");

    assert_eq!(session.state(), SessionState::Idle);
    let entry = &session.entries()[idx];
    assert!(entry.response.starts_with("Error: "));
    assert!(!entry.pending);
  }

  #[test]
  fn empty_prompt_is_rejected_locally() {
    let mut session = ChatSession::new();
    assert_eq!(session.submit("   ", None, false), Err(SubmitError::EmptyPrompt));
    assert!(session.entries().is_empty());
    assert_eq!(session.state(), SessionState::Idle);
  }

  #[test]
  fn second_submission_is_rejected_while_pending() {
    let mut session = ChatSession::new();
    session.submit("First", None, false).unwrap();
    assert_eq!(
      session.submit("Second", None, false),
      Err(SubmitError::RequestInFlight)
    );
    assert_eq!(session.entries().len(), 1);
  }

  #[test]
  fn at_most_one_entry_is_pending() {
    let mut session = ChatSession::new();
    session.submit("First", None, false).unwrap();
    session.resolve("ok".to_string());
    session.submit("Second", None, true).unwrap();

    let pending = session.entries().iter().filter(|e| e.pending).count();
    assert_eq!(pending, 1);
  }

  #[test]
  fn clear_resets_unconditionally() {
    let mut session = ChatSession::new();
    session.submit("Hello", None, false).unwrap();
    session.clear();

    assert!(session.entries().is_empty());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.pending_entry().is_none());

    // clearing an idle session is a no-op
    session.clear();
    assert_eq!(session.state(), SessionState::Idle);
  }
}
