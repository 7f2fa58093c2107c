//! Chat slice: the assistant transcript and onboarding flag

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ChatMessage, Sender};
use crate::schema::{SCHEMA_VERSION, validate_chat_state};
use crate::storage::{Storage, keys};

/// Persisted chat slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatState {
    pub version: String,

    /// Transcript in conversation order
    pub messages: Vec<ChatMessage>,

    /// Whether the guided onboarding conversation has finished
    #[serde(default)]
    pub onboarding_completed: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            messages: Vec::new(),
            onboarding_completed: false,
        }
    }
}

/// Write-through container for the chat slice
///
/// A fresh transcript opens with the configured greeting as the assistant's
/// first turn. Message ids are unique within the transcript and assigned
/// past the current maximum, so a replaced transcript's ids are respected.
#[derive(Debug)]
pub struct ChatStore {
    storage: Storage,
    greeting: String,
    state: ChatState,
}

impl ChatStore {
    /// Load the stored transcript, or open a greeted one
    pub fn load(storage: &Storage, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let state = storage.load(keys::CHAT_STATE, seeded(&greeting), validate_chat_state);
        Self {
            storage: storage.clone(),
            greeting,
            state,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.state.messages
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(keys::CHAT_STATE, &self.state)
    }

    fn next_message_id(&self) -> u32 {
        self.state
            .messages
            .iter()
            .map(|m| m.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Append one turn, returning the id it was given
    pub fn push_message(&mut self, text: impl Into<String>, sender: Sender) -> Result<u32> {
        let message = ChatMessage::new(text, sender, self.next_message_id())?;
        let id = message.id;
        debug!(%sender, id, "ChatStore::push_message: appending turn");
        self.state.messages.push(message);
        self.persist()?;
        Ok(id)
    }

    /// Append several already-composed turns in one persisted write
    pub fn push_messages(&mut self, messages: Vec<ChatMessage>) -> Result<()> {
        debug!(count = messages.len(), "ChatStore::push_messages: called");
        self.state.messages.extend(messages);
        self.persist()
    }

    /// Replace the whole transcript with a canonical list
    pub fn replace_transcript(&mut self, messages: Vec<ChatMessage>) -> Result<()> {
        debug!(
            count = messages.len(),
            "ChatStore::replace_transcript: called"
        );
        self.state.messages = messages;
        self.persist()
    }

    /// Mark the guided onboarding conversation finished
    pub fn complete_onboarding(&mut self) -> Result<()> {
        self.state.onboarding_completed = true;
        self.persist()
    }

    /// Drop the transcript back to the greeting
    ///
    /// Onboarding completion is a separate fact and survives a clear.
    pub fn clear(&mut self) -> Result<()> {
        debug!("ChatStore::clear: resetting transcript");
        let onboarding_completed = self.state.onboarding_completed;
        self.state = seeded(&self.greeting);
        self.state.onboarding_completed = onboarding_completed;
        self.persist()
    }
}

/// A fresh transcript opened with the greeting as message 1
///
/// An empty configured greeting just leaves the transcript empty.
fn seeded(greeting: &str) -> ChatState {
    let mut state = ChatState::default();
    if let Ok(message) = ChatMessage::new(greeting, Sender::Ai, 1) {
        state.messages.push(message);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GREETING: &str = "Hi! I'm here to help you plan your week.";

    fn store() -> (TempDir, ChatStore) {
        let dir = TempDir::new().expect("temp dir");
        let storage = Storage::open(dir.path()).unwrap();
        let store = ChatStore::load(&storage, GREETING);
        (dir, store)
    }

    #[test]
    fn test_fresh_transcript_opens_with_greeting() {
        let (_dir, store) = store();
        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.messages()[0].id, 1);
        assert_eq!(store.messages()[0].sender, Sender::Ai);
        assert_eq!(store.messages()[0].text, GREETING);
    }

    #[test]
    fn test_empty_greeting_opens_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let store = ChatStore::load(&storage, "");
        assert!(store.messages().is_empty());
    }

    #[test]
    fn test_push_message_assigns_increasing_ids() {
        let (_dir, mut store) = store();
        let a = store.push_message("When should I study?", Sender::User).unwrap();
        let b = store.push_message("Evenings look open.", Sender::Ai).unwrap();
        assert_eq!((a, b), (2, 3));
    }

    #[test]
    fn test_push_message_rejects_blank_text() {
        let (_dir, mut store) = store();
        assert!(store.push_message("   ", Sender::User).is_err());
        assert_eq!(store.messages().len(), 1);
    }

    #[test]
    fn test_push_messages_appends_batch() {
        let (_dir, mut store) = store();
        let batch = vec![
            ChatMessage::new("first", Sender::User, 2).unwrap(),
            ChatMessage::new("second", Sender::Ai, 3).unwrap(),
        ];
        store.push_messages(batch).unwrap();
        assert_eq!(store.messages().len(), 3);
        assert_eq!(store.messages()[2].text, "second");
    }

    #[test]
    fn test_ids_continue_past_replaced_transcript() {
        let (_dir, mut store) = store();
        let replacement = vec![
            ChatMessage::new("a", Sender::User, 4).unwrap(),
            ChatMessage::new("b", Sender::Ai, 9).unwrap(),
        ];
        store.replace_transcript(replacement).unwrap();

        let id = store.push_message("next", Sender::User).unwrap();
        assert_eq!(id, 10);
    }

    #[test]
    fn test_clear_keeps_onboarding_flag() {
        let (_dir, mut store) = store();
        store.push_message("hello", Sender::User).unwrap();
        store.complete_onboarding().unwrap();
        store.clear().unwrap();

        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.messages()[0].text, GREETING);
        assert!(store.state().onboarding_completed);
    }

    #[test]
    fn test_transcript_survives_reload() {
        let (dir, mut store) = store();
        store.push_message("remember me", Sender::User).unwrap();

        let storage = Storage::open(dir.path()).unwrap();
        let reloaded = ChatStore::load(&storage, GREETING);
        assert_eq!(reloaded.state(), store.state());
    }
}
