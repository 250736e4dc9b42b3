//! Conversation transcripts for the current visit.
//!
//! Transcripts are append-only and live in memory only: nothing is
//! written to disk, and state is discarded when the process (or the
//! hosting session) ends. The engine never touches transcript state;
//! appending turns is the caller's job.

use chrono::Local;
use serde::Serialize;
use std::collections::HashMap;

/// Who said a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a transcript.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

/// An append-only conversation transcript.
///
/// Turns are never edited, reordered, or deduplicated; ordering is the
/// display and causal order. No size cap is enforced here.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub key: String,
    turns: Vec<Turn>,
    pub created_at: String,
    pub updated_at: String,
}

impl Transcript {
    pub fn new(key: &str) -> Self {
        let now = Local::now().to_rfc3339();
        Self {
            key: key.to_string(),
            turns: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Append a turn. The original content is stored untouched; any
    /// normalization for matching happens inside the engine.
    pub fn push(&mut self, role: Role, content: &str) {
        self.turns.push(Turn {
            role,
            content: content.to_string(),
            timestamp: Local::now().to_rfc3339(),
        });
        self.updated_at = Local::now().to_rfc3339();
    }

    /// The turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop all turns (explicit reset).
    pub fn clear(&mut self) {
        self.turns.clear();
        self.updated_at = Local::now().to_rfc3339();
    }
}

/// In-memory store of transcripts, keyed by session key.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Transcript>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an existing transcript or create a fresh one.
    pub fn get_or_create(&mut self, key: &str) -> &mut Transcript {
        self.sessions
            .entry(key.to_string())
            .or_insert_with(|| Transcript::new(key))
    }

    /// Get an existing transcript without creating one.
    pub fn get(&self, key: &str) -> Option<&Transcript> {
        self.sessions.get(key)
    }

    /// Remove a transcript entirely. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.sessions.remove(key).is_some()
    }

    /// List `(key, updated_at)` pairs, most recently updated first.
    pub fn list(&self) -> Vec<(String, String)> {
        let mut sessions: Vec<(String, String)> = self
            .sessions
            .values()
            .map(|t| (t.key.clone(), t.updated_at.clone()))
            .collect();
        sessions.sort_by(|a, b| b.1.cmp(&a.1));
        sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
