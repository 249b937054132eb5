//! Local data directory operations.
//!
//! All collections live as JSONL files under one data directory:
//! - `archetypes.jsonl`: the shared archetype reference data
//! - `users/<user_id>/matches.jsonl`: one match collection per user

mod jsonl;
mod store;

pub use jsonl::{JsonlReader, JsonlWriter};
pub use store::MatchStore;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::{MatchId, UserId};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Archetype not found: {0}")]
    ArchetypeNotFound(String),

    #[error("Archetype already exists: {0}")]
    DuplicateArchetype(String),

    #[error("Default archetype cannot be deleted: {0}")]
    DefaultArchetype(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn archetypes_path(&self) -> PathBuf {
        self.data_dir.join("archetypes.jsonl")
    }

    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join("users")
    }

    pub fn matches_path(&self, user: &UserId) -> PathBuf {
        self.users_dir().join(user.as_str()).join("matches.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
