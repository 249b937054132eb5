//! The match store: archetype reference data and per-user match
//! collections on disk.

use std::fs;

use tracing::{debug, info};

use super::{JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{seed_archetypes, Archetype, ArchetypeId, MatchId, MatchRecord, UserId};
use crate::stats::rankings::MatchDirectory;

/// Store for all persisted collections.
///
/// Reads are tolerant (missing files are empty collections); writes
/// create parent directories as needed. The archetype collection is
/// seeded and normalized on load.
pub struct MatchStore {
    config: StorageConfig,
}

impl MatchStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    // ── Archetypes ──────────────────────────────────────────────

    /// Load the archetype collection.
    ///
    /// On first run the default entries (including the reserved unknown
    /// archetype) are seeded and persisted. Every load applies the
    /// normalization pass; if normalization changed anything, or the
    /// reserved entry was missing, the repaired collection is written
    /// back so the rewrite happens once.
    pub fn load_archetypes(&self) -> Result<Vec<Archetype>, StorageError> {
        let reader = JsonlReader::<Archetype>::new(self.config.archetypes_path());
        let stored = reader.read_all()?;

        if stored.is_empty() {
            let seeded = seed_archetypes();
            let writer = JsonlWriter::<Archetype>::new(self.config.archetypes_path());
            writer.write_all(&seeded)?;
            info!("Seeded {} default archetypes", seeded.len());
            return Ok(seeded);
        }

        let mut normalized: Vec<Archetype> =
            stored.iter().cloned().map(Archetype::normalized).collect();
        let mut repaired = normalized != stored;

        if !normalized.iter().any(|a| a.is_unknown()) {
            normalized.insert(0, Archetype::unknown());
            repaired = true;
        }

        if repaired {
            let writer = JsonlWriter::<Archetype>::new(self.config.archetypes_path());
            writer.write_all(&normalized)?;
            info!("Normalized archetype collection on load");
        }

        Ok(normalized)
    }

    /// Add a new archetype.
    pub fn add_archetype(&self, archetype: Archetype) -> Result<(), StorageError> {
        let existing = self.load_archetypes()?;
        if existing.iter().any(|a| a.id == archetype.id) {
            return Err(StorageError::DuplicateArchetype(
                archetype.id.as_str().to_string(),
            ));
        }

        let writer = JsonlWriter::<Archetype>::new(self.config.archetypes_path());
        writer.append(&archetype)?;
        debug!("Added archetype {}", archetype.id);
        Ok(())
    }

    /// Delete an archetype. Default entries are refused.
    pub fn delete_archetype(&self, id: &ArchetypeId) -> Result<(), StorageError> {
        let existing = self.load_archetypes()?;
        let target = existing
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| StorageError::ArchetypeNotFound(id.as_str().to_string()))?;

        if target.is_default {
            return Err(StorageError::DefaultArchetype(id.as_str().to_string()));
        }

        let remaining: Vec<Archetype> =
            existing.into_iter().filter(|a| &a.id != id).collect();
        let writer = JsonlWriter::<Archetype>::new(self.config.archetypes_path());
        writer.write_all(&remaining)?;
        debug!("Deleted archetype {}", id);
        Ok(())
    }

    // ── Matches ─────────────────────────────────────────────────

    /// Load one user's match collection.
    pub fn load_matches(&self, user: &UserId) -> Result<Vec<MatchRecord>, StorageError> {
        let reader = JsonlReader::<MatchRecord>::new(self.config.matches_path(user));
        reader.read_all()
    }

    /// Append a match to its owner's collection.
    pub fn append_match(&self, record: &MatchRecord) -> Result<(), StorageError> {
        let writer = JsonlWriter::<MatchRecord>::new(self.config.matches_path(&record.user_id));
        writer.append(record)?;
        debug!("Recorded match {} for {}", record.id, record.user_id);
        Ok(())
    }

    /// Replace a match wholesale, matched by id within its owner's
    /// collection.
    pub fn replace_match(&self, record: &MatchRecord) -> Result<(), StorageError> {
        let mut matches = self.load_matches(&record.user_id)?;
        let slot = matches
            .iter_mut()
            .find(|m| m.id == record.id)
            .ok_or(StorageError::MatchNotFound(record.id))?;
        *slot = record.clone();

        let writer = JsonlWriter::<MatchRecord>::new(self.config.matches_path(&record.user_id));
        writer.write_all(&matches)?;
        debug!("Replaced match {} for {}", record.id, record.user_id);
        Ok(())
    }

    /// Delete a match from a user's collection.
    pub fn delete_match(&self, user: &UserId, id: MatchId) -> Result<(), StorageError> {
        let matches = self.load_matches(user)?;
        if !matches.iter().any(|m| m.id == id) {
            return Err(StorageError::MatchNotFound(id));
        }

        let remaining: Vec<MatchRecord> =
            matches.into_iter().filter(|m| m.id != id).collect();
        let writer = JsonlWriter::<MatchRecord>::new(self.config.matches_path(user));
        writer.write_all(&remaining)?;
        debug!("Deleted match {} for {}", id, user);
        Ok(())
    }

    /// Every user with a match collection directory.
    pub fn scan_users(&self) -> Result<Vec<UserId>, StorageError> {
        let dir = self.config.users_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut users = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    users.push(UserId::from(name));
                }
            }
        }

        users.sort();
        Ok(users)
    }
}

impl MatchDirectory for MatchStore {
    fn list_users(&self) -> anyhow::Result<Vec<UserId>> {
        Ok(self.scan_users()?)
    }

    fn load_matches(&self, user: &UserId) -> anyhow::Result<Vec<MatchRecord>> {
        Ok(MatchStore::load_matches(self, user)?)
    }
}
