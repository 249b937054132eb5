//! Archetype reference data.
//!
//! Archetypes classify decks within a class. They are immutable reference
//! data looked up by identifier; entries flagged as defaults are seeded on
//! first load and never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ArchetypeId, EntityId, GameClass};

/// Reserved identifier for the unidentified-opponent archetype.
pub const UNKNOWN_ARCHETYPE_ID: &str = "unknown";

/// A named deck-type classification within one game class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Unique identifier (derived from name + class)
    pub id: ArchetypeId,

    /// Display name
    pub name: String,

    /// Short form used in dense tables
    pub abbreviation: String,

    /// Owning game class
    pub class: GameClass,

    /// Seeded entry that must never be deleted
    #[serde(default)]
    pub is_default: bool,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Archetype {
    /// Create a new Archetype with auto-generated ID.
    pub fn new(name: String, abbreviation: String, class: GameClass) -> Self {
        let id = EntityId::generate(&[&name, class.key()]);

        Self {
            id,
            name,
            abbreviation,
            class,
            is_default: false,
            created_at: Utc::now(),
        }
    }

    /// The reserved archetype representing an unidentified opponent deck.
    pub fn unknown() -> Self {
        Self {
            id: EntityId::from(UNKNOWN_ARCHETYPE_ID),
            name: "Unknown".to_string(),
            abbreviation: "?".to_string(),
            class: GameClass::Neutral,
            is_default: true,
            created_at: Utc::now(),
        }
    }

    /// Whether this is the reserved unknown archetype.
    pub fn is_unknown(&self) -> bool {
        self.id.as_str() == UNKNOWN_ARCHETYPE_ID
    }

    /// Builder method to mark this archetype as a seeded default.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Normalize a stored archetype to the current taxonomy.
    ///
    /// Idempotent; applied to every archetype when the collection is
    /// loaded from storage, before any aggregation. The reserved unknown
    /// entry is re-synchronized to its canonical class and flags in case
    /// the taxonomy changed underneath stored data.
    pub fn normalized(mut self) -> Self {
        if self.is_unknown() {
            self.class = GameClass::Neutral;
            self.is_default = true;
        }
        self
    }
}

/// The archetype entries seeded on first load.
pub fn seed_archetypes() -> Vec<Archetype> {
    vec![Archetype::unknown()]
}
