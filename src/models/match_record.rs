//! Match records: individual game results against an opponent archetype.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{ArchetypeId, UserId};

/// Type alias for match record IDs.
pub type MatchId = Uuid;

/// Whether the recording user went first, second, or didn't note it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    First,
    Second,
    Unknown,
}

impl TurnOrder {
    /// All turn values in display order.
    pub const ALL: [TurnOrder; 3] = [TurnOrder::First, TurnOrder::Second, TurnOrder::Unknown];

    pub fn label(&self) -> &'static str {
        match self {
            TurnOrder::First => "Went first",
            TurnOrder::Second => "Went second",
            TurnOrder::Unknown => "Unrecorded",
        }
    }
}

impl FromStr for TurnOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "1" => Ok(TurnOrder::First),
            "second" | "2" => Ok(TurnOrder::Second),
            "unknown" => Ok(TurnOrder::Unknown),
            other => Err(format!("unknown turn order: {}", other)),
        }
    }
}

/// Outcome of a match from the recording user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl FromStr for MatchResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" | "w" => Ok(MatchResult::Win),
            "loss" | "l" => Ok(MatchResult::Loss),
            "draw" | "d" => Ok(MatchResult::Draw),
            other => Err(format!("unknown result: {}", other)),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Win => write!(f, "win"),
            MatchResult::Loss => write!(f, "loss"),
            MatchResult::Draw => write!(f, "draw"),
        }
    }
}

/// A single recorded match.
///
/// Owned by the recording user. Immutable once created except for full
/// replacement (edit) or deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier
    pub id: MatchId,

    /// When this record was created
    pub created_at: DateTime<Utc>,

    /// User who recorded the match
    pub user_id: UserId,

    /// The user's own archetype
    pub archetype_id: ArchetypeId,

    /// The opponent's archetype
    pub opponent_archetype_id: ArchetypeId,

    /// Turn order
    pub turn: TurnOrder,

    /// Outcome
    pub result: MatchResult,

    /// Optional free-text note
    pub note: Option<String>,
}

impl MatchRecord {
    /// Create a new MatchRecord with a fresh ID.
    pub fn new(
        user_id: UserId,
        archetype_id: ArchetypeId,
        opponent_archetype_id: ArchetypeId,
        turn: TurnOrder,
        result: MatchResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            user_id,
            archetype_id,
            opponent_archetype_id,
            turn,
            result,
            note: None,
        }
    }

    /// Builder method to attach a note.
    pub fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }
}
