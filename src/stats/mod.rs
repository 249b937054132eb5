//! Match statistics engine.
//!
//! Pure, synchronous aggregation over match collections:
//! - Overall and per-partition win rates ([`WinRateStats`], [`dimensions`])
//! - Matchup matrix keyed by (user archetype, opponent archetype) ([`matchup`])
//! - Cross-user win-count rankings ([`rankings`])
//!
//! No function here mutates its inputs or touches storage; callers hand in
//! already-loaded collections and recompute from scratch on every change.

pub mod dimensions;
pub mod matchup;
pub mod rankings;

use serde::{Deserialize, Serialize};

use crate::models::{Archetype, ArchetypeId, GameClass, MatchRecord, MatchResult};

/// Win/loss/draw counts and win rate for a set of matches.
///
/// The win rate is a percentage with one decimal place; draws are excluded
/// from the denominator. An empty denominator yields 0, never NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WinRateStats {
    pub count: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f64,
}

impl WinRateStats {
    /// Summarize a set of matches.
    pub fn from_matches<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let mut wins = 0u32;
        let mut losses = 0u32;
        let mut draws = 0u32;

        for record in matches {
            match record.result {
                MatchResult::Win => wins += 1,
                MatchResult::Loss => losses += 1,
                MatchResult::Draw => draws += 1,
            }
        }

        Self::from_counts(wins, losses, draws)
    }

    /// Build stats from raw counts.
    pub fn from_counts(wins: u32, losses: u32, draws: u32) -> Self {
        let decided = wins + losses;
        let win_rate = if decided > 0 {
            round1(wins as f64 / decided as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            count: wins + losses + draws,
            wins,
            losses,
            draws,
            win_rate,
        }
    }

    /// Games with a decided outcome (draws excluded).
    pub fn decided(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Round to one decimal place, half-up.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Render-ready archetype reference used throughout aggregate outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeHeader {
    pub id: ArchetypeId,
    pub name: String,
    pub abbreviation: String,
    pub class: GameClass,
    pub class_name: String,
    pub icon: String,
}

impl From<&Archetype> for ArchetypeHeader {
    fn from(archetype: &Archetype) -> Self {
        Self {
            id: archetype.id.clone(),
            name: archetype.name.clone(),
            abbreviation: archetype.abbreviation.clone(),
            class: archetype.class,
            class_name: archetype.class.display_name().to_string(),
            icon: archetype.class.icon().to_string(),
        }
    }
}
