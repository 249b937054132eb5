//! Cross-user win-count rankings.
//!
//! Rankings aggregate over every user's match collection. The engine does
//! not know how users are discovered or stored; it depends on the
//! [`MatchDirectory`] seam, implemented by the storage layer.

use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::{Archetype, GameClass, MatchRecord, MatchResult, UserId, UNKNOWN_ARCHETYPE_ID};
use crate::stats::ArchetypeHeader;

/// Source of all users' match collections.
pub trait MatchDirectory {
    /// Every user with a recorded match collection.
    fn list_users(&self) -> Result<Vec<UserId>>;

    /// The match collection of one user.
    fn load_matches(&self, user: &UserId) -> Result<Vec<MatchRecord>>;
}

/// Win-count entry for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRanking {
    pub archetype: ArchetypeHeader,
    pub wins: u32,
}

/// Win-count entry for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRanking {
    pub class: GameClass,
    pub class_name: String,
    pub icon: String,
    pub wins: u32,
}

/// Win-count rankings across all users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    pub archetypes: Vec<ArchetypeRanking>,
    pub classes: Vec<ClassRanking>,
}

/// Count wins across every user, grouped by archetype and by class.
///
/// Entries with zero wins are excluded. Ordering is descending by win
/// count; ties break on class display name, then archetype name.
pub fn build_rankings(directory: &dyn MatchDirectory, archetypes: &[Archetype]) -> Result<Rankings> {
    let by_id: HashMap<&str, &Archetype> =
        archetypes.iter().map(|a| (a.id.as_str(), a)).collect();
    let unknown = by_id
        .get(UNKNOWN_ARCHETYPE_ID)
        .map(|a| (*a).clone())
        .unwrap_or_else(Archetype::unknown);

    let mut archetype_wins: HashMap<String, u32> = HashMap::new();
    let mut class_wins: HashMap<GameClass, u32> = HashMap::new();

    for user in directory.list_users()? {
        for record in directory.load_matches(&user)? {
            if record.result != MatchResult::Win {
                continue;
            }
            let resolved = by_id
                .get(record.archetype_id.as_str())
                .copied()
                .unwrap_or(&unknown);
            *archetype_wins
                .entry(resolved.id.as_str().to_string())
                .or_default() += 1;
            *class_wins.entry(resolved.class).or_default() += 1;
        }
    }

    let header_for = |id: &str| -> ArchetypeHeader {
        if id == UNKNOWN_ARCHETYPE_ID {
            ArchetypeHeader::from(&unknown)
        } else {
            ArchetypeHeader::from(by_id[id])
        }
    };

    let mut archetype_rankings: Vec<ArchetypeRanking> = archetype_wins
        .into_iter()
        .filter(|&(_, wins)| wins > 0)
        .map(|(id, wins)| ArchetypeRanking {
            archetype: header_for(&id),
            wins,
        })
        .collect();
    archetype_rankings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| a.archetype.class_name.cmp(&b.archetype.class_name))
            .then_with(|| a.archetype.name.cmp(&b.archetype.name))
    });

    let mut class_rankings: Vec<ClassRanking> = class_wins
        .into_iter()
        .filter(|&(_, wins)| wins > 0)
        .map(|(class, wins)| ClassRanking {
            class,
            class_name: class.display_name().to_string(),
            icon: class.icon().to_string(),
            wins,
        })
        .collect();
    class_rankings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| a.class_name.cmp(&b.class_name))
    });

    Ok(Rankings {
        archetypes: archetype_rankings,
        classes: class_rankings,
    })
}
