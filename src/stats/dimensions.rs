//! Single-dimension partitions of a match collection.
//!
//! Each function partitions the input by one key (turn order, user
//! archetype, user class) and summarizes every partition. Inputs are
//! never mutated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Archetype, GameClass, MatchRecord, TurnOrder, UNKNOWN_ARCHETYPE_ID};
use crate::stats::{ArchetypeHeader, WinRateStats};

/// Win rates split by turn order. All three partitions are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnSplit {
    pub first: WinRateStats,
    pub second: WinRateStats,
    pub unknown: WinRateStats,
}

/// Partition matches into the three fixed turn values.
pub fn by_turn(matches: &[MatchRecord]) -> TurnSplit {
    let mut first: Vec<&MatchRecord> = Vec::new();
    let mut second: Vec<&MatchRecord> = Vec::new();
    let mut unknown: Vec<&MatchRecord> = Vec::new();

    for record in matches {
        match record.turn {
            TurnOrder::First => first.push(record),
            TurnOrder::Second => second.push(record),
            TurnOrder::Unknown => unknown.push(record),
        }
    }

    TurnSplit {
        first: WinRateStats::from_matches(first),
        second: WinRateStats::from_matches(second),
        unknown: WinRateStats::from_matches(unknown),
    }
}

/// Per-archetype stats entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeStats {
    pub archetype: ArchetypeHeader,
    pub stats: WinRateStats,
}

/// Partition matches by the user's archetype.
///
/// Output contains every archetype with at least one match, plus the
/// reserved unknown archetype regardless of its count. Matches whose
/// archetype reference resolves to no known archetype fall into the
/// unknown bucket. Sorted descending by match count; ties break on
/// archetype id ascending.
pub fn by_archetype(matches: &[MatchRecord], archetypes: &[Archetype]) -> Vec<ArchetypeStats> {
    let by_id: HashMap<&str, &Archetype> =
        archetypes.iter().map(|a| (a.id.as_str(), a)).collect();
    let unknown = by_id
        .get(UNKNOWN_ARCHETYPE_ID)
        .map(|a| (*a).clone())
        .unwrap_or_else(Archetype::unknown);

    let mut buckets: HashMap<&str, Vec<&MatchRecord>> = HashMap::new();
    for record in matches {
        let key = if by_id.contains_key(record.archetype_id.as_str()) {
            record.archetype_id.as_str()
        } else {
            UNKNOWN_ARCHETYPE_ID
        };
        buckets.entry(key).or_default().push(record);
    }
    // The reserved entry appears even with zero matches.
    buckets.entry(UNKNOWN_ARCHETYPE_ID).or_default();

    let mut entries: Vec<ArchetypeStats> = buckets
        .into_iter()
        .map(|(id, records)| {
            let archetype = if id == UNKNOWN_ARCHETYPE_ID {
                &unknown
            } else {
                by_id[id]
            };
            ArchetypeStats {
                archetype: ArchetypeHeader::from(archetype),
                stats: WinRateStats::from_matches(records),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.stats
            .count
            .cmp(&a.stats.count)
            .then_with(|| a.archetype.id.cmp(&b.archetype.id))
    });
    entries
}

/// Per-class stats entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub class: GameClass,
    pub class_name: String,
    pub icon: String,
    pub stats: WinRateStats,
}

/// Partition matches by the class of the user's resolved archetype.
///
/// Classes with zero matches are omitted entirely. Output follows
/// taxonomy order.
pub fn by_class(matches: &[MatchRecord], archetypes: &[Archetype]) -> Vec<ClassStats> {
    let class_of: HashMap<&str, GameClass> = archetypes
        .iter()
        .map(|a| (a.id.as_str(), a.class))
        .collect();

    let mut buckets: HashMap<GameClass, Vec<&MatchRecord>> = HashMap::new();
    for record in matches {
        let class = class_of
            .get(record.archetype_id.as_str())
            .copied()
            .unwrap_or(GameClass::Neutral);
        buckets.entry(class).or_default().push(record);
    }

    GameClass::ALL
        .iter()
        .filter_map(|class| {
            buckets.remove(class).map(|records| ClassStats {
                class: *class,
                class_name: class.display_name().to_string(),
                icon: class.icon().to_string(),
                stats: WinRateStats::from_matches(records),
            })
        })
        .collect()
}
