//! Pairwise matchup matrix.
//!
//! Win rates keyed by (user archetype, opponent archetype). A pair with no
//! recorded matches has no cell at all, distinct from a present cell
//! whose win rate computed to 0%.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{Archetype, ArchetypeId, MatchRecord, MatchResult, UNKNOWN_ARCHETYPE_ID};
use crate::stats::{ArchetypeHeader, WinRateStats};

/// Optional single-selection restriction applied before building.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupFilter {
    pub user_archetype: Option<ArchetypeId>,
    pub opponent_archetype: Option<ArchetypeId>,
}

/// Display banding for a matchup cell. Informational threshold only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupBand {
    Favorable,
    Neutral,
    Unfavorable,
    StronglyUnfavorable,
}

impl MatchupBand {
    /// Band a computed win rate: > 55% favorable, < 45% (and > 0%)
    /// unfavorable, exactly 0% with at least one decided game strongly
    /// unfavorable, anything else neutral.
    pub fn from_stats(stats: &WinRateStats) -> Self {
        if stats.decided() > 0 && stats.win_rate == 0.0 {
            MatchupBand::StronglyUnfavorable
        } else if stats.win_rate > 55.0 {
            MatchupBand::Favorable
        } else if stats.win_rate > 0.0 && stats.win_rate < 45.0 {
            MatchupBand::Unfavorable
        } else {
            MatchupBand::Neutral
        }
    }
}

/// A populated matrix cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupCell {
    pub stats: WinRateStats,
    pub band: MatchupBand,
}

/// The full matchup matrix, pre-sorted for rendering.
///
/// `cells[r][c]` holds the stats for `rows[r]` against `columns[c]`, or
/// `None` when that pair has no recorded matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupMatrix {
    pub rows: Vec<ArchetypeHeader>,
    pub columns: Vec<ArchetypeHeader>,
    pub cells: Vec<Vec<Option<MatchupCell>>>,
}

impl MatchupMatrix {
    /// Look up the cell for a (user, opponent) archetype pair.
    pub fn cell(&self, user: &ArchetypeId, opponent: &ArchetypeId) -> Option<&MatchupCell> {
        let row = self.rows.iter().position(|h| &h.id == user)?;
        let col = self.columns.iter().position(|h| &h.id == opponent)?;
        self.cells[row][col].as_ref()
    }
}

/// Axis ordering: the reserved unknown archetype pins first, then class
/// display name, then archetype name.
fn axis_order(a: &ArchetypeHeader, b: &ArchetypeHeader) -> Ordering {
    let a_unknown = a.id.as_str() == UNKNOWN_ARCHETYPE_ID;
    let b_unknown = b.id.as_str() == UNKNOWN_ARCHETYPE_ID;
    b_unknown
        .cmp(&a_unknown)
        .then_with(|| a.class_name.cmp(&b.class_name))
        .then_with(|| a.name.cmp(&b.name))
}

/// Build the matchup matrix for a match collection.
///
/// Matches referencing archetypes absent from `archetypes` are attributed
/// to the reserved unknown archetype on the affected axis. The filter is
/// applied to resolved archetype ids before grouping.
pub fn build_matrix(
    matches: &[MatchRecord],
    archetypes: &[Archetype],
    filter: &MatchupFilter,
) -> MatchupMatrix {
    let by_id: HashMap<&str, &Archetype> =
        archetypes.iter().map(|a| (a.id.as_str(), a)).collect();
    let unknown = by_id
        .get(UNKNOWN_ARCHETYPE_ID)
        .map(|a| (*a).clone())
        .unwrap_or_else(Archetype::unknown);

    fn resolve<'a>(by_id: &HashMap<&str, &Archetype>, id: &'a ArchetypeId) -> &'a str {
        if by_id.contains_key(id.as_str()) {
            id.as_str()
        } else {
            UNKNOWN_ARCHETYPE_ID
        }
    }

    let mut counts: HashMap<(String, String), (u32, u32, u32)> = HashMap::new();
    let mut row_ids: HashSet<String> = HashSet::new();
    let mut col_ids: HashSet<String> = HashSet::new();

    for record in matches {
        let user = resolve(&by_id, &record.archetype_id);
        let opponent = resolve(&by_id, &record.opponent_archetype_id);

        if let Some(ref selected) = filter.user_archetype {
            if selected.as_str() != user {
                continue;
            }
        }
        if let Some(ref selected) = filter.opponent_archetype {
            if selected.as_str() != opponent {
                continue;
            }
        }

        let entry = counts
            .entry((user.to_string(), opponent.to_string()))
            .or_default();
        match record.result {
            MatchResult::Win => entry.0 += 1,
            MatchResult::Loss => entry.1 += 1,
            MatchResult::Draw => entry.2 += 1,
        }
        row_ids.insert(user.to_string());
        col_ids.insert(opponent.to_string());
    }

    let header_for = |id: &str| -> ArchetypeHeader {
        if id == UNKNOWN_ARCHETYPE_ID {
            ArchetypeHeader::from(&unknown)
        } else {
            ArchetypeHeader::from(by_id[id])
        }
    };

    let mut rows: Vec<ArchetypeHeader> = row_ids.iter().map(|id| header_for(id)).collect();
    let mut columns: Vec<ArchetypeHeader> = col_ids.iter().map(|id| header_for(id)).collect();
    rows.sort_by(axis_order);
    columns.sort_by(axis_order);

    let cells = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| {
                    counts
                        .get(&(row.id.as_str().to_string(), col.id.as_str().to_string()))
                        .map(|&(wins, losses, draws)| {
                            let stats = WinRateStats::from_counts(wins, losses, draws);
                            MatchupCell {
                                band: MatchupBand::from_stats(&stats),
                                stats,
                            }
                        })
                })
                .collect()
        })
        .collect();

    MatchupMatrix {
        rows,
        columns,
        cells,
    }
}
