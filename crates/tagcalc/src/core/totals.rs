//! Tag totals and leaderboard ranking

use super::history::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leaderboard rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rank {
    /// Top of the board, or a deficit of 71,000 to 112,000
    Gold,
    /// Deficit of 113,000 to 224,000
    #[serde(rename = "gold-2")]
    Gold2,
    /// Deficit of 1,000 to 70,000
    Silver,
    /// Deficit of 225,000 to 280,000
    Black,
}

impl Rank {
    /// Badge label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Gold2 => "gold-2",
            Self::Silver => "silver",
            Self::Black => "black",
        }
    }

    /// Badge style classes
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Gold | Self::Gold2 => "bg-yellow-500 text-black",
            Self::Silver => "bg-gray-300 text-black",
            Self::Black => "bg-black text-white",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Badge classes for an optional rank
#[must_use]
pub const fn badge_class(rank: Option<Rank>) -> &'static str {
    match rank {
        Some(rank) => rank.badge_class(),
        None => "bg-gray-100 text-gray-800",
    }
}

/// Closed deficit interval mapped to a rank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankBand {
    /// Inclusive lower bound
    pub lower: f64,
    /// Inclusive upper bound
    pub upper: f64,
    /// Rank for deficits inside the band
    pub rank: Rank,
}

impl RankBand {
    /// Returns true if `deficit` lies inside the band
    #[must_use]
    pub fn contains(&self, deficit: f64) -> bool {
        deficit >= self.lower && deficit <= self.upper
    }
}

/// Bands in match order; the first containing band wins
pub const RANK_BANDS: [RankBand; 4] = [
    RankBand {
        lower: 225_000.0,
        upper: 280_000.0,
        rank: Rank::Black,
    },
    RankBand {
        lower: 113_000.0,
        upper: 224_000.0,
        rank: Rank::Gold2,
    },
    RankBand {
        lower: 71_000.0,
        upper: 112_000.0,
        rank: Rank::Gold,
    },
    RankBand {
        lower: 1_000.0,
        upper: 70_000.0,
        rank: Rank::Silver,
    },
];

/// Classifies a deficit from the leader
///
/// Deficits in the gaps between bands, outside every band, or NaN have no
/// rank.
#[must_use]
pub fn classify_deficit(deficit: f64) -> Option<Rank> {
    RANK_BANDS
        .iter()
        .find(|band| band.contains(deficit))
        .map(|band| band.rank)
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagTotal {
    /// Tag name
    pub tag: String,
    /// Sum of results recorded under the tag
    pub total: f64,
    /// Leader total minus this total (0 for the leader)
    pub difference: f64,
    /// Rank badge, if any
    pub rank: Option<Rank>,
}

impl TagTotal {
    /// Returns true for the leader row
    #[must_use]
    pub fn is_leader(&self) -> bool {
        self.difference == 0.0 && self.rank == Some(Rank::Gold)
    }
}

/// Aggregates history into ranked per-tag totals
///
/// Tags are grouped in order of first appearance, then stably sorted by
/// descending total. The first row is the leader.
///
/// A running sum that has become NaN restarts from zero at the tag's next
/// entry, and a NaN leader total measures deficits from zero.
#[must_use]
pub fn tag_totals<'a, I>(entries: I) -> Vec<TagTotal>
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    let mut sums: Vec<(String, f64)> = Vec::new();
    for entry in entries {
        match sums.iter_mut().find(|(tag, _)| *tag == entry.tag) {
            Some((_, sum)) => {
                if sum.is_nan() {
                    *sum = 0.0;
                }
                *sum += entry.result;
            }
            None => sums.push((entry.tag.clone(), entry.result)),
        }
    }

    sums.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let highest = match sums.first() {
        Some((_, total)) if !total.is_nan() => *total,
        _ => 0.0,
    };

    sums.into_iter()
        .enumerate()
        .map(|(i, (tag, total))| {
            if i == 0 {
                TagTotal {
                    tag,
                    total,
                    difference: 0.0,
                    rank: Some(Rank::Gold),
                }
            } else {
                let difference = highest - total;
                TagTotal {
                    tag,
                    total,
                    difference,
                    rank: classify_deficit(difference),
                }
            }
        })
        .collect()
}
