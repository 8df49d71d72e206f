//! Ranked projections of the roster.
//!
//! Rankings are derived on demand and never stored. Each [`Metric`] has its
//! own ranking key; ties fall back to identity order so results are stable.

use std::cmp::Ordering;
use std::fmt;

use crate::state::{Player, PlayerId, Roster};

/// Number of rows returned by [`rank`].
pub const LEADERBOARD_SIZE: usize = 10;

/// Ranking criterion.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Metric {
    /// Raw win count.
    #[default]
    Wins,
    /// Sum of attack and defense.
    Size,
    /// Wins over games played, 0 without games.
    Winrate,
}

impl Metric {
    /// Next metric in the wins → size → winrate cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Wins => Self::Size,
            Self::Size => Self::Winrate,
            Self::Winrate => Self::Wins,
        }
    }

    pub fn value_of(self, player: &Player) -> MetricValue {
        match self {
            Self::Wins => MetricValue::Wins(player.wins),
            Self::Size => MetricValue::Size {
                attack: player.attack,
                defense: player.defense,
            },
            Self::Winrate => MetricValue::Winrate(player.win_rate()),
        }
    }
}

/// Displayable value of one metric for one player.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricValue {
    Wins(u32),
    Size { attack: i64, defense: i64 },
    /// Percentage, `None` when no games were played.
    Winrate(Option<f64>),
}

impl MetricValue {
    fn cmp_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Wins(a), Self::Wins(b)) => a.cmp(b),
            (Self::Size { attack: a1, defense: d1 }, Self::Size { attack: a2, defense: d2 }) => {
                let sum = |attack: &i64, defense: &i64| i128::from(*attack) + i128::from(*defense);
                sum(a1, d1).cmp(&sum(a2, d2))
            }
            (Self::Winrate(a), Self::Winrate(b)) => {
                a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0))
            }
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wins(1) => write!(f, "1 win"),
            Self::Wins(wins) => write!(f, "{wins} wins"),
            Self::Size { attack, defense } => write!(f, "{attack} atk + {defense} def"),
            Self::Winrate(Some(rate)) => write!(f, "{rate:.1}%"),
            Self::Winrate(None) => write!(f, "0%"),
        }
    }
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    /// 1-based rank.
    pub position: usize,
    pub id: PlayerId,
    /// Cached display name, if the platform already resolved one.
    pub name: Option<String>,
    pub value: MetricValue,
}

/// Top [`LEADERBOARD_SIZE`] players by `metric`, descending.
pub fn rank(metric: Metric, roster: &Roster) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(&PlayerId, &Player, MetricValue)> = roster
        .iter()
        .map(|(id, player)| (id, player, metric.value_of(player)))
        .collect();

    rows.sort_by(|(id_a, _, a), (id_b, _, b)| b.cmp_key(a).then_with(|| id_a.cmp(id_b)));

    rows.into_iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(index, (id, player, value))| LeaderboardEntry {
            position: index + 1,
            id: id.clone(),
            name: player.name.clone(),
            value,
        })
        .collect()
}
