use std::fmt;

/// Starting attack of a freshly created character.
pub const DEFAULT_ATTACK: i64 = 10;
/// Starting defense of a freshly created character.
pub const DEFAULT_DEFENSE: i64 = 2;
/// Cached display names are truncated to this many characters.
pub const MAX_NAME_CHARS: usize = 20;

/// Stable identity of a participant, as supplied by the chat platform.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Persistent character owned by one participant.
///
/// `attack` and `defense` are signed and unbounded: growth and combat losses
/// may push them below zero, which then blocks the player from fighting until
/// they grow back above the eligibility threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Player {
    pub attack: i64,
    pub defense: i64,
    pub wins: u32,
    pub losses: u32,
    /// Epoch seconds of the last growth, 0 before the first one.
    pub last_grow: i64,
    /// Display name cached from the platform, at most [`MAX_NAME_CHARS`] characters.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            attack: DEFAULT_ATTACK,
            defense: DEFAULT_DEFENSE,
            wins: 0,
            losses: 0,
            last_grow: 0,
            name: None,
        }
    }

    pub fn with_stats(mut self, attack: i64, defense: i64) -> Self {
        self.attack = attack;
        self.defense = defense;
        self
    }

    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self
    }

    pub fn with_last_grow(mut self, last_grow: i64) -> Self {
        self.last_grow = last_grow;
        self
    }

    pub fn with_name(mut self, name: impl AsRef<str>) -> Self {
        self.set_name(name);
        self
    }

    /// Cache a display name, truncated on a character boundary.
    pub fn set_name(&mut self, name: impl AsRef<str>) {
        self.name = Some(name.as_ref().chars().take(MAX_NAME_CHARS).collect());
    }

    pub fn games(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }

    /// Sum of both stats, the "size" leaderboard metric. Saturates at the
    /// `i64` bounds.
    pub fn size(&self) -> i64 {
        self.attack.saturating_add(self.defense)
    }

    /// Win percentage in `[0, 100]`, `None` when no games were played.
    pub fn win_rate(&self) -> Option<f64> {
        match self.games() {
            0 => None,
            games => Some(f64::from(self.wins) / f64::from(games) * 100.0),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
