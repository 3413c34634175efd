//! The closed state vocabulary shared by classifiers, behavior models and
//! agents.
//!
//! Every enum exposes an `ALL` constant in a fixed order and a dense
//! `index()` so that per-state tables can be stored as flat arrays instead of
//! hash maps.  [`StateKey::index`] packs the three indices into `0..StateKey::COUNT`.

use std::fmt;

// ── TimeState ────────────────────────────────────────────────────────────────

/// Time-of-day bucket.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeState {
    /// 08:00 – 11:59.
    Morning,
    /// 12:00 – 17:59.
    Afternoon,
    /// 18:00 – 23:59.
    Evening,
    /// 00:00 – 07:59.
    Sleeping,
}

impl TimeState {
    pub const ALL: [TimeState; 4] = [
        TimeState::Morning,
        TimeState::Afternoon,
        TimeState::Evening,
        TimeState::Sleeping,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeState::Morning   => "morning",
            TimeState::Afternoon => "afternoon",
            TimeState::Evening   => "evening",
            TimeState::Sleeping  => "sleeping",
        }
    }
}

impl fmt::Display for TimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DayState ─────────────────────────────────────────────────────────────────

/// Day of the week.  Index 0 is Monday.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayState {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayState {
    pub const ALL: [DayState; 7] = [
        DayState::Monday,
        DayState::Tuesday,
        DayState::Wednesday,
        DayState::Thursday,
        DayState::Friday,
        DayState::Saturday,
        DayState::Sunday,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayState::Monday    => "monday",
            DayState::Tuesday   => "tuesday",
            DayState::Wednesday => "wednesday",
            DayState::Thursday  => "thursday",
            DayState::Friday    => "friday",
            DayState::Saturday  => "saturday",
            DayState::Sunday    => "sunday",
        }
    }
}

impl fmt::Display for DayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RecencyState ─────────────────────────────────────────────────────────────

/// How long ago the last notification was sent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecencyState {
    /// At most 60 minutes ago.
    Within1Hour,
    /// More than 60 minutes ago, or never.
    Long,
}

impl RecencyState {
    pub const ALL: [RecencyState; 2] = [RecencyState::Within1Hour, RecencyState::Long];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecencyState::Within1Hour => "within_1h",
            RecencyState::Long        => "long",
        }
    }
}

impl fmt::Display for RecencyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── StateKey ─────────────────────────────────────────────────────────────────

/// The `(time, day, recency)` triple used to index per-state behavior tables.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateKey {
    pub time:    TimeState,
    pub day:     DayState,
    pub recency: RecencyState,
}

impl StateKey {
    /// Size of the full `{time} × {day} × {recency}` cross product.
    pub const COUNT: usize =
        TimeState::ALL.len() * DayState::ALL.len() * RecencyState::ALL.len();

    #[inline]
    pub fn new(time: TimeState, day: DayState, recency: RecencyState) -> Self {
        Self { time, day, recency }
    }

    /// Dense index in `0..StateKey::COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        (self.time.index() * DayState::ALL.len() + self.day.index()) * RecencyState::ALL.len()
            + self.recency.index()
    }

    /// Inverse of [`index`][Self::index].  `None` if `i >= COUNT`.
    pub fn from_index(i: usize) -> Option<StateKey> {
        if i >= Self::COUNT {
            return None;
        }
        let recency = RecencyState::ALL[i % RecencyState::ALL.len()];
        let rest = i / RecencyState::ALL.len();
        let day = DayState::ALL[rest % DayState::ALL.len()];
        let time = TimeState::ALL[rest / DayState::ALL.len()];
        Some(StateKey { time, day, recency })
    }

    /// Every state key, in `index()` order.
    pub fn all() -> impl Iterator<Item = StateKey> {
        TimeState::ALL.into_iter().flat_map(|time| {
            DayState::ALL.into_iter().flat_map(move |day| {
                RecencyState::ALL
                    .into_iter()
                    .map(move |recency| StateKey { time, day, recency })
            })
        })
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.time, self.day, self.recency)
    }
}
