//! Pool lifecycle state.

use core::fmt;

/// Lifecycle phase of a pool.
///
/// ```text
/// Empty --first deposit--> Seeded --any operation--> Active
///   ^                                                  |
///   +-------------- full withdrawal -------------------+
/// ```
///
/// A full withdrawal from `Seeded` also returns the pool to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoolPhase {
    /// No reserves and no shares.
    #[default]
    Empty,
    /// Holds exactly the first deposit.
    Seeded,
    /// Has seen activity after seeding.
    Active,
}

impl PoolPhase {
    /// Phase after a successful deposit.
    #[must_use]
    pub const fn after_deposit(self) -> Self {
        match self {
            Self::Empty => Self::Seeded,
            Self::Seeded | Self::Active => Self::Active,
        }
    }

    /// Phase after a successful swap or withdrawal that leaves shares
    /// outstanding.
    #[must_use]
    pub const fn after_activity(self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Seeded | Self::Active => Self::Active,
        }
    }

    /// Returns `true` for [`PoolPhase::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for PoolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Seeded => "seeded",
            Self::Active => "active",
        };
        f.write_str(name)
    }
}
