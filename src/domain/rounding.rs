//! Explicit rounding direction for integer division.

/// Rounding direction for a division.
///
/// Every division in the engine names its direction.  The pool always
/// takes the side that keeps value inside the pool: amounts paid out round
/// down, amounts required from the caller round up.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
