//! Pool reserve snapshot.

use core::fmt;

use super::{Amount, Side};

/// The two reserve balances of a pool, in canonical pair order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reserves {
    a: Amount,
    b: Amount,
}

impl Reserves {
    /// Empty reserves.
    pub const EMPTY: Self = Self {
        a: Amount::ZERO,
        b: Amount::ZERO,
    };

    /// Creates a snapshot from the two balances.
    pub const fn new(a: Amount, b: Amount) -> Self {
        Self { a, b }
    }

    /// Reserve of the lower-address token.
    pub const fn a(&self) -> Amount {
        self.a
    }

    /// Reserve of the higher-address token.
    pub const fn b(&self) -> Amount {
        self.b
    }

    /// Reserve on `side`.
    pub const fn get(&self, side: Side) -> Amount {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    /// Returns `(reserve_in, reserve_out)` for a swap selling `side`.
    #[must_use]
    pub const fn oriented(&self, side_in: Side) -> (Amount, Amount) {
        match side_in {
            Side::A => (self.a, self.b),
            Side::B => (self.b, self.a),
        }
    }

    /// Builds reserves from swap-oriented balances.
    pub const fn from_oriented(side_in: Side, reserve_in: Amount, reserve_out: Amount) -> Self {
        match side_in {
            Side::A => Self::new(reserve_in, reserve_out),
            Side::B => Self::new(reserve_out, reserve_in),
        }
    }

    /// Returns `true` if both balances are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }

    /// Returns `true` if exactly one balance is zero.
    #[must_use]
    pub const fn is_lopsided(&self) -> bool {
        self.a.is_zero() != self.b.is_zero()
    }
}

impl fmt::Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}
