//! Canonically ordered pair of distinct token addresses.

use super::Address;
use crate::error::{AmmError, Result};

/// One side of a pool.
///
/// `A` is the token with the lower address, `B` the higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The lower-address token.
    A,
    /// The higher-address token.
    B,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// An ordered pair of distinct tokens, sorted by address.
///
/// The canonical ordering guarantees `token_a < token_b`, so `(X, Y)` and
/// `(Y, X)` name the same pair.  The factory keys its registry on this
/// type.
///
/// # Examples
///
/// ```
/// use duet_amm::domain::{Address, TokenPair};
///
/// let lo = Address::new([1u8; 20]);
/// let hi = Address::new([2u8; 20]);
///
/// let pair = TokenPair::new(hi, lo).expect("distinct tokens");
/// assert_eq!(pair.token_a(), lo);
/// assert_eq!(pair.token_b(), hi);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    token_a: Address,
    token_b: Address,
}

impl TokenPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalTokens`] if both addresses are equal.
    pub fn new(token1: Address, token2: Address) -> Result<Self> {
        if token1 == token2 {
            return Err(AmmError::IdenticalTokens);
        }
        let (token_a, token_b) = if token1 < token2 {
            (token1, token2)
        } else {
            (token2, token1)
        };
        Ok(Self { token_a, token_b })
    }

    /// Returns the lower-address token.
    #[must_use]
    pub const fn token_a(&self) -> Address {
        self.token_a
    }

    /// Returns the higher-address token.
    #[must_use]
    pub const fn token_b(&self) -> Address {
        self.token_b
    }

    /// Returns the token on `side`.
    #[must_use]
    pub const fn token(&self, side: Side) -> Address {
        match side {
            Side::A => self.token_a,
            Side::B => self.token_b,
        }
    }

    /// Returns `true` if `token` is part of the pair.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token_a == *token || self.token_b == *token
    }

    /// Returns which side `token` sits on.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn side_of(&self, token: &Address) -> Result<Side> {
        if *token == self.token_a {
            Ok(Side::A)
        } else if *token == self.token_b {
            Ok(Side::B)
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
    }
}
