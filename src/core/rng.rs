//! Secret number generation.

use std::fmt;

use log::trace;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index};

use crate::core::constants::SECRET_LEN;

/// Four distinct decimal digits, the first one non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecretNumber([u8; SECRET_LEN]);

impl SecretNumber {
    /// Uniform draw over all valid secrets: sample 4 distinct digits and
    /// redraw while the first one is 0.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let mut digits = [0u8; SECRET_LEN];
            for (slot, d) in digits.iter_mut().zip(index::sample(rng, 10, SECRET_LEN).into_iter()) {
                // d < 10
                *slot = d as u8;
            }
            if digits[0] != 0 {
                trace!("drew secret {}", Self(digits));
                return Self(digits);
            }
        }
    }

    /// `None` unless the digits form a valid secret.
    #[must_use]
    pub fn from_digits(digits: [u8; SECRET_LEN]) -> Option<Self> {
        let distinct = digits
            .iter()
            .enumerate()
            .all(|(i, d)| !digits[..i].contains(d));
        (digits[0] != 0 && distinct && digits.iter().all(|d| *d < 10)).then_some(Self(digits))
    }

    #[inline]
    #[must_use]
    pub fn digits(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }
}

impl fmt::Display for SecretNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Seeded generator for reproducible games, OS entropy otherwise.
#[must_use]
pub fn game_rng(seed: Option<u64>) -> SmallRng {
    seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64)
}
