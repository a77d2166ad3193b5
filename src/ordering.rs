//! Display ordering
//!
//! Ordering affects only the order of the filtered list, never its membership.
//! `Random` reshuffles on every call; no order is persisted.

use crate::reference::Reference;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display order of the filtered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// List order, as selected by the user
    #[default]
    Selection,
    /// Fresh uniform shuffle per request
    Random,
}

impl Ordering {
    pub const ALL: [Self; 2] = [Self::Selection, Self::Random];

    #[must_use]
    pub const fn as_value(self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_value() == value)
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

/// Order `references` for display using the thread-local RNG
#[must_use]
pub fn display_order(references: Vec<Reference>, ordering: Ordering) -> Vec<Reference> {
    display_order_with(references, ordering, &mut rand::thread_rng())
}

/// Order `references` for display using `rng` for the random mode
#[must_use]
pub fn display_order_with<R: Rng + ?Sized>(
    mut references: Vec<Reference>,
    ordering: Ordering,
    rng: &mut R,
) -> Vec<Reference> {
    if ordering == Ordering::Random {
        references.shuffle(rng);
    }
    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn refs(n: usize) -> Vec<Reference> {
        (0..n).map(|i| Reference::new(format!("content://m/{i}"))).collect()
    }

    #[test]
    fn test_selection_is_identity() {
        assert_eq!(display_order(refs(10), Ordering::Selection), refs(10));
    }

    #[test]
    fn test_random_is_permutation() {
        for _ in 0..20 {
            let mut shuffled = display_order(refs(25), Ordering::Random);
            shuffled.sort();
            let mut expected = refs(25);
            expected.sort();
            assert_eq!(shuffled, expected);
        }
    }

    #[test]
    fn test_random_with_seeded_rng_moves_something() {
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = display_order_with(refs(50), Ordering::Random, &mut rng);
        assert_ne!(shuffled, refs(50));
    }

    #[test]
    fn test_values() {
        assert_eq!(Ordering::parse("random"), Some(Ordering::Random));
        assert_eq!(Ordering::parse("shuffle"), None);
        assert_eq!(Ordering::default().as_value(), "selection");
    }
}
