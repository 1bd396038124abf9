//! Card identities and the per-sequence draw pool
//!
//! Each sequence builds a fresh pool with one entry per catalog artwork and a
//! random rarity per entry. Reveals draw from the pool without replacement,
//! so no two cards revealed in the same sequence can share an identity.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index into the host's artwork catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkId(pub u32);

/// Rarity tiers span this range (inclusive)
pub const RARITY_MIN: u8 = 1;
pub const RARITY_MAX: u8 = 4;

/// An artwork plus the rarity tier rolled for it this sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVisualIdentity {
    pub artwork: ArtworkId,
    /// Star count shown on the card face, in [`RARITY_MIN`]..=[`RARITY_MAX`]
    pub rarity: u8,
}

/// Recoverable simulation faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// Every identity has already been drawn this sequence
    #[error("identity pool exhausted")]
    PoolExhausted,
}

/// Not-yet-drawn identities for the current sequence
#[derive(Debug, Clone, Default)]
pub struct IdentityPool {
    entries: Vec<CardVisualIdentity>,
}

impl IdentityPool {
    /// Discard any leftovers and repopulate with one entry per catalog
    /// artwork, each with a fresh random rarity. Total, not incremental.
    pub fn rebuild(&mut self, catalog_size: usize, rng: &mut Pcg32) {
        self.entries.clear();
        for i in 0..catalog_size {
            self.entries.push(CardVisualIdentity {
                artwork: ArtworkId(i as u32),
                rarity: rng.random_range(RARITY_MIN..=RARITY_MAX),
            });
        }
    }

    /// Draw and remove one identity at random.
    ///
    /// Quirk preserved from the reference behavior: the random index range
    /// excludes the final remaining entry, so the last-position identity is
    /// unreachable until the pool shrinks to a single entry. See DESIGN.md
    /// before "fixing" this.
    pub fn draw(&mut self, rng: &mut Pcg32) -> Result<CardVisualIdentity, DeckError> {
        if self.entries.is_empty() {
            return Err(DeckError::PoolExhausted);
        }
        let index = if self.entries.len() == 1 {
            0
        } else {
            rng.random_range(0..self.entries.len() - 1)
        };
        Ok(self.entries.remove(index))
    }

    /// Remaining undrawn identities
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_rebuild_is_total() {
        let mut rng = rng();
        let mut pool = IdentityPool::default();
        pool.rebuild(8, &mut rng);
        // Drain most of the pool, then rebuild: size must come all the way back
        for _ in 0..6 {
            pool.draw(&mut rng).unwrap();
        }
        assert_eq!(pool.len(), 2);
        pool.rebuild(8, &mut rng);
        assert_eq!(pool.len(), 8);
    }

    #[test]
    fn test_draw_never_repeats() {
        let mut rng = rng();
        let mut pool = IdentityPool::default();
        pool.rebuild(10, &mut rng);
        let mut seen = Vec::new();
        for _ in 0..10 {
            let id = pool.draw(&mut rng).unwrap();
            assert!(!seen.contains(&id.artwork));
            seen.push(id.artwork);
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn test_empty_pool_reports_exhaustion() {
        let mut rng = rng();
        let mut pool = IdentityPool::default();
        pool.rebuild(1, &mut rng);
        pool.draw(&mut rng).unwrap();
        assert_eq!(pool.draw(&mut rng), Err(DeckError::PoolExhausted));
    }

    #[test]
    fn test_rarity_within_bounds() {
        let mut rng = rng();
        let mut pool = IdentityPool::default();
        pool.rebuild(64, &mut rng);
        while let Ok(id) = pool.draw(&mut rng) {
            assert!((RARITY_MIN..=RARITY_MAX).contains(&id.rarity));
        }
    }

    #[test]
    fn test_last_entry_unreachable_until_pool_shrinks() {
        // With two entries the draw range only covers index 0, so the
        // second entry can only come out as the final draw.
        let mut rng = rng();
        let mut pool = IdentityPool::default();
        pool.rebuild(2, &mut rng);
        let first = pool.draw(&mut rng).unwrap();
        assert_eq!(first.artwork, ArtworkId(0));
        let second = pool.draw(&mut rng).unwrap();
        assert_eq!(second.artwork, ArtworkId(1));
    }
}
