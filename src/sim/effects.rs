//! Pooled visual-effect resources
//!
//! Two free lists back the card effects: one for the ambient idle effect
//! shown under resting cards, one for the rarity-tier border effects shown
//! mid-flip. Handles are move-only: acquiring transfers ownership out of the
//! pool, releasing transfers it back, so a handle can never be live in two
//! places. Checkout with an empty free list falls back to minting a fresh
//! instance - that is the normal growth path, not an error.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{EffectOp, SimEvent};

/// Host-side identity of one effect instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectId(pub u32);

/// Reveal border variants, one per rarity flourish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealVariant {
    Blue,
    Gold,
    Purple,
    Special,
}

impl RevealVariant {
    /// Weighted roll across the four variants: a skewed [1, 120) range split
    /// at 30/60/90, so `Special` lands on the 90..120 tail.
    pub fn roll(rng: &mut Pcg32) -> Self {
        let n = rng.random_range(1..120);
        if n < 30 {
            RevealVariant::Blue
        } else if n < 60 {
            RevealVariant::Gold
        } else if n < 90 {
            RevealVariant::Purple
        } else {
            RevealVariant::Special
        }
    }

    /// Resource key the host loads for this variant
    pub fn resource_key(self) -> &'static str {
        match self {
            RevealVariant::Blue => "FX border Card Blue",
            RevealVariant::Gold => "FX border Card Gold",
            RevealVariant::Purple => "FX border Card Purple",
            RevealVariant::Special => "FX border Card Special",
        }
    }
}

/// Which pool an effect instance belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKey {
    IdleStar,
    RevealBorder(RevealVariant),
}

impl EffectKey {
    /// Resource key the host loads for this effect
    pub fn resource_key(self) -> &'static str {
        match self {
            EffectKey::IdleStar => "StarPS",
            EffectKey::RevealBorder(variant) => variant.resource_key(),
        }
    }
}

/// Owned checkout of one pooled effect instance.
///
/// Deliberately neither `Clone` nor `Copy`: ownership moves between a card
/// and the free list, never both.
#[derive(Debug, PartialEq, Eq)]
pub struct EffectHandle {
    id: EffectId,
    key: EffectKey,
}

impl EffectHandle {
    #[inline]
    pub fn id(&self) -> EffectId {
        self.id
    }

    #[inline]
    pub fn key(&self) -> EffectKey {
        self.key
    }
}

/// Free lists and creation tallies for both effect kinds
#[derive(Debug, Default)]
pub struct EffectPools {
    idle_free: Vec<EffectHandle>,
    reveal_free: Vec<EffectHandle>,
    next_id: u32,
    idle_created: u32,
    reveal_created: u32,
}

impl EffectPools {
    fn mint(&mut self, key: EffectKey, events: &mut Vec<SimEvent>) -> EffectHandle {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        events.push(SimEvent::Effect {
            id,
            op: EffectOp::Spawned { key },
        });
        EffectHandle { id, key }
    }

    /// Check out an idle ambient effect, reusing a free one when available
    pub fn acquire_idle(&mut self, events: &mut Vec<SimEvent>) -> EffectHandle {
        if let Some(handle) = self.idle_free.pop() {
            handle
        } else {
            self.idle_created += 1;
            self.mint(EffectKey::IdleStar, events)
        }
    }

    /// Stop an idle effect and return it to the free list
    pub fn release_idle(&mut self, handle: EffectHandle, events: &mut Vec<SimEvent>) {
        events.push(SimEvent::Effect {
            id: handle.id,
            op: EffectOp::Stop,
        });
        self.idle_free.push(handle);
    }

    /// Check out a reveal border effect of the given variant. The free list
    /// is searched by variant; a miss mints a fresh tagged instance.
    pub fn acquire_reveal(
        &mut self,
        variant: RevealVariant,
        events: &mut Vec<SimEvent>,
    ) -> EffectHandle {
        let wanted = EffectKey::RevealBorder(variant);
        if let Some(index) = self.reveal_free.iter().position(|h| h.key == wanted) {
            let handle = self.reveal_free.remove(index);
            events.push(SimEvent::Effect {
                id: handle.id,
                op: EffectOp::Activated,
            });
            handle
        } else {
            self.reveal_created += 1;
            self.mint(wanted, events)
        }
    }

    /// Detach, deactivate, and stop a reveal effect, returning it to the
    /// free list
    pub fn release_reveal(&mut self, handle: EffectHandle, events: &mut Vec<SimEvent>) {
        for op in [EffectOp::Detached, EffectOp::Deactivated, EffectOp::Stop] {
            events.push(SimEvent::Effect { id: handle.id, op });
        }
        self.reveal_free.push(handle);
    }

    /// Total idle instances ever created
    #[inline]
    pub fn idle_created(&self) -> u32 {
        self.idle_created
    }

    /// Idle instances currently free
    #[inline]
    pub fn idle_free(&self) -> usize {
        self.idle_free.len()
    }

    /// Total reveal instances ever created (all variants)
    #[inline]
    pub fn reveal_created(&self) -> u32 {
        self.reveal_created
    }

    /// Reveal instances currently free (all variants)
    #[inline]
    pub fn reveal_free(&self) -> usize {
        self.reveal_free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_idle_checkout_reuses_freed_instance() {
        let mut pools = EffectPools::default();
        let mut events = Vec::new();

        let first = pools.acquire_idle(&mut events);
        let first_id = first.id();
        pools.release_idle(first, &mut events);
        let second = pools.acquire_idle(&mut events);

        assert_eq!(second.id(), first_id);
        assert_eq!(pools.idle_created(), 1);
    }

    #[test]
    fn test_reveal_checkout_matches_variant() {
        let mut pools = EffectPools::default();
        let mut events = Vec::new();

        let gold = pools.acquire_reveal(RevealVariant::Gold, &mut events);
        let gold_id = gold.id();
        pools.release_reveal(gold, &mut events);

        // A different variant must not steal the freed gold instance
        let blue = pools.acquire_reveal(RevealVariant::Blue, &mut events);
        assert_ne!(blue.id(), gold_id);

        let gold_again = pools.acquire_reveal(RevealVariant::Gold, &mut events);
        assert_eq!(gold_again.id(), gold_id);
        assert_eq!(pools.reveal_created(), 2);
    }

    #[test]
    fn test_conservation_under_checkout_and_return() {
        let mut pools = EffectPools::default();
        let mut events = Vec::new();
        let mut held = Vec::new();

        for _ in 0..4 {
            held.push(pools.acquire_idle(&mut events));
        }
        assert_eq!(pools.idle_created() as usize, held.len() + pools.idle_free());

        for handle in held.drain(..) {
            pools.release_idle(handle, &mut events);
        }
        assert_eq!(pools.idle_created() as usize, pools.idle_free());
    }

    #[test]
    fn test_release_emits_full_teardown() {
        let mut pools = EffectPools::default();
        let mut events = Vec::new();
        let handle = pools.acquire_reveal(RevealVariant::Special, &mut events);
        let id = handle.id();

        events.clear();
        pools.release_reveal(handle, &mut events);
        assert_eq!(
            events,
            vec![
                SimEvent::Effect { id, op: EffectOp::Detached },
                SimEvent::Effect { id, op: EffectOp::Deactivated },
                SimEvent::Effect { id, op: EffectOp::Stop },
            ]
        );
    }

    #[test]
    fn test_roll_covers_all_variants() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 4];
        for _ in 0..2000 {
            match RevealVariant::roll(&mut rng) {
                RevealVariant::Blue => seen[0] = true,
                RevealVariant::Gold => seen[1] = true,
                RevealVariant::Purple => seen[2] = true,
                RevealVariant::Special => seen[3] = true,
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
