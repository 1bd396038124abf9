//! Deck coordinator
//!
//! One explicitly constructed [`Deck`] owns the five card state machines and
//! everything they share: the identity pool, both effect free lists, the
//! one-card-at-a-time flag, the reset tally, the seeded RNG, and the outgoing
//! event list. The deck also runs the timed pack choreography as an explicit
//! phase machine driven by accumulated elapsed time - no re-entrant callback
//! chains, one update loop.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::card::CardAnimator;
use super::effects::EffectPools;
use super::events::{CueCommand, MenuSignal, PackCommand, SimEvent};
use super::identity::{CardVisualIdentity, DeckError, IdentityPool};
use crate::consts::{
    CARD_COUNT, CARD_STAGGER_SECS, MENU_RESUME_SECS, PACK_ENTER_SECS, PACK_EXIT_SECS,
    PACK_PATH_SECS, PACK_SPAWN_POSITION,
};

/// Deck construction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    /// RNG seed; the whole session is deterministic given the seed and the
    /// input script
    pub seed: u64,
    /// Number of artworks in the host's catalog
    pub catalog_size: usize,
    /// Table layout slot per card, in dispatch order
    pub slots: [Vec3; CARD_COUNT],
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            catalog_size: 20,
            slots: crate::consts::DISPLAY_SLOTS,
        }
    }
}

/// Pack choreography phases
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeckPhase {
    /// Menu shown, no cards on the table
    Menu,
    /// Pack entering, cards dispatched one per stagger interval
    Dealing { elapsed: f32, dispatched: usize },
    /// All cards laid out and interactive
    Table,
    /// Restart requested, waiting for every card to report back
    Recalling,
    /// Cards are home, pack animating out
    PackRetreat { elapsed: f32 },
}

/// State shared by all cards, owned exclusively by the deck and mutated only
/// through its operations
pub struct DeckShared {
    pub(crate) identities: IdentityPool,
    pub(crate) effects: EffectPools,
    /// True iff exactly one card is revealed, revealing, or dismissing.
    /// The sole cross-card mutual-exclusion mechanism.
    pub(crate) card_present: bool,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<SimEvent>,
    reset_done: u32,
}

impl DeckShared {
    pub(crate) fn new(seed: u64, catalog_size: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut identities = IdentityPool::default();
        identities.rebuild(catalog_size, &mut rng);
        Self {
            identities,
            effects: EffectPools::default(),
            card_present: false,
            rng,
            events: Vec::new(),
            reset_done: 0,
        }
    }

    /// Rebuild the identity pool for a new sequence (total repopulation)
    pub(crate) fn rebuild_identities(&mut self, catalog_size: usize) {
        self.identities.rebuild(catalog_size, &mut self.rng);
    }

    /// Pop one random undrawn identity
    pub(crate) fn draw_identity(&mut self) -> Result<CardVisualIdentity, DeckError> {
        self.identities.draw(&mut self.rng)
    }

    pub(crate) fn push_cue(&mut self, card: usize, cmd: CueCommand) {
        self.events.push(SimEvent::Cue { card, cmd });
    }

    /// One card finished easing back into the pack
    pub(crate) fn notify_reset_complete(&mut self) {
        self.reset_done += 1;
    }

    pub(crate) fn reset_done(&self) -> u32 {
        self.reset_done
    }

    /// Take all pending events in emission order
    pub(crate) fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// The shared coordinator: five cards plus their common state
pub struct Deck {
    config: DeckConfig,
    cards: Vec<CardAnimator>,
    shared: DeckShared,
    phase: DeckPhase,
    pack_spawned: bool,
}

impl Deck {
    pub fn new(config: DeckConfig) -> Self {
        let shared = DeckShared::new(config.seed, config.catalog_size);
        let cards = (0..CARD_COUNT).map(CardAnimator::new).collect();
        Self {
            config,
            cards,
            shared,
            phase: DeckPhase::Menu,
            pack_spawned: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    #[inline]
    pub fn cards(&self) -> &[CardAnimator] {
        &self.cards
    }

    #[inline]
    pub fn card_present(&self) -> bool {
        self.shared.card_present
    }

    /// Undrawn identities left this sequence
    #[inline]
    pub fn identities_remaining(&self) -> usize {
        self.shared.identities.len()
    }

    #[inline]
    pub fn effects(&self) -> &EffectPools {
        &self.shared.effects
    }

    /// Take all pending events in emission order
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.shared.drain()
    }

    /// Kick off the pack-opening choreography. Only valid from the menu;
    /// ignored otherwise.
    pub fn start_sequence(&mut self) {
        if self.phase != DeckPhase::Menu {
            log::debug!("start_sequence ignored in {:?}", self.phase);
            return;
        }
        log::info!("starting pack sequence");
        self.shared.events.push(SimEvent::Menu(MenuSignal::StartHide));
        self.shared.rebuild_identities(self.config.catalog_size);

        if self.pack_spawned {
            self.shared.events.push(SimEvent::Pack(PackCommand::Activate));
        } else {
            self.pack_spawned = true;
            self.shared.events.push(SimEvent::Pack(PackCommand::Spawn {
                position: PACK_SPAWN_POSITION,
            }));
        }
        self.shared.events.push(SimEvent::Pack(PackCommand::SetDirection(1)));
        self.shared.events.push(SimEvent::Pack(PackCommand::FollowPath {
            reversed: false,
            secs: PACK_PATH_SECS,
        }));
        self.phase = DeckPhase::Dealing {
            elapsed: 0.0,
            dispatched: 0,
        };
    }

    /// Recall every card into the pack. Ignored while the menu is up or the
    /// pack is already retreating.
    pub fn restart_all(&mut self) {
        if matches!(self.phase, DeckPhase::Menu | DeckPhase::PackRetreat { .. }) {
            log::debug!("restart_all ignored in {:?}", self.phase);
            return;
        }
        log::info!("restarting: recalling all cards");
        self.shared.events.push(SimEvent::Menu(MenuSignal::Restart));
        self.shared.reset_done = 0;
        for card in &mut self.cards {
            card.reset(&mut self.shared);
        }
        self.shared.card_present = false;
        self.phase = DeckPhase::Recalling;
    }

    /// Pointer pressed on card `index`
    pub fn pointer_press(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.pointer_press(&mut self.shared);
        }
    }

    /// Pointer hover entered card `index`
    pub fn pointer_enter(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.pointer_enter(&mut self.shared);
        }
    }

    /// Pointer hover left card `index`
    pub fn pointer_exit(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.pointer_exit(&mut self.shared);
        }
    }

    /// Advance choreography and every card by one frame
    pub fn tick(&mut self, dt: f32) {
        match &mut self.phase {
            DeckPhase::Dealing { elapsed, dispatched } => {
                *elapsed += dt;
                // Cards leave the pack in fixed index order, one per stagger
                while *dispatched < CARD_COUNT
                    && *elapsed >= PACK_ENTER_SECS + CARD_STAGGER_SECS * *dispatched as f32
                {
                    let slot = self.config.slots[*dispatched];
                    self.cards[*dispatched].move_to_slot(slot);
                    *dispatched += 1;
                }
                let done_at =
                    PACK_ENTER_SECS + CARD_STAGGER_SECS * CARD_COUNT as f32 + MENU_RESUME_SECS;
                if *dispatched == CARD_COUNT && *elapsed >= done_at {
                    self.shared
                        .events
                        .push(SimEvent::Menu(MenuSignal::RevealReady));
                    self.phase = DeckPhase::Table;
                    log::info!("all cards dealt, table ready");
                }
            }
            DeckPhase::PackRetreat { elapsed } => {
                *elapsed += dt;
                if *elapsed >= PACK_EXIT_SECS {
                    self.shared.events.push(SimEvent::Pack(PackCommand::Deactivate));
                    self.shared.events.push(SimEvent::Menu(MenuSignal::Idle));
                    self.phase = DeckPhase::Menu;
                    log::info!("pack away, menu restored");
                }
            }
            DeckPhase::Menu | DeckPhase::Table | DeckPhase::Recalling => {}
        }

        for card in &mut self.cards {
            card.tick(dt, &mut self.shared);
        }

        // Once every card has reported home, reverse the pack animation
        if self.phase == DeckPhase::Recalling && self.shared.reset_done() >= CARD_COUNT as u32 {
            self.shared.events.push(SimEvent::Pack(PackCommand::SetDirection(-1)));
            self.shared.events.push(SimEvent::Pack(PackCommand::FollowPath {
                reversed: true,
                secs: PACK_PATH_SECS,
            }));
            self.phase = DeckPhase::PackRetreat { elapsed: 0.0 };
            log::info!("all cards home, pack retreating");
        }
    }
}
