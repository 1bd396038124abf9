//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed or host-supplied timestep only
//! - Seeded RNG only
//! - Side effects expressed as an ordered event stream
//! - No rendering or platform dependencies

pub mod card;
pub mod deck;
pub mod effects;
pub mod events;
pub mod identity;
pub mod pose;

pub use card::{CardAnimator, CardState, FaceState, Reveal};
pub use deck::{Deck, DeckConfig, DeckPhase, DeckShared};
pub use effects::{EffectHandle, EffectId, EffectKey, EffectPools, RevealVariant};
pub use events::{CueCommand, CueMode, EffectOp, MenuSignal, PackCommand, SimEvent};
pub use identity::{ArtworkId, CardVisualIdentity, DeckError, IdentityPool};
pub use pose::Pose;
