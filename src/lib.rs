//! Pack Reveal - a headless card-pack-opening mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (card state machines, deck choreography,
//!   identity and effect pools)
//!
//! The simulation emits [`sim::SimEvent`] values that a host shell maps onto
//! its engine objects (animators, particle systems, colliders). Nothing in
//! this crate renders or reads input.

pub mod sim;

pub use sim::{CardAnimator, CardState, Deck, DeckConfig, DeckError, DeckPhase, SimEvent};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Number of cards in a pack
    pub const CARD_COUNT: usize = 5;

    /// Exponential approach rate for all card motion (per second)
    pub const SMOOTH_RATE: f32 = 3.0;
    /// Convergence threshold for position and scale distances
    pub const CONVERGE_DIST: f32 = 1.0;

    /// Flip angle (degrees) at which the card face becomes visible to the
    /// viewer: art is applied on the way up, cleared on the way down
    pub const FACE_TURN_DEG: f32 = 89.8;
    /// Flip angle past which the reveal motion counts as finished
    pub const REVEAL_DONE_DEG: f32 = 178.0;
    /// Flip angle below which the dismiss motion counts as finished
    pub const DISMISS_DONE_DEG: f32 = 2.0;

    /// Forward pose a revealing card moves to
    pub const REVEAL_POSITION: Vec3 = Vec3::new(0.0, 0.0, -1.0);
    /// Enlarged scale of a revealed card
    pub const REVEAL_SCALE: Vec3 = Vec3::new(3.0, 3.0, 1.0);

    /// Anchor offset for the idle ambient effect (below the card)
    pub const IDLE_EFFECT_OFFSET: Vec3 = Vec3::new(0.0, -100.0, -1.0);
    /// Anchor offset for the reveal border effect (in front of the face)
    pub const REVEAL_EFFECT_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -5.0);

    /// Where the pack visual first spawns
    pub const PACK_SPAWN_POSITION: Vec3 = Vec3::new(420.0, 315.0, 0.0);
    /// Seconds the pack's scripted path motion takes
    pub const PACK_PATH_SECS: f32 = 2.0;
    /// Seconds the pack's entry animation runs before cards start dealing
    pub const PACK_ENTER_SECS: f32 = 3.0;
    /// Seconds between successive card dispatches
    pub const CARD_STAGGER_SECS: f32 = 0.3;
    /// Seconds after the last dispatch before the menu resumes
    pub const MENU_RESUME_SECS: f32 = 1.0;
    /// Seconds the pack's exit animation runs before it deactivates
    pub const PACK_EXIT_SECS: f32 = 3.0;

    /// Table layout slots, one per card, in dispatch order
    pub const DISPLAY_SLOTS: [Vec3; CARD_COUNT] = [
        Vec3::new(-480.0, -242.0, 0.0),
        Vec3::new(-445.0, 297.0, 0.0),
        Vec3::new(455.0, 251.0, 0.0),
        Vec3::new(439.0, -323.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
    ];
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_deg(mut deg: f32) -> f32 {
    while deg >= 360.0 {
        deg -= 360.0;
    }
    while deg < 0.0 {
        deg += 360.0;
    }
    deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_deg() {
        assert_eq!(normalize_deg(0.0), 0.0);
        assert_eq!(normalize_deg(360.0), 0.0);
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(450.0), 90.0);
    }
}
