//! Per-card animation state machine
//!
//! Each card owns one [`CardAnimator`]: a small finite-state machine that
//! eases the card's pose toward per-state targets and fires reveal/dismiss
//! side effects exactly once per pass. Face-dependent data (the drawn
//! identity and the reveal-effect checkout) lives inside the state payload,
//! so a resting card with art still applied is unrepresentable.
//!
//! Cards never talk to each other; everything shared (the identity pool,
//! effect free lists, and the one-card-at-a-time flag) goes through
//! [`DeckShared`].

use std::mem;

use glam::Vec3;

use super::deck::DeckShared;
use super::effects::{EffectHandle, RevealVariant};
use super::events::{CueCommand, CueMode, EffectOp, SimEvent};
use super::identity::CardVisualIdentity;
use super::pose::Pose;
use crate::consts::{
    CONVERGE_DIST, DISMISS_DONE_DEG, FACE_TURN_DEG, IDLE_EFFECT_OFFSET, REVEAL_DONE_DEG,
    REVEAL_EFFECT_OFFSET, REVEAL_POSITION, REVEAL_SCALE, SMOOTH_RATE,
};

/// Identity and reveal-effect checkout held while a card shows its face
#[derive(Debug, PartialEq)]
pub struct Reveal {
    pub identity: CardVisualIdentity,
    pub effect: EffectHandle,
}

/// Which way the card face points, plus what is on it.
///
/// `Up(None)` is the pool-exhausted fallback: the card flipped but there was
/// no identity left to show.
#[derive(Debug, PartialEq)]
pub enum FaceState {
    Down,
    Up(Option<Reveal>),
}

/// Animation states of one card
#[derive(Debug, PartialEq)]
pub enum CardState {
    /// Off-screen / inside the pack
    Default,
    /// Easing from the pack to the assigned table slot
    MovingToEndPoint,
    /// Resting face-down, interactive
    Idle,
    /// Reveal in progress: moving forward, flipping, enlarging
    BringInForward { face: FaceState },
    /// Fully revealed, waiting for the dismiss press
    BringInForwardEnd { face: FaceState },
    /// Returning to the slot, flipping back down
    DismissForward { face: FaceState },
    /// Easing back into the pack after a restart
    Resetting,
}

/// One card's state machine and transform
#[derive(Debug)]
pub struct CardAnimator {
    index: usize,
    state: CardState,
    pose: Pose,
    /// Assigned table slot
    target_position: Vec3,
    /// Resting tilt captured when the card was dispatched
    rest_roll_deg: f32,
    idle_effect: Option<EffectHandle>,
    hit_enabled: bool,
    cue_playback: bool,
}

impl CardAnimator {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            state: CardState::Default,
            pose: Pose::default(),
            target_position: Vec3::ZERO,
            rest_roll_deg: 0.0,
            idle_effect: None,
            hit_enabled: true,
            cue_playback: true,
        }
    }

    #[inline]
    pub fn state(&self) -> &CardState {
        &self.state
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    pub fn hit_enabled(&self) -> bool {
        self.hit_enabled
    }

    /// True while this card holds the ambient idle-effect checkout
    #[inline]
    pub fn holds_idle_effect(&self) -> bool {
        self.idle_effect.is_some()
    }

    /// True while this card holds a reveal-effect checkout
    pub fn holds_reveal_effect(&self) -> bool {
        matches!(
            self.state,
            CardState::BringInForward {
                face: FaceState::Up(Some(_))
            } | CardState::BringInForwardEnd {
                face: FaceState::Up(Some(_))
            } | CardState::DismissForward {
                face: FaceState::Up(Some(_))
            }
        )
    }

    /// True while this card is revealing, revealed, or dismissing
    pub fn is_presenting(&self) -> bool {
        matches!(
            self.state,
            CardState::BringInForward { .. }
                | CardState::BringInForwardEnd { .. }
                | CardState::DismissForward { .. }
        )
    }

    /// Begin moving from the pack to `slot`. Called by the deck during the
    /// dealing choreography.
    pub fn move_to_slot(&mut self, slot: Vec3) {
        self.target_position = slot;
        self.rest_roll_deg = self.pose.roll_deg;
        self.state = CardState::MovingToEndPoint;
    }

    /// Pointer hover started over this card
    pub fn pointer_enter(&mut self, shared: &mut DeckShared) {
        if matches!(self.state, CardState::Idle) {
            shared.push_cue(self.index, CueCommand::SetMode(CueMode::HoverIn));
        }
    }

    /// Pointer hover left this card
    pub fn pointer_exit(&mut self, shared: &mut DeckShared) {
        if matches!(self.state, CardState::Idle) {
            shared.push_cue(self.index, CueCommand::SetMode(CueMode::HoverOut));
        }
    }

    /// Pointer pressed on this card
    pub fn pointer_press(&mut self, shared: &mut DeckShared) {
        if !self.hit_enabled {
            return;
        }

        if shared.card_present {
            // Only the presented card itself may be dismissed; pressing any
            // idle card while another is up does nothing.
            if matches!(self.state, CardState::BringInForwardEnd { .. }) {
                self.set_hit(false, shared);
                if let CardState::BringInForwardEnd { face } =
                    mem::replace(&mut self.state, CardState::Default)
                {
                    self.state = CardState::DismissForward { face };
                }
            }
            return;
        }

        if matches!(self.state, CardState::Idle) {
            self.set_hit(false, shared);
            self.state = CardState::BringInForward {
                face: FaceState::Down,
            };
            shared.push_cue(self.index, CueCommand::SetMode(CueMode::Entry));
            shared.push_cue(self.index, CueCommand::Play("Default".into()));
            self.set_cue_playback(false, shared);
            shared.card_present = true;
            self.release_idle_effect(shared);
        }
    }

    /// Snap home and start easing back into the pack. Safe to call in any
    /// state, any number of times: held effect handles are released at most
    /// once.
    pub fn reset(&mut self, shared: &mut DeckShared) {
        shared.push_cue(self.index, CueCommand::SetMode(CueMode::Entry));
        shared.push_cue(self.index, CueCommand::Play("Default".into()));

        self.pose.flip_deg = 0.0;
        self.pose.roll_deg = self.rest_roll_deg;
        self.pose.position = self.target_position;
        self.pose.scale = Vec3::ONE;

        let prev = mem::replace(&mut self.state, CardState::Resetting);
        if let CardState::BringInForward { face }
        | CardState::BringInForwardEnd { face }
        | CardState::DismissForward { face } = prev
            && let FaceState::Up(Some(reveal)) = face
        {
            shared.effects.release_reveal(reveal.effect, &mut shared.events);
        }
        shared.events.push(SimEvent::ArtCleared { card: self.index });

        self.release_idle_effect(shared);
        self.set_hit(true, shared);
    }

    /// Advance the state machine by one frame
    pub fn tick(&mut self, dt: f32, shared: &mut DeckShared) {
        match self.state {
            CardState::MovingToEndPoint => {
                self.pose
                    .approach_position(self.target_position, SMOOTH_RATE, dt);
                if self.pose.distance_to(self.target_position) < CONVERGE_DIST {
                    self.enter_idle(shared);
                }
            }
            CardState::BringInForward { .. } => self.tick_bring_in_forward(dt, shared),
            CardState::DismissForward { .. } => self.tick_dismiss_forward(dt, shared),
            CardState::Resetting => {
                self.pose.approach_position(Vec3::ZERO, SMOOTH_RATE, dt);
                if self.pose.distance_to(Vec3::ZERO) < CONVERGE_DIST {
                    self.state = CardState::Default;
                    shared.notify_reset_complete();
                }
            }
            // Resting states advance on input, not on time
            CardState::Default | CardState::Idle | CardState::BringInForwardEnd { .. } => {}
        }
    }

    fn tick_bring_in_forward(&mut self, dt: f32, shared: &mut DeckShared) {
        self.pose.approach_position(REVEAL_POSITION, SMOOTH_RATE, dt);
        self.pose.approach_flip(180.0, SMOOTH_RATE, dt);
        self.pose.approach_roll(0.0, SMOOTH_RATE, dt);
        self.pose.approach_scale(REVEAL_SCALE, SMOOTH_RATE, dt);

        // Halfway through the flip the face turns toward the viewer: apply
        // art and the border effect, exactly once per pass.
        if self.pose.flip_deg > FACE_TURN_DEG
            && matches!(
                self.state,
                CardState::BringInForward {
                    face: FaceState::Down
                }
            )
        {
            let face = self.turn_face_up(shared);
            self.state = CardState::BringInForward { face };
        }

        if self.pose.scale_distance_to(REVEAL_SCALE) < CONVERGE_DIST
            && self.pose.distance_to(REVEAL_POSITION) < CONVERGE_DIST
            && self.pose.flip_deg > REVEAL_DONE_DEG
        {
            if let CardState::BringInForward { face } =
                mem::replace(&mut self.state, CardState::Default)
            {
                self.state = CardState::BringInForwardEnd { face };
            }
            self.set_hit(true, shared);
        }
    }

    fn tick_dismiss_forward(&mut self, dt: f32, shared: &mut DeckShared) {
        self.pose
            .approach_position(self.target_position, SMOOTH_RATE, dt);
        self.pose.approach_flip(0.0, SMOOTH_RATE, dt);
        self.pose.approach_roll(self.rest_roll_deg, SMOOTH_RATE, dt);
        self.pose.approach_scale(Vec3::ONE, SMOOTH_RATE, dt);

        // Back past halfway: the face is hidden again, clear it
        if self.pose.flip_deg < FACE_TURN_DEG
            && matches!(
                self.state,
                CardState::DismissForward {
                    face: FaceState::Up(_)
                }
            )
        {
            if let CardState::DismissForward { face } = &mut self.state
                && let FaceState::Up(reveal) = mem::replace(face, FaceState::Down)
            {
                if let Some(reveal) = reveal {
                    shared.events.push(SimEvent::ArtCleared { card: self.index });
                    shared.effects.release_reveal(reveal.effect, &mut shared.events);
                }
            }
        }

        if self.pose.scale_distance_to(Vec3::ONE) < CONVERGE_DIST
            && self.pose.distance_to(self.target_position) < CONVERGE_DIST
            && self.pose.flip_deg < DISMISS_DONE_DEG
        {
            self.pose.scale = Vec3::ONE;
            self.set_cue_playback(true, shared);
            shared.card_present = false;
            self.enter_idle(shared);
        }
    }

    /// Draw an identity and check out the rolled reveal effect. Pool
    /// exhaustion degrades to a blank face rather than failing the flip.
    fn turn_face_up(&mut self, shared: &mut DeckShared) -> FaceState {
        match shared.draw_identity() {
            Ok(identity) => {
                shared.events.push(SimEvent::ArtApplied {
                    card: self.index,
                    identity,
                });
                let variant = RevealVariant::roll(&mut shared.rng);
                let effect = shared.effects.acquire_reveal(variant, &mut shared.events);
                shared.events.push(SimEvent::Effect {
                    id: effect.id(),
                    op: EffectOp::AttachedTo {
                        card: self.index,
                        offset: REVEAL_EFFECT_OFFSET,
                        flipped: true,
                    },
                });
                shared.events.push(SimEvent::Effect {
                    id: effect.id(),
                    op: EffectOp::Play,
                });
                FaceState::Up(Some(Reveal { identity, effect }))
            }
            Err(err) => {
                log::warn!("card {}: reveal with no identity left: {err}", self.index);
                FaceState::Up(None)
            }
        }
    }

    fn enter_idle(&mut self, shared: &mut DeckShared) {
        self.state = CardState::Idle;
        shared.push_cue(self.index, CueCommand::SetMode(CueMode::Idle));
        self.start_idle_effect(shared);
        self.set_hit(true, shared);
    }

    /// Check out the ambient idle effect and anchor it under the card. The
    /// attach is immediately followed by a detach: the effect sits at the
    /// card's frame but is not parented, so it keeps playing independently.
    fn start_idle_effect(&mut self, shared: &mut DeckShared) {
        if self.idle_effect.is_some() {
            return;
        }
        let handle = shared.effects.acquire_idle(&mut shared.events);
        shared.events.push(SimEvent::Effect {
            id: handle.id(),
            op: EffectOp::AttachedTo {
                card: self.index,
                offset: IDLE_EFFECT_OFFSET,
                flipped: false,
            },
        });
        shared.events.push(SimEvent::Effect {
            id: handle.id(),
            op: EffectOp::Detached,
        });
        shared.events.push(SimEvent::Effect {
            id: handle.id(),
            op: EffectOp::Play,
        });
        self.idle_effect = Some(handle);
    }

    fn release_idle_effect(&mut self, shared: &mut DeckShared) {
        if let Some(handle) = self.idle_effect.take() {
            shared.effects.release_idle(handle, &mut shared.events);
        }
    }

    fn set_hit(&mut self, enabled: bool, shared: &mut DeckShared) {
        if self.hit_enabled != enabled {
            self.hit_enabled = enabled;
            shared.events.push(SimEvent::HitTest {
                card: self.index,
                enabled,
            });
        }
    }

    fn set_cue_playback(&mut self, enabled: bool, shared: &mut DeckShared) {
        if self.cue_playback != enabled {
            self.cue_playback = enabled;
            shared.push_cue(self.index, CueCommand::SetPlayback(enabled));
        }
    }
}
