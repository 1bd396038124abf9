//! Simulation event stream
//!
//! The sim never touches engine objects directly. Every externally visible
//! side effect - menu signals, animation cues, effect-resource operations,
//! card-face changes, hit-test toggles - is appended to an ordered event list
//! the host drains once per frame and replays against its own scene.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::effects::{EffectId, EffectKey};
use super::identity::CardVisualIdentity;

/// Integer-coded commands for the menu animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuSignal {
    /// Hide the menu while the pack enters
    StartHide,
    /// Menu at rest
    Idle,
    /// Cards are laid out and ready to reveal
    RevealReady,
    /// Restart requested, cards returning to the pack
    Restart,
}

impl MenuSignal {
    /// Wire code understood by the menu animator
    pub fn code(self) -> i32 {
        match self {
            MenuSignal::StartHide => -1,
            MenuSignal::Idle => 1,
            MenuSignal::RevealReady => 2,
            MenuSignal::Restart => 3,
        }
    }
}

/// Animation-cue modes for a card's cue player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueMode {
    Entry,
    Idle,
    HoverIn,
    HoverOut,
}

impl CueMode {
    /// Wire code understood by the cue player
    pub fn code(self) -> i32 {
        match self {
            CueMode::Entry => 0,
            CueMode::Idle => 1,
            CueMode::HoverIn => 2,
            CueMode::HoverOut => 3,
        }
    }
}

/// Commands for a card's animation-cue player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CueCommand {
    SetMode(CueMode),
    /// Play a named cue immediately
    Play(String),
    /// Enable or disable cue playback entirely
    SetPlayback(bool),
}

/// Commands for the card-pack visual
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PackCommand {
    /// Instantiate the pack at the given position (first sequence only)
    Spawn { position: Vec3 },
    Activate,
    Deactivate,
    /// Animation direction: 1 entering, -1 leaving
    SetDirection(i8),
    /// Follow the scripted entry path over `secs` (reversed on the way out)
    FollowPath { reversed: bool, secs: f32 },
}

/// Lifecycle operations on a pooled effect instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectOp {
    /// A fresh instance was created for this resource key
    Spawned { key: EffectKey },
    Activated,
    Deactivated,
    /// Anchor to a card's spatial frame at a local offset.
    /// `flipped` orients the effect toward the revealed face.
    AttachedTo {
        card: usize,
        offset: Vec3,
        flipped: bool,
    },
    Detached,
    /// Start visual output (including sub-effects)
    Play,
    /// Stop visual output (including sub-effects)
    Stop,
}

/// One externally visible side effect of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Menu(MenuSignal),
    Pack(PackCommand),
    Cue { card: usize, cmd: CueCommand },
    Effect { id: EffectId, op: EffectOp },
    ArtApplied {
        card: usize,
        identity: CardVisualIdentity,
    },
    ArtCleared { card: usize },
    HitTest { card: usize, enabled: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_codes_match_wire_protocol() {
        assert_eq!(MenuSignal::StartHide.code(), -1);
        assert_eq!(MenuSignal::Idle.code(), 1);
        assert_eq!(MenuSignal::RevealReady.code(), 2);
        assert_eq!(MenuSignal::Restart.code(), 3);
    }

    #[test]
    fn test_cue_codes_match_wire_protocol() {
        assert_eq!(CueMode::Entry.code(), 0);
        assert_eq!(CueMode::Idle.code(), 1);
        assert_eq!(CueMode::HoverIn.code(), 2);
        assert_eq!(CueMode::HoverOut.code(), 3);
    }
}
