//! Headless demo: runs one scripted pack-opening session and prints the
//! resulting event traffic. Useful for eyeballing choreography timing and
//! for piping the summary into other tools.
//!
//! ```sh
//! RUST_LOG=info cargo run -- [seed]
//! ```

use pack_reveal::sim::{Deck, DeckConfig, SimEvent};
use serde::Serialize;

const DT: f32 = 1.0 / 60.0;

#[derive(Default, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    total_events: usize,
    menu_codes: Vec<i32>,
    reveals: Vec<String>,
    effects_spawned: usize,
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let mut deck = Deck::new(DeckConfig {
        seed,
        ..DeckConfig::default()
    });
    let mut summary = RunSummary {
        seed,
        ..RunSummary::default()
    };

    // Script: open the pack, reveal and dismiss two cards, then restart.
    deck.start_sequence();
    advance(&mut deck, &mut summary, 8.0);
    for card in [0, 3] {
        deck.pointer_enter(card);
        deck.pointer_press(card);
        advance(&mut deck, &mut summary, 5.0);
        deck.pointer_press(card);
        advance(&mut deck, &mut summary, 5.0);
    }
    deck.pointer_press(1);
    advance(&mut deck, &mut summary, 1.0);
    deck.restart_all();
    advance(&mut deck, &mut summary, 8.0);

    log::info!("final phase: {:?}", deck.phase());
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
}

/// Tick the deck for `secs`, draining events into the summary as we go
fn advance(deck: &mut Deck, summary: &mut RunSummary, secs: f32) {
    let ticks = (secs / DT).ceil() as u64;
    for _ in 0..ticks {
        deck.tick(DT);
        summary.frames += 1;
        for event in deck.drain_events() {
            summary.total_events += 1;
            match &event {
                SimEvent::Menu(signal) => {
                    log::info!("menu -> {}", signal.code());
                    summary.menu_codes.push(signal.code());
                }
                SimEvent::ArtApplied { card, identity } => {
                    log::info!(
                        "card {card} reveals artwork {} ({} stars)",
                        identity.artwork.0,
                        identity.rarity
                    );
                    summary
                        .reveals
                        .push(format!("card {card}: artwork {}", identity.artwork.0));
                }
                SimEvent::Effect { id, op } => {
                    log::debug!("effect {:?}: {op:?}", id);
                    if matches!(op, pack_reveal::sim::EffectOp::Spawned { .. }) {
                        summary.effects_spawned += 1;
                    }
                }
                other => log::debug!("{other:?}"),
            }
        }
    }
}
