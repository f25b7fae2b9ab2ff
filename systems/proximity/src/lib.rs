#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Proximity classification and growl cadence.

use minotaur_core::{Command, ProximityBand, TileCoord};

/// Classifies the straight-line tile distance between two actors.
///
/// Actors at most one tile apart are as silent as actors out of earshot.
#[must_use]
pub fn classify(a: TileCoord, b: TileCoord) -> ProximityBand {
    let distance = a.euclidean_distance(b);
    if distance <= 1.0 || distance > 4.0 {
        ProximityBand::Silent
    } else if distance <= 2.0 {
        ProximityBand::Close
    } else if distance <= 3.0 {
        ProximityBand::Medium
    } else {
        ProximityBand::Far
    }
}

/// Pure system that decides when the Minotaur growls.
///
/// A growl sounds on the first frame of a band; while any audible band holds,
/// the growl repeats once every `dwell_ticks` frames. Silence resets the
/// cadence.
#[derive(Debug)]
pub struct Proximity {
    dwell_ticks: u32,
    counter: u32,
}

impl Proximity {
    /// Creates the system with the supplied repeat interval.
    #[must_use]
    pub const fn new(dwell_ticks: u32) -> Self {
        Self {
            dwell_ticks,
            counter: 0,
        }
    }

    /// Classifies the actors' distance for this frame and emits a growl
    /// request when the cadence allows one.
    pub fn handle(
        &mut self,
        player: TileCoord,
        minotaur: Option<TileCoord>,
        out: &mut Vec<Command>,
    ) {
        let band = minotaur.map_or(ProximityBand::Silent, |minotaur| classify(player, minotaur));

        if band != ProximityBand::Silent && self.counter == 0 {
            out.push(Command::SoundGrowl { band });
        }
        self.counter = self.counter.saturating_add(1);
        if self.counter >= self.dwell_ticks || band == ProximityBand::Silent {
            self.counter = 0;
        }
    }
}
