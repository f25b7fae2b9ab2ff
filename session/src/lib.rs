#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-frame orchestration of the Minotaur Labyrinth.
//!
//! A [`Session`] owns the world and every system. Each call to
//! [`Session::tick`] runs one fixed-rate frame in a strict order: player
//! controls, Minotaur pursuit, motion and collisions, growl cadence, release
//! countdown, and finally lantern failures. Adapters feed input through
//! [`Session::process_input`], read the resulting [`FrameEvents`] to play
//! cues, and draw from [`Session::snapshot`].

mod ledger;

use minotaur_core::{
    ActorSnapshot, Command, Cue, Event, FrameInput, Outcome, Rules, RulesError, GEAR_PIECES,
};
use minotaur_system_controls::Controls;
use minotaur_system_lantern::{Config as LanternConfig, Lantern};
use minotaur_system_proximity::Proximity;
use minotaur_system_pursuit::Pursuit;
use minotaur_world::{self as world, query, GearItem, MazeLayout, WallDecoration, World};
use serde::Deserialize;

pub use ledger::SurvivorLedger;

const LANTERN_SEED_SALT: u64 = 0x6c61_6e74_6572_6e00;

/// Everything needed to start a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Tunable rules.
    pub rules: Rules,
    /// Seed for gear placement, stone styles and lantern failures.
    pub seed: u64,
}

/// Events produced by a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents {
    events: Vec<Event>,
}

impl FrameEvents {
    /// Iterator over the frame's events in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Audio cues the frame asks adapters to play.
    pub fn cues(&self) -> impl Iterator<Item = Cue> + '_ {
        self.events.iter().filter_map(Event::cue)
    }

    /// Reports whether nothing happened, as on frames after the session ended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consumes the batch, yielding the underlying events.
    #[must_use]
    pub fn into_vec(self) -> Vec<Event> {
        self.events
    }
}

/// Read-only picture of the session for renderers and HUDs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Width and height of a tile in pixels.
    pub tile_length: u32,
    /// Half the side of the window lit around the player; zero lights all.
    pub vision_radius: u32,
    /// Player state.
    pub player: ActorSnapshot,
    /// Minotaur state, absent once slain.
    pub minotaur: Option<ActorSnapshot>,
    /// Gear pieces carried.
    pub gear_collected: u8,
    /// Gear pieces needed to face the Minotaur.
    pub gear_total: u8,
    /// Lives left.
    pub lives: u32,
    /// Whole seconds before the pen opens.
    pub seconds_left: u32,
    /// Whether the pen has opened.
    pub pen_released: bool,
    /// Whether the player's lantern is lit.
    pub lantern_lit: bool,
    /// Terminal outcome, once reached.
    pub outcome: Option<Outcome>,
    /// Gear still hidden in the maze.
    pub items: Vec<GearItem>,
    /// Stones currently standing.
    pub stones: Vec<WallDecoration>,
    /// Frames processed so far.
    pub tick: u64,
}

/// A running game: the world plus the systems that drive it.
#[derive(Debug)]
pub struct Session {
    world: World,
    controls: Controls,
    pursuit: Pursuit,
    proximity: Proximity,
    lantern: Lantern,
    pending_input: FrameInput,
    survivor_recorded: bool,
}

impl Session {
    /// Starts a session in the classic labyrinth.
    ///
    /// # Errors
    ///
    /// Returns a [`RulesError`] when the configured rules are not playable.
    pub fn new(config: SessionConfig) -> Result<Self, RulesError> {
        Self::with_layout(config, &MazeLayout::classic())
    }

    /// Starts a session in `layout`.
    ///
    /// # Errors
    ///
    /// Returns a [`RulesError`] when the configured rules are not playable.
    pub fn with_layout(config: SessionConfig, layout: &MazeLayout) -> Result<Self, RulesError> {
        config.rules.validate()?;
        let SessionConfig { rules, seed } = config;

        tracing::info!(seed, ?rules, "starting session");
        Ok(Self {
            controls: Controls::new(rules.input_cooldown_ticks),
            pursuit: Pursuit,
            proximity: Proximity::new(rules.growl_dwell_ticks()),
            lantern: Lantern::new(LanternConfig::new(
                rules.lantern_failure_odds,
                seed ^ LANTERN_SEED_SALT,
            )),
            world: World::new(rules, layout, seed),
            pending_input: FrameInput::default(),
            survivor_recorded: false,
        })
    }

    /// Stores the input sampled for the next frame, replacing any earlier
    /// sample that was never ticked.
    pub fn process_input(&mut self, input: FrameInput) {
        self.pending_input = input;
    }

    /// Runs one frame and reports what happened.
    pub fn tick(&mut self) -> FrameEvents {
        let input = std::mem::take(&mut self.pending_input);
        if query::outcome(&self.world).is_some() {
            return FrameEvents::default();
        }

        let mut events = Vec::new();
        let mut commands = Vec::new();

        self.controls.handle(&input, &mut commands);
        self.apply_all(&mut commands, &mut events);

        let player = query::player(&self.world);
        let minotaur = query::minotaur(&self.world);
        let current = &self.world;
        self.pursuit.handle(
            minotaur.as_ref(),
            &player,
            |tile| query::is_passable(current, tile),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        world::apply(&mut self.world, Command::Tick, &mut events);

        let player = query::player(&self.world);
        let minotaur = query::minotaur(&self.world);
        self.proximity.handle(
            player.tile,
            minotaur.map(|minotaur| minotaur.tile),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        world::apply(&mut self.world, Command::AdvanceClock, &mut events);

        self.lantern
            .handle(&events, query::lantern_lit(&self.world), &mut commands);
        self.apply_all(&mut commands, &mut events);

        tracing::trace!(tick = query::tick_index(&self.world), ?events, "frame");
        FrameEvents { events }
    }

    /// Captures the state adapters need to draw the frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let world = &self.world;
        let maze = query::maze(world);
        Snapshot {
            columns: maze.columns(),
            rows: maze.rows(),
            tile_length: query::rules(world).tile_length,
            vision_radius: query::rules(world).vision_radius,
            player: query::player(world),
            minotaur: query::minotaur(world),
            gear_collected: query::gear_collected(world),
            gear_total: GEAR_PIECES,
            lives: query::lives(world),
            seconds_left: query::seconds_left(world),
            pen_released: query::pen_released(world),
            lantern_lit: query::lantern_lit(world),
            outcome: query::outcome(world),
            items: query::items(world).to_vec(),
            stones: query::decorations(world)
                .iter()
                .copied()
                .filter(|stone| query::decoration_visible(world, stone))
                .collect(),
            tick: query::tick_index(world),
        }
    }

    /// Terminal outcome, once reached.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        query::outcome(&self.world)
    }

    /// Read-only access to the underlying world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Records `name` in `ledger` if the player won and nobody has been
    /// recorded yet. Returns whether a record was written.
    ///
    /// # Errors
    ///
    /// Propagates failures reported by the ledger.
    pub fn record_survivor(
        &mut self,
        ledger: &mut dyn SurvivorLedger,
        name: &str,
    ) -> anyhow::Result<bool> {
        if self.survivor_recorded || self.outcome() != Some(Outcome::Win) {
            return Ok(false);
        }
        ledger.record(name)?;
        self.survivor_recorded = true;
        tracing::info!(name, "survivor recorded");
        Ok(true)
    }

    fn apply_all(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}
