#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Minotaur Labyrinth.

mod actor;
mod layout;
mod maze;
mod release;

use minotaur_core::{
    ActorKind, Command, Direction, Event, Outcome, PixelPosition, ProximityBand, Rules,
    TileCoord, GEAR_PIECES, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{actor::TileActor, release::ReleaseClock};

pub use layout::{LayoutError, MazeLayout, CLASSIC_LAYOUT};
pub use maze::{GearItem, MazeGrid, WallDecoration};

/// Represents the authoritative Minotaur Labyrinth world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: Rules,
    maze: MazeGrid,
    decorations: Vec<WallDecoration>,
    items: Vec<GearItem>,
    player: TileActor,
    minotaur: TileActor,
    minotaur_alive: bool,
    player_spawn: TileCoord,
    minotaur_spawn: TileCoord,
    gear_collected: u8,
    lives: u32,
    encounter_guard: bool,
    clock: ReleaseClock,
    lantern_lit: bool,
    outcome: Option<Outcome>,
    tick_index: u64,
}

impl World {
    /// Creates a world for `layout`, hiding gear and styling walls with a
    /// generator seeded from `seed`.
    ///
    /// `rules` are expected to have passed [`Rules::validate`].
    #[must_use]
    pub fn new(rules: Rules, layout: &MazeLayout, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut maze = MazeGrid::from_layout(layout);
        let items = maze.place_items(&layout.item_candidates(), &mut rng);
        let decorations = maze.decorations(&mut rng);
        let spawn_actor = |kind, tile| {
            TileActor::spawn(
                kind,
                tile,
                rules.tile_length,
                rules.move_ticks,
                rules.move_step(),
            )
        };
        let player = spawn_actor(ActorKind::Player, layout.player_spawn());
        let minotaur = spawn_actor(ActorKind::Minotaur, layout.minotaur_spawn());

        tracing::debug!(
            seed,
            items = ?items.iter().map(|item| item.tile).collect::<Vec<_>>(),
            "world created"
        );

        Self {
            banner: WELCOME_BANNER,
            clock: ReleaseClock::new(rules.ticks_per_second, rules.release_seconds),
            lives: rules.starting_lives,
            maze,
            decorations,
            items,
            player,
            minotaur,
            minotaur_alive: true,
            player_spawn: layout.player_spawn(),
            minotaur_spawn: layout.minotaur_spawn(),
            gear_collected: 0,
            encounter_guard: false,
            lantern_lit: true,
            outcome: None,
            tick_index: 0,
            rules,
        }
    }

    fn hitboxes_overlap(&self, a: PixelPosition, b: PixelPosition) -> bool {
        let reach = i64::from(self.rules.hitbox_length);
        let dx = (i64::from(a.x) - i64::from(b.x)).abs();
        let dy = (i64::from(a.y) - i64::from(b.y)).abs();
        dx < reach && dy < reach
    }

    fn end(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        self.outcome = Some(outcome);
        tracing::info!(?outcome, tick = self.tick_index, "session ended");
        out_events.push(Event::SessionEnded { outcome });
    }

    fn step_actor(&mut self, actor: ActorKind, direction: Direction) -> Option<Event> {
        let mover = match actor {
            ActorKind::Player => &mut self.player,
            ActorKind::Minotaur if self.minotaur_alive => &mut self.minotaur,
            ActorKind::Minotaur => return None,
        };
        let from = mover.try_move(direction, &self.maze)?;
        Some(Event::ActorStepped {
            actor,
            from,
            to: mover.tile(),
        })
    }

    fn collect_gear(&mut self, out_events: &mut Vec<Event>) {
        let player = self.player.pixel();
        let tile_length = self.rules.tile_length;
        let (touched, remaining): (Vec<GearItem>, Vec<GearItem>) =
            self.items.iter().copied().partition(|item| {
                self.hitboxes_overlap(player, PixelPosition::of_tile(item.tile, tile_length))
            });
        self.items = remaining;

        for item in touched {
            self.maze.clear_item(item.tile);
            self.gear_collected = self.gear_collected.saturating_add(1).min(GEAR_PIECES);
            tracing::debug!(gear = item.gear.get(), total = self.gear_collected, "gear collected");
            out_events.push(Event::GearCollected {
                gear: item.gear,
                tile: item.tile,
                total: self.gear_collected,
            });
            if self.gear_collected == GEAR_PIECES {
                out_events.push(Event::GearCompleted);
            }
        }
    }

    fn resolve_encounter(&mut self, out_events: &mut Vec<Event>) {
        if !self.minotaur_alive {
            return;
        }
        if !self.hitboxes_overlap(self.player.pixel(), self.minotaur.pixel()) {
            self.encounter_guard = false;
            return;
        }

        if self.gear_collected >= GEAR_PIECES {
            self.minotaur_alive = false;
            out_events.push(Event::MinotaurSlain);
            self.end(Outcome::Win, out_events);
            return;
        }
        if self.encounter_guard {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.encounter_guard = true;
        self.player.teleport(self.player_spawn);
        self.minotaur.teleport(self.minotaur_spawn);
        tracing::info!(remaining = self.lives, "player caught");
        out_events.push(Event::PlayerCaught);
        out_events.push(Event::LifeLost {
            remaining: self.lives,
        });
    }

    fn advance_clock(&mut self, out_events: &mut Vec<Event>) {
        let before = self.clock.seconds_left();
        self.clock.advance();
        let after = self.clock.seconds_left();
        if after != before {
            out_events.push(Event::CountdownChanged { seconds_left: after });
        }
        if self.clock.expired() && self.maze.release_pen() {
            tracing::info!(tick = self.tick_index, "pen released");
            out_events.push(Event::PenReleased);
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once an outcome has been reached every command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }

    match command {
        Command::StepActor { actor, direction } => {
            if let Some(event) = world.step_actor(actor, direction) {
                out_events.push(event);
            }
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });

            world.player.tick();
            if world.minotaur_alive {
                world.minotaur.tick();
            }
            world.collect_gear(out_events);
            world.resolve_encounter(out_events);

            if world.lives == 0 && world.outcome.is_none() {
                world.end(Outcome::Loss, out_events);
            }
        }
        Command::AdvanceClock => world.advance_clock(out_events),
        Command::SoundGrowl { band } => {
            if world.minotaur_alive && band != ProximityBand::Silent {
                out_events.push(Event::Growled { band });
            }
        }
        Command::ToggleLantern => {
            world.lantern_lit = !world.lantern_lit;
            out_events.push(Event::LanternToggled {
                lit: world.lantern_lit,
            });
        }
        Command::ShortLantern => {
            if world.lantern_lit {
                world.lantern_lit = false;
                tracing::debug!(tick = world.tick_index, "lantern shorted");
                out_events.push(Event::LanternShorted);
            }
        }
        Command::Quit => world.end(Outcome::QuitRequested, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{GearItem, MazeGrid, WallDecoration, World};
    use minotaur_core::{ActorSnapshot, Outcome, Rules, TileCoord};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Rules the world was created with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Provides read-only access to the tile grid.
    #[must_use]
    pub fn maze(world: &World) -> &MazeGrid {
        &world.maze
    }

    /// Reports whether `tile` is inside the grid and open to actors.
    #[must_use]
    pub fn is_passable(world: &World, tile: TileCoord) -> bool {
        world.maze.contains(tile) && world.maze.is_passable(tile)
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> ActorSnapshot {
        world.player.snapshot()
    }

    /// Captures the Minotaur's state, or `None` once it has been slain.
    #[must_use]
    pub fn minotaur(world: &World) -> Option<ActorSnapshot> {
        world.minotaur_alive.then(|| world.minotaur.snapshot())
    }

    /// Gear pieces still hidden in the maze.
    #[must_use]
    pub fn items(world: &World) -> &[GearItem] {
        &world.items
    }

    /// Every stone decoration, visible or not.
    #[must_use]
    pub fn decorations(world: &World) -> &[WallDecoration] {
        &world.decorations
    }

    /// Reports whether `decoration` should still be drawn. Disappearing stones
    /// vanish on the frame the pen opens.
    #[must_use]
    pub fn decoration_visible(world: &World, decoration: &WallDecoration) -> bool {
        !decoration.disappearing || world.clock.ticks_until_release() > 0
    }

    /// Number of gear pieces the player carries.
    #[must_use]
    pub fn gear_collected(world: &World) -> u8 {
        world.gear_collected
    }

    /// Lives the player has left.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Whole seconds before the pen opens.
    #[must_use]
    pub fn seconds_left(world: &World) -> u32 {
        world.clock.seconds_left()
    }

    /// Reports whether the pen has been opened.
    #[must_use]
    pub fn pen_released(world: &World) -> bool {
        world.maze.pen_released()
    }

    /// Reports whether the player's lantern is lit.
    #[must_use]
    pub fn lantern_lit(world: &World) -> bool {
        world.lantern_lit
    }

    /// Terminal outcome, once reached.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Number of frames processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
