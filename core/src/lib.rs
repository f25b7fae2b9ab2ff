#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Minotaur Labyrinth engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems react to and that adapters translate into [`Cue`]s for audio
//! playback. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Minotaur Labyrinth";

/// Number of distinct gear pieces hidden in the maze.
pub const GEAR_PIECES: u8 = 4;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that an actor start crossing into the adjacent tile.
    StepActor {
        /// Actor attempting to move.
        actor: ActorKind,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Advances both actors' motion by one frame and resolves collisions.
    Tick,
    /// Advances the release countdown by one frame.
    AdvanceClock,
    /// Requests that the Minotaur's growl for the provided band be heard.
    SoundGrowl {
        /// Proximity band that selected the growl.
        band: ProximityBand,
    },
    /// Flips the player's lantern on or off.
    ToggleLantern,
    /// Extinguishes a lit lantern without player involvement.
    ShortLantern,
    /// Ends the session at the player's request.
    Quit,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one frame.
    TimeAdvanced {
        /// Number of frames processed since the session started.
        tick: u64,
    },
    /// Confirms that an actor accepted a move and now occupies a new tile.
    ActorStepped {
        /// Actor that started moving.
        actor: ActorKind,
        /// Tile the actor occupied before the move.
        from: TileCoord,
        /// Destination tile, already owned by the actor.
        to: TileCoord,
    },
    /// Confirms that the player picked up a gear piece.
    GearCollected {
        /// Identity of the collected piece.
        gear: GearId,
        /// Tile the piece was hidden on.
        tile: TileCoord,
        /// Number of pieces collected so far, including this one.
        total: u8,
    },
    /// Announces that the final gear piece was collected.
    GearCompleted,
    /// Reports that the Minotaur caught an under-equipped player.
    PlayerCaught,
    /// Reports that the player lost a life.
    LifeLost {
        /// Lives remaining after the loss.
        remaining: u32,
    },
    /// Reports that a fully equipped player slew the Minotaur.
    MinotaurSlain,
    /// Reports that the Minotaur growled within earshot.
    Growled {
        /// Proximity band that selected the growl volume.
        band: ProximityBand,
    },
    /// Reports that the visible release countdown changed.
    CountdownChanged {
        /// Whole seconds left before the pen opens.
        seconds_left: u32,
    },
    /// Announces that the pen walls fell and the Minotaur is free.
    PenReleased,
    /// Confirms that the lantern was switched by the player.
    LanternToggled {
        /// Whether the lantern is lit after the toggle.
        lit: bool,
    },
    /// Reports that the lantern shorted out on its own.
    LanternShorted,
    /// Announces that the session reached a terminal outcome.
    SessionEnded {
        /// Outcome that ended the session.
        outcome: Outcome,
    },
}

impl Event {
    /// Maps the event to the audio cue adapters should play, if any.
    #[must_use]
    pub const fn cue(&self) -> Option<Cue> {
        match self {
            Self::ActorStepped { actor, .. } => Some(Cue::Step(*actor)),
            Self::GearCollected { .. } => Some(Cue::Pickup),
            Self::GearCompleted => Some(Cue::FullGear),
            Self::PlayerCaught => Some(Cue::Death),
            Self::LifeLost { .. } => Some(Cue::LifeLost),
            Self::MinotaurSlain => Some(Cue::MinotaurDeath),
            Self::Growled { band } => Some(Cue::Growl(*band)),
            Self::PenReleased => Some(Cue::PenReleased),
            Self::LanternToggled { .. } => Some(Cue::LanternClick),
            Self::LanternShorted => Some(Cue::LanternShock),
            Self::TimeAdvanced { .. }
            | Self::CountdownChanged { .. }
            | Self::SessionEnded { .. } => None,
        }
    }
}

/// Audio cues emitted towards the external audio player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Footstep of the provided actor.
    Step(ActorKind),
    /// A gear piece was equipped.
    Pickup,
    /// The last gear piece was equipped.
    FullGear,
    /// Minotaur growl at the band's volume.
    Growl(ProximityBand),
    /// The player was caught.
    Death,
    /// The Minotaur died.
    MinotaurDeath,
    /// A life was taken from the player.
    LifeLost,
    /// The pen opened.
    PenReleased,
    /// Lantern switch click.
    LanternClick,
    /// Lantern short-circuit.
    LanternShock,
}

/// The two actors that roam the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorKind {
    /// The player-controlled hero.
    Player,
    /// The pursuer.
    Minotaur,
}

/// Terminal outcomes that end a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The fully equipped player slew the Minotaur.
    Win,
    /// The player ran out of lives.
    Loss,
    /// The player asked to leave.
    QuitRequested,
}

/// Distance classification used to pick a growl volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProximityBand {
    /// Out of earshot, or close enough to touch.
    Silent,
    /// Within two tiles.
    Close,
    /// Within three tiles.
    Medium,
    /// Within four tiles.
    Far,
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Order in which simultaneously held directions are attempted.
    pub const INPUT_PRIORITY: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Up => 0b0001,
            Self::Down => 0b0010,
            Self::Left => 0b0100,
            Self::Right => 0b1000,
        }
    }
}

/// Set of directional signals held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldDirections(u8);

impl HeldDirections {
    /// Creates an empty set.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Returns a copy of the set that also contains `direction`.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    /// Adds `direction` to the set.
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Reports whether `direction` is held.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Reports whether no direction is held.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Held directions in [`Direction::INPUT_PRIORITY`] order.
    pub fn in_priority_order(self) -> impl Iterator<Item = Direction> {
        Direction::INPUT_PRIORITY
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

impl FromIterator<Direction> for HeldDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

/// Input sampled by an adapter for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Directional signals held this frame.
    pub held: HeldDirections,
    /// Whether the lantern toggle was pressed this frame.
    pub toggle_lantern: bool,
    /// Whether the player asked to quit this frame.
    pub quit: bool,
}

/// Location of a single maze tile expressed as column (`x`) and row (`y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    x: u32,
    y: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Adjacent tile in `direction`, or `None` when it would leave the
    /// non-negative quadrant. Upper bounds are the grid's concern.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<TileCoord> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            Direction::Down => self.y.checked_add(1).map(|y| Self::new(self.x, y)),
            Direction::Left => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
            Direction::Right => self.x.checked_add(1).map(|x| Self::new(x, self.y)),
        }
    }

    /// Straight-line distance between two tiles, measured in tiles.
    #[must_use]
    pub fn euclidean_distance(self, other: TileCoord) -> f64 {
        let dx = f64::from(self.x.abs_diff(other.x));
        let dy = f64::from(self.y.abs_diff(other.y));
        dx.hypot(dy)
    }
}

/// Continuous on-screen position of an actor, measured in pixels from the
/// maze's upper-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPosition {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl PixelPosition {
    /// Creates a pixel position from raw offsets.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Canonical pixel position of `tile` for tiles `tile_length` pixels wide.
    #[must_use]
    pub fn of_tile(tile: TileCoord, tile_length: u32) -> Self {
        let length = i64::from(tile_length);
        let x = i64::from(tile.x()) * length;
        let y = i64::from(tile.y()) * length;
        Self {
            x: i32::try_from(x).unwrap_or(i32::MAX),
            y: i32::try_from(y).unwrap_or(i32::MAX),
        }
    }

    /// Returns the position shifted `amount` pixels toward `direction`.
    #[must_use]
    pub const fn shifted(self, direction: Direction, amount: i32) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y.saturating_sub(amount)),
            Direction::Down => Self::new(self.x, self.y.saturating_add(amount)),
            Direction::Left => Self::new(self.x.saturating_sub(amount), self.y),
            Direction::Right => Self::new(self.x.saturating_add(amount), self.y),
        }
    }
}

/// Kinds of tiles that compose the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Permanent, impassable stone.
    Wall,
    /// Open floor.
    Path,
    /// Wall bounding the Minotaur's chamber until the release countdown ends.
    Pen,
    /// Open floor currently hiding a gear piece.
    ItemSlot,
}

/// Identity of one of the [`GEAR_PIECES`] collectible gear pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GearId(u8);

impl GearId {
    /// Creates a new gear identifier.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Motion state shared by every tile actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    /// Standing on a tile, ready to accept a move.
    Idle,
    /// Crossing into the tile the actor already owns.
    Moving {
        /// Direction of travel.
        direction: Direction,
        /// Frames elapsed since the move was accepted.
        progress: u32,
    },
}

/// Sprite pose within the walk cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pose {
    /// Both feet together.
    Stand,
    /// First stride.
    StrideOne,
    /// Second stride.
    StrideTwo,
}

/// Poses played over a single tile crossing.
pub const WALK_CYCLE: [Pose; 5] = [
    Pose::Stand,
    Pose::StrideOne,
    Pose::Stand,
    Pose::StrideTwo,
    Pose::Stand,
];

/// Immutable representation of a single actor's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorSnapshot {
    /// Role of the actor.
    pub kind: ActorKind,
    /// Tile owned by the actor; the destination while a move is in flight.
    pub tile: TileCoord,
    /// Rendered position, lagging `tile` during a move.
    pub pixel: PixelPosition,
    /// Direction the actor faces.
    pub facing: Direction,
    /// Current motion state.
    pub motion: Motion,
    /// Index into [`WALK_CYCLE`].
    pub frame: usize,
}

impl ActorSnapshot {
    /// Reports whether the actor can accept a new move.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.motion, Motion::Idle)
    }

    /// Pose to draw for the current animation frame.
    #[must_use]
    pub fn pose(&self) -> Pose {
        WALK_CYCLE[self.frame % WALK_CYCLE.len()]
    }
}

/// Largest accepted tile side in pixels.
///
/// Keeps pixel positions of mazes up to a million tiles across inside `i32`.
pub const MAX_TILE_LENGTH: u32 = 2048;

/// Tunable rules of a session. Defaults reproduce the classic game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Fixed simulation rate.
    pub ticks_per_second: u32,
    /// Width and height of a tile in pixels.
    pub tile_length: u32,
    /// Frames needed to cross one tile.
    pub move_ticks: u32,
    /// Frames the player must wait between directional inputs.
    pub input_cooldown_ticks: u32,
    /// Lives granted at session start.
    pub starting_lives: u32,
    /// Seconds before the pen opens.
    pub release_seconds: u32,
    /// Seconds a growl band must be sustained before the growl repeats.
    pub growl_dwell_seconds: u32,
    /// Side of the square collision box centred in each tile, in pixels.
    pub hitbox_length: u32,
    /// One-in-N chance per frame that a lit lantern shorts out; zero disables.
    pub lantern_failure_odds: u32,
    /// Half the side of the square window lit around the player, in pixels.
    /// Zero lights the whole maze.
    pub vision_radius: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            ticks_per_second: 30,
            tile_length: 50,
            move_ticks: 10,
            input_cooldown_ticks: 15,
            starting_lives: 3,
            release_seconds: 15,
            growl_dwell_seconds: 4,
            hitbox_length: 40,
            lantern_failure_odds: 100,
            vision_radius: 125,
        }
    }
}

impl Rules {
    /// Checks that the rules describe a playable session.
    ///
    /// # Errors
    ///
    /// Returns a [`RulesError`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.ticks_per_second == 0 {
            return Err(RulesError::ZeroTickRate);
        }
        if self.move_ticks == 0 {
            return Err(RulesError::ZeroMoveTicks);
        }
        if self.tile_length > MAX_TILE_LENGTH {
            return Err(RulesError::TileTooLarge {
                tile_length: self.tile_length,
            });
        }
        if self.tile_length == 0 || self.tile_length % self.move_ticks != 0 {
            return Err(RulesError::UnevenMoveStep {
                tile_length: self.tile_length,
                move_ticks: self.move_ticks,
            });
        }
        if self.hitbox_length == 0 || self.hitbox_length > self.tile_length {
            return Err(RulesError::HitboxOutOfRange {
                hitbox_length: self.hitbox_length,
                tile_length: self.tile_length,
            });
        }
        if self.starting_lives == 0 {
            return Err(RulesError::NoLives);
        }
        Ok(())
    }

    /// Pixels covered per frame while crossing a tile.
    #[must_use]
    pub fn move_step(&self) -> i32 {
        let step = self.tile_length / self.move_ticks.max(1);
        i32::try_from(step).unwrap_or(i32::MAX)
    }

    /// Frames until the pen opens.
    #[must_use]
    pub fn release_ticks(&self) -> u64 {
        u64::from(self.release_seconds) * u64::from(self.ticks_per_second)
    }

    /// Frames a growl band must be sustained before the growl repeats.
    #[must_use]
    pub fn growl_dwell_ticks(&self) -> u32 {
        self.growl_dwell_seconds.saturating_mul(self.ticks_per_second)
    }
}

/// Reasons a set of [`Rules`] is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The simulation rate must be positive.
    #[error("ticks_per_second must be positive")]
    ZeroTickRate,
    /// Moves must take at least one frame.
    #[error("move_ticks must be positive")]
    ZeroMoveTicks,
    /// Tiles must be crossed in whole-pixel steps.
    #[error("tile_length {tile_length} is not a positive multiple of move_ticks {move_ticks}")]
    UnevenMoveStep {
        /// Configured tile length.
        tile_length: u32,
        /// Configured move duration.
        move_ticks: u32,
    },
    /// Tiles wider than [`MAX_TILE_LENGTH`] would overflow pixel positions.
    #[error("tile_length {tile_length} exceeds the maximum of {max}", max = MAX_TILE_LENGTH)]
    TileTooLarge {
        /// Configured tile length.
        tile_length: u32,
    },
    /// Hitboxes must fit inside a tile.
    #[error("hitbox_length {hitbox_length} must lie within 1..={tile_length}")]
    HitboxOutOfRange {
        /// Configured hitbox side.
        hitbox_length: u32,
        /// Configured tile length.
        tile_length: u32,
    },
    /// The player must start with at least one life.
    #[error("starting_lives must be positive")]
    NoLives,
}
