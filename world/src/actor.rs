//! Movement and animation state machine shared by the player and the Minotaur.

use minotaur_core::{
    ActorKind, ActorSnapshot, Direction, Motion, PixelPosition, TileCoord, WALK_CYCLE,
};

use crate::maze::MazeGrid;

/// Number of frames each walk-cycle pose is held while crossing a tile.
const fn frames_per_pose(move_ticks: u32) -> u32 {
    let per_pose = move_ticks / WALK_CYCLE.len() as u32;
    if per_pose == 0 {
        1
    } else {
        per_pose
    }
}

/// Tile-bound actor that crosses one tile per accepted move.
///
/// The tile coordinate jumps to the destination as soon as a move is
/// accepted; the pixel position then catches up over `move_ticks` frames.
#[derive(Clone, Debug)]
pub(crate) struct TileActor {
    kind: ActorKind,
    tile: TileCoord,
    pixel: PixelPosition,
    facing: Direction,
    motion: Motion,
    frame: usize,
    tile_length: u32,
    move_ticks: u32,
    move_step: i32,
}

impl TileActor {
    pub(crate) fn spawn(
        kind: ActorKind,
        tile: TileCoord,
        tile_length: u32,
        move_ticks: u32,
        move_step: i32,
    ) -> Self {
        Self {
            kind,
            tile,
            pixel: PixelPosition::of_tile(tile, tile_length),
            facing: Direction::Down,
            motion: Motion::Idle,
            frame: 0,
            tile_length,
            move_ticks,
            move_step,
        }
    }

    pub(crate) const fn tile(&self) -> TileCoord {
        self.tile
    }

    pub(crate) const fn pixel(&self) -> PixelPosition {
        self.pixel
    }

    /// Starts a move toward `direction` when idle and the neighbour is open.
    /// Returns the tile that was left.
    pub(crate) fn try_move(&mut self, direction: Direction, maze: &MazeGrid) -> Option<TileCoord> {
        if self.motion != Motion::Idle {
            return None;
        }
        let target = maze.neighbor(self.tile, direction)?;
        if !maze.is_passable(target) {
            return None;
        }

        let from = self.tile;
        self.tile = target;
        self.facing = direction;
        self.motion = Motion::Moving {
            direction,
            progress: 0,
        };
        self.frame = 0;
        Some(from)
    }

    /// Advances an in-flight move by one frame.
    pub(crate) fn tick(&mut self) {
        let Motion::Moving {
            direction,
            progress,
        } = self.motion
        else {
            return;
        };

        self.pixel = self.pixel.shifted(direction, self.move_step);
        self.frame = (progress / frames_per_pose(self.move_ticks)) as usize % WALK_CYCLE.len();
        let progress = progress + 1;

        if progress >= self.move_ticks {
            self.motion = Motion::Idle;
            self.pixel = PixelPosition::of_tile(self.tile, self.tile_length);
            self.frame = 0;
        } else {
            self.motion = Motion::Moving {
                direction,
                progress,
            };
        }
    }

    /// Places the actor on `tile` at rest, discarding any move in flight.
    pub(crate) fn teleport(&mut self, tile: TileCoord) {
        self.tile = tile;
        self.pixel = PixelPosition::of_tile(tile, self.tile_length);
        self.motion = Motion::Idle;
        self.frame = 0;
    }

    pub(crate) fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            kind: self.kind,
            tile: self.tile,
            pixel: self.pixel,
            facing: self.facing,
            motion: self.motion,
            frame: self.frame,
        }
    }
}
