//! Tile classification, the releasable pen, and hidden gear.

use minotaur_core::{Direction, GearId, TileCoord, TileKind, GEAR_PIECES};
use rand::{seq::SliceRandom, Rng};

use crate::layout::MazeLayout;

const STONE_STYLES: u8 = 4;

/// Authoritative tile grid of the labyrinth.
///
/// Only two mutations exist: the one-time pen release and gear placement and
/// collection. Every other tile keeps its kind for the whole session.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<TileKind>,
    pen: Vec<TileCoord>,
    pen_released: bool,
}

impl MazeGrid {
    /// Builds the grid described by `layout`.
    #[must_use]
    pub fn from_layout(layout: &MazeLayout) -> Self {
        let tiles = layout.tiles().to_vec();
        let pen = tiles_of_kind(layout.columns(), &tiles, TileKind::Pen);
        Self {
            columns: layout.columns(),
            rows: layout.rows(),
            tiles,
            pen,
            pen_released: false,
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether `tile` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, tile: TileCoord) -> bool {
        tile.x() < self.columns && tile.y() < self.rows
    }

    /// Kind of the tile at `tile`.
    ///
    /// # Panics
    ///
    /// Panics when `tile` lies outside the grid; callers bounds-check first.
    #[must_use]
    pub fn tile_kind(&self, tile: TileCoord) -> TileKind {
        self.tiles[self.index(tile)]
    }

    /// Reports whether an actor may stand on `tile`.
    ///
    /// # Panics
    ///
    /// Panics when `tile` lies outside the grid.
    #[must_use]
    pub fn is_passable(&self, tile: TileCoord) -> bool {
        matches!(self.tile_kind(tile), TileKind::Path | TileKind::ItemSlot)
    }

    /// Adjacent in-bounds tile in `direction`.
    #[must_use]
    pub fn neighbor(&self, tile: TileCoord, direction: Direction) -> Option<TileCoord> {
        tile.step(direction).filter(|next| self.contains(*next))
    }

    /// Tiles that formed the pen, in row-major order.
    #[must_use]
    pub fn pen_tiles(&self) -> &[TileCoord] {
        &self.pen
    }

    /// Reports whether the pen has been opened.
    #[must_use]
    pub const fn pen_released(&self) -> bool {
        self.pen_released
    }

    /// Converts every pen tile into floor. Returns `false` when the pen was
    /// already open, in which case nothing changes.
    pub fn release_pen(&mut self) -> bool {
        if self.pen_released {
            return false;
        }
        for index in 0..self.pen.len() {
            let slot = self.index(self.pen[index]);
            self.tiles[slot] = TileKind::Path;
        }
        self.pen_released = true;
        true
    }

    /// Hides every gear piece on a distinct tile drawn from `candidates`.
    ///
    /// Sampling shuffles the eligible set instead of rejecting random draws,
    /// so placement always terminates.
    ///
    /// # Panics
    ///
    /// Panics when fewer than [`GEAR_PIECES`] candidates are open floor.
    pub(crate) fn place_items<R: Rng>(
        &mut self,
        candidates: &[TileCoord],
        rng: &mut R,
    ) -> Vec<GearItem> {
        let mut eligible: Vec<TileCoord> = candidates
            .iter()
            .copied()
            .filter(|tile| self.contains(*tile) && self.tile_kind(*tile) == TileKind::Path)
            .collect();
        assert!(
            eligible.len() >= usize::from(GEAR_PIECES),
            "only {} of the item candidates are open floor, {GEAR_PIECES} needed",
            eligible.len()
        );
        eligible.shuffle(rng);

        let mut items = Vec::with_capacity(usize::from(GEAR_PIECES));
        for (value, tile) in (0..GEAR_PIECES).zip(eligible) {
            let slot = self.index(tile);
            self.tiles[slot] = TileKind::ItemSlot;
            items.push(GearItem {
                gear: GearId::new(value),
                tile,
            });
        }
        items
    }

    /// Returns an item slot to plain floor once its gear is picked up.
    pub(crate) fn clear_item(&mut self, tile: TileCoord) {
        let slot = self.index(tile);
        if self.tiles[slot] == TileKind::ItemSlot {
            self.tiles[slot] = TileKind::Path;
        }
    }

    /// Builds one decoration per wall or pen tile.
    pub(crate) fn decorations<R: Rng>(&self, rng: &mut R) -> Vec<WallDecoration> {
        let mut decorations = Vec::new();
        for y in 0..self.rows {
            for x in 0..self.columns {
                let tile = TileCoord::new(x, y);
                let disappearing = match self.tile_kind(tile) {
                    TileKind::Wall => false,
                    TileKind::Pen => true,
                    TileKind::Path | TileKind::ItemSlot => continue,
                };
                decorations.push(WallDecoration {
                    tile,
                    style: rng.gen_range(0..STONE_STYLES),
                    disappearing,
                });
            }
        }
        decorations
    }

    fn index(&self, tile: TileCoord) -> usize {
        assert!(
            self.contains(tile),
            "tile {tile:?} lies outside the {}x{} maze",
            self.columns,
            self.rows
        );
        tile.y() as usize * self.columns as usize + tile.x() as usize
    }
}

/// Gear piece hidden on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GearItem {
    /// Identity of the piece.
    pub gear: GearId,
    /// Tile the piece is hidden on.
    pub tile: TileCoord,
}

/// Stone block drawn over a wall or pen tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallDecoration {
    /// Tile the stone covers.
    pub tile: TileCoord,
    /// Texture variant chosen for the stone.
    pub style: u8,
    /// Whether the stone vanishes when the pen opens.
    pub disappearing: bool,
}

fn tiles_of_kind(columns: u32, tiles: &[TileKind], wanted: TileKind) -> Vec<TileCoord> {
    let width = columns as usize;
    tiles
        .iter()
        .enumerate()
        .filter(|(_, kind)| **kind == wanted)
        .filter_map(|(index, _)| {
            let x = u32::try_from(index % width).ok()?;
            let y = u32::try_from(index / width).ok()?;
            Some(TileCoord::new(x, y))
        })
        .collect()
}
