//! Literal maze layouts and their validation.

use minotaur_core::{TileCoord, TileKind, GEAR_PIECES};
use thiserror::Error;

/// Classic labyrinth played by default.
///
/// Glyphs: `#` wall, `.` floor, `P` pen wall, `S` player spawn,
/// `M` Minotaur spawn, `c` chamber floor around the Minotaur's spawn.
pub const CLASSIC_LAYOUT: &str = "\
################
#S...........#.#
##.#.##.###.##.#
##.#.##...#....#
#.....#.#.#.####
#.###.#.#......#
#.#...#P###.##.#
#.#.###cc##....#
#.....PMc#..#.##
#.#.####P##.#..#
###.####..#.####
###...##.##..#.#
#.#.#.#......#.#
#.#.#.#.####.#.#
#...#..........#
################";

/// Parsed maze layout ready to seed a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    columns: u32,
    rows: u32,
    tiles: Vec<TileKind>,
    chamber: Vec<TileCoord>,
    player_spawn: TileCoord,
    minotaur_spawn: TileCoord,
}

impl MazeLayout {
    /// Layout of the classic labyrinth.
    #[must_use]
    pub fn classic() -> Self {
        match Self::parse(CLASSIC_LAYOUT) {
            Ok(layout) => layout,
            Err(error) => unreachable!("classic layout is valid: {error}"),
        }
    }

    /// Parses a layout from rows of glyphs.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when the rows are ragged, a glyph is unknown,
    /// a spawn is missing or duplicated, or fewer than [`GEAR_PIECES`] tiles
    /// are eligible to hide gear.
    pub fn parse(source: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(LayoutError::Empty);
        };

        let width = first.chars().count();
        let columns = u32::try_from(width).map_err(|_| LayoutError::TooLarge)?;
        let rows = u32::try_from(lines.len()).map_err(|_| LayoutError::TooLarge)?;

        let mut tiles = Vec::with_capacity(width * lines.len());
        let mut chamber = Vec::new();
        let mut player_spawn = None;
        let mut minotaur_spawn = None;

        for (y, line) in (0..rows).zip(lines.iter()) {
            if line.chars().count() != width {
                return Err(LayoutError::RaggedRow { row: y });
            }
            for (x, glyph) in (0..columns).zip(line.chars()) {
                let tile = TileCoord::new(x, y);
                let kind = match glyph {
                    '#' => TileKind::Wall,
                    '.' => TileKind::Path,
                    'P' => TileKind::Pen,
                    'c' => {
                        chamber.push(tile);
                        TileKind::Path
                    }
                    'S' => {
                        if player_spawn.replace(tile).is_some() {
                            return Err(LayoutError::DuplicateSpawn { glyph });
                        }
                        TileKind::Path
                    }
                    'M' => {
                        if minotaur_spawn.replace(tile).is_some() {
                            return Err(LayoutError::DuplicateSpawn { glyph });
                        }
                        chamber.push(tile);
                        TileKind::Path
                    }
                    other => return Err(LayoutError::UnknownGlyph { glyph: other, tile }),
                };
                tiles.push(kind);
            }
        }

        let player_spawn = player_spawn.ok_or(LayoutError::MissingSpawn { glyph: 'S' })?;
        let minotaur_spawn = minotaur_spawn.ok_or(LayoutError::MissingSpawn { glyph: 'M' })?;

        let layout = Self {
            columns,
            rows,
            tiles,
            chamber,
            player_spawn,
            minotaur_spawn,
        };

        let eligible = layout.item_candidates().len();
        if eligible < usize::from(GEAR_PIECES) {
            return Err(LayoutError::TooFewItemSlots { eligible });
        }

        Ok(layout)
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

    /// Tile kinds in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    /// Tile the player starts and respawns on.
    #[must_use]
    pub const fn player_spawn(&self) -> TileCoord {
        self.player_spawn
    }

    /// Tile the Minotaur starts and resets on.
    #[must_use]
    pub const fn minotaur_spawn(&self) -> TileCoord {
        self.minotaur_spawn
    }

    /// Floor tiles of the Minotaur's chamber, spawn included.
    #[must_use]
    pub fn chamber(&self) -> &[TileCoord] {
        &self.chamber
    }

    /// Floor tiles allowed to hide gear, in row-major order: open floor outside
    /// the chamber and off the player's spawn row and column.
    #[must_use]
    pub fn item_candidates(&self) -> Vec<TileCoord> {
        (0..self.rows)
            .flat_map(|y| (0..self.columns).map(move |x| TileCoord::new(x, y)))
            .zip(self.tiles.iter())
            .filter(|(tile, kind)| {
                **kind == TileKind::Path
                    && !self.chamber.contains(tile)
                    && tile.x() != self.player_spawn.x()
                    && tile.y() != self.player_spawn.y()
            })
            .map(|(tile, _)| tile)
            .collect()
    }
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self::classic()
    }
}

/// Reasons a literal layout is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout contained no rows.
    #[error("layout is empty")]
    Empty,
    /// The layout does not fit the coordinate space.
    #[error("layout exceeds the addressable tile range")]
    TooLarge,
    /// A row differs in width from the first row.
    #[error("row {row} differs in width from the first row")]
    RaggedRow {
        /// Offending row index.
        row: u32,
    },
    /// A glyph outside the layout alphabet was found.
    #[error("unknown glyph {glyph:?} at {tile:?}")]
    UnknownGlyph {
        /// Offending glyph.
        glyph: char,
        /// Location of the glyph.
        tile: TileCoord,
    },
    /// A spawn glyph appears more than once.
    #[error("spawn glyph {glyph:?} appears more than once")]
    DuplicateSpawn {
        /// Duplicated glyph.
        glyph: char,
    },
    /// A spawn glyph is absent.
    #[error("spawn glyph {glyph:?} is missing")]
    MissingSpawn {
        /// Missing glyph.
        glyph: char,
    },
    /// Not enough floor is eligible to hide every gear piece.
    #[error("only {eligible} tiles can hide gear")]
    TooFewItemSlots {
        /// Number of eligible tiles found.
        eligible: usize,
    },
}
