#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering and audio contracts for Minotaur Labyrinth adapters.
//!
//! Backends never see the world. They receive a declarative [`Scene`], report
//! the [`FrameInput`] they sampled, and let the caller mutate the scene once
//! per fixed-rate frame.

use anyhow::Result as AnyResult;
use glam::Vec2;
use minotaur_core::{ActorKind, Cue, Direction, FrameInput, Pose};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Describes the square tile grid the maze is drawn on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
    /// Color of open floor.
    pub floor_color: Color,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when the grid would have no visible area.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        floor_color: Color,
    ) -> Result<Self, RenderingError> {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyGrid { columns, rows });
        }
        if !(tile_length.is_finite() && tile_length > 0.0) {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            floor_color,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }
}

/// Stone block covering a wall tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StonePresentation {
    /// Upper-left corner in world units.
    pub position: Vec2,
    /// Texture variant.
    pub style: u8,
}

/// Gear piece still waiting to be found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPresentation {
    /// Upper-left corner of the item's tile in world units.
    pub position: Vec2,
}

/// Actor drawn at its animated position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPresentation {
    /// Which actor to draw.
    pub kind: ActorKind,
    /// Upper-left corner in world units.
    pub position: Vec2,
    /// Direction the sprite faces.
    pub facing: Direction,
    /// Walk-cycle pose.
    pub pose: Pose,
}

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskRect {
    /// Upper-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

/// Square window of the maze the player can see while the lantern is lit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisionWindow {
    /// Centre of the window, normally the centre of the player's sprite.
    pub center: Vec2,
    /// Half the side of the window.
    pub half_extent: f32,
}

impl VisionWindow {
    /// Creates a window of side `2 * half_extent` around `center`.
    #[must_use]
    pub const fn new(center: Vec2, half_extent: f32) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Reports whether `point` lies inside the window.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let offset = (point - self.center).abs();
        offset.x <= self.half_extent && offset.y <= self.half_extent
    }

    /// Rectangles covering every part of `grid` outside the window.
    ///
    /// Bands above and below span the full width; the side bands fill the
    /// rows the window occupies. Empty bands are omitted.
    #[must_use]
    pub fn occluders(&self, grid: &TileGridPresentation) -> Vec<MaskRect> {
        let width = grid.width();
        let height = grid.height();
        let bounds = Vec2::new(width, height);
        let reach = Vec2::splat(self.half_extent);
        let min = (self.center - reach).clamp(Vec2::ZERO, bounds);
        let max = (self.center + reach).clamp(Vec2::ZERO, bounds);

        [
            MaskRect {
                origin: Vec2::ZERO,
                size: Vec2::new(width, min.y),
            },
            MaskRect {
                origin: Vec2::new(0.0, max.y),
                size: Vec2::new(width, height - max.y),
            },
            MaskRect {
                origin: Vec2::new(0.0, min.y),
                size: Vec2::new(min.x, max.y - min.y),
            },
            MaskRect {
                origin: Vec2::new(max.x, min.y),
                size: Vec2::new(width - max.x, max.y - min.y),
            },
        ]
        .into_iter()
        .filter(|rect| rect.size.x > 0.0 && rect.size.y > 0.0)
        .collect()
    }
}

/// Heads-up display values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Gear pieces carried.
    pub gear_collected: u8,
    /// Gear pieces in the maze.
    pub gear_total: u8,
    /// Lives left.
    pub lives: u32,
    /// Whole seconds before the Minotaur is released.
    pub seconds_left: u32,
    /// Whether the Minotaur roams free.
    pub released: bool,
}

impl HudPresentation {
    /// Text lines shown in the HUD, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let countdown = if self.released {
            "He has been released".to_owned()
        } else {
            format!("Release in {}", self.seconds_left)
        };
        vec![
            format!("Gear {}/{}", self.gear_collected, self.gear_total),
            format!("Lives {}", self.lives),
            countdown,
        ]
    }
}

/// Scene description combining the maze, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Stones currently standing.
    pub stones: Vec<StonePresentation>,
    /// Gear still hidden in the maze.
    pub items: Vec<ItemPresentation>,
    /// Actors in draw order.
    pub actors: Vec<ActorPresentation>,
    /// Heads-up display values.
    pub hud: HudPresentation,
    /// Whether the lantern is out and the maze should be drawn dark.
    pub darkness: bool,
    /// Part of the maze visible while the lantern is lit; `None` shows it all.
    pub vision: Option<VisionWindow>,
    /// Message covering the maze once the session ends.
    pub banner: Option<String>,
}

impl Scene {
    /// Creates a scene without inhabitants.
    #[must_use]
    pub fn new(tile_grid: TileGridPresentation, hud: HudPresentation) -> Self {
        Self {
            tile_grid,
            stones: Vec::new(),
            items: Vec::new(),
            actors: Vec::new(),
            hud,
            darkness: false,
            vision: None,
            banner: None,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Fixed rate at which the scene is updated.
    pub ticks_per_second: u32,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, ticks_per_second: u32, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            ticks_per_second,
            scene,
        }
    }
}

/// Whether a backend should keep presenting after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneFlow {
    /// Keep running.
    Continue,
    /// Close the window.
    Exit,
}

/// Rendering backend capable of presenting Minotaur Labyrinth scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// `update_scene` is called exactly `ticks_per_second` times per second of
    /// wall time with the input sampled since the previous call, and may
    /// mutate the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> SceneFlow + 'static;
}

/// Sink for the audio cues emitted by a session.
pub trait CuePlayer {
    /// Plays `cue`. Cues that cannot be played are skipped.
    fn play(&mut self, cue: Cue);
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The grid needs at least one row and one column.
    EmptyGrid {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
    /// Tiles must have a positive, finite side length.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { columns, rows } => {
                write!(f, "grid must not be empty (received {columns}x{rows})")
            }
            Self::InvalidTileLength { tile_length } => {
                write!(
                    f,
                    "tile_length must be positive and finite (received {tile_length})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_grid_creation_accepts_positive_dimensions() {
        let grid = TileGridPresentation::new(16, 16, 50.0, Color::from_rgb_u8(0, 0, 0))
            .expect("valid grid");

        assert_eq!(grid.width(), 800.0);
        assert_eq!(grid.height(), 800.0);
    }

    #[test]
    fn tile_grid_creation_rejects_degenerate_tiles_without_panicking() {
        let error = TileGridPresentation::new(16, 16, 0.0, Color::from_rgb_u8(0, 0, 0))
            .expect_err("zero tile length must be rejected");
        assert!(matches!(error, RenderingError::InvalidTileLength { .. }));

        let error = TileGridPresentation::new(0, 16, 50.0, Color::from_rgb_u8(0, 0, 0))
            .expect_err("empty grid must be rejected");
        assert_eq!(error, RenderingError::EmptyGrid { columns: 0, rows: 16 });
    }

    #[test]
    fn hud_counts_down_then_announces_the_release() {
        let mut hud = HudPresentation {
            gear_collected: 2,
            gear_total: 4,
            lives: 3,
            seconds_left: 12,
            released: false,
        };
        assert_eq!(hud.lines(), vec!["Gear 2/4", "Lives 3", "Release in 12"]);

        hud.seconds_left = 0;
        hud.released = true;
        assert_eq!(hud.lines()[2], "He has been released");
    }

    fn grid() -> TileGridPresentation {
        TileGridPresentation::new(16, 16, 50.0, Color::from_rgb_u8(0, 0, 0)).expect("valid grid")
    }

    #[test]
    fn vision_window_masks_everything_around_it() {
        let window = VisionWindow::new(Vec2::new(400.0, 400.0), 125.0);

        let occluders = window.occluders(&grid());

        assert_eq!(
            occluders,
            vec![
                MaskRect {
                    origin: Vec2::ZERO,
                    size: Vec2::new(800.0, 275.0),
                },
                MaskRect {
                    origin: Vec2::new(0.0, 525.0),
                    size: Vec2::new(800.0, 275.0),
                },
                MaskRect {
                    origin: Vec2::new(0.0, 275.0),
                    size: Vec2::new(275.0, 250.0),
                },
                MaskRect {
                    origin: Vec2::new(525.0, 275.0),
                    size: Vec2::new(275.0, 250.0),
                },
            ]
        );
        let covered: f32 = occluders.iter().map(|rect| rect.size.x * rect.size.y).sum();
        assert_eq!(covered, 800.0 * 800.0 - 250.0 * 250.0);
    }

    #[test]
    fn vision_window_in_a_corner_drops_empty_bands() {
        let window = VisionWindow::new(Vec2::new(75.0, 75.0), 125.0);

        let occluders = window.occluders(&grid());

        assert_eq!(occluders.len(), 2);
        assert!(window.contains(Vec2::new(0.0, 0.0)));
        assert!(window.contains(Vec2::new(200.0, 200.0)));
        assert!(!window.contains(Vec2::new(201.0, 75.0)));
        for rect in &occluders {
            assert!(!window.contains(rect.origin + rect.size * 0.5));
        }
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);
        assert_eq!(color, Color::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(color.with_alpha(0.25).alpha, 0.25);
    }
}
