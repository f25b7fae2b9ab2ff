#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the Minotaur Labyrinth.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Cues are therefore handed to a [`CuePlayer`]
//! chosen by the caller instead of being played here.
//!
//! [`CuePlayer`]: minotaur_rendering::CuePlayer

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use minotaur_core::{ActorKind, Direction, FrameInput, HeldDirections, Pose};
use minotaur_rendering::{
    ActorPresentation, Color, Presentation, RenderingBackend, Scene, SceneFlow,
};
use std::time::Duration;

const HUD_FONT_SIZE: f32 = 28.0;
const BANNER_FONT_SIZE: f32 = 56.0;
const MAX_TICKS_PER_FRAME: u32 = 5;

const STONE_PALETTE: [Color; 4] = [
    Color::from_rgb_u8(0x5a, 0x52, 0x4a),
    Color::from_rgb_u8(0x63, 0x5b, 0x50),
    Color::from_rgb_u8(0x4f, 0x49, 0x44),
    Color::from_rgb_u8(0x6b, 0x60, 0x55),
];
const ITEM_COLOR: Color = Color::from_rgb_u8(0xd4, 0xaf, 0x37);
const PLAYER_COLOR: Color = Color::from_rgb_u8(0x3a, 0x7b, 0xd5);
const MINOTAUR_COLOR: Color = Color::from_rgb_u8(0x8b, 0x1e, 0x1e);
const HUD_COLOR: Color = Color::from_rgb_u8(0xf0, 0xe6, 0xd2);

/// Accumulates presses between fixed-rate updates so that a press landing on
/// a frame without an update is not lost.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct InputLatch {
    held: HeldDirections,
    toggle_lantern: bool,
    quit: bool,
}

impl InputLatch {
    /// Records one render frame's worth of keyboard state.
    pub fn register(&mut self, sample: FrameInput) {
        self.held = sample.held;
        self.toggle_lantern |= sample.toggle_lantern;
        self.quit |= sample.quit;
    }

    /// Yields the input for the next update and clears latched presses.
    /// Held directions stay held until the keys are released.
    pub fn take(&mut self) -> FrameInput {
        let input = FrameInput {
            held: self.held,
            toggle_lantern: self.toggle_lantern,
            quit: self.quit,
        };
        self.toggle_lantern = false;
        self.quit = false;
        input
    }
}

/// Converts wall-clock frame times into a whole number of fixed updates.
#[doc(hidden)]
#[derive(Clone, Copy, Debug)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
}

impl FixedStep {
    /// Creates a stepper running `ticks_per_second` updates per second.
    #[must_use]
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / ticks_per_second.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Adds `elapsed` wall time and returns how many updates are due. Long
    /// stalls are capped so the simulation never tries to catch up in one go.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(elapsed);
        let mut due = 0;
        while self.accumulator >= self.step && due < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.step;
            due += 1;
        }
        if due == MAX_TICKS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }
        due
    }
}

fn poll_keyboard() -> FrameInput {
    let bindings = [
        (KeyCode::Down, Direction::Down),
        (KeyCode::Up, Direction::Up),
        (KeyCode::Right, Direction::Right),
        (KeyCode::Left, Direction::Left),
    ];
    let held = bindings
        .into_iter()
        .filter(|(key, _)| is_key_down(*key))
        .map(|(_, direction)| direction)
        .collect();

    FrameInput {
        held,
        toggle_lantern: is_key_pressed(KeyCode::Space),
        quit: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> SceneFlow + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            ticks_per_second,
            scene,
        } = presentation;

        let side = scene.tile_grid.width().max(scene.tile_grid.height());
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: side as i32,
            window_height: side as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut latch = InputLatch::default();
            let mut stepper = FixedStep::new(ticks_per_second);
            let background = to_macroquad_color(clear_color);

            'frames: loop {
                latch.register(poll_keyboard());

                let elapsed = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                for _ in 0..stepper.advance(elapsed) {
                    if update_scene(latch.take(), &mut scene) == SceneFlow::Exit {
                        break 'frames;
                    }
                }

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_scene(&scene, &metrics);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    tile_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let tile_grid = scene.tile_grid;
        let world_width = tile_grid.width();
        let world_height = tile_grid.height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        Self {
            scale,
            offset_x: ((screen_width - world_width * scale) * 0.5).max(0.0),
            offset_y: ((screen_height - world_height * scale) * 0.5).max(0.0),
            tile_step: tile_grid.tile_length * scale,
        }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }
}

fn draw_scene(scene: &Scene, metrics: &SceneMetrics) {
    let grid = scene.tile_grid;
    let origin = metrics.to_screen(Vec2::ZERO);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        grid.width() * metrics.scale,
        grid.height() * metrics.scale,
        to_macroquad_color(grid.floor_color),
    );

    for stone in &scene.stones {
        let corner = metrics.to_screen(stone.position);
        let color = STONE_PALETTE[usize::from(stone.style) % STONE_PALETTE.len()];
        macroquad::shapes::draw_rectangle(
            corner.x,
            corner.y,
            metrics.tile_step,
            metrics.tile_step,
            to_macroquad_color(color),
        );
    }

    for item in &scene.items {
        let center = metrics.to_screen(item.position) + Vec2::splat(metrics.tile_step * 0.5);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            metrics.tile_step * 0.2,
            to_macroquad_color(ITEM_COLOR),
        );
    }

    for actor in &scene.actors {
        draw_actor(actor, metrics);
    }

    if scene.darkness {
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            grid.width() * metrics.scale,
            grid.height() * metrics.scale,
            to_macroquad_color(Color::from_rgb_u8(0, 0, 0).with_alpha(0.85)),
        );
    } else if let Some(vision) = &scene.vision {
        for rect in vision.occluders(&grid) {
            let corner = metrics.to_screen(rect.origin);
            macroquad::shapes::draw_rectangle(
                corner.x,
                corner.y,
                rect.size.x * metrics.scale,
                rect.size.y * metrics.scale,
                macroquad::color::BLACK,
            );
        }
    }

    for (index, line) in scene.hud.lines().iter().enumerate() {
        let _ = macroquad::text::draw_text(
            line,
            origin.x + 8.0,
            origin.y + HUD_FONT_SIZE * (index as f32 + 1.0),
            HUD_FONT_SIZE,
            to_macroquad_color(HUD_COLOR),
        );
    }

    if let Some(banner) = &scene.banner {
        let _ = macroquad::text::draw_text(
            banner,
            origin.x + metrics.tile_step,
            origin.y + grid.height() * metrics.scale * 0.5,
            BANNER_FONT_SIZE,
            to_macroquad_color(HUD_COLOR),
        );
    }
}

fn draw_actor(actor: &ActorPresentation, metrics: &SceneMetrics) {
    let color = match actor.kind {
        ActorKind::Player => PLAYER_COLOR,
        ActorKind::Minotaur => MINOTAUR_COLOR,
    };
    let center = metrics.to_screen(actor.position) + Vec2::splat(metrics.tile_step * 0.5);
    let radius = metrics.tile_step * 0.4;
    macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(color));

    let marker = center + facing_offset(actor.facing, actor.pose) * radius;
    macroquad::shapes::draw_circle(
        marker.x,
        marker.y,
        radius * 0.25,
        to_macroquad_color(color.lighten(0.6)),
    );
}

/// Unit offset of the facing marker, swaying sideways on stride poses.
fn facing_offset(facing: Direction, pose: Pose) -> Vec2 {
    let forward = match facing {
        Direction::Up => Vec2::new(0.0, -1.0),
        Direction::Down => Vec2::new(0.0, 1.0),
        Direction::Left => Vec2::new(-1.0, 0.0),
        Direction::Right => Vec2::new(1.0, 0.0),
    };
    let side = forward.perp();
    let sway = match pose {
        Pose::Stand => 0.0,
        Pose::StrideOne => 0.3,
        Pose::StrideTwo => -0.3,
    };
    (forward + side * sway) * 0.7
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
