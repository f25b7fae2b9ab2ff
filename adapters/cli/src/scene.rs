//! Translation from session snapshots into renderer scenes.

use glam::Vec2;
use minotaur_core::{ActorSnapshot, Outcome, PixelPosition, TileCoord};
use minotaur_rendering::{
    ActorPresentation, Color, HudPresentation, ItemPresentation, RenderingError, Scene,
    StonePresentation, TileGridPresentation, VisionWindow,
};
use minotaur_session::Snapshot;

const FLOOR_COLOR: Color = Color::new(0.18, 0.16, 0.14, 1.0);

/// Builds the first scene of a session.
pub(crate) fn build_scene(snapshot: &Snapshot) -> Result<Scene, RenderingError> {
    let tile_grid = TileGridPresentation::new(
        snapshot.columns,
        snapshot.rows,
        snapshot.tile_length as f32,
        FLOOR_COLOR,
    )?;
    let mut scene = Scene::new(tile_grid, hud(snapshot));
    update_scene(&mut scene, snapshot);
    Ok(scene)
}

/// Refreshes everything that changes between frames.
pub(crate) fn update_scene(scene: &mut Scene, snapshot: &Snapshot) {
    let tile_length = snapshot.tile_length;

    scene.stones.clear();
    scene
        .stones
        .extend(snapshot.stones.iter().map(|stone| StonePresentation {
            position: tile_position(stone.tile, tile_length),
            style: stone.style,
        }));

    scene.items.clear();
    scene
        .items
        .extend(snapshot.items.iter().map(|item| ItemPresentation {
            position: tile_position(item.tile, tile_length),
        }));

    scene.actors.clear();
    scene.actors.push(actor(&snapshot.player));
    if let Some(minotaur) = &snapshot.minotaur {
        scene.actors.push(actor(minotaur));
    }

    scene.hud = hud(snapshot);
    scene.darkness = !snapshot.lantern_lit;
    scene.vision = vision(snapshot);
    scene.banner = snapshot.outcome.and_then(banner).map(str::to_owned);
}

fn banner(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Win => Some("The Minotaur is slain. You escape the labyrinth."),
        Outcome::Loss => Some("The Minotaur has claimed you."),
        Outcome::QuitRequested => None,
    }
}

/// Window centred on the player's sprite, or `None` when vision is unlimited.
fn vision(snapshot: &Snapshot) -> Option<VisionWindow> {
    if snapshot.vision_radius == 0 {
        return None;
    }
    let half_tile = snapshot.tile_length as f32 * 0.5;
    let center = pixel_position(snapshot.player.pixel) + Vec2::splat(half_tile);
    Some(VisionWindow::new(center, snapshot.vision_radius as f32))
}

fn hud(snapshot: &Snapshot) -> HudPresentation {
    HudPresentation {
        gear_collected: snapshot.gear_collected,
        gear_total: snapshot.gear_total,
        lives: snapshot.lives,
        seconds_left: snapshot.seconds_left,
        released: snapshot.pen_released,
    }
}

fn actor(snapshot: &ActorSnapshot) -> ActorPresentation {
    ActorPresentation {
        kind: snapshot.kind,
        position: pixel_position(snapshot.pixel),
        facing: snapshot.facing,
        pose: snapshot.pose(),
    }
}

fn tile_position(tile: TileCoord, tile_length: u32) -> Vec2 {
    pixel_position(PixelPosition::of_tile(tile, tile_length))
}

fn pixel_position(pixel: PixelPosition) -> Vec2 {
    Vec2::new(pixel.x as f32, pixel.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minotaur_core::{ActorKind, Direction, FrameInput, HeldDirections, Pose};
    use minotaur_session::{Session, SessionConfig};

    #[test]
    fn classic_session_scene_matches_the_snapshot() {
        let session = Session::new(SessionConfig::default()).expect("session");
        let snapshot = session.snapshot();

        let scene = build_scene(&snapshot).expect("scene");

        assert_eq!(scene.tile_grid.width(), 16.0 * 50.0);
        assert_eq!(scene.tile_grid.height(), 16.0 * 50.0);
        assert_eq!(scene.stones.len(), snapshot.stones.len());
        assert_eq!(scene.items.len(), 4);
        assert_eq!(scene.actors.len(), 2);
        assert_eq!(scene.actors[0].kind, ActorKind::Player);
        assert_eq!(scene.actors[0].position, Vec2::new(50.0, 50.0));
        assert_eq!(scene.actors[0].pose, Pose::Stand);
        assert_eq!(scene.actors[1].kind, ActorKind::Minotaur);
        assert_eq!(scene.actors[1].position, Vec2::new(350.0, 400.0));
        assert!(!scene.darkness);
        assert_eq!(scene.vision, Some(VisionWindow::new(Vec2::new(75.0, 75.0), 125.0)));
        assert_eq!(scene.banner, None);
        assert_eq!(scene.hud.lines(), vec!["Gear 0/4", "Lives 3", "Release in 15"]);
    }

    #[test]
    fn moving_player_is_drawn_between_tiles() {
        let mut session = Session::new(SessionConfig::default()).expect("session");
        let mut scene = build_scene(&session.snapshot()).expect("scene");
        session.process_input(FrameInput {
            held: HeldDirections::none().with(Direction::Right),
            ..FrameInput::default()
        });
        let _ = session.tick();

        update_scene(&mut scene, &session.snapshot());

        let player = scene.actors[0];
        assert_eq!(player.facing, Direction::Right);
        assert!(player.position.x > 50.0 && player.position.x < 100.0);
        assert_eq!(player.position.y, 50.0);
        let vision = scene.vision.expect("limited vision");
        assert_eq!(vision.center, player.position + Vec2::splat(25.0));
    }

    #[test]
    fn lit_lantern_only_reveals_the_player_surroundings() {
        let session = Session::new(SessionConfig::default()).expect("session");
        let scene = build_scene(&session.snapshot()).expect("scene");
        let vision = scene.vision.expect("limited vision");

        let player = scene.actors[0].position + Vec2::splat(25.0);
        let minotaur = scene.actors[1].position + Vec2::splat(25.0);
        assert!(vision.contains(player));
        assert!(!vision.contains(minotaur));

        let hidden: f32 = vision
            .occluders(&scene.tile_grid)
            .iter()
            .map(|rect| rect.size.x * rect.size.y)
            .sum();
        assert_eq!(hidden, 800.0 * 800.0 - 200.0 * 200.0);
    }

    #[test]
    fn zero_vision_radius_lights_the_whole_maze() {
        let session = Session::new(SessionConfig::default()).expect("session");
        let mut snapshot = session.snapshot();
        snapshot.vision_radius = 0;

        let scene = build_scene(&snapshot).expect("scene");

        assert_eq!(scene.vision, None);
    }

    #[test]
    fn dark_lantern_and_outcomes_reach_the_scene() {
        let session = Session::new(SessionConfig::default()).expect("session");
        let mut snapshot = session.snapshot();
        let mut scene = build_scene(&snapshot).expect("scene");

        snapshot.lantern_lit = false;
        snapshot.outcome = Some(Outcome::Loss);
        snapshot.minotaur = None;
        update_scene(&mut scene, &snapshot);

        assert!(scene.darkness);
        assert_eq!(scene.actors.len(), 1);
        assert_eq!(scene.banner.as_deref(), Some("The Minotaur has claimed you."));

        snapshot.outcome = Some(Outcome::QuitRequested);
        update_scene(&mut scene, &snapshot);
        assert_eq!(scene.banner, None);
    }
}
