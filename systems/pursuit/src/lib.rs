#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy pursuit system that steers the Minotaur toward the player.
//!
//! The Minotaur never plans a route. Each frame it compares its tile with the
//! player's and tries a short, fixed list of directions, taking the first one
//! that is open. It only acts while the two actors share neither a row nor a
//! column, so it can stall in a straight corridor facing its prey.

use std::cmp::Ordering;

use minotaur_core::{ActorKind, ActorSnapshot, Command, Direction, TileCoord};

/// Pure system that emits Minotaur step commands.
#[derive(Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Consumes actor snapshots and emits at most one Minotaur step.
    ///
    /// `minotaur` is `None` once it has been slain.
    pub fn handle<F>(
        &self,
        minotaur: Option<&ActorSnapshot>,
        player: &ActorSnapshot,
        is_passable: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(TileCoord) -> bool,
    {
        let Some(minotaur) = minotaur else {
            return;
        };
        if !minotaur.is_idle() {
            return;
        }

        if let Some(direction) = choose_direction(minotaur.tile, player.tile, is_passable) {
            out.push(Command::StepActor {
                actor: ActorKind::Minotaur,
                direction,
            });
        }
    }
}

/// Picks the direction the Minotaur should try next, if any.
///
/// Branches are evaluated in order: prey above, prey below, prey to the
/// right, prey to the left. Each branch tries its main axis first and then
/// the sideways directions that close the other gap. When a branch has no
/// open option the next branch is consulted.
#[must_use]
pub fn choose_direction<F>(
    minotaur: TileCoord,
    player: TileCoord,
    is_passable: F,
) -> Option<Direction>
where
    F: Fn(TileCoord) -> bool,
{
    let vertical = player.y().cmp(&minotaur.y());
    let horizontal = player.x().cmp(&minotaur.x());
    if vertical == Ordering::Equal || horizontal == Ordering::Equal {
        return None;
    }

    let open = |direction: Direction| {
        minotaur
            .step(direction)
            .is_some_and(|tile| is_passable(tile))
    };
    let player_left = horizontal == Ordering::Less;
    let player_right = horizontal == Ordering::Greater;
    let player_above = vertical == Ordering::Less;
    let player_below = vertical == Ordering::Greater;

    let branches: [(bool, [(Direction, bool); 3]); 4] = [
        (
            player_above,
            [
                (Direction::Up, true),
                (Direction::Left, player_left),
                (Direction::Right, player_right),
            ],
        ),
        (
            player_below,
            [
                (Direction::Down, true),
                (Direction::Right, player_right),
                (Direction::Left, player_left),
            ],
        ),
        (
            player_right,
            [
                (Direction::Right, true),
                (Direction::Up, player_above),
                (Direction::Down, player_below),
            ],
        ),
        (
            player_left,
            [
                (Direction::Left, true),
                (Direction::Down, player_below),
                (Direction::Up, player_above),
            ],
        ),
    ];

    branches
        .into_iter()
        .filter(|(applies, _)| *applies)
        .flat_map(|(_, options)| options)
        .find(|(direction, allowed)| *allowed && open(*direction))
        .map(|(direction, _)| direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_field(_: TileCoord) -> bool {
        true
    }

    #[test]
    fn aligned_actors_stall() {
        let minotaur = TileCoord::new(5, 5);
        assert_eq!(choose_direction(minotaur, TileCoord::new(5, 1), open_field), None);
        assert_eq!(choose_direction(minotaur, TileCoord::new(9, 5), open_field), None);
        assert_eq!(choose_direction(minotaur, minotaur, open_field), None);
    }

    #[test]
    fn prey_above_prefers_climbing() {
        let direction = choose_direction(TileCoord::new(5, 5), TileCoord::new(2, 2), open_field);
        assert_eq!(direction, Some(Direction::Up));
    }

    #[test]
    fn prey_below_prefers_descending() {
        let direction = choose_direction(TileCoord::new(5, 5), TileCoord::new(8, 8), open_field);
        assert_eq!(direction, Some(Direction::Down));
    }

    #[test]
    fn blocked_climb_sidesteps_toward_the_prey() {
        let minotaur = TileCoord::new(5, 5);
        let blocked_up = |tile: TileCoord| tile != TileCoord::new(5, 4);
        assert_eq!(
            choose_direction(minotaur, TileCoord::new(2, 2), blocked_up),
            Some(Direction::Left)
        );
        assert_eq!(
            choose_direction(minotaur, TileCoord::new(8, 2), blocked_up),
            Some(Direction::Right)
        );
    }

    #[test]
    fn open_tiles_away_from_the_prey_are_ignored() {
        let minotaur = TileCoord::new(5, 5);
        let only_right = |tile: TileCoord| tile == TileCoord::new(6, 5);
        // Prey up-left: Right leads away from it.
        assert_eq!(
            choose_direction(minotaur, TileCoord::new(2, 2), only_right),
            None
        );

        let only_down = |tile: TileCoord| tile == TileCoord::new(5, 6);
        // Down is only tried when the prey is below.
        assert_eq!(
            choose_direction(minotaur, TileCoord::new(2, 2), only_down),
            None
        );
        assert_eq!(
            choose_direction(minotaur, TileCoord::new(8, 2), only_down),
            None
        );
    }

    #[test]
    fn blocked_descent_sidesteps_only_toward_the_prey() {
        let minotaur = TileCoord::new(5, 5);
        let only_up = |tile: TileCoord| tile == TileCoord::new(5, 4);
        // Prey below-right: Down and Right are walled and Up leads away.
        assert_eq!(
            choose_direction(minotaur, TileCoord::new(8, 8), only_up),
            None
        );

        let only_right = |tile: TileCoord| tile == TileCoord::new(6, 5);
        assert_eq!(
            choose_direction(minotaur, TileCoord::new(8, 8), only_right),
            Some(Direction::Right)
        );
    }

    #[test]
    fn moving_minotaur_does_not_reconsider() {
        let pursuit = Pursuit;
        let minotaur = ActorSnapshot {
            kind: ActorKind::Minotaur,
            tile: TileCoord::new(5, 5),
            pixel: minotaur_core::PixelPosition::new(250, 245),
            facing: Direction::Down,
            motion: minotaur_core::Motion::Moving {
                direction: Direction::Down,
                progress: 1,
            },
            frame: 0,
        };
        let player = ActorSnapshot {
            kind: ActorKind::Player,
            tile: TileCoord::new(1, 1),
            motion: minotaur_core::Motion::Idle,
            ..minotaur
        };

        let mut out = Vec::new();
        pursuit.handle(Some(&minotaur), &player, open_field, &mut out);
        assert!(out.is_empty());

        let idle = ActorSnapshot {
            motion: minotaur_core::Motion::Idle,
            ..minotaur
        };
        pursuit.handle(Some(&idle), &player, open_field, &mut out);
        assert_eq!(
            out,
            vec![Command::StepActor {
                actor: ActorKind::Minotaur,
                direction: Direction::Up,
            }]
        );

        out.clear();
        pursuit.handle(None, &player, open_field, &mut out);
        assert!(out.is_empty());
    }
}
