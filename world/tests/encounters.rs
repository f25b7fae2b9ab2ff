use minotaur_core::{ActorKind, Command, Direction, Event, Outcome, Rules, TileCoord};
use minotaur_world::{apply, query, MazeLayout, World};

/// Corridor whose only four gear-eligible tiles line the middle row, with the
/// Minotaur penned in a dead end below the player's column.
const GAUNTLET: &str = "\
#######
#S#####
#.#####
#.....#
#M#####
#######";

fn gauntlet() -> World {
    let layout = MazeLayout::parse(GAUNTLET).expect("gauntlet layout");
    World::new(Rules::default(), &layout, 42)
}

fn walk(world: &mut World, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    apply(
        world,
        Command::StepActor {
            actor: ActorKind::Player,
            direction,
        },
        &mut events,
    );
    for _ in 0..Rules::default().move_ticks {
        apply(world, Command::Tick, &mut events);
    }
    events
}

fn count(events: &[Event], wanted: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|event| wanted(event)).count()
}

#[test]
fn gear_fills_the_corridor() {
    let world = gauntlet();
    let mut tiles: Vec<_> = query::items(&world).iter().map(|item| item.tile).collect();
    tiles.sort();
    assert_eq!(
        tiles,
        vec![
            TileCoord::new(2, 3),
            TileCoord::new(3, 3),
            TileCoord::new(4, 3),
            TileCoord::new(5, 3),
        ]
    );
}

#[test]
fn fully_equipped_player_slays_the_minotaur() {
    let mut world = gauntlet();
    let mut log = Vec::new();

    log.extend(walk(&mut world, Direction::Down));
    log.extend(walk(&mut world, Direction::Down));
    for _ in 0..4 {
        log.extend(walk(&mut world, Direction::Right));
    }
    assert_eq!(query::gear_collected(&world), 4);
    assert!(query::items(&world).is_empty());
    assert_eq!(count(&log, |event| *event == Event::GearCompleted), 1);
    assert_eq!(
        count(&log, |event| matches!(event, Event::GearCollected { .. })),
        4
    );

    for _ in 0..4 {
        log.extend(walk(&mut world, Direction::Left));
    }
    log.extend(walk(&mut world, Direction::Down));

    assert!(log.contains(&Event::MinotaurSlain));
    assert_eq!(
        log.last(),
        Some(&Event::SessionEnded {
            outcome: Outcome::Win
        })
    );
    assert_eq!(query::outcome(&world), Some(Outcome::Win));
    assert_eq!(query::minotaur(&world), None);
    assert_eq!(query::lives(&world), 3);
    assert_eq!(query::gear_collected(&world), 4);
}

#[test]
fn unequipped_player_loses_a_life_and_both_actors_reset() {
    let mut world = gauntlet();
    let mut log = Vec::new();

    log.extend(walk(&mut world, Direction::Down));
    log.extend(walk(&mut world, Direction::Down));
    log.extend(walk(&mut world, Direction::Down));

    assert_eq!(count(&log, |event| *event == Event::PlayerCaught), 1);
    assert!(log.contains(&Event::LifeLost { remaining: 2 }));
    assert_eq!(query::lives(&world), 2);
    assert_eq!(query::player(&world).tile, TileCoord::new(1, 1));
    assert!(query::player(&world).is_idle());
    assert_eq!(
        query::minotaur(&world).map(|minotaur| minotaur.tile),
        Some(TileCoord::new(1, 4))
    );
    assert_eq!(query::outcome(&world), None);
}

#[test]
fn three_catches_end_the_session() {
    let mut world = gauntlet();
    let mut log = Vec::new();

    for _ in 0..3 {
        for _ in 0..3 {
            log.extend(walk(&mut world, Direction::Down));
        }
    }

    assert_eq!(query::lives(&world), 0);
    assert_eq!(query::outcome(&world), Some(Outcome::Loss));
    assert_eq!(
        log.last(),
        Some(&Event::SessionEnded {
            outcome: Outcome::Loss
        })
    );

    let tick = query::tick_index(&world);
    let events = walk(&mut world, Direction::Down);
    assert!(events.is_empty());
    assert_eq!(query::tick_index(&world), tick);
    assert_eq!(query::player(&world).tile, TileCoord::new(1, 1));
}
