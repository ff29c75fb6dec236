//! End-to-end checks on generated floors: connectivity, spacing, borders,
//! determinism, and the depth rules for doors and lighting.

use std::collections::{HashSet, VecDeque};
use warren::{FloorGenerator, GenerationConfig, Position, Tile};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// All passable positions reachable from `start` by 4-way movement.
fn flood_fill(floor: &warren::Floor, start: Position) -> HashSet<Position> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for neighbor in pos.cardinal_neighbors() {
            if floor.grid.tile(neighbor).is_passable() && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    seen
}

#[test]
fn every_room_connects_to_the_hero_spawn() {
    init_logging();
    for seed in [1, 99, 2024] {
        let config = GenerationConfig::new(seed, 1);
        let floor = FloorGenerator::generate(&config).unwrap();
        let reached = flood_fill(&floor, floor.hero_spawn);
        assert!(reached.contains(&floor.stairs_down), "seed {seed}");
        for room in floor.grid.rooms() {
            assert!(
                reached.contains(&room.center()),
                "seed {seed}: room at {} cut off",
                room.center()
            );
        }
    }
}

#[test]
fn rooms_keep_their_spacing() {
    init_logging();
    let config = GenerationConfig::new(7, 1);
    let floor = FloorGenerator::generate(&config).unwrap();
    let rooms = floor.grid.rooms();
    assert!(rooms.len() >= 2);
    for (i, a) in rooms.iter().enumerate() {
        for b in rooms.iter().skip(i + 1) {
            assert!(
                !a.expanded(3).intersects(b),
                "rooms {a:?} and {b:?} violate wall-and-margin spacing"
            );
        }
    }
}

#[test]
fn border_ring_survives_generation() {
    init_logging();
    let config = GenerationConfig::new(31, 2);
    let floor = FloorGenerator::generate(&config).unwrap();
    let (w, h) = (floor.grid.width(), floor.grid.height());
    for x in 0..w {
        assert_eq!(floor.grid.tile(Position::new(x, 0)), Tile::Border);
        assert_eq!(floor.grid.tile(Position::new(x, h - 1)), Tile::Border);
    }
    for y in 0..h {
        assert_eq!(floor.grid.tile(Position::new(0, y)), Tile::Border);
        assert_eq!(floor.grid.tile(Position::new(w - 1, y)), Tile::Border);
    }
}

#[test]
fn same_seed_reproduces_the_same_floor() {
    init_logging();
    let config = GenerationConfig::new(4242, 3);
    let a = FloorGenerator::generate(&config).unwrap();
    let b = FloorGenerator::generate(&config).unwrap();
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.hero_spawn, b.hero_spawn);
    assert_eq!(a.stairs_down, b.stairs_down);
    assert_eq!(a.stairs_up, b.stairs_up);
    let positions_a: Vec<_> = a.agents.iter().map(|agent| agent.position).collect();
    let positions_b: Vec<_> = b.agents.iter().map(|agent| agent.position).collect();
    assert_eq!(positions_a, positions_b);
}

#[test]
fn different_seeds_diverge() {
    init_logging();
    let a = FloorGenerator::generate(&GenerationConfig::new(1, 1)).unwrap();
    let b = FloorGenerator::generate(&GenerationConfig::new(2, 1)).unwrap();
    assert_ne!(a.grid, b.grid);
}

#[test]
fn room_count_override_pins_the_layout() {
    init_logging();
    let config = GenerationConfig::with_room_count(5150, 1, 5);
    let floor = FloorGenerator::generate(&config).unwrap();
    assert_eq!(floor.grid.rooms().len(), 5);
    let reached = flood_fill(&floor, floor.hero_spawn);
    for room in floor.grid.rooms() {
        assert!(reached.contains(&room.center()));
    }
}

#[test]
fn shallow_floors_are_lit_with_plain_doors() {
    init_logging();
    for seed in 0..5 {
        let config = GenerationConfig::new(seed, 1);
        let floor = FloorGenerator::generate(&config).unwrap();
        for x in 0..floor.grid.width() {
            for y in 0..floor.grid.height() {
                let tile = floor.grid.tile(Position::new(x, y));
                assert_ne!(tile, Tile::DarkRoom, "seed {seed}");
                assert_ne!(tile, Tile::HiddenDoor, "seed {seed}");
                assert_ne!(tile, Tile::LockedDoor, "seed {seed}");
            }
        }
    }
}

#[test]
fn deep_floors_eventually_roll_special_doors() {
    init_logging();
    let mut special = 0;
    for seed in 0..10 {
        let config = GenerationConfig::new(seed, 40);
        let floor = FloorGenerator::generate(&config).unwrap();
        for x in 0..floor.grid.width() {
            for y in 0..floor.grid.height() {
                match floor.grid.tile(Position::new(x, y)) {
                    Tile::HiddenDoor | Tile::LockedDoor => special += 1,
                    _ => {}
                }
            }
        }
    }
    // Each door has a 50% chance of being special at depth 40; ten floors
    // of doors cannot plausibly all come up open.
    assert!(special > 0);
}

#[test]
fn hero_and_stairs_spawn_on_room_floor() {
    init_logging();
    for seed in [8, 80, 800] {
        let config = GenerationConfig::new(seed, 1);
        let floor = FloorGenerator::generate(&config).unwrap();
        assert!(floor.grid.room_containing(floor.hero_spawn).is_some());
        assert!(floor.grid.tile(floor.hero_spawn).is_passable());
        assert_eq!(floor.grid.tile(floor.stairs_down), Tile::StairsDown);
        assert_ne!(floor.hero_spawn, floor.stairs_down);
    }
}

#[test]
fn agents_spawn_inside_rooms_off_the_hero() {
    init_logging();
    // High spawn chance guarantees a populated floor to inspect.
    let mut config = GenerationConfig::new(64, 1);
    config.monster_spawn_chance = 0.2;
    let floor = FloorGenerator::generate(&config).unwrap();
    assert!(!floor.agents.is_empty());
    for agent in &floor.agents {
        assert!(floor.grid.room_containing(agent.position).is_some());
        assert_ne!(agent.position, floor.hero_spawn);
        assert!(agent.roaming && agent.awake && !agent.chasing);
    }
}

#[test]
fn floors_grow_with_depth() {
    init_logging();
    let shallow = FloorGenerator::generate(&GenerationConfig::new(5, 1)).unwrap();
    let deep = FloorGenerator::generate(&GenerationConfig::new(5, 10)).unwrap();
    assert_eq!(shallow.grid.width(), 80);
    assert_eq!(deep.grid.width(), 107);
    assert!(deep.grid.rooms().len() > shallow.grid.rooms().len() / 2);
}
