use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use sea_battle::{
    resolve_shot, Coord, GuessCell, Mode, Orientation, ScriptedInput, ShipPlacement, ShotOutcome,
    Side,
};

fn c(row: usize, col: usize) -> Coord {
    Coord::new(row, col).unwrap()
}

/// Fleet with a horizontal length-3 ship on (2,2), (2,3), (2,4).
fn layout() -> Vec<ShipPlacement> {
    [
        (3, 2, 2),
        (4, 6, 0),
        (3, 8, 0),
        (2, 0, 7),
        (2, 4, 7),
        (2, 8, 5),
        (1, 0, 0),
        (1, 4, 0),
        (1, 2, 9),
        (1, 9, 9),
    ]
    .into_iter()
    .map(|(len, row, col)| ShipPlacement::new(len, Orientation::Horizontal, row, col))
    .collect()
}

fn target() -> Side {
    let mut side = Side::human("target", Box::new(ScriptedInput::new()));
    side.place_fleet(&layout()).unwrap();
    side
}

#[test]
fn test_first_hit_probes_orthogonal_neighbours() {
    let allowed = [c(1, 3), c(3, 3), c(2, 2), c(2, 4)];
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cpu = Side::opponent();
        let mut enemy = target();
        assert!(matches!(
            resolve_shot(&mut cpu, &mut enemy, c(2, 3)).unwrap(),
            Some(ShotOutcome::Hit(_))
        ));
        let next = cpu.choose_shot(&mut rng).unwrap();
        assert!(allowed.contains(&next), "seed {seed}: fired at {next}");
        assert!(!cpu.targeting().unwrap().is_available(next));
    }
}

#[test]
fn test_second_hit_continues_along_axis() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut cpu = Side::opponent();
    let mut enemy = target();
    resolve_shot(&mut cpu, &mut enemy, c(2, 3)).unwrap();
    resolve_shot(&mut cpu, &mut enemy, c(2, 4)).unwrap();
    assert_eq!(cpu.choose_shot(&mut rng), Some(c(2, 5)));
}

#[test]
fn test_miss_at_end_reverses_direction() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut cpu = Side::opponent();
    let mut enemy = target();
    resolve_shot(&mut cpu, &mut enemy, c(2, 3)).unwrap();
    resolve_shot(&mut cpu, &mut enemy, c(2, 4)).unwrap();
    assert_eq!(
        resolve_shot(&mut cpu, &mut enemy, c(2, 5)).unwrap(),
        Some(ShotOutcome::Miss)
    );
    // Back past the first hit.
    let next = cpu.choose_shot(&mut rng).unwrap();
    assert_eq!(next, c(2, 2));
    assert!(matches!(
        resolve_shot(&mut cpu, &mut enemy, next).unwrap(),
        Some(ShotOutcome::Sunk(_))
    ));
    assert_eq!(cpu.targeting().unwrap().mode(), Mode::Search);
}

#[test]
fn test_hunt_sinks_ship_without_wasting_neighbour_shots() {
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cpu = Side::opponent();
        let mut enemy = target();
        resolve_shot(&mut cpu, &mut enemy, c(2, 3)).unwrap();
        let mut shots = 0;
        loop {
            let cell = cpu.choose_shot(&mut rng).unwrap();
            shots += 1;
            let outcome = resolve_shot(&mut cpu, &mut enemy, cell).unwrap().unwrap();
            if matches!(outcome, ShotOutcome::Sunk(_)) {
                break;
            }
            assert!(shots < 6, "seed {seed}: hunt took too long");
        }
        let t = cpu.targeting().unwrap();
        assert_eq!(t.mode(), Mode::Search);
        // The whole ring around the sunk ship is off limits now.
        for cell in [c(1, 1), c(1, 5), c(3, 1), c(3, 5), c(2, 1), c(2, 5)] {
            assert!(!t.is_available(cell), "seed {seed}: {cell} still available");
        }
    }
}

#[test]
fn test_empty_board_exhausts_every_cell_once() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut cpu = Side::opponent();
    let mut empty = Side::human("empty", Box::new(ScriptedInput::new()));
    let mut seen = HashSet::new();
    for _ in 0..100 {
        let cell = cpu.choose_shot(&mut rng).unwrap();
        assert!(seen.insert(cell), "{cell} chosen twice");
        assert_eq!(
            resolve_shot(&mut cpu, &mut empty, cell).unwrap(),
            Some(ShotOutcome::Miss)
        );
    }
    assert_eq!(cpu.targeting().unwrap().available().count_ones(), 0);
    assert_eq!(cpu.choose_shot(&mut rng), None);
    assert_eq!(cpu.shots_fired(), 100);
    assert_eq!(cpu.board().guess_grid().count(GuessCell::Miss), 100);
}
