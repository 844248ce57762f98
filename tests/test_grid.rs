use road_crossing::config::*;
use road_crossing::grid::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── pixels_to_row_and_column ─────────────────────────────────────────────────

#[test]
fn pixels_map_to_cell_under_touch() {
    // y is corrected by -45 before dividing by the row height.
    assert_eq!(pixels_to_row_and_column(0.0, 45.0), GridPosition::new(0, 0));
    assert_eq!(pixels_to_row_and_column(250.0, 500.0), GridPosition::new(5, 2));
    assert_eq!(pixels_to_row_and_column(303.0, 128.0), GridPosition::new(1, 3));
}

#[test]
fn pixels_above_offset_resolve_to_negative_row() {
    assert_eq!(pixels_to_row_and_column(10.0, 10.0).row, -1);
}

#[test]
fn column_boundaries_are_floor_based() {
    assert_eq!(pixels_to_row_and_column(100.9, 200.0).col, 0);
    assert_eq!(pixels_to_row_and_column(101.0, 200.0).col, 1);
}

// ── GridPosition ─────────────────────────────────────────────────────────────

#[test]
fn clamp_pulls_positions_back_on_grid() {
    assert_eq!(GridPosition::new(-3, 9).clamped(), GridPosition::new(0, NUM_COLS - 1));
    assert_eq!(GridPosition::new(NUM_ROWS, -1).clamped(), GridPosition::new(NUM_ROWS - 1, 0));
}

#[test]
fn clamp_is_idempotent() {
    for row in -2..NUM_ROWS + 2 {
        for col in -2..NUM_COLS + 2 {
            let once = GridPosition::new(row, col).clamped();
            assert!(once.is_on_grid());
            assert_eq!(once.clamped(), once);
        }
    }
}

#[test]
fn to_pixels_uses_tile_size_and_offset() {
    let p = GridPosition::new(5, 2).to_pixels(PLAYER_Y_OFFSET);
    assert_eq!(p.x, 2.0 * COL_WIDTH);
    assert_eq!(p.y, 5.0 * ROW_HEIGHT + PLAYER_Y_OFFSET);
}

// ── CollisionBox ─────────────────────────────────────────────────────────────

#[test]
fn overlapping_boxes_collide() {
    let a = CollisionBox::tile_at(100.0);
    let b = CollisionBox::inset_tile_at(150.0, PLAYER_BOUNDARY_OFFSET);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn touching_boxes_do_not_collide() {
    let a = CollisionBox::tile_at(0.0);
    let b = CollisionBox::tile_at(COL_WIDTH);
    assert!(!a.overlaps(&b));
}

#[test]
fn inset_lets_enemy_graze_tile_edge() {
    // Enemy tile ends 20 px into the player's tile: inside the 30 px inset.
    let player = CollisionBox::inset_tile_at(202.0, PLAYER_BOUNDARY_OFFSET);
    let enemy = CollisionBox::tile_at(202.0 - COL_WIDTH + 20.0);
    assert!(!enemy.overlaps(&player));
}

// ── random_integer ───────────────────────────────────────────────────────────

#[test]
fn random_integer_stays_in_inclusive_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen_min = false;
    let mut seen_max = false;
    for _ in 0..500 {
        let n = random_integer(&mut rng, 1, 3);
        assert!((1..=3).contains(&n));
        seen_min |= n == 1;
        seen_max |= n == 3;
    }
    assert!(seen_min && seen_max);
}

#[test]
fn random_integer_with_equal_bounds() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(random_integer(&mut rng, 4, 4), 4);
}
