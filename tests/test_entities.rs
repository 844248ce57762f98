use road_crossing::config::*;
use road_crossing::display::TerminalSurface;
use road_crossing::entities::*;
use road_crossing::graphics::SpriteSheet;
use road_crossing::grid::GridPosition;
use road_crossing::GameError;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn assert_freshly_rolled(enemy: &Enemy) {
    assert!((ENEMY_ROWS.0..=ENEMY_ROWS.1).contains(&enemy.row));
    assert!(enemy.speed >= ENEMY_SPEEDS.0 as f32 && enemy.speed <= ENEMY_SPEEDS.1 as f32);
    assert_eq!(enemy.x, -COL_WIDTH);
    assert_eq!(enemy.y, enemy.row as f32 * ROW_HEIGHT + ENEMY_Y_OFFSET);
}

// ── Enemy ────────────────────────────────────────────────────────────────────

#[test]
fn enemy_initialize_rolls_lane_and_speed_in_range() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let enemy = Enemy::spawned(CANVAS_WIDTH as f32, &mut rng);
        assert_freshly_rolled(&enemy);
    }
}

#[test]
fn enemy_moves_by_speed_times_dt() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::spawned(CANVAS_WIDTH as f32, &mut rng);
    let (x0, speed, row) = (enemy.x, enemy.speed, enemy.row);

    enemy.update(0.25, &mut rng);

    assert!((enemy.x - (x0 + speed * 0.25)).abs() < 1e-3);
    assert_eq!(enemy.row, row);
    assert_eq!(enemy.speed, speed);
}

#[test]
fn enemy_zero_dt_is_a_no_op() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::spawned(CANVAS_WIDTH as f32, &mut rng);
    let before = enemy.clone();
    enemy.update(0.0, &mut rng);
    assert_eq!(enemy, before);
}

#[test]
fn enemy_respawns_after_leaving_right_edge() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::spawned(CANVAS_WIDTH as f32, &mut rng);
    enemy.x = CANVAS_WIDTH as f32 - 1.0;
    enemy.speed = 400.0;

    enemy.update(0.1, &mut rng);

    assert_freshly_rolled(&enemy);
}

#[test]
fn enemy_exactly_at_edge_respawns() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::spawned(CANVAS_WIDTH as f32, &mut rng);
    enemy.x = CANVAS_WIDTH as f32;
    enemy.update(0.0, &mut rng);
    assert_eq!(enemy.x, -COL_WIDTH);
}

#[test]
fn enemy_collision_box_follows_position() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::spawned(CANVAS_WIDTH as f32, &mut rng);
    enemy.update(0.5, &mut rng);

    let b = enemy.collision_box();
    assert_eq!(b.left, enemy.x);
    assert_eq!(b.right, enemy.x + COL_WIDTH);
}

#[test]
fn enemy_render_needs_its_sprite() {
    let mut rng = seeded_rng();
    let enemy = Enemy::spawned(CANVAS_WIDTH as f32, &mut rng);
    let mut surface = TerminalSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    let err = enemy.render(&mut surface, &SpriteSheet::new()).unwrap_err();
    assert!(matches!(err, GameError::MissingSprite(ref key) if key == "enemy-bug"));

    assert!(enemy.render(&mut surface, &SpriteSheet::builtin()).is_ok());
}

// ── Player ───────────────────────────────────────────────────────────────────

#[test]
fn player_starts_on_home_cell_with_empty_queue() {
    let player = Player::new();
    assert_eq!(player.grid(), GridPosition::new(5, 2));
    assert_eq!(player.pending_moves().count(), 0);
}

#[test]
fn unmapped_input_is_ignored() {
    let mut player = Player::new();
    player.handle_input(None);
    assert_eq!(player.pending_moves().count(), 0);
}

#[test]
fn queue_keeps_arrival_order_and_drains_on_update() {
    let mut rng = seeded_rng();
    let mut player = Player::new();
    let moves = [Move::Up, Move::Left, Move::Up, Move::Right, Move::Down];
    for mv in moves {
        player.handle_input(Some(mv));
    }
    assert_eq!(player.pending_moves().collect::<Vec<_>>(), moves);

    player.update(0.016, &mut rng);

    assert_eq!(player.pending_moves().count(), 0);
    assert_eq!(player.grid(), GridPosition::new(4, 2));
}

#[test]
fn right_right_up_up_up_ends_at_row_2_col_4() {
    let mut rng = seeded_rng();
    let mut player = Player::new();
    for mv in [Move::Right, Move::Right, Move::Up, Move::Up, Move::Up] {
        player.handle_input(Some(mv));
    }
    player.update(0.0, &mut rng);
    assert_eq!(player.grid(), GridPosition::new(2, 4));
}

#[test]
fn moves_into_walls_are_absorbed() {
    let mut rng = seeded_rng();
    let mut player = Player::new();
    for _ in 0..10 {
        player.handle_input(Some(Move::Left));
    }
    player.handle_input(Some(Move::Down));
    player.update(0.0, &mut rng);

    assert_eq!(player.grid(), GridPosition::new(NUM_ROWS - 1, 0));
    assert_eq!(player.pending_moves().count(), 0);
}

#[test]
fn clamp_applies_after_whole_queue() {
    let mut rng = seeded_rng();
    let mut player = Player::new();
    player.handle_input(Some(Move::Left));
    player.handle_input(Some(Move::Left));
    player.update(0.0, &mut rng);
    assert_eq!(player.col, 0);

    // -1 then back to 0: the wall bump is not clamped mid-queue.
    player.handle_input(Some(Move::Left));
    player.handle_input(Some(Move::Right));
    player.update(0.0, &mut rng);
    assert_eq!(player.col, 0);
}

#[test]
fn player_pixel_position_and_inset_box() {
    let mut rng = seeded_rng();
    let mut player = Player::new();
    player.handle_input(Some(Move::Up));
    player.update(0.0, &mut rng);

    let p = player.position();
    assert_eq!(p.x, 2.0 * COL_WIDTH);
    assert_eq!(p.y, 4.0 * ROW_HEIGHT + PLAYER_Y_OFFSET);

    let b = player.collision_box();
    assert_eq!(b.left, p.x + PLAYER_BOUNDARY_OFFSET);
    assert_eq!(b.right, p.x + COL_WIDTH - PLAYER_BOUNDARY_OFFSET);
    assert!(b.right - b.left < COL_WIDTH);
}

#[test]
fn initialize_resets_cell_and_clears_queue() {
    let mut rng = seeded_rng();
    let mut player = Player::new();
    player.handle_input(Some(Move::Up));
    player.update(0.0, &mut rng);
    player.handle_input(Some(Move::Right));

    player.initialize(&mut rng);

    assert_eq!(player.grid(), GridPosition::new(5, 2));
    assert_eq!(player.pending_moves().count(), 0);
    assert_eq!(player.position(), GridPosition::new(5, 2).to_pixels(PLAYER_Y_OFFSET));
}

#[test]
fn move_deltas() {
    assert_eq!(Move::Left.delta(), (0, -1));
    assert_eq!(Move::Up.delta(), (-1, 0));
    assert_eq!(Move::Right.delta(), (0, 1));
    assert_eq!(Move::Down.delta(), (1, 0));
}

// ── Score ────────────────────────────────────────────────────────────────────

#[test]
fn score_offsets_accumulate() {
    let mut score = Score::new();
    score.offset(15000);
    score.offset(500);
    score.offset(-150);
    assert_eq!(score.value(), 15350);
}

#[test]
fn score_floors_at_zero() {
    let mut score = Score::new();
    score.offset(100);
    score.offset(-5000);
    assert_eq!(score.value(), 0);
}

#[test]
fn score_offsets_are_order_dependent_near_the_floor() {
    let mut a = Score::new();
    a.offset(-5000);
    a.offset(15000);
    assert_eq!(a.value(), 15000);

    let mut b = Score::new();
    b.offset(15000);
    b.offset(-5000);
    assert_eq!(b.value(), 10000);
}

#[test]
fn score_renders_into_header() {
    let mut surface = TerminalSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mut score = Score::new();
    score.offset(42);
    score.render(&mut surface);
    score.render(&mut surface);

    // The second render clears the first label.
    let labels = surface.labels();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "Score: 42");
    assert!(labels[0].style.bold);
    assert!(labels[0].y < HEADER_HEIGHT);
}
