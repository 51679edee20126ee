use top_down_shooter::compute::init_world;
use top_down_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn entity_enums_compare() {
    assert_eq!(Facing::Up, Facing::Up);
    assert_ne!(Facing::Left, Facing::Right);
    assert_eq!(GameStatus::Play, GameStatus::Play);
    assert_ne!(GameStatus::Start, GameStatus::End);
}

#[test]
fn constructors_use_fixed_stats() {
    let b = Bullet::new(1.0, 2.0, 0.5);
    assert_eq!(b.speed, 4.0);
    assert!(b.active);

    let e = Enemy::new(3, 1.0, 2.0);
    assert_eq!(e.id, 3);
    assert_eq!((e.w, e.h), (8.0, 8.0));
    assert_eq!(e.speed, 0.5);
    assert_eq!(e.facing, Facing::Down);
    assert!(e.active);

    let p = Player::new(5.0, 10.0);
    assert_eq!((p.w, p.h), (8.0, 8.0));
    assert_eq!(p.speed, 1.0);
    assert_eq!(p.ammo, 6);
    assert_eq!(p.facing, Facing::Down);

    assert_eq!(Sight::default().size, 1.0);
}

#[test]
fn frame_input_defaults_to_nothing_pressed() {
    let input = FrameInput::default();
    assert!(!(input.up || input.down || input.left || input.right));
    assert!(!(input.reload || input.start || input.fire));
}

#[test]
fn game_world_clone_is_independent() {
    let original = init_world(160, 120, &mut StdRng::seed_from_u64(1));
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(Enemy::new(0, 5.0, 5.0));

    assert_eq!(original.player.x, 5.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
