//! Pure game-logic functions.
//!
//! Every public function takes immutable references to the current entities
//! (and, where needed, an RNG handle) and returns brand-new values.  Side
//! effects are limited to the injected RNG and logging.

use log::{debug, info};
use rand::Rng;

use crate::entities::{
    Background, Bullet, Enemy, Facing, FrameInput, GameStatus, GameWorld, Player, Sight,
    MAGAZINE_SIZE, PLAYER_START, SPAWN_INTERVAL, SPRITE_SIZE, STARTING_LIVES, TILE_PALETTE,
    TILE_SIZE, WINNING_SCORE,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fill a `height / tile_size` × `width / tile_size` grid with tiles drawn
/// uniformly from `TILE_PALETTE`.  Leftover pixels are simply not covered.
pub fn generate_background(
    width: u32,
    height: u32,
    tile_size: u32,
    rng: &mut impl Rng,
) -> Background {
    let cols = width / tile_size;
    let rows = height / tile_size;
    let tiles = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| TILE_PALETTE[rng.gen_range(0..TILE_PALETTE.len())])
                .collect()
        })
        .collect();
    Background { tile_size, tiles }
}

/// Build the title-screen world for a display of the given size.
pub fn init_world(width: u32, height: u32, rng: &mut impl Rng) -> GameWorld {
    GameWorld {
        background: generate_background(width, height, TILE_SIZE, rng),
        player: Player::new(PLAYER_START.0, PLAYER_START.1),
        sight: Sight::default(),
        enemies: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        lives: STARTING_LIVES,
        status: GameStatus::Start,
        frame: 0,
        next_enemy_id: 0,
        width,
        height,
    }
}

// ── Entity updates ───────────────────────────────────────────────────────────

/// Move a bullet one step along its angle.  It goes inactive once the moved
/// position is outside `[0, width] × [0, height]`; inactive bullets stay put.
pub fn advance_bullet(bullet: &Bullet, width: u32, height: u32) -> Bullet {
    if !bullet.active {
        return bullet.clone();
    }
    let x = bullet.x + bullet.angle.cos() * bullet.speed;
    let y = bullet.y + bullet.angle.sin() * bullet.speed;
    let inside = x >= 0.0 && x <= width as f32 && y >= 0.0 && y <= height as f32;
    Bullet {
        x,
        y,
        active: inside,
        ..bullet.clone()
    }
}

/// Which way something faces when looking along `(dx, dy)`.
/// Ties between the axes resolve to the vertical directions.
pub fn facing_towards(dx: f32, dy: f32) -> Facing {
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    } else if dy > 0.0 {
        Facing::Down
    } else {
        Facing::Up
    }
}

/// Step an enemy straight towards `(target_x, target_y)` at its own speed.
pub fn advance_enemy(enemy: &Enemy, target_x: f32, target_y: f32) -> Enemy {
    if !enemy.active {
        return enemy.clone();
    }
    let dx = target_x - enemy.x;
    let dy = target_y - enemy.y;
    let distance = (dx * dx + dy * dy).sqrt();

    // Exact overlap would divide by zero; stand still instead.
    let (dir_x, dir_y) = if distance > 0.0 {
        (dx / distance, dy / distance)
    } else {
        (0.0, 0.0)
    };

    Enemy {
        x: enemy.x + dir_x * enemy.speed,
        y: enemy.y + dir_y * enemy.speed,
        facing: facing_towards(dx, dy),
        ..enemy.clone()
    }
}

/// Apply one frame of directional input, then a pending reload.
///
/// Up beats down and left beats right.  The vertical axis is resolved first,
/// so when both axes move the horizontal facing wins.  Diagonals are not
/// normalised.
pub fn advance_player(player: &Player, input: &FrameInput) -> Player {
    let mut next = player.clone();

    if input.up {
        next.y -= next.speed;
        next.facing = Facing::Up;
    } else if input.down {
        next.y += next.speed;
        next.facing = Facing::Down;
    }
    if input.left {
        next.x -= next.speed;
        next.facing = Facing::Left;
    } else if input.right {
        next.x += next.speed;
        next.facing = Facing::Right;
    }

    reload(&next, input.reload)
}

/// Refill the magazine, but only once it is completely empty.
pub fn reload(player: &Player, requested: bool) -> Player {
    if requested && player.ammo == 0 {
        debug!("magazine reloaded");
        Player {
            ammo: MAGAZINE_SIZE,
            ..player.clone()
        }
    } else {
        player.clone()
    }
}

/// Shoot from the player's position towards `(target_x, target_y)`.
///
/// With an empty magazine nothing happens and `None` is returned.
pub fn fire(player: &Player, target_x: f32, target_y: f32) -> (Player, Option<Bullet>) {
    if player.ammo == 0 {
        debug!("fire ignored, magazine empty");
        return (player.clone(), None);
    }
    let angle = (target_y - player.y).atan2(target_x - player.x);
    let bullet = Bullet::new(player.x, player.y, angle);
    let player = Player {
        ammo: player.ammo - 1,
        ..player.clone()
    };
    (player, Some(bullet))
}

/// Place a new enemy at a random whole-pixel position fully inside the view.
pub fn spawn_enemy(id: u64, width: u32, height: u32, rng: &mut impl Rng) -> Enemy {
    let max_x = width.saturating_sub(SPRITE_SIZE as u32);
    let max_y = height.saturating_sub(SPRITE_SIZE as u32);
    let x = rng.gen_range(0..=max_x);
    let y = rng.gen_range(0..=max_y);
    Enemy::new(id, x as f32, y as f32)
}

// ── Collision tests ──────────────────────────────────────────────────────────

/// Strict point-in-box test; touching an edge is a miss.
pub fn bullet_hits(enemy: &Enemy, bullet: &Bullet) -> bool {
    enemy.x < bullet.x
        && bullet.x < enemy.x + enemy.w
        && enemy.y < bullet.y
        && bullet.y < enemy.y + enemy.h
}

/// Strict AABB overlap; boxes that merely share an edge do not collide.
pub fn touches_player(player: &Player, enemy: &Enemy) -> bool {
    player.x < enemy.x + enemy.w
        && enemy.x < player.x + player.w
        && player.y < enemy.y + enemy.h
        && enemy.y < player.y + player.h
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(world: &GameWorld, input: &FrameInput, rng: &mut impl Rng) -> GameWorld {
    let mut next = match world.status {
        GameStatus::Start => tick_start(world, input),
        GameStatus::Play => tick_play(world, input, rng),
        GameStatus::End => tick_end(world, input),
    };
    next.frame = world.frame + 1;
    next
}

fn tick_start(world: &GameWorld, input: &FrameInput) -> GameWorld {
    if !input.start {
        return world.clone();
    }
    info!("round started");
    GameWorld {
        status: GameStatus::Play,
        ..world.clone()
    }
}

fn tick_end(world: &GameWorld, input: &FrameInput) -> GameWorld {
    if !input.start {
        return world.clone();
    }
    info!("back to title, final score was {}", world.score);
    GameWorld {
        player: Player::new(PLAYER_START.0, PLAYER_START.1),
        enemies: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        lives: STARTING_LIVES,
        status: GameStatus::Start,
        ..world.clone()
    }
}

fn tick_play(world: &GameWorld, input: &FrameInput, rng: &mut impl Rng) -> GameWorld {
    // ── 1. Player & sight ────────────────────────────────────────────────────
    let mut player = advance_player(&world.player, input);
    let sight = Sight {
        x: input.pointer_x,
        y: input.pointer_y,
        ..world.sight.clone()
    };

    // ── 2. Fire ──────────────────────────────────────────────────────────────
    let mut bullets = world.bullets.clone();
    if input.fire {
        let (shooter, bullet) = fire(&player, input.pointer_x, input.pointer_y);
        player = shooter;
        bullets.extend(bullet);
    }

    // ── 3. Move bullets, drop the ones that left the view ────────────────────
    let mut bullets: Vec<Bullet> = bullets
        .iter()
        .map(|b| advance_bullet(b, world.width, world.height))
        .filter(|b| b.active)
        .collect();

    // ── 4. Chase the player, then test every bullet against each enemy ───────
    let mut score = world.score;
    let mut enemies: Vec<Enemy> = Vec::with_capacity(world.enemies.len());
    for enemy in &world.enemies {
        let mut enemy = advance_enemy(enemy, player.x, player.y);
        for bullet in bullets.iter_mut().filter(|b| b.active) {
            if bullet_hits(&enemy, bullet) {
                enemy.active = false;
                bullet.active = false;
                score += 1;
                debug!("enemy {} destroyed, score {}", enemy.id, score);
                break;
            }
        }
        enemies.push(enemy);
    }

    // ── 5. Enemies reaching the player cost a life ───────────────────────────
    let mut lives = world.lives;
    let mut status = GameStatus::Play;
    for enemy in enemies.iter_mut().filter(|e| e.active) {
        if touches_player(&player, enemy) {
            enemy.active = false;
            lives -= 1;
            info!("player hit by enemy {}, {} lives left", enemy.id, lives);
            if lives <= 0 {
                status = GameStatus::End;
            }
        }
    }

    // ── 6. Prune ─────────────────────────────────────────────────────────────
    enemies.retain(|e| e.active);
    bullets.retain(|b| b.active);

    // ── 7. Spawn on the timer ────────────────────────────────────────────────
    let mut next_enemy_id = world.next_enemy_id;
    if world.frame % SPAWN_INTERVAL == 0 {
        let enemy = spawn_enemy(next_enemy_id, world.width, world.height, rng);
        debug!("enemy {} spawned at ({}, {})", enemy.id, enemy.x, enemy.y);
        enemies.push(enemy);
        next_enemy_id += 1;
    }

    // ── 8. Win condition ─────────────────────────────────────────────────────
    if score >= WINNING_SCORE {
        status = GameStatus::End;
    }
    if status == GameStatus::End {
        info!("round over: score {}, lives {}", score, lives);
    }

    GameWorld {
        player,
        sight,
        enemies,
        bullets,
        score,
        lives,
        status,
        next_enemy_id,
        ..world.clone()
    }
}
