//! All game entity types — pure data, no logic.

// ── Tunables ──────────────────────────────────────────────────────────────────

pub const TILE_SIZE: u32 = 8;
pub const SPRITE_SIZE: f32 = 8.0;

pub const BULLET_SPEED: f32 = 4.0;
pub const ENEMY_SPEED: f32 = 0.5;
pub const PLAYER_SPEED: f32 = 1.0;

pub const MAGAZINE_SIZE: u32 = 6;
pub const STARTING_LIVES: i32 = 3;
/// Score at which the round is won.
pub const WINNING_SCORE: u32 = 6;
/// One enemy spawns every this many frames.
pub const SPAWN_INTERVAL: u64 = 60;

pub const PLAYER_START: (f32, f32) = (5.0, 10.0);

/// Sheet coordinates of the three background tiles.
pub const TILE_PALETTE: [(u32, u32); 3] = [(16, 0), (16, 8), (24, 8)];

// ── Shared enums ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Title screen, waiting for the start command.
    Start,
    Play,
    /// Round over, either won or lost.
    End,
}

// ── Background ────────────────────────────────────────────────────────────────

/// Grid of sheet coordinates, indexed `tiles[row][col]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub tile_size: u32,
    pub tiles: Vec<Vec<(u32, u32)>>,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Direction of travel in radians.
    pub angle: f32,
    pub speed: f32,
    pub active: bool,
}

impl Bullet {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            angle,
            speed: BULLET_SPEED,
            active: true,
        }
    }
}

// ── Player, enemy & sight ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Serial number in spawn order, starting at 0.
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub facing: Facing,
    pub speed: f32,
    pub active: bool,
}

impl Enemy {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            w: SPRITE_SIZE,
            h: SPRITE_SIZE,
            facing: Facing::Down,
            speed: ENEMY_SPEED,
            active: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub facing: Facing,
    pub speed: f32,
    /// Rounds left in the magazine, `0..=MAGAZINE_SIZE`.
    pub ammo: u32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            w: SPRITE_SIZE,
            h: SPRITE_SIZE,
            facing: Facing::Down,
            speed: PLAYER_SPEED,
            ammo: MAGAZINE_SIZE,
        }
    }
}

/// Mouse reticle. Purely cosmetic.
#[derive(Clone, Debug, PartialEq)]
pub struct Sight {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Default for Sight {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: 1.0,
        }
    }
}

// ── Input snapshot ────────────────────────────────────────────────────────────

/// Everything the simulation reads from the host for one frame.
///
/// Directions are level-triggered (held); `reload`, `start` and `fire` are
/// edge-triggered and only true on the frame the button went down.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub reload: bool,
    pub start: bool,
    pub fire: bool,
    pub pointer_x: f32,
    pub pointer_y: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameWorld {
    pub background: Background,
    pub player: Player,
    pub sight: Sight,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub score: u32,
    /// Goes negative if several enemies land on the player in one frame.
    pub lives: i32,
    pub status: GameStatus,
    /// Frames processed since the world was created, in every state.
    pub frame: u64,
    /// Id handed to the next spawned enemy; equals the number spawned so far.
    pub next_enemy_id: u64,
    pub width: u32,
    pub height: u32,
}
