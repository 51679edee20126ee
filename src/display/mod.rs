//! Rendering layer — all drawing lives here.
//!
//! Each function receives a canvas (or a writer) and an immutable view of the
//! game world.  No game logic is performed; this module only translates
//! state into drawing calls, in a fixed back-to-front order.

pub mod canvas;
pub mod terminal;

use std::io::Write;

use crate::assets::{enemy_region, player_region, Region, SpriteSheet};
use crate::entities::{Bullet, Enemy, GameStatus, GameWorld, WINNING_SCORE};

use self::canvas::Canvas;
use self::terminal::TerminalScreen;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_CLEAR: u8 = 0;
const C_TEXT: u8 = 7;
const C_BULLET: u8 = 2;
const C_SIGHT: u8 = 0;
/// Sheet colour treated as transparent when blitting.
const COLKEY: Option<u8> = Some(0);

const BULLET_RADIUS: u32 = 1;

// ── Public entry points ───────────────────────────────────────────────────────

/// Draw one complete frame and put it on the terminal.
pub fn render<W: Write>(
    out: &mut W,
    screen: &mut TerminalScreen,
    world: &GameWorld,
    sheet: &SpriteSheet,
) -> std::io::Result<()> {
    draw(screen.canvas_mut(), world, sheet);
    screen.present(out)
}

/// Draw the screen for the world's current status.
pub fn draw(canvas: &mut Canvas, world: &GameWorld, sheet: &SpriteSheet) {
    match world.status {
        GameStatus::Start => draw_title(canvas),
        GameStatus::Play => draw_play(canvas, world, sheet),
        GameStatus::End => draw_end(canvas, world),
    }
}

/// Column at which `text` is horizontally centred.
fn centred_x(canvas: &Canvas, text: &str) -> f32 {
    canvas.width().saturating_sub(text.chars().count() as u32) as f32 / 2.0
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_title(canvas: &mut Canvas) {
    canvas.cls(C_CLEAR);
    let prompt = "Press SPACE to start";
    let y = (canvas.height() as f32 * 5.0 / 12.0).floor();
    let x = centred_x(canvas, prompt);
    canvas.text(x, y, prompt, C_TEXT);
}

fn draw_play(canvas: &mut Canvas, world: &GameWorld, sheet: &SpriteSheet) {
    canvas.cls(C_CLEAR);
    draw_background(canvas, world, sheet);

    for enemy in &world.enemies {
        draw_enemy(canvas, enemy, sheet);
    }
    let p = &world.player;
    canvas.blt(p.x, p.y, sheet, player_region(p.facing), COLKEY);
    for bullet in &world.bullets {
        draw_bullet(canvas, bullet);
    }

    // Sight
    canvas.circ(world.sight.x, world.sight.y, world.sight.size as u32, C_SIGHT);

    draw_hud(canvas, world);
}

fn draw_end(canvas: &mut Canvas, world: &GameWorld) {
    canvas.cls(C_CLEAR);

    let headline = if world.score >= WINNING_SCORE {
        "YOU WIN"
    } else {
        "GAME OVER"
    };
    let score_line = format!("Final Score: {}", world.score);
    let lines = [headline, score_line.as_str(), "Press SPACE to restart"];

    let top = (canvas.height() / 2).saturating_sub(lines.len() as u32 * 4) as f32;
    for (i, line) in lines.iter().enumerate() {
        let x = centred_x(canvas, line);
        canvas.text(x, top + i as f32 * 8.0, line, C_TEXT);
    }
}

// ── Play-screen pieces ────────────────────────────────────────────────────────

fn draw_background(canvas: &mut Canvas, world: &GameWorld, sheet: &SpriteSheet) {
    let size = world.background.tile_size;
    for (row, tiles) in world.background.tiles.iter().enumerate() {
        for (col, &(u, v)) in tiles.iter().enumerate() {
            let region = Region { u, v, w: size, h: size };
            let x = (col as u32 * size) as f32;
            let y = (row as u32 * size) as f32;
            canvas.blt(x, y, sheet, region, COLKEY);
        }
    }
}

fn draw_enemy(canvas: &mut Canvas, enemy: &Enemy, sheet: &SpriteSheet) {
    canvas.blt(enemy.x, enemy.y, sheet, enemy_region(enemy.facing), COLKEY);
}

fn draw_bullet(canvas: &mut Canvas, bullet: &Bullet) {
    canvas.circ(bullet.x, bullet.y, BULLET_RADIUS, C_BULLET);
}

fn draw_hud(canvas: &mut Canvas, world: &GameWorld) {
    let hud = format!(
        "Bullets: {}  Score: {}  Lives: {}",
        world.player.ammo,
        world.score,
        world.lives.max(0)
    );
    canvas.text(2.0, 2.0, &hud, C_TEXT);
}
