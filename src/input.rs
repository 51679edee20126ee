//! Terminal events → per-frame button state.
//!
//! Input model: instead of acting on each event as it arrives, the tracker
//! records the frame of the last press/repeat event for every button.  A
//! button is "held" while that record is fresh (within `HOLD_WINDOW` frames)
//! and "just pressed" on the frame a press event arrived.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events → buttons are dropped on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  Buttons expire after `HOLD_WINDOW` frames of
//!   silence, so a hold stutters once during the OS initial repeat delay.

use std::collections::{HashMap, HashSet};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::entities::FrameInput;

/// A button counts as held if it was seen within this many frames.
///
/// 4 frames (≈133 ms at 30 fps) outlasts the gap between OS key repeats, but
/// not the initial delay before the first repeat (typically 250-600 ms).  On
/// terminals without release events a held direction therefore moves a few
/// pixels, stalls until repeats begin, then continues.  Enhanced terminals
/// are unaffected because they report the release explicitly.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Reload,
    Start,
    Fire,
}

/// What the frame loop should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

fn button_for(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Button::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Button::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::Right),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Button::Reload),
        KeyCode::Char(' ') => Some(Button::Start),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[derive(Debug, Default)]
pub struct InputTracker {
    frame: u64,
    /// Each held button → the frame it was last seen (press or repeat).
    last_seen: HashMap<Button, u64>,
    /// Buttons whose press arrived since the last snapshot.
    pressed: HashSet<Button>,
    pointer: (f32, f32),
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event.
    pub fn handle(&mut self, event: &Event) -> Control {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => self.handle_key(*code, *modifiers, *kind),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Control::Continue
            }
            _ => Control::Continue,
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Control {
        if kind == KeyEventKind::Press && is_quit(code, modifiers) {
            return Control::Quit;
        }
        let Some(button) = button_for(code) else {
            return Control::Continue;
        };
        match kind {
            KeyEventKind::Press => self.press(button),
            // Refresh timestamp so the button stays held
            KeyEventKind::Repeat => {
                self.last_seen.insert(button, self.frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&button);
            }
        }
        Control::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        // One cell is one pixel wide and two pixels tall.
        self.pointer = (mouse.column as f32, mouse.row as f32 * 2.0);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(Button::Fire),
            MouseEventKind::Up(MouseButton::Left) => {
                self.last_seen.remove(&Button::Fire);
            }
            _ => {}
        }
    }

    fn press(&mut self, button: Button) {
        self.last_seen.insert(button, self.frame);
        self.pressed.insert(button);
    }

    /// Returns true if `button` was seen within the last `HOLD_WINDOW` frames.
    pub fn is_held(&self, button: Button) -> bool {
        self.last_seen
            .get(&button)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn just_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    /// State for the frame being simulated.  Clears just-pressed edges and
    /// moves the tracker on to the next frame.
    pub fn snapshot(&mut self) -> FrameInput {
        let input = FrameInput {
            up: self.is_held(Button::Up),
            down: self.is_held(Button::Down),
            left: self.is_held(Button::Left),
            right: self.is_held(Button::Right),
            reload: self.just_pressed(Button::Reload),
            start: self.just_pressed(Button::Start),
            fire: self.just_pressed(Button::Fire),
            pointer_x: self.pointer.0,
            pointer_y: self.pointer.1,
        };
        self.pressed.clear();
        self.frame += 1;
        input
    }
}
