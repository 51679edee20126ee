use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use top_down_shooter::input::*;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn key_kind(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn held_key_expires_after_hold_window() {
    let mut t = InputTracker::new();
    t.handle(&key(KeyCode::Char('w')));

    // Seen on frame 0, held through frame HOLD_WINDOW.
    for _ in 0..=HOLD_WINDOW {
        assert!(t.snapshot().up);
    }
    assert!(!t.snapshot().up);
}

#[test]
fn repeat_keeps_key_held() {
    let mut t = InputTracker::new();
    t.handle(&key(KeyCode::Left));
    for _ in 0..3 {
        t.snapshot();
    }
    t.handle(&key_kind(KeyCode::Left, KeyEventKind::Repeat));
    for _ in 0..=HOLD_WINDOW {
        assert!(t.snapshot().left);
    }
}

#[test]
fn late_first_repeat_resumes_a_stalled_hold() {
    // Classic terminal: 500 ms of silence before the OS starts repeating.
    let mut t = InputTracker::new();
    t.handle(&key(KeyCode::Char('s')));
    let stalled = (0..15).filter(|_| !t.snapshot().down).count();
    assert_eq!(stalled as u64, 15 - (HOLD_WINDOW + 1));

    t.handle(&key(KeyCode::Char('s')));
    assert!(t.snapshot().down);
}

#[test]
fn release_drops_key_immediately() {
    let mut t = InputTracker::new();
    t.handle(&key(KeyCode::Char('d')));
    assert!(t.snapshot().right);
    t.handle(&key_kind(KeyCode::Char('d'), KeyEventKind::Release));
    assert!(!t.snapshot().right);
}

#[test]
fn arrows_and_wasd_map_to_the_same_buttons() {
    let mut t = InputTracker::new();
    t.handle(&key(KeyCode::Up));
    t.handle(&key(KeyCode::Char('S')));
    t.handle(&key(KeyCode::Char('a')));
    t.handle(&key(KeyCode::Right));
    let input = t.snapshot();
    assert!(input.up && input.down && input.left && input.right);
}

#[test]
fn start_and_reload_are_edge_triggered() {
    let mut t = InputTracker::new();
    t.handle(&key(KeyCode::Char(' ')));
    t.handle(&key(KeyCode::Char('r')));
    let first = t.snapshot();
    assert!(first.start && first.reload);

    let second = t.snapshot();
    assert!(!second.start && !second.reload);
    assert!(t.is_held(Button::Start));
}

#[test]
fn left_click_fires_once_and_moves_pointer() {
    let mut t = InputTracker::new();
    t.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12));
    let input = t.snapshot();
    assert!(input.fire);
    assert_eq!((input.pointer_x, input.pointer_y), (40.0, 24.0));
    assert!(!t.snapshot().fire);
}

#[test]
fn other_mouse_buttons_do_not_fire() {
    let mut t = InputTracker::new();
    t.handle(&mouse(MouseEventKind::Down(MouseButton::Right), 1, 1));
    assert!(!t.snapshot().fire);
}

#[test]
fn pointer_follows_motion() {
    let mut t = InputTracker::new();
    t.handle(&mouse(MouseEventKind::Moved, 10, 5));
    t.handle(&mouse(MouseEventKind::Moved, 11, 6));
    let input = t.snapshot();
    assert_eq!((input.pointer_x, input.pointer_y), (11.0, 12.0));
}

#[test]
fn quit_keys() {
    let mut t = InputTracker::new();
    assert_eq!(t.handle(&key(KeyCode::Char('q'))), Control::Quit);
    assert_eq!(t.handle(&key(KeyCode::Esc)), Control::Quit);
    assert_eq!(
        t.handle(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
        Control::Quit
    );
    assert_eq!(t.handle(&key(KeyCode::Char('c'))), Control::Continue);
    assert_eq!(t.handle(&Event::Resize(80, 24)), Control::Continue);
}
