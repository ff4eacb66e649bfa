use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use retro_desk::components::DebugLogHandle;
use retro_desk::config::DeskConfig;
use retro_desk::constants::{
    ABOUT_WINDOW_ID, CONSOLE_WINDOW_ID, DEBUG_WINDOW_ID, INTRO_WINDOW_ID, PROJECTS_WINDOW_ID,
    SKILLS_WINDOW_ID,
};
use retro_desk::desk::Desk;
use retro_desk::easter_egg::{ACHIEVEMENT_MESSAGE, KONAMI_CODE};
use retro_desk::ui::UiFrame;
use retro_desk::window::{Viewport, Visibility};

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

fn desk() -> Desk {
    Desk::new(&DeskConfig::default(), Viewport::new(WIDTH, HEIGHT), None).unwrap()
}

fn draw(desk: &mut Desk) -> Buffer {
    let area = Rect::new(0, 0, WIDTH, HEIGHT);
    let mut buf = Buffer::empty(area);
    let mut frame = UiFrame::from_parts(area, &mut buf);
    desk.render(&mut frame);
    buf
}

fn row_text(buf: &Buffer, row: u16) -> String {
    (0..WIDTH)
        .map(|x| buf.cell((x, row)).unwrap().symbol().to_string())
        .collect()
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn left_click(column: u16, row: u16) -> Event {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Column of `label` in the drawn taskbar row.
fn taskbar_column(desk: &mut Desk, label: &str) -> (u16, u16) {
    let buf = draw(desk);
    let row = desk.window_manager().taskbar_area().y;
    let text = row_text(&buf, row);
    let byte = text.find(label).unwrap_or_else(|| panic!("{label} not on taskbar"));
    (text[..byte].chars().count() as u16, row)
}

#[test]
fn showing_a_then_b_moves_the_taskbar_highlight() {
    let mut desk = desk();
    let now = Instant::now();
    let (col, row) = taskbar_column(&mut desk, "About");
    desk.handle_event(&left_click(col, row), now);
    assert!(desk.taskbar().is_highlighted(ABOUT_WINDOW_ID));

    let (col, row) = taskbar_column(&mut desk, "Skills");
    desk.handle_event(&left_click(col, row), now);
    assert!(desk.taskbar().is_highlighted(SKILLS_WINDOW_ID));
    assert!(!desk.taskbar().is_highlighted(ABOUT_WINDOW_ID));
    let highlighted = desk
        .taskbar()
        .entries()
        .iter()
        .filter(|entry| entry.is_highlighted())
        .count();
    assert_eq!(highlighted, 1);
}

#[test]
fn clicking_the_active_entry_minimizes_and_clicking_again_restores() {
    let mut desk = desk();
    let now = Instant::now();
    let (col, row) = taskbar_column(&mut desk, "Welcome");
    assert!(desk.window_manager().is_active(INTRO_WINDOW_ID));

    desk.handle_event(&left_click(col, row), now);
    assert_eq!(
        desk.window_manager().window(INTRO_WINDOW_ID).unwrap().visibility(),
        Visibility::Minimizing
    );
    assert!(!desk.taskbar().is_highlighted(INTRO_WINDOW_ID));

    desk.tick(now + Duration::from_secs(1));
    assert_eq!(
        desk.window_manager().window(INTRO_WINDOW_ID).unwrap().visibility(),
        Visibility::Minimized
    );

    desk.handle_event(&left_click(col, row), now + Duration::from_secs(2));
    assert!(desk.window_manager().is_active(INTRO_WINDOW_ID));
    assert!(desk.taskbar().is_highlighted(INTRO_WINDOW_ID));
}

#[test]
fn clicking_an_inactive_entry_raises_without_minimizing() {
    let mut desk = desk();
    let now = Instant::now();
    desk.window_manager_mut().show_window(ABOUT_WINDOW_ID);
    let (col, row) = taskbar_column(&mut desk, "Welcome");
    desk.handle_event(&left_click(col, row), now);
    assert!(desk.window_manager().is_active(INTRO_WINDOW_ID));
    assert_eq!(
        desk.window_manager().window(ABOUT_WINDOW_ID).unwrap().visibility(),
        Visibility::Shown
    );
}

#[test]
fn konami_code_unlocks_the_achievement() {
    let mut desk = desk();
    let now = Instant::now();
    // a wrong key midway restarts the sequence
    desk.handle_event(&key(KeyCode::Up), now);
    desk.handle_event(&key(KeyCode::Left), now);
    assert!(!desk.dialog().visible());
    for code in KONAMI_CODE {
        desk.handle_event(&key(code), now);
    }
    assert!(desk.dialog().visible());
    assert_eq!(desk.dialog().body(), ACHIEVEMENT_MESSAGE);
    assert!(desk.state().rainbow_enabled());

    let buf = draw(&mut desk);
    let text: String = buf.content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("Retro Master"));
}

#[test]
fn mouse_motion_moves_the_background_glow() {
    let mut desk = desk();
    desk.handle_event(
        &Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: WIDTH / 2,
            row: HEIGHT / 4,
            modifiers: KeyModifiers::NONE,
        }),
        Instant::now(),
    );
    let (x, y) = desk.background().pointer_percent().unwrap();
    assert!((x - 50.0).abs() < 0.01);
    assert!((y - 25.0).abs() < 0.01);
}

#[test]
fn resize_refits_maximized_windows() {
    let mut desk = desk();
    desk.window_manager_mut().toggle_maximize(INTRO_WINDOW_ID);
    desk.handle_event(&Event::Resize(80, 20), Instant::now());
    let geometry = desk
        .window_manager()
        .window(INTRO_WINDOW_ID)
        .unwrap()
        .geometry();
    assert_eq!((geometry.width, geometry.height), (80, 19));
}

#[test]
fn debug_window_toggles_only_when_enabled() {
    let config = DeskConfig {
        debug: true,
        ..DeskConfig::default()
    };
    let handle = DebugLogHandle::new(50);
    handle.push("hello from the log");
    let mut desk = Desk::new(&config, Viewport::new(WIDTH, HEIGHT), Some(handle)).unwrap();
    let now = Instant::now();
    desk.handle_event(&key(KeyCode::F(12)), now);
    assert!(desk.window_manager().is_active(DEBUG_WINDOW_ID));
    let buf = draw(&mut desk);
    let text: String = buf.content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("hello from the log"));

    desk.handle_event(&key(KeyCode::F(12)), now);
    assert!(!desk.window_manager().is_active(DEBUG_WINDOW_ID));

    let mut plain = self::desk();
    plain.handle_event(&key(KeyCode::F(12)), now);
    assert!(plain.window_manager().window(DEBUG_WINDOW_ID).is_none());
}

#[test]
fn alt_digit_opens_the_console_and_keys_reach_it() {
    let mut desk = desk();
    let now = Instant::now();
    desk.handle_event(
        &Event::Key(KeyEvent::new(KeyCode::Char('6'), KeyModifiers::ALT)),
        now,
    );
    assert!(desk.window_manager().is_active(CONSOLE_WINDOW_ID));
    for ch in "contact".chars() {
        desk.handle_event(&key(KeyCode::Char(ch)), now);
    }
    desk.handle_event(&key(KeyCode::Enter), now);
    assert!(desk.console().unwrap().output().contains("Email:"));
}

#[test]
fn releasing_the_pointer_under_the_dialog_ends_the_drag() {
    let mut desk = desk();
    let now = Instant::now();
    let start = desk
        .window_manager()
        .window(INTRO_WINDOW_ID)
        .unwrap()
        .geometry();
    let (x, y) = ((start.left + 2) as u16, start.top as u16);
    desk.handle_event(&left_click(x, y), now);
    assert!(desk.window_manager().is_dragging());

    for code in KONAMI_CODE {
        desk.handle_event(&key(code), now);
    }
    assert!(desk.dialog().visible());
    desk.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), x, y), now);
    desk.handle_event(&key(KeyCode::Enter), now);
    assert!(!desk.dialog().visible());
    assert!(!desk.window_manager().is_dragging());

    desk.handle_event(&mouse(MouseEventKind::Moved, x + 10, y + 5), now);
    assert_eq!(
        desk.window_manager()
            .window(INTRO_WINDOW_ID)
            .unwrap()
            .geometry(),
        start
    );
}

#[test]
fn page_windows_restore_their_declared_geometry() {
    let mut desk = desk();
    let wm = desk.window_manager_mut();
    wm.show_window(PROJECTS_WINDOW_ID);
    let before = wm.window(PROJECTS_WINDOW_ID).unwrap().geometry();
    wm.toggle_maximize(PROJECTS_WINDOW_ID);
    assert!(wm.window(PROJECTS_WINDOW_ID).unwrap().is_maximized());
    wm.toggle_maximize(PROJECTS_WINDOW_ID);
    assert_eq!(wm.window(PROJECTS_WINDOW_ID).unwrap().geometry(), before);
}
