use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use retro_desk::window::{Geometry, Viewport, Visibility, WindowManager, WindowSpec, WmConfig};

fn manager() -> WindowManager {
    WindowManager::new(
        vec![
            WindowSpec::new("intro", "Welcome", 30, 10),
            WindowSpec::new("about", "About", 40, 12),
            WindowSpec::new("skills", "Skills", 24, 8).with_explicit_size(),
        ],
        Viewport::new(100, 40),
        WmConfig::terminal(),
    )
    .expect("unique ids")
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn assert_single_active_on_top(wm: &WindowManager) {
    let active: Vec<_> = wm.windows().filter(|w| wm.is_active(w.id().as_str())).collect();
    assert!(active.len() <= 1);
    if let Some(active) = active.first() {
        let top = wm.draw_order().last().map(|w| w.id().clone());
        assert_eq!(top.as_ref(), Some(active.id()));
    }
}

#[test]
fn at_most_one_window_is_active_and_it_is_topmost() {
    let mut wm = manager();
    let now = Instant::now();
    assert_single_active_on_top(&wm);
    wm.show_window("intro");
    assert_single_active_on_top(&wm);
    wm.show_window("about");
    assert_single_active_on_top(&wm);
    wm.bring_to_front("intro");
    assert_single_active_on_top(&wm);
    wm.minimize_window_at("intro", now);
    assert_single_active_on_top(&wm);
    wm.show_window("skills");
    wm.close_window("about");
    assert_single_active_on_top(&wm);
    wm.tick(now + Duration::from_secs(1));
    assert_single_active_on_top(&wm);
    assert!(wm.is_active("skills"));
}

#[test]
fn first_show_centers_in_the_desktop_area() {
    let mut wm = manager();
    wm.show_window("about");
    let desktop = wm.desktop_area();
    let geometry = wm.window("about").unwrap().geometry();
    assert_eq!(geometry.left, (desktop.width as i32 - 40) / 2);
    assert_eq!(geometry.top, (desktop.height as i32 - 12) / 2);

    // a later show keeps the position the user left it at
    wm.begin_drag("about", geometry.left, geometry.top);
    wm.drag_to(0, 0);
    wm.end_drag();
    wm.close_window("about");
    wm.show_window("about");
    let moved = wm.window("about").unwrap().geometry();
    assert_eq!((moved.left, moved.top), (0, 0));
}

#[test]
fn dragging_is_clamped_for_any_pointer_position() {
    let mut wm = manager();
    wm.show_window("skills");
    let taskbar = WmConfig::terminal().taskbar_height as i32;
    let viewport = wm.viewport();
    for x in (-50..150).step_by(7) {
        for y in (-20..70).step_by(5) {
            let start = wm.window("skills").unwrap().geometry();
            wm.begin_drag("skills", start.left + 2, start.top);
            wm.drag_to(x, y);
            wm.end_drag();
            let g = wm.window("skills").unwrap().geometry();
            assert!(g.left >= 0 && g.top >= 0, "negative origin at ({x},{y})");
            assert!(g.left + g.width as i32 <= viewport.width as i32);
            assert!(g.top + g.height as i32 <= viewport.height as i32 - taskbar);
        }
    }
}

#[test]
fn maximize_then_restore_returns_the_original_geometry() {
    let mut wm = manager();
    wm.show_window("skills");
    let before = wm.window("skills").unwrap().geometry();
    wm.toggle_maximize("skills");
    let desktop = wm.desktop_area();
    assert_eq!(
        wm.window("skills").unwrap().geometry(),
        Geometry::new(0, 0, desktop.width, desktop.height)
    );
    wm.toggle_maximize("skills");
    assert_eq!(wm.window("skills").unwrap().geometry(), before);
    assert!(!wm.window("skills").unwrap().is_maximized());
}

#[test]
fn restoring_an_unsized_window_uses_the_default_size() {
    let mut wm = manager();
    wm.show_window("intro");
    let origin = wm.window("intro").unwrap().geometry();
    wm.toggle_maximize("intro");
    wm.toggle_maximize("intro");
    let restored = wm.window("intro").unwrap().geometry();
    let config = WmConfig::terminal();
    assert_eq!((restored.left, restored.top), (origin.left, origin.top));
    assert_eq!(
        (restored.width, restored.height),
        (config.default_restore_width, config.default_restore_height)
    );
}

#[test]
fn minimize_then_show_before_the_delay_ends_shown() {
    let mut wm = manager();
    let now = Instant::now();
    wm.show_window("about");
    wm.minimize_window_at("about", now);
    assert_eq!(wm.window("about").unwrap().visibility(), Visibility::Minimizing);
    wm.show_window("about");
    wm.tick(now + Duration::from_secs(5));
    assert_eq!(wm.window("about").unwrap().visibility(), Visibility::Shown);
    assert!(wm.is_active("about"));
}

#[test]
fn minimize_hides_after_the_delay() {
    let mut wm = manager();
    let now = Instant::now();
    wm.show_window("about");
    wm.minimize_window_at("about", now);
    wm.tick(now + Duration::from_millis(10));
    assert_eq!(wm.window("about").unwrap().visibility(), Visibility::Minimizing);
    wm.tick(now + WmConfig::terminal().minimize_delay);
    assert_eq!(wm.window("about").unwrap().visibility(), Visibility::Minimized);
    assert!(wm.active_id().is_none());
}

#[test]
fn unknown_ids_are_ignored() {
    let mut wm = manager();
    wm.show_window("nope");
    wm.close_window("nope");
    wm.toggle_maximize("nope");
    wm.begin_drag("nope", 1, 1);
    assert!(wm.active_id().is_none());
    assert!(!wm.is_dragging());
}

#[test]
fn header_drag_through_pointer_events() {
    let mut wm = manager();
    wm.show_window("skills");
    let g = wm.window("skills").unwrap().geometry();
    let (hx, hy) = ((g.left + 2) as u16, g.top as u16);
    assert!(wm.handle_pointer_event(&mouse(MouseEventKind::Down(MouseButton::Left), hx, hy)));
    assert!(wm.is_dragging());
    assert!(wm.handle_pointer_event(&mouse(
        MouseEventKind::Drag(MouseButton::Left),
        hx + 10,
        hy + 5
    )));
    assert!(wm.handle_pointer_event(&mouse(MouseEventKind::Up(MouseButton::Left), hx + 10, hy + 5)));
    let moved = wm.window("skills").unwrap().geometry();
    assert_eq!((moved.left, moved.top), (g.left + 10, g.top + 5));
    assert!(!wm.is_dragging());
}

#[test]
fn clicking_a_lower_window_body_focuses_it() {
    let mut wm = manager();
    wm.show_window("skills");
    let g = wm.window("skills").unwrap().geometry();
    wm.begin_drag("skills", g.left, g.top);
    wm.drag_to(0, 0);
    wm.end_drag();
    wm.show_window("about");
    let skills = wm.window("skills").unwrap().geometry();
    // the parked skills window is clear of the centered about window
    let (x, y) = (skills.left + 1, skills.top + skills.height as i32 - 1);
    assert_eq!(wm.window_at(x, y).map(|id| id.as_str()), Some("skills"));
    assert!(wm.handle_pointer_event(&mouse(
        MouseEventKind::Down(MouseButton::Left),
        x as u16,
        y as u16
    )));
    assert!(wm.is_active("skills"));
}
