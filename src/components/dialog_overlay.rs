use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

// borders plus a blank line above and below the body and the button row
const DIALOG_HEIGHT: u16 = 7;
const MIN_WIDTH: u16 = 24;
const H_PADDING: u16 = 6;

/// Centered modal message box over a dimmed desk. Any confirming key or a
/// click dismisses it.
#[derive(Debug, Clone)]
pub struct DialogOverlayComponent {
    title: String,
    body: String,
    visible: bool,
}

impl DialogOverlayComponent {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            visible: false,
        }
    }

    pub fn show(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.title = title.into();
        self.body = body.into();
        self.visible = true;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Box wide enough for the title and body on one line, clamped to `area`.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let text = self
            .body
            .chars()
            .count()
            .max(self.title.chars().count() + 2);
        let preferred = u16::try_from(text)
            .unwrap_or(u16::MAX)
            .saturating_add(H_PADDING)
            .max(MIN_WIDTH);
        let width = area.width.min(preferred).max(1);
        let height = area.height.min(DIALOG_HEIGHT).max(1);
        let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
        let y = area
            .y
            .saturating_add(area.height.saturating_sub(height) / 2);
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for DialogOverlayComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DialogOverlayComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        let buffer = frame.buffer_mut();
        let backdrop = area.intersection(buffer.area);
        for y in backdrop.y..backdrop.y.saturating_add(backdrop.height) {
            for x in backdrop.x..backdrop.x.saturating_add(backdrop.width) {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.modifier.insert(Modifier::DIM);
                }
            }
        }
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(crate::theme::dialog_separator()));
        let paragraph = Paragraph::new(format!("\n{}\n\n[ OK ]", self.body))
            .style(
                Style::default()
                    .bg(crate::theme::dialog_bg())
                    .fg(crate::theme::dialog_fg()),
            )
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if !self.visible {
            return false;
        }
        let dismiss = match event {
            Event::Key(key) => {
                key.kind != KeyEventKind::Release
                    && matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
            }
            Event::Mouse(mouse) => mouse.kind == MouseEventKind::Down(MouseButton::Left),
            _ => false,
        };
        if dismiss {
            self.visible = false;
        }
        // modal: swallow everything while shown
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;

    #[test]
    fn rect_for_clamps_sizes() {
        let dlg = DialogOverlayComponent::new();
        let r = dlg.rect_for(Rect::new(0, 0, 10, 2));
        assert!(r.width >= 1);
        assert!(r.height >= 1);
        assert!(r.width <= 10 && r.height <= 2);

        let r2 = dlg.rect_for(Rect::new(0, 0, 80, 10));
        assert_eq!(r2.width, MIN_WIDTH);
        assert_eq!(r2.height, DIALOG_HEIGHT);
        assert_eq!(r2.x, (80 - r2.width) / 2);
    }

    #[test]
    fn width_follows_the_message() {
        let mut dlg = DialogOverlayComponent::new();
        let body = "x".repeat(50);
        dlg.show("Title", body.clone());
        let r = dlg.rect_for(Rect::new(0, 0, 120, 40));
        assert_eq!(r.width, 50 + H_PADDING);
        // never wider than the screen
        let narrow = dlg.rect_for(Rect::new(0, 0, 40, 40));
        assert_eq!(narrow.width, 40);
    }

    #[test]
    fn modal_swallows_keys_until_dismissed() {
        let mut dlg = DialogOverlayComponent::new();
        let ctx = ComponentContext::default().with_overlay(true);
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert!(!dlg.handle_event(&key(KeyCode::Enter), &ctx));

        dlg.show("Hello", "World");
        assert!(dlg.visible());
        assert!(dlg.handle_event(&key(KeyCode::Char('x')), &ctx));
        assert!(dlg.visible());
        assert!(dlg.handle_event(&key(KeyCode::Esc), &ctx));
        assert!(!dlg.visible());
    }

    #[test]
    fn render_shows_title_and_body() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let mut dlg = DialogOverlayComponent::new();
        dlg.show("Achievement", "Retro Master!");
        {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            dlg.render(&mut ui, area, &ComponentContext::default());
        }
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect();
        assert!(text.contains("Achievement"));
        assert!(text.contains("Retro Master!"));
        assert!(text.contains("[ OK ]"));
    }
}
