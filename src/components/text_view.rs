use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::ui::{UiFrame, safe_set_string};

const WHEEL_STEP: usize = 3;

/// Scrollable block of text with an optional one-column scrollbar.
#[derive(Debug)]
pub struct TextViewComponent {
    text: Text<'static>,
    style: Style,
    wrap: bool,
    offset: usize,
    total: usize,
    view: usize,
    follow_tail: bool,
    area: Rect,
}

impl TextViewComponent {
    pub fn new() -> Self {
        Self {
            text: Text::from(vec![Line::from(String::new())]),
            style: Style::default(),
            wrap: true,
            offset: 0,
            total: 0,
            view: 0,
            follow_tail: false,
            area: Rect::default(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<Text<'static>>) {
        self.text = text.into();
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Keep the view pinned to the last line as text grows.
    pub fn set_follow_tail(&mut self, follow: bool) {
        self.follow_tail = follow;
    }

    pub fn follow_tail(&self) -> bool {
        self.follow_tail
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.view)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.view == 0 || self.offset >= self.max_offset()
    }

    pub fn rendered_lines(&self) -> Vec<String> {
        self.text
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = (self.offset as isize + delta).max(0) as usize;
        self.offset = next.min(self.max_offset());
        self.follow_tail = self.is_at_bottom();
    }

    fn render_scrollbar(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 || self.total <= self.view {
            return;
        }
        let height = area.height as usize;
        let thumb = (height * self.view / self.total).max(1);
        let travel = height.saturating_sub(thumb);
        let max_offset = self.max_offset().max(1);
        let start = travel * self.offset / max_offset;
        let x = area.x.saturating_add(area.width).saturating_sub(1);
        let buffer = frame.buffer_mut();
        for row in 0..height {
            let symbol = if row >= start && row < start + thumb {
                "█"
            } else {
                "│"
            };
            safe_set_string(buffer, area, x, area.y + row as u16, symbol, self.style);
        }
    }
}

impl Default for TextViewComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TextViewComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let view = area.height as usize;
        let mut content_width = area.width;
        let mut total = self.display_lines(content_width);
        if total > view && content_width > 1 {
            content_width -= 1;
            total = self.display_lines(content_width);
        }
        self.total = total;
        self.view = view;
        if self.follow_tail {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }

        let mut paragraph = Paragraph::new(self.text.clone()).style(self.style);
        if self.wrap {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }
        paragraph = paragraph.scroll((self.offset.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(
            paragraph,
            Rect {
                width: content_width,
                ..area
            },
        );
        self.render_scrollbar(frame, area);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Mouse(mouse) => {
                let inside = mouse.column >= self.area.x
                    && mouse.row >= self.area.y
                    && mouse.column < self.area.x.saturating_add(self.area.width)
                    && mouse.row < self.area.y.saturating_add(self.area.height);
                if !inside {
                    return false;
                }
                match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        self.scroll_by(-(WHEEL_STEP as isize));
                        true
                    }
                    MouseEventKind::ScrollDown => {
                        self.scroll_by(WHEEL_STEP as isize);
                        true
                    }
                    _ => false,
                }
            }
            Event::Key(key) if ctx.focused() && key.kind != KeyEventKind::Release => {
                let page = self.view.max(1) as isize;
                match key.code {
                    KeyCode::Up => self.scroll_by(-1),
                    KeyCode::Down => self.scroll_by(1),
                    KeyCode::PageUp => self.scroll_by(-page),
                    KeyCode::PageDown => self.scroll_by(page),
                    KeyCode::Home => self.scroll_by(-(self.offset as isize)),
                    KeyCode::End => self.scroll_by(self.max_offset() as isize),
                    _ => return false,
                }
                true
            }
            _ => false,
        }
    }
}

impl TextViewComponent {
    fn display_lines(&self, width: u16) -> usize {
        if !self.wrap {
            return self.text.lines.len().max(1);
        }
        compute_display_lines(&self.text, width)
    }
}

// Character-wrap estimate of the rendered row count.
fn compute_display_lines(text: &Text<'_>, width: u16) -> usize {
    let usable = width.max(1) as usize;
    text.lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(usable))
        .sum::<usize>()
        .max(1)
}
