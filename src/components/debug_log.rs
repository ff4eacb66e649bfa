use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

use crate::components::{Component, ComponentContext, TextViewComponent};
use crate::ui::{UiFrame, fill};

pub const DEFAULT_MAX_LINES: usize = 2000;
static GLOBAL_LOG: OnceLock<DebugLogHandle> = OnceLock::new();
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

pub fn set_global_debug_log(handle: DebugLogHandle) -> bool {
    GLOBAL_LOG.set(handle).is_ok()
}

pub fn global_debug_log() -> Option<DebugLogHandle> {
    GLOBAL_LOG.get().cloned()
}

/// Copy panic details into the debug log before the default hook runs.
pub fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Some(handle) = GLOBAL_LOG.get() {
            handle.push("=== PANIC ===");
            if let Some(location) = info.location() {
                handle.push(format!(
                    "{}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                ));
            }
            if let Some(msg) = info.payload().downcast_ref::<&str>() {
                handle.push(format!("message: {msg}"));
            } else if let Some(msg) = info.payload().downcast_ref::<String>() {
                handle.push(format!("message: {msg}"));
            } else {
                handle.push("message: <non-string panic>");
            }
        }
        prev(info);
    }));
}

#[derive(Debug)]
struct DebugLogBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl DebugLogBuffer {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
        }
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

/// Shared ring buffer of log lines; cloned into the tracing writer and the
/// debug window.
#[derive(Clone, Debug)]
pub struct DebugLogHandle {
    inner: Arc<Mutex<DebugLogBuffer>>,
}

impl DebugLogHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DebugLogBuffer::new(max_lines))),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push_line(line.into());
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|buffer| buffer.lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|b| b.lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn writer(&self) -> DebugLogWriter {
        DebugLogWriter::new(self.clone())
    }
}

/// `io::Write` adapter that turns complete lines into buffer entries.
#[derive(Debug)]
pub struct DebugLogWriter {
    handle: DebugLogHandle,
    pending: Vec<u8>,
}

impl DebugLogWriter {
    pub fn new(handle: DebugLogHandle) -> Self {
        Self {
            handle,
            pending: Vec::new(),
        }
    }

    fn flush_pending(&mut self, force: bool) {
        let end = if force {
            self.pending.len()
        } else {
            match self.pending.iter().rposition(|b| *b == b'\n') {
                Some(pos) => pos + 1,
                None => return,
            }
        };
        let drained: Vec<u8> = self.pending.drain(..end).collect();
        let text = String::from_utf8_lossy(&drained);
        for line in text.split('\n').filter(|line| !line.is_empty()) {
            self.handle.push(line.trim_end_matches('\r'));
        }
    }
}

impl Write for DebugLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.flush_pending(false);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_pending(true);
        Ok(())
    }
}

impl Drop for DebugLogWriter {
    fn drop(&mut self) {
        self.flush_pending(true);
    }
}

/// Content of the "Debug Log" window.
#[derive(Debug)]
pub struct DebugLogComponent {
    handle: DebugLogHandle,
    view: TextViewComponent,
}

impl DebugLogComponent {
    pub fn new(handle: DebugLogHandle) -> Self {
        let mut view = TextViewComponent::new();
        view.set_wrap(false);
        view.set_follow_tail(true);
        Self { handle, view }
    }

    pub fn handle(&self) -> &DebugLogHandle {
        &self.handle
    }
}

impl Component for DebugLogComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default()
            .bg(crate::theme::console_bg())
            .fg(crate::theme::window_bg());
        fill(frame.buffer_mut(), area, style);
        let highlight = Style::default().fg(crate::theme::debug_highlight());
        let lines: Vec<Line<'static>> = self
            .handle
            .lines()
            .into_iter()
            .map(|line| {
                if line.contains("PANIC") || line.contains("ERROR") || line.contains("WARN") {
                    Line::from(Span::styled(line, highlight))
                } else {
                    Line::from(line)
                }
            })
            .collect();
        self.view.set_style(style);
        self.view.set_text(Text::from(lines));
        self.view.render(frame, area, ctx);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        self.view.handle_event(event, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use std::io::Write;

    #[test]
    fn buffer_drops_oldest_lines() {
        let handle = DebugLogHandle::new(3);
        for line in ["one", "two", "three", "four"] {
            handle.push(line);
        }
        assert_eq!(handle.lines(), vec!["two", "three", "four"]);
    }

    #[test]
    fn writer_splits_lines_and_flushes_partial() {
        let handle = DebugLogHandle::new(10);
        let mut writer = handle.writer();
        writer.write_all(b"first line\nsecond").unwrap();
        assert_eq!(handle.lines(), vec!["first line"]);
        writer.write_all(b" line\npartial").unwrap();
        writer.flush().unwrap();
        assert_eq!(handle.lines(), vec!["first line", "second line", "partial"]);
    }

    #[test]
    fn dropping_writer_keeps_unterminated_text() {
        let handle = DebugLogHandle::new(10);
        {
            let mut writer = handle.writer();
            writer.write_all(b"no newline").unwrap();
        }
        assert_eq!(handle.lines(), vec!["no newline"]);
    }

    #[test]
    fn component_shows_latest_lines() {
        let handle = DebugLogHandle::new(50);
        for i in 0..20 {
            handle.push(format!("event {i}"));
        }
        let mut comp = DebugLogComponent::new(handle);
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            comp.render(&mut ui, area, &ComponentContext::new(false));
        }
        let last_row: String = (0..8)
            .map(|x| buf.cell((x, 3)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(last_row, "event 19");
    }
}
