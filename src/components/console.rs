//! Toy command-line console. Commands come from a fixed table; `open
//! projects` is the only command that reaches outside the console, through
//! the window manager it is handed.
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext, TextViewComponent};
use crate::constants::PROJECTS_WINDOW_ID;
use crate::ui::{UiFrame, fill, safe_set_string};
use crate::window::WindowManager;

pub const BANNER: &str =
    "> Welcome to Bhushan's Portfolio Terminal\n> Type 'help' for available commands\n";

const OPEN_PROJECTS: &str = "open projects";
const CLEAR: &str = "clear";

const COMMANDS: [(&str, &str); 6] = [
    (
        "help",
        "Available commands: about, skills, projects, contact, clear",
    ),
    (
        "about",
        "I'm a Jr. Product Designer from Bengaluru, India with 1.5 years of experience.",
    ),
    (
        "skills",
        "UI/UX Design, Prototyping, Wireframing, User Research, Interaction Design",
    ),
    ("projects", "Type \"open projects\" to view my portfolio"),
    (
        "contact",
        "Email: bhushan@example.com | LinkedIn: /in/bhushan-talukdar",
    ),
    (CLEAR, "CLEAR"),
];

/// Literal response for a normalized command, if the table has one.
pub fn response_for(command: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, response)| *response)
}

#[derive(Debug)]
pub struct ConsoleComponent {
    output: String,
    input: String,
    view: TextViewComponent,
}

impl ConsoleComponent {
    pub fn new() -> Self {
        let mut view = TextViewComponent::new();
        view.set_follow_tail(true);
        Self {
            output: BANNER.to_string(),
            input: String::new(),
            view,
        }
    }

    /// Everything printed so far, banner included.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The line being typed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Run one command line. The raw text is echoed; matching is done on the
    /// lowercased, trimmed form.
    pub fn execute_command(&mut self, raw: &str, wm: &mut WindowManager) {
        let command = raw.trim().to_lowercase();
        self.output.push_str(&format!("\n> {raw}\n"));
        self.view.set_follow_tail(true);
        tracing::debug!(command = %command, "console command");

        if command == CLEAR {
            self.output = BANNER.to_string();
            return;
        }
        if command == OPEN_PROJECTS {
            wm.show_window(PROJECTS_WINDOW_ID);
            self.output.push_str("Opening projects window...\n");
            return;
        }
        match response_for(&command) {
            Some(response) => self.output.push_str(response),
            None => self
                .output
                .push_str(&format!("Command not found: {command}")),
        }
        self.output.push('\n');
    }

    /// Typing, Backspace and Enter. Returns false for keys the console does
    /// not use so they can fall through to scrolling.
    pub fn handle_key(&mut self, key: &KeyEvent, wm: &mut WindowManager) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.input.push(ch);
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                self.execute_command(&line, wm);
                true
            }
            _ => false,
        }
    }
}

impl Default for ConsoleComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ConsoleComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default()
            .bg(crate::theme::console_bg())
            .fg(crate::theme::console_fg());
        fill(frame.buffer_mut(), area, style);

        let output_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        self.view.set_style(style);
        self.view.set_text(self.output.clone());
        self.view.render(frame, output_area, ctx);

        let prompt_y = area.y.saturating_add(area.height).saturating_sub(1);
        let cursor = if ctx.focused() { "_" } else { "" };
        // keep the tail of long input visible
        let budget = area.width.saturating_sub(3) as usize;
        let typed: String = {
            let count = self.input.chars().count();
            self.input.chars().skip(count.saturating_sub(budget)).collect()
        };
        let prompt = format!("> {typed}{cursor}");
        safe_set_string(
            frame.buffer_mut(),
            area,
            area.x,
            prompt_y,
            &prompt,
            style.add_modifier(Modifier::BOLD),
        );
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        self.view.handle_event(event, ctx)
    }
}
