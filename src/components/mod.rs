use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod background;
pub mod console;
pub mod debug_log;
pub mod dialog_overlay;
pub mod text_view;

pub use background::BackgroundComponent;
pub use console::ConsoleComponent;
pub use debug_log::{DebugLogComponent, DebugLogHandle};
pub use dialog_overlay::DialogOverlayComponent;
pub use text_view::TextViewComponent;

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn resize(&mut self, _area: Rect, _ctx: &ComponentContext) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
