pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod desk;
pub mod drivers;
pub mod easter_egg;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod portfolio;
pub mod runner;
pub mod scheduler;
pub mod state;
pub mod taskbar;
pub mod term_color;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
