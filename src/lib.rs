//! A simulated desktop for the terminal: boot splash, lock screen, taskbar,
//! start menu and draggable application windows, drawn with ratatui.
//!
//! The window-management core lives in [`window`] and knows nothing about
//! terminals; [`desktop::Desktop`] wires it to the panels and the input
//! drivers.

pub mod actions;
pub mod apps;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod content;
pub mod debug_log;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod host;
pub mod keybindings;
pub mod runner;
pub mod state;
pub mod term_color;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use desktop::Desktop;
pub use error::{DeskError, Result};
