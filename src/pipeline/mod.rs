//! Terminal Pipeline
//!
//! Connects the screen to a real terminal.
//!
//! ```text
//! Instant::elapsed → Screen::advance_to → ScreenFrame → paint → FrameBuffer → DiffRenderer
//! ```
//!
//! - **terminal** - Terminal size signals
//! - **input** - Quit and resize events from crossterm
//! - **mount** - Raw mode, alternate screen, the render loop

pub mod input;
pub mod mount;
pub mod terminal;

pub use input::HostEvent;
pub use mount::{mount, run, tick, unmount, MountHandle};
pub use terminal::{set_terminal_size, terminal_height, terminal_size, terminal_width};
