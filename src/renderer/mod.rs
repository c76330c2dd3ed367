//! Renderer - Frame snapshot to terminal cells
//!
//! - **paint** - Lays a `ScreenFrame` out on a `FrameBuffer`
//! - **buffer** - 2D grid of cells with opacity-aware glyph drawing
//! - **diff** - Writes only changed cells through crossterm

pub mod buffer;
pub mod diff;
pub mod paint;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use paint::paint;
