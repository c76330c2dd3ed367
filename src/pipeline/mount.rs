//! Mount API - Terminal lifecycle and render loop.
//!
//! Mounting switches the terminal to raw mode and the alternate screen,
//! builds a [`Screen`] and makes it appear. Every tick drives the screen's
//! scheduler to the wall-clock time elapsed since mounting, paints the
//! frame and writes the changed cells.
//!
//! # Example
//!
//! ```ignore
//! use spark_kinetic::pipeline::mount;
//!
//! let mut handle = mount::mount(TimelineConfig::default())?;
//!
//! // Option 1: Run blocking until q, Esc or Ctrl+C
//! mount::run(&mut handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&mut handle)? {
//!     // Your logic here
//! }
//!
//! mount::unmount(handle)?;
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::debug;

use super::input::{poll_event, HostEvent};
use super::terminal::{detect_terminal_size, set_terminal_size, terminal_size};
use crate::config::TimelineConfig;
use crate::renderer::{paint, DiffRenderer, FrameBuffer};
use crate::screen::Screen;

/// Input poll timeout, about 60 frames per second.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`]. Dropping it restores the terminal.
pub struct MountHandle {
    screen: Screen,
    renderer: DiffRenderer<io::Stdout>,
    buffer: FrameBuffer,
    started: Instant,
    running: Arc<AtomicBool>,
    restored: bool,
}

impl MountHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request shutdown; the next tick returns `false`.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Flag shared with code that wants to stop the loop.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Disappear the screen and give the terminal back.
    pub fn unmount(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.running.store(false, Ordering::SeqCst);
        self.screen.on_disappear();

        self.renderer.exit_fullscreen()?;
        disable_raw_mode()?;
        debug!("terminal restored");
        Ok(())
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        // Best effort, errors have nowhere to go
        let _ = self.restore();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Take over the terminal and start the screen.
pub fn mount(config: TimelineConfig) -> io::Result<MountHandle> {
    detect_terminal_size();
    let (width, height) = terminal_size();

    enable_raw_mode()?;
    let mut renderer = DiffRenderer::stdout();
    if let Err(err) = renderer.enter_fullscreen() {
        let _ = disable_raw_mode();
        return Err(err);
    }

    let screen = Screen::new(config);
    screen.on_appear();
    debug!("mounted at {width}x{height}");

    Ok(MountHandle {
        screen,
        renderer,
        buffer: FrameBuffer::new(width, height),
        started: Instant::now(),
        running: Arc::new(AtomicBool::new(true)),
        restored: false,
    })
}

/// Unmount and restore the terminal.
pub fn unmount(handle: MountHandle) -> io::Result<()> {
    handle.unmount()
}

// =============================================================================
// Event Loop
// =============================================================================

/// Render one frame and process input.
///
/// * `Ok(true)` - Continue running
/// * `Ok(false)` - Quit key pressed or `handle.stop()` called
/// * `Err(e)` - I/O error while rendering or polling
pub fn tick(handle: &mut MountHandle) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    handle.screen.advance_to(handle.started.elapsed());

    let (width, height) = terminal_size();
    if handle.buffer.width() != width || handle.buffer.height() != height {
        handle.buffer = FrameBuffer::new(width, height);
    }
    paint(&handle.screen.frame(), &mut handle.buffer);
    handle.renderer.render(&handle.buffer)?;

    match poll_event(FRAME_INTERVAL)? {
        Some(HostEvent::Quit) => handle.stop(),
        Some(HostEvent::Resize(width, height)) => set_terminal_size(width, height),
        Some(HostEvent::None) | None => {}
    }

    Ok(handle.is_running())
}

/// Run the loop until stopped.
pub fn run(handle: &mut MountHandle) -> io::Result<()> {
    while tick(handle)? {}
    Ok(())
}
