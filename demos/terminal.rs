//! Terminal Example - The full 8-second loop, live
//!
//! Optionally takes a TOML file with timing overrides:
//!
//! ```toml
//! tick_period_ms = 500
//! step_duration_ms = 1000
//! ```
//!
//! Quit with `q`, `Esc` or `Ctrl+C`.
//!
//! Run with: cargo run --example terminal [-- timings.toml]

use spark_kinetic::{mount, run, unmount, TimelineConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => TimelineConfig::load(path)?,
        None => TimelineConfig::default(),
    };

    let mut handle = mount(config)?;
    let result = run(&mut handle);
    unmount(handle)?;
    result?;

    Ok(())
}
