//! Desktop host binding.
//!
//! `winit` stands in for the host OS: its `resumed` callback is the launch
//! notification and `exiting` the termination notification. `WindowEngine`
//! is the engine side, using one window as its view hierarchy.

mod engine;
mod runtime;

pub use engine::WindowEngine;
pub use runtime::Runtime;
