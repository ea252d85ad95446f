//! Harbor shell crate.
//!
//! This crate owns the lifecycle controller that sits between a host
//! application's launch/termination notifications and an embedded rendering
//! engine, plus a `winit`-backed host binding that drives it on desktop.

pub mod config;
pub mod core;
pub mod engine;
pub mod logging;
pub mod render;
pub mod window;
