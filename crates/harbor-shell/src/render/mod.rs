//! Render delegate contract.
//!
//! A render delegate is the integrator-supplied object the engine drives its
//! rendering callbacks through. The controller only stores and hands it over;
//! the engine owns when each callback fires.

mod delegate;
mod frame;

pub use delegate::{DefaultRenderDelegate, RenderDelegate, SharedRenderDelegate, ViewInfo};
pub use frame::{FrameClock, FramePacer, FrameTime};
