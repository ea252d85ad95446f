//! Engine-facing contract.
//!
//! The controller drives the embedded engine through exactly these calls, in
//! this order: [`Engine::construct_views`] once, [`Engine::start`] once, and
//! [`Engine::shutdown`] once at termination. Everything else about the engine
//! (its frame loop, its window handling) is the host binding's business.

use anyhow::Result;

use crate::render::SharedRenderDelegate;

pub trait Engine {
    /// Whatever the engine needs from the host to build views
    /// (an event loop handle on desktop, `()` for headless engines).
    type Host<'a>;

    /// Builds the view hierarchy and attaches `delegate` to it.
    ///
    /// `delegate` is either the integrator's choice or the default delegate;
    /// the engine never sees an empty slot.
    fn construct_views(&mut self, host: Self::Host<'_>, delegate: SharedRenderDelegate)
        -> Result<()>;

    /// Starts the run loop. Views exist and the pre-start hook has returned.
    fn start(&mut self) -> Result<()>;

    /// Releases engine resources. Called after the quit handler.
    fn shutdown(&mut self);
}
