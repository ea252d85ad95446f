use crate::config::LaunchArgs;
use crate::engine::Engine;

use super::ctx::ControllerCtx;

/// Extension points an integrator overrides.
///
/// The controller owns invocation: each method runs exactly once, on the
/// host's main thread, in launch order. Both run while the host is still
/// inside its launch notification, and a host may kill a process whose main
/// thread stays unresponsive, so neither should block for long.
///
/// A panic in either hook aborts the launch and takes the process down.
pub trait ControllerHooks<E: Engine> {
    /// Pick the render delegate.
    ///
    /// Call [`ControllerCtx::set_render_delegate`] here, or leave the slot
    /// empty to run with the engine's default delegate. Runs before any
    /// rendering work.
    #[allow(unused_variables)]
    fn should_attach_render_delegate(&mut self, ctx: &mut ControllerCtx) {}

    /// Called after the views exist and the delegate is attached, right
    /// before the engine run loop starts.
    ///
    /// Use this to register plugins, tweak UI state, or install a quit
    /// handler. `args` is passed through as supplied by the host.
    #[allow(unused_variables)]
    fn pre_start(&mut self, ctx: &mut ControllerCtx, engine: &mut E, args: &LaunchArgs) {}
}

/// Hooks that keep every default.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoHooks;

impl<E: Engine> ControllerHooks<E> for NoHooks {}
