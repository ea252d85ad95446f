use crate::config::LaunchArgs;
use crate::engine::Engine;
use crate::render::DefaultRenderDelegate;

use super::ctx::ControllerCtx;
use super::error::LifecycleError;
use super::hooks::ControllerHooks;
use super::phase::{Hook, LifecyclePhase};

/// Application lifecycle controller.
///
/// Sits between the host's launch/termination notifications and the embedded
/// engine. The host calls [`did_finish_launching`](Self::did_finish_launching)
/// once and [`will_terminate`](Self::will_terminate) once; the controller runs
/// the integrator's hooks and the engine calls in between, in a fixed order:
///
/// 1. `should_attach_render_delegate`
/// 2. `Engine::construct_views` (delegate is locked from here on)
/// 3. `pre_start`
/// 4. `Engine::start`
/// 5. quit handler, then `Engine::shutdown`, at termination
///
/// Every step is also callable on its own. A step requested out of order is
/// rejected with [`LifecycleError::OutOfOrder`] and nothing runs.
pub struct AppController<H, E>
where
    H: ControllerHooks<E>,
    E: Engine,
{
    ctx: ControllerCtx,
    hooks: H,
    engine: E,

    views_ready: bool,
    pre_started: bool,
}

impl<H, E> AppController<H, E>
where
    H: ControllerHooks<E>,
    E: Engine,
{
    pub fn new(hooks: H, engine: E) -> Self {
        Self {
            ctx: ControllerCtx::new(),
            hooks,
            engine,
            views_ready: false,
            pre_started: false,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.ctx.phase
    }

    pub fn ctx(&self) -> &ControllerCtx {
        &self.ctx
    }

    /// Integrator access outside the hooks, e.g. to install a quit handler
    /// before launch.
    pub fn ctx_mut(&mut self) -> &mut ControllerCtx {
        &mut self.ctx
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ── Launch ────────────────────────────────────────────────────────────

    /// Runs the whole bring-up in response to the host's launch notification.
    ///
    /// On return the controller is `Running`. Any error leaves it in a phase
    /// from which no further hook will run.
    pub fn did_finish_launching(
        &mut self,
        host: E::Host<'_>,
        args: &LaunchArgs,
    ) -> Result<(), LifecycleError> {
        self.begin_launch()?;
        self.attach_render_delegate()?;
        self.construct_views(host)?;
        self.pre_start(args)?;
        self.start_engine()
    }

    /// `Created -> DelegateAttachPending`.
    pub fn begin_launch(&mut self) -> Result<(), LifecycleError> {
        self.check(Hook::Launch)?;
        self.advance();
        Ok(())
    }

    /// Runs `should_attach_render_delegate`, then `DelegateAttachPending -> PreStartPending`.
    pub fn attach_render_delegate(&mut self) -> Result<(), LifecycleError> {
        self.check(Hook::AttachRenderDelegate)?;

        log::trace!("invoking should_attach_render_delegate");
        self.hooks.should_attach_render_delegate(&mut self.ctx);

        match self.ctx.render_delegate() {
            Some(delegate) => log::debug!("render delegate `{}` selected", delegate.label()),
            None => log::info!("no render delegate set; engine will use its default"),
        }

        self.advance();
        Ok(())
    }

    /// Hands the delegate (or the default one) to the engine's view construction.
    pub fn construct_views(&mut self, host: E::Host<'_>) -> Result<(), LifecycleError> {
        self.check(Hook::ConstructViews)?;

        let delegate = self
            .ctx
            .render_delegate()
            .cloned()
            .unwrap_or_else(DefaultRenderDelegate::shared);

        // The engine holds the delegate from here on.
        self.ctx.delegate_locked = true;

        if let Err(err) = self.engine.construct_views(host, delegate) {
            return Err(self.fail(Hook::ConstructViews, err));
        }

        self.views_ready = true;
        log::debug!("view hierarchy constructed");
        Ok(())
    }

    /// Runs `pre_start` with the host-supplied arguments.
    pub fn pre_start(&mut self, args: &LaunchArgs) -> Result<(), LifecycleError> {
        self.check(Hook::PreStart)?;

        log::trace!("invoking pre_start with {args:?}");
        self.hooks.pre_start(&mut self.ctx, &mut self.engine, args);

        // The hook may have dropped the `Err` from a late delegate write.
        if let Some(err) = self.ctx.take_late_delegate_write() {
            log::error!("launch aborted during `{}`: {err}", Hook::PreStart);
            self.ctx.phase = LifecyclePhase::Failed;
            return Err(err);
        }

        self.pre_started = true;
        Ok(())
    }

    /// Starts the engine run loop, then `PreStartPending -> Running`.
    pub fn start_engine(&mut self) -> Result<(), LifecycleError> {
        self.check(Hook::StartEngine)?;

        if let Err(err) = self.engine.start() {
            return Err(self.fail(Hook::StartEngine, err));
        }

        self.advance();
        Ok(())
    }

    // ── Termination ───────────────────────────────────────────────────────

    /// Handles the host's termination notification: `Running -> Terminated`.
    ///
    /// The quit handler, if any, runs here and only here, before the engine
    /// releases its resources.
    pub fn will_terminate(&mut self) -> Result<(), LifecycleError> {
        self.check(Hook::Terminate)?;
        self.advance();

        match self.ctx.take_quit_handler() {
            Some(handler) => {
                log::trace!("invoking quit handler");
                handler();
            }
            None => log::info!("no quit handler set; default shutdown only"),
        }

        self.engine.shutdown();
        Ok(())
    }

    // ── Sequencing ────────────────────────────────────────────────────────

    fn check(&self, hook: Hook) -> Result<(), LifecycleError> {
        let phase = self.ctx.phase;
        if phase.is_final() {
            log::error!("`{hook}` requested after the controller finished ({phase})");
            return Err(LifecycleError::Finished { phase });
        }

        let in_order = phase == hook.required_phase()
            && match hook {
                Hook::ConstructViews => !self.views_ready,
                Hook::PreStart => self.views_ready && !self.pre_started,
                Hook::StartEngine => self.pre_started,
                _ => true,
            };

        if !in_order {
            log::error!("`{hook}` invoked out of order while {phase}");
            return Err(LifecycleError::OutOfOrder { hook, phase });
        }
        Ok(())
    }

    fn advance(&mut self) {
        if let Some(next) = self.ctx.phase.next() {
            log::debug!("lifecycle: {} -> {}", self.ctx.phase, next);
            self.ctx.phase = next;
        }
    }

    fn fail(&mut self, hook: Hook, err: anyhow::Error) -> LifecycleError {
        log::error!("launch aborted during `{hook}`: {err:#}");
        self.ctx.phase = LifecyclePhase::Failed;
        LifecycleError::engine(hook, err)
    }
}
