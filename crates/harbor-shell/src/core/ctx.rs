use std::fmt;

use crate::render::SharedRenderDelegate;

use super::error::LifecycleError;
use super::phase::LifecyclePhase;

/// Callback run once when the host terminates the application.
pub type QuitHandler = Box<dyn FnOnce()>;

/// Controller state visible to integrator code.
///
/// Hooks receive this by `&mut`; the controller reads the delegate and the
/// quit handler only at fixed points of the launch sequence.
pub struct ControllerCtx {
    pub(crate) phase: LifecyclePhase,
    /// Set once the engine has taken the delegate. Reassignment is rejected
    /// from then on.
    pub(crate) delegate_locked: bool,
    /// Phase of the first rejected delegate write, kept so the controller
    /// aborts launch even when the hook discards the `Err`.
    late_delegate_write: Option<LifecyclePhase>,

    counter_state: i64,
    float_state: f32,

    render_delegate: Option<SharedRenderDelegate>,
    quit_handler: Option<QuitHandler>,
}

impl ControllerCtx {
    pub(crate) fn new() -> Self {
        Self {
            phase: LifecyclePhase::Created,
            delegate_locked: false,
            late_delegate_write: None,
            counter_state: 0,
            float_state: 0.0,
            render_delegate: None,
            quit_handler: None,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    // ── Reserved extension storage ────────────────────────────────────────

    /// Integer slot for integrator bookkeeping. The controller never reads it.
    pub fn counter_state(&self) -> i64 {
        self.counter_state
    }

    pub fn set_counter_state(&mut self, value: i64) {
        self.counter_state = value;
    }

    /// Float slot for integrator bookkeeping. The controller never reads it.
    pub fn float_state(&self) -> f32 {
        self.float_state
    }

    pub fn set_float_state(&mut self, value: f32) {
        self.float_state = value;
    }

    // ── Render delegate ───────────────────────────────────────────────────

    /// The integrator's delegate, if one was set.
    ///
    /// `None` means the engine runs with its default delegate.
    pub fn render_delegate(&self) -> Option<&SharedRenderDelegate> {
        self.render_delegate.as_ref()
    }

    /// Replaces the render delegate. Last write wins until the engine attaches
    /// it; after that every call fails.
    pub fn set_render_delegate(
        &mut self,
        delegate: Option<SharedRenderDelegate>,
    ) -> Result<(), LifecycleError> {
        if self.delegate_locked {
            log::error!(
                "rejected render delegate reassignment while {}",
                self.phase
            );
            self.late_delegate_write.get_or_insert(self.phase);
            return Err(LifecycleError::LateDelegateAssignment { phase: self.phase });
        }

        if self.render_delegate.is_some() {
            log::debug!("render delegate replaced before attach");
        }
        self.render_delegate = delegate;
        Ok(())
    }

    // ── Quit handler ──────────────────────────────────────────────────────

    pub fn has_quit_handler(&self) -> bool {
        self.quit_handler.is_some()
    }

    /// Installs the callback run at termination, replacing any previous one.
    pub fn set_quit_handler<F>(&mut self, handler: F) -> Result<(), LifecycleError>
    where
        F: FnOnce() + 'static,
    {
        if self.phase.is_final() {
            return Err(LifecycleError::Finished { phase: self.phase });
        }
        self.quit_handler = Some(Box::new(handler));
        Ok(())
    }

    pub fn clear_quit_handler(&mut self) {
        self.quit_handler = None;
    }

    /// Removes the quit handler and hands it to the caller.
    ///
    /// The handler is `FnOnce`, so reading it means taking it: once taken,
    /// the controller has nothing to run at termination.
    pub fn take_quit_handler(&mut self) -> Option<QuitHandler> {
        self.quit_handler.take()
    }

    pub(crate) fn take_late_delegate_write(&mut self) -> Option<LifecycleError> {
        self.late_delegate_write
            .take()
            .map(|phase| LifecycleError::LateDelegateAssignment { phase })
    }
}

impl fmt::Debug for ControllerCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerCtx")
            .field("phase", &self.phase)
            .field("delegate_locked", &self.delegate_locked)
            .field("counter_state", &self.counter_state)
            .field("float_state", &self.float_state)
            .field(
                "render_delegate",
                &self.render_delegate.as_ref().map(|d| d.label().to_string()),
            )
            .field("quit_handler", &self.quit_handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::render::DefaultRenderDelegate;

    #[test]
    fn last_delegate_write_wins() {
        let mut ctx = ControllerCtx::new();
        let first = DefaultRenderDelegate::shared();
        let second = DefaultRenderDelegate::shared();

        ctx.set_render_delegate(Some(first)).unwrap();
        ctx.set_render_delegate(Some(second.clone())).unwrap();

        assert!(Rc::ptr_eq(ctx.render_delegate().unwrap(), &second));
    }

    #[test]
    fn delegate_can_be_cleared_before_lock() {
        let mut ctx = ControllerCtx::new();
        ctx.set_render_delegate(Some(DefaultRenderDelegate::shared())).unwrap();
        ctx.set_render_delegate(None).unwrap();
        assert!(ctx.render_delegate().is_none());
    }

    #[test]
    fn locked_delegate_rejects_writes() {
        let mut ctx = ControllerCtx::new();
        ctx.delegate_locked = true;

        let err = ctx.set_render_delegate(None).unwrap_err();
        assert!(matches!(err, LifecycleError::LateDelegateAssignment { .. }));
        assert!(err.is_sequencing_violation());
    }

    #[test]
    fn rejected_write_is_remembered_once() {
        let mut ctx = ControllerCtx::new();
        ctx.phase = LifecyclePhase::PreStartPending;
        ctx.delegate_locked = true;

        let _ = ctx.set_render_delegate(None);
        let _ = ctx.set_render_delegate(None);

        assert!(matches!(
            ctx.take_late_delegate_write(),
            Some(LifecycleError::LateDelegateAssignment { phase: LifecyclePhase::PreStartPending })
        ));
        assert!(ctx.take_late_delegate_write().is_none());
    }

    #[test]
    fn taken_quit_handler_leaves_slot_empty() {
        let mut ctx = ControllerCtx::new();
        let ran = Rc::new(std::cell::Cell::new(false));
        let flag = ran.clone();
        ctx.set_quit_handler(move || flag.set(true)).unwrap();

        let handler = ctx.take_quit_handler().unwrap();
        assert!(!ctx.has_quit_handler());
        assert!(ctx.take_quit_handler().is_none());

        handler();
        assert!(ran.get());
    }

    #[test]
    fn quit_handler_rejected_once_final() {
        let mut ctx = ControllerCtx::new();
        ctx.phase = LifecyclePhase::Terminated;
        assert!(matches!(
            ctx.set_quit_handler(|| {}),
            Err(LifecycleError::Finished { .. })
        ));
        assert!(!ctx.has_quit_handler());
    }

    #[test]
    fn extension_slots_start_zeroed() {
        let mut ctx = ControllerCtx::new();
        assert_eq!(ctx.counter_state(), 0);
        assert_eq!(ctx.float_state(), 0.0);

        ctx.set_counter_state(7);
        ctx.set_float_state(0.5);
        assert_eq!(ctx.counter_state(), 7);
        assert_eq!(ctx.float_state(), 0.5);
    }
}
