use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;

use harbor_shell::config::LaunchArgs;
use harbor_shell::core::{
    AppController, ControllerCtx, ControllerHooks, Hook, LifecycleError, LifecyclePhase,
};
use harbor_shell::engine::Engine;
use harbor_shell::render::{DefaultRenderDelegate, FrameTime, RenderDelegate, SharedRenderDelegate};

// ── Fixtures ──────────────────────────────────────────────────────────────

/// Headless engine that records the delegate it was handed.
#[derive(Default)]
struct HeadlessEngine {
    attached: Option<SharedRenderDelegate>,
    started: bool,
    shut_down: bool,
    journal: Rc<RefCell<Vec<&'static str>>>,
}

impl Engine for HeadlessEngine {
    type Host<'a> = ();

    fn construct_views(&mut self, _host: (), delegate: SharedRenderDelegate) -> Result<()> {
        self.attached = Some(delegate);
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.started = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.journal.borrow_mut().push("shutdown");
        self.shut_down = true;
    }
}

struct Tinted;

impl RenderDelegate for Tinted {
    fn label(&self) -> &str {
        "tinted"
    }

    fn on_frame(&self, _time: &FrameTime) {}
}

/// Hooks that remember call order and what they saw.
#[derive(Default)]
struct Recorder {
    calls: Vec<&'static str>,
    install: Option<SharedRenderDelegate>,
    seen_at_pre_start: Option<SharedRenderDelegate>,
    seen_args: Option<LaunchArgs>,
}

impl ControllerHooks<HeadlessEngine> for Recorder {
    fn should_attach_render_delegate(&mut self, ctx: &mut ControllerCtx) {
        self.calls.push("attach");
        if let Some(delegate) = self.install.clone() {
            ctx.set_render_delegate(Some(delegate)).unwrap();
        }
    }

    fn pre_start(&mut self, ctx: &mut ControllerCtx, engine: &mut HeadlessEngine, args: &LaunchArgs) {
        self.calls.push("pre_start");
        assert!(engine.attached.is_some(), "views must exist before pre_start");
        assert!(!engine.started, "engine must not run before pre_start returns");
        self.seen_at_pre_start = ctx.render_delegate().cloned();
        self.seen_args = Some(args.clone());
    }
}

fn controller_with(hooks: Recorder) -> AppController<Recorder, HeadlessEngine> {
    AppController::new(hooks, HeadlessEngine::default())
}

// ── Ordering ──────────────────────────────────────────────────────────────

#[test]
fn attach_runs_once_and_before_pre_start() {
    let mut controller = controller_with(Recorder::default());
    controller.did_finish_launching((), &LaunchArgs::default()).unwrap();

    assert_eq!(controller.hooks().calls, vec!["attach", "pre_start"]);
    assert_eq!(controller.phase(), LifecyclePhase::Running);
    assert!(controller.engine().started);
}

#[test]
fn pre_start_before_attach_is_fatal() {
    let mut controller = controller_with(Recorder::default());
    controller.begin_launch().unwrap();

    let err = controller.pre_start(&LaunchArgs::default()).unwrap_err();
    assert!(err.is_sequencing_violation());
    assert!(matches!(
        err,
        LifecycleError::OutOfOrder {
            hook: Hook::PreStart,
            phase: LifecyclePhase::DelegateAttachPending,
        }
    ));
    assert!(controller.hooks().calls.is_empty());
}

#[test]
fn launch_args_reach_pre_start_untouched() {
    let mut controller = controller_with(Recorder::default());
    let args = LaunchArgs::new(-3, f32::NAN, "");
    controller.did_finish_launching((), &args).unwrap();

    let seen = controller.hooks().seen_args.clone().unwrap();
    assert_eq!(seen.integer, -3);
    assert!(seen.real.is_nan());
    assert_eq!(seen.text, "");
}

// ── Render delegate ───────────────────────────────────────────────────────

#[test]
fn delegate_from_attach_is_visible_at_pre_start() {
    let delegate: SharedRenderDelegate = Rc::new(Tinted);
    let mut controller = controller_with(Recorder {
        install: Some(delegate.clone()),
        ..Recorder::default()
    });

    controller.did_finish_launching((), &LaunchArgs::default()).unwrap();

    let seen = controller.hooks().seen_at_pre_start.clone().unwrap();
    assert!(Rc::ptr_eq(&seen, &delegate));
    assert!(Rc::ptr_eq(controller.engine().attached.as_ref().unwrap(), &delegate));
}

#[test]
fn unset_delegate_falls_back_to_default() {
    let mut controller = controller_with(Recorder::default());
    controller.begin_launch().unwrap();
    controller.attach_render_delegate().unwrap();
    controller.construct_views(()).unwrap();
    controller.pre_start(&LaunchArgs::default()).unwrap();
    controller.start_engine().unwrap();

    assert!(controller.ctx().render_delegate().is_none());
    let attached = controller.engine().attached.as_ref().unwrap();
    assert_eq!(attached.label(), "default");
}

#[test]
fn delegate_reassignment_after_pre_start_is_rejected() {
    let original: SharedRenderDelegate = Rc::new(Tinted);
    let mut controller = controller_with(Recorder {
        install: Some(original.clone()),
        ..Recorder::default()
    });
    controller.did_finish_launching((), &LaunchArgs::default()).unwrap();

    let replacement: SharedRenderDelegate = Rc::new(Tinted);
    let err = controller
        .ctx_mut()
        .set_render_delegate(Some(replacement))
        .unwrap_err();
    assert!(matches!(err, LifecycleError::LateDelegateAssignment { .. }));
    assert!(Rc::ptr_eq(controller.ctx().render_delegate().unwrap(), &original));
}

#[test]
fn delegate_reassignment_during_pre_start_aborts_launch() {
    struct Reassigner {
        outcome: Option<bool>,
    }

    impl ControllerHooks<HeadlessEngine> for Reassigner {
        fn pre_start(&mut self, ctx: &mut ControllerCtx, _engine: &mut HeadlessEngine, _args: &LaunchArgs) {
            let replacement: SharedRenderDelegate = Rc::new(Tinted);
            self.outcome = Some(ctx.set_render_delegate(Some(replacement)).is_ok());
        }
    }

    let mut controller = AppController::new(Reassigner { outcome: None }, HeadlessEngine::default());
    let err = controller
        .did_finish_launching((), &LaunchArgs::default())
        .unwrap_err();

    assert_eq!(controller.hooks().outcome, Some(false));
    assert!(matches!(
        err,
        LifecycleError::LateDelegateAssignment { phase: LifecyclePhase::PreStartPending }
    ));
    assert_eq!(controller.phase(), LifecyclePhase::Failed);
    assert!(!controller.engine().started);
}

#[test]
fn discarded_late_delegate_error_still_aborts_launch() {
    struct Careless;

    impl ControllerHooks<HeadlessEngine> for Careless {
        fn pre_start(&mut self, ctx: &mut ControllerCtx, _engine: &mut HeadlessEngine, _args: &LaunchArgs) {
            let _ = ctx.set_render_delegate(Some(DefaultRenderDelegate::shared()));
        }
    }

    let mut controller = AppController::new(Careless, HeadlessEngine::default());
    let quits = Rc::new(Cell::new(0u32));
    let counter = quits.clone();
    controller
        .ctx_mut()
        .set_quit_handler(move || counter.set(counter.get() + 1))
        .unwrap();

    let result = controller.did_finish_launching((), &LaunchArgs::default());
    assert!(matches!(result, Err(LifecycleError::LateDelegateAssignment { .. })));
    assert_eq!(controller.phase(), LifecyclePhase::Failed);
    assert!(!controller.engine().started);

    assert!(controller.start_engine().is_err());
    assert!(controller.will_terminate().is_err());
    assert_eq!(quits.get(), 0);
}

#[test]
fn last_write_before_attach_wins() {
    struct TwoWrites {
        second: SharedRenderDelegate,
    }

    impl ControllerHooks<HeadlessEngine> for TwoWrites {
        fn should_attach_render_delegate(&mut self, ctx: &mut ControllerCtx) {
            let first: SharedRenderDelegate = Rc::new(Tinted);
            ctx.set_render_delegate(Some(first)).unwrap();
            ctx.set_render_delegate(Some(self.second.clone())).unwrap();
        }
    }

    let second: SharedRenderDelegate = Rc::new(Tinted);
    let mut controller = AppController::new(
        TwoWrites {
            second: second.clone(),
        },
        HeadlessEngine::default(),
    );
    controller.did_finish_launching((), &LaunchArgs::default()).unwrap();

    assert!(Rc::ptr_eq(controller.engine().attached.as_ref().unwrap(), &second));
}

// ── Quit handler ──────────────────────────────────────────────────────────

#[test]
fn quit_handler_runs_exactly_once_at_termination() {
    let mut controller = controller_with(Recorder::default());
    let quits = Rc::new(Cell::new(0u32));
    let counter = quits.clone();
    controller
        .ctx_mut()
        .set_quit_handler(move || counter.set(counter.get() + 1))
        .unwrap();

    controller.did_finish_launching((), &LaunchArgs::default()).unwrap();
    assert_eq!(quits.get(), 0);

    controller.will_terminate().unwrap();
    assert_eq!(quits.get(), 1);
    assert!(!controller.ctx().has_quit_handler());

    assert!(controller.will_terminate().is_err());
    assert_eq!(quits.get(), 1);
}

#[test]
fn quit_handler_runs_before_engine_shutdown() {
    struct QuitLogger;

    impl ControllerHooks<HeadlessEngine> for QuitLogger {
        fn pre_start(&mut self, ctx: &mut ControllerCtx, engine: &mut HeadlessEngine, _args: &LaunchArgs) {
            let journal = engine.journal.clone();
            ctx.set_quit_handler(move || journal.borrow_mut().push("quit")).unwrap();
        }
    }

    let mut controller = AppController::new(QuitLogger, HeadlessEngine::default());
    let journal = controller.engine().journal.clone();

    controller.did_finish_launching((), &LaunchArgs::default()).unwrap();
    assert!(journal.borrow().is_empty());

    controller.will_terminate().unwrap();
    assert_eq!(*journal.borrow(), vec!["quit", "shutdown"]);
}

#[test]
fn termination_without_quit_handler_is_clean() {
    let mut controller = controller_with(Recorder::default());
    controller.did_finish_launching((), &LaunchArgs::default()).unwrap();

    controller.will_terminate().unwrap();
    assert_eq!(controller.phase(), LifecyclePhase::Terminated);
    assert!(controller.engine().shut_down);
}
