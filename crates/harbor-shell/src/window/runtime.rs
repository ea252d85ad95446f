use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::config::{LaunchArgs, ShellConfig};
use crate::core::{AppController, ControllerHooks, LifecycleError, LifecyclePhase};

use super::engine::WindowEngine;

/// Entry point for the desktop host.
pub struct Runtime;

impl Runtime {
    /// Runs the host event loop until the application exits.
    ///
    /// Returns the fatal lifecycle error, if launch was aborted.
    pub fn run<H>(config: ShellConfig, hooks: H) -> Result<()>
    where
        H: ControllerHooks<WindowEngine> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let engine = WindowEngine::new(&config);
        let mut host = HostState {
            controller: AppController::new(hooks, engine),
            launch: config.launch,
            fatal: None,
        };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        match host.fatal.take() {
            Some(err) => Err(err).context("application launch aborted"),
            None => Ok(()),
        }
    }
}

struct HostState<H>
where
    H: ControllerHooks<WindowEngine>,
{
    controller: AppController<H, WindowEngine>,
    launch: LaunchArgs,
    fatal: Option<LifecycleError>,
}

impl<H> HostState<H>
where
    H: ControllerHooks<WindowEngine>,
{
    fn abort(&mut self, event_loop: &ActiveEventLoop, err: LifecycleError) {
        log::error!("fatal lifecycle error: {err}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        event_loop.exit();
    }
}

impl<H> ApplicationHandler for HostState<H>
where
    H: ControllerHooks<WindowEngine>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Mobile platforms resume repeatedly; only the first one launches.
        if self.controller.phase() != LifecyclePhase::Created {
            log::debug!("resumed while {}; launch already handled", self.controller.phase());
            return;
        }

        if let Err(err) = self.controller.did_finish_launching(event_loop, &self.launch) {
            self.abort(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.controller.phase() != LifecyclePhase::Running {
            return;
        }

        let control_flow = match self.controller.engine_mut().pace(Instant::now()) {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(control_flow);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.controller.engine().window_id() != Some(window_id) {
            return;
        }

        let engine = self.controller.engine_mut();
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested for {window_id:?}");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => engine.resized(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = engine.window().map(|w| w.inner_size()) {
                    engine.resized(size);
                }
            }
            WindowEvent::RedrawRequested => engine.redraw(),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let phase = self.controller.phase();
        if phase != LifecyclePhase::Running {
            log::debug!("exiting while {phase}; nothing to terminate");
            return;
        }

        if let Err(err) = self.controller.will_terminate() {
            log::error!("termination failed: {err}");
        }
    }
}
