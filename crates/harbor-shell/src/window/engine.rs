use std::time::Instant;

use anyhow::{Context, Result, bail};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::config::ShellConfig;
use crate::engine::Engine;
use crate::render::{FrameClock, FramePacer, SharedRenderDelegate, ViewInfo};

/// Engine backed by a single `winit` window.
///
/// Views are built on the launch notification, frames are pumped to the
/// attached delegate on every redraw while running.
pub struct WindowEngine {
    title: String,
    initial_size: LogicalSize<f64>,

    window: Option<Window>,
    delegate: Option<SharedRenderDelegate>,
    clock: FrameClock,
    pacer: FramePacer,
    running: bool,
}

impl WindowEngine {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            title: config.title.clone(),
            initial_size: config.initial_size,
            window: None,
            delegate: None,
            clock: FrameClock::default(),
            pacer: FramePacer::from_rate(config.frame_rate),
            running: false,
        }
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    pub fn window_id(&self) -> Option<WindowId> {
        self.window.as_ref().map(Window::id)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Retitles the window. No-op before views exist.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        if let Some(window) = &self.window {
            window.set_title(&self.title);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Requests a redraw if a frame is due and returns the next deadline.
    ///
    /// `None` while the engine is not running.
    pub(crate) fn pace(&mut self, now: Instant) -> Option<Instant> {
        let window = self.window.as_ref().filter(|_| self.running)?;
        let (due, deadline) = self.pacer.poll(now);
        if due {
            window.request_redraw();
        }
        Some(deadline)
    }

    pub(crate) fn redraw(&mut self) {
        if !self.running {
            return;
        }
        if let Some(delegate) = &self.delegate {
            let time = self.clock.tick();
            delegate.on_frame(&time);
        }
    }

    pub(crate) fn resized(&mut self, _size: PhysicalSize<u32>) {
        if let (Some(window), Some(delegate)) = (&self.window, &self.delegate) {
            delegate.on_resized(&view_info(window));
            if self.running {
                window.request_redraw();
            }
        }
    }
}

impl Engine for WindowEngine {
    type Host<'a> = &'a ActiveEventLoop;

    fn construct_views(
        &mut self,
        event_loop: Self::Host<'_>,
        delegate: SharedRenderDelegate,
    ) -> Result<()> {
        if self.window.is_some() {
            bail!("view hierarchy already constructed");
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let info = view_info(&window);
        log::debug!(
            "attaching render delegate `{}` to {:?} @ {}x",
            delegate.label(),
            info.logical_size,
            info.scale_factor
        );
        delegate.on_attached(&info);

        self.window = Some(window);
        self.delegate = Some(delegate);
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        let Some(window) = &self.window else {
            bail!("engine started without a view hierarchy");
        };

        self.clock.restart();
        self.pacer.reset();
        self.running = true;
        window.request_redraw();

        log::info!("engine running");
        Ok(())
    }

    fn shutdown(&mut self) {
        self.running = false;
        if let Some(delegate) = self.delegate.take() {
            delegate.on_detached();
        }
        self.window = None;
        log::info!("engine resources released");
    }
}

fn view_info(window: &Window) -> ViewInfo {
    let scale = window.scale_factor();
    let logical: LogicalSize<f64> = window.inner_size().to_logical(scale);
    ViewInfo {
        logical_size: (logical.width as f32, logical.height as f32),
        scale_factor: scale,
    }
}
