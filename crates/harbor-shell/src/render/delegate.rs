use std::cell::Cell;
use std::rc::Rc;

use super::frame::FrameTime;

/// Shared handle to a render delegate.
///
/// Held jointly by the controller and any integrator code that kept a clone;
/// the delegate is dropped once every holder has released it.
pub type SharedRenderDelegate = Rc<dyn RenderDelegate>;

/// Snapshot of the view hierarchy the delegate was attached to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewInfo {
    /// Logical size as `(width, height)`.
    pub logical_size: (f32, f32),
    pub scale_factor: f64,
}

/// Receives rendering-pipeline callbacks from the engine.
///
/// Methods take `&self` because the handle is shared; implementations keep
/// mutable bookkeeping in `Cell`/`RefCell`.
pub trait RenderDelegate {
    /// Short name used in log lines.
    fn label(&self) -> &str {
        "render-delegate"
    }

    /// Called once when the engine has built its views and taken the delegate.
    fn on_attached(&self, view: &ViewInfo) {
        let _ = view;
    }

    /// Called when the view hierarchy changes size.
    fn on_resized(&self, view: &ViewInfo) {
        let _ = view;
    }

    /// Called once per presented frame while the engine runs.
    fn on_frame(&self, time: &FrameTime);

    /// Called once when the engine releases its resources.
    fn on_detached(&self) {}
}

/// Delegate the engine falls back to when the integrator leaves the slot unset.
///
/// It renders nothing and only counts frames.
#[derive(Debug, Default)]
pub struct DefaultRenderDelegate {
    frames: Cell<u64>,
}

impl DefaultRenderDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedRenderDelegate {
        Rc::new(Self::new())
    }

    pub fn frames(&self) -> u64 {
        self.frames.get()
    }
}

impl RenderDelegate for DefaultRenderDelegate {
    fn label(&self) -> &str {
        "default"
    }

    fn on_frame(&self, _time: &FrameTime) {
        self.frames.set(self.frames.get().wrapping_add(1));
    }
}
