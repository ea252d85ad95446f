use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use harbor_shell::config::{LaunchArgs, ShellConfig};
use harbor_shell::core::{ControllerCtx, ControllerHooks};
use harbor_shell::logging::{LoggingConfig, init_logging};
use harbor_shell::render::{FrameTime, RenderDelegate, SharedRenderDelegate, ViewInfo};
use harbor_shell::window::{Runtime, WindowEngine};

/// Counts frames and reports roughly once a second.
#[derive(Default)]
struct PulseDelegate {
    frames: Cell<u64>,
    last_report: Cell<f32>,
}

impl RenderDelegate for PulseDelegate {
    fn label(&self) -> &str {
        "pulse"
    }

    fn on_attached(&self, view: &ViewInfo) {
        log::info!("pulse attached to {:?} view", view.logical_size);
    }

    fn on_resized(&self, view: &ViewInfo) {
        log::debug!("view resized to {:?}", view.logical_size);
    }

    fn on_frame(&self, time: &FrameTime) {
        self.frames.set(self.frames.get() + 1);

        let elapsed = time.since_start.as_secs_f32();
        if elapsed - self.last_report.get() >= 1.0 {
            self.last_report.set(elapsed);
            log::info!("frame {} ({:.1} ms)", time.frame_index, time.dt * 1000.0);
        }
    }

    fn on_detached(&self) {
        log::info!("pulse detached after {} frames", self.frames.get());
    }
}

struct DemoHooks {
    pulse: Rc<PulseDelegate>,
}

impl ControllerHooks<WindowEngine> for DemoHooks {
    fn should_attach_render_delegate(&mut self, ctx: &mut ControllerCtx) {
        let delegate: SharedRenderDelegate = self.pulse.clone();
        ctx.set_render_delegate(Some(delegate))
            .expect("render delegate is assignable before views exist");
    }

    fn pre_start(&mut self, ctx: &mut ControllerCtx, engine: &mut WindowEngine, args: &LaunchArgs) {
        if !args.text.is_empty() {
            let title = format!("{} · {}", engine.title(), args.text);
            engine.set_title(title);
        }
        ctx.set_counter_state(args.integer);
        ctx.set_float_state(args.real);

        let pulse = self.pulse.clone();
        let run_id = ctx.counter_state();
        ctx.set_quit_handler(move || {
            println!();
            println!("  harbor demo run {run_id} finished: {} frames", pulse.frames.get());
            println!();
        })
        .expect("quit handler is assignable before the engine runs");
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args = LaunchArgs::from_env()?;
    log::debug!("launch args: {args:?}");

    let config = ShellConfig::default()
        .title("Harbor Demo")
        .size(960.0, 540.0)
        .launch_args(args);

    Runtime::run(
        config,
        DemoHooks {
            pulse: Rc::new(PulseDelegate::default()),
        },
    )
}
