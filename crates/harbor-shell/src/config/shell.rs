use winit::dpi::LogicalSize;

use super::launch::LaunchArgs;

/// Desktop host configuration.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Frames per second requested from the window while running.
    pub frame_rate: u32,
    /// Forwarded untouched to the pre-start hook.
    pub launch: LaunchArgs,
}

impl ShellConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.initial_size = LogicalSize::new(width, height);
        self
    }

    pub fn frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = fps;
        self
    }

    pub fn launch_args(mut self, args: LaunchArgs) -> Self {
        self.launch = args;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "harbor".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            frame_rate: 60,
            launch: LaunchArgs::default(),
        }
    }
}
