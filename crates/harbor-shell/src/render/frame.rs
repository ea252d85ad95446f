use std::time::{Duration, Instant};

/// Timing passed to [`RenderDelegate::on_frame`](super::RenderDelegate::on_frame).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame, clamped to the clock's stall limit.
    pub dt: f32,

    /// Time since the engine run loop started.
    pub since_start: Duration,

    /// Zero for the first frame after start.
    pub frame_index: u64,
}

/// Frame clock owned by the engine run loop.
///
/// The baseline is taken when the engine starts, not when the clock is built,
/// so view construction and the pre-start hook never show up as a giant first
/// delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last: Instant,
    frame_index: u64,
    max_dt: Duration,
}

impl FrameClock {
    /// Longest delta reported after a stall (backgrounding, debugger pause).
    pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_max_dt(Self::DEFAULT_MAX_DT)
    }

    pub fn with_max_dt(max_dt: Duration) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            frame_index: 0,
            max_dt,
        }
    }

    /// Restarts timing from now and rewinds the frame counter.
    pub fn restart(&mut self) {
        let now = Instant::now();
        self.started = now;
        self.last = now;
        self.frame_index = 0;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.max_dt);
        self.last = now;

        let time = FrameTime {
            dt: dt.as_secs_f32(),
            since_start: now.saturating_duration_since(self.started),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Paces frame requests for hosts where nothing blocks on vsync.
///
/// Without it a redraw-on-idle loop spins a core at full speed.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Pacer for `fps` frames per second. Zero is treated as one.
    pub fn from_rate(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Makes the next poll due immediately.
    pub fn reset(&mut self) {
        self.next_due = None;
    }

    /// Returns whether a frame is due at `now`, and the deadline to wait for.
    pub fn poll(&mut self, now: Instant) -> (bool, Instant) {
        match self.next_due {
            Some(due) if now < due => (false, due),
            _ => {
                let due = now + self.interval;
                self.next_due = Some(due);
                (true, due)
            }
        }
    }
}
