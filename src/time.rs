//! Frame clock.
//!
//! The particle physics is stepped once per frame and never looks at the
//! clock. Wall-clock time only drives the launcher interval, the petal fall
//! and the feedback pulses, all of which take the delta from [`Time::update`].
//!
//! ```ignore
//! let mut time = Time::new();
//! // once per redraw:
//! let dt = time.update();
//! launcher.update(dt, &mut sim);
//! ```

use std::time::{Duration, Instant};

/// Longest delta a single frame may report, in seconds.
///
/// A window that was hidden or dragged can stall for seconds; capping the
/// delta keeps the launcher from firing a salvo on the next frame.
pub const MAX_DELTA: f32 = 0.25;

/// Per-frame timing: elapsed time, frame count and fps.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    /// Sum of reported deltas. Stops while paused.
    elapsed_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    /// Reported instead of the measured delta when set.
    fixed_delta: Option<f32>,
}

impl Time {
    /// A running clock starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            elapsed_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            fixed_delta: None,
        }
    }

    /// A clock that reports `delta` every frame regardless of wall time.
    pub fn fixed(delta: f32) -> Self {
        let mut time = Self::new();
        time.set_fixed_delta(Some(delta));
        time
    }

    /// Start a new frame. Returns the frame delta in seconds.
    ///
    /// While paused the delta is zero and the frame count does not move.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let measured = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.paused {
            return 0.0;
        }

        let delta = match self.fixed_delta {
            Some(delta) => delta,
            None => measured.min(MAX_DELTA),
        };
        self.elapsed_secs += delta;
        self.frame_count += 1;

        let since_fps = now.duration_since(self.fps_update_time);
        if since_fps >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            log::trace!("{:.1} fps", self.fps);
        }

        delta
    }

    /// Seconds of unpaused time so far.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every 500 ms.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop reporting time; [`update`](Self::update) returns zero.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume without counting the paused interval.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_frame = Instant::now();
        }
    }

    /// Pause if running, resume if paused.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Report a constant delta instead of measuring. `None` measures again.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.filter(|d| d.is_finite() && *d >= 0.0);
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
