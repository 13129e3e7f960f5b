//! Frame timing: per-tick delta time, a smoothed FPS estimate and a frame limiter.
//!
//! The time source is an explicit [`Clock`] so tests can drive it by hand.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Shortest delta a tick reports, in seconds.
pub const MIN_DELTA: f32 = 0.001;
/// Longest delta a tick reports, in seconds. Stalls beyond this are clamped.
pub const MAX_DELTA: f32 = 0.1;

const SMOOTHING: f32 = 0.90;

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Measures time between ticks, clamps it, and keeps a smoothed frame time.
#[derive(Debug)]
pub struct FrameTimer<C: Clock = SystemClock> {
    clock: C,
    last: Duration,
    delta_time: f32,
    smoothed: f32,
    fps: f32,
}

impl Default for FrameTimer<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::default())
    }
}

impl<C: Clock> FrameTimer<C> {
    pub fn new(clock: C) -> Self {
        let last = clock.now();
        let smoothed = 1.0 / 60.0;
        Self {
            clock,
            last,
            delta_time: 0.0,
            smoothed,
            fps: 1.0 / smoothed,
        }
    }

    /// Resets the reference point; the next tick measures from here.
    pub fn start(&mut self) {
        self.last = self.clock.now();
    }

    /// Reads the time since the previous tick (or [`FrameTimer::start`]) and
    /// records it. Returns the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = self.clock.now();
        let sample = now.saturating_sub(self.last).as_secs_f32();
        self.last = now;
        self.record(sample)
    }

    /// Records a raw elapsed sample in seconds. Returns the clamped delta.
    pub fn record(&mut self, sample: f32) -> f32 {
        let dt = if sample.is_nan() {
            MIN_DELTA
        } else {
            sample.clamp(MIN_DELTA, MAX_DELTA)
        };
        self.delta_time = dt;
        self.smoothed = self.smoothed * SMOOTHING + dt * (1.0 - SMOOTHING);
        self.fps = 1.0 / self.smoothed.max(1e-5);
        dt
    }

    /// Clamped duration of the last tick, in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Exponentially smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Computes how long to sleep to hold a target frame rate.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    frame_target: Duration,
    previous_frame: Duration,
}

impl FrameLimiter {
    pub fn new(target_fps: u32, now: Duration) -> Self {
        Self {
            frame_target: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            previous_frame: now,
        }
    }

    /// Time left in the current frame budget, or `None` when it is spent.
    /// Call [`FrameLimiter::mark`] once the frame actually ends.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        let elapsed = now.saturating_sub(self.previous_frame);
        self.frame_target
            .checked_sub(elapsed)
            .filter(|d| !d.is_zero())
    }

    pub fn mark(&mut self, now: Duration) {
        self.previous_frame = now;
    }
}
