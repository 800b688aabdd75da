use std::{
    thread,
    time::{Duration, Instant},
};

/// Measures time elapsed since creation or the last [`Profiler::reset`].
pub struct Profiler {
    start: Instant,
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn delta(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleeps for whatever remains of a frame at `desired_fps` after `busy`.
pub fn limit_fps(busy: Duration, desired_fps: f64) {
    if desired_fps <= 0.0 {
        return;
    }
    let period = Duration::from_secs_f64(1.0 / desired_fps);
    if let Some(remaining) = period.checked_sub(busy) {
        thread::sleep(remaining);
    }
}

/// Exponential moving average of frame times, in seconds.
pub struct FrameTimer {
    profiler: Profiler,
    average: f64,
}

impl FrameTimer {
    const ALPHA: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            profiler: Profiler::new(),
            average: 0.0,
        }
    }

    /// Folds the time since the previous call into the average.
    pub fn tick(&mut self) {
        let last = self.profiler.delta().as_secs_f64();
        self.average = Self::ALPHA * self.average + (1.0 - Self::ALPHA) * last;
        self.profiler.reset();
    }

    pub fn fps(&self) -> Option<f64> {
        (self.average > 0.0).then(|| 1.0 / self.average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn limit_fps_sleeps_out_the_frame() {
        let profiler = Profiler::new();
        limit_fps(Duration::ZERO, 50.0);
        assert!(profiler.delta() >= Duration::from_millis(20));
    }

    #[test_log::test]
    fn limit_fps_skips_slow_frames() {
        let profiler = Profiler::new();
        limit_fps(Duration::from_secs(1), 50.0);
        assert!(profiler.delta() < Duration::from_millis(20));
    }

    #[test_log::test]
    fn frame_timer_reports_fps_after_a_tick() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.fps(), None);
        thread::sleep(Duration::from_millis(5));
        timer.tick();
        assert!(timer.fps().is_some());
    }
}
