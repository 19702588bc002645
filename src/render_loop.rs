use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Stops a [`RenderLoop`] from anywhere, including other threads.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub frame: u64,
    pub delta: Duration,
}

impl FrameTick {
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// Frame pacing for the per-refresh update and draw.
#[derive(Debug)]
pub struct RenderLoop {
    previous: Option<Instant>,
    frame: u64,
    max_delta: Duration,
    stop: StopHandle,
}

impl RenderLoop {
    /// Longest step handed out; a stall (window drag, breakpoint) does not skip animations.
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        Self {
            previous: None,
            frame: 0,
            max_delta: Self::DEFAULT_MAX_DELTA,
            stop: StopHandle::default(),
        }
    }

    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Next frame at `now`, or `None` once stopped. The first frame has a zero delta.
    pub fn tick(&mut self, now: Instant) -> Option<FrameTick> {
        if self.stop.is_stopped() {
            return None;
        }

        let delta = self
            .previous
            .map(|previous| now.saturating_duration_since(previous))
            .unwrap_or_default()
            .min(self.max_delta);
        self.previous = Some(now);

        let tick = FrameTick {
            frame: self.frame,
            delta,
        };
        self.frame += 1;
        Some(tick)
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_count_frames_and_measure_delta() {
        let start = Instant::now();
        let mut render_loop = RenderLoop::new();

        let first = render_loop.tick(start).unwrap();
        assert_eq!(first.frame, 0);
        assert_eq!(first.delta, Duration::ZERO);

        let second = render_loop.tick(start + Duration::from_millis(16)).unwrap();
        assert_eq!(second.frame, 1);
        assert_eq!(second.delta, Duration::from_millis(16));
        assert_eq!(render_loop.frame(), 2);
    }

    #[test]
    fn large_steps_are_clamped() {
        let start = Instant::now();
        let mut render_loop = RenderLoop::new().with_max_delta(Duration::from_millis(50));
        render_loop.tick(start);
        let tick = render_loop.tick(start + Duration::from_secs(3)).unwrap();
        assert_eq!(tick.delta, Duration::from_millis(50));
    }

    #[test]
    fn stop_handle_ends_the_loop() {
        let start = Instant::now();
        let mut render_loop = RenderLoop::new();
        let handle = render_loop.stop_handle();
        assert!(render_loop.tick(start).is_some());

        handle.stop();
        assert!(!render_loop.is_running());
        assert_eq!(render_loop.tick(start + Duration::from_millis(16)), None);
        assert_eq!(render_loop.tick(start + Duration::from_millis(32)), None);
    }

    #[test]
    fn stop_from_another_thread() {
        let mut render_loop = RenderLoop::new();
        let handle = render_loop.stop_handle();
        std::thread::spawn(move || handle.stop()).join().unwrap();
        assert_eq!(render_loop.tick(Instant::now()), None);
    }
}
