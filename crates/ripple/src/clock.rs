use std::time::{Duration, Instant};

/// Abstraction over where per-tick timestamps originate.
///
/// The windowed renderer ticks on every redraw with a [`SystemClock`];
/// tests drive the easing laws deterministically with a [`ManualClock`].
pub trait FrameClock: Send {
    /// Resets the clock to its initial state.
    fn reset(&mut self);
    /// Produces the timestamp for the next tick.
    fn tick(&mut self) -> Instant;
}

/// Frame clock backed by the system monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl FrameClock for SystemClock {
    fn reset(&mut self) {}

    fn tick(&mut self) -> Instant {
        Instant::now()
    }
}

/// Deterministic frame clock that advances by a fixed step per tick.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    origin: Instant,
    current: Instant,
    step: Duration,
}

impl ManualClock {
    /// Creates a manual clock that advances by `step` on every tick.
    pub fn new(step: Duration) -> Self {
        let origin = Instant::now();
        Self {
            origin,
            current: origin,
            step,
        }
    }

    /// The timestamp the next tick will report.
    pub fn peek(&self) -> Instant {
        self.current
    }

    /// Jumps the clock forward without producing a tick.
    pub fn skip(&mut self, duration: Duration) {
        self.current += duration;
    }
}

impl FrameClock for ManualClock {
    fn reset(&mut self) {
        self.current = self.origin;
    }

    fn tick(&mut self) -> Instant {
        let now = self.current;
        self.current += self.step;
        now
    }
}

/// Convenient alias for owning frame clocks behind trait objects.
pub type BoxedFrameClock = Box<dyn FrameClock + Send>;

/// Accumulator-style frame pacing for an optional FPS cap.
///
/// With no cap every frame is ready immediately. With a cap, a frame
/// becomes ready once per interval; the deadline advances by exactly one
/// interval per rendered frame so a long gap does not cause a burst.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Option<Duration>,
    next_frame: Option<Instant>,
}

impl FramePacer {
    /// Builds a pacer for the requested cap; `None` or a non-positive FPS
    /// means uncapped.
    pub fn new(target_fps: Option<f32>) -> Self {
        // Integer nanoseconds so round intervals stay exact (1/10 s is not
        // representable in f32).
        let interval = target_fps
            .filter(|fps| *fps > 0.0)
            .map(|fps| Duration::from_nanos((1e9 / f64::from(fps)) as u64));
        Self {
            interval,
            next_frame: None,
        }
    }

    /// Whether a frame should be rendered at `now`.
    pub fn ready_for_frame(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        match self.next_frame {
            None => {
                self.next_frame = Some(now + interval);
                true
            }
            Some(deadline) if now >= deadline => {
                let next = deadline + interval;
                self.next_frame = Some(if next <= now { now + interval } else { next });
                true
            }
            Some(_) => false,
        }
    }

    /// Deadline for the next frame, when a cap is active.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.interval.and(self.next_frame)
    }

    pub fn reset(&mut self) {
        self.next_frame = None;
    }
}
