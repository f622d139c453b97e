//! Time-based animation driver.
//!
//! The driver is a single-shot interpolator between two values. It does not
//! own a clock: the host calls [`AnimationDriver::tick`] from its display
//! refresh callback with a monotonically increasing timestamp. Hosts register
//! that callback through a [`FrameScheduler`], which lets tests step the
//! driver with synthetic timestamps.
//!
//! # Lifecycle
//!
//! 1. [`AnimationDriver::start`] arms a transition (replacing any transition in
//!    flight without finishing it).
//! 2. The first tick latches the start time and reports progress 0.
//! 3. Each later tick reports the eased, interpolated value.
//! 4. Once the elapsed time reaches the duration the driver reports
//!    [`Frame::Finished`] with the exact end value and returns to idle.

use crate::interpolate::{ease_in_out, Lerp};
use log::debug;
use std::time::Duration;

/// Registration of the per-frame callback with the host's display clock.
///
/// Both calls must be idempotent: requesting frames while already requested,
/// or cancelling when nothing is registered, is harmless.
pub trait FrameScheduler {
    /// Start delivering per-frame ticks.
    fn request_frames(&mut self);

    /// Stop delivering per-frame ticks.
    fn cancel_frames(&mut self);
}

/// A scheduler for hosts that poll: it only records whether frames are wanted.
///
/// Also used by tests to observe registration and cancellation.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    active: bool,
    requests: usize,
    cancellations: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame callback is currently registered.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of times frames went from unregistered to registered.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Number of times frames went from registered to unregistered.
    pub fn cancellations(&self) -> usize {
        self.cancellations
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frames(&mut self) {
        if !self.active {
            self.active = true;
            self.requests += 1;
        }
    }

    fn cancel_frames(&mut self) {
        if self.active {
            self.active = false;
            self.cancellations += 1;
        }
    }
}

/// One sample produced by a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<T> {
    /// An intermediate, interpolated value.
    Progress(T),
    /// The exact end value; the animation is over.
    Finished(T),
}

/// A transition in flight.
#[derive(Debug, Clone)]
struct Transition<T> {
    from: T,
    to: T,
    duration: Duration,
    started_at: Option<Duration>,
    current: T,
}

/// Whether an animation is running.
#[derive(Debug, Clone, Default)]
enum AnimationState<T> {
    #[default]
    Idle,
    Running(Transition<T>),
}

/// Single-shot, cancellable interpolator between two values.
#[derive(Debug, Clone)]
pub struct AnimationDriver<T> {
    state: AnimationState<T>,
}

impl<T> Default for AnimationDriver<T> {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
        }
    }
}

impl<T: Lerp + Clone> AnimationDriver<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin animating from `from` to `to` over `duration`.
    ///
    /// A transition already in flight is dropped without being finished. The
    /// start value is taken as given, never from the interrupted transition.
    pub fn start(&mut self, from: T, to: T, duration: Duration) {
        if self.is_running() {
            debug!("animation superseded before completion");
        }
        self.state = AnimationState::Running(Transition {
            current: from.clone(),
            from,
            to,
            duration,
            started_at: None,
        });
    }

    /// Sample the transition at `now`.
    ///
    /// Returns `None` when idle. A zero duration finishes on the first tick.
    pub fn tick(&mut self, now: Duration) -> Option<Frame<T>> {
        let AnimationState::Running(transition) = &mut self.state else {
            return None;
        };

        let started_at = *transition.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);
        let progress = if transition.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / transition.duration.as_secs_f64()).clamp(0.0, 1.0)
        };

        if progress >= 1.0 {
            debug!("animation finished after {elapsed:?}");
            let end = transition.to.clone();
            self.state = AnimationState::Idle;
            return Some(Frame::Finished(end));
        }

        transition.current = transition
            .from
            .lerp(&transition.to, ease_in_out(progress));
        Some(Frame::Progress(transition.current.clone()))
    }

    /// Stop without finishing. Returns whether a transition was in flight.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = AnimationState::Idle;
        was_running
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running(_))
    }

    /// The most recently sampled value, if running.
    pub fn current(&self) -> Option<&T> {
        match &self.state {
            AnimationState::Running(t) => Some(&t.current),
            AnimationState::Idle => None,
        }
    }
}
