//! The one-dimensional animation behind the stepper's progress indicator.
//!
//! Three pieces:
//!
//! - [`ProgressValue`] is a shared, observable `f64` cell. Clones are read
//!   handles; only the owning [`AnimatedValue`] writes to it.
//! - [`Timing`] describes one "wait, then move to a target" transition and can
//!   be sampled at any instant.
//! - [`AnimatedValue`] owns the cell and at most one in-flight `Timing`.
//!   Starting a new animation replaces the old one, picking up from whatever
//!   value is on screen at that moment.
//!
//! Sampling is always done against an explicit [`Instant`], which keeps the
//! math independent of how frames are scheduled.
//!
//! ```rust
//! use bubbletea_stepper::animation::AnimatedValue;
//! use bubbletea_stepper::easing::Easing;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut value = AnimatedValue::new(0.0);
//! value.animate_to(
//!     100.0,
//!     Duration::from_millis(700),
//!     Duration::from_millis(300),
//!     Easing::Linear,
//!     start,
//! );
//!
//! // Still waiting out the delay.
//! value.tick(start + Duration::from_millis(500));
//! assert_eq!(value.get(), 0.0);
//!
//! // Halfway through the transition.
//! value.tick(start + Duration::from_millis(850));
//! assert!((value.get() - 50.0).abs() < 1e-9);
//!
//! // Settled.
//! assert!(!value.tick(start + Duration::from_secs(1)));
//! assert_eq!(value.get(), 100.0);
//! ```

use crate::easing::{lerp_eased, Easing};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A shared, read-only view of an animated `f64`.
///
/// Cloning is cheap and every clone observes the same value. Consumers such as
/// a rendering layer hold one of these and read it on every frame.
///
/// ```rust
/// use bubbletea_stepper::stepper::new;
///
/// let stepper = new(&[]);
/// let progress = stepper.progress();
/// let again = progress.clone();
/// assert_eq!(progress.get(), again.get());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProgressValue {
    bits: Arc<AtomicU64>,
}

impl ProgressValue {
    pub(crate) fn new(value: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(value.to_bits())),
        }
    }

    /// Returns the value currently shown.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}

/// A delayed, timed transition from one value to another.
///
/// The value holds at `from` for `delay`, then eases to `to` over `duration`,
/// then rests at `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Value the transition starts from.
    pub from: f64,
    /// Value the transition rests at.
    pub to: f64,
    /// Time spent holding `from` before moving.
    pub delay: Duration,
    /// Time spent moving from `from` to `to`.
    pub duration: Duration,
    /// Curve applied to the moving phase.
    pub easing: Easing,
    /// When the transition was requested.
    pub started_at: Instant,
}

impl Timing {
    /// The instant the moving phase begins.
    pub fn moves_at(&self) -> Instant {
        self.started_at + self.delay
    }

    /// The instant the transition comes to rest.
    pub fn ends_at(&self) -> Instant {
        self.moves_at() + self.duration
    }

    /// Samples the transition at `now`.
    pub fn value_at(&self, now: Instant) -> f64 {
        let moves_at = self.moves_at();
        if now < moves_at {
            return self.from;
        }
        if self.duration.is_zero() {
            return self.to;
        }

        let elapsed = now.duration_since(moves_at);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        if t >= 1.0 {
            self.to
        } else {
            lerp_eased(self.easing, self.from, self.to, t)
        }
    }

    /// Returns true once the transition has reached `to`.
    pub fn is_finished_at(&self, now: Instant) -> bool {
        now >= self.ends_at()
    }
}

/// Owns a [`ProgressValue`] and drives it with at most one [`Timing`].
#[derive(Debug)]
pub struct AnimatedValue {
    value: ProgressValue,
    timing: Option<Timing>,
}

impl AnimatedValue {
    /// Creates a value resting at `initial`.
    pub fn new(initial: f64) -> Self {
        Self {
            value: ProgressValue::new(initial),
            timing: None,
        }
    }

    /// Returns the value last written to the shared cell.
    pub fn get(&self) -> f64 {
        self.value.get()
    }

    /// Returns a read handle on the shared cell.
    pub fn handle(&self) -> ProgressValue {
        self.value.clone()
    }

    /// The value this animation is heading to, or resting at.
    pub fn target(&self) -> f64 {
        match self.timing {
            Some(timing) => timing.to,
            None => self.get(),
        }
    }

    /// The in-flight transition, if any.
    pub fn timing(&self) -> Option<&Timing> {
        self.timing.as_ref()
    }

    /// Starts a transition to `target`, replacing any transition in flight.
    ///
    /// The new transition starts from the value visible at `now`, so
    /// redirecting mid-flight never jumps.
    pub fn animate_to(
        &mut self,
        target: f64,
        delay: Duration,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) {
        let from = self.sample(now);
        self.value.set(from);

        if let Some(previous) = self.timing.take() {
            if !previous.is_finished_at(now) {
                tracing::trace!(
                    superseded = previous.to,
                    target,
                    "retargeting in-flight progress animation"
                );
            }
        }

        self.timing = Some(Timing {
            from,
            to: target,
            delay,
            duration,
            easing,
            started_at: now,
        });
    }

    /// Writes the value sampled at `now` into the shared cell.
    ///
    /// Returns true while the transition has not yet come to rest.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(timing) = self.timing else {
            return false;
        };

        self.value.set(timing.value_at(now));
        if timing.is_finished_at(now) {
            self.timing = None;
            return false;
        }
        true
    }

    /// Returns true if a transition is in flight at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.timing
            .map(|timing| !timing.is_finished_at(now))
            .unwrap_or(false)
    }

    /// Time left before the in-flight transition starts moving.
    pub fn remaining_delay(&self, now: Instant) -> Duration {
        self.timing
            .map(|timing| timing.moves_at().saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    fn sample(&self, now: Instant) -> f64 {
        match self.timing {
            Some(timing) => timing.value_at(now),
            None => self.get(),
        }
    }
}
