//! Vertical progress stepper state for Bubble Tea applications.
//!
//! The stepper tracks which step of a multi-step flow (a checkout, an
//! installer, a wizard) is current and animates a single progress offset
//! along a vertical track whenever that step changes. It doesn't draw
//! anything itself: a renderer reads the stepper's [`Context`] and draws
//! markers, the track and labels from it.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_stepper::config::{with_height, with_steps};
//! use bubbletea_stepper::stepper::new;
//!
//! let mut stepper = new(&[
//!     with_height(300.0),
//!     with_steps(["Menu", "Cart", "Checkout"]),
//! ]);
//! assert_eq!(stepper.per_step_height(), 150.0);
//!
//! let _cmd = stepper.go_to_next();
//! assert_eq!(stepper.current_position(), 1);
//! assert_eq!(stepper.target_offset(), 0.0);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! Navigation returns the command that drives the progress animation. Hand it
//! back to the runtime and forward every message to [`Model::update`]:
//!
//! ```rust
//! use bubbletea_stepper::stepper;
//! use bubbletea_rs::{Cmd, Msg};
//!
//! struct Checkout {
//!     stepper: stepper::Model,
//! }
//!
//! impl Checkout {
//!     fn init(&self) -> Option<Cmd> {
//!         Some(self.stepper.init())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(cmd) = self.stepper.update(msg) {
//!             return Some(cmd);
//!         }
//!         None
//!     }
//!
//!     fn payment_accepted(&mut self) -> Option<Cmd> {
//!         self.stepper.go_to_next()
//!     }
//! }
//! ```
//!
//! # Navigation Bounds
//!
//! [`Model::go_to_next`] and [`Model::go_to_previous`] saturate at
//! `0..=max_position()`. [`Model::set_current_position`] and
//! [`Model::update_current_position`] do not clamp at all; they are the escape
//! hatch for callers that want direct control and take responsibility for the
//! range themselves.

use crate::animation::{AnimatedValue, ProgressValue};
use crate::config::{Config, StepperOption};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::fmt;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Internal ID management for stepper instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u32 = 60;

/// Message that advances a stepper's progress animation by one frame.
///
/// Produced by the commands returned from navigation and [`Model::init`].
/// A frame carries the id of the stepper it belongs to and the tag of the
/// animation that scheduled it; frames from a superseded animation are
/// dropped by [`Model::update`].
#[derive(Debug, Clone)]
pub struct FrameMsg {
    id: i64,
    tag: i64,
}

/// Observer notified with the new position after every committed change.
pub type PositionListener = Box<dyn FnMut(i32) + Send>;

/// Read-only view of a stepper for whatever renders it.
///
/// Cheap to clone. Position and progress are live: they reflect the stepper's
/// latest state without re-fetching the context.
///
/// ```rust
/// use bubbletea_stepper::config::with_height;
/// use bubbletea_stepper::stepper::new;
///
/// let mut stepper = new(&[with_height(300.0)]);
/// let ctx = stepper.context();
///
/// let _cmd = stepper.go_to_next();
/// assert_eq!(ctx.current_position(), 1);
/// assert_eq!(ctx.steps().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    config: Arc<Config>,
    per_step_height: f64,
    position: Arc<AtomicI32>,
    progress: ProgressValue,
}

impl Context {
    /// Current step position.
    pub fn current_position(&self) -> i32 {
        self.position.load(Ordering::Acquire)
    }

    /// Current animated offset along the track.
    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    /// Height of one track segment.
    pub fn per_step_height(&self) -> f64 {
        self.per_step_height
    }

    /// Step labels.
    pub fn steps(&self) -> &[String] {
        &self.config.steps
    }

    /// The full configuration, defaults applied.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true if the step at `index` has been reached.
    ///
    /// In extended mode position 0 sits before the first step, so step `i`
    /// is reached at position `i + 1`.
    pub fn is_step_active(&self, index: usize) -> bool {
        let index = index as i64;
        let position = i64::from(self.current_position());
        if self.config.extended {
            index < position
        } else {
            index <= position
        }
    }
}

/// The stepper: owns the current position and the animated progress value.
pub struct Model {
    id: i64,
    tag: i64,
    config: Arc<Config>,
    per_step_height: f64,
    current_position: i32,
    position: Arc<AtomicI32>,
    progress: AnimatedValue,
    listeners: Vec<PositionListener>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("config", &self.config)
            .field("per_step_height", &self.per_step_height)
            .field("current_position", &self.current_position)
            .field("progress", &self.progress)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Creates a stepper from the given options.
///
/// The progress value starts at `per_step_height * initial_position` and the
/// first animation, toward the initial position's offset, is scheduled right
/// away. Return [`Model::init`] from your application's `init` to run it.
///
/// With fewer than two steps and `extended` off there are no track segments;
/// the per-step height is then infinite or negative and a warning is logged.
pub fn new(opts: &[StepperOption]) -> Model {
    new_at(Config::from_options(opts), Instant::now())
}

fn new_at(config: Config, now: Instant) -> Model {
    let per_step_height = config.per_step_height();
    if config.progress_steps() < 1 {
        tracing::warn!(
            steps = config.steps.len(),
            extended = config.extended,
            per_step_height,
            "stepper has no track segments"
        );
    }

    let initial = config.initial_position;
    let mut m = Model {
        id: next_id(),
        tag: 0,
        per_step_height,
        current_position: initial,
        position: Arc::new(AtomicI32::new(initial)),
        progress: AnimatedValue::new(per_step_height * f64::from(initial)),
        config: Arc::new(config),
        listeners: Vec::new(),
    };
    m.animate_progress(initial, now);
    m
}

impl Model {
    /// Unique id of this stepper. Frame messages are routed by it.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The configuration this stepper was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a read-only handle for renderers.
    pub fn context(&self) -> Context {
        Context {
            config: Arc::clone(&self.config),
            per_step_height: self.per_step_height,
            position: Arc::clone(&self.position),
            progress: self.progress.handle(),
        }
    }

    /// Current step position.
    pub fn current_position(&self) -> i32 {
        self.current_position
    }

    /// Highest position [`Model::go_to_next`] can reach.
    pub fn max_position(&self) -> i32 {
        self.config.max_position()
    }

    /// Number of animatable track segments.
    pub fn progress_steps(&self) -> i32 {
        self.config.progress_steps()
    }

    /// Height of one track segment.
    pub fn per_step_height(&self) -> f64 {
        self.per_step_height
    }

    /// Read handle on the animated progress offset.
    pub fn progress(&self) -> ProgressValue {
        self.progress.handle()
    }

    /// Offset the progress value is heading to for the current position.
    pub fn target_offset(&self) -> f64 {
        self.progress.target()
    }

    /// Offset along the track for `position`.
    ///
    /// ```rust
    /// use bubbletea_stepper::config::{with_extended, with_height};
    /// use bubbletea_stepper::stepper::new;
    ///
    /// let stepper = new(&[with_height(300.0)]);
    /// assert_eq!(stepper.target_offset_for(0), -150.0);
    /// assert_eq!(stepper.target_offset_for(3), 300.0);
    ///
    /// let extended = new(&[with_height(300.0), with_extended(true)]);
    /// assert_eq!(extended.target_offset_for(0), 0.0);
    /// assert_eq!(extended.target_offset_for(4), 300.0);
    /// ```
    pub fn target_offset_for(&self, position: i32) -> f64 {
        let segment = if self.config.extended {
            position
        } else {
            position - 1
        };
        self.per_step_height * f64::from(segment)
    }

    /// Returns true while the progress value has not settled.
    pub fn is_animating(&self) -> bool {
        self.progress.is_animating(Instant::now())
    }

    /// Returns true at position 0.
    pub fn on_first_step(&self) -> bool {
        self.current_position == 0
    }

    /// Returns true when [`Model::go_to_next`] can no longer advance.
    pub fn on_last_step(&self) -> bool {
        self.current_position >= self.max_position()
    }

    /// Label of the step at the current position, if it names one.
    ///
    /// Positions are indexes into the step list, so the highest reachable
    /// positions (and, in extended mode, the leading position 0 offset) may
    /// point past the labels.
    pub fn current_step_label(&self) -> Option<&str> {
        let index = if self.config.extended {
            self.current_position - 1
        } else {
            self.current_position
        };
        usize::try_from(index)
            .ok()
            .and_then(|i| self.config.steps.get(i))
            .map(String::as_str)
    }

    /// Registers an observer for position changes.
    ///
    /// The listener is called once right away with the current position, then
    /// once after every committed change.
    ///
    /// ```rust
    /// use bubbletea_stepper::stepper::new;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let mut stepper = new(&[]);
    ///
    /// let sink = Arc::clone(&seen);
    /// stepper.subscribe(move |p| sink.lock().unwrap().push(p));
    /// let _ = stepper.go_to_next();
    /// let _ = stepper.go_to_previous();
    /// let _ = stepper.go_to_previous(); // already at 0, nothing committed
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec![0, 1, 0]);
    /// ```
    pub fn subscribe<F>(&mut self, mut listener: F)
    where
        F: FnMut(i32) + Send + 'static,
    {
        listener(self.current_position);
        self.listeners.push(Box::new(listener));
    }

    /// Moves one step forward, unless that would pass [`Model::max_position`].
    ///
    /// Returns the animation command, or `None` when already at the end.
    pub fn go_to_next(&mut self) -> Option<Cmd> {
        let next = self.current_position.saturating_add(1);
        if next <= self.max_position() {
            self.commit_position(next, Instant::now())
        } else {
            None
        }
    }

    /// Moves one step back, unless that would go below 0.
    ///
    /// Returns the animation command, or `None` when already at the start.
    pub fn go_to_previous(&mut self) -> Option<Cmd> {
        let previous = self.current_position.saturating_sub(1);
        if previous >= 0 {
            self.commit_position(previous, Instant::now())
        } else {
            None
        }
    }

    /// Jumps straight to `position`. Not clamped.
    ///
    /// Any integer is accepted; out-of-range positions produce offsets outside
    /// the track rather than an error. Returns `None` if `position` is already
    /// current.
    ///
    /// ```rust
    /// use bubbletea_stepper::config::with_height;
    /// use bubbletea_stepper::stepper::new;
    ///
    /// let mut stepper = new(&[with_height(300.0)]);
    /// let _ = stepper.set_current_position(7);
    /// assert_eq!(stepper.current_position(), 7);
    /// assert_eq!(stepper.target_offset(), 900.0);
    ///
    /// // Navigation only clamps its own moves.
    /// assert!(stepper.go_to_next().is_none());
    /// let _ = stepper.go_to_previous();
    /// assert_eq!(stepper.current_position(), 6);
    /// ```
    pub fn set_current_position(&mut self, position: i32) -> Option<Cmd> {
        self.commit_position(position, Instant::now())
    }

    /// Updates the position from its current value. Not clamped.
    pub fn update_current_position<F>(&mut self, f: F) -> Option<Cmd>
    where
        F: FnOnce(i32) -> i32,
    {
        let position = f(self.current_position);
        self.set_current_position(position)
    }

    /// Returns the command that drives the animation started at creation.
    pub fn init(&self) -> Cmd {
        self.next_frame(Instant::now())
    }

    /// Advances the progress animation on a matching [`FrameMsg`].
    ///
    /// Returns the next frame command while the animation runs, `None` for
    /// unrelated messages, frames of other steppers, frames of superseded
    /// animations, and once the value has settled.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let frame_msg = msg.downcast_ref::<FrameMsg>()?;
        self.handle_frame(frame_msg, Instant::now())
    }

    fn handle_frame(&mut self, frame_msg: &FrameMsg, now: Instant) -> Option<Cmd> {
        if frame_msg.id != self.id || frame_msg.tag != self.tag {
            return None;
        }

        if !self.progress.tick(now) {
            return None;
        }
        Some(self.next_frame(now))
    }

    fn commit_position(&mut self, position: i32, now: Instant) -> Option<Cmd> {
        if position == self.current_position {
            return None;
        }

        tracing::debug!(
            id = self.id,
            from = self.current_position,
            to = position,
            "stepper position changed"
        );
        self.current_position = position;
        self.position.store(position, Ordering::Release);

        let cmd = self.animate_progress(position, now);
        for listener in &mut self.listeners {
            listener(position);
        }
        Some(cmd)
    }

    fn animate_progress(&mut self, position: i32, now: Instant) -> Cmd {
        let target = self.target_offset_for(position);
        self.tag += 1;
        self.progress.animate_to(
            target,
            self.config.animation_delay,
            self.config.animation_duration,
            self.config.easing,
            now,
        );
        tracing::trace!(id = self.id, tag = self.tag, target, "animating progress");
        self.next_frame(now)
    }

    // Sleeps through whatever delay is left before ticking at frame rate.
    fn next_frame(&self, now: Instant) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let frame = Duration::from_nanos(1_000_000_000 / FPS as u64);
        let wait = self.progress.remaining_delay(now).max(frame);

        bubbletea_tick(wait, move |_| Box::new(FrameMsg { id, tag }) as Msg)
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        with_animation_delay, with_animation_duration, with_extended, with_height,
        with_initial_position, with_steps,
    };
    use std::sync::Mutex;

    fn checkout(extended: bool) -> Model {
        new(&[
            with_height(300.0),
            with_steps(["Menu", "Cart", "Checkout"]),
            with_extended(extended),
        ])
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn frame(m: &Model) -> FrameMsg {
        FrameMsg { id: m.id, tag: m.tag }
    }

    #[test]
    fn test_per_step_height() {
        assert_eq!(checkout(false).per_step_height(), 150.0);
        assert_eq!(checkout(true).per_step_height(), 75.0);
        assert_eq!(checkout(false).progress_steps(), 2);
        assert_eq!(checkout(true).progress_steps(), 4);
    }

    #[test]
    fn test_initial_progress_and_target() {
        let m = checkout(false);
        assert_eq!(m.current_position(), 0);
        // Starts at per_step_height * position, heads for the offset of position 0.
        assert_eq!(m.progress().get(), 0.0);
        assert_eq!(m.target_offset(), -150.0);
        assert_eq!(m.tag, 1);

        let m = new(&[
            with_height(300.0),
            with_extended(true),
            with_initial_position(2),
        ]);
        assert_eq!(m.progress().get(), 150.0);
        assert_eq!(m.target_offset(), 150.0);
    }

    #[test]
    fn test_checkout_scenario() {
        let mut m = checkout(false);
        assert_eq!(m.max_position(), 3);

        let expected = [(1, 0.0), (2, 150.0), (3, 300.0)];
        for (position, target) in expected {
            assert!(m.go_to_next().is_some());
            assert_eq!(m.current_position(), position);
            assert_eq!(m.target_offset(), target);
        }

        assert!(m.go_to_next().is_none());
        assert_eq!(m.current_position(), 3);
        assert_eq!(m.target_offset(), 300.0);
    }

    #[test]
    fn test_extended_scenario() {
        let mut m = checkout(true);
        assert_eq!(m.target_offset(), 0.0);
        assert_eq!(m.max_position(), 4);

        while m.go_to_next().is_some() {}
        assert_eq!(m.current_position(), 4);
        assert_eq!(m.target_offset(), 300.0);
    }

    #[test]
    fn test_go_to_previous_at_start_is_noop() {
        let mut m = checkout(false);
        let tag = m.tag;
        assert!(m.go_to_previous().is_none());
        assert_eq!(m.current_position(), 0);
        assert_eq!(m.tag, tag);
        assert_eq!(m.target_offset(), -150.0);
    }

    #[test]
    fn test_navigation_never_leaves_range() {
        for extended in [false, true] {
            for start in 0..=5 {
                let mut m = checkout(extended);
                let _ = m.set_current_position(start.min(m.max_position()));
                for _ in 0..10 {
                    let _ = m.go_to_next();
                    assert!(m.current_position() <= m.max_position());
                }
                assert!(m.on_last_step());
                for _ in 0..10 {
                    let _ = m.go_to_previous();
                    assert!(m.current_position() >= 0);
                }
                assert!(m.on_first_step());
            }
        }
    }

    #[test]
    fn test_target_matches_formula_for_every_change() {
        for extended in [false, true] {
            let mut m = checkout(extended);
            for position in [2, -1, 9, 0, 3] {
                let _ = m.set_current_position(position);
                let segment = if extended { position } else { position - 1 };
                assert_eq!(m.target_offset(), m.per_step_height() * segment as f64);
            }
        }
    }

    #[test]
    fn test_set_current_position_is_unclamped() {
        let mut m = checkout(false);
        assert!(m.set_current_position(-3).is_some());
        assert_eq!(m.current_position(), -3);
        assert_eq!(m.target_offset(), -600.0);

        // Saturating navigation still moves from an out-of-range position.
        let _ = m.go_to_next();
        assert_eq!(m.current_position(), -2);
        assert!(m.go_to_previous().is_none());
        assert_eq!(m.current_position(), -2);
    }

    #[test]
    fn test_same_position_commits_nothing() {
        let mut m = checkout(false);
        let _ = m.set_current_position(2);
        let tag = m.tag;
        assert!(m.set_current_position(2).is_none());
        assert!(m.update_current_position(|p| p).is_none());
        assert_eq!(m.tag, tag);
    }

    #[test]
    fn test_update_current_position() {
        let mut m = checkout(false);
        let _ = m.update_current_position(|p| p + 2);
        assert_eq!(m.current_position(), 2);
        let _ = m.update_current_position(|p| p * 10);
        assert_eq!(m.current_position(), 20);
    }

    #[test]
    fn test_listeners_fire_once_per_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut m = checkout(false);
        let sink = Arc::clone(&seen);
        m.subscribe(move |p| sink.lock().unwrap().push(p));

        let _ = m.go_to_next();
        let _ = m.go_to_next();
        let _ = m.set_current_position(2);
        let _ = m.set_current_position(0);
        let _ = m.go_to_previous();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_context_is_live() {
        let mut m = checkout(true);
        let ctx = m.context();
        assert_eq!(ctx.current_position(), 0);
        assert_eq!(ctx.per_step_height(), 75.0);
        assert!(!ctx.is_step_active(0));

        let _ = m.go_to_next();
        assert_eq!(ctx.current_position(), 1);
        assert!(ctx.is_step_active(0));
        assert!(!ctx.is_step_active(1));
        assert_eq!(ctx.config().steps, m.config().steps);
    }

    #[test]
    fn test_is_step_active_not_extended() {
        let mut m = checkout(false);
        let ctx = m.context();
        assert!(ctx.is_step_active(0));
        assert!(!ctx.is_step_active(1));
        let _ = m.set_current_position(2);
        assert!(ctx.is_step_active(2));
    }

    #[test]
    fn test_current_step_label() {
        let mut m = checkout(false);
        assert_eq!(m.current_step_label(), Some("Menu"));
        let _ = m.set_current_position(3);
        assert_eq!(m.current_step_label(), None);

        let mut m = checkout(true);
        assert_eq!(m.current_step_label(), None);
        let _ = m.go_to_next();
        assert_eq!(m.current_step_label(), Some("Menu"));
    }

    #[test]
    fn test_frame_with_wrong_id_or_tag_is_ignored() {
        let mut m = checkout(false);
        let wrong_id = FrameMsg {
            id: m.id + 999,
            tag: m.tag,
        };
        assert!(m.update(Box::new(wrong_id)).is_none());

        let stale = frame(&m);
        let _ = m.go_to_next();
        assert!(m.update(Box::new(stale)).is_none());
    }

    #[test]
    fn test_unrelated_message_is_ignored() {
        let mut m = checkout(false);
        assert!(m.update(Box::new("hello")).is_none());
    }

    #[test]
    fn test_frames_run_until_settled() {
        let start = Instant::now();
        let config = Config::from_options(&[
            with_height(300.0),
            with_animation_delay(ms(700)),
            with_animation_duration(ms(300)),
        ]);
        let mut m = new_at(config, start);

        let msg = frame(&m);
        assert!(m.handle_frame(&msg, start + ms(100)).is_some());
        assert_eq!(m.progress().get(), 0.0);

        assert!(m.handle_frame(&msg, start + ms(850)).is_some());
        let midway = m.progress().get();
        assert!(midway < 0.0 && midway > -150.0);

        assert!(m.handle_frame(&msg, start + ms(1000)).is_none());
        assert_eq!(m.progress().get(), -150.0);
    }

    #[test]
    fn test_rapid_changes_settle_on_last_target() {
        let start = Instant::now();
        let config = Config::from_options(&[with_height(300.0)]);
        let mut m = new_at(config, start);

        let ctx = m.context();
        let first = frame(&m);
        let _ = m.commit_position(1, start + ms(100));
        let superseded = frame(&m);
        let _ = m.commit_position(2, start + ms(200));
        let latest = frame(&m);

        assert!(m.handle_frame(&first, start + ms(2000)).is_none());
        assert!(m.handle_frame(&superseded, start + ms(2000)).is_none());
        assert_eq!(ctx.progress(), 0.0);

        let mut now = start + ms(200);
        while m.handle_frame(&latest, now).is_some() {
            assert_eq!(m.target_offset(), 150.0);
            now += ms(16);
        }
        assert_eq!(ctx.progress(), 150.0);
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(checkout(false).id(), checkout(false).id());
    }

    #[test]
    fn test_single_step_layout() {
        let m = new(&[with_height(300.0), with_steps(["Only"])]);
        assert_eq!(m.progress_steps(), 0);
        assert!(m.per_step_height().is_infinite());
        assert_eq!(m.max_position(), 1);
    }
}
