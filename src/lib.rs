#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-stepper/")]

//! # bubbletea-stepper
//!
//! A vertical progress stepper for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: the state behind a "Menu → Cart → Checkout" style column of
//! step markers joined by a progress track.
//!
//! ## Overview
//!
//! The stepper owns two things:
//!
//! - the **current position** in the flow, moved by saturating
//!   [`go_to_next`](stepper::Model::go_to_next) /
//!   [`go_to_previous`](stepper::Model::go_to_previous) or set directly;
//! - a single **animated progress offset** that, after every position change,
//!   waits a configurable delay and then eases toward the new position's offset
//!   along the track.
//!
//! Drawing is left to you. A renderer takes a [`Context`](stepper::Context)
//! from the stepper and reads positions, offsets, colors, styles and optional
//! custom step renderers from it.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_stepper::prelude::*;
//!
//! let mut stepper = stepper_new(&[
//!     with_height(300.0),
//!     with_steps(["Menu", "Cart", "Checkout"]),
//! ]);
//!
//! // Every position change returns the command that animates the track.
//! let cmd = stepper.go_to_next();
//! assert!(cmd.is_some());
//! assert_eq!(stepper.current_position(), 1);
//!
//! // Renderers read through a context handle.
//! let ctx = stepper.context();
//! assert_eq!(ctx.per_step_height(), 150.0);
//! ```
//!
//! ## Layout Math
//!
//! | | segments | max position | offset of position `p` |
//! |---|---|---|---|
//! | regular | `steps - 1` | `steps` | `segment * (p - 1)` |
//! | extended | `steps + 1` | `steps + 1` | `segment * p` |
//!
//! where `segment = height / segments`.

pub mod animation;
pub mod config;
pub mod easing;
pub mod stepper;

pub use animation::{AnimatedValue, ProgressValue, Timing};
pub use config::{Config, StepRenderer, StepperOption};
pub use easing::Easing;
pub use stepper::{
    new as stepper_new, Context as StepperContext, FrameMsg as StepperFrameMsg,
    Model as Stepper, PositionListener,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_stepper::prelude::*;
///
/// let stepper: Stepper = stepper_new(&[with_extended(true), without_labels()]);
/// assert!(stepper.config().extended);
/// ```
pub mod prelude {
    pub use crate::animation::ProgressValue;
    pub use crate::config::{
        with_active_color, with_animation_delay, with_animation_duration, with_container_width,
        with_easing, with_extended, with_height, with_inactive_color, with_initial_position,
        with_inner_label_style, with_label_offset, with_label_style, with_render_inner_step,
        with_render_step, with_step_height, with_step_style, with_steps, with_track_active_color,
        with_track_inactive_color, with_track_width, without_labels, Config, StepperOption,
    };
    pub use crate::easing::Easing;
    pub use crate::stepper::{
        new as stepper_new, Context as StepperContext, FrameMsg as StepperFrameMsg,
        Model as Stepper,
    };
}
