//! Configuration for the vertical stepper.
//!
//! Configuration is built once, when the stepper is created, using the same
//! option pattern as the other widgets: start from [`Config::default`] and
//! apply a slice of [`StepperOption`] values in order.
//!
//! ```rust
//! use bubbletea_stepper::config::{with_extended, with_height, with_steps};
//! use bubbletea_stepper::stepper::new;
//!
//! let stepper = new(&[
//!     with_height(300.0),
//!     with_steps(["Menu", "Cart", "Checkout"]),
//!     with_extended(true),
//! ]);
//! assert_eq!(stepper.per_step_height(), 75.0);
//! ```
//!
//! Everything that isn't used by the stepper's own state (colors, widths,
//! styles, renderers) is passed through verbatim to whatever renders it.

use crate::easing::Easing;
use lipgloss_extras::prelude::*;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Height used when the terminal size cannot be queried.
pub const DEFAULT_WINDOW_HEIGHT: f64 = 24.0;

const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);
const DEFAULT_ANIMATION_DELAY: Duration = Duration::from_millis(700);
const DEFAULT_ACTIVE_COLOR: &str = "#FF0000";
const DEFAULT_INACTIVE_COLOR: &str = "#DEDEDE";

/// Custom renderer for a step or its inner content.
///
/// Receives the step label and a number: the 0-based index for
/// [`Config::render_step`], the 1-based step number for
/// [`Config::render_inner_step`].
pub type StepRenderer = Arc<dyn Fn(&str, usize) -> String + Send + Sync>;

/// Returns the terminal height in rows.
///
/// This is the default total height of the stepper. Falls back to
/// [`DEFAULT_WINDOW_HEIGHT`] when no terminal is attached.
pub fn window_height() -> f64 {
    match crossterm::terminal::size() {
        Ok((_, rows)) if rows > 0 => f64::from(rows),
        Ok(_) => DEFAULT_WINDOW_HEIGHT,
        Err(err) => {
            tracing::debug!(error = %err, "terminal size unavailable, using default height");
            DEFAULT_WINDOW_HEIGHT
        }
    }
}

/// Stepper configuration with defaults applied.
///
/// Fields are public so a renderer can read them, but the stepper takes its
/// own copy at creation; changing a config afterwards does not affect a
/// running stepper.
#[derive(Clone)]
pub struct Config {
    /// Total height of the track.
    pub height: f64,
    /// Ordered step labels.
    pub steps: Vec<String>,
    /// Position the stepper starts at. Not clamped.
    pub initial_position: i32,
    /// How long the progress transition takes.
    pub animation_duration: Duration,
    /// How long the progress value holds before moving.
    pub animation_delay: Duration,
    /// Curve used by the progress transition.
    pub easing: Easing,
    /// Width of the progress track.
    pub track_width: u16,
    /// Width of the whole stepper column.
    pub container_width: u16,
    /// Height of a single step marker row.
    pub step_height: u16,
    /// Style of a step marker.
    pub step_style: Style,
    /// Whether labels are drawn next to the markers.
    pub show_labels: bool,
    /// Color of reached steps.
    pub active_color: String,
    /// Color of steps not yet reached.
    pub inactive_color: String,
    /// Color of the filled part of the track.
    pub track_active_color: String,
    /// Color of the unfilled part of the track.
    pub track_inactive_color: String,
    /// Horizontal distance between a marker and its label.
    pub label_offset: u16,
    /// Style of the label next to a marker.
    pub label_style: Style,
    /// Style of the text inside a marker.
    pub inner_label_style: Style,
    /// Adds a track segment before the first and after the last step.
    pub extended: bool,
    /// Replaces the default marker content.
    pub render_inner_step: Option<StepRenderer>,
    /// Replaces the whole default marker.
    pub render_step: Option<StepRenderer>,

    track_active_customized: bool,
    track_inactive_customized: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: window_height(),
            steps: vec!["Menu".to_string(), "Cart".to_string(), "Checkout".to_string()],
            initial_position: 0,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            animation_delay: DEFAULT_ANIMATION_DELAY,
            easing: Easing::default(),
            track_width: 6,
            container_width: 60,
            step_height: 60,
            step_style: Style::new().width(3).background(Color::from("#FFC0CB")),
            show_labels: true,
            active_color: DEFAULT_ACTIVE_COLOR.to_string(),
            inactive_color: DEFAULT_INACTIVE_COLOR.to_string(),
            track_active_color: DEFAULT_ACTIVE_COLOR.to_string(),
            track_inactive_color: DEFAULT_INACTIVE_COLOR.to_string(),
            label_offset: 30,
            label_style: Style::new().foreground(Color::from("#000000")).bold(true),
            inner_label_style: Style::new().foreground(Color::from("#FFFFFF")).bold(true),
            extended: false,
            render_inner_step: None,
            render_step: None,
            track_active_customized: false,
            track_inactive_customized: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("height", &self.height)
            .field("steps", &self.steps)
            .field("initial_position", &self.initial_position)
            .field("animation_duration", &self.animation_duration)
            .field("animation_delay", &self.animation_delay)
            .field("easing", &self.easing)
            .field("track_width", &self.track_width)
            .field("container_width", &self.container_width)
            .field("step_height", &self.step_height)
            .field("show_labels", &self.show_labels)
            .field("active_color", &self.active_color)
            .field("inactive_color", &self.inactive_color)
            .field("track_active_color", &self.track_active_color)
            .field("track_inactive_color", &self.track_inactive_color)
            .field("label_offset", &self.label_offset)
            .field("extended", &self.extended)
            .field("render_inner_step", &self.render_inner_step.is_some())
            .field("render_step", &self.render_step.is_some())
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Builds a config from defaults and the given options, applied in order.
    pub fn from_options(opts: &[StepperOption]) -> Self {
        let mut config = Self::default();
        for opt in opts {
            opt.apply(&mut config);
        }
        config
    }

    /// Number of animatable track segments.
    ///
    /// One fewer than the number of steps, or two more than that when
    /// [`Config::extended`] is set. Can be zero or negative for a
    /// non-extended stepper with fewer than two steps.
    pub fn progress_steps(&self) -> i32 {
        let len = self.steps.len() as i32;
        if self.extended {
            len + 1
        } else {
            len - 1
        }
    }

    /// Highest position reachable through forward navigation.
    pub fn max_position(&self) -> i32 {
        let len = self.steps.len() as i32;
        if self.extended {
            len + 1
        } else {
            len
        }
    }

    /// Height of one track segment.
    pub fn per_step_height(&self) -> f64 {
        self.height / f64::from(self.progress_steps())
    }
}

/// A single configuration override for [`crate::stepper::new`].
#[derive(Clone)]
pub enum StepperOption {
    /// Total track height.
    Height(f64),
    /// Step labels.
    Steps(Vec<String>),
    /// Starting position.
    InitialPosition(i32),
    /// Transition length.
    AnimationDuration(Duration),
    /// Hold time before the transition moves.
    AnimationDelay(Duration),
    /// Transition curve.
    Easing(Easing),
    /// Track width.
    TrackWidth(u16),
    /// Column width.
    ContainerWidth(u16),
    /// Marker row height.
    StepHeight(u16),
    /// Marker style.
    StepStyle(Style),
    /// Show or hide labels.
    ShowLabels(bool),
    /// Reached-step color. The active track color follows it unless set.
    ActiveColor(String),
    /// Pending-step color. The inactive track color follows it unless set.
    InactiveColor(String),
    /// Filled track color.
    TrackActiveColor(String),
    /// Unfilled track color.
    TrackInactiveColor(String),
    /// Marker to label distance.
    LabelOffset(u16),
    /// Label style.
    LabelStyle(Style),
    /// Marker text style.
    InnerLabelStyle(Style),
    /// Extended track.
    Extended(bool),
    /// Marker content renderer.
    RenderInnerStep(StepRenderer),
    /// Whole-marker renderer.
    RenderStep(StepRenderer),
}

impl StepperOption {
    fn apply(&self, c: &mut Config) {
        match self {
            StepperOption::Height(height) => c.height = *height,
            StepperOption::Steps(steps) => c.steps = steps.clone(),
            StepperOption::InitialPosition(position) => c.initial_position = *position,
            StepperOption::AnimationDuration(duration) => c.animation_duration = *duration,
            StepperOption::AnimationDelay(delay) => c.animation_delay = *delay,
            StepperOption::Easing(easing) => c.easing = *easing,
            StepperOption::TrackWidth(width) => c.track_width = *width,
            StepperOption::ContainerWidth(width) => c.container_width = *width,
            StepperOption::StepHeight(height) => c.step_height = *height,
            StepperOption::StepStyle(style) => c.step_style = style.clone(),
            StepperOption::ShowLabels(show) => c.show_labels = *show,
            StepperOption::ActiveColor(color) => {
                c.active_color = color.clone();
                if !c.track_active_customized {
                    c.track_active_color = color.clone();
                }
            }
            StepperOption::InactiveColor(color) => {
                c.inactive_color = color.clone();
                if !c.track_inactive_customized {
                    c.track_inactive_color = color.clone();
                }
            }
            StepperOption::TrackActiveColor(color) => {
                c.track_active_color = color.clone();
                c.track_active_customized = true;
            }
            StepperOption::TrackInactiveColor(color) => {
                c.track_inactive_color = color.clone();
                c.track_inactive_customized = true;
            }
            StepperOption::LabelOffset(offset) => c.label_offset = *offset,
            StepperOption::LabelStyle(style) => c.label_style = style.clone(),
            StepperOption::InnerLabelStyle(style) => c.inner_label_style = style.clone(),
            StepperOption::Extended(extended) => c.extended = *extended,
            StepperOption::RenderInnerStep(render) => c.render_inner_step = Some(render.clone()),
            StepperOption::RenderStep(render) => c.render_step = Some(render.clone()),
        }
    }
}

/// Sets the total track height.
pub fn with_height(height: f64) -> StepperOption {
    StepperOption::Height(height)
}

/// Sets the step labels.
///
/// ```rust
/// use bubbletea_stepper::config::{with_steps, Config};
///
/// let config = Config::from_options(&[with_steps(["Shipping", "Payment"])]);
/// assert_eq!(config.steps, vec!["Shipping", "Payment"]);
/// ```
pub fn with_steps<I, S>(steps: I) -> StepperOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StepperOption::Steps(steps.into_iter().map(Into::into).collect())
}

/// Sets the starting position. The value is not clamped.
pub fn with_initial_position(position: i32) -> StepperOption {
    StepperOption::InitialPosition(position)
}

/// Sets how long the progress transition takes.
pub fn with_animation_duration(duration: Duration) -> StepperOption {
    StepperOption::AnimationDuration(duration)
}

/// Sets how long the progress value holds before moving.
pub fn with_animation_delay(delay: Duration) -> StepperOption {
    StepperOption::AnimationDelay(delay)
}

/// Sets the transition curve.
pub fn with_easing(easing: Easing) -> StepperOption {
    StepperOption::Easing(easing)
}

/// Sets the track width.
pub fn with_track_width(width: u16) -> StepperOption {
    StepperOption::TrackWidth(width)
}

/// Sets the column width.
pub fn with_container_width(width: u16) -> StepperOption {
    StepperOption::ContainerWidth(width)
}

/// Sets the marker row height.
pub fn with_step_height(height: u16) -> StepperOption {
    StepperOption::StepHeight(height)
}

/// Sets the marker style.
pub fn with_step_style(style: Style) -> StepperOption {
    StepperOption::StepStyle(style)
}

/// Hides the step labels.
pub fn without_labels() -> StepperOption {
    StepperOption::ShowLabels(false)
}

/// Sets the reached-step color.
///
/// Unless [`with_track_active_color`] is also given, the filled track uses
/// this color too.
///
/// ```rust
/// use bubbletea_stepper::config::{with_active_color, with_track_active_color, Config};
///
/// let config = Config::from_options(&[with_active_color("#00FF00")]);
/// assert_eq!(config.track_active_color, "#00FF00");
///
/// let config = Config::from_options(&[
///     with_track_active_color("#0000FF"),
///     with_active_color("#00FF00"),
/// ]);
/// assert_eq!(config.track_active_color, "#0000FF");
/// ```
pub fn with_active_color(color: impl Into<String>) -> StepperOption {
    StepperOption::ActiveColor(color.into())
}

/// Sets the pending-step color. The unfilled track follows it unless set.
pub fn with_inactive_color(color: impl Into<String>) -> StepperOption {
    StepperOption::InactiveColor(color.into())
}

/// Sets the filled track color.
pub fn with_track_active_color(color: impl Into<String>) -> StepperOption {
    StepperOption::TrackActiveColor(color.into())
}

/// Sets the unfilled track color.
pub fn with_track_inactive_color(color: impl Into<String>) -> StepperOption {
    StepperOption::TrackInactiveColor(color.into())
}

/// Sets the marker to label distance.
pub fn with_label_offset(offset: u16) -> StepperOption {
    StepperOption::LabelOffset(offset)
}

/// Sets the label style.
pub fn with_label_style(style: Style) -> StepperOption {
    StepperOption::LabelStyle(style)
}

/// Sets the marker text style.
pub fn with_inner_label_style(style: Style) -> StepperOption {
    StepperOption::InnerLabelStyle(style)
}

/// Adds a track segment before the first and after the last step.
pub fn with_extended(extended: bool) -> StepperOption {
    StepperOption::Extended(extended)
}

/// Replaces the marker content. The renderer gets the label and the 1-based
/// step number.
pub fn with_render_inner_step<F>(render: F) -> StepperOption
where
    F: Fn(&str, usize) -> String + Send + Sync + 'static,
{
    StepperOption::RenderInnerStep(Arc::new(render))
}

/// Replaces the whole marker. The renderer gets the label and the 0-based index.
pub fn with_render_step<F>(render: F) -> StepperOption
where
    F: Fn(&str, usize) -> String + Send + Sync + 'static,
{
    StepperOption::RenderStep(Arc::new(render))
}
