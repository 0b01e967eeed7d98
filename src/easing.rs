//! Easing curves for the stepper's timed progress transition.
//!
//! An easing curve maps linear time progress (0.0 to 1.0) onto eased progress.
//! Every curve here is monotonic non-decreasing on that range, so a transition
//! never moves backwards on its way to the target.

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out. Matches the stock timing curve of most mobile
    /// animation engines, hence the default.
    #[default]
    EaseInOut,
    /// Cubic ease-in-out, a more pronounced variant of [`Easing::EaseInOut`].
    EaseInOutCubic,
}

/// Applies an easing curve to a progress value.
///
/// The input is clamped to `0.0..=1.0`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_stepper::easing::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// assert_eq!(ease(Easing::EaseInOut, 1.0), 1.0);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseInOutCubic => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
    }
}

/// Interpolates between `start` and `end` along an easing curve.
#[inline]
pub fn lerp_eased(easing: Easing, start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * ease(easing, t)
}
