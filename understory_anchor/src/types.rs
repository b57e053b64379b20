// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain data shared by scopes, scroll containers, and callers.

use kurbo::Point;

use crate::ScrollError;

/// Scroll direction of a scope.
///
/// Fixed when the scope is created; it selects which measured coordinate
/// drives the scroll and which key the scroll command carries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Scroll along `y`, driven by the measured `top`.
    #[default]
    Vertical,
    /// Scroll along `x`, driven by the measured `left`.
    Horizontal,
}

impl Axis {
    /// Returns `true` for [`Axis::Horizontal`].
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Picks the coordinate of `position` that lies along this axis.
    #[must_use]
    pub const fn primary(self, position: Point) -> f64 {
        match self {
            Self::Vertical => position.y,
            Self::Horizontal => position.x,
        }
    }
}

/// Options accepted by `scroll_to`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollToOptions {
    /// Whether the container should animate the scroll.
    pub animated: bool,
    /// Signed distance added to the measured position before scrolling.
    ///
    /// The default of `-10.0` stops 10 pixels before the target's leading edge.
    pub offset: f64,
}

impl ScrollToOptions {
    /// Default offset applied when none is given.
    pub const DEFAULT_OFFSET: f64 = -10.0;

    /// Returns these options with `animated` replaced.
    #[must_use]
    pub const fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Returns these options with `offset` replaced.
    #[must_use]
    pub const fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Computes the final scroll position for a measured target `position`.
    ///
    /// The offset is applied along `axis` and the result never goes below zero.
    ///
    /// ```
    /// use kurbo::Point;
    /// use understory_anchor::{Axis, ScrollToOptions};
    ///
    /// let options = ScrollToOptions::default();
    /// assert_eq!(options.resolve(Axis::Vertical, Point::new(100.0, 250.0)), 240.0);
    /// assert_eq!(options.resolve(Axis::Vertical, Point::new(100.0, 5.0)), 0.0);
    /// assert_eq!(options.resolve(Axis::Horizontal, Point::new(100.0, 250.0)), 90.0);
    /// ```
    #[must_use]
    pub fn resolve(&self, axis: Axis, position: Point) -> f64 {
        (axis.primary(position) + self.offset).max(0.0)
    }
}

impl Default for ScrollToOptions {
    fn default() -> Self {
        Self {
            animated: true,
            offset: Self::DEFAULT_OFFSET,
        }
    }
}

/// A point-style scroll command: one coordinate set, the other left untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollPoint {
    /// Horizontal scroll position, if this command moves along `x`.
    pub x: Option<f64>,
    /// Vertical scroll position, if this command moves along `y`.
    pub y: Option<f64>,
    /// Whether the container should animate the scroll.
    pub animated: bool,
}

impl ScrollPoint {
    /// Builds a command that moves only along `axis`.
    #[must_use]
    pub const fn along(axis: Axis, position: f64, animated: bool) -> Self {
        match axis {
            Axis::Vertical => Self {
                x: None,
                y: Some(position),
                animated,
            },
            Axis::Horizontal => Self {
                x: Some(position),
                y: None,
                animated,
            },
        }
    }
}

/// Result of one scroll request. Produced exactly once per request.
pub type ScrollOutcome = Result<(), ScrollError>;
