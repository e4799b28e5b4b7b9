//! Vector helpers and arena bounds
//!
//! Plain 2D math on `DVec2`. Everything here is total: degenerate inputs
//! (zero-length vectors, shrunken arenas) produce a defined result.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Vectors shorter than this are treated as zero-length
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Scale `v` down to `max_speed` if it is longer, otherwise return it unchanged
#[inline]
pub fn clamp_magnitude(v: DVec2, max_speed: f64) -> DVec2 {
    let magnitude = v.length();
    if magnitude > max_speed {
        v * (max_speed / magnitude)
    } else {
        v
    }
}

/// Unit vector in the direction of `v`, or zero if `v` is (nearly) zero
#[inline]
pub fn normalize(v: DVec2) -> DVec2 {
    let magnitude = v.length();
    if magnitude <= NORMALIZE_EPSILON {
        DVec2::ZERO
    } else {
        v / magnitude
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// The rectangular playable area, `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Arena for a browser viewport: the side panel eats into the width
    pub fn from_viewport(viewport_width: f64, viewport_height: f64) -> Self {
        Self::new(
            viewport_width - crate::consts::LEFT_PANEL_WIDTH,
            viewport_height,
        )
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check if a point is within the arena rectangle (edges inclusive)
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Clamp the center of a body of the given diameter so it stays inside.
    ///
    /// If the arena is narrower than the body the lower bound wins.
    pub fn clamp_body(&self, point: DVec2, size: f64) -> DVec2 {
        let half = size / 2.0;
        DVec2::new(
            point.x.min(self.width - half).max(half),
            point.y.min(self.height - half).max(half),
        )
    }
}
