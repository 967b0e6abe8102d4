use deepdive_protocol::{LaneBounds, TimeDomain};

/// Linear, clamped pixel↔time mapping across one overlay width.
///
/// Re-derived from the controller's current domain every frame — there is
/// no caching beyond the frame that built it. A degenerate width collapses
/// to a constant mapping instead of dividing by zero (`TimeDomain` itself
/// guarantees `min < max`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: TimeDomain,
    width: f64,
}

impl TimeScale {
    pub fn new(domain: TimeDomain, width: f64) -> Self {
        Self { domain, width }
    }

    pub fn domain(&self) -> TimeDomain {
        self.domain
    }

    /// Map a pixel x-coordinate to a timestamp, clamped to the domain.
    pub fn time_at(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return self.domain.min();
        }
        let frac = (x / self.width).clamp(0.0, 1.0);
        self.domain.min() + frac * self.domain.duration()
    }

    /// Map a timestamp to a pixel x-coordinate, clamped to `[0, width]`.
    pub fn x_at(&self, time: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        let frac = ((time - self.domain.min()) / self.domain.duration()).clamp(0.0, 1.0);
        frac * self.width
    }
}

/// Linear mapping from a lane's value extent to its pixel body, with the
/// value maximum at the lane's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    extent: [f64; 2],
    bounds: LaneBounds,
}

impl ValueScale {
    pub fn new(extent: [f64; 2], bounds: LaneBounds) -> Self {
        Self { extent, bounds }
    }

    /// Map a value to an absolute y-coordinate within the lane body.
    /// A degenerate extent maps everything to the lane's vertical center.
    pub fn y_at(&self, value: f64) -> f64 {
        let [lo, hi] = self.extent;
        let range = hi - lo;
        if range <= 0.0 || self.bounds.height <= 0.0 {
            return self.bounds.top + self.bounds.height / 2.0;
        }
        let frac = ((value - lo) / range).clamp(0.0, 1.0);
        self.bounds.top + (1.0 - frac) * self.bounds.height
    }
}
