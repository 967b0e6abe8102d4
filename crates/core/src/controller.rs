use serde::Serialize;
use thiserror::Error;

use deepdive_protocol::TimeDomain;

use crate::scale::TimeScale;
use crate::util::format_time_duration;

/// Rejected domain mutation. Gesture code never produces these (it clamps
/// and orders its bounds first); they surface only misuse by the host.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("domain bounds inverted or degenerate: min {min} >= max {max}")]
    Inverted { min: f64, max: f64 },
    #[error("domain bound is not a finite number")]
    NonFinite,
}

fn validate(min: f64, max: f64) -> Result<TimeDomain, DomainError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(DomainError::NonFinite);
    }
    TimeDomain::new(min, max).ok_or(DomainError::Inverted { min, max })
}

/// One logical change to the controller's domain state. Batched: setting a
/// window updates both bounds but yields a single notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DomainChange {
    DomainSet(TimeDomain),
    WindowSet(TimeDomain),
    WindowCleared,
}

/// Single source of truth for the deep-dive view's time-domain state.
///
/// All lanes and overlay strategies read from here; only gesture `end`
/// steps and explicit host calls write. Readers always observe a full
/// `(min, max)` pair — the domains are stored as whole [`TimeDomain`]
/// values, so a torn read cannot occur.
#[derive(Debug, Default)]
pub struct ViewController {
    domain: Option<TimeDomain>,
    window: Option<TimeDomain>,
    original: Option<TimeDomain>,
    changes: Vec<DomainChange>,
}

/// Everything the host's axis renderer needs to label one frame of the
/// time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxisData {
    pub scale: TimeScale,
    pub lane_width: f64,
    pub window_duration: f64,
    pub window_duration_string: String,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a plot domain has been established yet. Overlay acceptance
    /// predicates treat "not ready" as a silent refusal.
    pub fn is_ready(&self) -> bool {
        self.domain.is_some()
    }

    /// The full (un-windowed) plot domain.
    pub fn domain(&self) -> Option<TimeDomain> {
        self.domain
    }

    /// The active zoom window, if any.
    pub fn window(&self) -> Option<TimeDomain> {
        self.window
    }

    /// The first domain ever established, kept for zoom-reset reference.
    pub fn original_domain(&self) -> Option<TimeDomain> {
        self.original
    }

    /// Windowed domain if a window is active, else the full domain.
    pub fn effective_domain(&self) -> Option<TimeDomain> {
        self.window.or(self.domain)
    }

    /// Establish a new full plot domain (a fresh search result arrived).
    /// Clears any active window; the whole update is one logical change.
    pub fn set_domain(&mut self, min: f64, max: f64) -> Result<(), DomainError> {
        let domain = validate(min, max)?;
        self.domain = Some(domain);
        self.window = None;
        if self.original.is_none() {
            self.original = Some(domain);
        }
        self.changes.push(DomainChange::DomainSet(domain));
        Ok(())
    }

    /// Commit a zoom window. Called from TimeWindowSelector's `end` with
    /// already-ordered, already-clamped bounds.
    pub fn set_window(&mut self, min: f64, max: f64) -> Result<(), DomainError> {
        let window = validate(min, max)?;
        if self.window == Some(window) {
            return Ok(());
        }
        self.window = Some(window);
        self.changes.push(DomainChange::WindowSet(window));
        Ok(())
    }

    /// Drop the active window, returning to the full domain. No-op (and no
    /// notification) when no window is active.
    pub fn clear_window(&mut self) {
        if self.window.take().is_some() {
            self.changes.push(DomainChange::WindowCleared);
        }
    }

    /// Drain pending change notifications, oldest first. The host calls
    /// this once per event to fan changes out to its lane/axis renderers.
    pub fn drain_changes(&mut self) -> Vec<DomainChange> {
        std::mem::take(&mut self.changes)
    }

    /// Axis description for the current effective domain across a lane of
    /// `lane_width` pixels, or `None` before any domain exists.
    pub fn time_axis_data(&self, lane_width: f64) -> Option<TimeAxisData> {
        let domain = self.effective_domain()?;
        let duration = domain.duration();
        Some(TimeAxisData {
            scale: TimeScale::new(domain, lane_width),
            lane_width,
            window_duration: duration,
            window_duration_string: format_time_duration(duration),
        })
    }
}
