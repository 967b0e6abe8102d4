use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which chart type a lane renders. The core never draws these; it only
/// needs the kind to pick the right inspection / selection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneKind {
    Line,
    Area,
    Column,
    Heatmap,
    Event,
}

impl LaneKind {
    /// Lanes carrying a continuous value series, inspected by
    /// nearest-row lookup.
    pub fn is_graph(&self) -> bool {
        matches!(self, Self::Line | Self::Area | Self::Column)
    }
}

/// Vertical placement of a lane's body within the overlay, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneBounds {
    pub top: f64,
    pub height: f64,
}

impl LaneBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether a pointer y-coordinate falls inside this lane's body.
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// A single field value from the backing search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

/// One time bucket of a lane's data. Immutable once produced by the
/// external data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Bucket start, epoch seconds.
    pub time: f64,
    /// Bucket width in seconds.
    pub span: f64,
    /// Remaining fields keyed by field name.
    pub values: BTreeMap<String, FieldValue>,
}

impl Row {
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Whether `time` falls inside this row's `[time, time + span)` bucket.
    pub fn bucket_contains(&self, time: f64) -> bool {
        time >= self.time && time < self.time + self.span
    }
}

/// Read-only snapshot of one visible lane, handed to the core each
/// interaction frame by the chart-rendering layer. The core never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneDescriptor {
    pub id: String,
    pub kind: LaneKind,
    /// Which field of each row the lane plots (the inspected value).
    pub value_field: String,
    /// Value-domain extent `[min, max]` of the lane's y axis.
    pub vertical_extent: [f64; 2],
    pub bounds: LaneBounds,
    /// Rows ordered by time, ascending.
    pub rows: Vec<Row>,
}

impl LaneDescriptor {
    /// Best-effort bucket span for this lane's rows.
    ///
    /// Trusts the first row's span when present; otherwise deduces it from
    /// the gap between the last two rows, falling back to 1 second for a
    /// single-row lane.
    pub fn bucket_span(&self) -> f64 {
        match self.rows.first() {
            Some(first) if first.span > 0.0 => first.span,
            Some(_) if self.rows.len() > 1 => {
                let a = self.rows[self.rows.len() - 2].time;
                let b = self.rows[self.rows.len() - 1].time;
                (b - a).abs()
            }
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    /// Time extent `[first bucket start, last bucket end]` covered by the
    /// lane's rows, or `None` for an empty lane.
    pub fn time_extent(&self) -> Option<[f64; 2]> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        Some([first.time, last.time + last.span.max(0.0)])
    }
}
