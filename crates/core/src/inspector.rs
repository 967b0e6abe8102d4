use serde::Serialize;

use deepdive_protocol::{FieldValue, LaneDescriptor, LaneKind, OverlayGeometry, Point, Row};

use crate::controller::ViewController;
use crate::scale::{TimeScale, ValueScale};

/// Lanes shorter than this render no investigator readout — there is no
/// room for one, and squeezed lanes tend to have stale bounds.
const MIN_LANE_HEIGHT: f64 = 15.0;

/// Nominal readout label width used to decide which side of the cursor the
/// label fits on. The host measures real text; this is only a hint.
const LABEL_WIDTH_PX: f64 = 80.0;

/// Read-only inspection data for one lane under the cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionEntry {
    pub lane_id: String,
    pub kind: LaneKind,
    /// Bucket start of the matched row.
    pub row_time: f64,
    /// Bucket width of the matched row.
    pub span: f64,
    /// The matched row's plotted value, if the row carries one.
    pub value: Option<FieldValue>,
    /// Pixel y of the value marker for graph-kind lanes.
    pub marker_y: Option<f64>,
    /// The lane's value-axis extent, for the range readout.
    pub vertical_extent: [f64; 2],
    /// Whether the readout label should render left of the cursor because
    /// it would not fit before the overlay's right edge.
    pub label_flips_left: bool,
}

/// Compute investigator readouts for every lane under the pointer.
///
/// Purely a query: for each lane whose body vertically contains the
/// pointer, map the pointer's x through the effective time domain and look
/// up the matching row. Graph lanes match the nearest row by absolute time
/// difference (earlier row wins ties); event lanes match only a row whose
/// `[time, time + span)` bucket contains the mapped time and whose value is
/// positive, so sparse lanes never produce a spurious zero reading. Lanes
/// with no match are omitted.
pub fn inspect(
    pointer: Point,
    lanes: &[LaneDescriptor],
    geometry: OverlayGeometry,
    controller: &ViewController,
) -> Vec<InspectionEntry> {
    let Some(domain) = controller.effective_domain() else {
        return Vec::new();
    };
    if pointer.x < 1.0 || pointer.x > geometry.width {
        return Vec::new();
    }

    let scale = TimeScale::new(domain, geometry.width);
    let time = scale.time_at(pointer.x);
    let label_flips_left = pointer.x + LABEL_WIDTH_PX >= geometry.width;

    lanes
        .iter()
        .filter(|lane| lane.bounds.height >= MIN_LANE_HEIGHT && lane.bounds.contains_y(pointer.y))
        .filter_map(|lane| {
            let row = match lane.kind {
                LaneKind::Event => event_row_at(lane, time)?,
                LaneKind::Heatmap => return None,
                _ => nearest_row(lane, time)?,
            };
            let value = row.value(&lane.value_field).cloned();
            let marker_y = if lane.kind.is_graph() {
                let value_scale = ValueScale::new(lane.vertical_extent, lane.bounds);
                value
                    .as_ref()
                    .and_then(FieldValue::as_number)
                    .map(|v| value_scale.y_at(v))
            } else {
                None
            };
            Some(InspectionEntry {
                lane_id: lane.id.clone(),
                kind: lane.kind,
                row_time: row.time,
                span: row.span,
                value,
                marker_y,
                vertical_extent: lane.vertical_extent,
                label_flips_left,
            })
        })
        .collect()
}

/// Nearest row to `time` by absolute difference of bucket starts; when two
/// rows are equidistant the earlier one wins.
fn nearest_row(lane: &LaneDescriptor, time: f64) -> Option<&Row> {
    let mut best: Option<(&Row, f64)> = None;
    for row in &lane.rows {
        let dist = (row.time - time).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((row, dist)),
        }
    }
    best.map(|(row, _)| row)
}

/// The row whose bucket interval contains `time`, skipping zero-valued
/// filler buckets that sparse event searches emit between real events.
fn event_row_at<'a>(lane: &'a LaneDescriptor, time: f64) -> Option<&'a Row> {
    lane.rows.iter().find(|row| {
        row.bucket_contains(time)
            && row
                .value(&lane.value_field)
                .and_then(FieldValue::as_number)
                .is_some_and(|v| v > 0.0)
    })
}
