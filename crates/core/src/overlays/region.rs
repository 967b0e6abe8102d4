use deepdive_protocol::{
    LaneKind, OverlayGeometry, OverlayMark, Point, Rect, SelectionEvent,
};

use crate::controller::ViewController;
use crate::overlays::{GestureContext, InteractiveOverlay};
use crate::scale::TimeScale;

const SLOP_PX: f64 = 15.0;
/// Gutter between adjacent heatmap columns, in pixels.
const CELL_GUTTER_PX: f64 = 1.0;

/// One heatmap cell as currently rendered: its pixel rectangle plus the
/// row identity needed to build the selection payload.
#[derive(Debug, Clone, PartialEq)]
struct Cell {
    rect: Rect,
    lane_id: String,
    time: f64,
    span: f64,
}

/// Shift-drag across heatmap lanes to select a rectangular region of
/// cells, emitted to the event-table collaborator as a row/time filter.
///
/// `Idle → Dragging → Idle`. Matching is recomputed from scratch on every
/// move using a strict 2D interval-overlap test against the rendered cell
/// rectangles; a drag that matches nothing cleans up without emitting.
pub struct RegionSelector {
    active: bool,
    home: Option<Point>,
    start_geometry: Option<OverlayGeometry>,
    marks: Vec<OverlayMark>,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self {
            active: false,
            home: None,
            start_geometry: None,
            marks: Vec::new(),
        }
    }

    fn in_lanes(ctx: &GestureContext<'_>) -> bool {
        ctx.pointer.x >= 1.0
            && ctx.pointer.x <= ctx.geometry.width + SLOP_PX
            && ctx.pointer.y > 0.0
            && ctx.pointer.y < ctx.geometry.height
    }

    /// Pixel rectangles of every heatmap cell, derived from the same
    /// effective time scale the lanes were last rendered against.
    fn heatmap_cells(ctx: &GestureContext<'_>, controller: &ViewController) -> Vec<Cell> {
        let Some(domain) = controller.effective_domain() else {
            return Vec::new();
        };
        let scale = TimeScale::new(domain, ctx.geometry.width);

        let mut cells = Vec::new();
        for lane in ctx.lanes {
            if lane.kind != LaneKind::Heatmap || lane.rows.is_empty() {
                continue;
            }
            let Some([ext_min, ext_max]) = lane.time_extent() else {
                continue;
            };
            let extent_px = scale.x_at(ext_max) - scale.x_at(ext_min);
            let column_width = ((extent_px / lane.rows.len() as f64) - CELL_GUTTER_PX)
                .floor()
                .max(1.0);
            let fallback_span = lane.bucket_span();
            for row in &lane.rows {
                cells.push(Cell {
                    rect: Rect::new(
                        scale.x_at(row.time),
                        lane.bounds.top,
                        column_width,
                        lane.bounds.height,
                    ),
                    lane_id: lane.id.clone(),
                    time: row.time,
                    span: if row.span > 0.0 { row.span } else { fallback_span },
                });
            }
        }
        cells
    }

    fn matched_cells(&self, ctx: &GestureContext<'_>, controller: &ViewController) -> Vec<Cell> {
        let Some(home) = self.home else {
            return Vec::new();
        };
        let region = Rect::from_corners(home, ctx.pointer);
        Self::heatmap_cells(ctx, controller)
            .into_iter()
            .filter(|cell| cell.rect.overlaps(&region))
            .collect()
    }
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractiveOverlay for RegionSelector {
    fn accepts(&self, ctx: &GestureContext<'_>, _controller: &ViewController) -> bool {
        ctx.modifiers.shift
            && ctx
                .lanes
                .iter()
                .any(|lane| lane.kind == LaneKind::Heatmap && lane.bounds.contains_y(ctx.pointer.y))
    }

    fn start(&mut self, ctx: &GestureContext<'_>, controller: &ViewController) {
        if !Self::in_lanes(ctx) || !controller.is_ready() {
            self.cleanup();
            return;
        }
        self.active = true;
        self.home = Some(ctx.pointer);
        self.start_geometry = Some(ctx.geometry);
    }

    fn move_to(&mut self, ctx: &GestureContext<'_>, controller: &ViewController) {
        if !self.active {
            return;
        }
        // A resize invalidates both the anchor and every cell rectangle.
        if self.start_geometry != Some(ctx.geometry) {
            self.cleanup();
            return;
        }
        let matched = self.matched_cells(ctx, controller);
        self.marks = matched
            .into_iter()
            .map(|cell| OverlayMark::CellHighlight {
                rect: cell.rect,
                lane_id: cell.lane_id,
            })
            .collect();
    }

    fn end(
        &mut self,
        ctx: &GestureContext<'_>,
        controller: &mut ViewController,
    ) -> Option<SelectionEvent> {
        let valid = self.active && self.start_geometry == Some(ctx.geometry);
        let matched = if valid {
            self.matched_cells(ctx, controller)
        } else {
            Vec::new()
        };
        self.cleanup();
        if matched.is_empty() {
            return None;
        }

        let mut rows: Vec<String> = Vec::new();
        for cell in &matched {
            if !rows.contains(&cell.lane_id) {
                rows.push(cell.lane_id.clone());
            }
        }
        // Strict comparisons: the first-encountered cell wins when several
        // buckets share a timestamp.
        let mut earliest = &matched[0];
        let mut latest = &matched[0];
        for cell in &matched[1..] {
            if cell.time < earliest.time {
                earliest = cell;
            }
            if cell.time > latest.time {
                latest = cell;
            }
        }
        Some(SelectionEvent {
            rows,
            earliest_time: earliest.time,
            latest_time: latest.time + latest.span,
        })
    }

    fn cleanup(&mut self) {
        self.marks.clear();
        self.home = None;
        self.start_geometry = None;
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn marks(&self) -> &[OverlayMark] {
        &self.marks
    }
}
