use deepdive_protocol::{OverlayGeometry, OverlayMark, Rect, SelectionEvent};

use crate::controller::ViewController;
use crate::overlays::{GestureContext, InteractiveOverlay};
use crate::scale::TimeScale;
use crate::util::round_number;

/// Drags narrower than this are accidental micro-drags and commit nothing.
const MIN_DRAG_PX: f64 = 5.0;
/// How far outside the overlay the pointer may wander before the gesture
/// is treated as abandoned.
const SLOP_PX: f64 = 15.0;
/// Committed window bounds are rounded to this many decimal places.
const COMMIT_DECIMALS: u32 = 3;

/// Click-drag along the time axis to zoom into a sub-range.
///
/// `Idle → Dragging → Idle`. `move_to` only redraws the selection box; the
/// controller is touched exactly once, in `end`, after the drag has proven
/// itself wider than [`MIN_DRAG_PX`]. Both pixel boundaries map through
/// the *effective* domain, so windowing an already-windowed view zooms
/// further in.
pub struct TimeWindowSelector {
    active: bool,
    anchor_x: Option<f64>,
    start_geometry: Option<OverlayGeometry>,
    marks: Vec<OverlayMark>,
}

impl TimeWindowSelector {
    pub fn new() -> Self {
        Self {
            active: false,
            anchor_x: None,
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

    fn beyond_slop(ctx: &GestureContext<'_>) -> bool {
        ctx.pointer.x < -SLOP_PX
            || ctx.pointer.x > ctx.geometry.width + SLOP_PX
            || ctx.pointer.y < -SLOP_PX
            || ctx.pointer.y > ctx.geometry.height + SLOP_PX
    }

    fn redraw(&mut self, anchor: f64, x: f64, geometry: OverlayGeometry) {
        let left = anchor.min(x);
        let width = (x - anchor).abs();
        self.marks = vec![
            OverlayMark::WindowAnchor {
                x: anchor,
                height: geometry.height,
            },
            OverlayMark::WindowBox {
                rect: Rect::new(left, 0.0, width, geometry.height),
            },
        ];
    }
}

impl Default for TimeWindowSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractiveOverlay for TimeWindowSelector {
    fn accepts(&self, ctx: &GestureContext<'_>, controller: &ViewController) -> bool {
        !ctx.modifiers.shift && Self::in_lanes(ctx) && controller.is_ready()
    }

    fn start(&mut self, ctx: &GestureContext<'_>, controller: &ViewController) {
        if !Self::in_lanes(ctx) || !controller.is_ready() {
            self.cleanup();
            return;
        }
        self.active = true;
        self.anchor_x = Some(ctx.pointer.x);
        self.start_geometry = Some(ctx.geometry);
        self.redraw(ctx.pointer.x, ctx.pointer.x, ctx.geometry);
    }

    fn move_to(&mut self, ctx: &GestureContext<'_>, _controller: &ViewController) {
        if !self.active {
            return;
        }
        // A resize invalidates the pixel bounds the anchor was taken in.
        if self.start_geometry != Some(ctx.geometry) || Self::beyond_slop(ctx) {
            self.cleanup();
            return;
        }
        if let Some(anchor) = self.anchor_x {
            self.redraw(anchor, ctx.pointer.x, ctx.geometry);
        }
    }

    fn end(
        &mut self,
        ctx: &GestureContext<'_>,
        controller: &mut ViewController,
    ) -> Option<SelectionEvent> {
        let anchor = self.anchor_x;
        let released_inside = ctx.pointer.x >= -SLOP_PX
            && ctx.pointer.x <= ctx.geometry.width + SLOP_PX
            && ctx.pointer.y >= 0.0
            && ctx.pointer.y <= ctx.geometry.height;
        let valid = self.active && released_inside && self.start_geometry == Some(ctx.geometry);
        self.cleanup();

        let anchor = anchor?;
        if !valid {
            return None;
        }
        let end_x = ctx.pointer.x;
        if (end_x - anchor).abs() < MIN_DRAG_PX {
            return None;
        }
        let domain = controller.effective_domain()?;
        let scale = TimeScale::new(domain, ctx.geometry.width);
        let min = round_number(scale.time_at(anchor.min(end_x)), COMMIT_DECIMALS);
        let max = round_number(scale.time_at(anchor.max(end_x)), COMMIT_DECIMALS);
        if min < max {
            controller.set_window(min, max).ok();
        }
        None
    }

    fn cleanup(&mut self) {
        self.marks.clear();
        self.anchor_x = None;
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

#[cfg(test)]
mod tests {
    use deepdive_protocol::{LaneDescriptor, Modifiers, Point, TimeDomain};

    use super::*;

    const GEOMETRY: OverlayGeometry = OverlayGeometry {
        width: 500.0,
        height: 300.0,
    };

    fn ctx(x: f64, y: f64) -> GestureContext<'static> {
        static NO_LANES: &[LaneDescriptor] = &[];
        GestureContext {
            pointer: Point::new(x, y),
            modifiers: Modifiers::NONE,
            lanes: NO_LANES,
            geometry: GEOMETRY,
        }
    }

    fn ready_controller() -> ViewController {
        let mut c = ViewController::new();
        c.set_domain(0.0, 1000.0).unwrap();
        c
    }

    fn drag(
        selector: &mut TimeWindowSelector,
        controller: &mut ViewController,
        from: f64,
        to: f64,
    ) {
        selector.start(&ctx(from, 30.0), controller);
        selector.move_to(&ctx(to, 30.0), controller);
        selector.end(&ctx(to, 30.0), controller);
    }

    #[test]
    fn leftward_drag_commits_ordered_window() {
        let mut controller = ready_controller();
        let mut selector = TimeWindowSelector::new();
        // Pixel 100 → time 200, pixel 50 → time 100: order must flip.
        drag(&mut selector, &mut controller, 100.0, 50.0);
        assert_eq!(controller.window(), TimeDomain::new(100.0, 200.0));
        assert!(!selector.is_active());
    }

    #[test]
    fn micro_drag_commits_nothing() {
        let mut controller = ready_controller();
        let mut selector = TimeWindowSelector::new();
        drag(&mut selector, &mut controller, 100.0, 104.0);
        assert_eq!(controller.window(), None);
        assert!(controller.drain_changes().len() == 1); // only the DomainSet
    }

    #[test]
    fn rejects_gesture_with_shift_held() {
        let controller = ready_controller();
        let selector = TimeWindowSelector::new();
        let mut shifted = ctx(100.0, 30.0);
        shifted.modifiers = Modifiers::SHIFT;
        assert!(!selector.accepts(&shifted, &controller));
        assert!(selector.accepts(&ctx(100.0, 30.0), &controller));
    }

    #[test]
    fn rejects_gesture_before_domain_exists() {
        let controller = ViewController::new();
        let mut selector = TimeWindowSelector::new();
        assert!(!selector.accepts(&ctx(100.0, 30.0), &controller));
        selector.start(&ctx(100.0, 30.0), &controller);
        assert!(!selector.is_active());
    }

    #[test]
    fn start_outside_lanes_fails_activation() {
        let controller = ready_controller();
        let mut selector = TimeWindowSelector::new();
        selector.start(&ctx(100.0, 400.0), &controller);
        assert!(!selector.is_active());
        assert!(selector.marks().is_empty());
    }

    #[test]
    fn windowed_commit_maps_through_windowed_domain() {
        let mut controller = ready_controller();
        controller.set_window(100.0, 200.0).unwrap();
        let mut selector = TimeWindowSelector::new();
        // Within the 100..200 window, pixel 0→100, pixel 250→150.
        drag(&mut selector, &mut controller, 1.0, 250.0);
        assert_eq!(controller.window(), TimeDomain::new(100.2, 150.0));
    }

    #[test]
    fn pointer_escaping_slop_cancels_gesture() {
        let mut controller = ready_controller();
        let mut selector = TimeWindowSelector::new();
        selector.start(&ctx(100.0, 30.0), &controller);
        selector.move_to(&ctx(540.0, 30.0), &controller); // width 500 + 15 slop exceeded
        assert!(!selector.is_active());
        selector.end(&ctx(540.0, 30.0), &mut controller);
        assert_eq!(controller.window(), None);
    }

    #[test]
    fn release_below_overlay_discards() {
        let mut controller = ready_controller();
        let mut selector = TimeWindowSelector::new();
        selector.start(&ctx(100.0, 30.0), &controller);
        selector.end(&ctx(300.0, 310.0), &mut controller);
        assert_eq!(controller.window(), None);
        assert!(!selector.is_active());
    }

    #[test]
    fn resize_mid_gesture_hard_cancels() {
        let mut controller = ready_controller();
        let mut selector = TimeWindowSelector::new();
        selector.start(&ctx(100.0, 30.0), &controller);
        let mut resized = ctx(200.0, 30.0);
        resized.geometry = OverlayGeometry::new(800.0, 300.0);
        selector.move_to(&resized, &controller);
        assert!(!selector.is_active());
        assert!(selector.marks().is_empty());
    }

    #[test]
    fn marks_track_the_drag_box() {
        let controller = ready_controller();
        let mut selector = TimeWindowSelector::new();
        selector.start(&ctx(100.0, 30.0), &controller);
        selector.move_to(&ctx(60.0, 30.0), &controller);
        assert_eq!(
            selector.marks(),
            &[
                OverlayMark::WindowAnchor {
                    x: 100.0,
                    height: 300.0
                },
                OverlayMark::WindowBox {
                    rect: Rect::new(60.0, 0.0, 40.0, 300.0)
                },
            ]
        );
    }

    #[test]
    fn cleanup_is_idempotent() {
        let controller = ready_controller();
        let mut selector = TimeWindowSelector::new();
        selector.start(&ctx(100.0, 30.0), &controller);
        selector.cleanup();
        selector.cleanup();
        assert!(!selector.is_active());
        assert!(selector.marks().is_empty());
    }

    #[test]
    fn commit_rounds_to_three_decimals() {
        let mut controller = ViewController::new();
        controller.set_domain(0.0, 1.0).unwrap();
        let mut selector = TimeWindowSelector::new();
        // Pixel 100/500 → 0.2, pixel 433/500 → 0.866.
        drag(&mut selector, &mut controller, 100.0, 433.0);
        assert_eq!(controller.window(), TimeDomain::new(0.2, 0.866));
    }
}
