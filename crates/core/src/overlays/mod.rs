pub mod region;
pub mod time_window;

use deepdive_protocol::{LaneDescriptor, Modifiers, OverlayGeometry, OverlayMark, Point, SelectionEvent};

pub use region::RegionSelector;
pub use time_window::TimeWindowSelector;

use crate::controller::ViewController;

/// Everything a strategy needs from one pointer event: where the pointer
/// is, which modifiers are held, the current lane snapshot, and the
/// overlay's pixel geometry. Rebuilt by the host for every event.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    pub pointer: Point,
    pub modifiers: Modifiers,
    pub lanes: &'a [LaneDescriptor],
    pub geometry: OverlayGeometry,
}

/// A mouse-gesture strategy layered over the lanes.
///
/// Implementations are plain synchronous state machines (`Idle` ⇄
/// `Dragging`); the dispatcher guarantees start/move/end/cleanup arrive in
/// gesture order and that only one strategy is live at a time.
pub trait InteractiveOverlay {
    /// Whether this strategy wants the gesture beginning at `ctx`.
    fn accepts(&self, ctx: &GestureContext<'_>, controller: &ViewController) -> bool;

    /// Begin a gesture. Activation may still fail (e.g. the pointer turns
    /// out to be outside the lanes); the caller must check [`is_active`]
    /// afterwards rather than assume success.
    ///
    /// [`is_active`]: InteractiveOverlay::is_active
    fn start(&mut self, ctx: &GestureContext<'_>, controller: &ViewController);

    /// Pointer moved mid-gesture. Only updates transient visuals — the
    /// controller reference is read-only here; a strategy that detects an
    /// invalidated gesture (say, the overlay was resized under it)
    /// self-cancels instead of drawing.
    fn move_to(&mut self, ctx: &GestureContext<'_>, controller: &ViewController);

    /// Pointer released: commit or discard, then clean up. Returns a
    /// selection payload when the gesture produced one.
    fn end(&mut self, ctx: &GestureContext<'_>, controller: &mut ViewController)
    -> Option<SelectionEvent>;

    /// Discard all transient state and return to idle. Safe to call any
    /// number of times.
    fn cleanup(&mut self);

    fn is_active(&self) -> bool;

    /// The transient visuals to draw for the in-progress gesture.
    fn marks(&self) -> &[OverlayMark];
}

/// Gesture lifecycle as seen by the dispatcher. `Armed` means a strategy
/// accepted the gesture but its `start` did not activate; the owner is
/// dropped on the next pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Armed,
    Active,
}

/// Single entry point for pointer events.
///
/// Holds the registered strategies in priority order and gives each
/// gesture to the first strategy whose acceptance predicate passes; all
/// further events for that gesture route only to it. A strategy that goes
/// inactive on its own is dropped immediately and receives nothing more
/// for that gesture.
pub struct OverlayDispatcher {
    overlays: Vec<Box<dyn InteractiveOverlay>>,
    current: Option<usize>,
}

impl OverlayDispatcher {
    pub fn new(overlays: Vec<Box<dyn InteractiveOverlay>>) -> Self {
        Self {
            overlays,
            current: None,
        }
    }

    /// The standard deep-dive pair: region selection first (its
    /// modifier-key predicate is the more specific), time windowing as the
    /// fallback.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(RegionSelector::new()),
            Box::new(TimeWindowSelector::new()),
        ])
    }

    pub fn state(&self) -> GestureState {
        match self.current {
            Some(i) if self.overlays[i].is_active() => GestureState::Active,
            Some(_) => GestureState::Armed,
            None => GestureState::Idle,
        }
    }

    /// Pointer-down: pick an owner for the new gesture. Ignored when a
    /// gesture is already in flight — the host's event ordering makes that
    /// impossible, and refusing keeps the single-owner invariant even if
    /// it happens.
    ///
    /// The accepting strategy owns the gesture from this point even if its
    /// `start` fails to activate (the dispatcher reads as `Armed` then);
    /// the next move or up observes the inactive owner and drops it.
    pub fn on_pointer_down(&mut self, ctx: &GestureContext<'_>, controller: &ViewController) {
        if self.current.is_some() {
            return;
        }
        let Some(index) = self
            .overlays
            .iter()
            .position(|overlay| overlay.accepts(ctx, controller))
        else {
            return;
        };
        self.current = Some(index);
        self.overlays[index].start(ctx, controller);
    }

    /// Pointer-move: forward to the gesture owner, dropping it if it has
    /// self-cancelled.
    pub fn on_pointer_move(&mut self, ctx: &GestureContext<'_>, controller: &ViewController) {
        let Some(index) = self.current else {
            return;
        };
        if !self.overlays[index].is_active() {
            self.current = None;
            return;
        }
        self.overlays[index].move_to(ctx, controller);
        if !self.overlays[index].is_active() {
            self.current = None;
        }
    }

    /// Pointer-up: forward to the owner's `end` and clear to idle
    /// regardless of the outcome.
    pub fn on_pointer_up(
        &mut self,
        ctx: &GestureContext<'_>,
        controller: &mut ViewController,
    ) -> Option<SelectionEvent> {
        let index = self.current.take()?;
        if !self.overlays[index].is_active() {
            return None;
        }
        self.overlays[index].end(ctx, controller)
    }

    /// Abort whatever gesture is in flight.
    pub fn cancel(&mut self) {
        if let Some(index) = self.current.take() {
            self.overlays[index].cleanup();
        }
    }

    /// Transient visuals of the live gesture, empty when idle.
    pub fn marks(&self) -> &[OverlayMark] {
        match self.current {
            Some(i) => self.overlays[i].marks(),
            None => &[],
        }
    }
}
