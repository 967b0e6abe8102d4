//! Interaction engine for the multi-lane time-series deep-dive view.
//!
//! ```text
//!   pointer events ──▶ OverlayDispatcher ──▶ active strategy ──▶ OverlayMark[]
//!                           │                      │
//!                           │                      └─ end: ViewController window
//!                           │                              or SelectionEvent
//!                           └─ none accepted: gesture ignored
//! ```
//!
//! Everything here runs synchronously on the host's event thread: each
//! pointer event is processed to completion before the next, which is what
//! lets the gesture state machines be plain functions without locking.

pub mod controller;
pub mod inspector;
pub mod overlays;
pub mod scale;
pub mod util;

pub use controller::{DomainChange, DomainError, ViewController};
pub use inspector::{InspectionEntry, inspect};
pub use overlays::{
    GestureContext, GestureState, InteractiveOverlay, OverlayDispatcher, RegionSelector,
    TimeWindowSelector,
};
pub use scale::{TimeScale, ValueScale};
