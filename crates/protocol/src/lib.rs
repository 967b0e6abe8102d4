pub mod lane;
pub mod marks;
pub mod selection;
pub mod types;

pub use lane::{FieldValue, LaneBounds, LaneDescriptor, LaneKind, Row};
pub use marks::OverlayMark;
pub use selection::SelectionEvent;
pub use types::{Modifiers, OverlayGeometry, Point, Rect, TimeDomain};
