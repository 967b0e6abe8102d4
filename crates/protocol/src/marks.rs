use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// A transient visual produced by an overlay strategy mid-gesture.
///
/// The core emits a `Vec<OverlayMark>` after each pointer event; the host
/// redraws the overlay layer from scratch with them. Marks carry only
/// geometry and identity — styling is the renderer's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OverlayMark {
    /// Thin vertical marker at the anchor pixel of an in-progress time
    /// window drag.
    WindowAnchor { x: f64, height: f64 },

    /// The translucent box spanning anchor..current x of a time window
    /// drag.
    WindowBox { rect: Rect },

    /// Highlight border around one heatmap cell matched by a region drag.
    CellHighlight { rect: Rect, lane_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_roundtrip() {
        let marks = vec![
            OverlayMark::WindowAnchor {
                x: 12.0,
                height: 300.0,
            },
            OverlayMark::WindowBox {
                rect: Rect::new(12.0, 0.0, 40.0, 300.0),
            },
            OverlayMark::CellHighlight {
                rect: Rect::new(100.0, 40.0, 8.0, 60.0),
                lane_id: "errors".into(),
            },
        ];
        let json = serde_json::to_string(&marks).expect("serialize");
        let back: Vec<OverlayMark> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, marks);
    }
}
