use serde::{Deserialize, Serialize};

/// Payload of a completed heatmap region selection, consumed by the
/// external results-table component.
///
/// Never emitted for an empty selection — a drag matching zero cells is a
/// no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEvent {
    /// Distinct lane ids touched by the selection, in first-encountered
    /// order.
    pub rows: Vec<String>,
    /// Earliest matched bucket start, epoch seconds.
    pub earliest_time: f64,
    /// Latest matched bucket end (start + span), epoch seconds.
    pub latest_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_roundtrip() {
        let ev = SelectionEvent {
            rows: vec!["errors".into(), "warnings".into()],
            earliest_time: 1_400_000_000.0,
            latest_time: 1_400_000_600.0,
        };
        let json = serde_json::to_string(&ev).expect("serialize");
        let back: SelectionEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ev);
    }
}
