/**
 * Stock Feed Wire Protocol
 *
 * Inbound messages are JSON objects:
 *
 * ```json
 * { "komik_id": 1, "action": "tambah", "user_id": 2 }
 * ```
 *
 * `"tambah"` increments the stock counter, `"kurang"` decrements it. The
 * outbound message is the full JSON-serialized `Komik` after the mutation.
 * Field names and action values are fixed; clients of the original service
 * speak this exact format.
 */

use serde::{Deserialize, Serialize};

/// A stock mutation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockAction {
    /// `"tambah"`: stock += 1, unconditionally.
    #[serde(rename = "tambah")]
    Increment,
    /// `"kurang"`: stock -= 1 only while stock > 0; at zero it is a silent
    /// no-op (saturation-at-zero), never an error.
    #[serde(rename = "kurang")]
    Decrement,
}

impl StockAction {
    /// Apply this action to a stock counter, honoring the zero floor.
    pub fn apply(self, stok: i64) -> i64 {
        match self {
            Self::Increment => stok + 1,
            Self::Decrement if stok > 0 => stok - 1,
            Self::Decrement => stok,
        }
    }
}

/// A client-submitted stock-change event. Transient: it exists only on the
/// broadcaster's processing queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    /// Target komik
    pub komik_id: i64,
    /// Mutation direction
    pub action: StockAction,
    /// Submitter's user id, as reported by the client
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inbound_wire_format() {
        let update: StockUpdate =
            serde_json::from_str(r#"{"komik_id": 3, "action": "tambah", "user_id": 9}"#).unwrap();
        assert_eq!(
            update,
            StockUpdate {
                komik_id: 3,
                action: StockAction::Increment,
                user_id: 9,
            }
        );

        let update: StockUpdate =
            serde_json::from_str(r#"{"komik_id": 3, "action": "kurang", "user_id": 9}"#).unwrap();
        assert_eq!(update.action, StockAction::Decrement);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result = serde_json::from_str::<StockUpdate>(
            r#"{"komik_id": 3, "action": "reset", "user_id": 9}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_action_serializes_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&StockAction::Increment).unwrap(),
            r#""tambah""#
        );
        assert_eq!(
            serde_json::to_string(&StockAction::Decrement).unwrap(),
            r#""kurang""#
        );
    }

    #[test]
    fn test_increment_is_unbounded() {
        assert_eq!(StockAction::Increment.apply(0), 1);
        assert_eq!(StockAction::Increment.apply(41), 42);
    }

    #[test]
    fn test_decrement_saturates_at_zero() {
        assert_eq!(StockAction::Decrement.apply(2), 1);
        assert_eq!(StockAction::Decrement.apply(1), 0);
        assert_eq!(StockAction::Decrement.apply(0), 0);
    }
}
