//! Order models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Orders enter as `Pending` from the QR flow. Kitchen staff move them
/// forward; `Completed` and `Cancelled` close them out. Revenue is
/// recognized on the transition into `Completed` and reversed when an
/// order leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Preparing,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "preparing" => Some(Self::Preparing),
            "ready" => Some(Self::Ready),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Still on the kitchen's live board?
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Preparing | Self::Ready)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub tenant_id: String,
    pub branch_id: String,
    pub table_id: String,
    pub status: String,
    /// Denormalized sum of line totals, set at placement
    pub total: Decimal,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// Typed status, `None` if the stored value is unknown
    pub fn status(&self) -> Option<OrderStatus> {
        OrderStatus::from_db(&self.status)
    }
}

/// Order line item entity
///
/// Name and unit price are snapshots taken at placement, so later menu
/// edits do not rewrite order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// Single line of a QR order submission
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i32,
}

/// QR order submission payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPlace {
    pub items: Vec<OrderItemInput>,
    pub note: Option<String>,
}

/// Panel status change payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Order with its line items
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(OrderStatus::from_db("paid"), None);
        assert_eq!(OrderStatus::from_db("COMPLETED"), None);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"PREPARING\"");
        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_is_open() {
        assert!(OrderStatus::Pending.is_open());
        assert!(OrderStatus::Preparing.is_open());
        assert!(OrderStatus::Ready.is_open());
        assert!(!OrderStatus::Completed.is_open());
        assert!(!OrderStatus::Cancelled.is_open());
    }
}
