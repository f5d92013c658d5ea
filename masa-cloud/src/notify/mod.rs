//! NotifyHub — per-tenant panel event fan-out
//!
//! Delivers live events (new orders, status changes, ticket replies) to
//! every open panel WebSocket of a tenant. All data is strictly isolated
//! by tenant. Delivery is best-effort: a lagging subscriber loses events
//! (broadcast semantics), and publishing never blocks a request handler.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcast channel capacity, enough to absorb connect-time bursts
const BROADCAST_CAPACITY: usize = 256;

/// Event pushed to panel subscribers
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PanelEvent {
    OrderPlaced {
        order_id: String,
        table_name: String,
        total: String,
    },
    OrderStatusChanged {
        order_id: String,
        status: String,
    },
    TicketReplied {
        ticket_id: String,
    },
}

/// Per-tenant event hub
#[derive(Clone, Default)]
pub struct NotifyHub {
    /// tenant_id → broadcast sender
    tenants: Arc<DashMap<String, broadcast::Sender<PanelEvent>>>,
}

impl NotifyHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a panel socket to a tenant's events.
    pub fn subscribe(&self, tenant_id: &str) -> broadcast::Receiver<PanelEvent> {
        self.tenants
            .entry(tenant_id.to_string())
            .or_insert_with(|| broadcast::channel(BROADCAST_CAPACITY).0)
            .subscribe()
    }

    /// Publish an event to a tenant's subscribers.
    ///
    /// Non-blocking; an error from `send` only means nobody is listening.
    pub fn publish(&self, tenant_id: &str, event: PanelEvent) {
        if let Some(tx) = self.tenants.get(tenant_id) {
            let _ = tx.send(event);
        }
    }

    /// Drop the tenant entry once its last subscriber is gone.
    ///
    /// Called by the WebSocket handler on disconnect to keep the map from
    /// accumulating dead channels.
    pub fn release(&self, tenant_id: &str) {
        self.tenants
            .remove_if(tenant_id, |_, tx| tx.receiver_count() == 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let hub = NotifyHub::new();
        let mut rx = hub.subscribe("t-1");

        hub.publish(
            "t-1",
            PanelEvent::OrderStatusChanged {
                order_id: "o-1".to_string(),
                status: "COMPLETED".to_string(),
            },
        );

        match rx.recv().await.unwrap() {
            PanelEvent::OrderStatusChanged { order_id, status } => {
                assert_eq!(order_id, "o-1");
                assert_eq!(status, "COMPLETED");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let hub = NotifyHub::new();
        let mut rx_a = hub.subscribe("t-a");
        let _rx_b = hub.subscribe("t-b");

        hub.publish(
            "t-b",
            PanelEvent::TicketReplied {
                ticket_id: "tk-1".to_string(),
            },
        );

        // t-a must see nothing
        assert!(matches!(
            rx_a.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let hub = NotifyHub::new();
        // No subscribe() for this tenant at all
        hub.publish(
            "t-ghost",
            PanelEvent::TicketReplied {
                ticket_id: "tk-1".to_string(),
            },
        );
        assert!(hub.tenants.get("t-ghost").is_none());
    }

    #[tokio::test]
    async fn test_release_cleans_up_after_last_subscriber() {
        let hub = NotifyHub::new();
        let rx = hub.subscribe("t-1");
        hub.release("t-1");
        // Still one receiver alive, entry stays
        assert!(hub.tenants.get("t-1").is_some());

        drop(rx);
        hub.release("t-1");
        assert!(hub.tenants.get("t-1").is_none());
    }

    #[tokio::test]
    async fn test_event_wire_format() {
        let event = PanelEvent::OrderPlaced {
            order_id: "o-1".to_string(),
            table_name: "Masa 4".to_string(),
            total: "120.50".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ORDER_PLACED");
        assert_eq!(json["table_name"], "Masa 4");
    }
}
