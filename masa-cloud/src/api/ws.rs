//! Panel event stream over WebSocket
//!
//! The panel keeps one socket open per tab; the server pushes
//! [`PanelEvent`]s for the session's tenant. Traffic is one-way: inbound
//! frames other than ping/close are ignored.

use axum::Extension;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use shared::error::AppError;
use tokio::sync::broadcast::error::RecvError;

use crate::auth::Session;
use crate::state::AppState;

/// GET /api/panel/ws — upgrade to WebSocket
pub async fn panel_events(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let tenant_id = session.tenant_id()?.to_string();
    Ok(ws.on_upgrade(move |socket| handle_panel_socket(socket, state, tenant_id)))
}

async fn handle_panel_socket(socket: WebSocket, state: AppState, tenant_id: String) {
    let mut events = state.notify.subscribe(&tenant_id);
    let (mut ws_sink, mut ws_stream) = socket.split();

    tracing::debug!(tenant_id = %tenant_id, "Panel socket connected");

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if let Ok(json) = serde_json::to_string(&event)
                            && ws_sink.send(Message::Text(json.into())).await.is_err()
                        {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        // Slow client: skip ahead rather than disconnect
                        tracing::warn!(tenant_id = %tenant_id, missed, "Panel socket lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(tenant_id = %tenant_id, "Panel socket error: {e}");
                        break;
                    }
                    _ => {} // Text, Binary, Pong — ignore
                }
            }
        }
    }

    let _ = ws_sink.close().await;
    drop(events);
    state.notify.release(&tenant_id);

    tracing::debug!(tenant_id = %tenant_id, "Panel socket closed");
}
