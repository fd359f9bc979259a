//! WebSocket feed of generation snapshots.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use shotlist_models::SnapshotView;
use tracing::{debug, warn};

use crate::state::AppState;

/// Stream every generation snapshot as JSON, starting with the current one.
pub async fn ws_generation(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_generation_socket(socket, state))
}

async fn handle_generation_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut updates = state.orchestrator.subscribe();

    let initial = updates.borrow_and_update().view();
    if send_view(&mut sender, &initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().view();
                if send_view(&mut sender, &view).await.is_err() {
                    warn!("WebSocket send failed, client disconnected");
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!("WebSocket receive error: {}", e);
                        break;
                    }
                    // Clients have nothing to say; pings are answered by axum
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    debug!("Generation feed closed");
}

async fn send_view(
    sender: &mut SplitSink<WebSocket, Message>,
    view: &SnapshotView,
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(view) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize snapshot: {}", e);
            return Ok(());
        }
    };
    sender.send(Message::Text(json)).await
}
