/**
 * WebSocket Handler for the Stock Feed
 *
 * `GET /komik/updates` upgrades to a WebSocket. The authentication gate has
 * already run on the upgrade request, so every connection here belongs to a
 * verified identity.
 *
 * Each connection gets two halves:
 * - a writer task forwarding broadcast payloads from the connection's
 *   registry channel to the socket
 * - a read loop parsing inbound stock-change events and submitting them to
 *   the broadcaster queue
 *
 * A read error, a close frame or an unparsable text frame ends the
 * connection and removes it from the registry. Events the connection already
 * submitted are unaffected and still processed.
 */

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::middleware::auth::Authenticated;
use crate::server::state::AppState;
use crate::stock::broadcaster::StockBroadcaster;
use crate::stock::protocol::StockUpdate;

/// `GET /komik/updates` - upgrade into the live stock feed.
pub async fn stock_updates(
    Authenticated(user): Authenticated,
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let hub = Arc::clone(&state.broadcaster);
    let idle_timeout = state.config.ws_idle_timeout;

    tracing::debug!("Stock feed upgrade for user {}", user.user_id);

    ws.on_upgrade(move |socket| handle_socket(socket, hub, idle_timeout))
}

async fn handle_socket(
    socket: WebSocket,
    hub: Arc<StockBroadcaster>,
    idle_timeout: Option<Duration>,
) {
    let (mut ws_tx, ws_rx) = socket.split();

    // Registry channel: the broadcaster pushes here, the writer task
    // forwards to the socket. When a socket write fails the writer stops,
    // the channel closes, and the next broadcast prunes this connection.
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let conn_id = hub.register(tx);

    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_tx.send(msg).await.is_err() {
                break;
            }
        }
    });

    let reader_hub = Arc::clone(&hub);
    read_events(conn_id, ws_rx, idle_timeout, move |update| {
        reader_hub.submit(update)
    })
    .await;

    hub.unregister(conn_id);
    writer.abort();
}

/// Drives the inbound half of one connection until it ends: peer close, read
/// error, idle past the limit, or a text frame that does not parse as a
/// stock-change event. Malformed frames close the connection just like a
/// transport-level read error would.
async fn read_events<S>(
    conn_id: Uuid,
    mut ws_rx: S,
    idle_timeout: Option<Duration>,
    mut submit: impl FnMut(StockUpdate),
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let next = match idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, ws_rx.next()).await {
                Ok(next) => next,
                Err(_) => {
                    tracing::info!("Viewer {} idle for {:?}; closing", conn_id, limit);
                    break;
                }
            },
            None => ws_rx.next().await,
        };

        match next {
            Some(Ok(Message::Text(text))) => {
                match serde_json::from_str::<StockUpdate>(text.as_str()) {
                    Ok(update) => submit(update),
                    Err(e) => {
                        tracing::warn!("Viewer {} sent an unparsable event; closing: {}", conn_id, e);
                        break;
                    }
                }
            }
            Some(Ok(Message::Close(_))) | None => break,
            // Pings are answered by axum; binary frames are not part of
            // the protocol.
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                tracing::warn!("Viewer {} read error: {}", conn_id, e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::io;
    use std::sync::Mutex;

    async fn collect_events(frames: Vec<Result<Message, axum::Error>>) -> Vec<StockUpdate> {
        let received = Mutex::new(Vec::new());
        read_events(Uuid::new_v4(), stream::iter(frames), None, |update| {
            received.lock().unwrap().push(update)
        })
        .await;
        received.into_inner().unwrap()
    }

    #[tokio::test]
    async fn test_valid_events_are_submitted_in_order() {
        let received = collect_events(vec![
            Ok(Message::Text(
                r#"{"komik_id": 1, "action": "tambah", "user_id": 9}"#.into(),
            )),
            Ok(Message::Text(
                r#"{"komik_id": 2, "action": "kurang", "user_id": 9}"#.into(),
            )),
        ])
        .await;

        assert_eq!(received.len(), 2);
        assert_eq!(received[0].komik_id, 1);
        assert_eq!(received[1].komik_id, 2);
    }

    #[tokio::test]
    async fn test_unparsable_frame_closes_connection() {
        // Frames after the malformed one must never reach the queue.
        let received = collect_events(vec![
            Ok(Message::Text(
                r#"{"komik_id": 1, "action": "tambah", "user_id": 9}"#.into(),
            )),
            Ok(Message::Text("not an event".into())),
            Ok(Message::Text(
                r#"{"komik_id": 2, "action": "tambah", "user_id": 9}"#.into(),
            )),
        ])
        .await;

        assert_eq!(received.len(), 1);
        assert_eq!(received[0].komik_id, 1);
    }

    #[tokio::test]
    async fn test_unknown_action_closes_connection() {
        let received = collect_events(vec![Ok(Message::Text(
            r#"{"komik_id": 1, "action": "hapus", "user_id": 9}"#.into(),
        ))])
        .await;

        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_read_error_ends_the_loop() {
        let received = collect_events(vec![
            Err(axum::Error::new(io::Error::other("connection reset"))),
            Ok(Message::Text(
                r#"{"komik_id": 1, "action": "tambah", "user_id": 9}"#.into(),
            )),
        ])
        .await;

        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_non_text_frames_are_ignored() {
        let received = collect_events(vec![
            Ok(Message::Binary(vec![0x01, 0x02].into())),
            Ok(Message::Text(
                r#"{"komik_id": 5, "action": "tambah", "user_id": 9}"#.into(),
            )),
            Ok(Message::Close(None)),
        ])
        .await;

        assert_eq!(received.len(), 1);
        assert_eq!(received[0].komik_id, 5);
    }
}
