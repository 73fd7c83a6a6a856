// Provides functions that transmit API types to and from a WebSocket connection to the server.
// Allows the session to communicate with the server via abstract channels.

use crate::api;
use crate::error::Result;
use crate::events;

use futures_util::SinkExt;
use futures_util::StreamExt;
use log::{debug, error, info};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite as tokio_ws2;
use tokio_ws2::tungstenite as ws2;
use unique_id::random::RandomGenerator;
use unique_id::Generator;

type Socket = tokio_ws2::WebSocketStream<tokio_ws2::MaybeTlsStream<TcpStream>>;

// Connects to the server at the given URL. Returns a handle used to send actions, and a receiver
// of everything the server sends back.
pub async fn connect_bridge(
    url: &str,
) -> Result<(events::ActionSender, events::ServerEventReceiver)> {
    debug_assert!(!url.is_empty());

    let (websocket, _) = tokio_ws2::connect_async(url).await?;

    // Guaranteed to be unique amongst all threads.
    let connection_id = RandomGenerator::default().next_id();
    info!(
        "[connection {}] established WebSocket connection with {}.",
        connection_id, url
    );

    Ok(init_server_socket(websocket, connection_id))
}

// Spawns two non-blocking tasks:
//   1) A task that turns JSON payloads from the server into snapshots for the session, and
//   2) A task that turns actions from the session into JSON payloads for the server.
fn init_server_socket(
    websocket: Socket,
    connection_id: events::ConnectionId,
) -> (events::ActionSender, events::ServerEventReceiver) {
    let (mut write, mut read) = websocket.split();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let read_id = connection_id.clone();
    tokio::spawn(async move {
        let connection_id = read_id;

        loop {
            let Some(result) = read.next().await else {
                info!("[connection {}] closed by the server.", connection_id);
                if event_tx.send(events::ServerEvent::Disconnected).is_err() {
                    debug!("[connection {}] session already gone.", connection_id);
                }

                return;
            };

            let json = match result {
                Ok(ws2::Message::Text(json)) => json,
                // Control frames are answered by tungstenite itself.
                Ok(ws2::Message::Close(_) | ws2::Message::Ping(_) | ws2::Message::Pong(_)) => {
                    continue
                }
                Ok(_) => {
                    error!("[connection {}] sent a non-text message.", connection_id);
                    continue;
                }
                Err(e) => {
                    error!("[connection {}] failed: {}", connection_id, e);
                    if event_tx.send(events::ServerEvent::Disconnected).is_err() {
                        debug!("[connection {}] session already gone.", connection_id);
                    }
                    return;
                }
            };

            let snapshot = match api::Snapshot::from_json(&json) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    error!("[connection {}] sent a malformed snapshot: {}", connection_id, e);
                    continue;
                }
            };

            if event_tx.send(events::ServerEvent::Snapshot(snapshot)).is_err() {
                debug!("[connection {}] session already gone.", connection_id);
                return;
            }
        }
    });

    // Spawn a task that transmits actions sent from the session to the web socket.
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<api::Action>();
    tokio::spawn(async move {
        loop {
            let Some(action) = action_rx.recv().await else {
                debug!("[connection {}] session stopped sending actions.", connection_id);
                if write.close().await.is_err() {
                    debug!("[connection {}] was already closed.", connection_id);
                }
                return;
            };

            let json = match serde_json::to_string(&action) {
                Ok(json) => json,
                Err(e) => {
                    error!("[connection {}] couldn't encode {:?}: {}", connection_id, action, e);
                    continue;
                }
            };

            debug!("[connection {}] sending {}", connection_id, json);
            if write.send(ws2::Message::Text(json)).await.is_err() {
                error!(
                    "[connection {}] failed to send message to WebSocket.",
                    connection_id
                );
                return;
            }
        }
    });

    (action_tx, event_rx)
}
