// Types used to pass messages between the session and the "web bridge" that ferries them to and
// from the server. Stored in their own module so the session never touches the socket itself.

use crate::api;

use tokio::sync::mpsc;

// Random ID used to tag a connection in log lines.
pub type ConnectionId = String;

// The events that could originate from the server.
#[derive(Debug)]
pub enum ServerEvent {
    Snapshot(api::Snapshot),
    Disconnected,
}

// An async iterator over events from the server, in the order they arrived.
pub type ServerEventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

// An async transmitter used to send actions to the server.
pub type ActionSender = mpsc::UnboundedSender<api::Action>;
