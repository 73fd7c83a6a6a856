// Errors raised by the notation codecs, the wire API and the client shell.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Debug, Error)]
pub enum Error {
    // A notation string doesn't match the card or bid grammar.
    #[error("invalid token {0:?}")]
    InvalidToken(String),

    // A structured card whose face is outside [4, 14].
    #[error("invalid card face {0}")]
    InvalidCard(usize),

    // A structured bid whose trick count is outside [6, 10].
    #[error("invalid bid trick count {0}")]
    InvalidBid(usize),

    // The server sent a session state this client doesn't know about.
    #[error("unrecognized session state {0:?}")]
    UnrecognizedStateVariant(String),

    #[error("connection to the server is closed")]
    Disconnected,

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WebSocket failure: {0}")]
    WebSocket(#[from] tungstenite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
