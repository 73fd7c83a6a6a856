// A client for the Five Hundreds card-game server. Translates between the server's JSON and a
// compact card/bid notation, and boils each server snapshot down to what a player needs to see.

pub mod api;
pub mod console;
pub mod error;
pub mod events;
pub mod notation;
pub mod projector;
pub mod session;
pub mod types;
pub mod web_bridge;

pub use error::{Error, Result};
