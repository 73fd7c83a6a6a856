// The top-level instance of a client session. Projects every snapshot the server sends, in
// order, and forwards the player's typed commands to the server.

use crate::api;
use crate::console;
use crate::error::{Error, Result};
use crate::events;
use crate::events::ServerEvent::{Disconnected, Snapshot};
use crate::projector::{self, KnownSeat, Projection};

use futures_util::StreamExt;
use log::{error, info, warn};
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec};

pub struct Session {
    event_rx: events::ServerEventReceiver,
    action_tx: events::ActionSender,

    // Our own seat, as last reported by the server. Lobby history isn't sent with every snapshot,
    // so this is carried from one projection to the next.
    known_seat: Option<KnownSeat>,
}

impl Session {
    pub fn new(action_tx: events::ActionSender, event_rx: events::ServerEventReceiver) -> Self {
        Self {
            event_rx,
            action_tx,
            known_seat: None,
        }
    }

    // Runs until the server disconnects or the input is exhausted.
    pub async fn run_main_loop<R: AsyncRead + Unpin>(&mut self, input: R) {
        let mut lines = FramedRead::new(input, LinesCodec::new());
        println!("{}", console::HELP);

        loop {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(Snapshot(snapshot)) => {
                        for line in console::render(&self.handle_snapshot(&snapshot)) {
                            println!("{}", line);
                        }
                    }

                    Some(Disconnected) | None => {
                        info!("Server connection closed - exiting.");
                        return;
                    }
                },

                line = lines.next() => {
                    let line = match line {
                        Some(Ok(line)) => line,
                        Some(Err(e)) => {
                            error!("Couldn't read input: {}", e);
                            return;
                        }
                        None => {
                            info!("Input closed - exiting.");
                            return;
                        }
                    };

                    if line.trim().is_empty() {
                        continue;
                    }

                    // Bad input is the player's to fix; nothing is sent.
                    if let Err(e) = self.handle_command(&line) {
                        warn!("Rejected command {:?}: {}", line, e);
                        println!("rejected: {}", e);
                    }
                }
            }
        }
    }

    pub fn handle_snapshot(&mut self, snapshot: &api::Snapshot) -> Projection {
        let (projection, seat) = projector::project(snapshot, self.known_seat);
        self.known_seat = seat;
        projection
    }

    // Parses and sends a command. Returns the action that was sent.
    pub fn handle_command(&self, line: &str) -> Result<api::Action> {
        let action = console::parse_command(line)?;

        if self.action_tx.send(action.clone()).is_err() {
            return Err(Error::Disconnected);
        }
        info!("Sent {:?}.", action);

        Ok(action)
    }

    pub fn known_seat(&self) -> Option<KnownSeat> {
        self.known_seat
    }
}
