// A console client for a Five Hundreds server. Prints each state the server sends and sends the
// commands typed on stdin.
// Try: five-hundreds-client ws://127.0.0.1:8080

use std::env;
use std::process::ExitCode;

use five_hundreds_client::session::Session;
use five_hundreds_client::web_bridge;

use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let url = env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://127.0.0.1:8080".to_string());

    let (action_tx, event_rx) = match web_bridge::connect_bridge(&url).await {
        Ok(channels) => channels,
        Err(e) => {
            error!("Couldn't connect to {}: {}", url, e);
            return ExitCode::FAILURE;
        }
    };

    Session::new(action_tx, event_rx)
        .run_main_loop(tokio::io::stdin())
        .await;

    ExitCode::SUCCESS
}
