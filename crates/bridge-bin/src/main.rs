//! Alexa HA bridge - forwards Alexa Smart Home directives to Home Assistant.
//!
//! The hosting runtime's event delivery stays outside this binary: it reads
//! one directive event document, dispatches it, and answers with the
//! backend's response document on stdout. On failure the answer is a
//! synthesized Alexa `ErrorResponse` document and the exit code is non-zero.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;
use tracing::error;

use bridge_config::{init_logging, Config};
use bridge_dispatch::{message_id, DirectiveDispatcher, DispatchError};
use bridge_transport::Transport;

/// Alexa HA bridge command-line interface.
#[derive(Parser)]
#[command(name = "alexa-ha-bridge")]
#[command(about = "Forwards Alexa Smart Home directives to Home Assistant")]
#[command(version)]
struct Cli {
    /// Read the directive event from a file instead of stdin
    #[arg(long)]
    event: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Configuration errors are fatal: nothing is served without a backend.
    let config = Config::from_env()?;
    init_logging(config.debug)?;

    let transport = Transport::from_config(&config);
    let client = transport.client()?;
    let dispatcher = DirectiveDispatcher::new(&config, client);

    let raw = match &cli.event {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    // Past this point the invocation is always answered in-protocol: a
    // backend document on success, a synthesized ErrorResponse otherwise.
    let outcome = match parse_event(&raw) {
        Ok(event) => {
            let message_id = message_id(&event).map(str::to_owned);
            dispatcher
                .dispatch(&event)
                .await
                .map_err(|err| (err, message_id))
        }
        Err(err) => Err((err, None)),
    };

    match outcome {
        Ok(document) => {
            println!("{document}");
            Ok(())
        }
        Err((err, message_id)) => {
            error!(error = %err, error_type = err.error_type(), "Dispatch failed");
            let document = err.to_error_document(message_id.as_deref());
            println!("{document}");
            std::process::exit(1);
        }
    }
}

/// Parse the inbound event document.
///
/// Unparseable input maps into the dispatch taxonomy so the invocation is
/// still answered with a synthesized ErrorResponse document rather than a
/// bare process error.
fn parse_event(raw: &str) -> Result<Value, DispatchError> {
    serde_json::from_str(raw).map_err(|e| {
        error!(error = %e, "Event document is not valid JSON");
        DispatchError::MalformedRequest("event document is not valid JSON")
    })
}
