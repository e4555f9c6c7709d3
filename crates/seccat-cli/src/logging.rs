// crates/seccat-cli/src/logging.rs

use std::io::{self, IsTerminal};

use anyhow::anyhow;
use tracing::Level;

/// Install the stderr diagnostics subscriber. WARN and above by default;
/// DEBUG with `--debug`. Per-input error lines do not go through here.
pub fn init(debug: bool) -> anyhow::Result<()> {
    let level = if debug { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(debug)
        .without_time()
        .try_init()
        .map_err(|e| anyhow!("install diagnostics subscriber: {e}"))
}
