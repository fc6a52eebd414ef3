//! ABCI Server Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ABCI server configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for ABCI connections (e.g. "tcp://0.0.0.0:26658" or
    /// "unix:///var/run/abci.sock")
    pub listen_address: String,

    /// Maximum number of requests in flight per connection. The read side
    /// stops pulling frames once this many requests sit between "decoded"
    /// and "response written".
    pub max_in_flight: usize,

    /// Maximum accepted frame payload length in bytes; a larger declared
    /// length is a framing error and closes the connection.
    pub max_frame_size: usize,

    /// Chunk size reserved for each socket read.
    pub read_buffer_size: usize,

    /// How long a graceful shutdown waits for connections to drain before
    /// aborting them, in milliseconds. `None` waits indefinitely.
    pub drain_deadline_ms: Option<u64>,

    /// Whether a fatal application error on one connection shuts down the
    /// whole server instead of only that connection.
    pub shutdown_on_fatal: bool,
}

impl ServerConfig {
    /// The drain deadline as a [`Duration`], if one is configured.
    pub fn drain_deadline(&self) -> Option<Duration> {
        self.drain_deadline_ms.map(Duration::from_millis)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "tcp://0.0.0.0:26658".to_string(),
            max_in_flight: 256,
            max_frame_size: 16 * 1024 * 1024, // 16MB
            read_buffer_size: 64 * 1024,
            drain_deadline_ms: Some(10_000),
            shutdown_on_fatal: false,
        }
    }
}
