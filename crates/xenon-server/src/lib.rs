//! ABCI 2.0 socket server engine.
//!
//! This crate implements the server side of the ABCI 2.0 wire protocol: the
//! varint-length-delimited framing, the per-connection ordered
//! request/response pipeline, flow control bounding in-flight work, and
//! dispatch into an application-supplied [`Application`] handler. It does
//! not implement consensus, persist state, or define the semantics of any
//! request — the application does.
//!
//! A consensus engine typically opens several connections (consensus,
//! mempool, snapshot, info); each gets an independent pipeline with strict
//! FIFO response ordering, and none can stall another.
//!
//! ```no_run
//! use xenon_server::{Application, Server, ServerConfig};
//!
//! struct MyApp;
//! impl Application for MyApp {}
//!
//! #[tokio::main]
//! async fn main() -> xenon_server::Result<()> {
//!     let config = ServerConfig {
//!         listen_address: "tcp://127.0.0.1:26658".to_string(),
//!         ..Default::default()
//!     };
//!     let server = Server::bind(config, MyApp).await?;
//!     server.serve().await
//! }
//! ```

pub mod application;
pub mod codec;
pub mod config;
pub mod connection;
pub mod error;
pub mod flow;
pub mod server;

mod dispatch;

pub use application::{AppError, AppResult, Application};
pub use config::ServerConfig;
pub use connection::{ConnState, Connection};
pub use error::{Result, ServerError};
pub use server::{Server, ShutdownHandle};
