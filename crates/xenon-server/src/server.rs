//! Connection listener and server lifecycle.
//!
//! Accepts ABCI connections on a TCP or Unix socket and gives each one an
//! independent [`Connection`] pipeline. Connections share nothing but the
//! application handler instance; the consensus engine decides which of its
//! logical channels (consensus, mempool, snapshot, info) each connection
//! carries, and the engine treats them all identically.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::net::UnixListener;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::application::Application;
use crate::config::ServerConfig;
use crate::connection::Connection;
use crate::error::{Result, ServerError};

/// A parsed listen address.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ListenAddr {
    Tcp(std::net::SocketAddr),
    #[cfg(unix)]
    Unix(PathBuf),
}

/// Parse `tcp://host:port` (or a bare `host:port`) and `unix://path`.
fn parse_listen_address(address: &str) -> Result<ListenAddr> {
    if let Some(path) = address.strip_prefix("unix://") {
        #[cfg(unix)]
        {
            return Ok(ListenAddr::Unix(PathBuf::from(path)));
        }
        #[cfg(not(unix))]
        {
            let _ = path;
            return Err(ServerError::Config(
                "unix sockets are not supported on this platform".to_string(),
            ));
        }
    }

    let bare = address.strip_prefix("tcp://").unwrap_or(address);
    bare.parse()
        .map(ListenAddr::Tcp)
        .map_err(|e| ServerError::Config(format!("invalid listen address {address:?}: {e}")))
}

enum BoundListener {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix(UnixListener),
}

/// A bound ABCI server, ready to accept connections.
pub struct Server<A> {
    listener: BoundListener,
    app: Arc<A>,
    config: ServerConfig,
    shutdown: Arc<watch::Sender<bool>>,
}

/// Cloneable trigger for a graceful server shutdown.
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Signal the server to stop accepting and drain all connections.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

impl<A: Application> Server<A> {
    /// Bind the configured listen address.
    pub async fn bind(config: ServerConfig, app: A) -> Result<Self> {
        let listener = match parse_listen_address(&config.listen_address)? {
            ListenAddr::Tcp(addr) => BoundListener::Tcp(TcpListener::bind(addr).await?),
            #[cfg(unix)]
            ListenAddr::Unix(path) => BoundListener::Unix(UnixListener::bind(path)?),
        };

        info!(address = %config.listen_address, "ABCI server listening");

        let (shutdown, _) = watch::channel(false);
        Ok(Self {
            listener,
            app: Arc::new(app),
            config,
            shutdown: Arc::new(shutdown),
        })
    }

    /// The bound TCP address; useful when binding port 0.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr> {
        match &self.listener {
            BoundListener::Tcp(listener) => Ok(listener.local_addr()?),
            #[cfg(unix)]
            BoundListener::Unix(_) => Err(ServerError::Config(
                "listener is not a TCP socket".to_string(),
            )),
        }
    }

    /// A trigger for graceful shutdown, usable from any task.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown: Arc::clone(&self.shutdown),
        }
    }

    /// Accept connections until shutdown is signaled, then drain.
    ///
    /// Draining lets every connection finish its already-admitted requests;
    /// if a drain deadline is configured and elapses, the stragglers are
    /// aborted and [`ServerError::DrainTimeout`] is returned.
    pub async fn serve(self) -> Result<()> {
        let mut shutdown_rx = self.shutdown.subscribe();
        let mut connections: JoinSet<()> = JoinSet::new();
        let mut next_id: u64 = 0;

        loop {
            tokio::select! {
                accepted = accept(&self.listener) => {
                    match accepted {
                        Ok((stream, peer)) => {
                            next_id += 1;
                            self.spawn_connection(&mut connections, next_id, stream, peer);
                        }
                        Err(e) => {
                            error!(error = %e, "failed to accept connection");
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    info!("received shutdown signal, stopping ABCI server");
                    break;
                }
            }
        }

        info!(pending = connections.len(), "draining connections");
        if let Some(deadline) = self.config.drain_deadline() {
            let drained =
                tokio::time::timeout(deadline, async { while connections.join_next().await.is_some() {} })
                    .await
                    .is_ok();
            if !drained {
                let remaining = connections.len();
                connections.shutdown().await;
                warn!(remaining, "drain deadline elapsed, aborted remaining connections");
                return Err(ServerError::DrainTimeout(remaining));
            }
        } else {
            while connections.join_next().await.is_some() {}
        }

        info!("ABCI server shutdown complete");
        Ok(())
    }

    fn spawn_connection<S>(
        &self,
        connections: &mut JoinSet<()>,
        id: u64,
        stream: S,
        peer: String,
    ) where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        info!(conn = id, %peer, "accepted ABCI connection");

        let connection = Connection::new(id, Arc::clone(&self.app), self.config.clone());
        let shutdown_rx = self.shutdown.subscribe();
        let handle = self.shutdown_handle();
        let shutdown_on_fatal = self.config.shutdown_on_fatal;

        connections.spawn(async move {
            match connection.run(stream, shutdown_rx).await {
                Ok(()) => info!(conn = id, "connection closed"),
                Err(err) => {
                    error!(conn = id, error = %err, "connection terminated");
                    if shutdown_on_fatal && matches!(err, ServerError::FatalApplication(_)) {
                        warn!(conn = id, "fatal application error, shutting down server");
                        handle.shutdown();
                    }
                }
            }
        });
    }
}

/// Accept one connection from either listener flavor.
async fn accept(listener: &BoundListener) -> std::io::Result<(ListenerStream, String)> {
    match listener {
        BoundListener::Tcp(l) => {
            let (stream, peer) = l.accept().await?;
            Ok((ListenerStream::Tcp(stream), peer.to_string()))
        }
        #[cfg(unix)]
        BoundListener::Unix(l) => {
            let (stream, _) = l.accept().await?;
            Ok((ListenerStream::Unix(stream), "unix".to_string()))
        }
    }
}

enum ListenerStream {
    Tcp(tokio::net::TcpStream),
    #[cfg(unix)]
    Unix(tokio::net::UnixStream),
}

impl AsyncRead for ListenerStream {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            ListenerStream::Tcp(s) => std::pin::Pin::new(s).poll_read(cx, buf),
            #[cfg(unix)]
            ListenerStream::Unix(s) => std::pin::Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for ListenerStream {
    fn poll_write(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> std::task::Poll<std::io::Result<usize>> {
        match self.get_mut() {
            ListenerStream::Tcp(s) => std::pin::Pin::new(s).poll_write(cx, buf),
            #[cfg(unix)]
            ListenerStream::Unix(s) => std::pin::Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            ListenerStream::Tcp(s) => std::pin::Pin::new(s).poll_flush(cx),
            #[cfg(unix)]
            ListenerStream::Unix(s) => std::pin::Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            ListenerStream::Tcp(s) => std::pin::Pin::new(s).poll_shutdown(cx),
            #[cfg(unix)]
            ListenerStream::Unix(s) => std::pin::Pin::new(s).poll_shutdown(cx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tcp_address() {
        let addr = parse_listen_address("tcp://127.0.0.1:26658").unwrap();
        assert_eq!(addr, ListenAddr::Tcp("127.0.0.1:26658".parse().unwrap()));

        // The scheme prefix is optional for TCP.
        let bare = parse_listen_address("0.0.0.0:26658").unwrap();
        assert_eq!(bare, ListenAddr::Tcp("0.0.0.0:26658".parse().unwrap()));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_unix_address() {
        let addr = parse_listen_address("unix:///var/run/abci.sock").unwrap();
        assert_eq!(addr, ListenAddr::Unix(PathBuf::from("/var/run/abci.sock")));
    }

    #[test]
    fn test_parse_invalid_address() {
        let err = parse_listen_address("tcp://not-an-address").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
