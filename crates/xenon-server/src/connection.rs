//! The per-connection request/response pipeline.
//!
//! Each accepted socket gets one [`Connection`]: a read loop that decodes
//! frames, admits them through the flow controller, and hands them to
//! handler tasks; and a write loop that writes responses back in admission
//! order regardless of handler completion order. The two loops are coupled
//! by an ordered queue of pending entries, and the write loop only ever
//! blocks on the queue head — which is exactly what re-establishes the
//! original order.
//!
//! Errors here are connection-scoped. A framing or decode failure closes
//! this socket and abandons its pending entries; other connections are
//! unaffected.

use std::fmt;
use std::sync::Arc;

use bytes::BytesMut;
use prost::Message;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter, ReadHalf, WriteHalf};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, trace};

use xenon_proto::{Request, Response};

use crate::application::Application;
use crate::codec::{encode_frame, FrameCodec};
use crate::config::ServerConfig;
use crate::dispatch::{run_handler, MutationChain};
use crate::error::{Result, ServerError};
use crate::flow::{FlowController, FlowPermit};

/// Lifecycle of one connection, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    /// Reading bytes, no complete frame pending.
    AwaitingFrame,
    /// A request was admitted and handed to its handler task.
    Dispatching,
    /// No longer reading; flushing already-admitted work.
    Draining,
    /// All pending work resolved or abandoned.
    Closed,
}

impl fmt::Display for ConnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnState::AwaitingFrame => "awaiting_frame",
            ConnState::Dispatching => "dispatching",
            ConnState::Draining => "draining",
            ConnState::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// One in-flight request, owned by its connection's ordered queue.
///
/// The flow permit is released when the entry is dropped, which the write
/// loop does only after the response bytes are out.
struct PendingEntry {
    seq: u64,
    kind: &'static str,
    is_flush: bool,
    reply: oneshot::Receiver<Result<Response>>,
    _permit: FlowPermit,
}

/// The ordered pipeline over one byte stream.
///
/// Generic over the stream so the same pipeline serves TCP sockets, Unix
/// sockets, and in-memory streams in tests.
pub struct Connection<A> {
    id: u64,
    app: Arc<A>,
    config: ServerConfig,
}

impl<A: Application> Connection<A> {
    /// Create a pipeline for one accepted stream.
    pub fn new(id: u64, app: Arc<A>, config: ServerConfig) -> Self {
        Self { id, app, config }
    }

    /// Drive the pipeline until the peer closes, a shutdown is signaled, or
    /// a connection-fatal error occurs.
    ///
    /// On shutdown the pipeline drains: already-admitted requests finish and
    /// their responses are flushed, while no further bytes are read.
    pub async fn run<S>(self, stream: S, shutdown: watch::Receiver<bool>) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        // Queue capacity matches the flow bound, so enqueueing an admitted
        // entry never blocks the read loop.
        let (queue_tx, queue_rx) = mpsc::channel(self.config.max_in_flight.max(1));

        let mut write_task = tokio::spawn(write_loop(self.id, writer, queue_rx));

        let read_result = tokio::select! {
            res = self.read_loop(reader, queue_tx, shutdown) => res,
            res = &mut write_task => {
                // The write side never finishes while the read side still
                // holds the queue sender, so ending here is a failure.
                let err = flatten_write_result(res);
                error!(conn = self.id, error = %err, "connection closed on write path");
                return Err(err);
            }
        };

        match read_result {
            Ok(()) => {
                debug!(conn = self.id, state = %ConnState::Draining, "read side done, draining responses");
                match write_task.await {
                    Ok(Ok(())) => {
                        debug!(conn = self.id, state = %ConnState::Closed, "connection closed");
                        Ok(())
                    }
                    Ok(Err(err)) => {
                        error!(conn = self.id, error = %err, "error while draining connection");
                        Err(err)
                    }
                    Err(join_err) => Err(ServerError::FatalApplication(format!(
                        "write task failed: {join_err}"
                    ))),
                }
            }
            Err(err) => {
                // Abandon all pending entries; handlers observe the closed
                // reply channel.
                write_task.abort();
                error!(conn = self.id, state = %ConnState::Closed, error = %err, "connection failed");
                Err(err)
            }
        }
    }

    /// Pull bytes, decode frames, admit and dispatch requests.
    ///
    /// Returning `Ok(())` hands off to the drain path: the queue sender is
    /// dropped and the write loop finishes the remaining entries.
    async fn read_loop<R>(
        &self,
        mut reader: ReadHalf<R>,
        queue: mpsc::Sender<PendingEntry>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()>
    where
        R: AsyncRead,
    {
        let mut codec = FrameCodec::new(self.config.max_frame_size);
        let flow = FlowController::new(self.config.max_in_flight);
        let mut chain = MutationChain::new();
        let mut seq: u64 = 0;

        trace!(conn = self.id, state = %ConnState::AwaitingFrame, "read loop started");

        loop {
            while let Some(payload) = codec.decode_frame()? {
                let request = Request::decode(payload)?;
                let Some(value) = request.value else {
                    // An unknown kind tag means the stream's logical
                    // boundaries can no longer be trusted.
                    return Err(ServerError::Decode(prost::DecodeError::new(
                        "request carries no recognized kind",
                    )));
                };

                let permit = tokio::select! {
                    permit = flow.admit() => match permit {
                        Some(permit) => permit,
                        None => return Ok(()),
                    },
                    _ = shutdown.changed() => {
                        flow.close();
                        return Ok(());
                    }
                };

                seq += 1;
                let kind = value.kind();
                let is_flush = value.is_flush();
                let turn = value.is_mutating().then(|| chain.next_turn());
                let (reply_tx, reply_rx) = oneshot::channel();

                let entry = PendingEntry {
                    seq,
                    kind,
                    is_flush,
                    reply: reply_rx,
                    _permit: permit,
                };
                if queue.send(entry).await.is_err() {
                    // Writer is gone; the connection is already failing.
                    return Ok(());
                }

                trace!(conn = self.id, seq, kind, state = %ConnState::Dispatching, "request admitted");
                tokio::spawn(run_handler(
                    Arc::clone(&self.app),
                    value,
                    reply_tx,
                    turn,
                    self.id,
                    seq,
                ));
            }

            codec.buffer_mut().reserve(self.config.read_buffer_size);
            tokio::select! {
                read = reader.read_buf(codec.buffer_mut()) => {
                    if read? == 0 {
                        debug!(conn = self.id, "peer closed connection");
                        return Ok(());
                    }
                }
                _ = shutdown.changed() => {
                    debug!(conn = self.id, "shutdown signaled, stopping reads");
                    flow.close();
                    return Ok(());
                }
            }
        }
    }
}

/// Write responses in admission order.
///
/// Blocks only on the queue head's pending entry; later entries may complete
/// in any order without being observed early. All socket writes for the
/// connection are serialized here, so no partial writes interleave.
async fn write_loop<W>(
    conn: u64,
    writer: WriteHalf<W>,
    mut queue: mpsc::Receiver<PendingEntry>,
) -> Result<()>
where
    W: AsyncWrite,
{
    let mut writer = BufWriter::new(writer);
    let mut frame = BytesMut::new();

    while let Some(entry) = queue.recv().await {
        let response = match entry.reply.await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(err),
            Err(_) => {
                // The handler task dropped its reply without resolving it
                // (panic or abort): the one-response-per-request guarantee
                // cannot be kept, so the connection must close.
                return Err(ServerError::FatalApplication(format!(
                    "handler for {} request #{} dropped without a response",
                    entry.kind, entry.seq
                )));
            }
        };

        encode_frame(&response, &mut frame);
        writer.write_all(&frame).await?;
        frame.clear();
        trace!(conn, seq = entry.seq, kind = response.kind(), "response written");

        // Flush on an explicit synchronization point, and opportunistically
        // whenever no further response is queued.
        if entry.is_flush || queue.is_empty() {
            writer.flush().await?;
        }
    }

    writer.flush().await?;
    writer.shutdown().await?;
    debug!(conn, state = %ConnState::Closed, "write loop finished");
    Ok(())
}

/// Collapse a write-task join result into a single error for the caller.
fn flatten_write_result(res: std::result::Result<Result<()>, tokio::task::JoinError>) -> ServerError {
    match res {
        Ok(Ok(())) => ServerError::Transport(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "write loop ended while the connection was active",
        )),
        Ok(Err(err)) => err,
        Err(join_err) => ServerError::FatalApplication(format!("write task failed: {join_err}")),
    }
}
