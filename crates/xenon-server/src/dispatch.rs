//! Request dispatch into the application handler.
//!
//! Maps each decoded request kind onto the matching [`Application`] method,
//! converts handler failures into exception responses or connection-fatal
//! events, and serializes state-mutating kinds in admission order.

use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error, trace};

use xenon_proto::{request, response, Response};

use crate::application::{AppError, Application};
use crate::error::{Result, ServerError};

/// Invoke the handler method matching `request` and build the mirrored
/// response value. The match is exhaustive: adding a protocol kind without a
/// handler mapping is a compile error.
pub(crate) async fn dispatch<A: Application>(
    app: &A,
    request: request::Value,
) -> std::result::Result<response::Value, AppError> {
    use request::Value as Req;
    use response::Value as Resp;

    let response = match request {
        Req::Echo(r) => Resp::Echo(app.echo(r).await?),
        Req::Flush(r) => Resp::Flush(app.flush(r).await?),
        Req::Info(r) => Resp::Info(app.info(r).await?),
        Req::InitChain(r) => Resp::InitChain(app.init_chain(r).await?),
        Req::Query(r) => Resp::Query(app.query(r).await?),
        Req::CheckTx(r) => Resp::CheckTx(app.check_tx(r).await?),
        Req::Commit(r) => Resp::Commit(app.commit(r).await?),
        Req::ListSnapshots(r) => Resp::ListSnapshots(app.list_snapshots(r).await?),
        Req::OfferSnapshot(r) => Resp::OfferSnapshot(app.offer_snapshot(r).await?),
        Req::LoadSnapshotChunk(r) => Resp::LoadSnapshotChunk(app.load_snapshot_chunk(r).await?),
        Req::ApplySnapshotChunk(r) => Resp::ApplySnapshotChunk(app.apply_snapshot_chunk(r).await?),
        Req::PrepareProposal(r) => Resp::PrepareProposal(app.prepare_proposal(r).await?),
        Req::ProcessProposal(r) => Resp::ProcessProposal(app.process_proposal(r).await?),
        Req::ExtendVote(r) => Resp::ExtendVote(app.extend_vote(r).await?),
        Req::VerifyVoteExtension(r) => Resp::VerifyVoteExtension(app.verify_vote_extension(r).await?),
        Req::FinalizeBlock(r) => Resp::FinalizeBlock(app.finalize_block(r).await?),
    };

    Ok(response)
}

/// Orders state-mutating handler invocations on one connection.
///
/// The read loop (which observes admission order) takes one turn per
/// mutating request; a turn opens only after the previous mutating handler
/// has returned, so invocation order cannot depend on task wake-up order.
pub(crate) struct MutationChain {
    tail: Option<oneshot::Receiver<()>>,
}

impl MutationChain {
    pub(crate) fn new() -> Self {
        Self { tail: None }
    }

    /// Issue the next turn in the chain.
    pub(crate) fn next_turn(&mut self) -> MutationTurn {
        let (done, next) = oneshot::channel();
        let prev = self.tail.replace(next);
        MutationTurn { prev, done }
    }
}

/// One position in a [`MutationChain`].
pub(crate) struct MutationTurn {
    prev: Option<oneshot::Receiver<()>>,
    done: oneshot::Sender<()>,
}

impl MutationTurn {
    /// Wait for the previous mutating handler to return, then yield the
    /// token that opens the next turn. A dropped predecessor (connection
    /// tearing down) opens the turn immediately.
    pub(crate) async fn acquire(self) -> oneshot::Sender<()> {
        if let Some(prev) = self.prev {
            let _ = prev.await;
        }
        self.done
    }
}

/// Run one handler invocation to completion and resolve its pending entry.
///
/// Spawned once per admitted request. For mutating kinds `turn` enforces
/// admission-order invocation. The oneshot send fails only when the
/// connection already abandoned the entry, which is not an error here.
pub(crate) async fn run_handler<A: Application>(
    app: Arc<A>,
    request: request::Value,
    reply: oneshot::Sender<Result<Response>>,
    turn: Option<MutationTurn>,
    conn: u64,
    seq: u64,
) {
    let kind = request.kind();

    let done = match turn {
        Some(turn) => Some(turn.acquire().await),
        None => None,
    };

    let result = dispatch(app.as_ref(), request).await;

    if let Some(done) = done {
        let _ = done.send(());
    }

    let outcome = match result {
        Ok(value) => {
            trace!(conn, seq, kind, "handler completed");
            Ok(Response::from(value))
        }
        Err(AppError::Reject(reason)) => {
            debug!(conn, seq, kind, %reason, "handler rejected request");
            Ok(Response::exception(reason))
        }
        Err(AppError::Fatal(reason)) => {
            error!(conn, seq, kind, %reason, "handler reported fatal error");
            Err(ServerError::FatalApplication(reason))
        }
    };

    if reply.send(outcome).is_err() {
        trace!(conn, seq, kind, "pending entry abandoned before completion");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppResult;
    use std::time::Duration;
    use xenon_proto::{EchoRequest, EchoResponse, QueryRequest};

    struct DefaultApp;
    impl Application for DefaultApp {}

    #[tokio::test]
    async fn test_dispatch_routes_echo() {
        let value = dispatch(
            &DefaultApp,
            request::Value::Echo(EchoRequest {
                message: "ping".to_string(),
            }),
        )
        .await
        .unwrap();

        match value {
            response::Value::Echo(e) => assert_eq!(e.message, "ping"),
            other => panic!("unexpected kind: {}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_rejection() {
        struct RejectingApp;
        #[async_trait::async_trait]
        impl Application for RejectingApp {
            async fn query(&self, _request: QueryRequest) -> AppResult<xenon_proto::QueryResponse> {
                Err(AppError::Reject("unknown path".to_string()))
            }
        }

        let err = dispatch(
            &RejectingApp,
            request::Value::Query(QueryRequest::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Reject(_)));
    }

    #[tokio::test]
    async fn test_turns_open_in_creation_order() {
        let mut chain = MutationChain::new();
        let first = chain.next_turn();
        let second = chain.next_turn();

        let waiter = tokio::spawn(async move { second.acquire().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished(), "second turn opened before first");

        let done = first.acquire().await;
        done.send(()).unwrap();

        let _second_done = waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_turn_does_not_wedge_the_chain() {
        let mut chain = MutationChain::new();
        let first = chain.next_turn();
        let second = chain.next_turn();

        // First holder goes away without completing.
        drop(first);

        let _done = second.acquire().await;
    }

    #[tokio::test]
    async fn test_run_handler_converts_reject_to_exception() {
        struct RejectingApp;
        #[async_trait::async_trait]
        impl Application for RejectingApp {
            async fn echo(&self, _request: EchoRequest) -> AppResult<EchoResponse> {
                Err(AppError::Reject("nope".to_string()))
            }
        }

        let (tx, rx) = oneshot::channel();
        run_handler(
            Arc::new(RejectingApp),
            request::Value::Echo(EchoRequest::default()),
            tx,
            None,
            1,
            1,
        )
        .await;

        let response = rx.await.unwrap().unwrap();
        assert_eq!(response.kind(), "exception");
    }

    #[tokio::test]
    async fn test_run_handler_surfaces_fatal() {
        struct FatalApp;
        #[async_trait::async_trait]
        impl Application for FatalApp {
            async fn echo(&self, _request: EchoRequest) -> AppResult<EchoResponse> {
                Err(AppError::Fatal("corrupt".to_string()))
            }
        }

        let (tx, rx) = oneshot::channel();
        run_handler(
            Arc::new(FatalApp),
            request::Value::Echo(EchoRequest::default()),
            tx,
            None,
            1,
            1,
        )
        .await;

        let err = rx.await.unwrap().unwrap_err();
        assert!(matches!(err, ServerError::FatalApplication(_)));
    }
}
