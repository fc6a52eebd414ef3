//! The application handler contract.
//!
//! An [`Application`] is the sole extension point of the engine: one shared
//! instance serves every connection, and the engine dispatches each decoded
//! request to the matching method. Implementations must therefore be safe
//! for concurrent invocation — the engine guarantees delivery order for
//! state-mutating kinds, not mutual exclusion.

use async_trait::async_trait;
use thiserror::Error;

use xenon_proto::*;

/// Handler failure reported by an [`Application`] method.
///
/// The split is deliberate and explicit: the engine never guesses whether a
/// failure is survivable.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request is rejected but the application is healthy. Converted to
    /// an exception response; the connection stays open.
    #[error("rejected: {0}")]
    Reject(String),

    /// The application detected unrecoverable state corruption. The
    /// connection closes, and the whole server shuts down if
    /// `ServerConfig::shutdown_on_fatal` is set.
    #[error("fatal: {0}")]
    Fatal(String),
}

/// Result type for application handler methods
pub type AppResult<T> = std::result::Result<T, AppError>;

/// The ABCI 2.0 capability set.
///
/// Every method has a protocol-neutral default so integrators implement only
/// the kinds their application uses. Methods for state-mutating kinds
/// (`init_chain`, `finalize_block`, `commit`) are invoked in the order their
/// requests were admitted; all other kinds may run concurrently up to the
/// per-connection flow bound.
#[async_trait]
pub trait Application: Send + Sync + 'static {
    /// Liveness probe; mirrors the message back.
    async fn echo(&self, request: EchoRequest) -> AppResult<EchoResponse> {
        Ok(EchoResponse {
            message: request.message,
        })
    }

    /// Explicit synchronization boundary. The engine already guarantees the
    /// flush acknowledgment is written only after every earlier response.
    async fn flush(&self, _request: FlushRequest) -> AppResult<FlushResponse> {
        Ok(FlushResponse {})
    }

    /// Handshake: report application version and last committed height.
    async fn info(&self, _request: InfoRequest) -> AppResult<InfoResponse> {
        Ok(InfoResponse::default())
    }

    /// Called once at genesis.
    async fn init_chain(&self, request: InitChainRequest) -> AppResult<InitChainResponse> {
        Ok(InitChainResponse {
            consensus_params: request.consensus_params,
            validators: vec![],
            app_hash: vec![],
        })
    }

    /// Read-only query against application state.
    async fn query(&self, _request: QueryRequest) -> AppResult<QueryResponse> {
        Ok(QueryResponse::default())
    }

    /// Validate a transaction for mempool admission. Code 0 accepts.
    async fn check_tx(&self, _request: CheckTxRequest) -> AppResult<CheckTxResponse> {
        Ok(CheckTxResponse::default())
    }

    /// Reorder, filter, or supplement transactions for a block proposal.
    async fn prepare_proposal(
        &self,
        request: PrepareProposalRequest,
    ) -> AppResult<PrepareProposalResponse> {
        Ok(PrepareProposalResponse { txs: request.txs })
    }

    /// Validate a block proposed by another validator.
    async fn process_proposal(
        &self,
        _request: ProcessProposalRequest,
    ) -> AppResult<ProcessProposalResponse> {
        Ok(ProcessProposalResponse {
            status: ProcessProposalStatus::Accept.into(),
        })
    }

    /// Execute a decided block against application state.
    async fn finalize_block(
        &self,
        request: FinalizeBlockRequest,
    ) -> AppResult<FinalizeBlockResponse> {
        Ok(FinalizeBlockResponse {
            tx_results: request
                .txs
                .iter()
                .map(|_| ExecTxResult::default())
                .collect(),
            ..Default::default()
        })
    }

    /// Persist the state transitions of the last finalized block.
    async fn commit(&self, _request: CommitRequest) -> AppResult<CommitResponse> {
        Ok(CommitResponse::default())
    }

    /// List locally available state snapshots.
    async fn list_snapshots(
        &self,
        _request: ListSnapshotsRequest,
    ) -> AppResult<ListSnapshotsResponse> {
        Ok(ListSnapshotsResponse { snapshots: vec![] })
    }

    /// Decide whether to restore from a snapshot offered by a peer.
    async fn offer_snapshot(
        &self,
        _request: OfferSnapshotRequest,
    ) -> AppResult<OfferSnapshotResponse> {
        Ok(OfferSnapshotResponse {
            result: OfferSnapshotResult::Reject.into(),
        })
    }

    /// Serve one chunk of a local snapshot to a syncing peer.
    async fn load_snapshot_chunk(
        &self,
        _request: LoadSnapshotChunkRequest,
    ) -> AppResult<LoadSnapshotChunkResponse> {
        Ok(LoadSnapshotChunkResponse { chunk: vec![] })
    }

    /// Apply one chunk of a snapshot being restored.
    async fn apply_snapshot_chunk(
        &self,
        _request: ApplySnapshotChunkRequest,
    ) -> AppResult<ApplySnapshotChunkResponse> {
        Ok(ApplySnapshotChunkResponse {
            result: ApplySnapshotChunkResult::Abort.into(),
            refetch_chunks: vec![],
            reject_senders: vec![],
        })
    }

    /// Supply application data to attach to this node's precommit vote.
    async fn extend_vote(&self, _request: ExtendVoteRequest) -> AppResult<ExtendVoteResponse> {
        Ok(ExtendVoteResponse {
            vote_extension: vec![],
        })
    }

    /// Verify a vote extension attached by another validator.
    async fn verify_vote_extension(
        &self,
        _request: VerifyVoteExtensionRequest,
    ) -> AppResult<VerifyVoteExtensionResponse> {
        Ok(VerifyVoteExtensionResponse {
            status: VerifyVoteExtensionStatus::Accept.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DefaultApp;
    impl Application for DefaultApp {}

    #[tokio::test]
    async fn test_echo_mirrors_message() {
        let resp = DefaultApp
            .echo(EchoRequest {
                message: "hello".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.message, "hello");
    }

    #[tokio::test]
    async fn test_prepare_proposal_passthrough() {
        let txs = vec![vec![1u8, 2], vec![3u8]];
        let resp = DefaultApp
            .prepare_proposal(PrepareProposalRequest {
                txs: txs.clone(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(resp.txs, txs);
    }

    #[tokio::test]
    async fn test_finalize_block_reports_one_result_per_tx() {
        let resp = DefaultApp
            .finalize_block(FinalizeBlockRequest {
                txs: vec![vec![0u8], vec![1u8], vec![2u8]],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(resp.tx_results.len(), 3);
    }

    #[tokio::test]
    async fn test_snapshot_defaults_are_conservative() {
        let offer = DefaultApp
            .offer_snapshot(OfferSnapshotRequest::default())
            .await
            .unwrap();
        assert_eq!(offer.result, OfferSnapshotResult::Reject as i32);

        let apply = DefaultApp
            .apply_snapshot_chunk(ApplySnapshotChunkRequest::default())
            .await
            .unwrap();
        assert_eq!(apply.result, ApplySnapshotChunkResult::Abort as i32);
    }

    #[test]
    fn test_app_error_display() {
        assert_eq!(
            AppError::Reject("invalid tx".to_string()).to_string(),
            "rejected: invalid tx"
        );
        assert_eq!(
            AppError::Fatal("state corrupt".to_string()).to_string(),
            "fatal: state corrupt"
        );
    }
}
