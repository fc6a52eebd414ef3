//! ABCI protocol message definitions for the xenon server.
//!
//! This crate provides the request/response message types of the CometBFT
//! ABCI 2.0 protocol as hand-maintained prost structs. The field tags match
//! the `cometbft.abci.v1` protobuf schema, so frames produced and consumed
//! here interoperate with a stock consensus engine without requiring protoc
//! at build time.

pub mod abci;

// Re-export commonly used types at the crate root for convenience
pub use abci::{
    request, response, ApplySnapshotChunkRequest, ApplySnapshotChunkResponse,
    ApplySnapshotChunkResult, CheckTxRequest, CheckTxResponse, CheckTxType, CommitRequest,
    CommitResponse, EchoRequest, EchoResponse, Event, EventAttribute, ExceptionResponse,
    ExecTxResult, ExtendVoteRequest, ExtendVoteResponse, FinalizeBlockRequest,
    FinalizeBlockResponse, FlushRequest, FlushResponse, InfoRequest, InfoResponse,
    InitChainRequest, InitChainResponse, ListSnapshotsRequest, ListSnapshotsResponse,
    LoadSnapshotChunkRequest, LoadSnapshotChunkResponse, OfferSnapshotRequest,
    OfferSnapshotResponse, OfferSnapshotResult, PrepareProposalRequest, PrepareProposalResponse,
    ProcessProposalRequest, ProcessProposalResponse, ProcessProposalStatus, QueryRequest,
    QueryResponse, Request, Response, Snapshot, ValidatorUpdate, VerifyVoteExtensionRequest,
    VerifyVoteExtensionResponse, VerifyVoteExtensionStatus,
};

/// Google protobuf well-known types
pub mod google {
    pub mod protobuf {
        pub use prost_types::*;
    }
}
