//! Request and response messages of the ABCI 2.0 wire protocol.
//!
//! Field tags follow the `cometbft.abci.v1` schema. Fields the engine does
//! not interpret are carried verbatim; unknown fields inside a known message
//! are skipped on decode per protobuf convention.

/// Envelope for every request the consensus engine sends. Exactly one of the
/// kind-specific messages is set.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Request {
    #[prost(
        oneof = "request::Value",
        tags = "1, 2, 3, 5, 6, 8, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20"
    )]
    pub value: Option<request::Value>,
}

pub mod request {
    /// The request kind carried by a [`Request`](super::Request) envelope.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        Echo(super::EchoRequest),
        #[prost(message, tag = "2")]
        Flush(super::FlushRequest),
        #[prost(message, tag = "3")]
        Info(super::InfoRequest),
        #[prost(message, tag = "5")]
        InitChain(super::InitChainRequest),
        #[prost(message, tag = "6")]
        Query(super::QueryRequest),
        #[prost(message, tag = "8")]
        CheckTx(super::CheckTxRequest),
        #[prost(message, tag = "11")]
        Commit(super::CommitRequest),
        #[prost(message, tag = "12")]
        ListSnapshots(super::ListSnapshotsRequest),
        #[prost(message, tag = "13")]
        OfferSnapshot(super::OfferSnapshotRequest),
        #[prost(message, tag = "14")]
        LoadSnapshotChunk(super::LoadSnapshotChunkRequest),
        #[prost(message, tag = "15")]
        ApplySnapshotChunk(super::ApplySnapshotChunkRequest),
        #[prost(message, tag = "16")]
        PrepareProposal(super::PrepareProposalRequest),
        #[prost(message, tag = "17")]
        ProcessProposal(super::ProcessProposalRequest),
        #[prost(message, tag = "18")]
        ExtendVote(super::ExtendVoteRequest),
        #[prost(message, tag = "19")]
        VerifyVoteExtension(super::VerifyVoteExtensionRequest),
        #[prost(message, tag = "20")]
        FinalizeBlock(super::FinalizeBlockRequest),
    }
}

/// Envelope for every response written back to the consensus engine. The
/// exception variant may stand in for any kind.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(
        oneof = "response::Value",
        tags = "1, 2, 3, 4, 6, 7, 9, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21"
    )]
    pub value: Option<response::Value>,
}

pub mod response {
    /// The response kind carried by a [`Response`](super::Response) envelope.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        Exception(super::ExceptionResponse),
        #[prost(message, tag = "2")]
        Echo(super::EchoResponse),
        #[prost(message, tag = "3")]
        Flush(super::FlushResponse),
        #[prost(message, tag = "4")]
        Info(super::InfoResponse),
        #[prost(message, tag = "6")]
        InitChain(super::InitChainResponse),
        #[prost(message, tag = "7")]
        Query(super::QueryResponse),
        #[prost(message, tag = "9")]
        CheckTx(super::CheckTxResponse),
        #[prost(message, tag = "12")]
        Commit(super::CommitResponse),
        #[prost(message, tag = "13")]
        ListSnapshots(super::ListSnapshotsResponse),
        #[prost(message, tag = "14")]
        OfferSnapshot(super::OfferSnapshotResponse),
        #[prost(message, tag = "15")]
        LoadSnapshotChunk(super::LoadSnapshotChunkResponse),
        #[prost(message, tag = "16")]
        ApplySnapshotChunk(super::ApplySnapshotChunkResponse),
        #[prost(message, tag = "17")]
        PrepareProposal(super::PrepareProposalResponse),
        #[prost(message, tag = "18")]
        ProcessProposal(super::ProcessProposalResponse),
        #[prost(message, tag = "19")]
        ExtendVote(super::ExtendVoteResponse),
        #[prost(message, tag = "20")]
        VerifyVoteExtension(super::VerifyVoteExtensionResponse),
        #[prost(message, tag = "21")]
        FinalizeBlock(super::FinalizeBlockResponse),
    }
}

/// Echo a string back to the caller; used by the engine as a liveness probe.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EchoRequest {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EchoResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

/// Explicit synchronization boundary: the response is written only after
/// every earlier response on the connection has been written and flushed.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FlushRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FlushResponse {}

/// Handshake carrying the consensus engine's version information.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InfoRequest {
    #[prost(string, tag = "1")]
    pub version: String,
    #[prost(uint64, tag = "2")]
    pub block_version: u64,
    #[prost(uint64, tag = "3")]
    pub p2p_version: u64,
    #[prost(string, tag = "4")]
    pub abci_version: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InfoResponse {
    #[prost(string, tag = "1")]
    pub data: String,
    #[prost(string, tag = "2")]
    pub version: String,
    #[prost(uint64, tag = "3")]
    pub app_version: u64,
    #[prost(int64, tag = "4")]
    pub last_block_height: i64,
    #[prost(bytes = "vec", tag = "5")]
    pub last_block_app_hash: Vec<u8>,
}

/// Delivered once at genesis, before any block is finalized.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitChainRequest {
    #[prost(message, optional, tag = "1")]
    pub time: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "2")]
    pub chain_id: String,
    #[prost(message, optional, tag = "3")]
    pub consensus_params: Option<ConsensusParams>,
    #[prost(message, repeated, tag = "4")]
    pub validators: Vec<ValidatorUpdate>,
    #[prost(bytes = "vec", tag = "5")]
    pub app_state_bytes: Vec<u8>,
    #[prost(int64, tag = "6")]
    pub initial_height: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitChainResponse {
    #[prost(message, optional, tag = "1")]
    pub consensus_params: Option<ConsensusParams>,
    #[prost(message, repeated, tag = "2")]
    pub validators: Vec<ValidatorUpdate>,
    #[prost(bytes = "vec", tag = "3")]
    pub app_hash: Vec<u8>,
}

/// Read-only query against application state at a given height.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
    #[prost(string, tag = "2")]
    pub path: String,
    #[prost(int64, tag = "3")]
    pub height: i64,
    #[prost(bool, tag = "4")]
    pub prove: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryResponse {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(string, tag = "3")]
    pub log: String,
    #[prost(string, tag = "4")]
    pub info: String,
    #[prost(int64, tag = "5")]
    pub index: i64,
    #[prost(bytes = "vec", tag = "6")]
    pub key: Vec<u8>,
    #[prost(bytes = "vec", tag = "7")]
    pub value: Vec<u8>,
    #[prost(message, optional, tag = "8")]
    pub proof_ops: Option<ProofOps>,
    #[prost(int64, tag = "9")]
    pub height: i64,
    #[prost(string, tag = "10")]
    pub codespace: String,
}

/// Validate a transaction for mempool admission.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CheckTxRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub tx: Vec<u8>,
    #[prost(enumeration = "CheckTxType", tag = "3")]
    pub r#type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CheckTxResponse {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
    #[prost(string, tag = "3")]
    pub log: String,
    #[prost(string, tag = "4")]
    pub info: String,
    #[prost(int64, tag = "5")]
    pub gas_wanted: i64,
    #[prost(int64, tag = "6")]
    pub gas_used: i64,
    #[prost(message, repeated, tag = "7")]
    pub events: Vec<Event>,
    #[prost(string, tag = "8")]
    pub codespace: String,
}

/// Persist the state transitions of the last finalized block.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommitRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommitResponse {
    #[prost(int64, tag = "3")]
    pub retain_height: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSnapshotsRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSnapshotsResponse {
    #[prost(message, repeated, tag = "1")]
    pub snapshots: Vec<Snapshot>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OfferSnapshotRequest {
    #[prost(message, optional, tag = "1")]
    pub snapshot: Option<Snapshot>,
    #[prost(bytes = "vec", tag = "2")]
    pub app_hash: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OfferSnapshotResponse {
    #[prost(enumeration = "OfferSnapshotResult", tag = "1")]
    pub result: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoadSnapshotChunkRequest {
    #[prost(uint64, tag = "1")]
    pub height: u64,
    #[prost(uint32, tag = "2")]
    pub format: u32,
    #[prost(uint32, tag = "3")]
    pub chunk: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoadSnapshotChunkResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub chunk: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ApplySnapshotChunkRequest {
    #[prost(uint32, tag = "1")]
    pub index: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub chunk: Vec<u8>,
    #[prost(string, tag = "3")]
    pub sender: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ApplySnapshotChunkResponse {
    #[prost(enumeration = "ApplySnapshotChunkResult", tag = "1")]
    pub result: i32,
    #[prost(uint32, repeated, tag = "2")]
    pub refetch_chunks: Vec<u32>,
    #[prost(string, repeated, tag = "3")]
    pub reject_senders: Vec<String>,
}

/// Let the application reorder, add, or drop transactions before the engine
/// proposes a block.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PrepareProposalRequest {
    #[prost(int64, tag = "1")]
    pub max_tx_bytes: i64,
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub txs: Vec<Vec<u8>>,
    #[prost(message, optional, tag = "3")]
    pub local_last_commit: Option<ExtendedCommitInfo>,
    #[prost(message, repeated, tag = "4")]
    pub misbehavior: Vec<Misbehavior>,
    #[prost(int64, tag = "5")]
    pub height: i64,
    #[prost(message, optional, tag = "6")]
    pub time: Option<::prost_types::Timestamp>,
    #[prost(bytes = "vec", tag = "7")]
    pub next_validators_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub proposer_address: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PrepareProposalResponse {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub txs: Vec<Vec<u8>>,
}

/// Let the application validate a block proposed by another validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProcessProposalRequest {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub txs: Vec<Vec<u8>>,
    #[prost(message, optional, tag = "2")]
    pub proposed_last_commit: Option<CommitInfo>,
    #[prost(message, repeated, tag = "3")]
    pub misbehavior: Vec<Misbehavior>,
    #[prost(bytes = "vec", tag = "4")]
    pub hash: Vec<u8>,
    #[prost(int64, tag = "5")]
    pub height: i64,
    #[prost(message, optional, tag = "6")]
    pub time: Option<::prost_types::Timestamp>,
    #[prost(bytes = "vec", tag = "7")]
    pub next_validators_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub proposer_address: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProcessProposalResponse {
    #[prost(enumeration = "ProcessProposalStatus", tag = "1")]
    pub status: i32,
}

/// Ask the application for data to attach to its precommit vote.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtendVoteRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(int64, tag = "2")]
    pub height: i64,
    #[prost(message, optional, tag = "3")]
    pub time: Option<::prost_types::Timestamp>,
    #[prost(bytes = "vec", repeated, tag = "4")]
    pub txs: Vec<Vec<u8>>,
    #[prost(message, optional, tag = "5")]
    pub proposed_last_commit: Option<CommitInfo>,
    #[prost(message, repeated, tag = "6")]
    pub misbehavior: Vec<Misbehavior>,
    #[prost(bytes = "vec", tag = "7")]
    pub next_validators_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub proposer_address: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtendVoteResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub vote_extension: Vec<u8>,
}

/// Verify a vote extension attached by another validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VerifyVoteExtensionRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub validator_address: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub height: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub vote_extension: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VerifyVoteExtensionResponse {
    #[prost(enumeration = "VerifyVoteExtensionStatus", tag = "1")]
    pub status: i32,
}

/// Deliver a decided block to the application for execution.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FinalizeBlockRequest {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub txs: Vec<Vec<u8>>,
    #[prost(message, optional, tag = "2")]
    pub decided_last_commit: Option<CommitInfo>,
    #[prost(message, repeated, tag = "3")]
    pub misbehavior: Vec<Misbehavior>,
    #[prost(bytes = "vec", tag = "4")]
    pub hash: Vec<u8>,
    #[prost(int64, tag = "5")]
    pub height: i64,
    #[prost(message, optional, tag = "6")]
    pub time: Option<::prost_types::Timestamp>,
    #[prost(bytes = "vec", tag = "7")]
    pub next_validators_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub proposer_address: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FinalizeBlockResponse {
    #[prost(message, repeated, tag = "1")]
    pub events: Vec<Event>,
    #[prost(message, repeated, tag = "2")]
    pub tx_results: Vec<ExecTxResult>,
    #[prost(message, repeated, tag = "3")]
    pub validator_updates: Vec<ValidatorUpdate>,
    #[prost(message, optional, tag = "4")]
    pub consensus_param_updates: Option<ConsensusParams>,
    #[prost(bytes = "vec", tag = "5")]
    pub app_hash: Vec<u8>,
}

/// Universal error response, usable in place of any kind.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExceptionResponse {
    #[prost(string, tag = "1")]
    pub error: String,
}

// --- Support types ---

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(message, repeated, tag = "2")]
    pub attributes: Vec<EventAttribute>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventAttribute {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub value: String,
    #[prost(bool, tag = "3")]
    pub index: bool,
}

/// Result of executing a single transaction inside FinalizeBlock.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecTxResult {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
    #[prost(string, tag = "3")]
    pub log: String,
    #[prost(string, tag = "4")]
    pub info: String,
    #[prost(int64, tag = "5")]
    pub gas_wanted: i64,
    #[prost(int64, tag = "6")]
    pub gas_used: i64,
    #[prost(message, repeated, tag = "7")]
    pub events: Vec<Event>,
    #[prost(string, tag = "8")]
    pub codespace: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidatorUpdate {
    #[prost(int64, tag = "2")]
    pub power: i64,
    #[prost(bytes = "vec", tag = "3")]
    pub pub_key_bytes: Vec<u8>,
    #[prost(string, tag = "4")]
    pub pub_key_type: String,
}

/// Metadata describing one application state snapshot.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Snapshot {
    #[prost(uint64, tag = "1")]
    pub height: u64,
    #[prost(uint32, tag = "2")]
    pub format: u32,
    #[prost(uint32, tag = "3")]
    pub chunks: u32,
    #[prost(bytes = "vec", tag = "4")]
    pub hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub metadata: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommitInfo {
    #[prost(int32, tag = "1")]
    pub round: i32,
    #[prost(message, repeated, tag = "2")]
    pub votes: Vec<VoteInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtendedCommitInfo {
    #[prost(int32, tag = "1")]
    pub round: i32,
    #[prost(message, repeated, tag = "2")]
    pub votes: Vec<ExtendedVoteInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VoteInfo {
    #[prost(message, optional, tag = "1")]
    pub validator: Option<Validator>,
    #[prost(enumeration = "BlockIdFlag", tag = "3")]
    pub block_id_flag: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtendedVoteInfo {
    #[prost(message, optional, tag = "1")]
    pub validator: Option<Validator>,
    #[prost(bytes = "vec", tag = "3")]
    pub vote_extension: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub extension_signature: Vec<u8>,
    #[prost(enumeration = "BlockIdFlag", tag = "5")]
    pub block_id_flag: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Validator {
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub power: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Misbehavior {
    #[prost(enumeration = "MisbehaviorType", tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub validator: Option<Validator>,
    #[prost(int64, tag = "3")]
    pub height: i64,
    #[prost(message, optional, tag = "4")]
    pub time: Option<::prost_types::Timestamp>,
    #[prost(int64, tag = "5")]
    pub total_voting_power: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProofOps {
    #[prost(message, repeated, tag = "1")]
    pub ops: Vec<ProofOp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProofOp {
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub key: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

/// Consensus parameters the application may adjust. The engine passes these
/// through without interpretation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusParams {
    #[prost(message, optional, tag = "1")]
    pub block: Option<BlockParams>,
    #[prost(message, optional, tag = "2")]
    pub evidence: Option<EvidenceParams>,
    #[prost(message, optional, tag = "3")]
    pub validator: Option<ValidatorParams>,
    #[prost(message, optional, tag = "4")]
    pub version: Option<VersionParams>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockParams {
    #[prost(int64, tag = "1")]
    pub max_bytes: i64,
    #[prost(int64, tag = "2")]
    pub max_gas: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EvidenceParams {
    #[prost(int64, tag = "1")]
    pub max_age_num_blocks: i64,
    #[prost(message, optional, tag = "2")]
    pub max_age_duration: Option<::prost_types::Duration>,
    #[prost(int64, tag = "3")]
    pub max_bytes: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidatorParams {
    #[prost(string, repeated, tag = "1")]
    pub pub_key_types: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VersionParams {
    #[prost(uint64, tag = "1")]
    pub app: u64,
}

// --- Enumerations ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CheckTxType {
    Unknown = 0,
    /// First-time validation for mempool admission.
    Check = 1,
    /// Re-validation after a block changed state.
    Recheck = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum OfferSnapshotResult {
    Unknown = 0,
    Accept = 1,
    Abort = 2,
    Reject = 3,
    RejectFormat = 4,
    RejectSender = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ApplySnapshotChunkResult {
    Unknown = 0,
    Accept = 1,
    Abort = 2,
    Retry = 3,
    RetrySnapshot = 4,
    RejectSnapshot = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProcessProposalStatus {
    Unknown = 0,
    Accept = 1,
    Reject = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum VerifyVoteExtensionStatus {
    Unknown = 0,
    Accept = 1,
    Reject = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MisbehaviorType {
    Unknown = 0,
    DuplicateVote = 1,
    LightClientAttack = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum BlockIdFlag {
    Unknown = 0,
    Absent = 1,
    Commit = 2,
    Nil = 3,
}

// --- Helper API ---

impl request::Value {
    /// Short name of the request kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            request::Value::Echo(_) => "echo",
            request::Value::Flush(_) => "flush",
            request::Value::Info(_) => "info",
            request::Value::InitChain(_) => "init_chain",
            request::Value::Query(_) => "query",
            request::Value::CheckTx(_) => "check_tx",
            request::Value::Commit(_) => "commit",
            request::Value::ListSnapshots(_) => "list_snapshots",
            request::Value::OfferSnapshot(_) => "offer_snapshot",
            request::Value::LoadSnapshotChunk(_) => "load_snapshot_chunk",
            request::Value::ApplySnapshotChunk(_) => "apply_snapshot_chunk",
            request::Value::PrepareProposal(_) => "prepare_proposal",
            request::Value::ProcessProposal(_) => "process_proposal",
            request::Value::ExtendVote(_) => "extend_vote",
            request::Value::VerifyVoteExtension(_) => "verify_vote_extension",
            request::Value::FinalizeBlock(_) => "finalize_block",
        }
    }

    /// Whether this kind mutates application state and therefore must reach
    /// the handler in admission order.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            request::Value::InitChain(_)
                | request::Value::FinalizeBlock(_)
                | request::Value::Commit(_)
        )
    }

    /// Whether this is an explicit flush synchronization point.
    pub fn is_flush(&self) -> bool {
        matches!(self, request::Value::Flush(_))
    }
}

impl Request {
    /// Short name of the request kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        self.value.as_ref().map_or("unset", request::Value::kind)
    }

    /// Whether this kind mutates application state.
    pub fn is_mutating(&self) -> bool {
        self.value
            .as_ref()
            .is_some_and(request::Value::is_mutating)
    }

    /// Whether this is an explicit flush synchronization point.
    pub fn is_flush(&self) -> bool {
        self.value.as_ref().is_some_and(request::Value::is_flush)
    }
}

impl response::Value {
    /// Short name of the response kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            response::Value::Exception(_) => "exception",
            response::Value::Echo(_) => "echo",
            response::Value::Flush(_) => "flush",
            response::Value::Info(_) => "info",
            response::Value::InitChain(_) => "init_chain",
            response::Value::Query(_) => "query",
            response::Value::CheckTx(_) => "check_tx",
            response::Value::Commit(_) => "commit",
            response::Value::ListSnapshots(_) => "list_snapshots",
            response::Value::OfferSnapshot(_) => "offer_snapshot",
            response::Value::LoadSnapshotChunk(_) => "load_snapshot_chunk",
            response::Value::ApplySnapshotChunk(_) => "apply_snapshot_chunk",
            response::Value::PrepareProposal(_) => "prepare_proposal",
            response::Value::ProcessProposal(_) => "process_proposal",
            response::Value::ExtendVote(_) => "extend_vote",
            response::Value::VerifyVoteExtension(_) => "verify_vote_extension",
            response::Value::FinalizeBlock(_) => "finalize_block",
        }
    }
}

impl Response {
    /// Build an exception response carrying an error description.
    pub fn exception(error: impl Into<String>) -> Self {
        Response {
            value: Some(response::Value::Exception(ExceptionResponse {
                error: error.into(),
            })),
        }
    }

    /// Short name of the response kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        self.value.as_ref().map_or("unset", response::Value::kind)
    }

    /// Whether this is a flush acknowledgment.
    pub fn is_flush(&self) -> bool {
        matches!(&self.value, Some(response::Value::Flush(_)))
    }
}

impl From<request::Value> for Request {
    fn from(value: request::Value) -> Self {
        Request { value: Some(value) }
    }
}

impl From<response::Value> for Response {
    fn from(value: response::Value) -> Self {
        Response { value: Some(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_request_roundtrip() {
        let req: Request = request::Value::Echo(EchoRequest {
            message: "ping".to_string(),
        })
        .into();

        let bytes = req.encode_to_vec();
        let decoded = Request::decode(bytes.as_slice()).unwrap();
        assert_eq!(req, decoded);
        assert_eq!(decoded.kind(), "echo");
    }

    #[test]
    fn test_response_exception() {
        let resp = Response::exception("boom");
        assert_eq!(resp.kind(), "exception");

        let bytes = resp.encode_to_vec();
        let decoded = Response::decode(bytes.as_slice()).unwrap();
        match decoded.value {
            Some(response::Value::Exception(e)) => assert_eq!(e.error, "boom"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_mutating_kinds() {
        let commit: Request = request::Value::Commit(CommitRequest {}).into();
        assert!(commit.is_mutating());

        let finalize: Request =
            request::Value::FinalizeBlock(FinalizeBlockRequest::default()).into();
        assert!(finalize.is_mutating());

        let init: Request = request::Value::InitChain(InitChainRequest::default()).into();
        assert!(init.is_mutating());

        let query: Request = request::Value::Query(QueryRequest::default()).into();
        assert!(!query.is_mutating());
    }

    #[test]
    fn test_unset_request_kind() {
        let req = Request::default();
        assert_eq!(req.kind(), "unset");
        assert!(!req.is_mutating());
    }

    #[test]
    fn test_finalize_block_fields() {
        let req = FinalizeBlockRequest {
            txs: vec![vec![1, 2, 3], vec![4, 5]],
            height: 42,
            time: Some(prost_types::Timestamp {
                seconds: 1_700_000_000,
                nanos: 0,
            }),
            ..Default::default()
        };

        let wrapped: Request = request::Value::FinalizeBlock(req.clone()).into();
        let bytes = wrapped.encode_to_vec();
        let decoded = Request::decode(bytes.as_slice()).unwrap();

        match decoded.value {
            Some(request::Value::FinalizeBlock(got)) => {
                assert_eq!(got.txs, req.txs);
                assert_eq!(got.height, 42);
                assert_eq!(got.time.unwrap().seconds, 1_700_000_000);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_flush_helpers() {
        let req: Request = request::Value::Flush(FlushRequest {}).into();
        assert!(req.is_flush());

        let resp: Response = response::Value::Flush(FlushResponse {}).into();
        assert!(resp.is_flush());
        assert!(!Response::exception("x").is_flush());
    }
}
