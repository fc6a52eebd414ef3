//! Minimal in-memory key/value ABCI application.
//!
//! Transactions are `key=value` byte strings. `check_tx` rejects anything
//! else, `finalize_block` stages the writes, `commit` makes them visible to
//! `query`. Run it and point a CometBFT node at the listen address:
//!
//! ```sh
//! cargo run --example kvstore
//! ```

use std::collections::BTreeMap;
use std::sync::Mutex;

use xenon_proto::{
    CheckTxRequest, CheckTxResponse, CommitRequest, CommitResponse, ExecTxResult,
    FinalizeBlockRequest, FinalizeBlockResponse, InfoRequest, InfoResponse, QueryRequest,
    QueryResponse,
};
use xenon_server::{AppResult, Application, Server, ServerConfig};

#[derive(Default)]
struct KvState {
    committed: BTreeMap<Vec<u8>, Vec<u8>>,
    staged: BTreeMap<Vec<u8>, Vec<u8>>,
    height: i64,
    app_hash: Vec<u8>,
}

#[derive(Default)]
struct KvStore {
    state: Mutex<KvState>,
}

fn parse_tx(tx: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
    let sep = tx.iter().position(|&b| b == b'=')?;
    if sep == 0 {
        return None;
    }
    Some((tx[..sep].to_vec(), tx[sep + 1..].to_vec()))
}

/// Order-sensitive digest over the committed entries. Not cryptographic;
/// just enough for the handshake to notice divergence.
fn state_hash(store: &BTreeMap<Vec<u8>, Vec<u8>>, height: i64) -> Vec<u8> {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    let mut mix = |byte: u8| {
        h ^= u64::from(byte);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    };
    for b in height.to_be_bytes() {
        mix(b);
    }
    for (k, v) in store {
        k.iter().copied().for_each(&mut mix);
        mix(b'=');
        v.iter().copied().for_each(&mut mix);
    }
    h.to_be_bytes().to_vec()
}

#[async_trait::async_trait]
impl Application for KvStore {
    async fn info(&self, _request: InfoRequest) -> AppResult<InfoResponse> {
        let state = self.state.lock().unwrap();
        Ok(InfoResponse {
            data: "kvstore".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            app_version: 1,
            last_block_height: state.height,
            last_block_app_hash: state.app_hash.clone(),
        })
    }

    async fn check_tx(&self, request: CheckTxRequest) -> AppResult<CheckTxResponse> {
        match parse_tx(&request.tx) {
            Some(_) => Ok(CheckTxResponse {
                gas_wanted: 1,
                ..Default::default()
            }),
            None => Ok(CheckTxResponse {
                code: 1,
                log: "transaction must be key=value".to_string(),
                ..Default::default()
            }),
        }
    }

    async fn finalize_block(
        &self,
        request: FinalizeBlockRequest,
    ) -> AppResult<FinalizeBlockResponse> {
        let mut state = self.state.lock().unwrap();

        let tx_results = request
            .txs
            .iter()
            .map(|tx| match parse_tx(tx) {
                Some((key, value)) => {
                    state.staged.insert(key, value);
                    ExecTxResult {
                        gas_used: 1,
                        ..Default::default()
                    }
                }
                None => ExecTxResult {
                    code: 1,
                    log: "transaction must be key=value".to_string(),
                    ..Default::default()
                },
            })
            .collect();

        state.height = request.height;
        let mut preview = state.committed.clone();
        preview.extend(state.staged.clone());
        let app_hash = state_hash(&preview, request.height);

        Ok(FinalizeBlockResponse {
            tx_results,
            app_hash,
            ..Default::default()
        })
    }

    async fn commit(&self, _request: CommitRequest) -> AppResult<CommitResponse> {
        let mut state = self.state.lock().unwrap();
        let staged = std::mem::take(&mut state.staged);
        state.committed.extend(staged);
        let height = state.height;
        state.app_hash = state_hash(&state.committed, height);
        Ok(CommitResponse { retain_height: 0 })
    }

    async fn query(&self, request: QueryRequest) -> AppResult<QueryResponse> {
        let state = self.state.lock().unwrap();
        match state.committed.get(&request.data) {
            Some(value) => Ok(QueryResponse {
                key: request.data,
                value: value.clone(),
                height: state.height,
                ..Default::default()
            }),
            None => Ok(QueryResponse {
                code: 1,
                log: "key not found".to_string(),
                key: request.data,
                height: state.height,
                ..Default::default()
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    xenon_log::init_tracing()?;

    let config = ServerConfig::default();
    let server = Server::bind(config, KvStore::default()).await?;
    let handle = server.shutdown_handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.shutdown();
        }
    });

    server.serve().await?;
    Ok(())
}
