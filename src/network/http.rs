use super::{CallRequest, Endpoint, LedgerRpc, RpcFailure};
use crate::VerifierError;
use alloy::primitives::Bytes;
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use alloy::transports::http::Http;
use alloy::transports::{RpcError, TransportError};
use reqwest::Client;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// JSON-RPC error code geth and most clients use for `execution reverted`.
const REVERT_ERROR_CODE: i64 = 3;

pub type HttpProvider = RootProvider<Http<Client>>;

/// JSON-RPC over HTTP client.
///
/// Every request is driven to completion on a private current-thread runtime,
/// so callers see plain blocking calls.
pub struct HttpLedger {
    provider: HttpProvider,
    runtime: Runtime,
}

impl HttpLedger {
    pub fn new(endpoint: &Endpoint) -> Result<Self, VerifierError> {
        let url: reqwest::Url = endpoint.url.parse().map_err(|e| {
            VerifierError::Connectivity(format!("invalid RPC URL {:?}: {}", endpoint.url, e))
        })?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| VerifierError::Connectivity(format!("failed to start runtime: {}", e)))?;
        let provider = ProviderBuilder::new().on_http(url);
        Ok(Self { provider, runtime })
    }
}

impl LedgerRpc for HttpLedger {
    fn chain_id(&self) -> Result<u64, RpcFailure> {
        self.runtime
            .block_on(async { self.provider.get_chain_id().await })
            .map_err(classify_error)
    }

    fn block_number(&self) -> Result<u64, RpcFailure> {
        self.runtime
            .block_on(async { self.provider.get_block_number().await })
            .map_err(classify_error)
    }

    fn call(&self, request: &CallRequest) -> Result<Bytes, RpcFailure> {
        let mut tx = TransactionRequest::default()
            .to(request.to)
            .input(TransactionInput::new(request.input.clone()));
        if let Some(from) = request.from {
            tx = tx.from(from);
        }
        debug!(to = %request.to, from = ?request.from, bytes = request.input.len(), "eth_call");
        self.runtime
            .block_on(async { self.provider.call(&tx).await })
            .map_err(classify_error)
    }
}

/// Split node answers into contract rejections and everything else.
fn classify_error(err: TransportError) -> RpcFailure {
    match err {
        RpcError::ErrorResp(payload) => {
            let message = payload.message.to_string();
            if payload.code == REVERT_ERROR_CODE || message.to_ascii_lowercase().contains("revert")
            {
                let data = payload
                    .data
                    .as_ref()
                    .and_then(|raw| serde_json::from_str::<Bytes>(raw.get()).ok());
                RpcFailure::Reverted { message, data }
            } else {
                RpcFailure::Transport(format!("node error {}: {}", payload.code, message))
            }
        }
        other => RpcFailure::Transport(other.to_string()),
    }
}
