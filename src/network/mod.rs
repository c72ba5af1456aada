//! Ledger node access.
//!
//! The rest of the crate talks to the node through the [`LedgerRpc`] trait so
//! that the pipeline can run against a live endpoint ([`HttpLedger`]) or a
//! scripted one ([`MockLedger`]). [`Connection`] wraps a client that has
//! passed the liveness probe; nothing downstream ever sees an unprobed client.

pub mod http;
pub mod mock;

pub use http::HttpLedger;
pub use mock::{MockLedger, MockReply};

use crate::{logging, VerifierError};
use alloy::primitives::{Address, Bytes};
use std::fmt;

/// Remote node location. Consumed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
}

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// A read-only `eth_call` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    /// Caller override; `None` lets the node pick the zero address.
    pub from: Option<Address>,
    pub input: Bytes,
}

/// Failure of a single request against the node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcFailure {
    /// The node executed the call and the contract rejected it.
    #[error("execution reverted: {message}")]
    Reverted {
        message: String,
        data: Option<Bytes>,
    },
    #[error("{0}")]
    Transport(String),
}

/// Blocking request/response access to a ledger node.
pub trait LedgerRpc {
    /// Chain id reported by the node. Used as the liveness probe.
    fn chain_id(&self) -> Result<u64, RpcFailure>;

    /// Current block height.
    fn block_number(&self) -> Result<u64, RpcFailure>;

    /// Execute a call against the latest state without committing anything.
    fn call(&self, request: &CallRequest) -> Result<Bytes, RpcFailure>;
}

impl<L: LedgerRpc + ?Sized> LedgerRpc for &L {
    fn chain_id(&self) -> Result<u64, RpcFailure> {
        (**self).chain_id()
    }

    fn block_number(&self) -> Result<u64, RpcFailure> {
        (**self).block_number()
    }

    fn call(&self, request: &CallRequest) -> Result<Bytes, RpcFailure> {
        (**self).call(request)
    }
}

/// A ledger client that answered the liveness probe.
pub struct Connection<L> {
    endpoint: Endpoint,
    ledger: L,
    chain_id: u64,
}

impl Connection<HttpLedger> {
    /// Open an HTTP client for `endpoint` and probe it.
    pub fn connect(
        endpoint: Endpoint,
        expected_chain_id: Option<u64>,
    ) -> Result<Self, VerifierError> {
        let ledger = HttpLedger::new(&endpoint)?;
        Self::establish(endpoint, ledger, expected_chain_id)
    }
}

impl<L: LedgerRpc> Connection<L> {
    /// Probe `ledger` and keep it only if the node answers.
    ///
    /// When `expected_chain_id` is set, a node on another network is rejected
    /// the same way as an unreachable one.
    pub fn establish(
        endpoint: Endpoint,
        ledger: L,
        expected_chain_id: Option<u64>,
    ) -> Result<Self, VerifierError> {
        logging::log_connecting(&endpoint.url);

        let chain_id = ledger.chain_id().map_err(|e| {
            VerifierError::Connectivity(format!("{} did not answer: {}", endpoint, e))
        })?;

        if let Some(expected) = expected_chain_id {
            if chain_id != expected {
                return Err(VerifierError::Connectivity(format!(
                    "{} is on chain {}, expected chain {}",
                    endpoint, chain_id, expected
                )));
            }
        }

        logging::log_connected(&endpoint.url, chain_id);
        Ok(Self {
            endpoint,
            ledger,
            chain_id,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Current block height. A failure here is diagnostic only.
    pub fn current_height(&self) -> Result<u64, VerifierError> {
        self.ledger
            .block_number()
            .map_err(|e| VerifierError::Rpc(format!("eth_blockNumber: {}", e)))
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}
