//! Scripted in-memory ledger.
//!
//! Replies are keyed by 4-byte selector. Calls to an unscripted selector revert
//! with no data, which is what a deployed contract without that function and
//! without a fallback does.

use super::{CallRequest, LedgerRpc, RpcFailure};
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{keccak256, Bytes};
use std::cell::RefCell;
use std::collections::HashMap;

/// Selector of `Error(string)`.
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Scripted answer for one selector.
#[derive(Debug, Clone)]
pub enum MockReply {
    Return(Bytes),
    Revert {
        message: String,
        data: Option<Bytes>,
    },
    Transport(String),
}

pub struct MockLedger {
    chain_id: Result<u64, RpcFailure>,
    block_number: Result<u64, RpcFailure>,
    replies: HashMap<[u8; 4], MockReply>,
    calls: RefCell<Vec<CallRequest>>,
}

impl MockLedger {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id: Ok(chain_id),
            block_number: Ok(0),
            replies: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make the liveness probe fail.
    pub fn unreachable(mut self, message: &str) -> Self {
        self.chain_id = Err(RpcFailure::Transport(message.to_string()));
        self
    }

    pub fn with_block_number(mut self, height: u64) -> Self {
        self.block_number = Ok(height);
        self
    }

    pub fn failing_block_number(mut self, message: &str) -> Self {
        self.block_number = Err(RpcFailure::Transport(message.to_string()));
        self
    }

    /// Answer calls to `signature` (e.g. `"admin()"`) with ABI-encoded `values`.
    pub fn returns(self, signature: &str, values: Vec<DynSolValue>) -> Self {
        let encoded = DynSolValue::Tuple(values).abi_encode_params();
        self.reply(signature, MockReply::Return(encoded.into()))
    }

    /// Revert calls to `signature` with an `Error(string)` payload.
    pub fn reverts(self, signature: &str, reason: &str) -> Self {
        let mut data = ERROR_STRING_SELECTOR.to_vec();
        data.extend(DynSolValue::Tuple(vec![DynSolValue::String(reason.to_string())]).abi_encode_params());
        self.reply(
            signature,
            MockReply::Revert {
                message: "execution reverted".to_string(),
                data: Some(data.into()),
            },
        )
    }

    pub fn reply(mut self, signature: &str, reply: MockReply) -> Self {
        self.replies.insert(selector_of(signature), reply);
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<CallRequest> {
        self.calls.borrow().clone()
    }
}

impl LedgerRpc for MockLedger {
    fn chain_id(&self) -> Result<u64, RpcFailure> {
        self.chain_id.clone()
    }

    fn block_number(&self) -> Result<u64, RpcFailure> {
        self.block_number.clone()
    }

    fn call(&self, request: &CallRequest) -> Result<Bytes, RpcFailure> {
        self.calls.borrow_mut().push(request.clone());

        let reply = request
            .input
            .get(..4)
            .and_then(|sel| <[u8; 4]>::try_from(sel).ok())
            .and_then(|sel| self.replies.get(&sel));

        match reply {
            Some(MockReply::Return(bytes)) => Ok(bytes.clone()),
            Some(MockReply::Revert { message, data }) => Err(RpcFailure::Reverted {
                message: message.clone(),
                data: data.clone(),
            }),
            Some(MockReply::Transport(message)) => Err(RpcFailure::Transport(message.clone())),
            None => Err(RpcFailure::Reverted {
                message: "execution reverted".to_string(),
                data: None,
            }),
        }
    }
}

fn selector_of(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}
