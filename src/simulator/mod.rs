//! Dry-run simulation of a state-changing call.
//!
//! The call is executed with `eth_call` against the latest block: nothing is
//! signed, broadcast or committed. The contract is expected to answer with a
//! `(bool success, uint code, string message, bytes|string payload)` record,
//! either as one tuple or as four return values.

pub mod response;

pub use response::{Payload, SimulationResponse, SUCCESS_CODE};

use crate::abi::Mutability;
use crate::binding::{CallFailure, ContractBinding};
use crate::inspector::CheckResult;
use crate::logging;
use crate::network::LedgerRpc;
use alloy::primitives::{Address, Bytes};

/// Literal inputs of one simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub function: String,
    pub args: Vec<String>,
    pub sender: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("reverted: {reason}")]
    Revert { reason: String, data: Option<Bytes> },
    #[error("encoding error: {0}")]
    Encoding(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<CallFailure> for SimulationError {
    fn from(failure: CallFailure) -> Self {
        match failure {
            CallFailure::Reverted { reason, data } => SimulationError::Revert { reason, data },
            CallFailure::Transport(msg) => SimulationError::Transport(msg),
            other @ (CallFailure::UnknownFunction(_)
            | CallFailure::Encoding(_)
            | CallFailure::Decoding(_)) => SimulationError::Encoding(other.to_string()),
        }
    }
}

/// Final classification of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Call succeeded and the decoded code is the success sentinel.
    Passed,
    /// Call succeeded but the contract answered with another code.
    Rejected { reason: String },
    Failed(SimulationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub request: SimulationRequest,
    pub response: Option<SimulationResponse>,
    pub verdict: Verdict,
}

impl SimulationOutcome {
    /// Classify a simulation result. `code == 200` is authoritative; the
    /// `success` flag is reported alongside but never changes the verdict.
    pub fn classify(
        request: SimulationRequest,
        result: Result<SimulationResponse, SimulationError>,
    ) -> Self {
        match result {
            Ok(response) => {
                let verdict = if response.code == SUCCESS_CODE {
                    Verdict::Passed
                } else {
                    Verdict::Rejected {
                        reason: response.message.clone(),
                    }
                };
                Self {
                    request,
                    response: Some(response),
                    verdict,
                }
            }
            Err(e) => Self {
                request,
                response: None,
                verdict: Verdict::Failed(e),
            },
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }

    /// True when the `success` flag contradicts the code.
    pub fn flag_disagrees(&self) -> bool {
        self.response
            .as_ref()
            .map(|r| r.success != (r.code == SUCCESS_CODE))
            .unwrap_or(false)
    }

    pub fn to_check(&self) -> CheckResult {
        match &self.verdict {
            Verdict::Passed => CheckResult::success(
                self.request.function.clone(),
                self.response.as_ref().map(SimulationResponse::to_value),
            ),
            Verdict::Rejected { reason } => CheckResult {
                value: self.response.as_ref().map(SimulationResponse::to_value),
                ..CheckResult::failure(self.request.function.clone(), reason.clone())
            },
            Verdict::Failed(e) => CheckResult::failure(self.request.function.clone(), e.to_string()),
        }
    }
}

pub struct TransactionSimulator;

impl TransactionSimulator {
    /// Simulate `function(args)` as `sender`. Identical inputs against
    /// unchanged state yield identical responses.
    pub fn simulate<L: LedgerRpc>(
        binding: &ContractBinding<'_, L>,
        function: &str,
        args: &[String],
        sender: Address,
    ) -> Result<SimulationResponse, SimulationError> {
        logging::log_simulation_start(function, &sender.to_checksum(None));

        let abi_function = binding.function(function, args.len())?;
        if !Mutability::from(abi_function.state_mutability).is_mutating() {
            tracing::warn!(function, "Simulated function is declared read-only");
        }
        let values = binding.coerce_args(abi_function, args)?;
        let outputs = binding.call(function, &values, Some(sender))?;
        let response = SimulationResponse::decode(outputs)?;

        logging::log_simulation_response(response.success, &response.code.to_string(), &response.message);
        Ok(response)
    }

    /// Simulate and classify in one step.
    pub fn run<L: LedgerRpc>(
        binding: &ContractBinding<'_, L>,
        request: SimulationRequest,
    ) -> SimulationOutcome {
        let result = Self::simulate(binding, &request.function, &request.args, request.sender);
        if let Err(e) = &result {
            tracing::error!(stage = "simulate", function = %request.function, error = %e, "Simulation failed");
        }
        SimulationOutcome::classify(request, result)
    }
}
