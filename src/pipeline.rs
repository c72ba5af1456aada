//! Stage driver: connect → load → bind → inspect → simulate.
//!
//! A failure in connect, load or bind ends the run; everything after that is
//! captured into the report instead of propagated.

use crate::abi::{FunctionSignature, InterfaceLoader};
use crate::binding::bind;
use crate::inspector::{CheckResult, StateInspector};
use crate::logging;
use crate::network::{Connection, Endpoint, HttpLedger, LedgerRpc};
use crate::simulator::{SimulationOutcome, SimulationRequest, TransactionSimulator};
use crate::VerifierError;
use alloy::primitives::Address;
use std::fmt;
use std::path::PathBuf;

/// Stages whose failure aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    LoadInterface,
    Bind,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Connect => write!(f, "connect"),
            Stage::LoadInterface => write!(f, "load interface"),
            Stage::Bind => write!(f, "bind contract"),
        }
    }
}

#[derive(Debug)]
pub struct FatalError {
    pub stage: Stage,
    pub error: VerifierError,
}

/// Outcome of the connection stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    pub chain_id: u64,
    /// Block height, or the reason it could not be read.
    pub height: Result<u64, String>,
}

/// What the simulation should send and as whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationPlan {
    pub function: String,
    pub args: Vec<String>,
    /// Caller override; when `None` the admin found by the inspector is used.
    pub sender: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierSettings {
    pub endpoint: Endpoint,
    pub expected_chain_id: Option<u64>,
    pub address: String,
    pub abi_path: PathBuf,
    pub simulation: SimulationPlan,
}

/// Everything a run produced, in stage order.
#[derive(Debug)]
pub struct VerificationReport {
    pub endpoint: Endpoint,
    pub address: String,
    pub connectivity: Option<Connectivity>,
    pub interface: Option<Vec<FunctionSignature>>,
    pub bound: Option<Address>,
    /// Inspector results, in probe order.
    pub probes: Vec<CheckResult>,
    /// The simulator's entry: its result, or why it was skipped.
    pub simulation_check: Option<CheckResult>,
    pub simulation: Option<SimulationOutcome>,
    pub fatal: Option<FatalError>,
}

impl VerificationReport {
    fn new(settings: &VerifierSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            address: settings.address.clone(),
            connectivity: None,
            interface: None,
            bound: None,
            probes: Vec::new(),
            simulation_check: None,
            simulation: None,
            fatal: None,
        }
    }

    fn abort(mut self, stage: Stage, error: VerifierError) -> Self {
        logging::log_fatal(&stage.to_string(), &error);
        self.fatal = Some(FatalError { stage, error });
        self
    }

    /// Every recorded check: probes first, then the simulation.
    pub fn checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.probes.iter().chain(self.simulation_check.iter())
    }

    /// Overall verdict: no fatal error and a passed simulation.
    pub fn passed(&self) -> bool {
        self.fatal.is_none()
            && self
                .simulation
                .as_ref()
                .map(SimulationOutcome::passed)
                .unwrap_or(false)
    }
}

pub struct Verifier {
    settings: VerifierSettings,
    inspector: StateInspector,
}

impl Verifier {
    pub fn new(settings: VerifierSettings) -> Self {
        Self {
            settings,
            inspector: StateInspector::default(),
        }
    }

    /// Replace the marketplace probe table.
    pub fn with_inspector(mut self, inspector: StateInspector) -> Self {
        self.inspector = inspector;
        self
    }

    /// Run against the configured HTTP endpoint.
    pub fn run(&self) -> VerificationReport {
        match HttpLedger::new(&self.settings.endpoint) {
            Ok(ledger) => self.run_with(ledger),
            Err(e) => VerificationReport::new(&self.settings).abort(Stage::Connect, e),
        }
    }

    /// Run against any ledger client.
    pub fn run_with<L: LedgerRpc>(&self, ledger: L) -> VerificationReport {
        let settings = &self.settings;
        let mut report = VerificationReport::new(settings);

        let connection = match Connection::establish(
            settings.endpoint.clone(),
            ledger,
            settings.expected_chain_id,
        ) {
            Ok(conn) => conn,
            Err(e) => return report.abort(Stage::Connect, e),
        };

        let height = match connection.current_height() {
            Ok(h) => {
                logging::log_block_height(h);
                Ok(h)
            }
            Err(e) => {
                tracing::warn!(stage = "connect", error = %e, "Connected but failed to fetch block number");
                Err(e.to_string())
            }
        };
        report.connectivity = Some(Connectivity {
            chain_id: connection.chain_id(),
            height,
        });

        let interface = match InterfaceLoader::load(&settings.abi_path) {
            Ok(iface) => iface,
            Err(e) => return report.abort(Stage::LoadInterface, e),
        };
        report.interface = Some(interface.signatures().to_vec());

        let binding = match bind(&connection, &settings.address, interface) {
            Ok(b) => b,
            Err(e) => return report.abort(Stage::Bind, e),
        };
        logging::log_contract_bound(&binding.address().to_checksum(None));
        report.bound = Some(binding.address());

        let inspection = self.inspector.inspect(&binding);
        report.probes = inspection.checks;

        let plan = &settings.simulation;
        match plan.sender.or(inspection.admin) {
            Some(sender) => {
                let request = SimulationRequest {
                    function: plan.function.clone(),
                    args: plan.args.clone(),
                    sender,
                };
                let outcome = TransactionSimulator::run(&binding, request);
                report.simulation_check = Some(outcome.to_check());
                report.simulation = Some(outcome);
            }
            None => {
                let reason = match &inspection.failed_requirement {
                    Some(probe) => format!("required probe `{}` failed", probe),
                    None => "no sender available".to_string(),
                };
                let check = CheckResult::skipped(plan.function.clone(), reason);
                logging::log_probe_result(&check);
                report.simulation_check = Some(check);
            }
        }

        report
    }
}
