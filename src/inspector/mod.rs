//! Read-only state probes against a bound contract.
//!
//! Probes run in table order and each one is fault-isolated: a missing
//! function or a reverting call is recorded as a failure and the next probe
//! still runs. The single required probe (`admin`) feeds the simulator; when
//! it fails, every probe marked [`ProbeRole::DependsOnRequired`] is recorded as
//! skipped instead of being attempted.

pub mod check;

pub use check::{format_value, CheckResult, Outcome};

use crate::binding::ContractBinding;
use crate::logging;
use crate::network::LedgerRpc;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeRole {
    /// May fail without consequence. Older deployments lack some of these.
    Optional,
    /// Must succeed and return an address; consumed by later stages.
    Required,
    /// Only meaningful when the required probe succeeded.
    DependsOnRequired,
}

/// One named zero-argument read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub name: &'static str,
    pub function: &'static str,
    pub role: ProbeRole,
}

impl Probe {
    pub const fn new(name: &'static str, function: &'static str, role: ProbeRole) -> Self {
        Self {
            name,
            function,
            role,
        }
    }
}

/// The marketplace probes, in the order they are run.
pub const MARKETPLACE_PROBES: &[Probe] = &[
    Probe::new("debugMode", "debugMode", ProbeRole::Optional),
    Probe::new("listingCount", "listingCount", ProbeRole::Optional),
    Probe::new("admin", "admin", ProbeRole::Required),
];

/// Probe results plus the administrator identity, when discovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub checks: Vec<CheckResult>,
    pub admin: Option<Address>,
    /// Name of the required probe that failed, if any.
    pub failed_requirement: Option<String>,
}

impl Inspection {
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

pub struct StateInspector {
    probes: Vec<Probe>,
}

impl Default for StateInspector {
    fn default() -> Self {
        Self::new(MARKETPLACE_PROBES.to_vec())
    }
}

impl StateInspector {
    pub fn new(probes: Vec<Probe>) -> Self {
        Self { probes }
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    pub fn inspect<L: LedgerRpc>(&self, binding: &ContractBinding<'_, L>) -> Inspection {
        let mut inspection = Inspection {
            checks: Vec::with_capacity(self.probes.len()),
            admin: None,
            failed_requirement: None,
        };

        for probe in &self.probes {
            if probe.role == ProbeRole::DependsOnRequired {
                if let Some(required) = &inspection.failed_requirement {
                    let check = CheckResult::skipped(
                        probe.name,
                        format!("required probe `{}` failed", required),
                    );
                    logging::log_probe_result(&check);
                    inspection.checks.push(check);
                    continue;
                }
            }

            let check = run_probe(binding, probe);
            logging::log_probe_result(&check);

            if probe.role == ProbeRole::Required {
                match check.value.as_ref() {
                    Some(DynSolValue::Address(addr)) if check.is_success() => {
                        inspection.admin = Some(*addr);
                    }
                    _ => {
                        inspection.failed_requirement = Some(probe.name.to_string());
                    }
                }
            }

            inspection.checks.push(check);
        }

        inspection
    }
}

fn run_probe<L: LedgerRpc>(binding: &ContractBinding<'_, L>, probe: &Probe) -> CheckResult {
    let values = match binding.call(probe.function, &[], None) {
        Ok(values) => values,
        Err(e) => return CheckResult::failure(probe.name, e.to_string()),
    };

    let value = match values.len() {
        0 => None,
        1 => values.into_iter().next(),
        _ => Some(DynSolValue::Tuple(values)),
    };

    if probe.role == ProbeRole::Required && !matches!(value, Some(DynSolValue::Address(_))) {
        return CheckResult::failure(
            probe.name,
            format!("`{}` did not return an address", probe.function),
        );
    }

    CheckResult::success(probe.name, value)
}
