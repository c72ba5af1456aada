//! Human-readable rendering of a [`VerificationReport`].
//!
//! Purely presentational: every check is rendered whatever its outcome.

use crate::inspector::{CheckResult, Outcome};
use crate::output::{OutputConfig, StatusLabel};
use crate::pipeline::VerificationReport;
use crate::simulator::{SimulationError, SimulationOutcome, Verdict};
use crate::ui::Formatter;
use alloy::dyn_abi::DynSolValue;

const BANNER_WIDTH: usize = 50;

pub struct Reporter;

impl Reporter {
    /// Print the report to stdout.
    pub fn print(report: &VerificationReport) {
        for line in Self::render(report) {
            println!("{}", line);
        }
    }

    /// Render the report as ordered lines.
    pub fn render(report: &VerificationReport) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(Formatter::info(format!(
            "Verifying contract {} via {}",
            report.address, report.endpoint
        )));

        if let Some(conn) = &report.connectivity {
            lines.push(Formatter::status(
                StatusLabel::Pass,
                format!("Connected to chain {}", conn.chain_id),
            ));
            match &conn.height {
                Ok(height) => lines.push(Formatter::status(
                    StatusLabel::Info,
                    format!("Current block number: {}", height),
                )),
                Err(e) => lines.push(Formatter::status(
                    StatusLabel::Warning,
                    format!("Connected but failed to fetch block number: {}", e),
                )),
            }
        }

        if let Some(signatures) = &report.interface {
            lines.push(Formatter::status(
                StatusLabel::Pass,
                format!("Loaded ABI with {} functions", signatures.len()),
            ));
            if Formatter::is_verbose() {
                lines.extend(signatures.iter().map(|s| format!("    • {}", s)));
            }
        }

        if let Some(address) = &report.bound {
            lines.push(Formatter::status(
                StatusLabel::Pass,
                format!("Initialized contract binding at {}", address.to_checksum(None)),
            ));
        }

        if let Some(fatal) = &report.fatal {
            lines.push(Formatter::status(
                StatusLabel::Error,
                format!("Stage `{}` failed: {}", fatal.stage, fatal.error),
            ));
            lines.push(Formatter::error(
                "Run aborted; later stages were not attempted.",
            ));
        } else {
            lines.push("--- Reading contract state ---".to_string());
            for check in &report.probes {
                render_probe(check, &mut lines);
            }

            if let Some(check) = &report.simulation_check {
                lines.push(format!("--- Simulating {} (dry run) ---", check.name));
                match &report.simulation {
                    Some(outcome) => render_simulation(outcome, &mut lines),
                    None => render_probe(check, &mut lines),
                }
            }
        }

        lines.push(summary_line(report));

        if !Formatter::is_quiet() {
            lines.push(String::new());
            lines.push(OutputConfig::double_rule_line(BANNER_WIDTH));
            lines.push("FINISHED. If you see SUCCESS above, your contract is ready!".to_string());
            lines.push(OutputConfig::double_rule_line(BANNER_WIDTH));
        }

        lines.into_iter().map(|l| OutputConfig::to_ascii(&l)).collect()
    }
}

fn render_probe(check: &CheckResult, lines: &mut Vec<String>) {
    match check.outcome {
        Outcome::Success => {
            let value = check.display_value().unwrap_or_else(|| "(no value)".to_string());
            lines.push(Formatter::status(
                StatusLabel::Pass,
                format!("{}: {}", check.name, value),
            ));
            if check.name == "debugMode" {
                match check.value {
                    Some(DynSolValue::Bool(true)) => lines.push(Formatter::info(
                        "   → Debug mode is ON. On-chain verification checks are skipped (good for testing).",
                    )),
                    Some(DynSolValue::Bool(false)) => lines.push(Formatter::warning(
                        "   → Debug mode is OFF. Unverified senders may be rejected with 'User not verified'.",
                    )),
                    _ => {}
                }
            }
        }
        Outcome::Failure => {
            let error = check.error.as_deref().unwrap_or("unknown error");
            let hint = if check.name == "debugMode" {
                " (older deployments do not have this function)"
            } else {
                ""
            };
            lines.push(Formatter::status(
                StatusLabel::Fail,
                format!("{}: {}{}", check.name, error, hint),
            ));
        }
        Outcome::Skipped => {
            let reason = check.error.as_deref().unwrap_or("not attempted");
            lines.push(Formatter::status(
                StatusLabel::Skip,
                format!("{}: skipped, {}", check.name, reason),
            ));
        }
    }
}

fn render_simulation(outcome: &SimulationOutcome, lines: &mut Vec<String>) {
    let function = &outcome.request.function;
    lines.push(Formatter::status(
        StatusLabel::Info,
        format!("Sender: {}", outcome.request.sender.to_checksum(None)),
    ));

    if let Some(response) = &outcome.response {
        lines.push(Formatter::status(
            StatusLabel::Info,
            format!(
                "Simulation result: success={}, code={}, message={:?}, payload={}",
                response.success, response.code, response.message, response.payload
            ),
        ));
    }

    match &outcome.verdict {
        Verdict::Passed => lines.push(Formatter::status(
            StatusLabel::Pass,
            format!("SUCCESS! The contract logic allows {}.", function),
        )),
        Verdict::Rejected { reason } => {
            let reason = if reason.is_empty() {
                outcome
                    .response
                    .as_ref()
                    .map(|r| format!("contract answered with code {}", r.code))
                    .unwrap_or_default()
            } else {
                reason.clone()
            };
            lines.push(Formatter::status(
                StatusLabel::Fail,
                format!("FAILURE! Reason: {}", reason),
            ));
        }
        Verdict::Failed(e) => {
            let line = match e {
                SimulationError::Revert { reason, .. } => format!("Simulation reverted: {}", reason),
                SimulationError::Encoding(detail) => format!("Simulation failed: {}", detail),
                SimulationError::Transport(detail) => {
                    format!("Simulation failed, node did not answer: {}", detail)
                }
            };
            lines.push(Formatter::status(StatusLabel::Fail, line));
        }
    }

    if outcome.flag_disagrees() {
        if let Some(response) = &outcome.response {
            lines.push(Formatter::status(
                StatusLabel::Warning,
                format!(
                    "success flag is {} while code is {}; the code decides the verdict",
                    response.success, response.code
                ),
            ));
        }
    }
}

fn summary_line(report: &VerificationReport) -> String {
    let (mut passed, mut failed, mut skipped) = (0, 0, 0);
    for check in report.checks() {
        match check.outcome {
            Outcome::Success => passed += 1,
            Outcome::Failure => failed += 1,
            Outcome::Skipped => skipped += 1,
        }
    }
    let counts = format!("{} passed, {} failed, {} skipped", passed, failed, skipped);
    if report.passed() {
        Formatter::status(StatusLabel::Pass, format!("Overall: PASSED ({})", counts))
    } else {
        Formatter::status(StatusLabel::Fail, format!("Overall: FAILED ({})", counts))
    }
}
