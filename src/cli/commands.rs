use crate::abi::InterfaceLoader;
use crate::binding::parse_address;
use crate::cli::args::{FunctionsArgs, VerifyArgs};
use crate::config::Config;
use crate::network::Endpoint;
use crate::output::OutputConfig;
use crate::pipeline::{SimulationPlan, Verifier, VerifierSettings};
use crate::report::Reporter;
use crate::ui::formatter::Formatter;
use crate::{Result, VerifierError};

fn print_info(message: impl AsRef<str>) {
    println!("{}", Formatter::info(message));
}

/// Run the verification pipeline and print its report.
///
/// Verification failures are part of the report, not an error: only a bad
/// configuration makes this return `Err`.
pub fn verify(args: VerifyArgs) -> Result<()> {
    OutputConfig::configure(args.no_unicode);

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_default(),
    };
    let settings = resolve_settings(&args, &config)?;
    tracing::debug!(?settings, "Resolved verifier settings");

    let report = Verifier::new(settings).run();
    Reporter::print(&report);
    Ok(())
}

/// Merge command-line overrides over the configuration file.
pub fn resolve_settings(
    args: &VerifyArgs,
    config: &Config,
) -> std::result::Result<VerifierSettings, VerifierError> {
    let rpc_url = args
        .rpc_url
        .clone()
        .unwrap_or_else(|| config.network.rpc_url.clone());

    let expected_chain_id = if args.any_chain {
        None
    } else {
        args.expected_chain_id.or(config.network.expected_chain_id)
    };

    let sender = args
        .sender
        .as_deref()
        .or(config.simulation.sender.as_deref())
        .map(|raw| {
            parse_address(raw)
                .map_err(|e| VerifierError::Config(format!("invalid sender: {}", e)))
        })
        .transpose()?;

    Ok(VerifierSettings {
        endpoint: Endpoint::new(rpc_url),
        expected_chain_id,
        address: args
            .address
            .clone()
            .unwrap_or_else(|| config.contract.address.clone()),
        abi_path: args
            .abi
            .clone()
            .unwrap_or_else(|| config.contract.abi_path.clone()),
        simulation: SimulationPlan {
            function: config.simulation.function.clone(),
            args: config.simulation.literal_args()?,
            sender,
        },
    })
}

/// List the functions an ABI declares.
pub fn functions(args: FunctionsArgs) -> Result<()> {
    let interface = InterfaceLoader::load(&args.abi)?;
    print_info(format!(
        "{} functions in {}:",
        interface.len(),
        args.abi.display()
    ));
    for signature in interface.signatures() {
        println!("  {}", signature);
    }
    Ok(())
}
