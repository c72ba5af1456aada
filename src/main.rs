use clap::{CommandFactory, Parser};
use clap_complete::generate;
use contract_verifier::cli::{Cli, Commands, Verbosity, VerifyArgs};
use contract_verifier::ui::formatter::Formatter;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so stdout carries only the report.
/// `RUST_LOG` overrides the verbosity flags; `CONTRACT_VERIFY_JSON` switches to JSON lines.
fn initialize_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("contract_verifier={}", verbosity.to_log_level()))
    });
    let use_json = std::env::var_os("CONTRACT_VERIFY_JSON").is_some();

    let json_layer = use_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_target(true)
    });
    let text_layer = (!use_json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() -> miette::Result<()> {
    Formatter::configure_colors_from_env();

    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    Formatter::set_verbosity(verbosity.as_level());

    initialize_tracing(verbosity);

    match cli.command {
        Some(Commands::Verify(args)) => contract_verifier::cli::commands::verify(args),
        Some(Commands::Functions(args)) => contract_verifier::cli::commands::functions(args),
        Some(Commands::Completions(args)) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "contract-verify", &mut io::stdout());
            Ok(())
        }
        None => contract_verifier::cli::commands::verify(VerifyArgs {
            rpc_url: std::env::var("CONTRACT_VERIFY_RPC_URL").ok(),
            ..VerifyArgs::default()
        }),
    }
}
