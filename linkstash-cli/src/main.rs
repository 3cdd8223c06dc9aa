use std::process;

use clap::error::ErrorKind;
use linkstash_cli::cli_builder::CliBuilder;
use linkstash_cli::error::{handle_cli_result, CliError, CliResult};
use linkstash_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use linkstash_cli::query::QueryConverter;
use linkstash_endpoints::EndpointCatalog;

/// Install the tracing subscriber, filtered by the `LINKSTASH_LOG`
/// environment variable, writing to stderr so command output stays clean on
/// stdout.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("LINKSTASH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let catalog = EndpointCatalog::builtin();
    let builder = CliBuilder::new(&catalog);

    // Generation failures abort startup: a malformed catalog entry is a data
    // bug, reported with the offending registration.
    let cli = match builder.build_cli() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Failed to build command-line interface: {e}");
            process::exit(EXIT_ERROR);
        }
    };

    let matches = match cli.try_get_matches() {
        Ok(matches) => matches,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{e}");
                process::exit(EXIT_SUCCESS);
            }
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                eprint!("{e}");
                process::exit(EXIT_WARNING);
            }
            _ => {
                eprintln!("{e}");
                process::exit(EXIT_ERROR);
            }
        },
    };

    let exit_code = handle_cli_result(run(&catalog, &matches));
    process::exit(exit_code);
}

/// Dispatch the matched subcommand: compose the API request and hand it off.
/// The transport layer is external; the composed request is printed as JSON.
fn run(catalog: &EndpointCatalog, matches: &clap::ArgMatches) -> CliResult<()> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        // arg_required_else_help guarantees a subcommand is present
        return Ok(());
    };

    let endpoint = catalog
        .get(name)
        .ok_or_else(|| CliError::new(format!("unknown endpoint command '{name}'"), EXIT_ERROR))?;

    tracing::debug!(endpoint = name, "composing request");
    let request = QueryConverter::matches_to_request(endpoint, sub_matches)?;

    let rendered = serde_json::to_string_pretty(&request)
        .map_err(|e| CliError::new(format!("failed to render request: {e}"), EXIT_ERROR))?;
    println!("{rendered}");

    Ok(())
}
