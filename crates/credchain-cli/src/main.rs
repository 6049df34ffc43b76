//! # credchain CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; all commands operate on a JSON registry
//! snapshot selected with the global `--state` flag.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use credchain_cli::admin::{run_admin, run_events, run_init, AdminArgs, InitArgs};
use credchain_cli::credential::{run_credential, CredentialArgs};
use credchain_cli::issuer::{run_issuer, IssuerArgs};

/// CredChain Registry CLI
///
/// File-backed administration of the credential registry: bootstrap a
/// registry snapshot, manage the issuer whitelist, issue and revoke
/// credentials, and inspect the audit log. The snapshot format is shared
/// with the `credchain-api` server.
#[derive(Parser, Debug)]
#[command(name = "credchain", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the registry snapshot file.
    #[arg(long, global = true, default_value = "credchain.state.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a fresh registry snapshot.
    Init(InitArgs),

    /// Issuer whitelist management (whitelist, remove, status).
    Issuer(IssuerArgs),

    /// Administrator role (show, transfer).
    Admin(AdminArgs),

    /// Credential operations (issue, verify, revoke, list, count).
    Credential(CredentialArgs),

    /// Print the append-only audit log.
    Events,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(state = %cli.state.display(), "credchain CLI starting");

    let result = match cli.command {
        Commands::Init(args) => run_init(&args, &cli.state),
        Commands::Issuer(args) => run_issuer(&args, &cli.state),
        Commands::Admin(args) => run_admin(&args, &cli.state),
        Commands::Credential(args) => run_credential(&args, &cli.state),
        Commands::Events => run_events(&cli.state),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
