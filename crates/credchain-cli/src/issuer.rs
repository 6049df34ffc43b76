//! # Issuer Subcommand
//!
//! Whitelist management, replacing the original `whitelist.js` script:
//! whitelist an institution, remove one (flag cleared, record kept), and
//! check status.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use credchain_core::AccountAddress;

use crate::admin::resolve_caller;
use crate::store::{load_registry, save_registry};

/// Arguments for the `credchain issuer` subcommand.
#[derive(Args, Debug)]
pub struct IssuerArgs {
    #[command(subcommand)]
    pub command: IssuerCommand,
}

/// Issuer subcommands.
#[derive(Subcommand, Debug)]
pub enum IssuerCommand {
    /// Whitelist an institution.
    Whitelist {
        /// Issuer address to whitelist.
        address: String,
        /// Institution name to record.
        #[arg(long)]
        name: String,
        /// Calling account. Defaults to the current administrator.
        #[arg(long)]
        caller: Option<String>,
    },

    /// Remove an institution from the whitelist.
    Remove {
        /// Issuer address to remove.
        address: String,
        /// Calling account. Defaults to the current administrator.
        #[arg(long)]
        caller: Option<String>,
    },

    /// Show whitelist status for an issuer.
    Status {
        /// Issuer address to look up.
        address: String,
    },
}

/// Dispatch `credchain issuer` subcommands.
pub fn run_issuer(args: &IssuerArgs, state_path: &Path) -> Result<u8> {
    match &args.command {
        IssuerCommand::Whitelist {
            address,
            name,
            caller,
        } => cmd_set_status(state_path, address, caller.as_deref(), true, name),

        IssuerCommand::Remove { address, caller } => {
            cmd_set_status(state_path, address, caller.as_deref(), false, "")
        }

        IssuerCommand::Status { address } => cmd_status(state_path, address),
    }
}

fn cmd_set_status(
    state_path: &Path,
    address: &str,
    caller: Option<&str>,
    whitelisted: bool,
    name: &str,
) -> Result<u8> {
    let mut registry = load_registry(state_path)?;
    let caller = resolve_caller(caller, &registry)?;
    let issuer = AccountAddress::new(address)?;

    registry.set_issuer_status(&caller, issuer.clone(), whitelisted, name)?;
    save_registry(state_path, &registry)?;

    // Post-action verification read, as the original script does.
    let confirmed = registry.is_whitelisted(&issuer);
    if whitelisted {
        println!("OK: issuer {issuer} whitelisted ({name}), confirmed: {confirmed}");
    } else {
        println!("OK: issuer {issuer} removed from whitelist, confirmed: {}", !confirmed);
    }
    Ok(0)
}

fn cmd_status(state_path: &Path, address: &str) -> Result<u8> {
    let registry = load_registry(state_path)?;
    let issuer = AccountAddress::new(address)?;

    match registry.issuer_record(&issuer) {
        Some(record) => {
            println!("Issuer: {issuer}");
            println!("  Whitelisted: {}", record.whitelisted);
            println!("  Institution: {}", record.institution_name);
        }
        None => {
            println!("Issuer: {issuer}");
            println!("  Whitelisted: false (never registered)");
        }
    }
    Ok(0)
}
