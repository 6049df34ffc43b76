//! # Init, Admin & Events Subcommands
//!
//! Registry bootstrap (the deployment step of the original scripts),
//! administrator role management, and the audit log printer.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use credchain_core::AccountAddress;
use credchain_registry::RegistryEvent;

use crate::store::{init_registry, load_registry, save_registry};

/// Arguments for the `credchain init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Administrator address for the new registry.
    #[arg(long)]
    pub admin: String,

    /// Overwrite an existing snapshot.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `credchain admin` subcommand.
#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Administrator subcommands.
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Show the current administrator.
    Show,

    /// Transfer the administrator role to another account.
    Transfer {
        /// The account receiving the role.
        new_admin: String,
        /// Calling account. Defaults to the current administrator.
        #[arg(long)]
        caller: Option<String>,
    },
}

/// Create a fresh registry snapshot.
pub fn run_init(args: &InitArgs, state_path: &Path) -> Result<u8> {
    let admin = AccountAddress::new(&args.admin)?;
    let registry = init_registry(state_path, admin, args.force)?;
    println!(
        "OK: created registry at {} (admin {})",
        state_path.display(),
        registry.admin()
    );
    Ok(0)
}

/// Dispatch `credchain admin` subcommands.
pub fn run_admin(args: &AdminArgs, state_path: &Path) -> Result<u8> {
    match &args.command {
        AdminCommand::Show => {
            let registry = load_registry(state_path)?;
            println!("Administrator: {}", registry.admin());
            Ok(0)
        }

        AdminCommand::Transfer { new_admin, caller } => {
            let mut registry = load_registry(state_path)?;
            let caller = resolve_caller(caller.as_deref(), &registry)?;
            let new_admin = AccountAddress::new(new_admin)?;

            registry.transfer_admin(&caller, new_admin.clone())?;
            save_registry(state_path, &registry)?;

            // Post-action verification read, as the original script does.
            println!("OK: administrator transferred to {}", registry.admin());
            Ok(0)
        }
    }
}

/// Print the append-only audit log, oldest first.
pub fn run_events(state_path: &Path) -> Result<u8> {
    let registry = load_registry(state_path)?;
    let events = registry.events();
    if events.is_empty() {
        println!("No events recorded.");
        return Ok(0);
    }

    println!("Events ({}):", events.len());
    for event in events {
        match event {
            RegistryEvent::IssuerWhitelisted {
                issuer,
                institution_name,
                whitelisted,
                at,
            } => {
                let action = if *whitelisted { "whitelisted" } else { "removed" };
                println!("  {at} issuer {action}: {issuer} ({institution_name})");
            }
            RegistryEvent::CredentialIssued {
                edu_id,
                issuer,
                student_wallet,
                at,
                ..
            } => {
                println!("  {at} issued: {edu_id} by {issuer} for {student_wallet}");
            }
            RegistryEvent::CredentialRevoked {
                edu_id, revoked_by, at,
            } => {
                println!("  {at} revoked: {edu_id} by {revoked_by}");
            }
            RegistryEvent::AdminTransferred {
                previous_admin,
                new_admin,
                at,
            } => {
                println!("  {at} admin transferred: {previous_admin} -> {new_admin}");
            }
        }
    }
    Ok(0)
}

/// Resolve the calling account: an explicit `--caller`, or the snapshot's
/// current administrator (matching the original scripts, which sign as
/// the deployer).
pub fn resolve_caller(
    caller: Option<&str>,
    registry: &credchain_registry::Registry,
) -> Result<AccountAddress> {
    match caller {
        Some(address) => Ok(AccountAddress::new(address)?),
        None => Ok(registry.admin().clone()),
    }
}
