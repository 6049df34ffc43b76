//! # Credential Subcommand
//!
//! Issuance (with local document hashing), verification, revocation, and
//! index listings — the CLI rendition of the original front end's
//! contract helpers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use credchain_core::{AccountAddress, DocumentHash, EduId};
use credchain_registry::IssueRequest;

use crate::store::{load_registry, save_registry};

/// Arguments for the `credchain credential` subcommand.
#[derive(Args, Debug)]
pub struct CredentialArgs {
    #[command(subcommand)]
    pub command: CredentialCommand,
}

/// Credential subcommands.
#[derive(Subcommand, Debug)]
pub enum CredentialCommand {
    /// Issue a credential. Prints the new EduID.
    Issue {
        /// Issuing account. Must be whitelisted.
        #[arg(long)]
        caller: String,
        /// Student (holder) account.
        #[arg(long)]
        student: String,
        /// Student display name.
        #[arg(long)]
        student_name: String,
        /// Institution display name.
        #[arg(long)]
        institution: String,
        /// Credential type (degree, diploma, certificate, ...).
        #[arg(long)]
        credential_type: String,
        /// Course or program free text.
        #[arg(long)]
        course: String,
        /// Document file to hash with SHA-256.
        #[arg(long, conflicts_with = "hash")]
        document: Option<PathBuf>,
        /// Pre-computed document hash as hex (with or without 0x prefix).
        #[arg(long)]
        hash: Option<String>,
    },

    /// Verify a credential by EduID. Never fails for unknown identifiers.
    Verify {
        /// The EduID to verify.
        edu_id: String,
    },

    /// Revoke a credential. Only the original issuer may revoke.
    Revoke {
        /// The EduID to revoke.
        edu_id: String,
        /// Calling account. Must be the credential's issuer.
        #[arg(long)]
        caller: String,
    },

    /// List EduIDs: a student's credentials, or all of them.
    List {
        /// Restrict to one student's credentials.
        #[arg(long)]
        student: Option<String>,
    },

    /// Print the total number of credentials issued.
    Count,
}

/// Dispatch `credchain credential` subcommands.
pub fn run_credential(args: &CredentialArgs, state_path: &Path) -> Result<u8> {
    match &args.command {
        CredentialCommand::Issue {
            caller,
            student,
            student_name,
            institution,
            credential_type,
            course,
            document,
            hash,
        } => cmd_issue(
            state_path,
            caller,
            student,
            student_name,
            institution,
            credential_type,
            course,
            document.as_deref(),
            hash.as_deref(),
        ),

        CredentialCommand::Verify { edu_id } => cmd_verify(state_path, edu_id),

        CredentialCommand::Revoke { edu_id, caller } => cmd_revoke(state_path, edu_id, caller),

        CredentialCommand::List { student } => cmd_list(state_path, student.as_deref()),

        CredentialCommand::Count => {
            let registry = load_registry(state_path)?;
            println!("{}", registry.credential_count());
            Ok(0)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_issue(
    state_path: &Path,
    caller: &str,
    student: &str,
    student_name: &str,
    institution: &str,
    credential_type: &str,
    course: &str,
    document: Option<&Path>,
    hash: Option<&str>,
) -> Result<u8> {
    let document_hash = match (document, hash) {
        (Some(path), None) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("cannot read document at {}", path.display()))?;
            let digest = DocumentHash::hash_bytes(&bytes);
            tracing::debug!(path = %path.display(), digest = %digest, "hashed document");
            digest
        }
        (None, Some(hex)) => DocumentHash::from_hex(hex)?,
        (None, None) => bail!("either --document or --hash is required"),
        (Some(_), Some(_)) => bail!("--document conflicts with --hash"),
    };

    let mut registry = load_registry(state_path)?;
    let caller = AccountAddress::new(caller)?;
    let request = IssueRequest {
        student_wallet: AccountAddress::new(student)?,
        student_name: student_name.to_string(),
        institution_name: institution.to_string(),
        credential_type: credential_type.to_string(),
        course_or_program: course.to_string(),
        document_hash,
    };

    let edu_id = registry.issue_credential(&caller, request)?;
    save_registry(state_path, &registry)?;

    println!("{edu_id}");
    Ok(0)
}

fn cmd_verify(state_path: &Path, edu_id: &str) -> Result<u8> {
    let registry = load_registry(state_path)?;

    // The verify path is total: a malformed identifier is simply unknown.
    let verification = match EduId::new(edu_id) {
        Ok(edu_id) => registry.verify_credential(&edu_id),
        Err(_) => credchain_registry::Verification::not_found(),
    };

    match verification.record {
        Some(record) => {
            println!("Credential: {}", record.edu_id);
            println!("  Issuer: {}", record.issuer);
            println!("  Student: {} ({})", record.student_name, record.student_wallet);
            println!("  Institution: {}", record.institution_name);
            println!("  Type: {}", record.credential_type);
            println!("  Course/Program: {}", record.course_or_program);
            println!("  Issued: {}", record.issued_at);
            println!("  Document hash: {}", record.document_hash);
            println!("  Revoked: {}", record.revoked);
        }
        None => println!("Not found: {edu_id}"),
    }
    Ok(0)
}

fn cmd_revoke(state_path: &Path, edu_id: &str, caller: &str) -> Result<u8> {
    let mut registry = load_registry(state_path)?;
    let caller = AccountAddress::new(caller)?;
    let edu_id = EduId::new(edu_id)?;

    registry.revoke_credential(&caller, &edu_id)?;
    save_registry(state_path, &registry)?;

    println!("OK: revoked {edu_id}");
    Ok(0)
}

fn cmd_list(state_path: &Path, student: Option<&str>) -> Result<u8> {
    let registry = load_registry(state_path)?;
    let ids: Vec<_> = match student {
        Some(address) => {
            let student = AccountAddress::new(address)?;
            registry.student_credentials(&student).to_vec()
        }
        None => registry.all_credentials().to_vec(),
    };

    if ids.is_empty() {
        println!("No credentials.");
        return Ok(0);
    }
    for id in ids {
        println!("{id}");
    }
    Ok(0)
}
