//! Error types for the membership tooling
use std::{error::Error as StdError, path::PathBuf};

use atproto_identity_resolver::ResolverError;
use thiserror::Error;

/// Errors raised while reading, editing or writing the membership file.
#[derive(Error, Debug)]
pub enum MembershipError {
    #[error("Couldn't access membership file ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No list in the membership file is tagged with {marker}")]
    MarkerNotFound { marker: &'static str },
    #[error("The list tagged with {marker} is never closed (expected a line holding only `]`)")]
    UnterminatedSection { marker: &'static str },
}

/// Top level error for the `add_user` binary. Every variant exits with status 1.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Usage(#[from] clap::Error),
    #[error(transparent)]
    Resolver(#[from] ResolverError),
    #[error(transparent)]
    Membership(#[from] MembershipError),
}

/// Renders `err` followed by each cause in its `source()` chain, separated by
/// `: `. Causes whose text already appears in the message are skipped, since
/// most of our variants embed their direct source.
pub fn error_report(err: &dyn StdError) -> String {
    let mut report = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !report.contains(&cause_msg) {
            report.push_str(": ");
            report.push_str(&cause_msg);
        }
        source = cause.source();
    }
    report
}
