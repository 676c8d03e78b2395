/*!
 * Feed membership tooling.
 *
 * Resolves an AT Protocol identity and records its DID in the membership
 * list (`src/membership.ts`) the feed generator filters authors with.
 *
 * Pipeline: classify input → resolve → check for duplicates → edit → write.
 */

use std::{ffi::OsString, fmt};

use atproto_identity_resolver::{
    Identity, IdentityInput, IdentityResolver, config::ResolverConfigBuilder,
};
use clap::Parser;
use tracing::{Level, event};
use tracing_subscriber::filter::EnvFilter;

pub mod cli;
pub mod editor;
pub mod errors;
pub mod file;

use cli::Args;
use errors::AppError;
use file::{Change, MembershipFile};

/// Result of one run, rendered as the final status line on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub identity: Identity,
    pub change: Change,
    pub file_name: String,
    /// The edit was computed but not written
    pub dry_run: bool,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            identity,
            change,
            file_name,
            dry_run,
        } = self;
        match change {
            Change::Added => write!(f, "Added {identity} to {file_name}")?,
            Change::AlreadyPresent => write!(f, "{identity} already in {file_name}")?,
            Change::Removed => write!(f, "Removed {identity} from {file_name}")?,
            Change::NotPresent => write!(f, "{identity} not in {file_name}")?,
        }
        if *dry_run && change.modified() {
            write!(f, " (dry run)")?;
        }
        Ok(())
    }
}

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so stdout only carries the status line. Filtering follows
/// `RUST_LOG`, defaulting to warnings only.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Logging setup failed: {e}");
    }
}

/// Parses `argv` and runs the pipeline.
pub async fn run_from<I, T>(argv: I) -> Result<Report, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv)?;
    run(args).await
}

/// Resolves `args.did_or_handle` and adds it to (or removes it from) the
/// membership file.
///
/// The resolved handle and DID are printed to stderr before the file is
/// touched. Nothing is written if resolution fails.
pub async fn run(args: Args) -> Result<Report, AppError> {
    let config = ResolverConfigBuilder::default()
        .with_plc_directory(&args.plc_directory)
        .with_handle_service(&args.handle_service)
        .build()?;
    let resolver = IdentityResolver::new(config);

    let input = IdentityInput::classify(&args.did_or_handle);
    event!(Level::DEBUG, "resolving {input:?}");
    let identity = resolver.resolve(&input).await?;

    eprintln!("handle = {}", identity.handle);
    eprintln!("   did = {}", identity.did);

    let file = MembershipFile::new(&args.membership_file).with_dry_run(args.dry_run);
    let change = if args.remove {
        file.remove(&identity)?
    } else {
        file.add(&identity)?
    };

    Ok(Report {
        identity,
        change,
        file_name: file.display_name(),
        dry_run: args.dry_run,
    })
}
