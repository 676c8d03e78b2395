//! Command line arguments for `add_user`.

use std::path::PathBuf;

use atproto_identity_resolver::config::{DEFAULT_HANDLE_SERVICE, DEFAULT_PLC_DIRECTORY};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Resolve a DID or handle and add it to the feed membership list",
    long_about = None
)]
pub struct Args {
    /// did:plc identifier or handle. Handles without a domain get `.bsky.social` appended
    #[arg(value_name = "DID_OR_HANDLE")]
    pub did_or_handle: String,

    /// Membership source file to edit
    #[arg(
        long,
        short = 'f',
        env = "MEMBERSHIP_FILE",
        default_value = "src/membership.ts"
    )]
    pub membership_file: PathBuf,

    /// PLC directory used to resolve did:plc identifiers
    #[arg(long, env = "PLC_DIRECTORY_URL", default_value = DEFAULT_PLC_DIRECTORY)]
    pub plc_directory: String,

    /// Service answering com.atproto.identity.resolveHandle
    #[arg(long, env = "HANDLE_SERVICE_URL", default_value = DEFAULT_HANDLE_SERVICE)]
    pub handle_service: String,

    /// Remove the identity from the list instead of adding it
    #[arg(long)]
    pub remove: bool,

    /// Resolve and compute the edit, but leave the file untouched
    #[arg(long)]
    pub dry_run: bool,
}
