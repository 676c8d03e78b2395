/*!
 * AT Protocol identity resolution.
 *
 * Turns either a `did:plc:` identifier or a handle into an [`Identity`]
 * (handle + DID pair):
 *
 * - DIDs are looked up in the PLC directory and the handle is taken from the
 *   first `alsoKnownAs` entry of the DID document.
 * - Handles are resolved with `com.atproto.identity.resolveHandle`. A bare
 *   handle (`alice`) is qualified with the default suffix first
 *   (`alice.bsky.social`).
 *
 * ```no_run
 * use atproto_identity_resolver::{IdentityInput, IdentityResolver, config::ResolverConfigBuilder};
 *
 * # async fn run() -> Result<(), atproto_identity_resolver::ResolverError> {
 * let resolver = IdentityResolver::new(ResolverConfigBuilder::default().build()?);
 * let identity = resolver.resolve(&IdentityInput::classify("alice")).await?;
 * println!("{} -> {}", identity.handle, identity.did);
 * # Ok(())
 * # }
 * ```
 */

use std::fmt;

pub mod config;
mod error;
mod input;
mod resolver;

pub use error::ResolverError;
pub use input::{DID_PLC_PREFIX, IdentityInput};
pub use resolver::IdentityResolver;

/// A resolved identity.
///
/// The DID is permanent, the handle is a human readable alias that can change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub handle: String,
    pub did: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.handle, self.did)
    }
}
