//! Handles the configuration for the identity resolver.
//!
//! Call the [ResolverConfigBuilder] to create a new configuration.
//!
//! Example: Running against the public network with defaults:
//! ```rust
//! use atproto_identity_resolver::config::ResolverConfigBuilder;
//! let config = ResolverConfigBuilder::default().build().unwrap();
//! ```
//!
//! Example: Pointing at a self-hosted PDS and PLC mirror:
//! ```rust
//! use atproto_identity_resolver::config::ResolverConfigBuilder;
//! let config = ResolverConfigBuilder::default()
//!     .with_plc_directory("https://plc.example.com")
//!     .with_handle_service("https://pds.example.com")
//!     .with_default_handle_suffix("example.com")
//!     .build()
//!     .unwrap();
//! ```

use url::Url;

use crate::ResolverError;

pub const DEFAULT_PLC_DIRECTORY: &str = "https://plc.directory";
pub const DEFAULT_HANDLE_SERVICE: &str = "https://bsky.social";
pub const DEFAULT_HANDLE_SUFFIX: &str = "bsky.social";

/// Configuration for the identity resolver.
///
/// Use the [ResolverConfigBuilder] to create a new configuration.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    pub(crate) plc_directory: Url,
    pub(crate) handle_service: Url,
    pub(crate) default_handle_suffix: String,
}

impl ResolverConfig {
    pub fn plc_directory(&self) -> &Url {
        &self.plc_directory
    }

    pub fn handle_service(&self) -> &Url {
        &self.handle_service
    }

    pub fn default_handle_suffix(&self) -> &str {
        &self.default_handle_suffix
    }
}

/// Resolver Config Builder to construct options required for the resolver.
///
/// - plc_directory: The PLC directory used to look up `did:plc` documents (default: https://plc.directory).
/// - handle_service: The XRPC service used for `com.atproto.identity.resolveHandle` (default: https://bsky.social).
/// - default_handle_suffix: Domain appended to bare handles such as `alice` (default: bsky.social).
pub struct ResolverConfigBuilder {
    plc_directory: String,
    handle_service: String,
    default_handle_suffix: String,
}

impl Default for ResolverConfigBuilder {
    fn default() -> Self {
        Self {
            plc_directory: DEFAULT_PLC_DIRECTORY.into(),
            handle_service: DEFAULT_HANDLE_SERVICE.into(),
            default_handle_suffix: DEFAULT_HANDLE_SUFFIX.into(),
        }
    }
}

impl ResolverConfigBuilder {
    /// Set the PLC directory address.
    /// Example: `https://plc.directory`
    pub fn with_plc_directory(mut self, plc_directory: &str) -> Self {
        self.plc_directory = plc_directory.into();
        self
    }

    /// Set the service that answers handle resolution queries.
    /// Example: `https://bsky.social`
    pub fn with_handle_service(mut self, handle_service: &str) -> Self {
        self.handle_service = handle_service.into();
        self
    }

    /// Set the domain appended to handles that have no `.` in them.
    /// Default: bsky.social
    pub fn with_default_handle_suffix(mut self, suffix: &str) -> Self {
        self.default_handle_suffix = suffix.trim_start_matches('.').into();
        self
    }

    /// Build the [ResolverConfig].
    ///
    /// Will return an error if either service address is not a valid URL.
    pub fn build(self) -> Result<ResolverConfig, ResolverError> {
        Ok(ResolverConfig {
            plc_directory: parse_base_url("plc_directory", &self.plc_directory)?,
            handle_service: parse_base_url("handle_service", &self.handle_service)?,
            default_handle_suffix: self.default_handle_suffix,
        })
    }
}

/// Parses a service address, rejecting anything that can't carry a path
/// (`mailto:`, `data:`, ...).
fn parse_base_url(name: &str, address: &str) -> Result<Url, ResolverError> {
    let url = Url::parse(address)
        .map_err(|e| ResolverError::ConfigError(format!("{name} ({address}): {e}")))?;

    if url.cannot_be_a_base() {
        return Err(ResolverError::ConfigError(format!(
            "{name} ({address}) can't be used as a base URL"
        )));
    }
    Ok(url)
}

/// Appends path segments to a base URL, keeping any path prefix it already has.
fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // cannot_be_a_base() was rejected in build(), so this always succeeds
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

impl ResolverConfig {
    /// `<plc_directory>/<did>`
    pub(crate) fn did_document_url(&self, did: &str) -> Url {
        with_segments(&self.plc_directory, &[did])
    }

    /// `<handle_service>/xrpc/com.atproto.identity.resolveHandle?handle=<handle>`
    pub(crate) fn resolve_handle_url(&self, handle: &str) -> Url {
        let mut url = with_segments(
            &self.handle_service,
            &["xrpc", "com.atproto.identity.resolveHandle"],
        );
        url.query_pairs_mut().append_pair("handle", handle);
        url
    }
}
