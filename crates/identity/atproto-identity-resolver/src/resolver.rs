//! Resolving DIDs and handles against the network is handled here

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{Instrument, Level, debug, span, warn};
use url::Url;

use crate::{Identity, IdentityInput, ResolverError, config::ResolverConfig};

/// URI scheme used by `alsoKnownAs` entries in a PLC document
const AT_URI_PREFIX: &str = "at://";

/// The only part of a PLC DID document we care about
#[derive(Deserialize)]
struct PlcDocument {
    #[serde(rename = "alsoKnownAs")]
    also_known_as: Option<Vec<String>>,
}

/// Response body of `com.atproto.identity.resolveHandle`
#[derive(Deserialize)]
struct ResolveHandleOutput {
    did: Option<String>,
}

/// Resolves `did:plc` identifiers and handles into an [Identity].
///
/// Every call makes exactly one HTTP request. There is no caching and no retry.
#[derive(Clone, Debug)]
pub struct IdentityResolver {
    config: ResolverConfig,
    client: Client,
}

impl IdentityResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Dispatches to [Self::resolve_by_did] or [Self::resolve_by_handle]
    pub async fn resolve(&self, input: &IdentityInput) -> Result<Identity, ResolverError> {
        match input {
            IdentityInput::Did(did) => self.resolve_by_did(did).await,
            IdentityInput::Handle(handle) => self.resolve_by_handle(handle).await,
        }
    }

    /// Looks up the DID document in the PLC directory and returns the first
    /// `alsoKnownAs` entry (minus `at://`) as the handle.
    ///
    /// The DID itself is returned unchanged.
    pub async fn resolve_by_did(&self, did: &str) -> Result<Identity, ResolverError> {
        let _span = span!(Level::DEBUG, "resolve_by_did", DID = did);
        async move {
            let url = self.config.did_document_url(did);
            let (doc, body): (PlcDocument, String) = self.fetch_json(did, url).await?;

            let alias = doc
                .also_known_as
                .and_then(|aliases| aliases.into_iter().next())
                .ok_or_else(|| {
                    warn!("DID document has no alsoKnownAs entries");
                    ResolverError::MissingField {
                        target: did.to_string(),
                        field: "alsoKnownAs",
                        body,
                    }
                })?;

            let handle = alias
                .strip_prefix(AT_URI_PREFIX)
                .unwrap_or(&alias)
                .to_string();
            debug!("resolved handle ({handle})");

            Ok(Identity {
                handle,
                did: did.to_string(),
            })
        }
        .instrument(_span)
        .await
    }

    /// Resolves a handle to its DID via `com.atproto.identity.resolveHandle`.
    ///
    /// A handle without any `.` gets the default suffix appended first, so
    /// `alice` is looked up (and returned) as `alice.bsky.social`.
    pub async fn resolve_by_handle(&self, handle: &str) -> Result<Identity, ResolverError> {
        let handle = self.qualify_handle(handle);
        let _span = span!(Level::DEBUG, "resolve_by_handle", handle = handle.as_str());
        async move {
            let url = self.config.resolve_handle_url(&handle);
            let (output, body): (ResolveHandleOutput, String) =
                self.fetch_json(&handle, url).await?;

            let did = output.did.ok_or_else(|| {
                warn!("resolveHandle response has no did");
                ResolverError::MissingField {
                    target: handle.clone(),
                    field: "did",
                    body,
                }
            })?;
            debug!("resolved did ({did})");

            Ok(Identity { handle, did })
        }
        .instrument(_span)
        .await
    }

    /// Appends the configured default suffix to handles that have no domain part.
    pub fn qualify_handle(&self, handle: &str) -> String {
        if handle.contains('.') {
            handle.to_string()
        } else {
            format!("{handle}.{}", self.config.default_handle_suffix)
        }
    }

    /// GETs `url` and parses the body as `T`. Also hands back the raw body so
    /// missing-field errors can show what the service actually said.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        target: &str,
        url: Url,
    ) -> Result<(T, String), ResolverError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResolverError::request(target, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResolverError::request(target, e))?;

        if !status.is_success() {
            warn!("resolution service returned {status}");
            return Err(ResolverError::Status {
                target: target.to_string(),
                status,
                body: body.trim().to_string(),
            });
        }

        let parsed = serde_json::from_str(&body).map_err(|e| ResolverError::InvalidResponse {
            target: target.to_string(),
            reason: format!("Invalid JSON response: {e}"),
        })?;
        Ok((parsed, body))
    }
}
