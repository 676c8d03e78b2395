//! Classifies command line input as either a DID or a handle.

use std::{convert::Infallible, fmt, str::FromStr};

/// Prefix of the only DID method the PLC directory serves.
pub const DID_PLC_PREFIX: &str = "did:plc:";

/// What the user asked us to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityInput {
    /// A `did:plc:` identifier, looked up in the PLC directory
    Did(String),
    /// Anything else, looked up via `com.atproto.identity.resolveHandle`
    Handle(String),
}

impl IdentityInput {
    /// Pure prefix check, never fails. Input that isn't a `did:plc:` is treated
    /// as a handle and left for the handle service to reject.
    pub fn classify(input: &str) -> Self {
        if input.starts_with(DID_PLC_PREFIX) {
            IdentityInput::Did(input.to_string())
        } else {
            IdentityInput::Handle(input.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IdentityInput::Did(did) => did,
            IdentityInput::Handle(handle) => handle,
        }
    }
}

impl FromStr for IdentityInput {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(IdentityInput::classify(s))
    }
}

impl fmt::Display for IdentityInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
