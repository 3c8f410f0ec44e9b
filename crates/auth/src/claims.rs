//! Credential decoding.
//!
//! No signature verification happens here: the payload segment is read as-is
//! and is only trusted for cosmetic decisions (which menu to show, where to
//! land after login).

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use ems_core::Role;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Tokens issued by the API use base64url; hand-built ones often use the
/// standard alphabet. Both are accepted, padded or not.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Claims carried in the credential's payload segment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Claims {
    /// Role label as issued by the server (e.g. `"ADMIN"`).
    #[serde(default)]
    pub role: Option<String>,

    /// Every other claim (`sub`, `exp`, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Parsed role, if the label names a known one.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref()?.parse().ok()
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected 3 dot-separated segments, found {0}")]
    SegmentCount(usize),

    #[error("payload segment is not valid base64")]
    Base64,

    #[error("payload is not a JSON claims object: {0}")]
    Json(String),
}

/// Decode the claims of a `header.payload.signature` credential.
pub fn try_decode(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount(segments.len()));
    }

    let payload = segments[1];
    let bytes = URL_SAFE
        .decode(payload)
        .or_else(|_| STANDARD.decode(payload))
        .map_err(|_| DecodeError::Base64)?;

    serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json(e.to_string()))
}

/// Lenient variant: any failure degrades to "no claims known".
pub fn decode(token: Option<&str>) -> Option<Claims> {
    let token = token?;
    match try_decode(token) {
        Ok(claims) => Some(claims),
        Err(err) => {
            tracing::debug!(error = %err, "credential could not be decoded; role unknown");
            None
        }
    }
}
