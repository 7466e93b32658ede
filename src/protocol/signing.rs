/*!
 * Request signing.
 *
 * Authenticated calls carry the public key, a Unix timestamp and an
 * HMAC-SHA1 of that timestamp keyed with the private key, rendered as
 * lowercase hex.
 */

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::errors::GengoError;
use crate::protocol::query::QueryParams;

type HmacSha1 = Hmac<Sha1>;

/// Query/form parameter carrying the public key
pub const PARAM_API_KEY: &str = "api_key";
/// Query/form parameter carrying the request timestamp
pub const PARAM_TIMESTAMP: &str = "ts";
/// Query/form parameter carrying the signature
pub const PARAM_SIGNATURE: &str = "api_sig";

/// Computes request signatures from a private key
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha1,
}

impl Signer {
    /// Create a signer, rejecting a blank private key
    pub fn new(private_key: &str) -> Result<Self, GengoError> {
        if private_key.trim().is_empty() {
            return Err(GengoError::validation("Private key not specified"));
        }

        let mac = HmacSha1::new_from_slice(private_key.as_bytes())
            .map_err(|e| GengoError::validation(format!("Unusable private key: {}", e)))?;

        Ok(Self { mac })
    }

    /// Signature for a Unix timestamp in seconds
    pub fn sign(&self, timestamp: i64) -> String {
        self.digest(timestamp.to_string().as_bytes())
    }

    pub(crate) fn digest(&self, message: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(message);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

/// Seconds since the Unix epoch
pub fn unix_timestamp(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Public key plus signer, used to add auth parameters to a request
#[derive(Debug, Clone)]
pub struct Credentials {
    public_key: String,
    signer: Signer,
}

impl Credentials {
    /// Create credentials from a key pair; both keys must be non-blank
    pub fn new(public_key: &str, private_key: &str) -> Result<Self, GengoError> {
        if public_key.trim().is_empty() {
            return Err(GengoError::validation("Public key not specified"));
        }

        Ok(Self {
            public_key: public_key.to_string(),
            signer: Signer::new(private_key)?,
        })
    }

    /// The public API key
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Add auth parameters stamped with the current time
    pub fn apply(&self, params: &mut QueryParams, authenticated: bool) {
        self.apply_at(params, authenticated, Utc::now());
    }

    /// Add auth parameters stamped with `now`
    ///
    /// `api_key` is always set; `ts` and `api_sig` only when `authenticated`.
    pub fn apply_at(&self, params: &mut QueryParams, authenticated: bool, now: DateTime<Utc>) {
        params.insert(PARAM_API_KEY, self.public_key.clone());

        if authenticated {
            let ts = unix_timestamp(now);
            params.insert(PARAM_TIMESTAMP, ts.to_string());
            params.insert(PARAM_SIGNATURE, self.signer.sign(ts));
        }
    }
}
