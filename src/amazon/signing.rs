//! Query-string request signing for the Product Advertising API.
//!
//! The 2013-08-01 API authenticates every GET with an HMAC-SHA256 signature
//! over a canonical form of the request:
//!
//! 1. Add the authentication parameters and a UTC timestamp
//! 2. Sort parameters by byte order and percent-encode them (RFC 3986)
//! 3. Build the string to sign: `GET\n{host}\n/onca/xml\n{canonical query}`
//! 4. Append `Signature = base64(HMAC-SHA256(secret, string to sign))`

use crate::amazon::params::{Operation, Params};
use crate::error::{AmazonError, Result};
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::BTreeMap;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Service name sent with every request.
pub const SERVICE: &str = "AWSECommerceService";

/// API version the response paths are written against.
pub const API_VERSION: &str = "2013-08-01";

/// Request path on every regional endpoint.
pub const REQUEST_PATH: &str = "/onca/xml";

/// Keys the signer owns; caller values for these are replaced.
const RESERVED: [&str; 4] = ["AWSAccessKeyId", "Service", "Operation", "Timestamp"];

/// Associate credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub associate_tag: String,
}

impl Credentials {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        associate_tag: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            associate_tag: associate_tag.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("associate_tag", &self.associate_tag)
            .finish()
    }
}

/// Signs request parameters for one set of credentials.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn associate_tag(&self) -> &str {
        &self.credentials.associate_tag
    }

    /// Returns the full signed query string (without the leading `?`).
    pub fn signed_query(
        &self,
        host: &str,
        operation: Operation,
        params: &Params,
        timestamp: DateTime<Utc>,
    ) -> Result<String> {
        let canonical = self.canonical_query(operation, params, timestamp);
        let signature = self.sign(&string_to_sign(host, &canonical))?;
        Ok(format!("{}&Signature={}", canonical, urlencoding::encode(&signature)))
    }

    /// Builds the sorted, percent-encoded query that gets signed.
    pub fn canonical_query(
        &self,
        operation: Operation,
        params: &Params,
        timestamp: DateTime<Utc>,
    ) -> String {
        let mut all: BTreeMap<&str, String> = BTreeMap::new();
        all.insert("AssociateTag", self.credentials.associate_tag.clone());
        all.insert("Version", API_VERSION.to_string());

        for (key, value) in params.iter() {
            if !RESERVED.contains(&key) {
                all.insert(key, value.to_string());
            }
        }

        all.insert("AWSAccessKeyId", self.credentials.access_key.clone());
        all.insert("Service", SERVICE.to_string());
        all.insert("Operation", operation.as_str().to_string());
        all.insert("Timestamp", format_timestamp(timestamp));

        all.iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Base64 HMAC-SHA256 of `message` keyed with the secret key.
    pub fn sign(&self, message: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_key.as_bytes())
            .map_err(|e| AmazonError::Config(format!("invalid signing key: {}", e)))?;
        mac.update(message.as_bytes());
        Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `GET\n{host}\n/onca/xml\n{canonical}`.
pub fn string_to_sign(host: &str, canonical_query: &str) -> String {
    format!("GET\n{}\n{}\n{}", host.to_lowercase(), REQUEST_PATH, canonical_query)
}

/// Timestamp format accepted by the API (`2014-08-18T12:00:00Z`).
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
