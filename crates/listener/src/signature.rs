//! Webhook delivery signature verification.
//!
//! GitHub signs every delivery body with HMAC-SHA256 over the webhook secret
//! and sends the result as `X-Hub-Signature-256: sha256=<hex>`. The MAC
//! comparison is constant-time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Why a delivery was rejected before processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The `X-Hub-Signature-256` header is missing.
    #[error("missing delivery signature header")]
    Missing,

    /// The header is present but not `sha256=<hex>`.
    #[error("malformed delivery signature header")]
    Malformed,

    /// The MAC does not match the body.
    #[error("delivery signature mismatch")]
    Mismatch,
}

/// Verifies `header` against `body` using the configured webhook secret.
pub fn verify(
    secret: &SecretString,
    body: &[u8],
    header: Option<&str>,
) -> Result<(), SignatureError> {
    let header = header.ok_or(SignatureError::Missing)?;
    let encoded = header
        .strip_prefix("sha256=")
        .ok_or(SignatureError::Malformed)?;
    let expected = hex::decode(encoded).map_err(|_| SignatureError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| SignatureError::Malformed)?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| SignatureError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("It's a Secret to Everybody")
    }

    // Known vector from the GitHub webhook documentation.
    const BODY: &[u8] = b"Hello, World!";
    const SIGNATURE: &str =
        "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";

    #[test]
    fn documented_vector_verifies() {
        assert_eq!(verify(&secret(), BODY, Some(SIGNATURE)), Ok(()));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(verify(&secret(), BODY, None), Err(SignatureError::Missing));
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let header = SIGNATURE.replacen("sha256=", "sha1=", 1);
        assert_eq!(
            verify(&secret(), BODY, Some(&header)),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn non_hex_payload_is_rejected() {
        assert_eq!(
            verify(&secret(), BODY, Some("sha256=not-hex")),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn tampered_body_is_rejected() {
        assert_eq!(
            verify(&secret(), b"Hello, World?", Some(SIGNATURE)),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        assert_eq!(
            verify(&SecretString::from("different"), BODY, Some(SIGNATURE)),
            Err(SignatureError::Mismatch)
        );
    }
}
