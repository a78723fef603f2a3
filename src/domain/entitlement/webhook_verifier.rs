//! Razorpay webhook signature verification.
//!
//! Razorpay signs every webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the webhook secret configured in its dashboard, and sends the
//! lowercase hex digest in the `X-Razorpay-Signature` header.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for Razorpay webhook signatures.
pub struct WebhookVerifier {
    /// The webhook secret from the Razorpay dashboard.
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verifies the signature header against the raw body.
    ///
    /// A missing header is a verification failure, not an error.
    pub fn verify(&self, payload: &[u8], signature_header: Option<&str>) -> bool {
        match signature_header {
            Some(signature) => verify_signature(
                payload,
                signature,
                self.secret.expose_secret().as_bytes(),
            ),
            None => false,
        }
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Verifies that `signature_header` is the lowercase hex HMAC-SHA256 of
/// `payload` under `secret`.
///
/// `payload` must be the exact bytes received. Returns false for an empty
/// header. The comparison runs in constant time.
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    if signature_header.is_empty() {
        return false;
    }

    let Some(expected) = compute_signature(payload, secret) else {
        return false;
    };

    constant_time_compare(expected.as_bytes(), signature_header.as_bytes())
}

/// Computes the signature header value Razorpay would send for `payload`.
///
/// Used to build signed fixtures and for local replay tooling.
pub fn sign_payload(payload: &[u8], secret: &[u8]) -> String {
    compute_signature(payload, secret).unwrap_or_default()
}

fn compute_signature(payload: &[u8], secret: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Performs constant-time comparison of two byte slices.
///
/// Only the length check short-circuits; a digest's length is public.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "rzp_webhook_test_secret";

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(SecretString::new(TEST_SECRET.to_string()))
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let payload = br#"{"event":"payment.captured","payload":{"payment":{"entity":{"notes":{"user_id":"u1"}}}}}"#;
        let signature = sign_payload(payload, TEST_SECRET.as_bytes());

        assert!(verifier().verify(payload, Some(&signature)));
    }

    #[test]
    fn signature_is_lowercase_hex_sha256() {
        let signature = sign_payload(b"{}", TEST_SECRET.as_bytes());

        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn known_vector_matches() {
        // RFC 4231 test case 2
        let signature = sign_payload(b"what do ya want for nothing?", b"Jefe");
        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn verify_missing_header_fails() {
        assert!(!verifier().verify(b"{}", None));
    }

    #[test]
    fn verify_empty_header_fails() {
        assert!(!verifier().verify(b"{}", Some("")));
        assert!(!verify_signature(b"", "", TEST_SECRET.as_bytes()));
    }

    #[test]
    fn verify_uppercase_hex_fails() {
        let payload = b"{\"a\":1}";
        let signature = sign_payload(payload, TEST_SECRET.as_bytes()).to_uppercase();

        assert!(!verifier().verify(payload, Some(&signature)));
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let payload = b"{\"a\":1}";
        let signature = sign_payload(payload, b"wrong_secret");

        assert!(!verifier().verify(payload, Some(&signature)));
    }

    #[test]
    fn verify_reserialized_payload_fails() {
        let wire = br#"{"b": 1, "a": 2}"#;
        let signature = sign_payload(wire, TEST_SECRET.as_bytes());

        let value: serde_json::Value = serde_json::from_slice(wire).unwrap();
        let reserialized = serde_json::to_vec(&value).unwrap();

        assert!(verifier().verify(wire, Some(&signature)));
        assert!(!verifier().verify(&reserialized, Some(&signature)));
    }

    #[test]
    fn verify_truncated_signature_fails() {
        let payload = b"{}";
        let signature = sign_payload(payload, TEST_SECRET.as_bytes());

        assert!(!verifier().verify(payload, Some(&signature[..63])));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let output = format!("{:?}", verifier());
        assert!(!output.contains(TEST_SECRET));
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn signed_payload_always_verifies(
            body in proptest::collection::vec(any::<u8>(), 0..512),
            secret in proptest::collection::vec(any::<u8>(), 1..64),
        ) {
            let signature = sign_payload(&body, &secret);
            prop_assert!(verify_signature(&body, &signature, &secret));
        }

        #[test]
        fn single_bit_flip_in_body_fails(
            body in proptest::collection::vec(any::<u8>(), 1..512),
            secret in proptest::collection::vec(any::<u8>(), 1..64),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let signature = sign_payload(&body, &secret);
            let mut mutated = body.clone();
            let i = index.index(mutated.len());
            mutated[i] ^= 1 << bit;

            prop_assert!(!verify_signature(&mutated, &signature, &secret));
        }

        #[test]
        fn single_bit_flip_in_signature_fails(
            body in proptest::collection::vec(any::<u8>(), 0..512),
            secret in proptest::collection::vec(any::<u8>(), 1..64),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let signature = sign_payload(&body, &secret);
            let mut mutated = signature.clone().into_bytes();
            let i = index.index(mutated.len());
            mutated[i] ^= 1 << bit;
            let mutated = String::from_utf8_lossy(&mutated).into_owned();

            prop_assert!(!verify_signature(&body, &mutated, &secret));
        }
    }
}
