// Licensed under the Apache-2.0 license

use crate::digest::Digest;
use crate::keys::KeyRef;

/// Errors reported by a signature verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigError {
    /// The trusted key could not be decoded.
    InvalidKey,
    /// The signature bytes are not well formed.
    InvalidSignature,
    /// The signature does not match the digest under this key.
    VerificationFailed,
}

/// Checks a signature over an image digest with one trusted key.
pub trait SignatureVerifier {
    fn verify(&self, digest: &Digest, signature: &[u8], key: KeyRef<'_>) -> Result<(), SigError>;
}

/// Verifier for builds that do not check signatures.
pub struct NoSignatures;

impl SignatureVerifier for NoSignatures {
    fn verify(&self, _digest: &Digest, _signature: &[u8], _key: KeyRef<'_>) -> Result<(), SigError> {
        Err(SigError::VerificationFailed)
    }
}
