// Licensed under the Apache-2.0 license

//! RSA-2048 PSS signature check backed by RustCrypto.

use crate::digest::Digest;
use crate::keys::KeyRef;
use crate::signature::{SigError, SignatureVerifier};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pss::{Signature, VerifyingKey};
use rsa::signature::hazmat::PrehashVerifier;
use rsa::RsaPublicKey;
use sha2::Sha256;

/// Verifies PSS/SHA-256 signatures with trusted keys stored as PKCS#1
/// DER `RSAPublicKey` structures, which is also the form the key hash is
/// computed over.
#[derive(Debug, Default, Clone, Copy)]
pub struct RsaPssVerifier;

impl SignatureVerifier for RsaPssVerifier {
    fn verify(&self, digest: &Digest, signature: &[u8], key: KeyRef<'_>) -> Result<(), SigError> {
        let public_key =
            RsaPublicKey::from_pkcs1_der(key.bytes).map_err(|_| SigError::InvalidKey)?;
        let signature = Signature::try_from(signature).map_err(|_| SigError::InvalidSignature)?;
        VerifyingKey::<Sha256>::new(public_key)
            .verify_prehash(digest, &signature)
            .map_err(|_| SigError::VerificationFailed)
    }
}
