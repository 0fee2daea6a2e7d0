// Licensed under the Apache-2.0 license

/// Trailer entry tag carrying an RSA-2048 PSS signature.
pub const TLV_TYPE_RSA2048_PSS: u8 = 0x20;
/// Trailer entry tag carrying a DER-encoded ECDSA P-256 signature.
pub const TLV_TYPE_ECDSA256: u8 = 0x22;

const RSA2048_SIG_LEN: usize = 256;
// r and s are 32 bytes each; DER framing adds up to 8 more.
const ECDSA256_SIG_MIN_LEN: usize = 64;
const ECDSA256_SIG_MAX_LEN: usize = 72;

/// Signature algorithms the validator knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    Rsa2048Pss,
    EcdsaP256,
}

impl SignatureScheme {
    /// Trailer entry tag used for signatures of this scheme.
    pub const fn tlv_type(&self) -> u8 {
        match self {
            SignatureScheme::Rsa2048Pss => TLV_TYPE_RSA2048_PSS,
            SignatureScheme::EcdsaP256 => TLV_TYPE_ECDSA256,
        }
    }

    /// Whether a signature payload of `len` bytes is plausible for this scheme.
    pub const fn accepts_len(&self, len: usize) -> bool {
        match self {
            SignatureScheme::Rsa2048Pss => len == RSA2048_SIG_LEN,
            SignatureScheme::EcdsaP256 => {
                len >= ECDSA256_SIG_MIN_LEN && len <= ECDSA256_SIG_MAX_LEN
            }
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            SignatureScheme::Rsa2048Pss => "rsa2048-pss",
            SignatureScheme::EcdsaP256 => "ecdsa-p256",
        }
    }
}

/// Capabilities of this boot stage, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerifierConfig {
    /// Signature scheme images must be signed with. `None` means only the
    /// digest entry is checked.
    pub signature: Option<SignatureScheme>,
    /// Whether images may be validated after being copied to RAM.
    pub ram_loading: bool,
}

impl VerifierConfig {
    pub const fn digest_only() -> Self {
        VerifierConfig {
            signature: None,
            ram_loading: false,
        }
    }

    pub const fn with_signature(scheme: SignatureScheme) -> Self {
        VerifierConfig {
            signature: Some(scheme),
            ram_loading: false,
        }
    }

    pub const fn with_ram_loading(mut self) -> Self {
        self.ram_loading = true;
        self
    }

    pub const fn requires_signature(&self) -> bool {
        self.signature.is_some()
    }
}
