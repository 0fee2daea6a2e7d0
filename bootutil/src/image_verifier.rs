// Licensed under the Apache-2.0 license

use crate::digest::{compute_digest, Digest};
use crate::error::{BootResult, BootUtilError};
use crate::image::ImageHeader;
use crate::keys::KeyTable;
use crate::ram::RamImage;
use crate::signature::SignatureVerifier;
use crate::source::ImageSource;
use crate::tlv::{walk_trailer, SignatureAuth};
use bootutil_config::{VerifierConfig, BOOT_TMPBUF_SZ};

/// Verifies the integrity and authenticity of an image.
///
/// Parameters:
///   header:  Parsed image header
///   source:  Where the image bytes are read from
///   scratch: Buffer the image is streamed through while hashing
///   seed:    Optional bytes hashed ahead of the image
///
/// Returns:
///   The image digest if every required check passes.
///   An error on any structural, policy, storage or cryptographic failure.
pub trait ImageVerifier {
    fn verify_image(
        &self,
        header: &ImageHeader,
        source: ImageSource<'_>,
        scratch: &mut [u8],
        seed: Option<&[u8]>,
    ) -> BootResult<Digest>;
}

/// Accept/reject policy for images, built once at boot from the stage's
/// configuration and trusted keys.
pub struct ImageValidator<'a> {
    config: VerifierConfig,
    keys: KeyTable<'a>,
    verifier: &'a dyn SignatureVerifier,
}

impl<'a> ImageValidator<'a> {
    pub fn new(
        config: VerifierConfig,
        keys: KeyTable<'a>,
        verifier: &'a dyn SignatureVerifier,
    ) -> Self {
        ImageValidator {
            config,
            keys,
            verifier,
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    fn auth(&self) -> Option<SignatureAuth<'a>> {
        self.config.signature.map(|scheme| SignatureAuth {
            scheme,
            keys: self.keys,
            verifier: self.verifier,
        })
    }

    /// Hash the image, walk its trailer and decide.
    ///
    /// The image is accepted only if its trailer carries a digest entry equal
    /// to the computed digest and, when this stage requires signatures, at
    /// least one signature from a trusted key verifies.
    pub fn validate(
        &self,
        header: &ImageHeader,
        source: ImageSource<'_>,
        scratch: &mut [u8],
        seed: Option<&[u8]>,
    ) -> BootResult<Digest> {
        if source.is_ram() && !self.config.ram_loading {
            log::warn!("[bootutil] RAM-resident images are not enabled");
            return Err(BootUtilError::UnsupportedSource);
        }
        header.check()?;

        let digest = compute_digest(header, source, scratch, seed)?;
        let verdict = walk_trailer(
            source,
            header,
            header.trailer_offset()?,
            &digest,
            self.auth(),
        )
        .inspect_err(|err| log::warn!("[bootutil] Image rejected: {}", err))?;

        if !verdict.digest_confirmed {
            log::warn!("[bootutil] Image rejected: no digest entry");
            return Err(BootUtilError::MissingDigest);
        }
        if self.config.requires_signature() && !verdict.signature_confirmed {
            log::warn!("[bootutil] Image rejected: no valid signature");
            return Err(BootUtilError::NoValidSignature);
        }

        log::info!("[bootutil] Image validated");
        Ok(digest)
    }

    /// Integer form of [`Self::validate`]: 0 when the image may boot,
    /// non-zero otherwise. The digest is written to `out_digest` only when
    /// the image is accepted.
    pub fn validate_status(
        &self,
        header: &ImageHeader,
        source: ImageSource<'_>,
        scratch: &mut [u8],
        seed: Option<&[u8]>,
        out_digest: Option<&mut Digest>,
    ) -> u32 {
        match self.validate(header, source, scratch, seed) {
            Ok(digest) => {
                if let Some(out) = out_digest {
                    *out = digest;
                }
                0
            }
            Err(err) => err.into(),
        }
    }

    /// Re-check the digest of an image after it has been copied to RAM.
    ///
    /// Only the digest entry is required; signatures were checked before the
    /// copy.
    pub fn check_hash_after_loading(
        &self,
        header: &ImageHeader,
        ram: &RamImage<'_>,
    ) -> BootResult<Digest> {
        if !self.config.ram_loading {
            return Err(BootUtilError::UnsupportedSource);
        }
        header.check()?;

        let source = ImageSource::Ram(ram);
        let mut scratch = [0u8; BOOT_TMPBUF_SZ];
        let digest = compute_digest(header, source, &mut scratch, None)?;
        let verdict = walk_trailer(source, header, header.trailer_offset()?, &digest, None)?;
        if !verdict.digest_confirmed {
            return Err(BootUtilError::MissingDigest);
        }
        Ok(digest)
    }
}

impl ImageVerifier for ImageValidator<'_> {
    fn verify_image(
        &self,
        header: &ImageHeader,
        source: ImageSource<'_>,
        scratch: &mut [u8],
        seed: Option<&[u8]>,
    ) -> BootResult<Digest> {
        self.validate(header, source, scratch, seed)
    }
}
