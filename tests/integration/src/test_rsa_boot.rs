// Licensed under the Apache-2.0 license

#[cfg(test)]
mod test {
    use crate::test::{init_logging, keys, sign_image, test_body};
    use bootutil::testing::{BuiltImage, ImageBuilder, TrailerBuilder};
    use bootutil::{
        BootResult, BootUtilError, Digest, FlashStorage, ImageSource, ImageValidator, KeyTable,
        RsaPssVerifier, SignatureScheme, VerifierConfig,
    };
    use bootutil::flash::SimpleFlash;
    use bootutil_config::{BOOT_TMPBUF_SZ, TLV_TYPE_RSA2048_PSS};

    fn validate(image: &BuiltImage) -> BootResult<Digest> {
        let [a, b] = keys();
        let trusted = [a.boot_key(), b.boot_key()];
        let validator = ImageValidator::new(
            VerifierConfig::with_signature(SignatureScheme::Rsa2048Pss),
            KeyTable::new(&trusted),
            &RsaPssVerifier,
        );
        let flash = SimpleFlash::new(&image.bytes);
        let storage: &dyn FlashStorage = &flash;
        let mut scratch = [0u8; BOOT_TMPBUF_SZ];
        validator.validate(&image.header, ImageSource::Flash(storage), &mut scratch, None)
    }

    #[test]
    fn test_signed_image_boots() {
        init_logging();
        let [a, b] = keys();
        for key in [a, b] {
            let image = sign_image(ImageBuilder::new(test_body(4096)), key, key);
            assert_eq!(validate(&image), Ok(image.digest));
        }
    }

    #[test]
    fn test_signature_from_wrong_key_rejected() {
        init_logging();
        let [a, b] = keys();
        let image = sign_image(ImageBuilder::new(test_body(4096)), a, b);
        assert_eq!(validate(&image), Err(BootUtilError::NoValidSignature));
    }

    #[test]
    fn test_second_signature_rescues_image() {
        init_logging();
        let [a, b] = keys();
        let image = ImageBuilder::new(test_body(3000)).build_with(|digest| {
            TrailerBuilder::new()
                .digest(digest)
                .keyhash(&a.keyhash())
                .signature(TLV_TYPE_RSA2048_PSS, &b.sign(digest))
                .keyhash(&b.keyhash())
                .signature(TLV_TYPE_RSA2048_PSS, &b.sign(digest))
        });
        assert_eq!(validate(&image), Ok(image.digest));
    }

    #[test]
    fn test_tampered_body_rejected() {
        init_logging();
        let [a, _] = keys();
        let image = sign_image(ImageBuilder::new(test_body(2048)), a, a);
        let mut tampered = image.clone();
        let last_body_byte = image.hashed_bytes().len() - 1;
        tampered.bytes[last_body_byte] ^= 0x80;
        assert_eq!(validate(&tampered), Err(BootUtilError::DigestMismatch));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        init_logging();
        let [a, _] = keys();
        let mut image = sign_image(ImageBuilder::new(test_body(2048)), a, a);
        let last = image.bytes.len() - 1;
        image.bytes[last] ^= 0x01;
        assert_eq!(validate(&image), Err(BootUtilError::NoValidSignature));
    }

    #[test]
    fn test_signature_over_other_image_rejected() {
        init_logging();
        let [a, _] = keys();
        let other = sign_image(ImageBuilder::new(test_body(100)), a, a);
        let image = ImageBuilder::new(test_body(200)).build_with(|digest| {
            TrailerBuilder::new()
                .digest(digest)
                .keyhash(&a.keyhash())
                .signature(TLV_TYPE_RSA2048_PSS, &a.sign(&other.digest))
        });
        assert_eq!(validate(&image), Err(BootUtilError::NoValidSignature));
    }
}
