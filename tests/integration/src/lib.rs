// Licensed under the Apache-2.0 license

mod test_flash_area;
mod test_rsa_boot;

#[cfg(test)]
mod test {
    use bootutil::testing::{BuiltImage, ImageBuilder, TrailerBuilder};
    use bootutil::{sha256, BootKey, Digest};
    use bootutil_config::TLV_TYPE_RSA2048_PSS;
    use log::LevelFilter;
    use rsa::pkcs1::EncodeRsaPublicKey;
    use rsa::pss::BlindedSigningKey;
    use rsa::signature::hazmat::RandomizedPrehashSigner;
    use rsa::signature::SignatureEncoding;
    use rsa::{RsaPrivateKey, RsaPublicKey};
    use sha2::Sha256;
    use simple_logger::SimpleLogger;
    use std::sync::OnceLock;

    /// A signing key together with the serialized public key the device trusts.
    pub struct TestKey {
        private: RsaPrivateKey,
        pub public_der: Vec<u8>,
    }

    impl TestKey {
        fn generate() -> Self {
            let private =
                RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("Failed to generate key");
            let public_der = RsaPublicKey::from(&private)
                .to_pkcs1_der()
                .expect("Failed to encode public key")
                .as_bytes()
                .to_vec();
            TestKey {
                private,
                public_der,
            }
        }

        pub fn keyhash(&self) -> Digest {
            sha256(&self.public_der)
        }

        pub fn boot_key(&self) -> BootKey<'_> {
            BootKey::new(&self.public_der)
        }

        pub fn sign(&self, digest: &Digest) -> Vec<u8> {
            BlindedSigningKey::<Sha256>::new(self.private.clone())
                .sign_prehash_with_rng(&mut rand::thread_rng(), digest)
                .expect("Failed to sign digest")
                .to_vec()
        }
    }

    /// Key generation is slow, so every test shares the same pair.
    pub fn keys() -> &'static [TestKey; 2] {
        static KEYS: OnceLock<[TestKey; 2]> = OnceLock::new();
        KEYS.get_or_init(|| [TestKey::generate(), TestKey::generate()])
    }

    pub fn init_logging() {
        // Several tests race to install the logger; only the first wins.
        let _ = SimpleLogger::new().with_level(LevelFilter::Debug).init();
    }

    pub fn test_body(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    /// Build an image signed by `signer`, announcing `named` in the key hash entry.
    pub fn sign_image(builder: ImageBuilder, named: &TestKey, signer: &TestKey) -> BuiltImage {
        builder.build_with(|digest| {
            TrailerBuilder::new()
                .digest(digest)
                .keyhash(&named.keyhash())
                .signature(TLV_TYPE_RSA2048_PSS, &signer.sign(digest))
        })
    }
}
