// Licensed under the Apache-2.0 license

#[cfg(test)]
mod test {
    use crate::test::{init_logging, keys, sign_image, test_body};
    use bootutil::flash::{FlashArea, SimpleFlash};
    use bootutil::testing::ImageBuilder;
    use bootutil::{
        BootUtilError, FlashDrvError, FlashStorage, ImageHeader, ImageSource, ImageValidator,
        KeyTable, RsaPssVerifier, SignatureScheme, VerifierConfig, IMAGE_HEADER_SIZE,
    };
    use bootutil_config::{FlashDeviceConfig, FlashPartition, BOOT_TMPBUF_SZ};

    static PRIMARY: FlashPartition = FlashPartition {
        name: "image-0",
        id: 1,
        offset: 0x1000,
        size: 0x4000,
    };
    static SECONDARY: FlashPartition = FlashPartition {
        name: "image-1",
        id: 2,
        offset: 0x5000,
        size: 0x4000,
    };
    static DEVICE: FlashDeviceConfig = FlashDeviceConfig {
        partitions: &[&PRIMARY, &SECONDARY],
    };

    fn read_header(area: &dyn FlashStorage) -> ImageHeader {
        let mut bytes = [0u8; IMAGE_HEADER_SIZE];
        area.read(&mut bytes, 0).unwrap();
        ImageHeader::parse(&bytes).unwrap()
    }

    #[test]
    fn test_boot_from_partition() {
        init_logging();
        let [a, b] = keys();
        let trusted = [a.boot_key(), b.boot_key()];
        let validator = ImageValidator::new(
            VerifierConfig::with_signature(SignatureScheme::Rsa2048Pss),
            KeyTable::new(&trusted),
            &RsaPssVerifier,
        );

        let primary = sign_image(ImageBuilder::new(test_body(6000)).header_size(0x200), b, b);
        let secondary = sign_image(ImageBuilder::new(test_body(3000)).version(2, 1), a, b);

        let mut device = vec![0xffu8; 0x9000];
        device[PRIMARY.offset..PRIMARY.offset + primary.bytes.len()]
            .copy_from_slice(&primary.bytes);
        device[SECONDARY.offset..SECONDARY.offset + secondary.bytes.len()]
            .copy_from_slice(&secondary.bytes);
        let flash = SimpleFlash::new(&device);
        let mut scratch = [0u8; BOOT_TMPBUF_SZ];

        let slot = DEVICE.partition_by_name("image-0").unwrap();
        let area = FlashArea::open(slot, &flash).unwrap();
        let header = read_header(&area);
        assert_eq!({ header.hdr_size }, 0x200);
        assert_eq!(
            validator.validate(&header, ImageSource::Flash(&area), &mut scratch, None),
            Ok(primary.digest)
        );

        // Signed by key b but announcing key a.
        let slot = DEVICE.partition(2).unwrap();
        let area = FlashArea::open(slot, &flash).unwrap();
        let header = read_header(&area);
        assert_eq!(header.ver.major, 2);
        assert_eq!(
            validator.validate(&header, ImageSource::Flash(&area), &mut scratch, None),
            Err(BootUtilError::NoValidSignature)
        );
    }

    #[test]
    fn test_image_overrunning_partition() {
        init_logging();
        static SMALL: FlashPartition = FlashPartition {
            name: "small",
            id: 3,
            offset: 0,
            size: 0x400,
        };
        let image = ImageBuilder::new(test_body(0x800)).build_unsigned();
        let flash = SimpleFlash::new(&image.bytes);
        let area = FlashArea::open(&SMALL, &flash).unwrap();
        let header = read_header(&area);
        let validator = ImageValidator::new(
            VerifierConfig::digest_only(),
            KeyTable::empty(),
            &RsaPssVerifier,
        );
        let mut scratch = [0u8; BOOT_TMPBUF_SZ];
        assert_eq!(
            validator.validate(&header, ImageSource::Flash(&area), &mut scratch, None),
            Err(BootUtilError::Io(FlashDrvError::INVAL))
        );
    }
}
