// Licensed under the Apache-2.0 license

//! Builders for test images and trailers.

use crate::digest::{sha256, Digest};
use crate::image::{
    ImageHeader, TlvEntry, TlvInfo, IMAGE_HEADER_SIZE, IMAGE_MAGIC, IMAGE_TLV_INFO_MAGIC,
    IMAGE_TLV_KEYHASH, IMAGE_TLV_SHA256, TLV_INFO_SIZE,
};
use alloc::vec::Vec;
use zerocopy::IntoBytes;

/// Trailer under construction. Entries are emitted in the order they are added.
#[derive(Debug, Clone)]
pub struct TrailerBuilder {
    magic: u16,
    total_len: Option<u16>,
    entries: Vec<u8>,
}

impl Default for TrailerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailerBuilder {
    pub fn new() -> Self {
        TrailerBuilder {
            magic: IMAGE_TLV_INFO_MAGIC,
            total_len: None,
            entries: Vec::new(),
        }
    }

    /// Override the info block magic.
    pub fn magic(mut self, magic: u16) -> Self {
        self.magic = magic;
        self
    }

    /// Override the declared trailer length instead of deriving it.
    pub fn total_len(mut self, total_len: u16) -> Self {
        self.total_len = Some(total_len);
        self
    }

    /// Append a well-formed entry.
    pub fn entry(self, it_type: u8, payload: &[u8]) -> Self {
        self.raw_entry(it_type, payload.len() as u16, payload)
    }

    /// Append an entry whose declared length need not match its payload.
    pub fn raw_entry(mut self, it_type: u8, len: u16, payload: &[u8]) -> Self {
        self.entries
            .extend_from_slice(TlvEntry::new(it_type, len).as_bytes());
        self.entries.extend_from_slice(payload);
        self
    }

    /// Append bytes that do not form an entry.
    pub fn padding(mut self, len: usize) -> Self {
        self.entries.resize(self.entries.len() + len, 0);
        self
    }

    pub fn digest(self, digest: &Digest) -> Self {
        self.entry(IMAGE_TLV_SHA256, digest)
    }

    pub fn keyhash(self, keyhash: &[u8]) -> Self {
        self.entry(IMAGE_TLV_KEYHASH, keyhash)
    }

    pub fn signature(self, it_type: u8, signature: &[u8]) -> Self {
        self.entry(it_type, signature)
    }

    pub fn build(&self) -> Vec<u8> {
        let total_len = self
            .total_len
            .unwrap_or((TLV_INFO_SIZE + self.entries.len()) as u16);
        let info = TlvInfo {
            magic: self.magic,
            tlv_tot: total_len,
        };
        let mut out = info.as_bytes().to_vec();
        out.extend_from_slice(&self.entries);
        out
    }
}

/// A complete image: header region, body and trailer.
#[derive(Debug, Clone)]
pub struct BuiltImage {
    pub header: ImageHeader,
    pub bytes: Vec<u8>,
    /// Unseeded digest of header region and body.
    pub digest: Digest,
}

impl BuiltImage {
    /// The bytes covered by the image digest.
    pub fn hashed_bytes(&self) -> &[u8] {
        let len = usize::from(self.header.hdr_size) + self.header.img_size as usize;
        &self.bytes[..len]
    }

    /// Digest of `seed` followed by the hashed bytes.
    pub fn seeded_digest(&self, seed: &[u8]) -> Digest {
        let mut data = seed.to_vec();
        data.extend_from_slice(self.hashed_bytes());
        sha256(&data)
    }
}

pub struct ImageBuilder {
    body: Vec<u8>,
    hdr_size: u16,
    load_addr: u32,
    version: (u8, u8),
}

impl ImageBuilder {
    pub fn new(body: Vec<u8>) -> Self {
        ImageBuilder {
            body,
            hdr_size: IMAGE_HEADER_SIZE as u16,
            load_addr: 0,
            version: (1, 0),
        }
    }

    /// Size of the header region; the gap after the header is zero filled.
    pub fn header_size(mut self, hdr_size: u16) -> Self {
        self.hdr_size = hdr_size;
        self
    }

    pub fn load_addr(mut self, load_addr: u32) -> Self {
        self.load_addr = load_addr;
        self
    }

    pub fn version(mut self, major: u8, minor: u8) -> Self {
        self.version = (major, minor);
        self
    }

    pub fn header(&self) -> ImageHeader {
        let mut header = ImageHeader {
            magic: IMAGE_MAGIC,
            load_addr: self.load_addr,
            hdr_size: self.hdr_size,
            img_size: self.body.len() as u32,
            ..Default::default()
        };
        header.ver.major = self.version.0;
        header.ver.minor = self.version.1;
        header
    }

    fn hashed_bytes(&self) -> Vec<u8> {
        let header = self.header();
        let mut bytes = header.as_bytes().to_vec();
        bytes.resize(usize::from(self.hdr_size).max(IMAGE_HEADER_SIZE), 0);
        bytes.extend_from_slice(&self.body);
        bytes
    }

    /// Build an image with a trailer produced from the image's digest.
    pub fn build_with(self, trailer: impl FnOnce(&Digest) -> TrailerBuilder) -> BuiltImage {
        let mut bytes = self.hashed_bytes();
        let digest = sha256(&bytes);
        bytes.extend_from_slice(&trailer(&digest).build());
        BuiltImage {
            header: self.header(),
            bytes,
            digest,
        }
    }

    /// Build an image whose trailer holds only the digest entry.
    pub fn build_unsigned(self) -> BuiltImage {
        self.build_with(|digest| TrailerBuilder::new().digest(digest))
    }
}
