// Licensed under the Apache-2.0 license

//! On-flash layout of a bootable image and its trailer.
//!
//! ```text
//! +---------------------+  offset 0
//! | ImageHeader         |  hdr_size bytes (>= 32, may be padded)
//! +---------------------+  offset hdr_size
//! | body                |  img_size bytes
//! +---------------------+  offset hdr_size + img_size
//! | TlvInfo             |  magic + total trailer length
//! | TlvEntry + payload  |  repeated until the declared total
//! +---------------------+
//! ```
//!
//! All fields are little-endian.

use crate::error::{BootResult, BootUtilError};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

pub const IMAGE_MAGIC: u32 = 0x96f3_b83d;
pub const IMAGE_HEADER_SIZE: usize = core::mem::size_of::<ImageHeader>();

pub const IMAGE_TLV_INFO_MAGIC: u16 = 0x6907;
pub const TLV_INFO_SIZE: usize = core::mem::size_of::<TlvInfo>();
pub const TLV_ENTRY_SIZE: usize = core::mem::size_of::<TlvEntry>();

/// Hash of the public key that signed the following signature entry.
pub const IMAGE_TLV_KEYHASH: u8 = 0x01;
/// SHA-256 of header and body.
pub const IMAGE_TLV_SHA256: u8 = 0x10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct ImageVersion {
    pub major: u8,
    pub minor: u8,
    pub revision: u16,
    pub build_num: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct ImageHeader {
    pub magic: u32,
    /// Address the image is copied to when loaded into RAM.
    pub load_addr: u32,
    /// Size of the header region, including any padding before the body.
    pub hdr_size: u16,
    pub _pad1: u16,
    /// Size of the body, excluding header and trailer.
    pub img_size: u32,
    pub flags: u32,
    pub ver: ImageVersion,
    pub _pad2: u32,
}

impl ImageHeader {
    /// Parse and sanity-check a header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> BootResult<Self> {
        let (header, _) =
            ImageHeader::read_from_prefix(bytes).map_err(|_| BootUtilError::InvalidHeader)?;
        header.check()?;
        Ok(header)
    }

    pub fn check(&self) -> BootResult<()> {
        let magic = self.magic;
        if magic != IMAGE_MAGIC {
            log::warn!("[bootutil] Bad image magic {:#010x}", magic);
            return Err(BootUtilError::BadHeaderMagic);
        }
        if usize::from(self.hdr_size) < IMAGE_HEADER_SIZE {
            return Err(BootUtilError::InvalidHeader);
        }
        Ok(())
    }

    /// Number of bytes covered by the image digest: header region plus body.
    pub fn hashed_len(&self) -> BootResult<usize> {
        usize::try_from(self.img_size)
            .ok()
            .and_then(|img| img.checked_add(usize::from(self.hdr_size)))
            .ok_or(BootUtilError::InvalidHeader)
    }

    /// Offset of the trailer, relative to the start of the image.
    pub fn trailer_offset(&self) -> BootResult<usize> {
        self.hashed_len()
    }
}

/// Fixed record at the start of the trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct TlvInfo {
    pub magic: u16,
    /// Length of the whole trailer, this record included.
    pub tlv_tot: u16,
}

impl TlvInfo {
    pub fn new(tlv_tot: u16) -> Self {
        TlvInfo {
            magic: IMAGE_TLV_INFO_MAGIC,
            tlv_tot,
        }
    }

    pub fn is_valid(&self) -> bool {
        let magic = self.magic;
        magic == IMAGE_TLV_INFO_MAGIC
    }
}

/// Type/length prefix of a trailer entry. `len` payload bytes follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct TlvEntry {
    pub it_type: u8,
    pub _pad: u8,
    pub len: u16,
}

impl TlvEntry {
    pub fn new(it_type: u8, len: u16) -> Self {
        TlvEntry {
            it_type,
            _pad: 0,
            len,
        }
    }
}
