// Licensed under the Apache-2.0 license

//! Build-independent configuration for the image validation core.
//!
//! Everything here is plain data resolved once at boot and handed to the
//! validator, so a single binary can describe which signature scheme it
//! trusts and where its images live.

#![no_std]

mod flash;
pub use flash::*;
mod verifier;
pub use verifier::*;

/// Default size of the scratch buffer used to stream an image into the hash.
pub const BOOT_TMPBUF_SZ: usize = 256;

/// Capacity of the buffer used to read trailer entry payloads. No single
/// trailer entry may declare a longer payload.
pub const TLV_BUF_SZ: usize = 256;

/// Size in bytes of the image digest (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// Longest key identifier accepted in a trailer; identifiers may be a
/// truncated prefix of the full key hash.
pub const MAX_KEYHASH_LEN: usize = DIGEST_LEN;
