// Licensed under the Apache-2.0 license

use crate::error::{BootResult, BootUtilError};
use crate::image::ImageHeader;
use crate::source::ImageSource;
use bootutil_config::DIGEST_LEN;
use sha2::{Digest as _, Sha256};

pub type Digest = [u8; DIGEST_LEN];

/// Hash the header region and body of an image.
///
/// The image is streamed through `scratch` one chunk at a time, so memory
/// use is bounded by the scratch buffer no matter how large the image is.
/// When `seed` is given it is hashed first; split images use this to fold
/// the loader's digest into the application's.
pub fn compute_digest(
    header: &ImageHeader,
    source: ImageSource<'_>,
    scratch: &mut [u8],
    seed: Option<&[u8]>,
) -> BootResult<Digest> {
    if scratch.is_empty() {
        return Err(BootUtilError::InvalidArgument);
    }

    let mut sha = Sha256::new();
    if let Some(seed) = seed {
        sha.update(seed);
    }

    let size = header.hashed_len()?;
    let mut off = 0;
    while off < size {
        let blk_sz = (size - off).min(scratch.len());
        let chunk = &mut scratch[..blk_sz];
        if let Err(err) = source.read(header, off, chunk) {
            log::error!("[bootutil] Image read failed at offset {:#x}", off);
            return Err(err);
        }
        sha.update(&*chunk);
        off += blk_sz;
    }

    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&sha.finalize());
    Ok(digest)
}

/// SHA-256 of an arbitrary byte string.
pub fn sha256(data: &[u8]) -> Digest {
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&Sha256::digest(data));
    digest
}
