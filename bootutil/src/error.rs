// Licensed under the Apache-2.0 license

use crate::flash::hil::FlashDrvError;
use core::fmt;

pub type BootResult<T> = Result<T, BootUtilError>;

/// Reasons an image is refused.
///
/// Every variant means "do not boot". Callers must not treat an unreadable
/// image as more trustworthy than a rejected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootUtilError {
    /// Storage read failed.
    Io(FlashDrvError),
    /// Image header magic does not match.
    BadHeaderMagic,
    /// Image header sizes are inconsistent.
    InvalidHeader,
    /// Caller supplied an unusable argument (e.g. an empty scratch buffer).
    InvalidArgument,
    /// Image source is not enabled in this configuration.
    UnsupportedSource,
    /// Trailer magic, bounds or entry lengths are invalid.
    MalformedTrailer,
    /// Trailer digest does not match the computed digest.
    DigestMismatch,
    /// Trailer carries no digest entry.
    MissingDigest,
    /// A signature is required but none verified.
    NoValidSignature,
}

impl From<FlashDrvError> for BootUtilError {
    fn from(err: FlashDrvError) -> Self {
        BootUtilError::Io(err)
    }
}

/// Non-zero status reported to callers that only understand integer codes.
impl From<BootUtilError> for u32 {
    fn from(err: BootUtilError) -> Self {
        match err {
            BootUtilError::Io(_) => 0x0001_0001,
            BootUtilError::BadHeaderMagic => 0x0001_0002,
            BootUtilError::InvalidHeader => 0x0001_0003,
            BootUtilError::InvalidArgument => 0x0001_0004,
            BootUtilError::UnsupportedSource => 0x0001_0005,
            BootUtilError::MalformedTrailer => 0x0001_0006,
            BootUtilError::DigestMismatch => 0x0001_0007,
            BootUtilError::MissingDigest => 0x0001_0008,
            BootUtilError::NoValidSignature => 0x0001_0009,
        }
    }
}

impl fmt::Display for BootUtilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootUtilError::Io(err) => write!(f, "flash read failed: {:?}", err),
            BootUtilError::BadHeaderMagic => write!(f, "bad image header magic"),
            BootUtilError::InvalidHeader => write!(f, "invalid image header"),
            BootUtilError::InvalidArgument => write!(f, "invalid argument"),
            BootUtilError::UnsupportedSource => write!(f, "image source not supported"),
            BootUtilError::MalformedTrailer => write!(f, "malformed image trailer"),
            BootUtilError::DigestMismatch => write!(f, "image digest mismatch"),
            BootUtilError::MissingDigest => write!(f, "image digest entry missing"),
            BootUtilError::NoValidSignature => write!(f, "no valid image signature"),
        }
    }
}
