// Licensed under the Apache-2.0 license

//! Storage interface consumed by the image validator.

/// Errors reported by a flash driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum FlashDrvError {
    /// Generic driver or media failure.
    FAIL,
    /// Requested range is outside the device or area.
    INVAL,
    /// Area does not fit on the device.
    SIZE,
}

/// Read-only byte-range access to a storage device.
///
/// The validator never writes or erases; retries, if any, belong to the
/// driver behind this trait.
pub trait FlashStorage {
    /// Fill `buffer` with the bytes starting at `address`.
    fn read(&self, buffer: &mut [u8], address: usize) -> Result<(), FlashDrvError>;

    /// Returns the size of the flash storage in bytes.
    fn capacity(&self) -> usize;
}
