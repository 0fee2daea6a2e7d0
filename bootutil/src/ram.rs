// Licensed under the Apache-2.0 license

//! Bounds-checked access to an image that has already been copied into RAM.

use crate::flash::hil::FlashDrvError;
use zerocopy::FromBytes;

/// A region of RAM, addressed by absolute address.
///
/// `base` is the address of `memory[0]`. Every access is checked against the
/// region before any byte is interpreted, so a corrupt header or trailer can
/// never steer a read outside the loaded image.
pub struct RamImage<'a> {
    base: usize,
    memory: &'a [u8],
}

impl<'a> RamImage<'a> {
    pub const fn new(base: usize, memory: &'a [u8]) -> Self {
        RamImage { base, memory }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    fn range(&self, address: usize, len: usize) -> Result<&'a [u8], FlashDrvError> {
        let start = address
            .checked_sub(self.base)
            .ok_or(FlashDrvError::INVAL)?;
        let end = start.checked_add(len).ok_or(FlashDrvError::INVAL)?;
        self.memory.get(start..end).ok_or(FlashDrvError::INVAL)
    }

    /// Copy `buffer.len()` bytes starting at absolute `address`.
    pub fn read(&self, address: usize, buffer: &mut [u8]) -> Result<(), FlashDrvError> {
        buffer.copy_from_slice(self.range(address, buffer.len())?);
        Ok(())
    }

    /// Read a fixed-layout record at absolute `address`.
    pub fn read_record<T: FromBytes>(&self, address: usize) -> Result<T, FlashDrvError> {
        let bytes = self.range(address, core::mem::size_of::<T>())?;
        T::read_from_bytes(bytes).map_err(|_| FlashDrvError::INVAL)
    }
}
