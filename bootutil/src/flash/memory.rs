// Licensed under the Apache-2.0 license

//! Simple flash storage implementation using memory. Useful for testing and emulation.

use crate::flash::hil::{FlashDrvError, FlashStorage};
use core::result::Result;

pub struct SimpleFlash<'a> {
    memory: &'a [u8],
}

impl<'a> SimpleFlash<'a> {
    /// Create a new SimpleFlash instance with the provided memory slice.
    pub const fn new(memory: &'a [u8]) -> Self {
        SimpleFlash { memory }
    }
}

impl FlashStorage for SimpleFlash<'_> {
    /// Read from the flash storage, filling the provided buffer with data
    fn read(&self, buffer: &mut [u8], address: usize) -> Result<(), FlashDrvError> {
        let end = address
            .checked_add(buffer.len())
            .ok_or(FlashDrvError::INVAL)?;
        match self.memory.get(address..end) {
            Some(slice) => {
                buffer.copy_from_slice(slice);
                Ok(())
            }
            None => Err(FlashDrvError::INVAL),
        }
    }

    fn capacity(&self) -> usize {
        self.memory.len()
    }
}
