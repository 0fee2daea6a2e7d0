// Licensed under the Apache-2.0 license

//! A flash partition bound to the device that holds it.

use crate::flash::hil::{FlashDrvError, FlashStorage};
use bootutil_config::FlashPartition;

/// Partition-relative view of a [`FlashStorage`] device.
///
/// Image offsets handed to the validator start at zero at the beginning of
/// the partition; reads that would leave the partition fail with `INVAL`.
pub struct FlashArea<'a> {
    partition: &'a FlashPartition,
    storage: &'a dyn FlashStorage,
}

impl<'a> FlashArea<'a> {
    pub fn open(
        partition: &'a FlashPartition,
        storage: &'a dyn FlashStorage,
    ) -> Result<Self, FlashDrvError> {
        match partition.end() {
            Some(end) if end <= storage.capacity() => Ok(FlashArea { partition, storage }),
            _ => {
                log::error!(
                    "[bootutil] Flash area {} does not fit on device",
                    partition.name
                );
                Err(FlashDrvError::SIZE)
            }
        }
    }

    pub fn partition(&self) -> &FlashPartition {
        self.partition
    }
}

impl FlashStorage for FlashArea<'_> {
    fn read(&self, buffer: &mut [u8], address: usize) -> Result<(), FlashDrvError> {
        if !self.partition.contains(address, buffer.len()) {
            return Err(FlashDrvError::INVAL);
        }
        self.storage.read(buffer, self.partition.offset + address)
    }

    fn capacity(&self) -> usize {
        self.partition.size
    }
}
