// Licensed under the Apache-2.0 license

use crate::error::BootResult;
use crate::flash::hil::{FlashDrvError, FlashStorage};
use crate::image::ImageHeader;
use crate::ram::RamImage;
use zerocopy::{FromBytes, IntoBytes};

/// Where the bytes of an image are read from.
#[derive(Clone, Copy)]
pub enum ImageSource<'a> {
    /// Image lives in storage; offsets are relative to the start of the image.
    Flash(&'a dyn FlashStorage),
    /// Image was copied to RAM at the header's load address.
    Ram(&'a RamImage<'a>),
}

fn ram_address(header: &ImageHeader, offset: usize) -> Result<usize, FlashDrvError> {
    let load_addr = header.load_addr;
    usize::try_from(load_addr)
        .ok()
        .and_then(|base| base.checked_add(offset))
        .ok_or(FlashDrvError::INVAL)
}

impl ImageSource<'_> {
    pub fn is_ram(&self) -> bool {
        matches!(self, ImageSource::Ram(_))
    }

    /// Read `buffer.len()` bytes at image-relative `offset`.
    pub fn read(&self, header: &ImageHeader, offset: usize, buffer: &mut [u8]) -> BootResult<()> {
        match self {
            ImageSource::Flash(flash) => flash.read(buffer, offset)?,
            ImageSource::Ram(ram) => ram.read(ram_address(header, offset)?, buffer)?,
        }
        Ok(())
    }

    /// Read a fixed-layout record at image-relative `offset`.
    pub fn read_record<T: FromBytes + IntoBytes>(
        &self,
        header: &ImageHeader,
        offset: usize,
    ) -> BootResult<T> {
        match self {
            ImageSource::Flash(flash) => {
                let mut record = T::new_zeroed();
                flash.read(record.as_mut_bytes(), offset)?;
                Ok(record)
            }
            ImageSource::Ram(ram) => Ok(ram.read_record(ram_address(header, offset)?)?),
        }
    }
}
