// Licensed under the Apache-2.0 license

pub mod area;
pub mod hil;
pub mod memory;

pub use area::FlashArea;
pub use memory::SimpleFlash;
