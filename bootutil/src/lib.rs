/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Image integrity and authenticity validation for the bootloader.

--*/

#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "testing", feature = "rustcrypto"))]
extern crate alloc;

mod digest;
pub use digest::*;
mod error;
pub use error::*;
pub mod flash;
pub use flash::hil::{FlashDrvError, FlashStorage};
mod image;
pub use image::*;
pub mod image_verifier;
pub use image_verifier::{ImageValidator, ImageVerifier};
mod keys;
pub use keys::*;
mod ram;
pub use ram::*;
#[cfg(feature = "rustcrypto")]
mod rsa_pss;
#[cfg(feature = "rustcrypto")]
pub use rsa_pss::RsaPssVerifier;
mod signature;
pub use signature::*;
mod source;
pub use source::ImageSource;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod tlv;
pub use tlv::*;

pub use bootutil_config::{SignatureScheme, VerifierConfig};
