// Licensed under the Apache-2.0 license

//! Trailer parsing.
//!
//! The trailer is a [`TlvInfo`] record followed by type/length/value
//! entries packed back to back. The declared length of each entry is the
//! only way to find the next one, so every length is checked against the
//! trailer bound and the payload buffer before the walk advances.

use crate::digest::Digest;
use crate::error::{BootResult, BootUtilError};
use crate::image::{
    ImageHeader, TlvEntry, TlvInfo, IMAGE_TLV_KEYHASH, IMAGE_TLV_SHA256, TLV_ENTRY_SIZE,
    TLV_INFO_SIZE,
};
use crate::keys::KeyTable;
use crate::signature::SignatureVerifier;
use crate::source::ImageSource;
use bootutil_config::{SignatureScheme, DIGEST_LEN, MAX_KEYHASH_LEN, TLV_BUF_SZ};

/// One trailer entry, located but not yet interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvRecord {
    pub it_type: u8,
    /// Image-relative offset of the payload.
    pub offset: usize,
    pub len: usize,
}

/// Iterator over the entries of an image trailer.
///
/// Yields an error and then stops if an entry is malformed.
pub struct TlvIter<'a> {
    header: &'a ImageHeader,
    source: ImageSource<'a>,
    off: usize,
    end: usize,
    done: bool,
}

impl<'a> TlvIter<'a> {
    /// Validate the info block at `trailer_off` and position the iterator on
    /// the first entry.
    pub fn open(
        header: &'a ImageHeader,
        source: ImageSource<'a>,
        trailer_off: usize,
    ) -> BootResult<Self> {
        let info: TlvInfo = source.read_record(header, trailer_off)?;
        if !info.is_valid() {
            let magic = info.magic;
            log::warn!("[bootutil] Bad trailer magic {:#06x}", magic);
            return Err(BootUtilError::MalformedTrailer);
        }
        let end = trailer_off
            .checked_add(usize::from(info.tlv_tot))
            .ok_or(BootUtilError::MalformedTrailer)?;
        let off = trailer_off + TLV_INFO_SIZE;
        if end < off {
            return Err(BootUtilError::MalformedTrailer);
        }
        Ok(TlvIter {
            header,
            source,
            off,
            end,
            done: false,
        })
    }

    fn next_record(&mut self) -> BootResult<TlvRecord> {
        let entry: TlvEntry = self
            .source
            .read_record(self.header, self.off)
            .map_err(|_| BootUtilError::MalformedTrailer)?;
        let len = usize::from(entry.len);
        let offset = self.off + TLV_ENTRY_SIZE;
        if len > TLV_BUF_SZ || offset + len > self.end {
            log::warn!(
                "[bootutil] Trailer entry {:#04x} at {:#x} overruns trailer ({} bytes)",
                entry.it_type,
                self.off,
                len
            );
            return Err(BootUtilError::MalformedTrailer);
        }
        self.off = offset + len;
        Ok(TlvRecord {
            it_type: entry.it_type,
            offset,
            len,
        })
    }
}

impl Iterator for TlvIter<'_> {
    type Item = BootResult<TlvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.off >= self.end {
            return None;
        }
        let record = self.next_record();
        self.done = record.is_err();
        Some(record)
    }
}

/// Keys and verifier used for signature entries.
#[derive(Clone, Copy)]
pub struct SignatureAuth<'a> {
    pub scheme: SignatureScheme,
    pub keys: KeyTable<'a>,
    pub verifier: &'a dyn SignatureVerifier,
}

/// Outcome of a trailer walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verdict {
    /// A digest entry matched the computed digest.
    pub digest_confirmed: bool,
    /// At least one signature verified. Only set when signatures are checked.
    pub signature_confirmed: bool,
}

/// Walk the trailer at `trailer_off`, checking every entry this build
/// understands against `digest`.
///
/// Without `auth`, key and signature entries are skipped like any other
/// unknown entry.
pub fn walk_trailer(
    source: ImageSource<'_>,
    header: &ImageHeader,
    trailer_off: usize,
    digest: &Digest,
    auth: Option<SignatureAuth<'_>>,
) -> BootResult<Verdict> {
    let mut verdict = Verdict::default();
    // Key named by the most recent key hash entry; consumed by the next signature.
    let mut key_id: Option<usize> = None;
    let mut buf = [0u8; TLV_BUF_SZ];

    for record in TlvIter::open(header, source, trailer_off)? {
        let TlvRecord {
            it_type,
            offset,
            len,
        } = record?;

        if it_type == IMAGE_TLV_SHA256 {
            if len != DIGEST_LEN || verdict.digest_confirmed {
                return Err(BootUtilError::MalformedTrailer);
            }
            let payload = &mut buf[..len];
            source.read(header, offset, payload)?;
            if payload[..] != digest[..] {
                log::warn!("[bootutil] Image digest mismatch");
                return Err(BootUtilError::DigestMismatch);
            }
            log::debug!("[bootutil] Image digest matches");
            verdict.digest_confirmed = true;
            continue;
        }

        let Some(auth) = auth else {
            log::debug!("[bootutil] Skipping trailer entry {:#04x}", it_type);
            continue;
        };

        if it_type == IMAGE_TLV_KEYHASH {
            if len > MAX_KEYHASH_LEN {
                return Err(BootUtilError::MalformedTrailer);
            }
            let payload = &mut buf[..len];
            source.read(header, offset, payload)?;
            // An unknown key is fine: other signatures may follow.
            key_id = auth.keys.find_key(payload);
            match key_id {
                Some(id) => log::debug!("[bootutil] Trailer names trusted key {}", id),
                None => log::warn!("[bootutil] Trailer names an untrusted key"),
            }
        } else if it_type == auth.scheme.tlv_type() {
            // Each key hash authorizes at most one signature attempt.
            let Some(key) = key_id.take().and_then(|id| auth.keys.get(id)) else {
                log::debug!("[bootutil] Skipping signature without a trusted key");
                continue;
            };
            if !auth.scheme.accepts_len(len) {
                return Err(BootUtilError::MalformedTrailer);
            }
            let payload = &mut buf[..len];
            source.read(header, offset, payload)?;
            match auth.verifier.verify(digest, payload, key) {
                Ok(()) => {
                    log::debug!(
                        "[bootutil] {} signature valid for key {}",
                        auth.scheme.name(),
                        key.index
                    );
                    verdict.signature_confirmed = true;
                }
                Err(err) => log::warn!(
                    "[bootutil] {} signature rejected for key {}: {:?}",
                    auth.scheme.name(),
                    key.index,
                    err
                ),
            }
        } else {
            log::debug!("[bootutil] Skipping trailer entry {:#04x}", it_type);
        }
    }

    Ok(verdict)
}
