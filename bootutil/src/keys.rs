// Licensed under the Apache-2.0 license

use crate::digest::sha256;
use bootutil_config::MAX_KEYHASH_LEN;

/// A trusted public key, in the serialized form its key hash is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootKey<'a> {
    pub key: &'a [u8],
}

impl<'a> BootKey<'a> {
    pub const fn new(key: &'a [u8]) -> Self {
        BootKey { key }
    }
}

/// A key resolved from the table, handed to the signature verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRef<'a> {
    pub index: usize,
    pub bytes: &'a [u8],
}

/// Ordered, read-only set of keys this boot stage trusts.
#[derive(Debug, Clone, Copy)]
pub struct KeyTable<'a> {
    keys: &'a [BootKey<'a>],
}

impl<'a> KeyTable<'a> {
    pub const fn new(keys: &'a [BootKey<'a>]) -> Self {
        KeyTable { keys }
    }

    pub const fn empty() -> Self {
        KeyTable { keys: &[] }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<KeyRef<'a>> {
        self.keys.get(index).map(|key| KeyRef {
            index,
            bytes: key.key,
        })
    }

    /// Index of the first key whose SHA-256 starts with `keyhash`.
    ///
    /// `keyhash` may be truncated. An empty or over-long identifier never
    /// matches.
    pub fn find_key(&self, keyhash: &[u8]) -> Option<usize> {
        if keyhash.is_empty() || keyhash.len() > MAX_KEYHASH_LEN {
            return None;
        }
        self.keys
            .iter()
            .position(|key| sha256(key.key).starts_with(keyhash))
    }
}
