//! Streaming checksum computation
//!
//! A [`ChecksumComputer`] turns a file's bytes into a set of named digests.
//! Only content is hashed: timestamps, ownership and the file's location
//! never influence the result.

use crate::errors::{file_unavailable, io_error, ExError, ExErrorKind, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Named digests for one file, keyed by hash-kind name
pub type Digests = BTreeMap<String, String>;

/// Read buffer size for streaming hashes
const CHUNK_SIZE: usize = 64 * 1024;

/// Name of a digest algorithm
///
/// Kinds are opaque to the manifest and comparator; only a checksum
/// computer gives them meaning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashKind(String);

impl HashKind {
    pub const SHA256: &'static str = "sha256";
    pub const BLAKE3: &'static str = "blake3";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn sha256() -> Self {
        Self::new(Self::SHA256)
    }

    pub fn blake3() -> Self {
        Self::new(Self::BLAKE3)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HashKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Computes named digests of a file's content
pub trait ChecksumComputer: Send + Sync {
    /// Digest `path` under every kind in `kinds`
    ///
    /// Either every requested digest is returned or the call fails; there
    /// are no partial results.
    ///
    /// # Errors
    ///
    /// - `FileUnavailable` if `path` does not exist or is not a regular file
    /// - `UnknownHashKind` if a kind is not supported
    /// - `InvalidInput` if `kinds` is empty
    /// - `Io` for any other read failure
    fn digest(&self, path: &Path, kinds: &[HashKind]) -> Result<Digests>;

    /// Whether this computer understands `kind`
    fn supports(&self, kind: &HashKind) -> bool;
}

/// Built-in computer supporting `sha256` and `blake3`
///
/// All requested kinds are fed from one pass over the file in fixed-size
/// chunks, so memory use does not grow with file size.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamingChecksum;

enum Hasher {
    Sha256(Box<Sha256>),
    Blake3(Box<blake3::Hasher>),
}

impl Hasher {
    fn for_kind(kind: &HashKind) -> Option<Self> {
        match kind.as_str() {
            HashKind::SHA256 => Some(Hasher::Sha256(Box::default())),
            HashKind::BLAKE3 => Some(Hasher::Blake3(Box::new(blake3::Hasher::new()))),
            _ => None,
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        match self {
            Hasher::Sha256(h) => h.update(bytes),
            Hasher::Blake3(h) => {
                h.update(bytes);
            }
        }
    }

    fn finalize(self) -> String {
        match self {
            Hasher::Sha256(h) => hex::encode((*h).finalize()),
            Hasher::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}

impl StreamingChecksum {
    pub fn new() -> Self {
        Self
    }
}

impl ChecksumComputer for StreamingChecksum {
    fn digest(&self, path: &Path, kinds: &[HashKind]) -> Result<Digests> {
        if kinds.is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("checksum")
                .with_path(path)
                .with_message("at least one hash kind is required"));
        }

        let mut hashers = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let hasher = Hasher::for_kind(kind).ok_or_else(|| {
                ExError::new(ExErrorKind::UnknownHashKind)
                    .with_op("checksum")
                    .with_message(format!("unsupported hash kind '{}'", kind))
            })?;
            hashers.push((kind.clone(), hasher));
        }

        if !path.is_file() {
            return Err(file_unavailable("checksum", path));
        }

        let mut file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => file_unavailable("checksum", path),
            _ => io_error("checksum_open", path, e),
        })?;

        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(io_error("checksum_read", path, e)),
            };
            for (_, hasher) in hashers.iter_mut() {
                hasher.update(&buf[..n]);
            }
        }

        Ok(hashers
            .into_iter()
            .map(|(kind, hasher)| (kind.as_str().to_string(), hasher.finalize()))
            .collect())
    }

    fn supports(&self, kind: &HashKind) -> bool {
        Hasher::for_kind(kind).is_some()
    }
}
