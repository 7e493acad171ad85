//! Structural fingerprints and cache keys.
//!
//! The fingerprint is a truncated BLAKE3 digest of the canonically ordered
//! relation list. It identifies structure, not content, and is not a security
//! boundary: a prefix collision between two structures of the same model would
//! make them share calibration artifacts.

use crate::store::Model;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_FINGERPRINT_LEN: usize = 10;

/// Hex digest prefix of `len` characters (clamped to the full digest).
pub fn structure_fingerprint(model: &Model, len: usize) -> String {
    let rendered = model
        .canonical_relations()
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(";");
    let digest = blake3::hash(rendered.as_bytes()).to_hex();
    let hex = digest.as_str();
    hex[..len.min(hex.len())].to_string()
}

/// Identity of one calibration: structure of the model plus the bound dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    pub model: String,
    pub fingerprint: String,
    pub dataset: String,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}/{}", self.model, self.fingerprint, self.dataset)
    }
}
