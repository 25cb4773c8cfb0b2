//! Revision tokens
//!
//! A revision reads `<generation>-<32 hex digits>`. The generation counts
//! accepted writes to one document id; the suffix is random, so two writes
//! never share a token and tokens cannot be guessed ahead of time.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque revision token
///
/// The empty token asserts "this document does not exist yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    /// The empty revision
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generation prefix, if the token has one
    pub fn generation(&self) -> Option<u64> {
        let (generation, _) = self.0.split_once('-')?;
        generation.parse().ok()
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Revision {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Revision {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Issues fresh revision tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct RevisionGenerator;

impl RevisionGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Next token for a document whose current revision is `previous`
    ///
    /// Tokens without a parseable generation restart at generation 1.
    pub fn next(&self, previous: Option<&Revision>) -> Revision {
        let generation = previous.and_then(Revision::generation).unwrap_or(0) + 1;
        Revision(format!("{}-{}", generation, Uuid::new_v4().simple()))
    }
}
