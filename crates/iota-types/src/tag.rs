//! Transfer tag.

use crate::constants::TAG_TRYTES;
use crate::trytes::{validate_trytes, TryteError};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("tag must be at most {TAG_TRYTES} trytes, got {0}")]
    TooLong(usize),

    #[error(transparent)]
    Trytes(#[from] TryteError),
}

/// A transaction tag of up to 27 trytes, stored right-padded with `9`.
#[derive(Clone, PartialEq, Eq)]
pub struct Tag(String);

impl Tag {
    /// Validate and pad a tag.
    pub fn new(tag: &str) -> Result<Self, TagError> {
        if tag.len() > TAG_TRYTES {
            return Err(TagError::TooLong(tag.len()));
        }
        validate_trytes(tag)?;
        let mut padded = String::with_capacity(TAG_TRYTES);
        padded.push_str(tag);
        while padded.len() < TAG_TRYTES {
            padded.push('9');
        }
        Ok(Self(padded))
    }

    /// The padded 27-tryte representation.
    pub fn as_trytes(&self) -> &str {
        &self.0
    }
}

impl Default for Tag {
    /// The empty tag: all `9`s.
    fn default() -> Self {
        Self("9".repeat(TAG_TRYTES))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}
