//! Globally Unique Identifiers
//!
//! 16-byte identifiers for scheduled actions. Generation goes through the
//! [`GuidSource`] trait so tests can hand out predictable ids.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Unique identifier (UUID-sized, stored as raw bytes).
///
/// Implements Ord so ids can key a `BTreeMap`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Guid(pub [u8; 16]);

impl Guid {
    /// Size in bytes
    pub const SIZE: usize = 16;

    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Build an id from the bytes of a string.
    ///
    /// Copies at most [`Guid::SIZE`] bytes; shorter input is zero padded.
    /// Handy for readable fixed ids: `Guid::from_str_bytes("0000000000000001")`.
    pub fn from_str_bytes(s: &str) -> Self {
        let mut bytes = [0u8; Self::SIZE];
        let len = s.len().min(Self::SIZE);
        bytes[..len].copy_from_slice(&s.as_bytes()[..len]);
        Self(bytes)
    }

    /// Parse a UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s)
            .ok()
            .map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", hex::encode(self.0))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Producer of fresh ids.
pub trait GuidSource {
    /// Generate a new id.
    fn generate(&mut self) -> Guid;
}

/// Random (v4) UUID generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl GuidSource for UuidGenerator {
    fn generate(&mut self) -> Guid {
        Guid(*uuid::Uuid::new_v4().as_bytes())
    }
}

/// Monotonic counter generator (big-endian counter in the low bytes).
///
/// Deterministic: useful for replays and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialGuids {
    next: u64,
}

impl SequentialGuids {
    /// Start counting at `first`.
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl GuidSource for SequentialGuids {
    fn generate(&mut self) -> Guid {
        let mut bytes = [0u8; 16];
        bytes[8..].copy_from_slice(&self.next.to_be_bytes());
        self.next = self.next.wrapping_add(1);
        Guid(bytes)
    }
}
