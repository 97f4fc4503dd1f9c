//! Propagator identities and allocation.
//!
//! A [`PropagatorId`] is a 64-bit handle assigned exactly once when a
//! propagule is created and never reused. Identities are strictly increasing
//! in creation order across one [`IdentityAllocator`], so the numeric order of
//! two identities from the same allocator is also their creation order --
//! parallel lineages interleave, but a parent's identity is always below its
//! children's.
//!
//! The allocator is an explicit object held by the population it serves, not
//! hidden process-wide state. Constructing a fresh allocator (or a fresh
//! [`Forest`](crate::forest::Forest), which owns one) is how independent runs
//! stay reproducible.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PropagatorId
// ---------------------------------------------------------------------------

/// Unique identity of one propagule within a single allocator's lifetime.
///
/// Serializes transparently as its decimal integer, which is also exactly
/// what `Display` and `FromStr` produce and accept -- the flat record formats
/// rely on this.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropagatorId(u64);

impl PropagatorId {
    /// Wrap a raw identity value.
    ///
    /// Exists for record parsing and tests; live propagules get their
    /// identity from an [`IdentityAllocator`].
    #[inline]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw `u64` representation.
    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PropagatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropagatorId({})", self.0)
    }
}

impl fmt::Display for PropagatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PropagatorId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(PropagatorId)
    }
}

// ---------------------------------------------------------------------------
// IdentityAllocator
// ---------------------------------------------------------------------------

/// Issues [`PropagatorId`]s that are unique and strictly increasing in call
/// order.
///
/// The counter is atomic: concurrent `next_id` calls from multiple threads
/// are serialized by the fetch-add, so no two propagules ever receive the
/// same identity and the progression remains a total order consistent with
/// real-time call order. Identities are never recycled.
///
/// Exhausting the 64-bit identity space is a fatal condition and panics; at
/// one allocation per nanosecond that point is several centuries away.
#[derive(Debug)]
pub struct IdentityAllocator {
    next: AtomicU64,
}

impl IdentityAllocator {
    /// Create an allocator whose first identity will be `0`.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create an allocator whose first identity will be `raw`.
    ///
    /// Used when resuming a population reloaded from persisted records: the
    /// counter restarts strictly above every reloaded identity.
    pub fn starting_at(raw: u64) -> Self {
        Self {
            next: AtomicU64::new(raw),
        }
    }

    /// Issue the next identity.
    ///
    /// # Panics
    ///
    /// Panics if the 64-bit identity space is exhausted.
    pub fn next_id(&self) -> PropagatorId {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        if raw == u64::MAX {
            // The counter has wrapped; every identity has been issued once.
            panic!("identity space exhausted: all 2^64 propagator identities issued");
        }
        PropagatorId(raw)
    }

    /// The raw value the next `next_id` call would return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
