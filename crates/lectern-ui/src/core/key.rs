//! Stable identity keys for outline nodes.
//!
//! # Design
//! - Keys are a pure function of (parent id, own id, kind) so UI state keyed
//!   by them survives a full outline rebuild.
//! - The output is the 53-bit cyrb53 hash over UTF-16 code units, matching the
//!   keys earlier browser builds persisted.
//! - Collisions are possible and accepted; duplicates of the same triple never
//!   coexist in one outline.

use std::fmt;

/// Largest value a key can take (2^53 - 1).
pub const KEY_MAX: u64 = (1 << 53) - 1;

/// Opaque, hash-derived node identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(u64);

impl NodeKey {
    /// Derive the key for a node from its parent id, own id and kind tag.
    #[must_use]
    pub fn derive(parent_id: Option<i64>, id: i64, kind: &str) -> Self {
        let source = parent_id.map_or_else(
            || format!("{id}:{kind}"),
            |parent| format!("{parent}:{id}:{kind}"),
        );
        Self(cyrb53(&source, 0))
    }

    /// Raw numeric value, always `<= KEY_MAX`.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// cyrb53 string hash with a 53-bit result.
#[must_use]
pub fn cyrb53(input: &str, seed: u32) -> u64 {
    let mut h1: u32 = 0xdead_beef ^ seed;
    let mut h2: u32 = 0x41c6_ce57 ^ seed;
    for unit in input.encode_utf16() {
        let ch = u32::from(unit);
        h1 = (h1 ^ ch).wrapping_mul(2_654_435_761);
        h2 = (h2 ^ ch).wrapping_mul(1_597_334_677);
    }
    h1 = (h1 ^ (h1 >> 16)).wrapping_mul(2_246_822_507);
    h1 ^= (h2 ^ (h2 >> 13)).wrapping_mul(3_266_489_909);
    h2 = (h2 ^ (h2 >> 16)).wrapping_mul(2_246_822_507);
    h2 ^= (h1 ^ (h1 >> 13)).wrapping_mul(3_266_489_909);
    (u64::from(h2 & 0x1f_ffff) << 32) | u64::from(h1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyrb53_matches_reference_vectors() {
        assert_eq!(cyrb53("a", 0), 7_929_297_801_672_961);
        assert_eq!(cyrb53("b", 0), 8_684_336_938_537_663);
        assert_eq!(cyrb53("revenge", 0), 4_051_478_007_546_757);
        assert_eq!(cyrb53("", 0), 3_338_908_027_751_811);
    }

    #[test]
    fn derive_uses_parent_prefix() {
        assert_eq!(
            NodeKey::derive(Some(1), 10, "page").value(),
            811_852_776_475_340
        );
        assert_eq!(
            NodeKey::derive(None, 0, "announcements").value(),
            3_362_679_569_395_211
        );
    }

    #[test]
    fn keys_are_stable_and_sensitive_to_each_input() {
        let base = NodeKey::derive(Some(3), 7, "page");
        assert_eq!(base, NodeKey::derive(Some(3), 7, "page"));
        assert_ne!(base, NodeKey::derive(Some(4), 7, "page"));
        assert_ne!(base, NodeKey::derive(Some(3), 8, "page"));
        assert_ne!(base, NodeKey::derive(Some(3), 7, "results"));
        assert_ne!(base, NodeKey::derive(None, 7, "page"));
    }

    #[test]
    fn keys_stay_within_53_bits() {
        for id in 0..256 {
            assert!(NodeKey::derive(Some(id), id * 31, "incourseMilestone").value() <= KEY_MAX);
        }
    }
}
