//! chained leaf encoding
//!
//! every leaf commits to an account key, a token slot, a balance value, and a
//! chaining term derived from the previous committed root. a leaf is a pure
//! function of (prev_root, key, slot, value).

use crate::Hash;

const CHAIN_DOMAIN: &[u8] = b"commitment-tree:chain:v1";
const LEAF_DOMAIN: &[u8] = b"commitment-tree:leaf:v1";

/// chaining term binding a leaf to the previous committed root
pub fn chain_term(prev_root: &Hash, key: &Hash) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(CHAIN_DOMAIN);
    hasher.update(prev_root);
    hasher.update(key);
    *hasher.finalize().as_bytes()
}

/// encode one balance leaf
pub fn encode_leaf(prev_root: &Hash, key: &Hash, slot: &Hash, value: u128) -> Hash {
    let term = chain_term(prev_root, key);
    let mut hasher = blake3::Hasher::new();
    hasher.update(LEAF_DOMAIN);
    hasher.update(&term);
    hasher.update(slot);
    hasher.update(&value.to_le_bytes());
    *hasher.finalize().as_bytes()
}
