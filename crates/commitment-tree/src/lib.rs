//! balance commitment trees for channel settlement
//!
//! leaves are chained to the previous committed root, folded bottom-up with a
//! fixed arity, and padded with a canonical zero hash. the same ledger
//! snapshot and previous root always reproduce the same root bit-for-bit.

pub mod leaf;
pub mod proof;

pub use leaf::{chain_term, encode_leaf};
pub use proof::{verify_inclusion, InclusionProof};

use sha2::{Digest, Sha256};
use thiserror::Error;

/// 32-byte node/leaf value
pub type Hash = [u8; 32];

/// canonical padding value for incomplete node groups
pub const ZERO_HASH: Hash = [0u8; 32];

/// fan-out of internal nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, scale_codec::Encode, scale_codec::Decode, scale_info::TypeInfo)]
pub enum Arity {
    Binary,
    Quaternary,
}

impl Arity {
    /// children per internal node
    pub fn width(self) -> usize {
        match self {
            Arity::Binary => 2,
            Arity::Quaternary => 4,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree requires at least one leaf")]
    EmptyLeaves,

    #[error("leaf index {index} out of range for {count} leaves")]
    IndexOutOfRange { index: usize, count: usize },
}

pub type Result<T> = core::result::Result<T, TreeError>;

/// hash a full-width node group into its parent
pub fn hash_children(children: &[Hash]) -> Hash {
    let mut hasher = Sha256::new();
    for child in children {
        hasher.update(child);
    }
    hasher.finalize().into()
}

/// balanced commitment tree, layer 0 holds the leaves
#[derive(Debug)]
pub struct CommitmentTree {
    arity: Arity,
    layers: Vec<Vec<Hash>>,
}

impl CommitmentTree {
    /// fold `leaves` bottom-up, padding incomplete groups with [`ZERO_HASH`]
    pub fn build(leaves: &[Hash], arity: Arity) -> Result<Self> {
        if leaves.is_empty() {
            return Err(TreeError::EmptyLeaves);
        }

        let width = arity.width();
        let mut layers = vec![leaves.to_vec()];

        while layers.last().map_or(false, |layer| layer.len() > 1) {
            let current = layers.last().expect("layers is non-empty");
            let mut next = Vec::with_capacity(current.len().div_ceil(width));
            for group in current.chunks(width) {
                let mut children = [ZERO_HASH; 4];
                children[..group.len()].copy_from_slice(group);
                next.push(hash_children(&children[..width]));
            }
            layers.push(next);
        }

        Ok(Self { arity, layers })
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// single top value of the tree
    pub fn root(&self) -> Hash {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .expect("build rejects empty leaf sets")
    }

    pub fn leaf_count(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.len())
    }

    /// number of folding levels above the leaves
    pub fn depth(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// inclusion proof for the leaf at `index`
    pub fn prove(&self, index: usize) -> Result<InclusionProof> {
        let count = self.leaf_count();
        if index >= count {
            return Err(TreeError::IndexOutOfRange { index, count });
        }

        let width = self.arity.width();
        let mut siblings = Vec::with_capacity(self.depth());
        let mut position = index;

        for layer in &self.layers[..self.depth()] {
            let group = position / width;
            let slot = position % width;
            let mut level = Vec::with_capacity(width - 1);
            for offset in 0..width {
                if offset == slot {
                    continue;
                }
                let sibling = layer.get(group * width + offset).copied().unwrap_or(ZERO_HASH);
                level.push(sibling);
            }
            siblings.push(level);
            position = group;
        }

        Ok(InclusionProof {
            index: index as u64,
            siblings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_leaves(count: usize) -> Vec<Hash> {
        (0..count).map(|i| blake3::hash(&[i as u8]).into()).collect()
    }

    #[test]
    fn test_empty_leaves_rejected() {
        assert_eq!(
            CommitmentTree::build(&[], Arity::Quaternary).unwrap_err(),
            TreeError::EmptyLeaves
        );
    }

    #[test]
    fn test_root_is_deterministic() {
        let leaves = mock_leaves(13);
        let a = CommitmentTree::build(&leaves, Arity::Quaternary).unwrap();
        let b = CommitmentTree::build(&leaves, Arity::Quaternary).unwrap();
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn test_permuting_leaves_changes_root() {
        let leaves = mock_leaves(16);
        let mut swapped = leaves.clone();
        swapped.swap(3, 11);

        let original = CommitmentTree::build(&leaves, Arity::Quaternary).unwrap();
        let permuted = CommitmentTree::build(&swapped, Arity::Quaternary).unwrap();
        assert_ne!(original.root(), permuted.root());
    }

    #[test]
    fn test_arity_changes_root() {
        let leaves = mock_leaves(16);
        let binary = CommitmentTree::build(&leaves, Arity::Binary).unwrap();
        let quaternary = CommitmentTree::build(&leaves, Arity::Quaternary).unwrap();
        assert_ne!(binary.root(), quaternary.root());
    }

    #[test]
    fn test_quaternary_depth() {
        // 32 leaves fold as 32 -> 8 -> 2 -> 1
        let tree = CommitmentTree::build(&mock_leaves(32), Arity::Quaternary).unwrap();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_count(), 32);
    }

    #[test]
    fn test_incomplete_group_matches_explicit_padding() {
        // padding an incomplete group is the same as appending zero leaves
        let leaves = mock_leaves(5);
        let mut padded = leaves.clone();
        padded.resize(8, ZERO_HASH);

        let implicit = CommitmentTree::build(&leaves, Arity::Quaternary).unwrap();
        let explicit = CommitmentTree::build(&padded, Arity::Quaternary).unwrap();
        assert_eq!(implicit.root(), explicit.root());
    }

    #[test]
    fn test_prove_out_of_range() {
        let tree = CommitmentTree::build(&mock_leaves(4), Arity::Quaternary).unwrap();
        assert_eq!(
            tree.prove(4).unwrap_err(),
            TreeError::IndexOutOfRange { index: 4, count: 4 }
        );
    }

    #[test]
    fn test_single_leaf_root_is_leaf() {
        let leaves = mock_leaves(1);
        let tree = CommitmentTree::build(&leaves, Arity::Quaternary).unwrap();
        assert_eq!(tree.root(), leaves[0]);
        assert_eq!(tree.depth(), 0);
    }
}
