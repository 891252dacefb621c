//! stateless inclusion verification
//!
//! recomputes the path from a leaf to the claimed root using the supplied
//! siblings and arity. no side effects.

use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::{hash_children, Arity, Hash, ZERO_HASH};

/// path from one leaf to the root, low level first
///
/// each level carries the `arity - 1` sibling hashes of the path node.
#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct InclusionProof {
    pub index: u64,
    pub siblings: Vec<Vec<Hash>>,
}

/// check that `leaf` sits at `index` under `root`
pub fn verify_inclusion(
    root: &Hash,
    leaf: &Hash,
    index: u64,
    siblings: &[Vec<Hash>],
    arity: Arity,
) -> bool {
    let width = arity.width() as u64;
    let mut acc = *leaf;
    let mut position = index;

    for level in siblings {
        if level.len() != arity.width() - 1 {
            return false;
        }
        let slot = (position % width) as usize;
        let mut children = [ZERO_HASH; 4];
        let mut sibling_iter = level.iter();
        for (offset, child) in children[..arity.width()].iter_mut().enumerate() {
            *child = if offset == slot {
                acc
            } else {
                *sibling_iter.next().expect("level length checked above")
            };
        }
        acc = hash_children(&children[..arity.width()]);
        position /= width;
    }

    position == 0 && acc == *root
}
