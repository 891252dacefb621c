//! proof verification gateway
//!
//! dispatches to one verifier per supported tree size. each verifier takes a
//! fixed-length public-input vector; a mismatched length is a hard failure,
//! never silently padded. the gateway holds no chain state and never retries:
//! proof generation is entirely an off-protocol responsibility.

use std::sync::Arc;

use commitment_tree::{encode_leaf, Arity, CommitmentTree, Hash, ZERO_HASH};
use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::channel::ChannelRecord;
use crate::error::{ChannelError, Result};
use crate::ledger::DepositTable;
use crate::types::{Balance, FinalBalance, H256};

/// all channel trees fold with this arity
pub const CHANNEL_TREE_ARITY: Arity = Arity::Quaternary;

/// supported commitment tree sizes
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub enum TreeSize {
    Leaves16,
    Leaves32,
    Leaves64,
    Leaves128,
}

impl TreeSize {
    pub const ALL: [TreeSize; 4] = [
        TreeSize::Leaves16,
        TreeSize::Leaves32,
        TreeSize::Leaves64,
        TreeSize::Leaves128,
    ];

    pub fn capacity(self) -> usize {
        match self {
            TreeSize::Leaves16 => 16,
            TreeSize::Leaves32 => 32,
            TreeSize::Leaves64 => 64,
            TreeSize::Leaves128 => 128,
        }
    }

    /// smallest supported size holding `count` leaves
    pub fn for_leaf_count(count: usize) -> Option<TreeSize> {
        Self::ALL.into_iter().find(|size| size.capacity() >= count)
    }

    /// fixed public-input vector length: previous root, claimed root, leaves
    pub fn public_input_len(self) -> usize {
        self.capacity() + 2
    }
}

/// opaque succinct-proof verifier for one tree size
pub trait StateVerifier: Send + Sync {
    /// pure check of `proof` against the fixed-length public input vector
    fn verify(&self, preprocessing: &[u8], proof: &[u8], inputs: &[Hash]) -> bool;
}

/// verifier handle resolved once per channel at commitment initialization
#[derive(Clone)]
pub struct VerifierBinding {
    size: TreeSize,
    verifier: Arc<dyn StateVerifier>,
}

impl VerifierBinding {
    pub fn size(&self) -> TreeSize {
        self.size
    }

    /// gate a submission; length mismatch and proof failure are both terminal
    pub fn verify(&self, preprocessing: &[u8], proof: &[u8], inputs: &[Hash]) -> Result<()> {
        let need = self.size.public_input_len();
        if inputs.len() != need {
            return Err(ChannelError::InvalidPublicInputLength {
                got: inputs.len(),
                need,
            });
        }
        if !self.verifier.verify(preprocessing, proof, inputs) {
            tracing::debug!(size = self.size.capacity(), "proof rejected");
            return Err(ChannelError::ProofInvalid);
        }
        Ok(())
    }
}

/// one verifier per supported size
pub struct VerifierRegistry {
    bindings: Vec<(TreeSize, Arc<dyn StateVerifier>)>,
}

impl VerifierRegistry {
    /// transparent leaf-witness verifier behind every size
    pub fn transparent() -> Self {
        let verifier: Arc<dyn StateVerifier> = Arc::new(LeafWitnessVerifier);
        Self {
            bindings: TreeSize::ALL
                .into_iter()
                .map(|size| (size, Arc::clone(&verifier)))
                .collect(),
        }
    }

    /// swap in an external verifier for one size
    pub fn register(&mut self, size: TreeSize, verifier: Arc<dyn StateVerifier>) {
        match self.bindings.iter_mut().find(|(s, _)| *s == size) {
            Some((_, slot)) => *slot = verifier,
            None => self.bindings.push((size, verifier)),
        }
    }

    pub fn resolve(&self, size: TreeSize) -> VerifierBinding {
        let verifier = self
            .bindings
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, v)| Arc::clone(v))
            .expect("registry covers every supported size");
        VerifierBinding { size, verifier }
    }
}

impl Default for VerifierRegistry {
    fn default() -> Self {
        Self::transparent()
    }
}

/// assemble the public-input vector for a commitment round
///
/// layout: `[prev_root, claimed_root, leaf_0 .. leaf_{capacity-1}]`, leaves
/// zero-padded to the tree capacity.
pub fn assemble_inputs(
    size: TreeSize,
    prev_root: &H256,
    claimed_root: &H256,
    leaves: &[Hash],
) -> Result<Vec<Hash>> {
    if leaves.len() > size.capacity() {
        return Err(ChannelError::InvalidPublicInputLength {
            got: leaves.len() + 2,
            need: size.public_input_len(),
        });
    }
    let mut inputs = Vec::with_capacity(size.public_input_len());
    inputs.push(prev_root.0);
    inputs.push(claimed_root.0);
    inputs.extend_from_slice(leaves);
    inputs.resize(size.public_input_len(), ZERO_HASH);
    Ok(inputs)
}

/// leaf grid over the channel's deposit ledger, chained to `prev_root`
pub fn deposit_leaves(channel: &ChannelRecord, deposits: &DepositTable, prev_root: &H256) -> Vec<Hash> {
    grid_leaves(channel, prev_root, |account, token| {
        deposits.amount_of(account, token)
    })
}

/// leaf grid over a closure balance table, chained to `prev_root`
pub fn balance_leaves(channel: &ChannelRecord, balances: &[FinalBalance], prev_root: &H256) -> Vec<Hash> {
    grid_leaves(channel, prev_root, |account, token| {
        balances
            .iter()
            .find(|b| b.account == *account && b.token == *token)
            .map_or(0, |b| b.amount)
    })
}

/// participant-then-token leaf grid, fixed by the channel's registration order
fn grid_leaves<F>(channel: &ChannelRecord, prev_root: &H256, value_of: F) -> Vec<Hash>
where
    F: Fn(&crate::types::AccountId, &crate::types::TokenId) -> Balance,
{
    let mut leaves = Vec::with_capacity(channel.leaf_count());
    for participant in &channel.participants {
        let key = participant.leaf_key();
        for token in &channel.allowed_tokens {
            let value = value_of(&participant.account, token);
            leaves.push(encode_leaf(&prev_root.0, &key.0, &token.0, value));
        }
    }
    leaves
}

/// transparent proof format: the scale-encoded leaf witness
///
/// stands in for an external succinct verifier. validity means the witness
/// matches the public leaf section exactly and refolds to the claimed root.
#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct LeafWitness {
    pub leaves: Vec<Hash>,
}

impl LeafWitness {
    pub fn into_proof_bytes(self) -> Vec<u8> {
        self.encode()
    }
}

pub struct LeafWitnessVerifier;

impl StateVerifier for LeafWitnessVerifier {
    fn verify(&self, _preprocessing: &[u8], proof: &[u8], inputs: &[Hash]) -> bool {
        let Ok(witness) = LeafWitness::decode(&mut &proof[..]) else {
            return false;
        };
        let [_, claimed_root, padded @ ..] = inputs else {
            return false;
        };
        if witness.leaves.len() > padded.len() {
            return false;
        }
        for (offset, slot) in padded.iter().enumerate() {
            let expected = witness.leaves.get(offset).copied().unwrap_or(ZERO_HASH);
            if *slot != expected {
                return false;
            }
        }
        match CommitmentTree::build(padded, CHANNEL_TREE_ARITY) {
            Ok(tree) => tree.root() == *claimed_root,
            Err(_) => false,
        }
    }
}
