//! core types for channel settlement

use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

/// 32-byte hash type
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct H256(pub [u8; 32]);

impl H256 {
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    pub fn from_slice(data: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&data[..32]);
        Self(bytes)
    }
}

impl From<&[u8; 32]> for H256 {
    fn from(bytes: &[u8; 32]) -> Self {
        Self(*bytes)
    }
}

impl From<[u8; 32]> for H256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// host-ledger account address
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub fn from_raw(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// fungible token identifier
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct TokenId(pub [u8; 32]);

impl TokenId {
    pub fn from_raw(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// settlement-layer account key, bound at a participant's first deposit
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq, Default, Hash)]
pub struct SettlementKey(pub [u8; 32]);

impl SettlementKey {
    pub fn from_raw(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// channel handle into the settlement arena
pub type ChannelId = u64;

/// balance in smallest unit
pub type Balance = u128;

/// host-ledger wall clock, seconds
pub type Timestamp = u64;

/// maximum participants per channel
pub const MAX_PARTICIPANTS: usize = 128;

/// channel participant
#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct Participant {
    pub account: AccountId,
    /// bound at first deposit, immutable afterwards
    pub settlement_key: Option<SettlementKey>,
}

impl Participant {
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            settlement_key: None,
        }
    }

    /// key this participant's leaves commit to
    ///
    /// participants that never deposited fall back to their account address,
    /// keeping the leaf grid deterministic for every verifier.
    pub fn leaf_key(&self) -> H256 {
        match self.settlement_key {
            Some(key) => H256(key.0),
            None => H256(self.account.0),
        }
    }
}

/// opaque succinct-proof bytes, generated off-protocol
#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq, Default)]
pub struct StateProof(pub Vec<u8>);

/// a claimed commitment root plus the proof attesting its derivation
#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct RootCommitment {
    pub root: H256,
    pub proof: StateProof,
}

/// one settled balance in a closure submission
#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct FinalBalance {
    pub account: AccountId,
    pub token: TokenId,
    pub amount: Balance,
}

/// full closure submission: final root, proof, aggregated signature, balances
#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct ClosureSubmission {
    pub final_root: H256,
    pub proof: StateProof,
    pub signature: threshold_sig::ThresholdSignature,
    pub balances: Vec<FinalBalance>,
}

/// digest the threshold signature must attest for a closure
pub fn closure_digest(channel: ChannelId, final_root: &H256, balances: &[FinalBalance]) -> [u8; 32] {
    let encoded = (channel, final_root, balances).encode();
    *blake3::hash(&encoded).as_bytes()
}
