//! channel records and lifecycle transitions

use std::collections::BTreeSet;

use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use threshold_sig::{GroupPublicKey, SignerId};

use crate::error::{ChannelError, Result};
use crate::gateway::TreeSize;
use crate::registry::ManifestId;
use crate::types::*;

/// channel lifecycle state
///
/// transitions only move forward. `Closing` is traversed atomically inside
/// closure submission and is never observable between calls. `Emergency` is
/// terminal: the proof-gated path is dead once a channel enters it.
#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub enum ChannelStatus {
    /// channel created, deposit window open, first commitment pending
    Initialized,
    /// initial commitment accepted, off-chain computation running
    Open,
    /// closure proof and signature accepted, records being populated
    Closing,
    /// final root fixed, withdrawals enabled
    Closed,
    /// timeout fallback, deposit-bounded withdrawals only
    Emergency,
}

impl ChannelStatus {
    pub fn can_advance(self, next: ChannelStatus) -> bool {
        use ChannelStatus::*;
        matches!(
            (self, next),
            (Initialized, Open)
                | (Open, Closing)
                | (Closing, Closed)
                | (Initialized, Emergency)
                | (Open, Emergency)
        )
    }
}

/// on-ledger channel data
#[derive(Clone, Debug, Encode, Decode, TypeInfo)]
pub struct ChannelRecord {
    pub id: ChannelId,
    pub status: ChannelStatus,
    pub leader: AccountId,
    pub participants: Vec<Participant>,
    pub allowed_tokens: Vec<TokenId>,
    pub group_key: GroupPublicKey,
    /// derived once from the group key at open
    pub signer_id: SignerId,
    pub manifest: ManifestId,
    pub opened_at: Timestamp,
    pub expires_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    /// fixed when the initial commitment is accepted
    pub required_size: Option<TreeSize>,
}

impl ChannelRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ChannelId,
        leader: AccountId,
        participants: Vec<AccountId>,
        allowed_tokens: Vec<TokenId>,
        timeout: Timestamp,
        group_key: GroupPublicKey,
        signer_id: SignerId,
        manifest: ManifestId,
        opened_at: Timestamp,
    ) -> Result<Self> {
        if participants.is_empty() {
            return Err(ChannelError::InvalidParticipants { reason: "empty participant set" });
        }
        if participants.len() > MAX_PARTICIPANTS {
            return Err(ChannelError::InvalidParticipants { reason: "too many participants" });
        }
        let distinct: BTreeSet<_> = participants.iter().collect();
        if distinct.len() != participants.len() {
            return Err(ChannelError::InvalidParticipants { reason: "duplicate participant" });
        }
        if !participants.contains(&leader) {
            return Err(ChannelError::InvalidParticipants { reason: "leader not in participant set" });
        }
        if timeout == 0 {
            return Err(ChannelError::InvalidTimeout);
        }
        if allowed_tokens.is_empty() {
            return Err(ChannelError::TokenNotAllowed);
        }
        let distinct_tokens: BTreeSet<_> = allowed_tokens.iter().collect();
        if distinct_tokens.len() != allowed_tokens.len() {
            return Err(ChannelError::TokenNotAllowed);
        }
        // the leaf grid must fit the largest supported tree
        if TreeSize::for_leaf_count(participants.len() * allowed_tokens.len()).is_none() {
            return Err(ChannelError::InvalidParticipants {
                reason: "participant-token grid exceeds supported tree capacity",
            });
        }

        Ok(Self {
            id,
            status: ChannelStatus::Initialized,
            leader,
            participants: participants.into_iter().map(Participant::new).collect(),
            allowed_tokens,
            group_key,
            signer_id,
            manifest,
            opened_at,
            expires_at: opened_at + timeout,
            closed_at: None,
            required_size: None,
        })
    }

    /// forward-only status transition
    pub fn advance(&mut self, next: ChannelStatus) -> Result<()> {
        if !self.status.can_advance(next) {
            return Err(ChannelError::InvalidState { found: self.status });
        }
        self.status = next;
        Ok(())
    }

    pub fn expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    pub fn is_leader(&self, account: &AccountId) -> bool {
        self.leader == *account
    }

    pub fn is_participant(&self, account: &AccountId) -> bool {
        self.participants.iter().any(|p| p.account == *account)
    }

    pub fn participant(&self, account: &AccountId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.account == *account)
    }

    pub fn participant_mut(&mut self, account: &AccountId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.account == *account)
    }

    pub fn token_allowed(&self, token: &TokenId) -> bool {
        self.allowed_tokens.contains(token)
    }

    /// leaves the channel's trees commit to, ordered participant-then-token
    pub fn leaf_count(&self) -> usize {
        self.participants.len() * self.allowed_tokens.len()
    }

    /// canonical position of a (participant, token) pair in the leaf grid
    pub fn leaf_index(&self, account: &AccountId, token: &TokenId) -> Option<usize> {
        let row = self.participants.iter().position(|p| p.account == *account)?;
        let col = self.allowed_tokens.iter().position(|t| t == token)?;
        Some(row * self.allowed_tokens.len() + col)
    }
}
