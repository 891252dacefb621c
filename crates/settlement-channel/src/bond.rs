//! leader bonds and slashing
//!
//! a bond is escrowed for exactly one live channel. it is either returned to
//! the leader after an honest closure or redirected to the treasury when the
//! state machine detects a violation. slashed funds are never burned.

use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::error::{ChannelError, Result};
use crate::types::{AccountId, Balance, TokenId};

#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub enum BondStatus {
    Posted,
    Reclaimed,
    Slashed,
}

#[derive(Clone, Copy, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub enum SlashReason {
    /// leader never produced a valid closure before the channel expired
    ClosureTimeout,
}

#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct BondEntry {
    pub leader: AccountId,
    pub amount: Balance,
    pub status: BondStatus,
    pub slash_reason: Option<SlashReason>,
}

impl BondEntry {
    pub fn post(leader: AccountId, amount: Balance) -> Self {
        Self {
            leader,
            amount,
            status: BondStatus::Posted,
            slash_reason: None,
        }
    }

    pub fn slash(&mut self, reason: SlashReason) -> Result<Balance> {
        if self.status != BondStatus::Posted {
            return Err(ChannelError::BondUnavailable);
        }
        self.status = BondStatus::Slashed;
        self.slash_reason = Some(reason);
        Ok(self.amount)
    }

    pub fn reclaim(&mut self) -> Result<Balance> {
        if self.status != BondStatus::Posted {
            return Err(ChannelError::BondUnavailable);
        }
        self.status = BondStatus::Reclaimed;
        Ok(self.amount)
    }

    /// undo a reclaim whose payout failed
    pub fn restore(&mut self) {
        self.status = BondStatus::Posted;
    }
}

/// accumulated slashed funds, withdrawable by the operator only
#[derive(Clone, Debug, Default, Encode, Decode, TypeInfo)]
pub struct Treasury {
    balances: Vec<(TokenId, Balance)>,
}

impl Treasury {
    pub fn credit(&mut self, token: TokenId, amount: Balance) {
        match self.balances.iter_mut().find(|(t, _)| *t == token) {
            Some((_, balance)) => *balance += amount,
            None => self.balances.push((token, amount)),
        }
    }

    pub fn debit(&mut self, token: &TokenId, amount: Balance) -> Result<()> {
        let have = self.balance_of(token);
        if amount > have {
            return Err(ChannelError::InsufficientBalance { have, need: amount });
        }
        if let Some((_, balance)) = self.balances.iter_mut().find(|(t, _)| t == token) {
            *balance -= amount;
        }
        Ok(())
    }

    pub fn balance_of(&self, token: &TokenId) -> Balance {
        self.balances
            .iter()
            .find(|(t, _)| t == token)
            .map_or(0, |(_, balance)| *balance)
    }
}
