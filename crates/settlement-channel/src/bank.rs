//! token transfer boundary
//!
//! the core never trusts a nominal transfer amount: deposits credit the
//! measured balance delta, which tolerates fee-on-transfer tokens. payouts
//! happen strictly after the owning record is mutated.

use std::collections::BTreeMap;

use crate::error::{ChannelError, Result};
use crate::types::{AccountId, Balance, TokenId};

/// host token interface with standard fungible transfer semantics
pub trait TokenBank {
    /// pull `amount` of `token` from `from` into escrow, returning the amount
    /// actually credited (the measured balance delta)
    fn collect(&mut self, token: TokenId, from: AccountId, amount: Balance) -> Result<Balance>;

    /// push `amount` of `token` from escrow to `to`
    fn payout(&mut self, token: TokenId, to: AccountId, amount: Balance) -> Result<()>;
}

/// in-memory bank with a configurable flat transfer fee
pub struct MemoryBank {
    balances: BTreeMap<(AccountId, TokenId), Balance>,
    escrow: BTreeMap<TokenId, Balance>,
    /// flat fee withheld by the token on every collect, zero by default
    transfer_fee: Balance,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self {
            balances: BTreeMap::new(),
            escrow: BTreeMap::new(),
            transfer_fee: 0,
        }
    }

    pub fn with_transfer_fee(fee: Balance) -> Self {
        Self {
            transfer_fee: fee,
            ..Self::new()
        }
    }

    pub fn mint(&mut self, account: AccountId, token: TokenId, amount: Balance) {
        *self.balances.entry((account, token)).or_default() += amount;
    }

    pub fn balance_of(&self, account: &AccountId, token: &TokenId) -> Balance {
        self.balances.get(&(*account, *token)).copied().unwrap_or(0)
    }

    pub fn escrow_of(&self, token: &TokenId) -> Balance {
        self.escrow.get(token).copied().unwrap_or(0)
    }
}

impl Default for MemoryBank {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBank for MemoryBank {
    fn collect(&mut self, token: TokenId, from: AccountId, amount: Balance) -> Result<Balance> {
        let balance = self.balances.entry((from, token)).or_default();
        if *balance < amount {
            return Err(ChannelError::InsufficientBalance {
                have: *balance,
                need: amount,
            });
        }
        *balance -= amount;
        let credited = amount.saturating_sub(self.transfer_fee);
        *self.escrow.entry(token).or_default() += credited;
        Ok(credited)
    }

    fn payout(&mut self, token: TokenId, to: AccountId, amount: Balance) -> Result<()> {
        let escrow = self.escrow.entry(token).or_default();
        if *escrow < amount {
            return Err(ChannelError::InsufficientBalance {
                have: *escrow,
                need: amount,
            });
        }
        *escrow -= amount;
        *self.balances.entry((to, token)).or_default() += amount;
        Ok(())
    }
}
