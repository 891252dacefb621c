//! per-channel deposit ledger
//!
//! keyed by (participant, token). the per-token total always equals the sum
//! of participant entries for that token; entries are never deleted while the
//! channel lives.

use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::error::{ChannelError, Result};
use crate::types::{AccountId, Balance, TokenId};

#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct DepositEntry {
    pub account: AccountId,
    pub token: TokenId,
    /// accumulated credited amount
    pub deposited: Balance,
    /// amount already drawn through the emergency fallback
    pub emergency_drawn: Balance,
}

/// deposit table for one channel
#[derive(Clone, Debug, Default, Encode, Decode, TypeInfo)]
pub struct DepositTable {
    entries: Vec<DepositEntry>,
    totals: Vec<(TokenId, Balance)>,
}

impl DepositTable {
    /// credit a measured deposit, creating the entry on first use
    pub fn credit(&mut self, account: AccountId, token: TokenId, amount: Balance) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.account == account && e.token == token)
        {
            Some(entry) => entry.deposited += amount,
            None => self.entries.push(DepositEntry {
                account,
                token,
                deposited: amount,
                emergency_drawn: 0,
            }),
        }
        match self.totals.iter_mut().find(|(t, _)| *t == token) {
            Some((_, total)) => *total += amount,
            None => self.totals.push((token, amount)),
        }
    }

    pub fn amount_of(&self, account: &AccountId, token: &TokenId) -> Balance {
        self.entries
            .iter()
            .find(|e| e.account == *account && e.token == *token)
            .map_or(0, |e| e.deposited)
    }

    /// recorded total for one token across all participants
    pub fn total_of(&self, token: &TokenId) -> Balance {
        self.totals
            .iter()
            .find(|(t, _)| t == token)
            .map_or(0, |(_, total)| *total)
    }

    /// deposit still claimable through the emergency fallback
    pub fn emergency_remaining(&self, account: &AccountId, token: &TokenId) -> Balance {
        self.entries
            .iter()
            .find(|e| e.account == *account && e.token == *token)
            .map_or(0, |e| e.deposited - e.emergency_drawn)
    }

    /// draw from a participant's own verified deposit, never more
    pub fn draw_emergency(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        amount: Balance,
    ) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.account == *account && e.token == *token)
            .ok_or(ChannelError::NothingToWithdraw)?;
        let remaining = entry.deposited - entry.emergency_drawn;
        if amount > remaining {
            return Err(ChannelError::InsufficientBalance {
                have: remaining,
                need: amount,
            });
        }
        entry.emergency_drawn += amount;
        Ok(())
    }

    /// undo an emergency draw whose payout failed
    pub fn restore_emergency(&mut self, account: &AccountId, token: &TokenId, amount: Balance) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.account == *account && e.token == *token)
        {
            entry.emergency_drawn -= amount;
        }
    }

    pub fn entries(&self) -> &[DepositEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> AccountId {
        AccountId::from_raw([byte; 32])
    }

    fn token(byte: u8) -> TokenId {
        TokenId::from_raw([byte; 32])
    }

    #[test]
    fn test_totals_track_entries() {
        let mut table = DepositTable::default();
        table.credit(account(1), token(9), 100);
        table.credit(account(2), token(9), 250);
        table.credit(account(1), token(9), 50);
        table.credit(account(1), token(8), 7);

        assert_eq!(table.amount_of(&account(1), &token(9)), 150);
        assert_eq!(table.amount_of(&account(2), &token(9)), 250);
        assert_eq!(table.total_of(&token(9)), 400);
        assert_eq!(table.total_of(&token(8)), 7);

        // conservation: totals equal the entry sums
        for (tok, total) in [(token(9), 400u128), (token(8), 7u128)] {
            let sum: Balance = table
                .entries()
                .iter()
                .filter(|e| e.token == tok)
                .map(|e| e.deposited)
                .sum();
            assert_eq!(sum, total);
        }
    }

    #[test]
    fn test_emergency_draw_bounded_by_deposit() {
        let mut table = DepositTable::default();
        table.credit(account(1), token(9), 100);

        table.draw_emergency(&account(1), &token(9), 60).unwrap();
        assert_eq!(table.emergency_remaining(&account(1), &token(9)), 40);

        assert_eq!(
            table.draw_emergency(&account(1), &token(9), 41).unwrap_err(),
            ChannelError::InsufficientBalance { have: 40, need: 41 }
        );

        table.draw_emergency(&account(1), &token(9), 40).unwrap();
        assert_eq!(table.emergency_remaining(&account(1), &token(9)), 0);
    }

    #[test]
    fn test_emergency_draw_requires_entry() {
        let mut table = DepositTable::default();
        assert_eq!(
            table.draw_emergency(&account(1), &token(9), 1).unwrap_err(),
            ChannelError::NothingToWithdraw
        );
    }

    #[test]
    fn test_restore_emergency() {
        let mut table = DepositTable::default();
        table.credit(account(1), token(9), 100);
        table.draw_emergency(&account(1), &token(9), 60).unwrap();
        table.restore_emergency(&account(1), &token(9), 60);
        assert_eq!(table.emergency_remaining(&account(1), &token(9)), 100);
    }
}
