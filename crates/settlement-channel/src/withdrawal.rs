//! withdrawal records
//!
//! populated once at closure from the verified final balances; each record
//! pays out at most once. a withdrawn record's amount is permanently zero.

use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::types::{AccountId, Balance, FinalBalance, TokenId};

#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq)]
pub struct WithdrawalRecord {
    pub account: AccountId,
    pub token: TokenId,
    pub amount: Balance,
    pub withdrawn: bool,
}

/// withdrawal table for one channel
#[derive(Clone, Debug, Default, Encode, Decode, TypeInfo)]
pub struct WithdrawalTable {
    records: Vec<WithdrawalRecord>,
}

impl WithdrawalTable {
    /// fill the table from a closure's balance list
    ///
    /// called exactly once, while the channel passes through `Closing`.
    pub fn populate(&mut self, balances: &[FinalBalance]) {
        debug_assert!(self.records.is_empty(), "closure populates the table once");
        self.records = balances
            .iter()
            .filter(|b| b.amount > 0)
            .map(|b| WithdrawalRecord {
                account: b.account,
                token: b.token,
                amount: b.amount,
                withdrawn: false,
            })
            .collect();
    }

    pub fn record(&self, account: &AccountId, token: &TokenId) -> Option<&WithdrawalRecord> {
        self.records
            .iter()
            .find(|r| r.account == *account && r.token == *token)
    }

    pub fn record_mut(&mut self, account: &AccountId, token: &TokenId) -> Option<&mut WithdrawalRecord> {
        self.records
            .iter_mut()
            .find(|r| r.account == *account && r.token == *token)
    }

    pub fn records(&self) -> &[WithdrawalRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(account_byte: u8, amount: Balance) -> FinalBalance {
        FinalBalance {
            account: AccountId::from_raw([account_byte; 32]),
            token: TokenId::from_raw([9u8; 32]),
            amount,
        }
    }

    #[test]
    fn test_populate_skips_zero_amounts() {
        let mut table = WithdrawalTable::default();
        table.populate(&[balance(1, 100), balance(2, 0), balance(3, 7)]);

        assert_eq!(table.records().len(), 2);
        assert!(table
            .record(&AccountId::from_raw([2u8; 32]), &TokenId::from_raw([9u8; 32]))
            .is_none());
    }

    #[test]
    fn test_record_lookup() {
        let mut table = WithdrawalTable::default();
        table.populate(&[balance(1, 100)]);

        let account = AccountId::from_raw([1u8; 32]);
        let token = TokenId::from_raw([9u8; 32]);
        let record = table.record(&account, &token).unwrap();
        assert_eq!(record.amount, 100);
        assert!(!record.withdrawn);
    }
}
