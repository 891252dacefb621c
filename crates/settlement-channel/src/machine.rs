//! the settlement ledger
//!
//! a single serialized state machine over an arena of channel records. every
//! sub-table (deposits, withdrawal records, root history, bonds, verifier
//! bindings) is indexed by the same channel handle. each operation re-checks
//! its preconditions against current stored state, mutates, and only then
//! emits external token transfers.

use std::collections::BTreeSet;

use commitment_tree::{encode_leaf, verify_inclusion, Hash, InclusionProof};
use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::bank::TokenBank;
use crate::bond::{BondEntry, SlashReason, Treasury};
use crate::channel::{ChannelRecord, ChannelStatus};
use crate::error::{ChannelError, Result};
use crate::gateway::{
    assemble_inputs, balance_leaves, deposit_leaves, StateVerifier, TreeSize, VerifierBinding,
    VerifierRegistry, CHANNEL_TREE_ARITY,
};
use crate::ledger::DepositTable;
use crate::registry::{ComputationManifest, ManifestId, ManifestRegistry};
use crate::types::*;
use crate::withdrawal::WithdrawalTable;

/// append-only root sequence for one channel
#[derive(Clone, Debug, Default, Encode, Decode, TypeInfo)]
pub struct RootHistory {
    roots: Vec<H256>,
}

impl RootHistory {
    pub fn push(&mut self, root: H256) {
        self.roots.push(root);
    }

    pub fn last(&self) -> Option<&H256> {
        self.roots.last()
    }

    /// chaining base of the latest root: the root before it, or zero
    pub fn previous(&self) -> H256 {
        if self.roots.len() >= 2 {
            self.roots[self.roots.len() - 2]
        } else {
            H256::zero()
        }
    }

    pub fn all(&self) -> &[H256] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// ledger-wide configuration
#[derive(Clone, Debug)]
pub struct LedgerParams {
    /// token leaders post bonds in
    pub bond_token: TokenId,
    /// fixed bond required to open a channel
    pub bond_amount: Balance,
    /// account allowed to register manifests, verifiers, and drain the treasury
    pub operator: AccountId,
}

pub struct SettlementLedger<B: TokenBank> {
    params: LedgerParams,
    bank: B,
    registry: ManifestRegistry,
    verifiers: VerifierRegistry,
    channels: Vec<ChannelRecord>,
    deposits: Vec<DepositTable>,
    withdrawals: Vec<WithdrawalTable>,
    roots: Vec<RootHistory>,
    bonds: Vec<BondEntry>,
    bindings: Vec<Option<VerifierBinding>>,
    treasury: Treasury,
}

impl<B: TokenBank> SettlementLedger<B> {
    pub fn new(params: LedgerParams, bank: B) -> Self {
        Self {
            params,
            bank,
            registry: ManifestRegistry::default(),
            verifiers: VerifierRegistry::transparent(),
            channels: Vec::new(),
            deposits: Vec::new(),
            withdrawals: Vec::new(),
            roots: Vec::new(),
            bonds: Vec::new(),
            bindings: Vec::new(),
            treasury: Treasury::default(),
        }
    }

    fn index(&self, id: ChannelId) -> Result<usize> {
        let idx = id as usize;
        if idx >= self.channels.len() {
            return Err(ChannelError::ChannelNotFound(id));
        }
        Ok(idx)
    }

    // ---- configuration ----------------------------------------------------

    pub fn register_manifest(
        &mut self,
        caller: AccountId,
        manifest: ComputationManifest,
    ) -> Result<ManifestId> {
        if caller != self.params.operator {
            return Err(ChannelError::Unauthorized);
        }
        Ok(self.registry.register(manifest))
    }

    /// swap in an external succinct-proof verifier for one tree size
    pub fn register_verifier(
        &mut self,
        caller: AccountId,
        size: TreeSize,
        verifier: std::sync::Arc<dyn StateVerifier>,
    ) -> Result<()> {
        if caller != self.params.operator {
            return Err(ChannelError::Unauthorized);
        }
        self.verifiers.register(size, verifier);
        Ok(())
    }

    // ---- lifecycle --------------------------------------------------------

    /// open a channel; the leader bond is collected atomically
    pub fn open_channel(
        &mut self,
        leader: AccountId,
        participants: Vec<AccountId>,
        allowed_tokens: Vec<TokenId>,
        timeout: Timestamp,
        group_key: threshold_sig::GroupPublicKey,
        manifest: ManifestId,
        now: Timestamp,
    ) -> Result<ChannelId> {
        self.registry.get(manifest)?;
        let signer_id = threshold_sig::derive_signer(&group_key)?;

        let id = self.channels.len() as ChannelId;
        let channel = ChannelRecord::new(
            id,
            leader,
            participants,
            allowed_tokens,
            timeout,
            group_key,
            signer_id,
            manifest,
            now,
        )?;

        let posted = self
            .bank
            .collect(self.params.bond_token, leader, self.params.bond_amount)?;

        self.channels.push(channel);
        self.deposits.push(DepositTable::default());
        self.withdrawals.push(WithdrawalTable::default());
        self.roots.push(RootHistory::default());
        self.bonds.push(BondEntry::post(leader, posted));
        self.bindings.push(None);

        tracing::info!(channel = id, bond = posted, "channel opened");
        Ok(id)
    }

    /// credit a participant deposit; the credited amount is the measured delta
    pub fn deposit(
        &mut self,
        id: ChannelId,
        caller: AccountId,
        token: TokenId,
        amount: Balance,
        settlement_key: SettlementKey,
        now: Timestamp,
    ) -> Result<Balance> {
        let idx = self.index(id)?;
        let channel = &self.channels[idx];
        if !matches!(channel.status, ChannelStatus::Initialized | ChannelStatus::Open) {
            return Err(ChannelError::InvalidState { found: channel.status });
        }
        if channel.expired(now) {
            return Err(ChannelError::ChannelExpired);
        }
        let participant = channel.participant(&caller).ok_or(ChannelError::Unauthorized)?;
        if !channel.token_allowed(&token) {
            return Err(ChannelError::TokenNotAllowed);
        }
        if let Some(bound) = participant.settlement_key {
            if bound != settlement_key {
                return Err(ChannelError::KeyMismatch);
            }
        }

        let credited = self.bank.collect(token, caller, amount)?;
        self.channels[idx]
            .participant_mut(&caller)
            .expect("membership checked above")
            .settlement_key
            .get_or_insert(settlement_key);
        self.deposits[idx].credit(caller, token, credited);

        tracing::debug!(channel = id, credited, "deposit credited");
        Ok(credited)
    }

    /// accept the first commitment root, derived from the deposit ledger
    pub fn initialize_state(
        &mut self,
        id: ChannelId,
        caller: AccountId,
        commitment: RootCommitment,
        now: Timestamp,
    ) -> Result<()> {
        let idx = self.index(id)?;
        let channel = &self.channels[idx];
        if channel.status != ChannelStatus::Initialized {
            return Err(ChannelError::InvalidState { found: channel.status });
        }
        if !channel.is_leader(&caller) {
            return Err(ChannelError::Unauthorized);
        }
        if channel.expired(now) {
            return Err(ChannelError::ChannelExpired);
        }

        let size = TreeSize::for_leaf_count(channel.leaf_count())
            .expect("grid capacity validated at open");
        let binding = self.verifiers.resolve(size);
        let genesis = H256::zero();
        let leaves = deposit_leaves(channel, &self.deposits[idx], &genesis);
        let inputs = assemble_inputs(size, &genesis, &commitment.root, &leaves)?;
        let preprocessing = &self.registry.get(channel.manifest)?.preprocessing;
        binding.verify(preprocessing, &commitment.proof.0, &inputs)?;

        let channel = &mut self.channels[idx];
        channel.required_size = Some(size);
        channel.advance(ChannelStatus::Open)?;
        self.bindings[idx] = Some(binding);
        self.roots[idx].push(commitment.root);

        tracing::info!(channel = id, size = size.capacity(), "initial commitment accepted");
        Ok(())
    }

    /// append an intermediate commitment round, chained to the previous root
    pub fn submit_checkpoint(
        &mut self,
        id: ChannelId,
        caller: AccountId,
        commitment: RootCommitment,
        leaves: &[Hash],
        now: Timestamp,
    ) -> Result<()> {
        let idx = self.index(id)?;
        let channel = &self.channels[idx];
        if channel.status != ChannelStatus::Open {
            return Err(ChannelError::InvalidState { found: channel.status });
        }
        if !channel.is_leader(&caller) {
            return Err(ChannelError::Unauthorized);
        }
        if channel.expired(now) {
            return Err(ChannelError::ChannelExpired);
        }

        let binding = self.bindings[idx].clone().expect("resolved at initialization");
        let prev = *self.roots[idx].last().expect("initialization pushed a root");
        let inputs = assemble_inputs(binding.size(), &prev, &commitment.root, leaves)?;
        let preprocessing = &self.registry.get(channel.manifest)?.preprocessing;
        binding.verify(preprocessing, &commitment.proof.0, &inputs)?;

        self.roots[idx].push(commitment.root);
        tracing::debug!(channel = id, round = self.roots[idx].len(), "checkpoint committed");
        Ok(())
    }

    /// close the channel: proof plus threshold signature over the final state
    pub fn submit_closure(
        &mut self,
        id: ChannelId,
        caller: AccountId,
        closure: ClosureSubmission,
        now: Timestamp,
    ) -> Result<()> {
        let idx = self.index(id)?;
        let channel = &self.channels[idx];
        if channel.status != ChannelStatus::Open {
            return Err(ChannelError::InvalidState { found: channel.status });
        }
        if !channel.is_leader(&caller) {
            return Err(ChannelError::Unauthorized);
        }

        let mut seen = BTreeSet::new();
        for balance in &closure.balances {
            if !channel.is_participant(&balance.account) {
                return Err(ChannelError::InvalidParticipants {
                    reason: "balance entry for unknown participant",
                });
            }
            if !channel.token_allowed(&balance.token) {
                return Err(ChannelError::TokenNotAllowed);
            }
            if !seen.insert((balance.account, balance.token)) {
                return Err(ChannelError::InvalidParticipants {
                    reason: "duplicate balance entry",
                });
            }
        }
        for token in &channel.allowed_tokens {
            let settled: Balance = closure
                .balances
                .iter()
                .filter(|b| b.token == *token)
                .map(|b| b.amount)
                .sum();
            if settled > self.deposits[idx].total_of(token) {
                return Err(ChannelError::ConservationViolation);
            }
        }

        let binding = self.bindings[idx].clone().expect("resolved at initialization");
        let prev = *self.roots[idx].last().expect("initialization pushed a root");
        let leaves = balance_leaves(channel, &closure.balances, &prev);
        let inputs = assemble_inputs(binding.size(), &prev, &closure.final_root, &leaves)?;
        let preprocessing = &self.registry.get(channel.manifest)?.preprocessing;
        binding.verify(preprocessing, &closure.proof.0, &inputs)?;

        let digest = closure_digest(id, &closure.final_root, &closure.balances);
        threshold_sig::verify(&digest, &closure.signature, &channel.signer_id)?;

        self.channels[idx].advance(ChannelStatus::Closing)?;
        self.withdrawals[idx].populate(&closure.balances);
        self.roots[idx].push(closure.final_root);
        self.channels[idx].closed_at = Some(now);
        self.channels[idx].advance(ChannelStatus::Closed)?;

        tracing::info!(channel = id, records = closure.balances.len(), "channel closed");
        Ok(())
    }

    /// settle one withdrawal record against the final root
    pub fn withdraw(
        &mut self,
        id: ChannelId,
        caller: AccountId,
        token: TokenId,
        amount: Balance,
        proof: &InclusionProof,
    ) -> Result<()> {
        let idx = self.index(id)?;
        let channel = &self.channels[idx];
        if channel.status != ChannelStatus::Closed {
            return Err(ChannelError::InvalidState { found: channel.status });
        }
        let participant = channel.participant(&caller).ok_or(ChannelError::Unauthorized)?;

        let record = self.withdrawals[idx]
            .record(&caller, &token)
            .ok_or(ChannelError::NothingToWithdraw)?;
        if record.withdrawn {
            return Err(ChannelError::AlreadyWithdrawn);
        }
        if record.amount != amount {
            return Err(ChannelError::AmountMismatch {
                requested: amount,
                recorded: record.amount,
            });
        }

        let final_root = *self.roots[idx].last().expect("closure pushed the final root");
        let prev = self.roots[idx].previous();
        let leaf = encode_leaf(&prev.0, &participant.leaf_key().0, &token.0, amount);
        if !verify_inclusion(
            &final_root.0,
            &leaf,
            proof.index,
            &proof.siblings,
            CHANNEL_TREE_ARITY,
        ) {
            return Err(ChannelError::ProofInvalid);
        }

        // the record stays marked for the whole transfer; a failed payout
        // restores it after the transfer has returned
        {
            let record = self.withdrawals[idx]
                .record_mut(&caller, &token)
                .expect("record checked above");
            record.withdrawn = true;
            record.amount = 0;
        }
        if let Err(err) = self.bank.payout(token, caller, amount) {
            let record = self.withdrawals[idx]
                .record_mut(&caller, &token)
                .expect("record checked above");
            record.withdrawn = false;
            record.amount = amount;
            return Err(err);
        }

        tracing::debug!(channel = id, amount, "withdrawal settled");
        Ok(())
    }

    /// timeout fallback: bypasses the proof gate, slashes the leader bond
    pub fn force_emergency(&mut self, id: ChannelId, caller: AccountId, now: Timestamp) -> Result<()> {
        let idx = self.index(id)?;
        let channel = &self.channels[idx];
        if !matches!(channel.status, ChannelStatus::Initialized | ChannelStatus::Open) {
            return Err(ChannelError::InvalidState { found: channel.status });
        }
        if !channel.is_participant(&caller) {
            return Err(ChannelError::Unauthorized);
        }
        if !channel.expired(now) {
            return Err(ChannelError::ChallengeNotElapsed);
        }

        self.channels[idx].advance(ChannelStatus::Emergency)?;
        let slashed = self.bonds[idx].slash(SlashReason::ClosureTimeout)?;
        self.treasury.credit(self.params.bond_token, slashed);

        tracing::warn!(channel = id, slashed, "emergency mode forced, leader bond slashed");
        Ok(())
    }

    /// pay out from a participant's own verified deposit, never more
    pub fn emergency_withdraw(
        &mut self,
        id: ChannelId,
        caller: AccountId,
        token: TokenId,
        amount: Balance,
    ) -> Result<()> {
        let idx = self.index(id)?;
        let channel = &self.channels[idx];
        if channel.status != ChannelStatus::Emergency {
            return Err(ChannelError::InvalidState { found: channel.status });
        }
        if !channel.is_participant(&caller) {
            return Err(ChannelError::Unauthorized);
        }
        if !channel.token_allowed(&token) {
            return Err(ChannelError::TokenNotAllowed);
        }
        if amount == 0 {
            return Err(ChannelError::NothingToWithdraw);
        }

        self.deposits[idx].draw_emergency(&caller, &token, amount)?;
        if let Err(err) = self.bank.payout(token, caller, amount) {
            self.deposits[idx].restore_emergency(&caller, &token, amount);
            return Err(err);
        }

        tracing::debug!(channel = id, amount, "emergency withdrawal settled");
        Ok(())
    }

    /// return an unslashed bond to the leader after honest closure
    pub fn reclaim_bond(&mut self, id: ChannelId, caller: AccountId) -> Result<Balance> {
        let idx = self.index(id)?;
        let channel = &self.channels[idx];
        if channel.status != ChannelStatus::Closed {
            return Err(ChannelError::InvalidState { found: channel.status });
        }
        if !channel.is_leader(&caller) {
            return Err(ChannelError::Unauthorized);
        }

        let amount = self.bonds[idx].reclaim()?;
        if let Err(err) = self.bank.payout(self.params.bond_token, caller, amount) {
            self.bonds[idx].restore();
            return Err(err);
        }

        tracing::info!(channel = id, amount, "leader bond reclaimed");
        Ok(amount)
    }

    /// drain slashed funds to the operator
    pub fn treasury_withdraw(&mut self, caller: AccountId, token: TokenId, amount: Balance) -> Result<()> {
        if caller != self.params.operator {
            return Err(ChannelError::Unauthorized);
        }
        self.treasury.debit(&token, amount)?;
        if let Err(err) = self.bank.payout(token, caller, amount) {
            self.treasury.credit(token, amount);
            return Err(err);
        }
        Ok(())
    }

    // ---- queries ----------------------------------------------------------

    pub fn channel(&self, id: ChannelId) -> Result<&ChannelRecord> {
        self.index(id).map(|idx| &self.channels[idx])
    }

    pub fn deposit_table(&self, id: ChannelId) -> Result<&DepositTable> {
        self.index(id).map(|idx| &self.deposits[idx])
    }

    pub fn deposit_of(&self, id: ChannelId, account: &AccountId, token: &TokenId) -> Result<Balance> {
        self.index(id).map(|idx| self.deposits[idx].amount_of(account, token))
    }

    /// (withdrawable amount, withdrawn flag), if a record exists
    pub fn withdrawal_status(
        &self,
        id: ChannelId,
        account: &AccountId,
        token: &TokenId,
    ) -> Result<Option<(Balance, bool)>> {
        let idx = self.index(id)?;
        Ok(self.withdrawals[idx]
            .record(account, token)
            .map(|r| (r.amount, r.withdrawn)))
    }

    pub fn root_history(&self, id: ChannelId) -> Result<&[H256]> {
        self.index(id).map(|idx| self.roots[idx].all())
    }

    pub fn bond(&self, id: ChannelId) -> Result<&BondEntry> {
        self.index(id).map(|idx| &self.bonds[idx])
    }

    pub fn treasury_balance(&self, token: &TokenId) -> Balance {
        self.treasury.balance_of(token)
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::MemoryBank;
    use threshold_sig::GroupPublicKey;

    const BOND: Balance = 1_000;

    fn account(byte: u8) -> AccountId {
        AccountId::from_raw([byte; 32])
    }

    fn token(byte: u8) -> TokenId {
        TokenId::from_raw([byte; 32])
    }

    fn operator() -> AccountId {
        account(0xf0)
    }

    fn group_key() -> GroupPublicKey {
        // generator point of secp256k1, always a valid curve point
        let bytes: [u8; 65] = hex::decode(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
        .unwrap()
        .try_into()
        .unwrap();
        GroupPublicKey::from_uncompressed(&bytes).unwrap()
    }

    fn mock_ledger() -> SettlementLedger<MemoryBank> {
        let mut bank = MemoryBank::new();
        for byte in 1..=4u8 {
            bank.mint(account(byte), token(0xbb), 10 * BOND);
            bank.mint(account(byte), token(0xaa), 1_000_000);
        }
        let params = LedgerParams {
            bond_token: token(0xbb),
            bond_amount: BOND,
            operator: operator(),
        };
        let mut ledger = SettlementLedger::new(params, bank);
        let id = ledger
            .register_manifest(operator(), ComputationManifest::default())
            .unwrap();
        assert_eq!(id, 0);
        ledger
    }

    fn open_mock_channel(ledger: &mut SettlementLedger<MemoryBank>) -> ChannelId {
        ledger
            .open_channel(
                account(1),
                vec![account(1), account(2), account(3)],
                vec![token(0xaa)],
                3_600,
                group_key(),
                0,
                100,
            )
            .unwrap()
    }

    #[test]
    fn test_open_collects_bond() {
        let mut ledger = mock_ledger();
        let id = open_mock_channel(&mut ledger);

        assert_eq!(ledger.bank().balance_of(&account(1), &token(0xbb)), 9 * BOND);
        assert_eq!(ledger.bond(id).unwrap().amount, BOND);
        assert_eq!(ledger.channel(id).unwrap().status, ChannelStatus::Initialized);
    }

    #[test]
    fn test_open_requires_known_manifest() {
        let mut ledger = mock_ledger();
        let result = ledger.open_channel(
            account(1),
            vec![account(1)],
            vec![token(0xaa)],
            10,
            group_key(),
            7,
            0,
        );
        assert_eq!(result.unwrap_err(), ChannelError::UnknownManifest);
    }

    #[test]
    fn test_open_rejects_invalid_group_key() {
        let mut ledger = mock_ledger();
        let result = ledger.open_channel(
            account(1),
            vec![account(1)],
            vec![token(0xaa)],
            10,
            GroupPublicKey::new([1u8; 32], [1u8; 32]),
            0,
            0,
        );
        assert_eq!(result.unwrap_err(), ChannelError::InvalidGroupKey);
    }

    #[test]
    fn test_deposit_gating() {
        let mut ledger = mock_ledger();
        let id = open_mock_channel(&mut ledger);
        let key = SettlementKey::from_raw([0x11; 32]);

        assert_eq!(
            ledger
                .deposit(id, account(9), token(0xaa), 10, key, 200)
                .unwrap_err(),
            ChannelError::Unauthorized
        );
        assert_eq!(
            ledger
                .deposit(id, account(2), token(0xcc), 10, key, 200)
                .unwrap_err(),
            ChannelError::TokenNotAllowed
        );
        assert_eq!(
            ledger
                .deposit(id, account(2), token(0xaa), 10, key, 100 + 3_600 + 1)
                .unwrap_err(),
            ChannelError::ChannelExpired
        );
        assert_eq!(
            ledger.deposit(99, account(2), token(0xaa), 10, key, 200).unwrap_err(),
            ChannelError::ChannelNotFound(99)
        );

        ledger.deposit(id, account(2), token(0xaa), 10, key, 200).unwrap();
        assert_eq!(
            ledger
                .deposit(id, account(2), token(0xaa), 10, SettlementKey::from_raw([0x22; 32]), 201)
                .unwrap_err(),
            ChannelError::KeyMismatch
        );
        assert_eq!(ledger.deposit_of(id, &account(2), &token(0xaa)).unwrap(), 10);
    }

    #[test]
    fn test_fee_on_transfer_credits_measured_amount() {
        let mut bank = MemoryBank::with_transfer_fee(5);
        bank.mint(account(1), token(0xbb), 10 * BOND);
        bank.mint(account(1), token(0xaa), 1_000);
        let params = LedgerParams {
            bond_token: token(0xbb),
            bond_amount: BOND,
            operator: operator(),
        };
        let mut ledger = SettlementLedger::new(params, bank);
        ledger
            .register_manifest(operator(), ComputationManifest::default())
            .unwrap();
        let id = ledger
            .open_channel(account(1), vec![account(1)], vec![token(0xaa)], 100, group_key(), 0, 0)
            .unwrap();

        let credited = ledger
            .deposit(id, account(1), token(0xaa), 100, SettlementKey::default(), 1)
            .unwrap();
        assert_eq!(credited, 95);
        assert_eq!(ledger.deposit_of(id, &account(1), &token(0xaa)).unwrap(), 95);
    }

    #[test]
    fn test_emergency_requires_elapsed_timeout() {
        let mut ledger = mock_ledger();
        let id = open_mock_channel(&mut ledger);

        assert_eq!(
            ledger.force_emergency(id, account(2), 200).unwrap_err(),
            ChannelError::ChallengeNotElapsed
        );
        assert_eq!(
            ledger.force_emergency(id, account(9), 100 + 3_600 + 1).unwrap_err(),
            ChannelError::Unauthorized
        );

        ledger.force_emergency(id, account(2), 100 + 3_600 + 1).unwrap();
        assert_eq!(ledger.channel(id).unwrap().status, ChannelStatus::Emergency);
        assert_eq!(ledger.treasury_balance(&token(0xbb)), BOND);

        // irreversible: a second force fails, and so does closure
        assert!(matches!(
            ledger.force_emergency(id, account(2), 100 + 3_600 + 2),
            Err(ChannelError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_treasury_withdraw_operator_only() {
        let mut ledger = mock_ledger();
        let id = open_mock_channel(&mut ledger);
        ledger.force_emergency(id, account(2), 100 + 3_600 + 1).unwrap();

        assert_eq!(
            ledger.treasury_withdraw(account(1), token(0xbb), BOND).unwrap_err(),
            ChannelError::Unauthorized
        );
        ledger.treasury_withdraw(operator(), token(0xbb), BOND).unwrap();
        assert_eq!(ledger.bank().balance_of(&operator(), &token(0xbb)), BOND);
        assert_eq!(ledger.treasury_balance(&token(0xbb)), 0);
    }

    #[test]
    fn test_register_manifest_operator_only() {
        let mut ledger = mock_ledger();
        assert_eq!(
            ledger
                .register_manifest(account(1), ComputationManifest::default())
                .unwrap_err(),
            ChannelError::Unauthorized
        );
    }
}
