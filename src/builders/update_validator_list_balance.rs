use std::{io, num::NonZeroU32};

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{instruction::AccountMeta, pubkey::Pubkey, stake, sysvar};

use crate::{
    accounts::{meta, writable, AccountSlots},
    address::{find_stake_program_address_with_seed, find_transient_stake_program_address},
    error::InstructionError,
    instruction::{InstructionKind, InstructionVariant, StakePoolInstruction},
    state::ValidatorList,
    tree::TreeNode,
};

const ACCOUNT_NAMES: [&str; 7] = [
    "StakePool",
    "WithdrawAuthority",
    "ValidatorList",
    "ReserveStake",
    "Clock",
    "StakeHistory",
    "StakeProgram",
];
const TRAILING_NAME: &str = "ValidatorAndTransientStakeAccounts";

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateValidatorListBalanceArgs {
    /// Index to start updating on the validator list
    pub start_index: u32,
    /// If true, don't try merging transient stake accounts into the reserve or
    /// validator stake account
    pub no_merge: bool,
}

/// Updates balances of validator and transient stake accounts in the pool
///
/// Accounts expected:
/// 0. `[]` Stake pool
/// 1. `[]` Stake pool withdraw authority
/// 2. `[writable]` Validator stake list storage account
/// 3. `[writable]` Reserve stake account
/// 4. `[]` Clock sysvar
/// 5. `[]` Stake history sysvar
/// 6. `[]` Stake program
/// 7. ..7+2N `[writable]` N pairs of validator and transient stake accounts
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateValidatorListBalance {
    pub(crate) program_id: Pubkey,
    args: Option<UpdateValidatorListBalanceArgs>,
    accounts: AccountSlots<7>,
}

impl Default for UpdateValidatorListBalance {
    fn default() -> Self {
        UpdateValidatorListBalance {
            program_id: crate::id(),
            args: None,
            accounts: AccountSlots::default(),
        }
    }
}

impl UpdateValidatorListBalance {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Builder with every fixed slot filled and the sysvars at their
    /// well-known addresses. Pairs are appended separately.
    pub fn new(
        args: UpdateValidatorListBalanceArgs,
        stake_pool: Pubkey,
        withdraw_authority: Pubkey,
        validator_list: Pubkey,
        reserve_stake: Pubkey,
    ) -> Self {
        Self::builder()
            .set_args(args)
            .set_stake_pool(stake_pool)
            .set_withdraw_authority(withdraw_authority)
            .set_validator_list(validator_list)
            .set_reserve_stake(reserve_stake)
            .with_default_sysvars()
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_default_sysvars(self) -> Self {
        self.set_clock(sysvar::clock::id())
            .set_stake_history(sysvar::stake_history::id())
            .set_stake_program(stake::program::id())
    }

    pub fn set_args(mut self, args: UpdateValidatorListBalanceArgs) -> Self {
        self.args = Some(args);
        self
    }

    pub fn set_stake_pool(mut self, stake_pool: Pubkey) -> Self {
        self.accounts.set(0, meta(stake_pool));
        self
    }

    pub fn set_withdraw_authority(mut self, withdraw_authority: Pubkey) -> Self {
        self.accounts.set(1, meta(withdraw_authority));
        self
    }

    pub fn set_validator_list(mut self, validator_list: Pubkey) -> Self {
        self.accounts.set(2, writable(validator_list));
        self
    }

    pub fn set_reserve_stake(mut self, reserve_stake: Pubkey) -> Self {
        self.accounts.set(3, writable(reserve_stake));
        self
    }

    pub fn set_clock(mut self, clock: Pubkey) -> Self {
        self.accounts.set(4, meta(clock));
        self
    }

    pub fn set_stake_history(mut self, stake_history: Pubkey) -> Self {
        self.accounts.set(5, meta(stake_history));
        self
    }

    pub fn set_stake_program(mut self, stake_program: Pubkey) -> Self {
        self.accounts.set(6, meta(stake_program));
        self
    }

    /// Appends already-paired addresses: validator, transient, validator, ...
    pub fn set_validator_and_transient_accounts(
        mut self,
        accounts: impl IntoIterator<Item = Pubkey>,
    ) -> Self {
        for account in accounts {
            self.accounts.push_trailing(writable(account));
        }
        self
    }

    pub fn add_validator_and_transient_accounts(
        mut self,
        validator_stake_account: Pubkey,
        transient_stake_account: Pubkey,
    ) -> Self {
        self.accounts.push_trailing(writable(validator_stake_account));
        self.accounts.push_trailing(writable(transient_stake_account));
        self
    }

    /// Derives and appends the stake and transient stake accounts of the
    /// validator voting at `vote_account_address`. The stake pool slot must
    /// already be set.
    pub fn add_validator(
        self,
        vote_account_address: &Pubkey,
        validator_seed: Option<NonZeroU32>,
        transient_seed: u64,
    ) -> Result<Self, InstructionError> {
        let stake_pool = self
            .stake_pool()
            .map(|a| a.pubkey)
            .ok_or(InstructionError::MissingAccount { index: 0 })?;
        let (validator_stake_account, _) = find_stake_program_address_with_seed(
            &self.program_id,
            vote_account_address,
            &stake_pool,
            validator_seed,
        )?;
        let (transient_stake_account, _) = find_transient_stake_program_address(
            &self.program_id,
            vote_account_address,
            &stake_pool,
            transient_seed,
        )?;
        Ok(self.add_validator_and_transient_accounts(validator_stake_account, transient_stake_account))
    }

    /// Appends the pair of every vote account found in `validator_list`, using
    /// the seeds recorded there. Vote accounts missing from the list are skipped.
    pub fn add_validators_from_list(
        self,
        validator_list: &ValidatorList,
        vote_account_addresses: &[Pubkey],
    ) -> Result<Self, InstructionError> {
        vote_account_addresses
            .iter()
            .filter_map(|vote| validator_list.find(vote))
            .try_fold(self, |ix, info| {
                ix.add_validator(
                    &info.vote_account_address,
                    NonZeroU32::new(info.validator_seed_suffix),
                    info.transient_seed_suffix,
                )
            })
    }

    /// Replaces fixed slot `index` as-is, flags included.
    pub fn set_account_meta(mut self, index: usize, account: AccountMeta) -> Result<Self, InstructionError> {
        self.accounts.try_set(index, account)?;
        Ok(self)
    }

    pub fn args(&self) -> Option<&UpdateValidatorListBalanceArgs> {
        self.args.as_ref()
    }

    pub fn stake_pool(&self) -> Option<&AccountMeta> {
        self.accounts.get(0)
    }

    pub fn withdraw_authority(&self) -> Option<&AccountMeta> {
        self.accounts.get(1)
    }

    pub fn validator_list(&self) -> Option<&AccountMeta> {
        self.accounts.get(2)
    }

    pub fn reserve_stake(&self) -> Option<&AccountMeta> {
        self.accounts.get(3)
    }

    pub fn clock(&self) -> Option<&AccountMeta> {
        self.accounts.get(4)
    }

    pub fn stake_history(&self) -> Option<&AccountMeta> {
        self.accounts.get(5)
    }

    pub fn stake_program(&self) -> Option<&AccountMeta> {
        self.accounts.get(6)
    }

    pub fn validator_and_transient_stake_accounts(&self) -> &[AccountMeta] {
        self.accounts.trailing()
    }

    /// Validator stake account of the `n`th pair.
    pub fn validator_stake_account(&self, n: usize) -> Option<&AccountMeta> {
        self.accounts.trailing().get(2 * n)
    }

    /// Transient stake account of the `n`th pair.
    pub fn transient_stake_account(&self, n: usize) -> Option<&AccountMeta> {
        self.accounts.trailing().get(2 * n + 1)
    }

    pub fn accounts(&self) -> &AccountSlots<7> {
        &self.accounts
    }
}

impl BorshSerialize for UpdateValidatorListBalance {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        match &self.args {
            Some(args) => args.serialize(writer),
            None => Err(io::Error::new(io::ErrorKind::InvalidInput, "args are not set")),
        }
    }
}

impl BorshDeserialize for UpdateValidatorListBalance {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let args = UpdateValidatorListBalanceArgs::deserialize_reader(reader)?;
        Ok(Self::builder().set_args(args))
    }
}

impl InstructionVariant for UpdateValidatorListBalance {
    const KIND: InstructionKind = InstructionKind::UpdateValidatorListBalance;

    fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    fn validate(&self) -> Result<(), InstructionError> {
        self.accounts.check_filled()?;
        let trailing = self.accounts.trailing().len();
        if trailing % 2 != 0 {
            // last validator stake account has no transient partner
            return Err(InstructionError::MissingAccount {
                index: AccountSlots::<7>::FIXED_LEN + trailing,
            });
        }
        if self.args.is_none() {
            return Err(InstructionError::MissingParameter("Args"));
        }
        Ok(())
    }

    fn account_metas(&self) -> Result<Vec<AccountMeta>, InstructionError> {
        self.accounts.to_metas()
    }

    fn fill_accounts(&mut self, accounts: &[AccountMeta]) -> Result<(), InstructionError> {
        self.accounts.fill_from(accounts, true)
    }

    fn params_tree(&self) -> Option<TreeNode> {
        let mut params = TreeNode::new("Params");
        if let Some(args) = &self.args {
            params.push(TreeNode::param("StartIndex", args.start_index));
            params.push(TreeNode::param("NoMerge", args.no_merge));
        }
        Some(params)
    }

    fn accounts_tree(&self) -> TreeNode {
        self.accounts.tree(&ACCOUNT_NAMES, Some(TRAILING_NAME))
    }

    fn wrap(self) -> StakePoolInstruction {
        StakePoolInstruction::UpdateValidatorListBalance(self)
    }
}
