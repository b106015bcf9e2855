use std::io;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{instruction::AccountMeta, pubkey::Pubkey};

use crate::{
    accounts::{meta, writable, AccountSlots},
    address::find_withdraw_authority_program_address,
    error::InstructionError,
    instruction::{InstructionKind, InstructionVariant, StakePoolInstruction},
    state::StakePool,
    tree::TreeNode,
};

const ACCOUNT_NAMES: [&str; 7] = [
    "StakePool",
    "WithdrawAuthority",
    "ValidatorList",
    "ReserveStake",
    "ManagerFeeAccount",
    "PoolMint",
    "TokenProgram",
];

/// Updates total pool balance based on balances in the reserve and validator list
///
/// Accounts expected:
/// 0. `[writable]` Stake pool
/// 1. `[]` Stake pool withdraw authority
/// 2. `[writable]` Validator stake list storage account
/// 3. `[]` Reserve stake account
/// 4. `[writable]` Account to receive pool fee tokens
/// 5. `[writable]` Pool mint account
/// 6. `[]` Pool token program
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateStakePoolBalance {
    pub(crate) program_id: Pubkey,
    accounts: AccountSlots<7>,
}

impl Default for UpdateStakePoolBalance {
    fn default() -> Self {
        UpdateStakePoolBalance {
            program_id: crate::id(),
            accounts: AccountSlots::default(),
        }
    }
}

impl UpdateStakePoolBalance {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn new(
        stake_pool: Pubkey,
        withdraw_authority: Pubkey,
        validator_list: Pubkey,
        reserve_stake: Pubkey,
        manager_fee_account: Pubkey,
        pool_mint: Pubkey,
        token_program: Pubkey,
    ) -> Self {
        Self::builder()
            .set_stake_pool(stake_pool)
            .set_withdraw_authority(withdraw_authority)
            .set_validator_list(validator_list)
            .set_reserve_stake(reserve_stake)
            .set_manager_fee_account(manager_fee_account)
            .set_pool_mint(pool_mint)
            .set_token_program(token_program)
    }

    /// Fills every slot from the pool's on-chain state, deriving the withdraw
    /// authority under `program_id`.
    pub fn from_pool(
        program_id: &Pubkey,
        stake_pool_address: &Pubkey,
        stake_pool: &StakePool,
    ) -> Result<Self, InstructionError> {
        let (withdraw_authority, _) =
            find_withdraw_authority_program_address(program_id, stake_pool_address)?;
        Ok(Self::new(
            *stake_pool_address,
            withdraw_authority,
            stake_pool.validator_list,
            stake_pool.reserve_stake,
            stake_pool.manager_fee_account,
            stake_pool.pool_mint,
            stake_pool.token_program_id,
        )
        .with_program_id(*program_id))
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    /// Uses the SPL token program for the pool token.
    pub fn with_default_token_program(self) -> Self {
        self.set_token_program(spl_token::id())
    }

    pub fn set_stake_pool(mut self, stake_pool: Pubkey) -> Self {
        self.accounts.set(0, writable(stake_pool));
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
        self.accounts.set(3, meta(reserve_stake));
        self
    }

    pub fn set_manager_fee_account(mut self, manager_fee_account: Pubkey) -> Self {
        self.accounts.set(4, writable(manager_fee_account));
        self
    }

    pub fn set_pool_mint(mut self, pool_mint: Pubkey) -> Self {
        self.accounts.set(5, writable(pool_mint));
        self
    }

    pub fn set_token_program(mut self, token_program: Pubkey) -> Self {
        self.accounts.set(6, meta(token_program));
        self
    }

    /// Replaces slot `index` as-is, flags included.
    pub fn set_account_meta(mut self, index: usize, account: AccountMeta) -> Result<Self, InstructionError> {
        self.accounts.try_set(index, account)?;
        Ok(self)
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

    pub fn manager_fee_account(&self) -> Option<&AccountMeta> {
        self.accounts.get(4)
    }

    pub fn pool_mint(&self) -> Option<&AccountMeta> {
        self.accounts.get(5)
    }

    pub fn token_program(&self) -> Option<&AccountMeta> {
        self.accounts.get(6)
    }

    pub fn accounts(&self) -> &AccountSlots<7> {
        &self.accounts
    }
}

impl BorshSerialize for UpdateStakePoolBalance {
    fn serialize<W: io::Write>(&self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }
}

impl BorshDeserialize for UpdateStakePoolBalance {
    fn deserialize_reader<R: io::Read>(_reader: &mut R) -> io::Result<Self> {
        Ok(Self::builder())
    }
}

impl InstructionVariant for UpdateStakePoolBalance {
    const KIND: InstructionKind = InstructionKind::UpdateStakePoolBalance;

    fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    fn validate(&self) -> Result<(), InstructionError> {
        self.accounts.check_filled()
    }

    fn account_metas(&self) -> Result<Vec<AccountMeta>, InstructionError> {
        self.accounts.to_metas()
    }

    fn fill_accounts(&mut self, accounts: &[AccountMeta]) -> Result<(), InstructionError> {
        self.accounts.fill_from(accounts, false)
    }

    fn accounts_tree(&self) -> TreeNode {
        self.accounts.tree(&ACCOUNT_NAMES, None)
    }

    fn wrap(self) -> StakePoolInstruction {
        StakePoolInstruction::UpdateStakePoolBalance(self)
    }
}
