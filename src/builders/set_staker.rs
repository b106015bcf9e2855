use std::io;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{instruction::AccountMeta, pubkey::Pubkey};

use crate::{
    accounts::{meta, signer, writable, AccountSlots},
    error::InstructionError,
    instruction::{InstructionKind, InstructionVariant, StakePoolInstruction},
    tree::TreeNode,
};

const ACCOUNT_NAMES: [&str; 3] = ["StakePool", "CurrentStaker", "NewStaker"];
const AUTHORITIES: [(usize, &str); 1] = [(1, "CurrentStaker")];

/// (Manager or staker only) Update staker
///
/// Accounts expected:
/// 0. `[writable]` Stake pool
/// 1. `[signer]` Manager or current staker
/// 2. `[]` New staker
#[derive(Clone, Debug, PartialEq)]
pub struct SetStaker {
    pub(crate) program_id: Pubkey,
    accounts: AccountSlots<3>,
}

impl Default for SetStaker {
    fn default() -> Self {
        SetStaker {
            program_id: crate::id(),
            accounts: AccountSlots::default(),
        }
    }
}

impl SetStaker {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn new(stake_pool: Pubkey, current_staker: Pubkey, new_staker: Pubkey) -> Self {
        Self::builder()
            .set_stake_pool(stake_pool)
            .set_current_staker(current_staker)
            .set_new_staker(new_staker)
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn set_stake_pool(mut self, stake_pool: Pubkey) -> Self {
        self.accounts.set(0, writable(stake_pool));
        self
    }

    /// Either the pool manager or its current staker.
    pub fn set_current_staker(mut self, current_staker: Pubkey) -> Self {
        self.accounts.set(1, signer(current_staker));
        self
    }

    pub fn set_new_staker(mut self, new_staker: Pubkey) -> Self {
        self.accounts.set(2, meta(new_staker));
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

    pub fn current_staker(&self) -> Option<&AccountMeta> {
        self.accounts.get(1)
    }

    pub fn new_staker(&self) -> Option<&AccountMeta> {
        self.accounts.get(2)
    }

    pub fn accounts(&self) -> &AccountSlots<3> {
        &self.accounts
    }
}

impl BorshSerialize for SetStaker {
    fn serialize<W: io::Write>(&self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }
}

impl BorshDeserialize for SetStaker {
    fn deserialize_reader<R: io::Read>(_reader: &mut R) -> io::Result<Self> {
        Ok(Self::builder())
    }
}

impl InstructionVariant for SetStaker {
    const KIND: InstructionKind = InstructionKind::SetStaker;

    fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    fn validate(&self) -> Result<(), InstructionError> {
        self.accounts.check_filled()?;
        self.accounts.check_signers(&AUTHORITIES)
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
        StakePoolInstruction::SetStaker(self)
    }
}
