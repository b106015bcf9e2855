use std::io;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{instruction::AccountMeta, pubkey::Pubkey};
use spl_associated_token_account::get_associated_token_address;

use crate::{
    accounts::{meta, signer, writable, AccountSlots},
    error::InstructionError,
    instruction::{InstructionKind, InstructionVariant, StakePoolInstruction},
    tree::TreeNode,
};

const ACCOUNT_NAMES: [&str; 4] = ["StakePool", "Manager", "NewManager", "NewManagerFeeAccount"];
const AUTHORITIES: [(usize, &str); 2] = [(1, "Manager"), (2, "NewManager")];

/// (Manager only) Update manager
///
/// Accounts expected:
/// 0. `[writable]` Stake pool
/// 1. `[signer]` Manager
/// 2. `[signer]` New manager
/// 3. `[]` New manager fee account
#[derive(Clone, Debug, PartialEq)]
pub struct SetManager {
    pub(crate) program_id: Pubkey,
    accounts: AccountSlots<4>,
}

impl Default for SetManager {
    fn default() -> Self {
        SetManager {
            program_id: crate::id(),
            accounts: AccountSlots::default(),
        }
    }
}

impl SetManager {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn new(
        stake_pool: Pubkey,
        manager: Pubkey,
        new_manager: Pubkey,
        new_manager_fee_account: Pubkey,
    ) -> Self {
        Self::builder()
            .set_stake_pool(stake_pool)
            .set_manager(manager)
            .set_new_manager(new_manager)
            .set_new_manager_fee_account(new_manager_fee_account)
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn set_stake_pool(mut self, stake_pool: Pubkey) -> Self {
        self.accounts.set(0, writable(stake_pool));
        self
    }

    pub fn set_manager(mut self, manager: Pubkey) -> Self {
        self.accounts.set(1, signer(manager));
        self
    }

    pub fn set_new_manager(mut self, new_manager: Pubkey) -> Self {
        self.accounts.set(2, signer(new_manager));
        self
    }

    pub fn set_new_manager_fee_account(mut self, new_manager_fee_account: Pubkey) -> Self {
        self.accounts.set(3, meta(new_manager_fee_account));
        self
    }

    /// Uses the new manager's associated token account for `pool_mint` as the
    /// fee account.
    pub fn set_new_manager_fee_account_for_mint(self, new_manager: &Pubkey, pool_mint: &Pubkey) -> Self {
        self.set_new_manager_fee_account(get_associated_token_address(new_manager, pool_mint))
    }

    /// Replaces slot `index` as-is, flags included.
    pub fn set_account_meta(mut self, index: usize, account: AccountMeta) -> Result<Self, InstructionError> {
        self.accounts.try_set(index, account)?;
        Ok(self)
    }

    pub fn stake_pool(&self) -> Option<&AccountMeta> {
        self.accounts.get(0)
    }

    pub fn manager(&self) -> Option<&AccountMeta> {
        self.accounts.get(1)
    }

    pub fn new_manager(&self) -> Option<&AccountMeta> {
        self.accounts.get(2)
    }

    pub fn new_manager_fee_account(&self) -> Option<&AccountMeta> {
        self.accounts.get(3)
    }

    pub fn accounts(&self) -> &AccountSlots<4> {
        &self.accounts
    }
}

// SetManager carries no parameters.
impl BorshSerialize for SetManager {
    fn serialize<W: io::Write>(&self, _writer: &mut W) -> io::Result<()> {
        Ok(())
    }
}

impl BorshDeserialize for SetManager {
    fn deserialize_reader<R: io::Read>(_reader: &mut R) -> io::Result<Self> {
        Ok(Self::builder())
    }
}

impl InstructionVariant for SetManager {
    const KIND: InstructionKind = InstructionKind::SetManager;

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
        StakePoolInstruction::SetManager(self)
    }
}
