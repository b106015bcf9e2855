use std::io;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{instruction::AccountMeta, pubkey::Pubkey};

use crate::{
    accounts::{signer, writable, AccountSlots},
    error::InstructionError,
    instruction::{InstructionKind, InstructionVariant, StakePoolInstruction},
    state::FeeType,
    tree::TreeNode,
};

const ACCOUNT_NAMES: [&str; 2] = ["StakePool", "Manager"];
const AUTHORITIES: [(usize, &str); 1] = [(1, "Manager")];

/// (Manager only) Update fee
///
/// Accounts expected:
/// 0. `[writable]` Stake pool
/// 1. `[signer]` Manager
#[derive(Clone, Debug, PartialEq)]
pub struct SetFee {
    pub(crate) program_id: Pubkey,
    /// Type of fee to update and value to update it to
    fee: Option<FeeType>,
    accounts: AccountSlots<2>,
}

impl Default for SetFee {
    fn default() -> Self {
        SetFee {
            program_id: crate::id(),
            fee: None,
            accounts: AccountSlots::default(),
        }
    }
}

impl SetFee {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn new(fee: FeeType, stake_pool: Pubkey, manager: Pubkey) -> Self {
        Self::builder()
            .set_fee(fee)
            .set_stake_pool(stake_pool)
            .set_manager(manager)
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn set_fee(mut self, fee: FeeType) -> Self {
        self.fee = Some(fee);
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

    /// Replaces slot `index` as-is, flags included.
    pub fn set_account_meta(mut self, index: usize, account: AccountMeta) -> Result<Self, InstructionError> {
        self.accounts.try_set(index, account)?;
        Ok(self)
    }

    pub fn fee(&self) -> Option<&FeeType> {
        self.fee.as_ref()
    }

    pub fn stake_pool(&self) -> Option<&AccountMeta> {
        self.accounts.get(0)
    }

    pub fn manager(&self) -> Option<&AccountMeta> {
        self.accounts.get(1)
    }

    pub fn accounts(&self) -> &AccountSlots<2> {
        &self.accounts
    }
}

impl BorshSerialize for SetFee {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        match &self.fee {
            Some(fee) => fee.serialize(writer),
            None => Err(io::Error::new(io::ErrorKind::InvalidInput, "fee is not set")),
        }
    }
}

impl BorshDeserialize for SetFee {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let fee = FeeType::deserialize_reader(reader)?;
        Ok(Self::builder().set_fee(fee))
    }
}

impl InstructionVariant for SetFee {
    const KIND: InstructionKind = InstructionKind::SetFee;

    fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    fn validate(&self) -> Result<(), InstructionError> {
        self.accounts.check_filled()?;
        self.accounts.check_signers(&AUTHORITIES)?;
        if self.fee.is_none() {
            return Err(InstructionError::MissingParameter("Fee"));
        }
        Ok(())
    }

    fn account_metas(&self) -> Result<Vec<AccountMeta>, InstructionError> {
        self.accounts.to_metas()
    }

    fn fill_accounts(&mut self, accounts: &[AccountMeta]) -> Result<(), InstructionError> {
        self.accounts.fill_from(accounts, false)
    }

    fn params_tree(&self) -> Option<TreeNode> {
        let mut params = TreeNode::new("Params");
        if let Some(fee) = &self.fee {
            params.push(TreeNode::param("Fee", fee));
        }
        Some(params)
    }

    fn accounts_tree(&self) -> TreeNode {
        self.accounts.tree(&ACCOUNT_NAMES, None)
    }

    fn wrap(self) -> StakePoolInstruction {
        StakePoolInstruction::SetFee(self)
    }
}
