use std::{fmt, io};

use borsh::{BorshDeserialize, BorshSerialize};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::{
    builders::{SetFee, SetManager, SetStaker, UpdateStakePoolBalance, UpdateValidatorListBalance},
    error::InstructionError,
    tree::TreeNode,
    PROGRAM_NAME,
};

/// Discriminant of each supported instruction, as numbered by the on-chain
/// program's instruction enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum InstructionKind {
    UpdateValidatorListBalance = 6,
    UpdateStakePoolBalance = 7,
    SetManager = 11,
    SetFee = 12,
    SetStaker = 13,
}

impl InstructionKind {
    pub fn discriminant(self) -> u8 {
        self as u8
    }

    pub fn from_discriminant(tag: u8) -> Result<Self, InstructionError> {
        Self::from_u8(tag).ok_or(InstructionError::UnknownInstruction(tag))
    }

    pub fn name(self) -> &'static str {
        match self {
            InstructionKind::UpdateValidatorListBalance => "UpdateValidatorListBalance",
            InstructionKind::UpdateStakePoolBalance => "UpdateStakePoolBalance",
            InstructionKind::SetManager => "SetManager",
            InstructionKind::SetFee => "SetFee",
            InstructionKind::SetStaker => "SetStaker",
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Behaviour shared by every instruction builder.
///
/// The borsh impls of a builder cover its parameters only; accounts travel in
/// the transaction's account list.
pub trait InstructionVariant: BorshSerialize + BorshDeserialize + Sized {
    const KIND: InstructionKind;

    fn program_id(&self) -> &Pubkey;

    /// Checks every slot is filled, authorities sign, and parameters are set.
    fn validate(&self) -> Result<(), InstructionError>;

    /// Accounts in program order. Fails on the first empty slot.
    fn account_metas(&self) -> Result<Vec<AccountMeta>, InstructionError>;

    /// Places accounts read from an enclosing transaction. Fails if the
    /// variant has no room for all of them.
    fn fill_accounts(&mut self, accounts: &[AccountMeta]) -> Result<(), InstructionError>;

    fn params_tree(&self) -> Option<TreeNode> {
        None
    }

    fn accounts_tree(&self) -> TreeNode;

    fn wrap(self) -> StakePoolInstruction;

    /// Tags the builder with its discriminant. Performs no validation.
    fn build(self) -> StakePoolInstruction {
        self.wrap()
    }

    fn validate_and_build(self) -> Result<StakePoolInstruction, InstructionError> {
        self.validate()?;
        Ok(self.build())
    }
}

/// A built stake pool instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum StakePoolInstruction {
    UpdateValidatorListBalance(UpdateValidatorListBalance),
    UpdateStakePoolBalance(UpdateStakePoolBalance),
    SetManager(SetManager),
    SetFee(SetFee),
    SetStaker(SetStaker),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            StakePoolInstruction::UpdateValidatorListBalance($inner) => $body,
            StakePoolInstruction::UpdateStakePoolBalance($inner) => $body,
            StakePoolInstruction::SetManager($inner) => $body,
            StakePoolInstruction::SetFee($inner) => $body,
            StakePoolInstruction::SetStaker($inner) => $body,
        }
    };
}

fn decode_variant<T: InstructionVariant>(
    program_id: &Pubkey,
    params: &[u8],
    accounts: &[AccountMeta],
) -> Result<StakePoolInstruction, InstructionError> {
    let mut inner = T::try_from_slice(params)?;
    inner.fill_accounts(accounts)?;
    let mut built = inner.wrap();
    built.set_program_id(*program_id);
    Ok(built)
}

impl StakePoolInstruction {
    pub fn kind(&self) -> InstructionKind {
        match self {
            StakePoolInstruction::UpdateValidatorListBalance(_) => UpdateValidatorListBalance::KIND,
            StakePoolInstruction::UpdateStakePoolBalance(_) => UpdateStakePoolBalance::KIND,
            StakePoolInstruction::SetManager(_) => SetManager::KIND,
            StakePoolInstruction::SetFee(_) => SetFee::KIND,
            StakePoolInstruction::SetStaker(_) => SetStaker::KIND,
        }
    }

    pub fn discriminant(&self) -> u8 {
        self.kind().discriminant()
    }

    pub fn program_id(&self) -> &Pubkey {
        dispatch!(self, inner => inner.program_id())
    }

    fn set_program_id(&mut self, program_id: Pubkey) {
        dispatch!(self, inner => inner.program_id = program_id)
    }

    pub fn validate(&self) -> Result<(), InstructionError> {
        dispatch!(self, inner => inner.validate())
    }

    /// Discriminant byte followed by the borsh-encoded parameters.
    pub fn data(&self) -> Result<Vec<u8>, InstructionError> {
        Ok(self.try_to_vec()?)
    }

    pub fn account_metas(&self) -> Result<Vec<AccountMeta>, InstructionError> {
        dispatch!(self, inner => inner.account_metas())
    }

    /// Converts into a chain instruction ready to be put in a transaction.
    pub fn to_instruction(&self) -> Result<Instruction, InstructionError> {
        Ok(Instruction {
            program_id: *self.program_id(),
            accounts: self.account_metas()?,
            data: self.data()?,
        })
    }

    /// Decodes instruction data, placing `accounts` (taken from the enclosing
    /// transaction) in the variant's slots. More accounts than a fixed-layout
    /// variant expects is `InvalidData`.
    pub fn decode(
        program_id: &Pubkey,
        data: &[u8],
        accounts: &[AccountMeta],
    ) -> Result<Self, InstructionError> {
        let (&tag, params) = data
            .split_first()
            .ok_or_else(|| InstructionError::InvalidData("empty instruction data".to_string()))?;
        match InstructionKind::from_discriminant(tag)? {
            InstructionKind::UpdateValidatorListBalance => {
                decode_variant::<UpdateValidatorListBalance>(program_id, params, accounts)
            }
            InstructionKind::UpdateStakePoolBalance => {
                decode_variant::<UpdateStakePoolBalance>(program_id, params, accounts)
            }
            InstructionKind::SetManager => decode_variant::<SetManager>(program_id, params, accounts),
            InstructionKind::SetFee => decode_variant::<SetFee>(program_id, params, accounts),
            InstructionKind::SetStaker => decode_variant::<SetStaker>(program_id, params, accounts),
        }
    }

    pub fn from_instruction(instruction: &Instruction) -> Result<Self, InstructionError> {
        Self::decode(&instruction.program_id, &instruction.data, &instruction.accounts)
    }

    pub fn tree(&self) -> TreeNode {
        let mut node = TreeNode::new(format!("Instruction: {}", self.kind()));
        let (params, accounts) = dispatch!(self, inner => (inner.params_tree(), inner.accounts_tree()));
        if let Some(params) = params {
            node.push(params);
        }
        node.push(accounts);
        TreeNode::new(format!("Program: {} {}", PROGRAM_NAME, self.program_id())).child(node)
    }
}

impl BorshSerialize for StakePoolInstruction {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.discriminant().serialize(writer)?;
        dispatch!(self, inner => inner.serialize(writer))
    }
}

impl BorshDeserialize for StakePoolInstruction {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let tag = u8::deserialize_reader(reader)?;
        let kind = InstructionKind::from_discriminant(tag)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(match kind {
            InstructionKind::UpdateValidatorListBalance => {
                UpdateValidatorListBalance::deserialize_reader(reader)?.wrap()
            }
            InstructionKind::UpdateStakePoolBalance => {
                UpdateStakePoolBalance::deserialize_reader(reader)?.wrap()
            }
            InstructionKind::SetManager => SetManager::deserialize_reader(reader)?.wrap(),
            InstructionKind::SetFee => SetFee::deserialize_reader(reader)?.wrap(),
            InstructionKind::SetStaker => SetStaker::deserialize_reader(reader)?.wrap(),
        })
    }
}

impl fmt::Display for StakePoolInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants() {
        assert_eq!(InstructionKind::UpdateValidatorListBalance.discriminant(), 6);
        assert_eq!(InstructionKind::UpdateStakePoolBalance.discriminant(), 7);
        assert_eq!(InstructionKind::SetManager.discriminant(), 11);
        assert_eq!(InstructionKind::SetFee.discriminant(), 12);
        assert_eq!(InstructionKind::SetStaker.discriminant(), 13);
    }

    #[test]
    fn test_from_discriminant() {
        assert_eq!(
            InstructionKind::from_discriminant(13),
            Ok(InstructionKind::SetStaker)
        );
        assert_eq!(
            InstructionKind::from_discriminant(0),
            Err(InstructionError::UnknownInstruction(0))
        );
        assert_eq!(
            InstructionKind::from_discriminant(255),
            Err(InstructionError::UnknownInstruction(255))
        );
    }

    #[test]
    fn test_decode_empty_data() {
        assert!(matches!(
            StakePoolInstruction::decode(&crate::id(), &[], &[]),
            Err(InstructionError::InvalidData(_))
        ));
    }

    #[test]
    fn test_decode_unknown_tag() {
        assert_eq!(
            StakePoolInstruction::decode(&crate::id(), &[9], &[]),
            Err(InstructionError::UnknownInstruction(9))
        );
    }

    #[test]
    fn test_borsh_rejects_unknown_tag() {
        assert!(StakePoolInstruction::try_from_slice(&[42]).is_err());
    }
}
