use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::error::InstructionError;

/// Discriminates the kind of data held by a stake pool program account.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountType {
    /// Account not yet initialized
    #[default]
    Uninitialized,
    /// Stake pool state
    StakePool,
    /// Validator stake list storage
    ValidatorList,
}

/// Fee rate as a ratio, applied to the base amount it is assessed on.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fee {
    /// denominator of the fee ratio
    pub denominator: u64,
    /// numerator of the fee ratio
    pub numerator: u64,
}

impl Fee {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Fee {
            denominator,
            numerator,
        }
    }
}

/// Which fee to update, and its new value. Carried by `SetFee`.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeType {
    /// Referral fee for SOL deposits, as a percentage (0 - 100)
    SolReferral(u8),
    /// Referral fee for stake deposits, as a percentage (0 - 100)
    StakeReferral(u8),
    /// Management fee paid per epoch
    Epoch(Fee),
    /// Stake withdrawal fee
    StakeWithdrawal(Fee),
    /// Deposit fee for SOL deposits
    SolDeposit(Fee),
    /// Deposit fee for stake deposits
    StakeDeposit(Fee),
    /// SOL withdrawal fee
    SolWithdrawal(Fee),
}

/// Lockup that all stakes in the pool must have.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lockup {
    pub unix_timestamp: i64,
    pub epoch: u64,
    pub custodian: Pubkey,
}

/// Value scheduled to take effect in a later epoch.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FutureEpoch<T> {
    /// Nothing is set
    #[default]
    None,
    /// Value is ready after the next epoch boundary
    One(T),
    /// Value is ready after two epoch boundaries
    Two(T),
}

impl<T> FutureEpoch<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            FutureEpoch::None => None,
            FutureEpoch::One(v) | FutureEpoch::Two(v) => Some(v),
        }
    }
}

/// On-chain state of a stake pool.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq)]
pub struct StakePool {
    /// Account type, must be `StakePool` currently
    pub account_type: AccountType,

    /// Manager authority, allows for updating the staker, manager, and fee account
    pub manager: Pubkey,

    /// Staker authority, allows for adding and removing validators, and managing stake distribution
    pub staker: Pubkey,

    /// Stake deposit authority
    pub stake_deposit_authority: Pubkey,

    /// Bump seed of the withdraw authority program address
    pub stake_withdraw_bump_seed: u8,

    /// Validator stake list storage account
    pub validator_list: Pubkey,

    /// Reserve stake account, holds deactivated stake
    pub reserve_stake: Pubkey,

    /// Pool Mint
    pub pool_mint: Pubkey,

    /// Manager fee account
    pub manager_fee_account: Pubkey,

    /// Pool token program id
    pub token_program_id: Pubkey,

    /// Total stake under management
    pub total_lamports: u64,

    /// Total supply of pool tokens (should always match the supply in the Pool Mint)
    pub pool_token_supply: u64,

    /// Last epoch the `total_lamports` field was updated
    pub last_update_epoch: u64,

    pub lockup: Lockup,

    /// Fee taken as a proportion of rewards each epoch
    pub epoch_fee: Fee,

    pub next_epoch_fee: FutureEpoch<Fee>,

    pub preferred_deposit_validator_vote_address: Option<Pubkey>,

    pub preferred_withdraw_validator_vote_address: Option<Pubkey>,

    pub stake_deposit_fee: Fee,

    pub stake_withdrawal_fee: Fee,

    pub next_stake_withdrawal_fee: FutureEpoch<Fee>,

    /// Fees paid out to referrers on referred stake deposits, as a percentage (0 - 100)
    pub stake_referral_fee: u8,

    /// When set, `DepositSol` requires a signature from this authority
    pub sol_deposit_authority: Option<Pubkey>,

    pub sol_deposit_fee: Fee,

    /// Fees paid out to referrers on referred SOL deposits, as a percentage (0 - 100)
    pub sol_referral_fee: u8,

    /// When set, `WithdrawSol` requires a signature from this authority
    pub sol_withdraw_authority: Option<Pubkey>,

    pub sol_withdrawal_fee: Fee,

    pub next_sol_withdrawal_fee: FutureEpoch<Fee>,

    /// Last epoch's total pool tokens, used only for APR estimation
    pub last_epoch_pool_token_supply: u64,

    /// Last epoch's total lamports, used only for APR estimation
    pub last_epoch_total_lamports: u64,
}

impl StakePool {
    /// Decodes the pool from raw account data. Trailing padding is ignored.
    pub fn unpack(data: &[u8]) -> Result<Self, InstructionError> {
        let pool = Self::deserialize(&mut &data[..])?;
        if pool.account_type != AccountType::StakePool {
            return Err(InstructionError::InvalidData(format!(
                "expected StakePool account, found {:?}",
                pool.account_type
            )));
        }
        Ok(pool)
    }
}

/// Status of a validator stake account within the pool.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StakeStatus {
    #[default]
    Active,
    DeactivatingTransient,
    ReadyForRemoval,
    DeactivatingValidator,
    DeactivatingAll,
}

/// Entry of the validator list.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidatorStakeInfo {
    /// Amount of lamports on the validator stake account, including rent
    pub active_stake_lamports: u64,

    /// Amount of transient stake delegated to this validator
    pub transient_stake_lamports: u64,

    /// Last epoch the active and transient stake lamports fields were updated
    pub last_update_epoch: u64,

    /// Transient account seed suffix, used to derive the transient stake account address
    pub transient_seed_suffix: u64,

    pub unused: u32,

    /// Validator account seed suffix, zero when the validator stake account has no suffix
    pub validator_seed_suffix: u32,

    pub status: StakeStatus,

    /// Validator vote account address
    pub vote_account_address: Pubkey,
}

/// Storage list for all validator stake accounts in the pool.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq)]
pub struct ValidatorList {
    pub account_type: AccountType,
    pub max_validators: u32,
    pub validators: Vec<ValidatorStakeInfo>,
}

impl ValidatorList {
    /// Decodes the list from raw account data. Trailing capacity is ignored.
    pub fn unpack(data: &[u8]) -> Result<Self, InstructionError> {
        let list = Self::deserialize(&mut &data[..])?;
        if list.account_type != AccountType::ValidatorList {
            return Err(InstructionError::InvalidData(format!(
                "expected ValidatorList account, found {:?}",
                list.account_type
            )));
        }
        Ok(list)
    }

    pub fn find(&self, vote_account_address: &Pubkey) -> Option<&ValidatorStakeInfo> {
        self.validators
            .iter()
            .find(|v| v.vote_account_address == *vote_account_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(vote: Pubkey) -> ValidatorStakeInfo {
        ValidatorStakeInfo {
            active_stake_lamports: 5_000_000_000,
            transient_seed_suffix: 7,
            vote_account_address: vote,
            ..ValidatorStakeInfo::default()
        }
    }

    #[test]
    fn test_future_epoch_get() {
        let fee = Fee::new(1, 100);
        assert_eq!(FutureEpoch::<Fee>::None.get(), None);
        assert_eq!(FutureEpoch::One(fee).get(), Some(&fee));
        assert_eq!(FutureEpoch::Two(fee).get(), Some(&fee));
    }

    #[test]
    fn test_fee_type_wire_layout() {
        // enum tag, then denominator and numerator little-endian
        let bytes = FeeType::Epoch(Fee::new(3, 100)).try_to_vec().unwrap();
        let mut expected = vec![2u8];
        expected.extend_from_slice(&100u64.to_le_bytes());
        expected.extend_from_slice(&3u64.to_le_bytes());
        assert_eq!(bytes, expected);

        assert_eq!(FeeType::SolReferral(50).try_to_vec().unwrap(), vec![0u8, 50]);
    }

    #[test]
    fn test_stake_pool_unpack_ignores_padding() {
        let pool = StakePool {
            account_type: AccountType::StakePool,
            manager: Pubkey::new_unique(),
            total_lamports: 42,
            preferred_deposit_validator_vote_address: Some(Pubkey::new_unique()),
            next_epoch_fee: FutureEpoch::Two(Fee::new(1, 10)),
            ..StakePool::default()
        };
        let mut data = pool.try_to_vec().unwrap();
        data.extend_from_slice(&[0u8; 64]);
        assert_eq!(StakePool::unpack(&data).unwrap(), pool);
    }

    #[test]
    fn test_stake_pool_unpack_wrong_type() {
        let data = StakePool::default().try_to_vec().unwrap();
        assert!(matches!(
            StakePool::unpack(&data),
            Err(InstructionError::InvalidData(_))
        ));
    }

    #[test]
    fn test_validator_list_find() {
        let vote_a = Pubkey::new_unique();
        let vote_b = Pubkey::new_unique();
        let list = ValidatorList {
            account_type: AccountType::ValidatorList,
            max_validators: 10,
            validators: vec![validator(vote_a), validator(vote_b)],
        };
        assert_eq!(list.find(&vote_b).unwrap().vote_account_address, vote_b);
        assert!(list.find(&Pubkey::new_unique()).is_none());

        let mut data = list.try_to_vec().unwrap();
        data.resize(data.len() + 8 * 73, 0);
        assert_eq!(ValidatorList::unpack(&data).unwrap(), list);
    }

    #[test]
    fn test_validator_list_unpack_truncated() {
        assert!(ValidatorList::unpack(&[1u8, 0, 0]).is_err());
    }
}
