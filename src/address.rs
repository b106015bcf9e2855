//! Program derived addresses of the stake pool program.

use std::num::NonZeroU32;

use solana_program::{msg, pubkey::Pubkey};

use crate::error::InstructionError;

/// Seed prefix of transient stake accounts
pub const TRANSIENT_STAKE_SEED_PREFIX: &[u8] = b"transient";

/// Seed of the pool's withdraw authority
pub const AUTHORITY_WITHDRAW: &[u8] = b"withdraw";

/// Searches bump seeds for `seeds` under `program_id`.
pub fn find_program_address(
    program_id: &Pubkey,
    seeds: &[&[u8]],
) -> Result<(Pubkey, u8), InstructionError> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or_else(|| {
        msg!("No viable bump seed for program address under {}", program_id);
        InstructionError::AddressDerivationFailed
    })
}

/// Withdraw authority of the pool, owner of all its stake accounts.
pub fn find_withdraw_authority_program_address(
    program_id: &Pubkey,
    stake_pool_address: &Pubkey,
) -> Result<(Pubkey, u8), InstructionError> {
    find_program_address(program_id, &[stake_pool_address.as_ref(), AUTHORITY_WITHDRAW])
}

/// Canonical stake account of a validator in the pool.
pub fn find_stake_program_address(
    program_id: &Pubkey,
    vote_account_address: &Pubkey,
    stake_pool_address: &Pubkey,
) -> Result<(Pubkey, u8), InstructionError> {
    find_stake_program_address_with_seed(program_id, vote_account_address, stake_pool_address, None)
}

/// Validator stake account with an optional seed suffix, as recorded in
/// `ValidatorStakeInfo::validator_seed_suffix`.
pub fn find_stake_program_address_with_seed(
    program_id: &Pubkey,
    vote_account_address: &Pubkey,
    stake_pool_address: &Pubkey,
    seed: Option<NonZeroU32>,
) -> Result<(Pubkey, u8), InstructionError> {
    let seed_bytes = seed.map(|s| s.get().to_le_bytes());
    let mut seeds: Vec<&[u8]> = vec![vote_account_address.as_ref(), stake_pool_address.as_ref()];
    if let Some(seed_bytes) = seed_bytes.as_ref() {
        seeds.push(seed_bytes);
    }
    find_program_address(program_id, &seeds)
}

/// Transient stake account of a validator, used while stake is moving in or
/// out of the validator.
pub fn find_transient_stake_program_address(
    program_id: &Pubkey,
    vote_account_address: &Pubkey,
    stake_pool_address: &Pubkey,
    seed: u64,
) -> Result<(Pubkey, u8), InstructionError> {
    find_program_address(
        program_id,
        &[
            TRANSIENT_STAKE_SEED_PREFIX,
            vote_account_address.as_ref(),
            stake_pool_address.as_ref(),
            &seed.to_le_bytes(),
        ],
    )
}
