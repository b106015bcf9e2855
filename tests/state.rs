//! Building instructions from decoded on-chain account data.

use borsh::BorshSerialize;
use pretty_assertions::assert_eq;
use solana_program::pubkey::Pubkey;
use stake_pool_instructions::{
    address::find_withdraw_authority_program_address,
    state::{AccountType, Fee, FutureEpoch, StakePool, ValidatorList, ValidatorStakeInfo},
    InstructionError, InstructionVariant, UpdateStakePoolBalance, UpdateValidatorListBalance,
    UpdateValidatorListBalanceArgs,
};

fn pool_account_data() -> (StakePool, Vec<u8>) {
    let pool = StakePool {
        account_type: AccountType::StakePool,
        manager: Pubkey::new_unique(),
        staker: Pubkey::new_unique(),
        validator_list: Pubkey::new_unique(),
        reserve_stake: Pubkey::new_unique(),
        pool_mint: Pubkey::new_unique(),
        manager_fee_account: Pubkey::new_unique(),
        token_program_id: spl_token::id(),
        epoch_fee: Fee::new(2, 100),
        next_epoch_fee: FutureEpoch::One(Fee::new(3, 100)),
        ..StakePool::default()
    };
    let mut data = pool.try_to_vec().unwrap();
    // accounts are allocated larger than the serialized state
    data.resize(data.len() + 128, 0);
    (pool, data)
}

#[test]
fn test_update_stake_pool_balance_from_account_data() {
    let pool_address = Pubkey::new_unique();
    let (pool, data) = pool_account_data();

    let unpacked = StakePool::unpack(&data).unwrap();
    assert_eq!(unpacked, pool);
    assert_eq!(unpacked.next_epoch_fee.get(), Some(&Fee::new(3, 100)));

    let ix = UpdateStakePoolBalance::from_pool(&stake_pool_instructions::id(), &pool_address, &unpacked)
        .unwrap()
        .validate_and_build()
        .unwrap()
        .to_instruction()
        .unwrap();
    let (authority, _) =
        find_withdraw_authority_program_address(&stake_pool_instructions::id(), &pool_address).unwrap();

    let keys: Vec<Pubkey> = ix.accounts.iter().map(|a| a.pubkey).collect();
    assert_eq!(
        keys,
        vec![
            pool_address,
            authority,
            pool.validator_list,
            pool.reserve_stake,
            pool.manager_fee_account,
            pool.pool_mint,
            spl_token::id(),
        ]
    );
    assert_eq!(ix.data, vec![7]);
}

#[test]
fn test_update_validator_list_balance_from_account_data() {
    let pool_address = Pubkey::new_unique();
    let (pool, _) = pool_account_data();
    let vote = Pubkey::new_unique();
    let list = ValidatorList {
        account_type: AccountType::ValidatorList,
        max_validators: 4,
        validators: vec![ValidatorStakeInfo {
            vote_account_address: vote,
            transient_seed_suffix: 11,
            ..ValidatorStakeInfo::default()
        }],
    };
    let mut list_data = list.try_to_vec().unwrap();
    list_data.resize(list_data.len() + 3 * 73, 0);
    let list = ValidatorList::unpack(&list_data).unwrap();

    let (authority, _) =
        find_withdraw_authority_program_address(&stake_pool_instructions::id(), &pool_address).unwrap();
    let ix = UpdateValidatorListBalance::new(
        UpdateValidatorListBalanceArgs {
            start_index: 0,
            no_merge: false,
        },
        pool_address,
        authority,
        pool.validator_list,
        pool.reserve_stake,
    )
    .add_validators_from_list(&list, &[vote])
    .unwrap()
    .validate_and_build()
    .unwrap();

    assert_eq!(ix.account_metas().unwrap().len(), 9);
}

#[test]
fn test_unpack_rejects_other_account_types() {
    let list = ValidatorList {
        account_type: AccountType::ValidatorList,
        ..ValidatorList::default()
    };
    let data = list.try_to_vec().unwrap();
    assert!(matches!(
        StakePool::unpack(&data),
        Err(InstructionError::InvalidData(_))
    ));
}
