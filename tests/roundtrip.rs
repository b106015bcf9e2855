//! Property-based tests (proptest): chain instructions decode back to the
//! builder they were encoded from.

use proptest::prelude::*;
use solana_program::pubkey::Pubkey;
use stake_pool_instructions::{
    state::{Fee, FeeType},
    InstructionVariant, SetFee, SetManager, SetStaker, StakePoolInstruction, UpdateStakePoolBalance,
    UpdateValidatorListBalance, UpdateValidatorListBalanceArgs,
};

fn pubkey() -> impl Strategy<Value = Pubkey> {
    any::<[u8; 32]>().prop_map(Pubkey::new_from_array)
}

fn fee() -> impl Strategy<Value = Fee> {
    (any::<u64>(), any::<u64>()).prop_map(|(numerator, denominator)| Fee::new(numerator, denominator))
}

fn fee_type() -> impl Strategy<Value = FeeType> {
    prop_oneof![
        any::<u8>().prop_map(FeeType::SolReferral),
        any::<u8>().prop_map(FeeType::StakeReferral),
        fee().prop_map(FeeType::Epoch),
        fee().prop_map(FeeType::StakeWithdrawal),
        fee().prop_map(FeeType::SolDeposit),
        fee().prop_map(FeeType::StakeDeposit),
        fee().prop_map(FeeType::SolWithdrawal),
    ]
}

// ═══════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_set_fee_decodes_to_itself(
        fee in fee_type(),
        pool in pubkey(),
        manager in pubkey(),
    ) {
        let built = SetFee::new(fee, pool, manager).build();
        let decoded = StakePoolInstruction::from_instruction(&built.to_instruction().unwrap()).unwrap();
        prop_assert_eq!(decoded, built);
    }

    #[test]
    fn prop_set_manager_decodes_to_itself(
        program_id in pubkey(),
        keys in any::<[[u8; 32]; 4]>(),
    ) {
        let [pool, manager, new_manager, fee_account] = keys.map(Pubkey::new_from_array);
        let built = SetManager::new(pool, manager, new_manager, fee_account)
            .with_program_id(program_id)
            .build();
        let decoded = StakePoolInstruction::from_instruction(&built.to_instruction().unwrap()).unwrap();
        prop_assert_eq!(decoded.program_id(), &program_id);
        prop_assert_eq!(decoded, built);
    }

    #[test]
    fn prop_set_staker_decodes_to_itself(
        program_id in pubkey(),
        keys in any::<[[u8; 32]; 3]>(),
    ) {
        let [pool, staker, new_staker] = keys.map(Pubkey::new_from_array);
        let built = SetStaker::new(pool, staker, new_staker)
            .with_program_id(program_id)
            .build();
        let chain_ix = built.to_instruction().unwrap();
        prop_assert_eq!(&chain_ix.data, &vec![13u8]);
        let decoded = StakePoolInstruction::from_instruction(&chain_ix).unwrap();
        prop_assert_eq!(decoded, built);
    }

    #[test]
    fn prop_update_stake_pool_balance_decodes_to_itself(
        keys in any::<[[u8; 32]; 7]>(),
    ) {
        let [pool, authority, list, reserve, fee_account, mint, token_program] =
            keys.map(Pubkey::new_from_array);
        let built = UpdateStakePoolBalance::new(pool, authority, list, reserve, fee_account, mint, token_program)
            .build();
        let chain_ix = built.to_instruction().unwrap();
        prop_assert_eq!(&chain_ix.data, &vec![7u8]);
        let decoded = StakePoolInstruction::from_instruction(&chain_ix).unwrap();
        prop_assert_eq!(decoded, built);
    }

    #[test]
    fn prop_update_validator_list_balance_decodes_to_itself(
        start_index in any::<u32>(),
        no_merge in any::<bool>(),
        pool in pubkey(),
        pairs in proptest::collection::vec((pubkey(), pubkey()), 0..8),
    ) {
        let args = UpdateValidatorListBalanceArgs { start_index, no_merge };
        let built = pairs
            .iter()
            .fold(
                UpdateValidatorListBalance::new(
                    args,
                    pool,
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                ),
                |ix, (validator, transient)| ix.add_validator_and_transient_accounts(*validator, *transient),
            )
            .build();

        let chain_ix = built.to_instruction().unwrap();
        prop_assert_eq!(chain_ix.accounts.len(), 7 + 2 * pairs.len());
        let decoded = StakePoolInstruction::from_instruction(&chain_ix).unwrap();
        prop_assert_eq!(decoded, built);
    }

    #[test]
    fn prop_unknown_discriminant_rejected(tag in 0u8..=255) {
        prop_assume!(![6u8, 7, 11, 12, 13].contains(&tag));
        let result = StakePoolInstruction::decode(&stake_pool_instructions::id(), &[tag], &[]);
        prop_assert!(result.is_err());
    }
}
