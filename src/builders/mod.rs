//! One builder per stake pool instruction.

mod set_fee;
mod set_manager;
mod set_staker;
mod update_stake_pool_balance;
mod update_validator_list_balance;

pub use set_fee::SetFee;
pub use set_manager::SetManager;
pub use set_staker::SetStaker;
pub use update_stake_pool_balance::UpdateStakePoolBalance;
pub use update_validator_list_balance::{UpdateValidatorListBalance, UpdateValidatorListBalanceArgs};
