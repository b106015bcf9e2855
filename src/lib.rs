//! Client-side instruction builders for the SPL stake pool program.
//!
//! Each supported instruction has a builder in [`builders`] that fills the
//! program's positional account slots, then validates and tags itself into a
//! [`StakePoolInstruction`]. That can be encoded into a chain
//! [`Instruction`](solana_program::instruction::Instruction), decoded back
//! from one, and rendered as a tree for debugging.

pub mod accounts;
pub mod address;
pub mod builders;
pub mod error;
pub mod instruction;
pub mod state;
pub mod tree;

pub use crate::{
    builders::{
        SetFee, SetManager, SetStaker, UpdateStakePoolBalance, UpdateValidatorListBalance,
        UpdateValidatorListBalanceArgs,
    },
    error::InstructionError,
    instruction::{InstructionKind, InstructionVariant, StakePoolInstruction},
};

solana_program::declare_id!("SPoo1Ku8WFXoNDMHPsrGSTSG1Y47rzgn41SLUNakuHy");

/// Program name shown in rendered instruction trees
pub const PROGRAM_NAME: &str = "StakePool";
