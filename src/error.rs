use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Errors raised while assembling, validating or decoding a stake pool
/// instruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstructionError {
    /// An account slot was left empty.
    #[error("accounts[{index}] is not set")]
    MissingAccount { index: usize },

    /// The authority in the slot is present but not flagged as a signer.
    #[error("accounts[{index}] ({name}) should be a signer")]
    MissingSignature { index: usize, name: &'static str },

    /// A required instruction parameter was never set.
    #[error("{0} parameter is not set")]
    MissingParameter(&'static str),

    /// A slot index past the variant's fixed account list.
    #[error("accounts[{index}] is out of range, the instruction has {len} slots")]
    AccountIndexOutOfRange { index: usize, len: usize },

    #[error("unable to find a viable program address bump seed")]
    AddressDerivationFailed,

    #[error("unknown stake pool instruction discriminant {0}")]
    UnknownInstruction(u8),

    #[error("invalid instruction data: {0}")]
    InvalidData(String),
}

impl From<std::io::Error> for InstructionError {
    fn from(e: std::io::Error) -> Self {
        InstructionError::InvalidData(e.to_string())
    }
}

impl From<InstructionError> for ProgramError {
    fn from(e: InstructionError) -> Self {
        match e {
            InstructionError::MissingAccount { .. } => ProgramError::NotEnoughAccountKeys,
            InstructionError::MissingSignature { .. } => ProgramError::MissingRequiredSignature,
            InstructionError::AccountIndexOutOfRange { .. } => ProgramError::InvalidArgument,
            InstructionError::AddressDerivationFailed => ProgramError::InvalidSeeds,
            InstructionError::MissingParameter(_)
            | InstructionError::UnknownInstruction(_)
            | InstructionError::InvalidData(_) => ProgramError::InvalidInstructionData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InstructionError::MissingAccount { index: 3 }.to_string(),
            "accounts[3] is not set"
        );
        assert_eq!(
            InstructionError::MissingSignature { index: 1, name: "Manager" }.to_string(),
            "accounts[1] (Manager) should be a signer"
        );
        assert_eq!(
            InstructionError::MissingParameter("Fee").to_string(),
            "Fee parameter is not set"
        );
    }

    #[test]
    fn test_error_to_program_error() {
        let err: ProgramError = InstructionError::MissingAccount { index: 0 }.into();
        assert_eq!(err, ProgramError::NotEnoughAccountKeys);

        let err: ProgramError = InstructionError::MissingSignature { index: 1, name: "Staker" }.into();
        assert_eq!(err, ProgramError::MissingRequiredSignature);

        let err: ProgramError = InstructionError::AccountIndexOutOfRange { index: 3, len: 3 }.into();
        assert_eq!(err, ProgramError::InvalidArgument);

        let err: ProgramError = InstructionError::AddressDerivationFailed.into();
        assert_eq!(err, ProgramError::InvalidSeeds);

        let err: ProgramError = InstructionError::UnknownInstruction(255).into();
        assert_eq!(err, ProgramError::InvalidInstructionData);
    }

    #[test]
    fn test_io_error_becomes_invalid_data() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short buffer");
        match InstructionError::from(io) {
            InstructionError::InvalidData(reason) => assert!(reason.contains("short buffer")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
