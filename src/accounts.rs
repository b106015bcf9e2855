use solana_program::{instruction::AccountMeta, msg, pubkey::Pubkey};

use crate::{error::InstructionError, tree::TreeNode};

/// Read-only, non-signer account reference.
pub fn meta(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, false)
}

/// Writable, non-signer account reference.
pub fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

/// Read-only signer account reference.
pub fn signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, true)
}

/// Ordered account list of an instruction: `N` positional slots followed by
/// an optional variable-length suffix.
///
/// Slot position is part of the program's contract, so slots are filled by
/// index and the list is only usable once every slot is populated.
#[derive(Clone, Debug, PartialEq)]
pub struct AccountSlots<const N: usize> {
    slots: [Option<AccountMeta>; N],
    trailing: Vec<AccountMeta>,
}

impl<const N: usize> Default for AccountSlots<N> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            trailing: Vec::new(),
        }
    }
}

impl<const N: usize> AccountSlots<N> {
    pub const FIXED_LEN: usize = N;

    /// Fills slot `index`, which must be below `N`.
    pub(crate) fn set(&mut self, index: usize, meta: AccountMeta) {
        self.slots[index] = Some(meta);
    }

    /// Replaces slot `index` as-is, flags included.
    pub fn try_set(&mut self, index: usize, meta: AccountMeta) -> Result<(), InstructionError> {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(meta);
                Ok(())
            }
            None => {
                msg!("accounts[{}] is out of range, expected fewer than {}", index, N);
                Err(InstructionError::AccountIndexOutOfRange { index, len: N })
            }
        }
    }

    /// Reads position `index`; positions from `N` on address the suffix.
    pub fn get(&self, index: usize) -> Option<&AccountMeta> {
        if index < N {
            self.slots[index].as_ref()
        } else {
            self.trailing.get(index - N)
        }
    }

    pub fn push_trailing(&mut self, meta: AccountMeta) {
        self.trailing.push(meta);
    }

    pub fn trailing(&self) -> &[AccountMeta] {
        &self.trailing
    }

    /// Number of positions, fixed slots included whether filled or not.
    pub fn len(&self) -> usize {
        N + self.trailing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&AccountMeta>> {
        self.slots
            .iter()
            .map(Option::as_ref)
            .chain(self.trailing.iter().map(Some))
    }

    pub fn first_missing(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Fails with the lowest unfilled slot index.
    pub fn check_filled(&self) -> Result<(), InstructionError> {
        match self.first_missing() {
            Some(index) => {
                msg!("accounts[{}] is not set", index);
                Err(InstructionError::MissingAccount { index })
            }
            None => Ok(()),
        }
    }

    /// Fails if any of the named authority slots lacks the signer flag.
    pub fn check_signers(&self, authorities: &[(usize, &'static str)]) -> Result<(), InstructionError> {
        for &(index, name) in authorities {
            match self.get(index) {
                Some(account) if account.is_signer => {}
                Some(_) => {
                    msg!("accounts[{}] ({}) should be a signer", index, name);
                    return Err(InstructionError::MissingSignature { index, name });
                }
                None => {
                    msg!("accounts[{}] ({}) is not set", index, name);
                    return Err(InstructionError::MissingAccount { index });
                }
            }
        }
        Ok(())
    }

    /// Flattens the slots into the order the program expects.
    pub fn to_metas(&self) -> Result<Vec<AccountMeta>, InstructionError> {
        self.check_filled()?;
        Ok(self.iter().flatten().cloned().collect())
    }

    /// Places metas taken from an enclosing transaction, keeping their flags.
    /// Metas beyond the fixed slots go to the suffix if `allow_trailing`,
    /// and are rejected otherwise.
    pub fn fill_from(&mut self, metas: &[AccountMeta], allow_trailing: bool) -> Result<(), InstructionError> {
        if !allow_trailing && metas.len() > N {
            msg!("expected at most {} accounts, found {}", N, metas.len());
            return Err(InstructionError::InvalidData(format!(
                "expected at most {} accounts, found {}",
                N,
                metas.len()
            )));
        }
        for (index, meta) in metas.iter().enumerate() {
            if index < N {
                self.slots[index] = Some(meta.clone());
            } else {
                self.trailing.push(meta.clone());
            }
        }
        Ok(())
    }

    pub fn tree(&self, names: &[&str; N], trailing_name: Option<&str>) -> TreeNode {
        let mut accounts = TreeNode::new("Accounts");
        for (name, slot) in names.iter().zip(self.slots.iter()) {
            accounts.push(TreeNode::account(name, slot.as_ref()));
        }
        if let Some(trailing_name) = trailing_name {
            let mut suffix = TreeNode::new(format!("{}[len={}]", trailing_name, self.trailing.len()));
            for (i, account) in self.trailing.iter().enumerate() {
                suffix.push(TreeNode::account(&format!("[{}]", N + i), Some(account)));
            }
            accounts.push(suffix);
        }
        accounts
    }
}
