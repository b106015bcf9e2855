//! Text tree used to render instructions for debugging.

use std::fmt;

use solana_program::instruction::AccountMeta;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        TreeNode {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// `Name: value` leaf for an instruction parameter.
    pub fn param(name: &str, value: impl fmt::Debug) -> Self {
        Self::new(format!("{}: {:?}", name, value))
    }

    /// Leaf for an account slot, with its capability flags.
    pub fn account(name: &str, account: Option<&AccountMeta>) -> Self {
        match account {
            Some(account) => {
                let flags = match (account.is_writable, account.is_signer) {
                    (true, true) => " [WRITE, SIGNER]",
                    (true, false) => " [WRITE]",
                    (false, true) => " [SIGNER]",
                    (false, false) => "",
                };
                Self::new(format!("{}: {}{}", name, account.pubkey, flags))
            }
            None => Self::new(format!("{}: <not set>", name)),
        }
    }

    pub fn push(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    pub fn child(mut self, child: TreeNode) -> Self {
        self.push(child);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    fn write_children(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        let last = self.children.len().saturating_sub(1);
        for (i, child) in self.children.iter().enumerate() {
            let (branch, indent) = if i == last { ("└─ ", "   ") } else { ("├─ ", "│  ") };
            writeln!(f, "{}{}{}", prefix, branch, child.label)?;
            child.write_children(f, &format!("{}{}", prefix, indent))?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        self.write_children(f, "")
    }
}
