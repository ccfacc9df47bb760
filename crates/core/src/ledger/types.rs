//! Domain types for the transaction ledger.

/// The kind of a transaction.
///
/// Income and expense affect exactly one account; a transfer moves money
/// between two accounts and has no single-account effect of its own (see
/// [`balance_effect`](crate::ledger::balance_effect)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Money coming in; adds to the linked account.
    Income,
    /// Money going out; subtracts from the linked account.
    Expense,
    /// Money moved between two accounts.
    Transfer,
}

impl TransactionKind {
    /// Returns true for the kinds that carry a single-account balance effect.
    #[must_use]
    pub const fn affects_single_account(self) -> bool {
        matches!(self, Self::Income | Self::Expense)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(TransactionKind::Income.to_string(), "income");
        assert_eq!(TransactionKind::Expense.to_string(), "expense");
        assert_eq!(TransactionKind::Transfer.to_string(), "transfer");
    }

    #[test]
    fn test_single_account_kinds() {
        assert!(TransactionKind::Income.affects_single_account());
        assert!(TransactionKind::Expense.affects_single_account());
        assert!(!TransactionKind::Transfer.affects_single_account());
    }
}
