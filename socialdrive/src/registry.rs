use socialdrive_core::Account;

/// Accounts created during this run, in creation order. Append-only.
#[derive(Debug, Default)]
pub struct Registry {
    accounts: Vec<Account>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, index: usize) -> Option<&Account> {
        self.accounts.get(index)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn into_accounts(self) -> Vec<Account> {
        self.accounts
    }
}
