use rust_decimal::Decimal;

pub type PrincipalId = u64;

/// Snapshot of a vault returned by read-only queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VaultRecord {
    pub balance: Decimal,
    pub deposit_count: u64,
    pub withdraw_count: u64,
}

/// A principal's segregated balance record. Vaults are never removed from
/// the ledger map; once the balance returns to zero they are only flagged
/// out via [`Vault::close`], keeping the counters for auditability.
#[derive(Debug, Default, Clone)]
pub struct Vault {
    balance: Decimal,
    deposit_count: u64,
    withdraw_count: u64,
    has_vault: bool,
}

impl Vault {
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn is_open(&self) -> bool {
        self.has_vault
    }

    pub fn record(&self) -> VaultRecord {
        VaultRecord {
            balance: self.balance,
            deposit_count: self.deposit_count,
            withdraw_count: self.withdraw_count,
        }
    }

    /// Marks the vault as holding funds. Called on the first deposit and
    /// again when a zeroed-out vault receives a new deposit.
    pub fn open(&mut self) {
        self.has_vault = true;
    }

    /// Flags the vault out once its balance returned to zero.
    pub fn close(&mut self) {
        self.has_vault = false;
    }

    /// Adds `amount` to the balance and bumps the deposit counter.
    /// Returns the new balance.
    pub fn credit(&mut self, amount: Decimal) -> Decimal {
        self.balance += amount;
        self.deposit_count += 1;
        self.balance
    }

    /// Subtracts `amount` from the balance and bumps the withdraw counter.
    /// Returns the remaining balance. The caller validates `amount` against
    /// the balance first; the vault itself never goes negative.
    pub fn debit(&mut self, amount: Decimal) -> Decimal {
        self.balance -= amount;
        self.withdraw_count += 1;
        self.balance
    }

    /// Inverse of [`Vault::debit`], used when a withdrawal is rolled back
    /// after the external transfer failed.
    pub fn undo_debit(&mut self, amount: Decimal) {
        self.balance += amount;
        self.withdraw_count -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_and_debit() {
        let mut vault = Vault::default();
        assert_eq!(vault.credit(Decimal::new(5, 1)), Decimal::new(5, 1));
        assert_eq!(vault.credit(Decimal::new(25, 2)), Decimal::new(75, 2));
        assert_eq!(vault.debit(Decimal::new(25, 2)), Decimal::new(5, 1));

        let record = vault.record();
        assert_eq!(record.balance, Decimal::new(5, 1));
        assert_eq!(record.deposit_count, 2);
        assert_eq!(record.withdraw_count, 1);
    }

    #[test]
    fn undo_debit_restores_balance_and_counter() {
        let mut vault = Vault::default();
        vault.credit(Decimal::ONE);
        vault.debit(Decimal::new(3, 1));
        vault.undo_debit(Decimal::new(3, 1));
        assert_eq!(vault.balance(), Decimal::ONE);
        assert_eq!(vault.record().withdraw_count, 0);
    }

    #[test]
    fn open_close_flag() {
        let mut vault = Vault::default();
        assert!(!vault.is_open());
        vault.open();
        assert!(vault.is_open());
        vault.close();
        assert!(!vault.is_open());
    }
}
