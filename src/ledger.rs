use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    event::{EventSink, LedgerEvent},
    gateway::{TransferError, TransferGateway},
    vault::{PrincipalId, Vault, VaultRecord},
};

/// Smallest accepted deposit, in the native value unit.
pub const MINIMUM_DEPOSIT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Withdraw limit {limit} must be greater than the minimum deposit {minimum}")]
    WithdrawLimitTooSmall { limit: Decimal, minimum: Decimal },
    #[error("Bank capacity {capacity} must be greater than the minimum deposit {minimum}")]
    CapacityTooSmall { capacity: Decimal, minimum: Decimal },
    #[error("Bank capacity {capacity} must be greater than the withdraw limit {limit}")]
    CapacityBelowLimit { capacity: Decimal, limit: Decimal },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount must be a positive value")]
    InvalidAmount,
    #[error("Deposit of {amount} is below the minimum of {minimum}")]
    DepositTooSmall { amount: Decimal, minimum: Decimal },
    #[error(
        "Deposit of {amount} does not fit: {total_deposited} of {bank_capacity} already in use"
    )]
    CapacityExceeded {
        total_deposited: Decimal,
        amount: Decimal,
        bank_capacity: Decimal,
    },
    #[error("No funds on deposit for this principal")]
    NoFunds,
    #[error("Withdrawal of {amount} exceeds the per-transaction limit of {limit}")]
    LimitExceeded { amount: Decimal, limit: Decimal },
    #[error("Withdrawal of {amount} exceeds the available balance of {balance}")]
    InsufficientBalance { amount: Decimal, balance: Decimal },
    #[error(transparent)]
    TransferFailed(#[from] TransferError),
}

/// Single-asset custodial ledger. One instance is one independent ledger;
/// there is no process-wide state, so tests can run many side by side.
///
/// All operations take `&mut self`, which serializes mutation per instance.
/// The remaining hazard is reentrancy through the gateway call in
/// [`Ledger::withdraw`], handled by committing all effects before the call.
#[derive(Debug)]
pub struct Ledger {
    withdraw_limit: Decimal,
    bank_capacity: Decimal,
    total_deposited: Decimal,
    total_users: u64,
    vaults: HashMap<PrincipalId, Vault>,
}

impl Ledger {
    /// Both parameters are immutable for the lifetime of the instance.
    pub fn new(withdraw_limit: Decimal, bank_capacity: Decimal) -> Result<Self, ConfigError> {
        if withdraw_limit <= MINIMUM_DEPOSIT {
            return Err(ConfigError::WithdrawLimitTooSmall {
                limit: withdraw_limit,
                minimum: MINIMUM_DEPOSIT,
            });
        }
        if bank_capacity <= MINIMUM_DEPOSIT {
            return Err(ConfigError::CapacityTooSmall {
                capacity: bank_capacity,
                minimum: MINIMUM_DEPOSIT,
            });
        }
        if bank_capacity <= withdraw_limit {
            return Err(ConfigError::CapacityBelowLimit {
                capacity: bank_capacity,
                limit: withdraw_limit,
            });
        }
        Ok(Self {
            withdraw_limit,
            bank_capacity,
            total_deposited: Decimal::ZERO,
            total_users: 0,
            vaults: HashMap::new(),
        })
    }

    /// Deposits `amount` into the principal's vault, opening it if needed.
    /// Returns the new balance. No external transfer happens here, the
    /// value is already held, so there is no rollback path either.
    pub fn deposit<S>(
        &mut self,
        principal: PrincipalId,
        amount: Decimal,
        sink: &mut S,
    ) -> Result<Decimal, LedgerError>
    where
        S: EventSink,
    {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        if amount < MINIMUM_DEPOSIT {
            return Err(LedgerError::DepositTooSmall {
                amount,
                minimum: MINIMUM_DEPOSIT,
            });
        }
        if self.total_deposited + amount > self.bank_capacity {
            return Err(LedgerError::CapacityExceeded {
                total_deposited: self.total_deposited,
                amount,
                bank_capacity: self.bank_capacity,
            });
        }

        let vault = self.vaults.entry(principal).or_default();
        if !vault.is_open() {
            vault.open();
            self.total_users += 1;
        }
        let new_balance = vault.credit(amount);
        self.total_deposited += amount;
        debug!(principal, %amount, %new_balance, "deposit committed");
        sink.record(LedgerEvent::Deposited {
            principal,
            amount,
            new_balance,
        });
        Ok(new_balance)
    }

    /// A bare value transfer with no operation selected routes to the
    /// deposit path, with identical checks and effects.
    pub fn receive<S>(
        &mut self,
        principal: PrincipalId,
        amount: Decimal,
        sink: &mut S,
    ) -> Result<Decimal, LedgerError>
    where
        S: EventSink,
    {
        self.deposit(principal, amount, sink)
    }

    /// Withdraws `amount` from the principal's vault and hands it to the
    /// gateway. Returns the remaining balance as committed by this
    /// withdrawal, matching the emitted [`LedgerEvent::Withdrawn`] record;
    /// a gateway that mutates the vault before returning leaves the live
    /// balance ahead of the returned value.
    ///
    /// Ordering is the correctness mechanism here: validate, commit state,
    /// emit the audit record, and only then call the gateway. A gateway
    /// that re-enters the ledger observes the already-decremented balance
    /// and cannot exceed its entitlement. If the gateway reports failure,
    /// the committed effects are reverted and the whole operation fails
    /// with [`LedgerError::TransferFailed`].
    pub fn withdraw<S, G>(
        &mut self,
        principal: PrincipalId,
        amount: Decimal,
        sink: &mut S,
        gateway: &mut G,
    ) -> Result<Decimal, LedgerError>
    where
        S: EventSink,
        G: TransferGateway,
    {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        let Some(vault) = self.vaults.get_mut(&principal) else {
            return Err(LedgerError::NoFunds);
        };
        let balance = vault.balance();
        if balance.is_zero() {
            return Err(LedgerError::NoFunds);
        }
        if amount > self.withdraw_limit {
            return Err(LedgerError::LimitExceeded {
                amount,
                limit: self.withdraw_limit,
            });
        }
        if amount > balance {
            return Err(LedgerError::InsufficientBalance { amount, balance });
        }

        let remaining = vault.debit(amount);
        let closed_vault = remaining.is_zero();
        if closed_vault {
            vault.close();
            self.total_users = self.total_users.saturating_sub(1);
        }
        self.total_deposited -= amount;
        debug!(principal, %amount, %remaining, "withdrawal committed");
        sink.record(LedgerEvent::Withdrawn {
            principal,
            amount,
            remaining_balance: remaining,
        });

        if let Err(err) = gateway.send(self, principal, amount) {
            warn!(principal, %amount, "transfer failed, rolling back withdrawal");
            let vault = self.vaults.entry(principal).or_default();
            vault.undo_debit(amount);
            if closed_vault {
                vault.open();
                self.total_users += 1;
            }
            self.total_deposited += amount;
            return Err(err.into());
        }
        Ok(remaining)
    }

    /// Current balance; zero for principals that never deposited.
    pub fn balance(&self, principal: PrincipalId) -> Decimal {
        self.vaults
            .get(&principal)
            .map(Vault::balance)
            .unwrap_or_default()
    }

    /// Balance plus deposit/withdraw counters for one principal.
    pub fn record(&self, principal: PrincipalId) -> VaultRecord {
        self.vaults
            .get(&principal)
            .map(Vault::record)
            .unwrap_or_default()
    }

    /// How much more can be deposited before hitting the capacity cap.
    pub fn remaining_capacity(&self) -> Decimal {
        self.bank_capacity - self.total_deposited
    }

    pub fn total_deposited(&self) -> Decimal {
        self.total_deposited
    }

    /// Number of vaults currently holding funds.
    pub fn total_users(&self) -> u64 {
        self.total_users
    }

    pub fn withdraw_limit(&self) -> Decimal {
        self.withdraw_limit
    }

    pub fn bank_capacity(&self) -> Decimal {
        self.bank_capacity
    }

    /// Every vault the ledger ever opened, zeroed-out ones included.
    pub fn records(&self) -> impl Iterator<Item = (PrincipalId, VaultRecord)> + '_ {
        self.vaults
            .iter()
            .map(|(principal, vault)| (*principal, vault.record()))
    }
}
