use rust_decimal::Decimal;
use tracing::debug;

use crate::vault::PrincipalId;

/// Audit record emitted synchronously within the operation that caused it.
/// For withdrawals the record carries the post-decrement balance and is
/// emitted before the external transfer is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    Deposited {
        principal: PrincipalId,
        amount: Decimal,
        new_balance: Decimal,
    },
    Withdrawn {
        principal: PrincipalId,
        amount: Decimal,
        remaining_balance: Decimal,
    },
}

pub trait EventSink {
    fn record(&mut self, event: LedgerEvent);
}

/// Discards every record.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: LedgerEvent) {}
}

/// Keeps records in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<LedgerEvent>,
}

impl EventSink for MemorySink {
    fn record(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }
}

/// Forwards records to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: LedgerEvent) {
        match event {
            LedgerEvent::Deposited {
                principal,
                amount,
                new_balance,
            } => debug!(principal, %amount, %new_balance, "deposited"),
            LedgerEvent::Withdrawn {
                principal,
                amount,
                remaining_balance,
            } => debug!(principal, %amount, %remaining_balance, "withdrawn"),
        }
    }
}
