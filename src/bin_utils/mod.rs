//! This module could be a separate crate on its own, to bootstrap
//! [`crate::ledger::Ledger`] within a binary but for simplicitly purposes,
//! I include this module directly in the library.

use std::io::{Read, Write};

use anyhow::Result;
use csv_parser::{CsvOperationParser, OperationKind};
use csv_printer::{SummaryRow, VaultRow, print_summary, print_vaults};
use rust_decimal::Decimal;

use crate::{
    event::TracingSink,
    gateway::AlwaysSucceed,
    ledger::{Ledger, LedgerError},
};

pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub withdraw_limit: Decimal,
    pub bank_capacity: Decimal,
    pub error_printer: Box<dyn FnMut(u64, LedgerError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut ledger = Ledger::new(self.withdraw_limit, self.bank_capacity)?;
        let mut sink = TracingSink;
        // value delivery outside the process is not this binary's concern
        let mut gateway = AlwaysSucceed;

        for (line, op) in parser {
            let result = match op.kind {
                OperationKind::Deposit => ledger.deposit(op.principal, op.amount, &mut sink),
                OperationKind::Withdraw => {
                    ledger.withdraw(op.principal, op.amount, &mut sink, &mut gateway)
                }
                OperationKind::Transfer => ledger.receive(op.principal, op.amount, &mut sink),
            };
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        print_vaults(
            &mut *self.output,
            ledger.records().map(|(principal, record)| VaultRow {
                principal,
                balance: record.balance,
                deposits: record.deposit_count,
                withdrawals: record.withdraw_count,
            }),
        )?;
        print_summary(
            self.output,
            SummaryRow {
                total_deposited: ledger.total_deposited(),
                total_users: ledger.total_users(),
                remaining_capacity: ledger.remaining_capacity(),
            },
        )
    }
}
