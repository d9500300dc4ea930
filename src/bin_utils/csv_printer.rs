use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::vault::PrincipalId;

#[derive(Debug, Serialize)]
pub struct VaultRow {
    pub principal: PrincipalId,
    pub balance: Decimal,
    pub deposits: u64,
    pub withdrawals: u64,
}

/// Ledger-wide totals printed after the per-vault rows.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub total_deposited: Decimal,
    pub total_users: u64,
    pub remaining_capacity: Decimal,
}

pub fn print_vaults<W>(output: &mut W, vaults: impl Iterator<Item = VaultRow>) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for row in vaults {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}

pub fn print_summary<W>(output: &mut W, summary: SummaryRow) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    if let Err(err) = writer.serialize(summary) {
        anyhow::bail!("Failed to write to CSV: {err}")
    }
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
