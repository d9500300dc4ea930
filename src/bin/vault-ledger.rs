use std::{fs::File, str::FromStr};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use vault_ledger::bin_utils::Service;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected an operations file as the first argument")?;
    let withdraw_limit = args
        .next()
        .context("Expected the withdraw limit as the second argument")?;
    let bank_capacity = args
        .next()
        .context("Expected the bank capacity as the third argument")?;

    let withdraw_limit = Decimal::from_str(&withdraw_limit)
        .with_context(|| format!("Failed to parse withdraw limit `{withdraw_limit}`"))?;
    let bank_capacity = Decimal::from_str(&bank_capacity)
        .with_context(|| format!("Failed to parse bank capacity `{bank_capacity}`"))?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        withdraw_limit,
        bank_capacity,
        error_printer: Box::new(|line, err| eprintln!("Operation at line {line} rejected: {err}")),
    };
    service.run()
}
