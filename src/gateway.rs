use rust_decimal::Decimal;
use thiserror::Error;

use crate::{ledger::Ledger, vault::PrincipalId};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("The gateway rejected the transfer")]
pub struct TransferError;

/// Moves value to a principal outside the ledger. Invoked at most once per
/// withdrawal, strictly after the ledger committed its own effects.
///
/// The gateway receives the ledger handle because a real transfer can call
/// back into the ledger before returning; such a reentrant call observes
/// the already-decremented balance. A gateway must not leave its own ledger
/// mutations behind when it reports failure, since the failing withdrawal
/// is rolled back as a unit.
pub trait TransferGateway {
    fn send(
        &mut self,
        ledger: &mut Ledger,
        principal: PrincipalId,
        amount: Decimal,
    ) -> Result<(), TransferError>;
}

/// Gateway that accepts every transfer. Used by the binary, where actual
/// value delivery is outside the process.
#[derive(Debug, Default)]
pub struct AlwaysSucceed;

impl TransferGateway for AlwaysSucceed {
    fn send(
        &mut self,
        _ledger: &mut Ledger,
        _principal: PrincipalId,
        _amount: Decimal,
    ) -> Result<(), TransferError> {
        Ok(())
    }
}

/// Gateway that rejects every transfer, for exercising the rollback path.
#[derive(Debug, Default)]
pub struct AlwaysFail;

impl TransferGateway for AlwaysFail {
    fn send(
        &mut self,
        _ledger: &mut Ledger,
        _principal: PrincipalId,
        _amount: Decimal,
    ) -> Result<(), TransferError> {
        Err(TransferError)
    }
}
