/// Per-principal vault record: balance, deposit/withdraw counters and the
/// presence flag that tracks whether the vault currently holds funds.
pub mod vault;

/// The accounting engine. Owns the vault map, the fixed configuration
/// (withdraw limit, bank capacity) and the global totals, and enforces
/// the deposit/withdraw state transitions.
pub mod ledger;

/// Audit records emitted by the ledger, plus the sink trait they go to.
pub mod event;

/// The external transfer gateway consumed on withdrawal. The ledger treats
/// it as fallible and potentially re-entrant, so withdrawal effects are
/// committed before it is called.
pub mod gateway;

/// Ideally, this module should exists on its own crate, as a way to
/// bootstrap the ledger within a binary. However, I want to use it for
/// integration test so I put it here.
pub mod bin_utils;
