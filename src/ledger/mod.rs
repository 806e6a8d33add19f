//! The asset-ledger collaborator.
//!
//! A pool never stores balances of its own.  Each of its two assets lives
//! on an [`AssetLedger`], and the pool moves assets and reads its custody
//! balance exclusively through that trait.
//!
//! # Atomicity
//!
//! Pool operations may perform several movements across two ledgers.  To
//! make them all-or-nothing, ledgers expose a nested undo journal:
//!
//! ```text
//! let cp = ledger.checkpoint();
//! ledger.transfer(..)?;          // on error: ledger.revert(cp)
//! ledger.commit(cp);             // keep the movements
//! ```
//!
//! A reverted checkpoint restores every balance and allowance touched
//! since it was taken.  Checkpoints must be closed in LIFO order.

mod memory;

pub use memory::InMemoryLedger;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::LedgerError;

/// A position in a ledger's undo journal.
///
/// Returned by [`AssetLedger::checkpoint`] and consumed by exactly one of
/// [`AssetLedger::commit`] or [`AssetLedger::revert`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a checkpoint must be committed or reverted"]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Creates a checkpoint at the given journal position.
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Returns the journal position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.0
    }
}

/// Balance ledger for one fungible asset.
///
/// Mirrors the usual fungible-token surface: balances, direct transfers,
/// allowance-based transfers and approvals.  Since there is no ambient
/// message sender, the authenticated party is passed explicitly:
/// `from` for [`transfer`](Self::transfer), `spender` for
/// [`transfer_from`](Self::transfer_from), `owner` for
/// [`approve`](Self::approve).
///
/// A successful transfer promises nothing beyond its own return value;
/// the pool always re-reads [`balance_of`](Self::balance_of) for its
/// custody account to learn its reserves.
pub trait AssetLedger {
    /// Returns the asset this ledger tracks.
    fn asset(&self) -> AssetId;

    /// Returns the balance held by `account`.
    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Moves `amount` from `from` to `to` on `from`'s own authority.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the movement is rejected; the ledger
    /// is then unchanged.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` from `from` to `to`, spending `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the allowance or balance is too small
    /// or the movement is otherwise rejected; the ledger is then unchanged.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Sets the amount `spender` may move out of `owner`'s balance.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the ledger refuses approvals for `owner`.
    fn approve(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Returns the remaining allowance of `spender` over `owner`'s balance.
    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Opens a checkpoint at the current journal position.
    fn checkpoint(&mut self) -> Checkpoint;

    /// Closes `checkpoint`, keeping every change made since it was opened.
    fn commit(&mut self, checkpoint: Checkpoint);

    /// Closes `checkpoint`, undoing every change made since it was opened.
    fn revert(&mut self, checkpoint: Checkpoint);
}
