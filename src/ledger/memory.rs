//! In-memory asset ledger.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::{AssetLedger, Checkpoint};
use crate::domain::{AccountId, Amount, AssetId};
use crate::error::LedgerError;

/// Prior value of one ledger cell, recorded while a checkpoint is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JournalEntry {
    Balance {
        account: AccountId,
        previous: Amount,
    },
    Allowance {
        owner: AccountId,
        spender: AccountId,
        previous: Amount,
    },
    Supply {
        previous: Amount,
    },
}

/// A [`HashMap`]-backed ledger for one asset.
///
/// Supports minting for setup, an allowance of [`Amount::MAX`] as an
/// unlimited approval that is never decremented, and a freeze list: any
/// movement or approval touching a frozen account fails with
/// [`LedgerError::AccountFrozen`].
///
/// Changes are journaled only while a checkpoint is open, so a ledger
/// used without checkpoints keeps no history.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{AccountId, Amount, AssetId};
/// use pair_amm::ledger::{AssetLedger, InMemoryLedger};
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let bob = AccountId::from_bytes([2u8; 32]);
///
/// let mut ledger = InMemoryLedger::new(AssetId::from_bytes([7u8; 32]));
/// ledger.mint(&alice, Amount::new(100)).expect("mint");
///
/// let cp = ledger.checkpoint();
/// ledger.transfer(&alice, &bob, Amount::new(40)).expect("transfer");
/// ledger.revert(cp);
///
/// assert_eq!(ledger.balance_of(&alice), Amount::new(100));
/// assert_eq!(ledger.balance_of(&bob), Amount::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    asset: AssetId,
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
    frozen: HashSet<AccountId>,
    total_supply: Amount,
    journal: Vec<JournalEntry>,
    open_checkpoints: usize,
}

impl InMemoryLedger {
    /// Creates an empty ledger for `asset`.
    #[must_use]
    pub fn new(asset: AssetId) -> Self {
        Self {
            asset,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            frozen: HashSet::new(),
            total_supply: Amount::ZERO,
            journal: Vec::new(),
            open_checkpoints: 0,
        }
    }

    /// Creates `amount` new units in `to`'s balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountFrozen`] if `to` is frozen.
    /// - [`LedgerError::Overflow`] if the balance or total supply would
    ///   exceed `u128`.
    pub fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.ensure_not_frozen(to)?;
        let supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow(*to))?;
        let balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow(*to))?;
        self.set_supply(supply);
        self.set_balance(to, balance);
        trace!(asset = %self.asset, %to, %amount, "minted");
        Ok(())
    }

    /// Returns the sum of all balances.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Blocks every movement and approval involving `account`.
    pub fn freeze(&mut self, account: &AccountId) {
        self.frozen.insert(*account);
    }

    /// Lifts a freeze placed by [`freeze`](Self::freeze).
    pub fn unfreeze(&mut self, account: &AccountId) {
        self.frozen.remove(account);
    }

    /// Returns `true` if `account` is frozen.
    #[must_use]
    pub fn is_frozen(&self, account: &AccountId) -> bool {
        self.frozen.contains(account)
    }

    fn ensure_not_frozen(&self, account: &AccountId) -> Result<(), LedgerError> {
        if self.is_frozen(account) {
            return Err(LedgerError::AccountFrozen(*account));
        }
        Ok(())
    }

    fn journaling(&self) -> bool {
        self.open_checkpoints > 0
    }

    fn set_balance(&mut self, account: &AccountId, value: Amount) {
        let previous = self.balance_of(account);
        if self.journaling() {
            self.journal.push(JournalEntry::Balance {
                account: *account,
                previous,
            });
        }
        self.write_balance(account, value);
    }

    fn write_balance(&mut self, account: &AccountId, value: Amount) {
        if value.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, value);
        }
    }

    fn set_allowance(&mut self, owner: &AccountId, spender: &AccountId, value: Amount) {
        let previous = self.allowance(owner, spender);
        if self.journaling() {
            self.journal.push(JournalEntry::Allowance {
                owner: *owner,
                spender: *spender,
                previous,
            });
        }
        self.write_allowance(owner, spender, value);
    }

    fn write_allowance(&mut self, owner: &AccountId, spender: &AccountId, value: Amount) {
        if value.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), value);
        }
    }

    fn set_supply(&mut self, value: Amount) {
        if self.journaling() {
            self.journal.push(JournalEntry::Supply {
                previous: self.total_supply,
            });
        }
        self.total_supply = value;
    }

    /// Validates and applies a movement.  Nothing is written unless every
    /// check passes.
    fn move_balance(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.ensure_not_frozen(from)?;
        self.ensure_not_frozen(to)?;

        let from_balance = self.balance_of(from);
        let debited = from_balance
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance {
                account: *from,
                available: from_balance,
                required: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow(*to))?;

        self.set_balance(from, debited);
        self.set_balance(to, credited);
        trace!(asset = %self.asset, %from, %to, %amount, "transferred");
        Ok(())
    }
}

impl AssetLedger for InMemoryLedger {
    fn asset(&self) -> AssetId {
        self.asset
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.ensure_not_frozen(spender)?;
        let allowed = self.allowance(from, spender);
        let remaining = allowed
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientAllowance {
                spender: *spender,
                available: allowed,
                required: amount,
            })?;
        self.move_balance(from, to, amount)?;
        if allowed != Amount::MAX {
            self.set_allowance(from, spender, remaining);
        }
        Ok(())
    }

    fn approve(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.ensure_not_frozen(owner)?;
        self.set_allowance(owner, spender, amount);
        Ok(())
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.open_checkpoints += 1;
        Checkpoint::new(self.journal.len())
    }

    fn commit(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.position() <= self.journal.len());
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
        if self.open_checkpoints == 0 {
            self.journal.clear();
        }
    }

    fn revert(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.position() {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            match entry {
                JournalEntry::Balance { account, previous } => {
                    self.write_balance(&account, previous);
                }
                JournalEntry::Allowance {
                    owner,
                    spender,
                    previous,
                } => self.write_allowance(&owner, &spender, previous),
                JournalEntry::Supply { previous } => self.total_supply = previous,
            }
        }
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
        if self.open_checkpoints == 0 {
            self.journal.clear();
        }
    }
}
