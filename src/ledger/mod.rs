//! Entry storage, id assignment, and the total/percentage arithmetic.

pub mod entry;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod percentage;

pub use entry::{Entry, EntryId, EntryKind, Expense, Income};
pub use ledger::{BudgetSnapshot, Ledger, Totals};
pub use percentage::Percentage;
