pub mod card;
pub mod common;
pub mod debt;
pub mod ledger;
pub mod transaction;
pub mod window;

pub use card::Card;
pub use common::{
    parse_amount, DisplayStamp, Displayable, Identifiable, SearchField, Searchable, Timestamped,
};
pub use debt::{Debt, DebtKind};
pub use ledger::{Ledger, ListKind, CURRENT_SCHEMA_VERSION};
pub use transaction::{Transaction, TransactionKind, TransactionPatch, DEFAULT_CATEGORY};
pub use window::TimeWindow;
