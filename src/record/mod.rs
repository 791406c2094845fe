//! Transaction records, the predicates used to select them, and the stores that hold them.

mod core;
mod filter;
mod sqlite;
mod store;

pub use core::TransactionRecord;
pub use filter::{MonthFilter, RecordFilter, SearchFilter};
pub use sqlite::SqliteStore;
pub use store::{MemoryStore, TransactionStore};
