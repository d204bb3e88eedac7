//! JSON-file backed storage for the neocargo engine
//!
//! All records live in a single `records.json` under the data
//! directory. Writes go through [`Store::transaction`], which applies
//! the change to a draft copy of the tables and commits (and persists)
//! only when the closure succeeds.

pub mod seed;

mod store;
mod tables;

pub use store::Store;
pub use tables::Tables;
