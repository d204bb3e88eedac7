//! Application services for the neocargo freight brokering engine
//!
//! Each module wraps one slice of the workflow: resolving free-text
//! city labels, quoting shipments, walking orders through their
//! lifecycle, assigning drivers and vehicles, and tracking delivery
//! issues. Mutations go through [`neocargo_store::Store::transaction`].

pub mod assignment;
pub mod config;
pub mod issue;
pub mod order;
pub mod quote;
pub mod resolver;

#[cfg(test)]
mod testutil;
