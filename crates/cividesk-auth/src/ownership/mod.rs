//! Ownership override for single-record routes.

pub mod checker;

pub use checker::OwnershipChecker;
