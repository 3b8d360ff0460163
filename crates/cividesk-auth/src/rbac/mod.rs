//! Role-based access control.

pub mod deletion;
pub mod matrix;

pub use deletion::authorize_deletion;
pub use matrix::{Verb, VerbSet, authorize};
