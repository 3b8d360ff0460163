//! Account entity and its enums.

pub mod model;
pub mod role;
pub mod status;

pub use model::{Account, CreateAccount, UpdateAccount};
pub use role::AccountRole;
pub use status::ApprovalStatus;
