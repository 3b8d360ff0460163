//! # cividesk-auth
//!
//! Authentication and authorization for the CiviDesk records platform.
//!
//! ## Modules
//!
//! - `jwt` — access-token creation and verification
//! - `password` — Argon2id password hashing and policy enforcement
//! - `lockout` — consecutive-failure tracking and timed lockout
//! - `approval` — account-approval gate and best-effort notifications
//! - `rbac` — role × verb decision table and account-deletion rules
//! - `ownership` — owner-column check for single-record routes
//! - `session` — login/refresh/logout flows over the dual-token scheme

pub mod approval;
pub mod jwt;
pub mod lockout;
pub mod ownership;
pub mod password;
pub mod principal;
pub mod rbac;
pub mod session;

pub use approval::{ApprovalGate, ApprovalNotifier, ApprovalOutcome};
pub use jwt::{AccessTokenDecoder, AccessTokenEncoder, Claims};
pub use lockout::{LockoutGuard, LockoutStatus};
pub use ownership::OwnershipChecker;
pub use password::{PasswordHasher, PasswordValidator};
pub use principal::Principal;
pub use rbac::{Verb, VerbSet};
pub use session::{SessionManager, SessionStore};
