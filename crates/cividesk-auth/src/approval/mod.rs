//! Account-approval gating and outcome notifications.

pub mod gate;
pub mod notify;

pub use gate::ApprovalGate;
pub use notify::{ApprovalNotifier, ApprovalOutcome, LogNotifier, WebhookNotifier};
