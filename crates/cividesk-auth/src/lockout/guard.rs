//! Consecutive-failure tracking and timed lockout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use cividesk_core::config::auth::AuthConfig;
use cividesk_core::error::AppError;
use cividesk_database::repositories::AccountRepository;
use cividesk_entity::account::Account;

/// Outcome of the pre-credential lockout check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutStatus {
    /// Login may proceed to credential comparison.
    Allowed,
    /// Login is refused; the window ends in `remaining_minutes`.
    Locked {
        /// Whole minutes until the lockout expires, rounded up.
        remaining_minutes: i64,
    },
}

/// Tracks consecutive failed login attempts per account and enforces a
/// timed lock.
#[derive(Debug, Clone)]
pub struct LockoutGuard {
    accounts: Arc<AccountRepository>,
    threshold: i32,
    lockout_minutes: i32,
}

impl LockoutGuard {
    /// Creates a guard from auth configuration.
    pub fn new(accounts: Arc<AccountRepository>, config: &AuthConfig) -> Self {
        Self {
            accounts,
            threshold: config.max_failed_attempts,
            lockout_minutes: config.lockout_duration_minutes as i32,
        }
    }

    /// Evaluates the lockout state for an account.
    ///
    /// Runs strictly before credential comparison: a correct password on a
    /// locked account still yields a lockout outcome. This ordering is a
    /// contract, not an accident.
    pub fn check(&self, account: &Account) -> LockoutStatus {
        let now = Utc::now();
        match account.locked_until {
            Some(until) if until > now => LockoutStatus::Locked {
                remaining_minutes: remaining_minutes(now, until),
            },
            _ => LockoutStatus::Allowed,
        }
    }

    /// Records a failed attempt.
    ///
    /// The increment and the lockout decision execute as one atomic
    /// conditional update in the store; concurrent failures for the same
    /// account cannot lose increments. Returns the running counter and the
    /// lockout deadline if one is now active.
    pub async fn record_failure(
        &self,
        account: &Account,
    ) -> Result<(i32, Option<DateTime<Utc>>), AppError> {
        let (count, locked_until) = self
            .accounts
            .record_failed_attempt(account.id, self.threshold, self.lockout_minutes)
            .await?;

        if let Some(until) = locked_until {
            warn!(
                account_id = %account.id,
                attempts = count,
                locked_until = %until,
                "Account locked after repeated failed logins"
            );
        }

        Ok((count, locked_until))
    }

    /// Resets the counter and clears any lockout. Called exactly on
    /// successful authentication.
    pub async fn record_success(&self, account: &Account) -> Result<(), AppError> {
        self.accounts.record_successful_login(account.id).await
    }
}

/// Whole minutes from `now` until `until`, rounded up; 0 once passed.
fn remaining_minutes(now: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    let seconds = (until - now).num_seconds().max(0);
    (seconds + 59) / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_remaining_minutes_rounds_up() {
        let now = Utc::now();
        assert_eq!(remaining_minutes(now, now + Duration::seconds(61)), 2);
        assert_eq!(remaining_minutes(now, now + Duration::seconds(60)), 1);
        assert_eq!(remaining_minutes(now, now + Duration::seconds(1)), 1);
        assert_eq!(remaining_minutes(now, now + Duration::minutes(15)), 15);
    }

    #[test]
    fn test_remaining_minutes_never_negative() {
        let now = Utc::now();
        assert_eq!(remaining_minutes(now, now - Duration::minutes(3)), 0);
    }
}
