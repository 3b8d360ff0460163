//! The verified identity attached to a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cividesk_entity::account::AccountRole;

/// Identity and role proven by a verified access token.
///
/// Produced once per request by the HTTP extractor and threaded explicitly
/// to guards and handlers; never attached to the request as a side channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Account id.
    pub id: Uuid,
    /// Account email at token-issuance time.
    pub email: String,
    /// Account role at token-issuance time.
    pub role: AccountRole,
}
