//! Dining Table Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dining table entity
///
/// `code` is the stable random identifier embedded in the customer
/// QR-code URL. It is unguessable but not secret; mutation rights are
/// bound to table sessions, not to knowledge of the code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
}

/// Update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningTableUpdate {
    #[validate(length(min = 1, max = 60))]
    pub name: Option<String>,
}
