use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::text_enum;
use crate::models::matches::MatchWithTeams;

text_enum!(UserTicketStatus {
    Valid => "valid",
    Used => "used",
});

/// One purchased admission to a match.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserTicket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub match_id: Uuid,
    pub purchase_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: UserTicketStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTicketWithMatch {
    #[serde(flatten)]
    pub ticket: UserTicket,
    #[serde(rename = "match")]
    pub match_details: Option<MatchWithTeams>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PurchaseTicketRequest {
    #[serde(default)]
    pub match_id: String,
}
