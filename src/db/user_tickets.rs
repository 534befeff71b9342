use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user_ticket::{UserTicket, UserTicketStatus};

const USER_TICKET_COLUMNS: &str = "id, user_id, match_id, purchase_date, status";

pub async fn insert_user_ticket(
    pool: &PgPool,
    user_id: Uuid,
    match_id: Uuid,
) -> Result<UserTicket, sqlx::Error> {
    sqlx::query_as::<_, UserTicket>(&format!(
        r#"
        INSERT INTO user_tickets (id, user_id, match_id, status)
        VALUES ($1, $2, $3, $4)
        RETURNING {USER_TICKET_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(match_id)
    .bind(UserTicketStatus::Valid.as_str())
    .fetch_one(pool)
    .await
}

pub async fn already_purchased(
    pool: &PgPool,
    user_id: Uuid,
    match_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM user_tickets WHERE user_id = $1 AND match_id = $2)",
    )
    .bind(user_id)
    .bind(match_id)
    .fetch_one(pool)
    .await
}

pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserTicket>, sqlx::Error> {
    sqlx::query_as::<_, UserTicket>(&format!(
        r#"
        SELECT {USER_TICKET_COLUMNS}
        FROM user_tickets
        WHERE user_id = $1
        ORDER BY purchase_date DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}
