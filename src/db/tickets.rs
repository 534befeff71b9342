use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ticket::{NewTicket, Ticket};

const TICKET_COLUMNS: &str =
    "id, tournament_id, price, quantity_available, description, created_at, updated_at";

pub async fn insert_ticket(pool: &PgPool, ticket: &NewTicket) -> Result<Ticket, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(&format!(
        r#"
        INSERT INTO tickets (id, tournament_id, price, quantity_available, description)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {TICKET_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(ticket.tournament_id)
    .bind(ticket.price)
    .bind(ticket.quantity_available)
    .bind(&ticket.description)
    .fetch_one(pool)
    .await
}

pub async fn list_tickets(
    pool: &PgPool,
    tournament_id: Option<Uuid>,
) -> Result<Vec<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(&format!(
        r#"
        SELECT {TICKET_COLUMNS}
        FROM tickets
        WHERE ($1::uuid IS NULL OR tournament_id = $1)
        ORDER BY price ASC, created_at ASC
        "#
    ))
    .bind(tournament_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, ticket_id: Uuid) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(&format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1"))
        .bind(ticket_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_ticket(
    pool: &PgPool,
    ticket_id: Uuid,
    ticket: &NewTicket,
) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(&format!(
        r#"
        UPDATE tickets
        SET tournament_id = $2, price = $3, quantity_available = $4, description = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {TICKET_COLUMNS}
        "#
    ))
    .bind(ticket_id)
    .bind(ticket.tournament_id)
    .bind(ticket.price)
    .bind(ticket.quantity_available)
    .bind(&ticket.description)
    .fetch_optional(pool)
    .await
}

pub async fn delete_ticket(pool: &PgPool, ticket_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
        .bind(ticket_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
