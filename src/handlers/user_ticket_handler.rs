use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::db::{matches, user_tickets};
use crate::error::{parse_field_id, ApiError};
use crate::models::common::ApiResponse;
use crate::models::user_ticket::{PurchaseTicketRequest, UserTicketWithMatch};

fn caller_id(claims: &Claims) -> Result<Uuid, ApiError> {
    claims
        .user_id()
        .ok_or_else(|| ApiError::Unauthorized("Invalid user ID in token".to_string()))
}

#[tracing::instrument(
    name = "Purchase match ticket",
    skip(request, claims, pool),
    fields(username = %claims.username, match_id = %request.match_id)
)]
pub async fn purchase_ticket(
    request: web::Json<PurchaseTicketRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;
    if request.match_id.trim().is_empty() {
        return Err(ApiError::Validation("match_id is required".to_string()));
    }
    let match_id = parse_field_id(&request.match_id, "match_id")?;

    if !matches::exists(&pool, match_id).await? {
        return Err(ApiError::NotFound("Match not found".to_string()));
    }
    if user_tickets::already_purchased(&pool, user_id, match_id).await? {
        return Err(ApiError::Conflict("You already have a ticket for this match".to_string()));
    }

    let ticket = user_tickets::insert_user_ticket(&pool, user_id, match_id).await?;
    tracing::info!("Ticket {} issued for match {}", ticket.id, match_id);

    Ok(HttpResponse::Created().json(ApiResponse::created("Ticket purchased successfully", ticket)))
}

#[tracing::instrument(name = "List own tickets", skip(claims, pool), fields(username = %claims.username))]
pub async fn get_my_tickets(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;
    let tickets = user_tickets::list_for_user(&pool, user_id).await?;

    let match_ids: Vec<Uuid> = tickets.iter().map(|t| t.match_id).collect();
    let by_id: HashMap<Uuid, _> = matches::list_with_teams_by_ids(&pool, &match_ids)
        .await?
        .into_iter()
        .map(|m| (m.game.id, m))
        .collect();

    let views: Vec<UserTicketWithMatch> = tickets
        .into_iter()
        .map(|ticket| {
            let match_details = by_id.get(&ticket.match_id).cloned();
            UserTicketWithMatch { ticket, match_details }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tickets retrieved", views)))
}
