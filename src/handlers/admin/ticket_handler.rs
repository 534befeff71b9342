use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{tickets, tournaments};
use crate::error::{parse_field_id, parse_id, ApiError};
use crate::models::common::ApiResponse;
use crate::models::ticket::{
    CreateTicketRequest, Ticket, TicketQuery, TicketWithTournament, UpdateTicketRequest,
};

async fn ensure_tournament(pool: &PgPool, tournament_id: Uuid) -> Result<(), ApiError> {
    if !tournaments::exists(pool, tournament_id).await? {
        return Err(ApiError::BadRequest("Tournament not found".to_string()));
    }
    Ok(())
}

async fn populate(pool: &PgPool, ticket: Ticket) -> Result<TicketWithTournament, ApiError> {
    let tournament = tournaments::basic_info(pool, ticket.tournament_id).await?;
    Ok(TicketWithTournament { ticket, tournament })
}

// GET /admin/tickets?tournament_id=&populate=true
#[tracing::instrument(name = "Admin list tickets", skip(query, pool))]
pub async fn get_tickets(
    query: web::Query<TicketQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = match query.tournament_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_field_id(raw, "tournament_id")?),
        _ => None,
    };
    let tickets = tickets::list_tickets(&pool, tournament_id).await?;

    if !query.populate {
        return Ok(HttpResponse::Ok().json(ApiResponse::ok("Tickets retrieved", tickets)));
    }

    let mut populated = Vec::with_capacity(tickets.len());
    for ticket in tickets {
        populated.push(populate(&pool, ticket).await?);
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tickets retrieved", populated)))
}

// POST /admin/tickets
#[tracing::instrument(name = "Admin create ticket", skip(request, pool))]
pub async fn create_ticket(
    request: web::Json<CreateTicketRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let ticket = request.validate().map_err(ApiError::Validation)?;
    ensure_tournament(&pool, ticket.tournament_id).await?;

    let created = tickets::insert_ticket(&pool, &ticket).await?;
    tracing::info!("Ticket type {} created", created.id);
    Ok(HttpResponse::Created().json(ApiResponse::created("Ticket type created successfully", created)))
}

// GET /admin/tickets/{id}?populate=true
#[tracing::instrument(name = "Admin get ticket", skip(query, pool))]
pub async fn get_ticket_by_id(
    path: web::Path<String>,
    query: web::Query<TicketQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let ticket_id = parse_id(&path, "ticket")?;
    let ticket = tickets::find_by_id(&pool, ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;

    if query.populate {
        let view = populate(&pool, ticket).await?;
        return Ok(HttpResponse::Ok().json(ApiResponse::ok("Ticket retrieved", view)));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Ticket retrieved", ticket)))
}

// PUT /admin/tickets/{id}
#[tracing::instrument(name = "Admin update ticket", skip(request, pool))]
pub async fn update_ticket(
    path: web::Path<String>,
    request: web::Json<UpdateTicketRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let ticket_id = parse_id(&path, "ticket")?;
    if request.is_empty() {
        return Err(ApiError::BadRequest("No fields provided to update".to_string()));
    }

    let current = tickets::find_by_id(&pool, ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;
    let merged = request.apply_to(&current).map_err(ApiError::Validation)?;
    if merged.tournament_id != current.tournament_id {
        ensure_tournament(&pool, merged.tournament_id).await?;
    }

    let updated = tickets::update_ticket(&pool, ticket_id, &merged)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Ticket updated successfully", updated)))
}

// DELETE /admin/tickets/{id}
#[tracing::instrument(name = "Admin delete ticket", skip(pool))]
pub async fn delete_ticket(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let ticket_id = parse_id(&path, "ticket")?;
    if !tickets::delete_ticket(&pool, ticket_id).await? {
        return Err(ApiError::NotFound("Ticket not found".to_string()));
    }
    tracing::info!("Ticket type {} deleted", ticket_id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("Ticket deleted successfully")))
}
