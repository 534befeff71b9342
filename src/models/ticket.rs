use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::optional_text;
use crate::models::tournament::TournamentBasicInfo;

/// A priced ticket category on sale for a tournament.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub price: i64,
    pub quantity_available: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketWithTournament {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub tournament: Option<TournamentBasicInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TicketQuery {
    pub tournament_id: Option<String>,
    #[serde(default)]
    pub populate: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTicketRequest {
    #[serde(default)]
    pub tournament_id: String,
    pub price: Option<i64>,
    pub quantity_available: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct NewTicket {
    pub tournament_id: Uuid,
    pub price: i64,
    pub quantity_available: i32,
    pub description: Option<String>,
}

impl CreateTicketRequest {
    pub fn validate(&self) -> Result<NewTicket, String> {
        if self.tournament_id.trim().is_empty() {
            return Err("tournament_id is required".to_string());
        }
        let tournament_id = Uuid::parse_str(self.tournament_id.trim())
            .map_err(|_| "Invalid tournament_id format".to_string())?;
        let price = self.price.ok_or("price is required")?;
        let quantity_available = self.quantity_available.ok_or("quantity_available is required")?;
        check_amounts(price, quantity_available)?;

        Ok(NewTicket {
            tournament_id,
            price,
            quantity_available,
            description: optional_text(self.description.as_ref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketRequest {
    pub tournament_id: Option<String>,
    pub price: Option<i64>,
    pub quantity_available: Option<i32>,
    pub description: Option<String>,
}

impl UpdateTicketRequest {
    pub fn is_empty(&self) -> bool {
        self.tournament_id.is_none()
            && self.price.is_none()
            && self.quantity_available.is_none()
            && self.description.is_none()
    }

    pub fn apply_to(&self, current: &Ticket) -> Result<NewTicket, String> {
        if self.is_empty() {
            return Err("No fields provided to update".to_string());
        }
        let tournament_id = match &self.tournament_id {
            Some(id) => Uuid::parse_str(id.trim())
                .map_err(|_| "Invalid tournament_id format".to_string())?,
            None => current.tournament_id,
        };
        let price = self.price.unwrap_or(current.price);
        let quantity_available = self.quantity_available.unwrap_or(current.quantity_available);
        check_amounts(price, quantity_available)?;

        Ok(NewTicket {
            tournament_id,
            price,
            quantity_available,
            description: match &self.description {
                Some(d) => optional_text(Some(d)),
                None => current.description.clone(),
            },
        })
    }
}

fn check_amounts(price: i64, quantity_available: i32) -> Result<(), String> {
    if price < 0 {
        return Err("price must not be negative".to_string());
    }
    if quantity_available < 0 {
        return Err("quantity_available must not be negative".to_string());
    }
    Ok(())
}
