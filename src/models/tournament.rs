use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::{optional_text, required_text, text_enum};
use crate::models::matches::MatchWithTeams;
use crate::models::team::TeamBasicInfo;

text_enum!(TournamentStatus {
    Upcoming => "upcoming",
    Ongoing => "ongoing",
    Completed => "completed",
});

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TournamentRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub prize_pool: String,
    pub rules_document_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TournamentStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub prize_pool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_document_url: Option<String>,
    pub status: TournamentStatus,
    pub teams_participating: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    pub fn from_row(row: TournamentRow, teams_participating: Vec<Uuid>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            prize_pool: row.prize_pool,
            rules_document_url: row.rules_document_url,
            status: row.status,
            teams_participating,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Tournament with participating teams resolved, used by the admin list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentWithTeams {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub teams: Vec<TeamBasicInfo>,
}

/// Full tournament view: teams plus every match with both teams resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentDetails {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub teams: Vec<TeamBasicInfo>,
    pub matches: Vec<MatchWithTeams>,
}

/// Public listing entry; leaves out admin bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PublicTournament {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub prize_pool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_document_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TournamentStatus,
}

/// Subset of a tournament embedded in ticket views.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TournamentBasicInfo {
    pub id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: TournamentStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTournamentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prize_pool: String,
    pub rules_document_url: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub teams_participating: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub struct NewTournament {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub prize_pool: String,
    pub rules_document_url: Option<String>,
    pub status: TournamentStatus,
    pub teams_participating: Vec<Uuid>,
}

impl CreateTournamentRequest {
    pub fn validate(&self) -> Result<NewTournament, String> {
        let name = required_text(&self.name, "name")?;
        let description = required_text(&self.description, "description")?;
        let prize_pool = required_text(&self.prize_pool, "prize_pool")?;
        let status = required_text(&self.status, "status")?.parse::<TournamentStatus>()?;
        let start_date = self.start_date.ok_or("start_date is required")?;
        let end_date = self.end_date.ok_or("end_date is required")?;
        check_date_range(start_date, end_date)?;

        Ok(NewTournament {
            name,
            description,
            start_date,
            end_date,
            prize_pool,
            rules_document_url: optional_text(self.rules_document_url.as_ref()),
            status,
            teams_participating: parse_team_ids(&self.teams_participating)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTournamentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub prize_pool: Option<String>,
    pub rules_document_url: Option<String>,
    pub status: Option<String>,
    pub teams_participating: Option<Vec<String>>,
}

impl UpdateTournamentRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.prize_pool.is_none()
            && self.rules_document_url.is_none()
            && self.status.is_none()
            && self.teams_participating.is_none()
    }

    pub fn apply_to(&self, current: &Tournament) -> Result<NewTournament, String> {
        if self.is_empty() {
            return Err("No fields provided to update".to_string());
        }

        let text = |value: &Option<String>, stored: &str, field: &str| match value {
            Some(v) => required_text(v, field),
            None => Ok(stored.to_string()),
        };

        let start_date = self.start_date.unwrap_or(current.start_date);
        let end_date = self.end_date.unwrap_or(current.end_date);
        check_date_range(start_date, end_date)?;

        Ok(NewTournament {
            name: text(&self.name, &current.name, "name")?,
            description: text(&self.description, &current.description, "description")?,
            start_date,
            end_date,
            prize_pool: text(&self.prize_pool, &current.prize_pool, "prize_pool")?,
            rules_document_url: match &self.rules_document_url {
                Some(url) => optional_text(Some(url)),
                None => current.rules_document_url.clone(),
            },
            status: match &self.status {
                Some(status) => status.parse()?,
                None => current.status,
            },
            teams_participating: match &self.teams_participating {
                Some(ids) => parse_team_ids(ids)?,
                None => current.teams_participating.clone(),
            },
        })
    }
}

fn check_date_range(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Result<(), String> {
    if end_date < start_date {
        return Err("end_date must not be before start_date".to_string());
    }
    Ok(())
}

fn parse_team_ids(raw: &[String]) -> Result<Vec<Uuid>, String> {
    let mut ids = Vec::with_capacity(raw.len());
    for id in raw {
        let id = Uuid::parse_str(id.trim()).map_err(|_| format!("Invalid team ID format: {}", id))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request() -> CreateTournamentRequest {
        let start = Utc::now();
        CreateTournamentRequest {
            name: "MPL ID Season 14".into(),
            description: "Regular season".into(),
            start_date: Some(start),
            end_date: Some(start + Duration::days(30)),
            prize_pool: "300000 USD".into(),
            rules_document_url: None,
            status: "upcoming".into(),
            teams_participating: vec![],
        }
    }

    #[test]
    fn valid_request_passes() {
        let tournament = request().validate().unwrap();
        assert_eq!(tournament.status, TournamentStatus::Upcoming);
        assert!(tournament.teams_participating.is_empty());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut req = request();
        req.end_date = req.start_date.map(|d| d - Duration::days(1));
        assert_eq!(req.validate().unwrap_err(), "end_date must not be before start_date");
    }

    #[test]
    fn same_day_tournament_is_allowed() {
        let mut req = request();
        req.end_date = req.start_date;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_fields_and_bad_status_are_rejected() {
        let mut req = request();
        req.start_date = None;
        assert_eq!(req.validate().unwrap_err(), "start_date is required");

        let mut req = request();
        req.status = "archived".into();
        assert!(req.validate().unwrap_err().contains("upcoming, ongoing, completed"));

        let mut req = request();
        req.prize_pool = String::new();
        assert_eq!(req.validate().unwrap_err(), "prize_pool is required");
    }

    #[test]
    fn team_ids_are_parsed_and_deduplicated() {
        let team = Uuid::new_v4();
        let mut req = request();
        req.teams_participating = vec![team.to_string(), team.to_string()];
        assert_eq!(req.validate().unwrap().teams_participating, vec![team]);

        req.teams_participating = vec!["bogus".into()];
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_checks_merged_dates() {
        let new = request().validate().unwrap();
        let current = Tournament {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            prize_pool: new.prize_pool,
            rules_document_url: None,
            status: new.status,
            teams_participating: vec![],
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let update = UpdateTournamentRequest {
            end_date: Some(current.start_date - Duration::days(2)),
            ..Default::default()
        };
        assert!(update.apply_to(&current).is_err());

        let update = UpdateTournamentRequest {
            status: Some("ongoing".into()),
            ..Default::default()
        };
        let merged = update.apply_to(&current).unwrap();
        assert_eq!(merged.status, TournamentStatus::Ongoing);
        assert_eq!(merged.name, "MPL ID Season 14");

        assert!(UpdateTournamentRequest::default().apply_to(&current).is_err());
    }
}
