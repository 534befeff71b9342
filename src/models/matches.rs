use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::{double_option, optional_text, required_text, text_enum};
use crate::models::team::TeamBasicInfo;

text_enum!(MatchStatus {
    Scheduled => "scheduled",
    Ongoing => "ongoing",
    Completed => "completed",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub match_date: DateTime<Utc>,
    pub match_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub round: String,
    pub result_team_a_score: Option<i32>,
    pub result_team_b_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_team_id: Option<Uuid>,
    #[sqlx(try_from = "String")]
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A match joined with the name and logo of both teams.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MatchWithTeamsRow {
    #[sqlx(flatten)]
    pub game: Match,
    pub team_a_name: Option<String>,
    pub team_a_logo_url: Option<String>,
    pub team_b_name: Option<String>,
    pub team_b_logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWithTeams {
    #[serde(flatten)]
    pub game: Match,
    pub team_a: Option<TeamBasicInfo>,
    pub team_b: Option<TeamBasicInfo>,
}

impl From<MatchWithTeamsRow> for MatchWithTeams {
    fn from(row: MatchWithTeamsRow) -> Self {
        let team_a = row.team_a_name.map(|team_name| TeamBasicInfo {
            id: row.game.team_a_id,
            team_name,
            logo_url: row.team_a_logo_url,
        });
        let team_b = row.team_b_name.map(|team_name| TeamBasicInfo {
            id: row.game.team_b_id,
            team_name,
            logo_url: row.team_b_logo_url,
        });
        Self { game: row.game, team_a, team_b }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub tournament_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateMatchRequest {
    #[serde(default)]
    pub tournament_id: String,
    #[serde(default)]
    pub team_a_id: String,
    #[serde(default)]
    pub team_b_id: String,
    pub match_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub match_time: String,
    pub location: Option<String>,
    #[serde(default)]
    pub round: String,
    pub result_team_a_score: Option<i32>,
    pub result_team_b_score: Option<i32>,
    pub winner_team_id: Option<String>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub tournament_id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub match_date: DateTime<Utc>,
    pub match_time: String,
    pub location: Option<String>,
    pub round: String,
    pub result_team_a_score: Option<i32>,
    pub result_team_b_score: Option<i32>,
    pub winner_team_id: Option<Uuid>,
    pub status: MatchStatus,
}

impl NewMatch {
    /// Team A differs from team B and the winner, if any, is one of them.
    pub fn check_teams(&self) -> Result<(), String> {
        if self.team_a_id == self.team_b_id {
            return Err("team_a_id and team_b_id must be different teams".to_string());
        }
        if let Some(winner) = self.winner_team_id {
            if winner != self.team_a_id && winner != self.team_b_id {
                return Err("winner_team_id must be either team_a_id or team_b_id".to_string());
            }
        }
        if self.result_team_a_score.is_some_and(|s| s < 0)
            || self.result_team_b_score.is_some_and(|s| s < 0)
        {
            return Err("Scores must not be negative".to_string());
        }
        Ok(())
    }
}

impl CreateMatchRequest {
    pub fn validate(&self) -> Result<NewMatch, String> {
        let new_match = NewMatch {
            tournament_id: required_id(&self.tournament_id, "tournament_id")?,
            team_a_id: required_id(&self.team_a_id, "team_a_id")?,
            team_b_id: required_id(&self.team_b_id, "team_b_id")?,
            match_date: self.match_date.ok_or("match_date is required")?,
            match_time: required_text(&self.match_time, "match_time")?,
            location: optional_text(self.location.as_ref()),
            round: required_text(&self.round, "round")?,
            result_team_a_score: self.result_team_a_score,
            result_team_b_score: self.result_team_b_score,
            winner_team_id: optional_id(self.winner_team_id.as_ref(), "winner_team_id")?,
            status: required_text(&self.status, "status")?.parse()?,
        };
        new_match.check_teams()?;
        Ok(new_match)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMatchRequest {
    pub tournament_id: Option<String>,
    pub team_a_id: Option<String>,
    pub team_b_id: Option<String>,
    pub match_date: Option<DateTime<Utc>>,
    pub match_time: Option<String>,
    pub location: Option<String>,
    pub round: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub result_team_a_score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub result_team_b_score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub winner_team_id: Option<Option<String>>,
    pub status: Option<String>,
}

impl UpdateMatchRequest {
    pub fn is_empty(&self) -> bool {
        self.tournament_id.is_none()
            && self.team_a_id.is_none()
            && self.team_b_id.is_none()
            && self.match_date.is_none()
            && self.match_time.is_none()
            && self.location.is_none()
            && self.round.is_none()
            && self.result_team_a_score.is_none()
            && self.result_team_b_score.is_none()
            && self.winner_team_id.is_none()
            && self.status.is_none()
    }

    /// Merge over the stored match, then re-check the team rules on the
    /// merged values. An explicit `null` clears a score or the winner, as
    /// does an empty `winner_team_id`.
    pub fn apply_to(&self, current: &Match) -> Result<NewMatch, String> {
        if self.is_empty() {
            return Err("No fields provided to update".to_string());
        }

        let id_or = |value: &Option<String>, stored: Uuid, field: &str| match value {
            Some(v) => required_id(v, field),
            None => Ok(stored),
        };
        let text_or = |value: &Option<String>, stored: &str, field: &str| match value {
            Some(v) => required_text(v, field),
            None => Ok(stored.to_string()),
        };

        let merged = NewMatch {
            tournament_id: id_or(&self.tournament_id, current.tournament_id, "tournament_id")?,
            team_a_id: id_or(&self.team_a_id, current.team_a_id, "team_a_id")?,
            team_b_id: id_or(&self.team_b_id, current.team_b_id, "team_b_id")?,
            match_date: self.match_date.unwrap_or(current.match_date),
            match_time: text_or(&self.match_time, &current.match_time, "match_time")?,
            location: match &self.location {
                Some(location) => optional_text(Some(location)),
                None => current.location.clone(),
            },
            round: text_or(&self.round, &current.round, "round")?,
            result_team_a_score: self.result_team_a_score.unwrap_or(current.result_team_a_score),
            result_team_b_score: self.result_team_b_score.unwrap_or(current.result_team_b_score),
            winner_team_id: match &self.winner_team_id {
                Some(winner) => optional_id(winner.as_ref(), "winner_team_id")?,
                None => current.winner_team_id,
            },
            status: match &self.status {
                Some(status) => status.parse()?,
                None => current.status,
            },
        };
        merged.check_teams()?;
        Ok(merged)
    }
}

fn required_id(raw: &str, field: &str) -> Result<Uuid, String> {
    if raw.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Uuid::parse_str(raw.trim()).map_err(|_| format!("Invalid {} format", field))
}

fn optional_id(raw: Option<&String>, field: &str) -> Result<Option<Uuid>, String> {
    match optional_text(raw) {
        Some(id) => Uuid::parse_str(&id)
            .map(Some)
            .map_err(|_| format!("Invalid {} format", field)),
        None => Ok(None),
    }
}
