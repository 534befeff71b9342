use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::{optional_text, required_text};
use crate::models::player::PlayerBasicInfo;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamRow {
    pub id: Uuid,
    pub team_name: String,
    pub captain_id: Uuid,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub team_name: String,
    pub captain_id: Uuid,
    pub members: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn from_row(row: TeamRow, members: Vec<Uuid>) -> Self {
        Self {
            id: row.id,
            team_name: row.team_name,
            captain_id: row.captain_id,
            members,
            logo_url: row.logo_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Team with its captain and members resolved to player info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamWithDetails {
    #[serde(flatten)]
    pub team: Team,
    pub captain: Option<PlayerBasicInfo>,
    pub member_details: Vec<PlayerBasicInfo>,
}

/// Subset of a team embedded in match and tournament views.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamBasicInfo {
    pub id: Uuid,
    pub team_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub captain_id: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct NewTeam {
    pub team_name: String,
    pub captain_id: Uuid,
    pub members: Vec<Uuid>,
    pub logo_url: Option<String>,
}

impl NewTeam {
    /// Every player id the team references, captain first, without repeats.
    pub fn referenced_players(&self) -> Vec<Uuid> {
        let mut ids = vec![self.captain_id];
        for member in &self.members {
            if !ids.contains(member) {
                ids.push(*member);
            }
        }
        ids
    }
}

impl CreateTeamRequest {
    pub fn validate(&self) -> Result<NewTeam, String> {
        let team_name = required_text(&self.team_name, "team_name")?;
        if self.captain_id.trim().is_empty() {
            return Err("captain_id is required".to_string());
        }
        let captain_id = parse_player_id(&self.captain_id, "captain_id")?;
        let members = parse_members(&self.members)?;
        check_captain_membership(captain_id, &members)?;

        Ok(NewTeam {
            team_name,
            captain_id,
            members,
            logo_url: optional_text(self.logo_url.as_ref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeamRequest {
    pub team_name: Option<String>,
    pub captain_id: Option<String>,
    pub members: Option<Vec<String>>,
    pub logo_url: Option<String>,
}

impl UpdateTeamRequest {
    pub fn is_empty(&self) -> bool {
        self.team_name.is_none()
            && self.captain_id.is_none()
            && self.members.is_none()
            && self.logo_url.is_none()
    }

    /// Merge the update over the stored team; the captain rule is checked
    /// against the merged result.
    pub fn apply_to(&self, current: &Team) -> Result<NewTeam, String> {
        if self.is_empty() {
            return Err("No fields provided to update".to_string());
        }

        let team_name = match &self.team_name {
            Some(name) => required_text(name, "team_name")?,
            None => current.team_name.clone(),
        };
        let captain_id = match &self.captain_id {
            Some(id) => parse_player_id(id, "captain_id")?,
            None => current.captain_id,
        };
        let members = match &self.members {
            Some(members) => parse_members(members)?,
            None => current.members.clone(),
        };
        check_captain_membership(captain_id, &members)?;

        let logo_url = match &self.logo_url {
            Some(url) => optional_text(Some(url)),
            None => current.logo_url.clone(),
        };

        Ok(NewTeam { team_name, captain_id, members, logo_url })
    }
}

fn parse_player_id(raw: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("Invalid {} format", field))
}

fn parse_members(raw: &[String]) -> Result<Vec<Uuid>, String> {
    if raw.is_empty() {
        return Err("members must contain at least one player".to_string());
    }
    let mut members = Vec::with_capacity(raw.len());
    for id in raw {
        let id = Uuid::parse_str(id.trim()).map_err(|_| format!("Invalid member ID format: {}", id))?;
        if members.contains(&id) {
            return Err(format!("Duplicate member ID: {}", id));
        }
        members.push(id);
    }
    Ok(members)
}

fn check_captain_membership(captain_id: Uuid, members: &[Uuid]) -> Result<(), String> {
    if !members.contains(&captain_id) {
        return Err("Captain must be one of the team members".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn request(captain: Uuid, members: &[Uuid]) -> CreateTeamRequest {
        CreateTeamRequest {
            team_name: "RRQ Hoshi".into(),
            captain_id: captain.to_string(),
            members: members.iter().map(Uuid::to_string).collect(),
            logo_url: None,
        }
    }

    #[test]
    fn captain_must_be_a_member() {
        let players = ids(3);
        let outsider = Uuid::new_v4();
        assert_eq!(
            request(outsider, &players).validate().unwrap_err(),
            "Captain must be one of the team members"
        );
        let team = request(players[1], &players).validate().unwrap();
        assert_eq!(team.captain_id, players[1]);
        assert_eq!(team.members, players);
    }

    #[test]
    fn members_must_be_present_and_well_formed() {
        let captain = Uuid::new_v4();
        assert!(request(captain, &[]).validate().is_err());

        let mut bad = request(captain, &[captain]);
        bad.members.push("nope".into());
        assert!(bad.validate().unwrap_err().starts_with("Invalid member ID format"));

        let dup = request(captain, &[captain, captain]);
        assert!(dup.validate().unwrap_err().starts_with("Duplicate member ID"));
    }

    #[test]
    fn team_name_and_captain_are_required() {
        let players = ids(1);
        let mut missing_name = request(players[0], &players);
        missing_name.team_name = " ".into();
        assert_eq!(missing_name.validate().unwrap_err(), "team_name is required");

        let mut missing_captain = request(players[0], &players);
        missing_captain.captain_id = String::new();
        assert_eq!(missing_captain.validate().unwrap_err(), "captain_id is required");
    }

    #[test]
    fn referenced_players_lists_captain_once() {
        let players = ids(2);
        let team = request(players[1], &players).validate().unwrap();
        assert_eq!(team.referenced_players(), vec![players[1], players[0]]);
    }

    #[test]
    fn update_checks_captain_against_merged_members() {
        let players = ids(3);
        let current = Team {
            id: Uuid::new_v4(),
            team_name: "ONIC".into(),
            captain_id: players[0],
            members: players.clone(),
            logo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // Dropping the captain from the roster without naming a new one fails.
        let update = UpdateTeamRequest {
            members: Some(vec![players[1].to_string(), players[2].to_string()]),
            ..Default::default()
        };
        assert!(update.apply_to(&current).is_err());

        let update = UpdateTeamRequest {
            captain_id: Some(players[2].to_string()),
            ..Default::default()
        };
        let merged = update.apply_to(&current).unwrap();
        assert_eq!(merged.captain_id, players[2]);
        assert_eq!(merged.team_name, "ONIC");

        assert!(UpdateTeamRequest::default().apply_to(&current).is_err());
    }
}
