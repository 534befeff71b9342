use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common::{optional_text, required_text};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub ml_nickname: String,
    pub ml_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subset of a player embedded in team views.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlayerBasicInfo {
    pub id: Uuid,
    pub name: String,
    pub ml_nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePlayerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ml_nickname: String,
    #[serde(default)]
    pub ml_id: String,
    #[serde(default)]
    pub status: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub ml_nickname: String,
    pub ml_id: String,
    pub status: String,
    pub avatar_url: Option<String>,
}

impl CreatePlayerRequest {
    pub fn validate(&self) -> Result<NewPlayer, String> {
        Ok(NewPlayer {
            name: required_text(&self.name, "name")?,
            ml_nickname: required_text(&self.ml_nickname, "ml_nickname")?,
            ml_id: required_text(&self.ml_id, "ml_id")?,
            status: required_text(&self.status, "status")?,
            avatar_url: optional_text(self.avatar_url.as_ref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub ml_nickname: Option<String>,
    pub ml_id: Option<String>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdatePlayerRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.ml_nickname.is_none()
            && self.ml_id.is_none()
            && self.status.is_none()
            && self.avatar_url.is_none()
    }

    /// Merge the update over the stored player.
    pub fn apply_to(&self, current: &Player) -> Result<NewPlayer, String> {
        if self.is_empty() {
            return Err("No fields provided to update".to_string());
        }

        let pick = |value: &Option<String>, stored: &str, field: &str| match value {
            Some(v) => required_text(v, field),
            None => Ok(stored.to_string()),
        };

        Ok(NewPlayer {
            name: pick(&self.name, &current.name, "name")?,
            ml_nickname: pick(&self.ml_nickname, &current.ml_nickname, "ml_nickname")?,
            ml_id: pick(&self.ml_id, &current.ml_id, "ml_id")?,
            status: pick(&self.status, &current.status, "status")?,
            avatar_url: match &self.avatar_url {
                Some(url) => optional_text(Some(url)),
                None => current.avatar_url.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Player {
        Player {
            id: Uuid::new_v4(),
            name: "Kiboy".into(),
            ml_nickname: "kiboy".into(),
            ml_id: "1001".into(),
            status: "active".into(),
            avatar_url: Some("/uploads/player-avatars/a.png".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn create_requires_every_mandatory_field() {
        let request = CreatePlayerRequest {
            name: "Kiboy".into(),
            ml_nickname: "kiboy".into(),
            ml_id: "".into(),
            status: "active".into(),
            avatar_url: None,
        };
        assert_eq!(request.validate().unwrap_err(), "ml_id is required");

        let request = CreatePlayerRequest {
            ml_id: "1001".into(),
            ..request
        };
        let player = request.validate().unwrap();
        assert_eq!(player.ml_id, "1001");
        assert_eq!(player.avatar_url, None);
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(UpdatePlayerRequest::default().apply_to(&stored()).is_err());
    }

    #[test]
    fn update_keeps_absent_fields() {
        let update = UpdatePlayerRequest {
            status: Some("benched".into()),
            ..Default::default()
        };
        let merged = update.apply_to(&stored()).unwrap();
        assert_eq!(merged.status, "benched");
        assert_eq!(merged.name, "Kiboy");
        assert_eq!(merged.avatar_url.as_deref(), Some("/uploads/player-avatars/a.png"));
    }

    #[test]
    fn update_cannot_blank_a_required_field() {
        let update = UpdatePlayerRequest {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(update.apply_to(&stored()).unwrap_err(), "name is required");
    }

    #[test]
    fn blank_avatar_clears_it() {
        let update = UpdatePlayerRequest {
            avatar_url: Some("".into()),
            ..Default::default()
        };
        assert_eq!(update.apply_to(&stored()).unwrap().avatar_url, None);
    }
}
