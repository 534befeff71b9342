use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::player::PlayerBasicInfo;
use crate::models::team::{NewTeam, Team, TeamBasicInfo, TeamRow, TeamWithDetails};

const TEAM_COLUMNS: &str = "id, team_name, captain_id, logo_url, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct MemberRow {
    team_id: Uuid,
    #[sqlx(flatten)]
    player: PlayerBasicInfo,
}

/// Members of each team in roster order, keyed by team id.
async fn load_members(
    pool: &PgPool,
    team_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<PlayerBasicInfo>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT tm.team_id, p.id, p.name, p.ml_nickname, p.avatar_url
        FROM team_members tm
        JOIN players p ON p.id = tm.player_id
        WHERE tm.team_id = ANY($1)
        ORDER BY tm.team_id, tm.position
        "#,
    )
    .bind(team_ids)
    .fetch_all(pool)
    .await?;

    let mut members: HashMap<Uuid, Vec<PlayerBasicInfo>> = HashMap::new();
    for row in rows {
        members.entry(row.team_id).or_default().push(row.player);
    }
    Ok(members)
}

fn with_details(row: TeamRow, member_details: Vec<PlayerBasicInfo>) -> TeamWithDetails {
    let captain = member_details.iter().find(|p| p.id == row.captain_id).cloned();
    let members = member_details.iter().map(|p| p.id).collect();
    TeamWithDetails {
        team: Team::from_row(row, members),
        captain,
        member_details,
    }
}

async fn insert_members(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    members: &[Uuid],
) -> Result<(), sqlx::Error> {
    let positions: Vec<i32> = (0..members.len() as i32).collect();
    sqlx::query(
        r#"
        INSERT INTO team_members (team_id, player_id, position)
        SELECT $1, member.player_id, member.position
        FROM UNNEST($2::uuid[], $3::int[]) AS member(player_id, position)
        "#,
    )
    .bind(team_id)
    .bind(members)
    .bind(&positions)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Team row and roster are written in one transaction.
pub async fn insert_team(pool: &PgPool, team: &NewTeam) -> Result<Team, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, TeamRow>(&format!(
        r#"
        INSERT INTO teams (id, team_name, captain_id, logo_url)
        VALUES ($1, $2, $3, $4)
        RETURNING {TEAM_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&team.team_name)
    .bind(team.captain_id)
    .bind(&team.logo_url)
    .fetch_one(&mut *tx)
    .await?;

    insert_members(&mut tx, row.id, &team.members).await?;
    tx.commit().await?;

    Ok(Team::from_row(row, team.members.clone()))
}

pub async fn list_teams_with_details(pool: &PgPool) -> Result<Vec<TeamWithDetails>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TeamRow>(&format!(
        "SELECT {TEAM_COLUMNS} FROM teams ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut members = load_members(pool, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let details = members.remove(&row.id).unwrap_or_default();
            with_details(row, details)
        })
        .collect())
}

pub async fn find_with_details(
    pool: &PgPool,
    team_id: Uuid,
) -> Result<Option<TeamWithDetails>, sqlx::Error> {
    let Some(row) = sqlx::query_as::<_, TeamRow>(&format!(
        "SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1"
    ))
    .bind(team_id)
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };

    let mut members = load_members(pool, &[team_id]).await?;
    let details = members.remove(&team_id).unwrap_or_default();
    Ok(Some(with_details(row, details)))
}

pub async fn find_by_id(pool: &PgPool, team_id: Uuid) -> Result<Option<Team>, sqlx::Error> {
    Ok(find_with_details(pool, team_id).await?.map(|details| details.team))
}

/// Basic info for the given teams, in the order of `team_ids`.
pub async fn basic_info(pool: &PgPool, team_ids: &[Uuid]) -> Result<Vec<TeamBasicInfo>, sqlx::Error> {
    sqlx::query_as::<_, TeamBasicInfo>(
        r#"
        SELECT t.id, t.team_name, t.logo_url
        FROM UNNEST($1::uuid[]) WITH ORDINALITY AS requested(id, ord)
        JOIN teams t ON t.id = requested.id
        ORDER BY requested.ord
        "#,
    )
    .bind(team_ids)
    .fetch_all(pool)
    .await
}

/// Ids from `team_ids` that have no team row.
pub async fn missing_ids(pool: &PgPool, team_ids: &[Uuid]) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT requested.id
        FROM UNNEST($1::uuid[]) AS requested(id)
        LEFT JOIN teams t ON t.id = requested.id
        WHERE t.id IS NULL
        "#,
    )
    .bind(team_ids)
    .fetch_all(pool)
    .await
}

pub async fn team_name_taken(
    pool: &PgPool,
    team_name: &str,
    except: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM teams
            WHERE team_name = $1 AND ($2::uuid IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(team_name)
    .bind(except)
    .fetch_one(pool)
    .await
}

/// Rewrites the team row and replaces its roster.
pub async fn update_team(
    pool: &PgPool,
    team_id: Uuid,
    team: &NewTeam,
) -> Result<Option<Team>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(row) = sqlx::query_as::<_, TeamRow>(&format!(
        r#"
        UPDATE teams
        SET team_name = $2, captain_id = $3, logo_url = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING {TEAM_COLUMNS}
        "#
    ))
    .bind(team_id)
    .bind(&team.team_name)
    .bind(team.captain_id)
    .bind(&team.logo_url)
    .fetch_optional(&mut *tx)
    .await?
    else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM team_members WHERE team_id = $1")
        .bind(team_id)
        .execute(&mut *tx)
        .await?;
    insert_members(&mut tx, team_id, &team.members).await?;
    tx.commit().await?;

    Ok(Some(Team::from_row(row, team.members.clone())))
}

pub async fn delete_team(pool: &PgPool, team_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
