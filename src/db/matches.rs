use sqlx::PgPool;
use uuid::Uuid;

use crate::models::matches::{Match, MatchWithTeams, MatchWithTeamsRow, NewMatch};

const MATCH_COLUMNS: &str = "id, tournament_id, team_a_id, team_b_id, match_date, match_time, \
    location, round, result_team_a_score, result_team_b_score, winner_team_id, status, \
    created_at, updated_at";

const MATCH_WITH_TEAMS_SELECT: &str = r#"
    SELECT m.id, m.tournament_id, m.team_a_id, m.team_b_id, m.match_date, m.match_time,
           m.location, m.round, m.result_team_a_score, m.result_team_b_score,
           m.winner_team_id, m.status, m.created_at, m.updated_at,
           ta.team_name AS team_a_name, ta.logo_url AS team_a_logo_url,
           tb.team_name AS team_b_name, tb.logo_url AS team_b_logo_url
    FROM matches m
    LEFT JOIN teams ta ON ta.id = m.team_a_id
    LEFT JOIN teams tb ON tb.id = m.team_b_id
"#;

pub async fn insert_match(pool: &PgPool, game: &NewMatch) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(&format!(
        r#"
        INSERT INTO matches
            (id, tournament_id, team_a_id, team_b_id, match_date, match_time, location,
             round, result_team_a_score, result_team_b_score, winner_team_id, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {MATCH_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(game.tournament_id)
    .bind(game.team_a_id)
    .bind(game.team_b_id)
    .bind(game.match_date)
    .bind(&game.match_time)
    .bind(&game.location)
    .bind(&game.round)
    .bind(game.result_team_a_score)
    .bind(game.result_team_b_score)
    .bind(game.winner_team_id)
    .bind(game.status.as_str())
    .fetch_one(pool)
    .await
}

/// All matches, or those of one tournament, each with both teams resolved.
pub async fn list_with_teams(
    pool: &PgPool,
    tournament_id: Option<Uuid>,
) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MatchWithTeamsRow>(&format!(
        r#"
        {MATCH_WITH_TEAMS_SELECT}
        WHERE ($1::uuid IS NULL OR m.tournament_id = $1)
        ORDER BY m.match_date ASC, m.match_time ASC
        "#
    ))
    .bind(tournament_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MatchWithTeams::from).collect())
}

pub async fn list_with_teams_by_ids(
    pool: &PgPool,
    match_ids: &[Uuid],
) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MatchWithTeamsRow>(&format!(
        "{MATCH_WITH_TEAMS_SELECT} WHERE m.id = ANY($1)"
    ))
    .bind(match_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MatchWithTeams::from).collect())
}

pub async fn find_with_teams(
    pool: &PgPool,
    match_id: Uuid,
) -> Result<Option<MatchWithTeams>, sqlx::Error> {
    let row = sqlx::query_as::<_, MatchWithTeamsRow>(&format!(
        "{MATCH_WITH_TEAMS_SELECT} WHERE m.id = $1"
    ))
    .bind(match_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(MatchWithTeams::from))
}

pub async fn find_by_id(pool: &PgPool, match_id: Uuid) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(&format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"))
        .bind(match_id)
        .fetch_optional(pool)
        .await
}

pub async fn exists(pool: &PgPool, match_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM matches WHERE id = $1)")
        .bind(match_id)
        .fetch_one(pool)
        .await
}

pub async fn update_match(
    pool: &PgPool,
    match_id: Uuid,
    game: &NewMatch,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(&format!(
        r#"
        UPDATE matches
        SET tournament_id = $2, team_a_id = $3, team_b_id = $4, match_date = $5,
            match_time = $6, location = $7, round = $8, result_team_a_score = $9,
            result_team_b_score = $10, winner_team_id = $11, status = $12,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {MATCH_COLUMNS}
        "#
    ))
    .bind(match_id)
    .bind(game.tournament_id)
    .bind(game.team_a_id)
    .bind(game.team_b_id)
    .bind(game.match_date)
    .bind(&game.match_time)
    .bind(&game.location)
    .bind(&game.round)
    .bind(game.result_team_a_score)
    .bind(game.result_team_b_score)
    .bind(game.winner_team_id)
    .bind(game.status.as_str())
    .fetch_optional(pool)
    .await
}

pub async fn delete_match(pool: &PgPool, match_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches WHERE id = $1")
        .bind(match_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
