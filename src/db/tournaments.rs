use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::team::TeamBasicInfo;
use crate::models::tournament::{
    NewTournament, PublicTournament, Tournament, TournamentBasicInfo, TournamentRow,
    TournamentWithTeams,
};

const TOURNAMENT_COLUMNS: &str = "id, name, description, start_date, end_date, prize_pool, \
    rules_document_url, status, created_by, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    tournament_id: Uuid,
    #[sqlx(flatten)]
    team: TeamBasicInfo,
}

/// Participating teams of each tournament in registration order.
async fn load_participants(
    pool: &PgPool,
    tournament_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<TeamBasicInfo>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ParticipantRow>(
        r#"
        SELECT tt.tournament_id, t.id, t.team_name, t.logo_url
        FROM tournament_teams tt
        JOIN teams t ON t.id = tt.team_id
        WHERE tt.tournament_id = ANY($1)
        ORDER BY tt.tournament_id, tt.position
        "#,
    )
    .bind(tournament_ids)
    .fetch_all(pool)
    .await?;

    let mut participants: HashMap<Uuid, Vec<TeamBasicInfo>> = HashMap::new();
    for row in rows {
        participants.entry(row.tournament_id).or_default().push(row.team);
    }
    Ok(participants)
}

fn with_teams(row: TournamentRow, teams: Vec<TeamBasicInfo>) -> TournamentWithTeams {
    let ids = teams.iter().map(|t| t.id).collect();
    TournamentWithTeams {
        tournament: Tournament::from_row(row, ids),
        teams,
    }
}

async fn insert_participants(
    tx: &mut Transaction<'_, Postgres>,
    tournament_id: Uuid,
    team_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    let positions: Vec<i32> = (0..team_ids.len() as i32).collect();
    sqlx::query(
        r#"
        INSERT INTO tournament_teams (tournament_id, team_id, position)
        SELECT $1, participant.team_id, participant.position
        FROM UNNEST($2::uuid[], $3::int[]) AS participant(team_id, position)
        "#,
    )
    .bind(tournament_id)
    .bind(team_ids)
    .bind(&positions)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn insert_tournament(
    pool: &PgPool,
    tournament: &NewTournament,
    created_by: Option<Uuid>,
) -> Result<Tournament, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, TournamentRow>(&format!(
        r#"
        INSERT INTO tournaments
            (id, name, description, start_date, end_date, prize_pool,
             rules_document_url, status, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {TOURNAMENT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&tournament.name)
    .bind(&tournament.description)
    .bind(tournament.start_date)
    .bind(tournament.end_date)
    .bind(&tournament.prize_pool)
    .bind(&tournament.rules_document_url)
    .bind(tournament.status.as_str())
    .bind(created_by)
    .fetch_one(&mut *tx)
    .await?;

    insert_participants(&mut tx, row.id, &tournament.teams_participating).await?;
    tx.commit().await?;

    Ok(Tournament::from_row(row, tournament.teams_participating.clone()))
}

pub async fn list_with_teams(pool: &PgPool) -> Result<Vec<TournamentWithTeams>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TournamentRow>(&format!(
        "SELECT {TOURNAMENT_COLUMNS} FROM tournaments ORDER BY start_date DESC"
    ))
    .fetch_all(pool)
    .await?;

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut participants = load_participants(pool, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let teams = participants.remove(&row.id).unwrap_or_default();
            with_teams(row, teams)
        })
        .collect())
}

pub async fn find_with_teams(
    pool: &PgPool,
    tournament_id: Uuid,
) -> Result<Option<TournamentWithTeams>, sqlx::Error> {
    let Some(row) = sqlx::query_as::<_, TournamentRow>(&format!(
        "SELECT {TOURNAMENT_COLUMNS} FROM tournaments WHERE id = $1"
    ))
    .bind(tournament_id)
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };

    let mut participants = load_participants(pool, &[tournament_id]).await?;
    let teams = participants.remove(&tournament_id).unwrap_or_default();
    Ok(Some(with_teams(row, teams)))
}

pub async fn find_by_id(
    pool: &PgPool,
    tournament_id: Uuid,
) -> Result<Option<Tournament>, sqlx::Error> {
    Ok(find_with_teams(pool, tournament_id).await?.map(|t| t.tournament))
}

pub async fn exists(pool: &PgPool, tournament_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM tournaments WHERE id = $1)")
        .bind(tournament_id)
        .fetch_one(pool)
        .await
}

pub async fn list_public(pool: &PgPool) -> Result<Vec<PublicTournament>, sqlx::Error> {
    sqlx::query_as::<_, PublicTournament>(
        r#"
        SELECT id, name, description, start_date, end_date, prize_pool,
               rules_document_url, status
        FROM tournaments
        ORDER BY start_date ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn basic_info(
    pool: &PgPool,
    tournament_id: Uuid,
) -> Result<Option<TournamentBasicInfo>, sqlx::Error> {
    sqlx::query_as::<_, TournamentBasicInfo>(
        "SELECT id, name, start_date, end_date, status FROM tournaments WHERE id = $1",
    )
    .bind(tournament_id)
    .fetch_optional(pool)
    .await
}

/// Rewrites the tournament row and replaces its participant list.
pub async fn update_tournament(
    pool: &PgPool,
    tournament_id: Uuid,
    tournament: &NewTournament,
) -> Result<Option<Tournament>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(row) = sqlx::query_as::<_, TournamentRow>(&format!(
        r#"
        UPDATE tournaments
        SET name = $2, description = $3, start_date = $4, end_date = $5,
            prize_pool = $6, rules_document_url = $7, status = $8, updated_at = NOW()
        WHERE id = $1
        RETURNING {TOURNAMENT_COLUMNS}
        "#
    ))
    .bind(tournament_id)
    .bind(&tournament.name)
    .bind(&tournament.description)
    .bind(tournament.start_date)
    .bind(tournament.end_date)
    .bind(&tournament.prize_pool)
    .bind(&tournament.rules_document_url)
    .bind(tournament.status.as_str())
    .fetch_optional(&mut *tx)
    .await?
    else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM tournament_teams WHERE tournament_id = $1")
        .bind(tournament_id)
        .execute(&mut *tx)
        .await?;
    insert_participants(&mut tx, tournament_id, &tournament.teams_participating).await?;
    tx.commit().await?;

    Ok(Some(Tournament::from_row(row, tournament.teams_participating.clone())))
}

pub async fn delete_tournament(pool: &PgPool, tournament_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
        .bind(tournament_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
