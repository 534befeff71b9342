use sqlx::PgPool;
use uuid::Uuid;

use crate::models::player::{NewPlayer, Player};

const PLAYER_COLUMNS: &str =
    "id, name, ml_nickname, ml_id, status, avatar_url, created_at, updated_at";

pub async fn insert_player(pool: &PgPool, player: &NewPlayer) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!(
        r#"
        INSERT INTO players (id, name, ml_nickname, ml_id, status, avatar_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {PLAYER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&player.name)
    .bind(&player.ml_nickname)
    .bind(&player.ml_id)
    .bind(&player.status)
    .bind(&player.avatar_url)
    .fetch_one(pool)
    .await
}

pub async fn list_players(pool: &PgPool) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!(
        "SELECT {PLAYER_COLUMNS} FROM players ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, player_id: Uuid) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1"))
        .bind(player_id)
        .fetch_optional(pool)
        .await
}

/// Ids from `player_ids` that have no player row.
pub async fn missing_ids(pool: &PgPool, player_ids: &[Uuid]) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT requested.id
        FROM UNNEST($1::uuid[]) AS requested(id)
        LEFT JOIN players p ON p.id = requested.id
        WHERE p.id IS NULL
        "#,
    )
    .bind(player_ids)
    .fetch_all(pool)
    .await
}

/// Reports which unique field, if any, another player already holds.
pub async fn find_conflict(
    pool: &PgPool,
    ml_nickname: &str,
    ml_id: &str,
    except: Option<Uuid>,
) -> Result<Option<&'static str>, sqlx::Error> {
    let clash = sqlx::query_as::<_, (bool, bool)>(
        r#"
        SELECT
            COALESCE(BOOL_OR(ml_nickname = $1), FALSE),
            COALESCE(BOOL_OR(ml_id = $2), FALSE)
        FROM players
        WHERE (ml_nickname = $1 OR ml_id = $2)
          AND ($3::uuid IS NULL OR id <> $3)
        "#,
    )
    .bind(ml_nickname)
    .bind(ml_id)
    .bind(except)
    .fetch_one(pool)
    .await?;

    Ok(match clash {
        (true, _) => Some("ml_nickname"),
        (_, true) => Some("ml_id"),
        _ => None,
    })
}

pub async fn update_player(
    pool: &PgPool,
    player_id: Uuid,
    player: &NewPlayer,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!(
        r#"
        UPDATE players
        SET name = $2, ml_nickname = $3, ml_id = $4, status = $5, avatar_url = $6,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {PLAYER_COLUMNS}
        "#
    ))
    .bind(player_id)
    .bind(&player.name)
    .bind(&player.ml_nickname)
    .bind(&player.ml_id)
    .bind(&player.status)
    .bind(&player.avatar_url)
    .fetch_optional(pool)
    .await
}

pub async fn delete_player(pool: &PgPool, player_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM players WHERE id = $1")
        .bind(player_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
