//! Creates (or promotes) an admin account and loads a small demo data set.
//!
//! Admin credentials come from `SEED_ADMIN_USERNAME`, `SEED_ADMIN_EMAIL` and
//! `SEED_ADMIN_PASSWORD`. Demo data is skipped when its teams already exist.

use std::env;
use std::error::Error;

use chrono::{Duration, Utc};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use arena_backend::auth::password::hash_password;
use arena_backend::config::settings::get_config;
use arena_backend::db::{matches, players, teams, tickets, tournaments, users};
use arena_backend::models::matches::{MatchStatus, NewMatch};
use arena_backend::models::player::NewPlayer;
use arena_backend::models::team::NewTeam;
use arena_backend::models::ticket::NewTicket;
use arena_backend::models::tournament::{NewTournament, TournamentStatus};
use arena_backend::models::user::UserRole;
use arena_backend::telemetry::{get_subscriber, init_subscriber};

const DEMO_ROSTERS: &[(&str, &[(&str, &str)])] = &[
    (
        "RRQ Hoshi",
        &[
            ("Ahmad Febriyanto", "Lemon"),
            ("Rivaldi Dwi Saputra", "R7"),
            ("Calvin Winata", "Vyn"),
            ("Muhammad Gilang", "Skylar"),
            ("Adit Rahman", "Xinnn"),
        ],
    ),
    (
        "EVOS Glory",
        &[
            ("Wawan Suherman", "Wann"),
            ("Antimage Dewa", "Antimage"),
            ("Ferxiic Pratama", "Ferxiic"),
            ("Luminaire Gaming", "Luminaire"),
            ("Clover Gaming", "Clover"),
        ],
    ),
    (
        "ONIC Esports",
        &[
            ("Sanz Jangkar", "Sanz"),
            ("CW Hero", "CW"),
            ("Kairi Legend", "Kairi"),
            ("Butsss Gaming", "Butsss"),
            ("Kiboy Gaming", "Kiboy"),
        ],
    ),
];

async fn seed_admin(pool: &PgPool) -> Result<Uuid, Box<dyn Error>> {
    let username = env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let email = env::var("SEED_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@arena.local".to_string())
        .to_lowercase();
    let password = env::var("SEED_ADMIN_PASSWORD")
        .map_err(|_| "SEED_ADMIN_PASSWORD must be set to seed an admin account")?;

    if let Some(existing) = users::find_by_email(pool, &email).await? {
        users::set_role(pool, existing.id, UserRole::Admin).await?;
        tracing::info!("Promoted existing user {} to admin", existing.username);
        return Ok(existing.id);
    }

    let password_hash = hash_password(&password)?;
    let admin = users::insert_user(pool, &username, &email, &password_hash, UserRole::Admin).await?;
    tracing::info!("Created admin user {}", admin.username);
    Ok(admin.id)
}

async fn seed_demo_data(pool: &PgPool, admin_id: Uuid) -> Result<(), Box<dyn Error>> {
    let (first_team, _) = DEMO_ROSTERS[0];
    if teams::team_name_taken(pool, first_team, None).await? {
        tracing::info!("Demo data already present, skipping");
        return Ok(());
    }

    let mut team_ids = Vec::new();
    let mut ml_id = 12_345_678_901_u64;
    for (team_name, roster) in DEMO_ROSTERS {
        let mut members = Vec::new();
        for (name, nickname) in roster.iter() {
            let player = players::insert_player(
                pool,
                &NewPlayer {
                    name: name.to_string(),
                    ml_nickname: nickname.to_string(),
                    ml_id: ml_id.to_string(),
                    status: "active".to_string(),
                    avatar_url: None,
                },
            )
            .await?;
            ml_id += 1;
            members.push(player.id);
        }

        let team = teams::insert_team(
            pool,
            &NewTeam {
                team_name: team_name.to_string(),
                captain_id: members[0],
                members,
                logo_url: None,
            },
        )
        .await?;
        tracing::info!("Seeded team {}", team.team_name);
        team_ids.push(team.id);
    }

    let start_date = Utc::now() + Duration::days(7);
    let tournament = tournaments::insert_tournament(
        pool,
        &NewTournament {
            name: "Arena Invitational Season 1".to_string(),
            description: "Round robin followed by a best-of-five grand final".to_string(),
            start_date,
            end_date: start_date + Duration::days(14),
            prize_pool: "Rp 500.000.000".to_string(),
            rules_document_url: None,
            status: TournamentStatus::Upcoming,
            teams_participating: team_ids.clone(),
        },
        Some(admin_id),
    )
    .await?;

    let fixtures = [(0, 1, "Week 1"), (1, 2, "Week 1"), (0, 2, "Week 2")];
    for (day, (a, b, round)) in fixtures.iter().enumerate() {
        matches::insert_match(
            pool,
            &NewMatch {
                tournament_id: tournament.id,
                team_a_id: team_ids[*a],
                team_b_id: team_ids[*b],
                match_date: start_date + Duration::days(day as i64),
                match_time: "19:00".to_string(),
                location: Some("Istora Senayan, Jakarta".to_string()),
                round: round.to_string(),
                result_team_a_score: None,
                result_team_b_score: None,
                winner_team_id: None,
                status: MatchStatus::Scheduled,
            },
        )
        .await?;
    }

    for (price, quantity, description) in [(150_000, 500, "Regular"), (450_000, 100, "VIP")] {
        tickets::insert_ticket(
            pool,
            &NewTicket {
                tournament_id: tournament.id,
                price,
                quantity_available: quantity,
                description: Some(description.to_string()),
            },
        )
        .await?;
    }

    tracing::info!("Seeded tournament {} with fixtures and ticket types", tournament.name);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = get_config()?;

    let subscriber = get_subscriber("arena-seed".into(), config.application.log_level.clone(), std::io::stdout);
    init_subscriber(subscriber);

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(config.database.connection_string().expose_secret())
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = seed_admin(&pool).await?;
    seed_demo_data(&pool, admin_id).await?;

    tracing::info!("Seeding finished");
    Ok(())
}
