//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all application data. Uniqueness
//! invariants (one report per athlete per day, unique join codes, unique tag
//! names per team) live here as UNIQUE constraints rather than application
//! checks.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            join_code TEXT NOT NULL UNIQUE,
            target_readiness INTEGER NOT NULL DEFAULT 100,
            logo_path TEXT,
            logo_display_mode TEXT NOT NULL DEFAULT 'NONE',
            background_opacity REAL NOT NULL DEFAULT 0.05,
            background_position TEXT NOT NULL DEFAULT 'CENTER',
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            role TEXT NOT NULL DEFAULT 'ATHLETE',
            team_id TEXT REFERENCES teams(id) ON DELETE SET NULL,
            current_status TEXT NOT NULL DEFAULT 'AVAILABLE',
            status_note TEXT NOT NULL DEFAULT '',
            status_updated_at TEXT NOT NULL,
            timezone TEXT NOT NULL DEFAULT 'UTC',
            daily_reminder_enabled INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_memberships (
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            team_id TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
            PRIMARY KEY (user_id, team_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_tags (
            id TEXT PRIMARY KEY,
            team_id TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            target_min INTEGER NOT NULL DEFAULT 60,
            target_max INTEGER NOT NULL DEFAULT 80,
            color TEXT NOT NULL DEFAULT '#0d6efd',
            UNIQUE (team_id, name)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_schedules (
            team_id TEXT PRIMARY KEY REFERENCES teams(id) ON DELETE CASCADE,
            weekly_pattern TEXT NOT NULL DEFAULT '{}',
            date_overrides TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS readiness_reports (
            id TEXT PRIMARY KEY,
            athlete_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            report_date TEXT NOT NULL,
            sleep_quality INTEGER NOT NULL,
            energy_fatigue INTEGER NOT NULL,
            muscle_soreness INTEGER NOT NULL,
            mood_stress INTEGER NOT NULL,
            motivation INTEGER NOT NULL,
            nutrition_quality INTEGER NOT NULL,
            hydration INTEGER NOT NULL,
            readiness_score INTEGER NOT NULL,
            comments TEXT,
            created_at TEXT NOT NULL,
            UNIQUE (athlete_id, report_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS personal_labels (
            id TEXT PRIMARY KEY,
            athlete_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            label_date TEXT NOT NULL,
            label TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (athlete_id, label_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feature_requests (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            request_type TEXT NOT NULL DEFAULT 'FEATURE',
            status TEXT NOT NULL DEFAULT 'OPEN',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feature_request_upvotes (
            request_id TEXT NOT NULL REFERENCES feature_requests(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            PRIMARY KEY (request_id, user_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feature_request_comments (
            id TEXT PRIMARY KEY,
            request_id TEXT NOT NULL REFERENCES feature_requests(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            comment TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_reports_athlete_date ON readiness_reports(athlete_id, report_date);
        CREATE INDEX IF NOT EXISTS idx_reports_date ON readiness_reports(report_date);
        CREATE INDEX IF NOT EXISTS idx_profiles_team ON profiles(team_id);
        CREATE INDEX IF NOT EXISTS idx_memberships_team ON team_memberships(team_id);
        CREATE INDEX IF NOT EXISTS idx_tags_team ON team_tags(team_id);
        CREATE INDEX IF NOT EXISTS idx_labels_athlete_date ON personal_labels(athlete_id, label_date);
        CREATE INDEX IF NOT EXISTS idx_feature_requests_status ON feature_requests(status);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
