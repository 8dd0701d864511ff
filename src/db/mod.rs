use sqlx::sqlite::SqlitePool;
use crate::models::ColleagueRecord;

pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS colleagues (
               name         TEXT PRIMARY KEY NOT NULL,
               position     INTEGER NOT NULL,
               bounce_count INTEGER NOT NULL DEFAULT 0 CHECK (bounce_count >= 0),
               win_count    INTEGER NOT NULL DEFAULT 0 CHECK (win_count >= 0)
           )"#
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert any missing colleagues with zeroed counters. Existing rows keep their
/// counts and position; new names are appended after the last one.
pub async fn seed_colleagues(pool: &SqlitePool, names: &[String]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for name in names {
        sqlx::query(
            r#"INSERT OR IGNORE INTO colleagues (name, position, bounce_count, win_count)
               SELECT ?, COALESCE(MAX(position), -1) + 1, 0, 0 FROM colleagues"#
        )
        .bind(name)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

pub async fn get_all_colleagues(pool: &SqlitePool) -> Result<Vec<ColleagueRecord>, sqlx::Error> {
    sqlx::query_as::<_, ColleagueRecord>(
        r#"SELECT name, bounce_count, win_count FROM colleagues ORDER BY position"#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_colleague(pool: &SqlitePool, name: &str) -> Result<Option<ColleagueRecord>, sqlx::Error> {
    sqlx::query_as::<_, ColleagueRecord>(
        r#"SELECT name, bounce_count, win_count FROM colleagues WHERE name = ?"#
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

// Per-record counters - single UPDATE so concurrent bounces never lose a count
pub async fn increment_bounce(pool: &SqlitePool, name: &str) -> Result<Option<ColleagueRecord>, sqlx::Error> {
    sqlx::query_as::<_, ColleagueRecord>(
        r#"UPDATE colleagues
           SET bounce_count = bounce_count + 1
           WHERE name = ?
           RETURNING name, bounce_count, win_count"#
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn award_win(pool: &SqlitePool, name: &str) -> Result<Option<ColleagueRecord>, sqlx::Error> {
    sqlx::query_as::<_, ColleagueRecord>(
        r#"UPDATE colleagues
           SET win_count = win_count + 1, bounce_count = 0
           WHERE name = ?
           RETURNING name, bounce_count, win_count"#
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

// Table-wide resets
pub async fn clear_bounces(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(r#"UPDATE colleagues SET bounce_count = 0"#)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn reset_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(r#"UPDATE colleagues SET bounce_count = 0, win_count = 0"#)
        .execute(pool)
        .await?;

    Ok(())
}
